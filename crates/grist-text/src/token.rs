//! Random URL-safe tokens.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use rand::rngs::OsRng;

/// Token length used when callers have no preference.
pub const DEFAULT_TOKEN_LENGTH: usize = 16;

/// Generate a token of exactly `length` characters from `[A-Za-z0-9]`.
///
/// Bytes come from the operating system's CSPRNG and are base64 encoded with
/// `/`, `+` and `=` stripped. Stripping shortens each batch, so the loop keeps
/// drawing until the token is full.
pub fn random_token(length: usize) -> String {
    let mut token = String::with_capacity(length);

    while token.len() < length {
        let needed = length - token.len();
        let mut bytes = vec![0u8; needed];
        OsRng.fill_bytes(&mut bytes);

        let encoded = STANDARD.encode(&bytes);
        token.extend(
            encoded
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .take(needed),
        );
    }

    token
}
