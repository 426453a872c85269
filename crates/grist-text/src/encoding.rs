//! Charset transcoding.
//!
//! Labels follow the WHATWG Encoding Standard (`"utf-8"`, `"gb2312"`,
//! `"shift_jis"`, `"windows-1252"`, ...), matched case-insensitively.
//! Decoding is lenient: malformed input becomes U+FFFD, and characters the
//! target charset cannot represent become `?`.

use encoding_rs::{EncoderResult, Encoding, UTF_16BE, UTF_16LE};
use grist_core::{Error, Result};

/// Source charset used by [`convert_to_utf8`].
pub const DEFAULT_FROM_ENCODING: &str = "gb2312";

/// Target charset used by [`convert_to_utf8`].
pub const DEFAULT_TO_ENCODING: &str = "utf-8";

fn lookup(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::encoding(format!("unknown encoding label: {label}")))
}

/// Re-encode `input` from the `from` charset to the `to` charset.
///
/// Characters the `to` charset cannot represent are written as `?`.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if either label is unknown, or if `to` is
/// `replacement`, which has no encoder.
///
/// A bare `"utf-16"` label means little-endian, as in the WHATWG label
/// table; name `"utf-16be"` for big-endian output. No byte order mark is
/// written.
///
/// # Example
///
/// ```
/// use grist_text::convert_encoding;
///
/// let gbk = convert_encoding("中文".as_bytes(), "gb2312", "utf-8")?;
/// assert_eq!(gbk, [0xD6, 0xD0, 0xCE, 0xC4]);
///
/// let utf8 = convert_encoding(&gbk, "utf-8", "gb2312")?;
/// assert_eq!(utf8, "中文".as_bytes());
/// # Ok::<(), grist_core::Error>(())
/// ```
pub fn convert_encoding(input: &[u8], to: &str, from: &str) -> Result<Vec<u8>> {
    let source = lookup(from)?;
    let target = lookup(to)?;
    let (decoded, _) = source.decode_without_bom_handling(input);

    if target == UTF_16LE || target == UTF_16BE {
        return Ok(encode_utf16(&decoded, target == UTF_16BE));
    }
    if target.output_encoding() != target {
        return Err(Error::encoding(format!(
            "cannot encode to {}",
            target.name()
        )));
    }

    encode_lossy(target, &decoded)
}

/// Encode `text`, writing `?` for each character `target` cannot represent.
fn encode_lossy(target: &'static Encoding, text: &str) -> Result<Vec<u8>> {
    let mut encoder = target.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut rest = text;

    loop {
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(rest.len())
            .ok_or_else(|| Error::encoding("input too large to encode"))?;
        out.reserve(needed);

        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut out, true);
        rest = &rest[read..];
        match result {
            EncoderResult::InputEmpty => return Ok(out),
            EncoderResult::OutputFull => {}
            // Stateful encoders are back in ASCII mode here.
            EncoderResult::Unmappable(_) => out.push(b'?'),
        }
    }
}

fn encode_utf16(text: &str, big_endian: bool) -> Vec<u8> {
    text.encode_utf16()
        .flat_map(|unit| {
            if big_endian {
                unit.to_be_bytes()
            } else {
                unit.to_le_bytes()
            }
        })
        .collect()
}

/// Convert `input` from [`DEFAULT_FROM_ENCODING`] to [`DEFAULT_TO_ENCODING`].
pub fn convert_to_utf8(input: &[u8]) -> Result<Vec<u8>> {
    convert_encoding(input, DEFAULT_TO_ENCODING, DEFAULT_FROM_ENCODING)
}

/// Number of code points in `input` decoded as `encoding`.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if the label is unknown.
pub fn length_in(input: &[u8], encoding: &str) -> Result<usize> {
    let (decoded, _) = lookup(encoding)?.decode_without_bom_handling(input);
    Ok(decoded.chars().count())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ZHONGWEN_GBK: [u8; 4] = [0xD6, 0xD0, 0xCE, 0xC4];

    #[test]
    fn test_convert_to_utf8_defaults() {
        let utf8 = convert_to_utf8(&ZHONGWEN_GBK).unwrap();
        assert_eq!(String::from_utf8(utf8).unwrap(), "中文");
    }

    #[test]
    fn test_convert_ascii_passthrough() {
        let out = convert_encoding(b"plain", "windows-1252", "utf-8").unwrap();
        assert_eq!(out, b"plain");
    }

    #[test]
    fn test_convert_latin1() {
        let out = convert_encoding("café".as_bytes(), "iso-8859-1", "utf-8").unwrap();
        assert_eq!(out, [b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_convert_labels_are_case_insensitive() {
        let out = convert_encoding(&ZHONGWEN_GBK, "UTF-8", " GB2312 ").unwrap();
        assert_eq!(out, "中文".as_bytes());
    }

    #[test]
    fn test_convert_unknown_label() {
        let err = convert_encoding(b"x", "utf-8", "klingon").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn test_convert_to_decode_only_target() {
        let err = convert_encoding(b"x", "iso-2022-kr", "utf-8").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_convert_unmappable_becomes_question_mark() {
        let out = convert_encoding("a中b".as_bytes(), "iso-8859-1", "utf-8").unwrap();
        assert_eq!(out, b"a?b");

        let out = convert_encoding("日😀本".as_bytes(), "iso-2022-jp", "utf-8").unwrap();
        let back = convert_encoding(&out, "utf-8", "iso-2022-jp").unwrap();
        assert_eq!(String::from_utf8(back).unwrap(), "日?本");
    }

    #[test]
    fn test_convert_to_utf16() {
        let le = convert_encoding("a中".as_bytes(), "utf-16le", "utf-8").unwrap();
        assert_eq!(le, [0x61, 0x00, 0x2D, 0x4E]);

        let be = convert_encoding(&ZHONGWEN_GBK, "UTF-16BE", "gb2312").unwrap();
        assert_eq!(be, [0x4E, 0x2D, 0x65, 0x87]);

        let back = convert_encoding(&le, "utf-8", "utf-16le").unwrap();
        assert_eq!(back, "a中".as_bytes());
    }

    #[test]
    fn test_convert_malformed_input_is_replaced() {
        let out = convert_encoding(&[b'a', 0xFF, b'b'], "utf-8", "utf-8").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\u{FFFD}b");
    }

    #[test]
    fn test_length_in() {
        assert_eq!(length_in("héllo".as_bytes(), "utf-8").unwrap(), 5);
        assert_eq!(length_in(&ZHONGWEN_GBK, "gb2312").unwrap(), 2);
        assert!(length_in(b"x", "nope").is_err());
    }
}
