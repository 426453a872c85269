//! Suffix normalization.

/// Strip every trailing repetition of `suffix` from `text`, then append
/// exactly one.
///
/// An empty `suffix` leaves `text` unchanged.
///
/// ```
/// use grist_text::ensure_suffix;
///
/// assert_eq!(ensure_suffix("Hello", "!"), "Hello!");
/// assert_eq!(ensure_suffix("Hello!!!", "!"), "Hello!");
/// assert_eq!(ensure_suffix("app", "/app"), "app/app");
/// ```
pub fn ensure_suffix(text: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return text.to_string();
    }

    let mut base = text;
    while let Some(stripped) = base.strip_suffix(suffix) {
        base = stripped;
    }

    let mut out = String::with_capacity(base.len() + suffix.len());
    out.push_str(base);
    out.push_str(suffix);
    out
}
