//! Code-point slicing, indexing, length and containment.

/// Return the code points of `text` starting at `start`.
///
/// - A negative `start` counts from the end; one past the front clamps to 0.
/// - `None` length takes everything to the end.
/// - A negative `length` stops that many code points before the end.
///
/// Out-of-range requests yield an empty string.
///
/// ```
/// use grist_text::substring;
///
/// assert_eq!(substring("日本語テキスト", 2, Some(3)), "語テキ");
/// assert_eq!(substring("日本語テキスト", -3, None), "キスト");
/// assert_eq!(substring("日本語テキスト", 1, Some(-2)), "本語テキ");
/// ```
pub fn substring(text: &str, start: isize, length: Option<isize>) -> String {
    let total = text.chars().count();

    let from = if start < 0 {
        total.saturating_sub(start.unsigned_abs())
    } else {
        start.unsigned_abs()
    };
    if from >= total {
        return String::new();
    }

    let remaining = total - from;
    let take = match length {
        None => remaining,
        Some(n) if n < 0 => remaining.saturating_sub(n.unsigned_abs()),
        Some(n) => remaining.min(n.unsigned_abs()),
    };

    text.chars().skip(from).take(take).collect()
}

/// Return the code point at `index`, counting from the end when negative.
///
/// Returns `None` when `index` is outside `[-len, len - 1]`.
pub fn char_at(text: &str, index: isize) -> Option<char> {
    let position = if index < 0 {
        text.chars().count().checked_sub(index.unsigned_abs())?
    } else {
        index.unsigned_abs()
    };
    text.chars().nth(position)
}

/// Number of code points in `text`.
pub fn length(text: &str) -> usize {
    text.chars().count()
}

/// Returns true if any of `needles` occurs in `text`.
///
/// An empty needle always matches; no needles never match.
pub fn contains<I, S>(text: &str, needles: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    needles
        .into_iter()
        .any(|needle| text.contains(needle.as_ref()))
}
