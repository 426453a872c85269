//! Unicode title casing.
//!
//! A word starts at a code point whose nearest preceding code point, skipping
//! case-ignorable ones, is not cased. Word starts are mapped to titlecase and
//! the remainder of each word to lowercase. Underscores, hyphens, digits and
//! whitespace are all uncased, so each of them ends a word; apostrophes and
//! combining marks are case-ignorable and do not.

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Title-case `text`.
///
/// ```
/// use grist_text::title;
///
/// assert_eq!(title("hello world"), "Hello World");
/// assert_eq!(title("HelloWorld"), "Helloworld");
/// assert_eq!(title("hello-world"), "Hello-World");
/// assert_eq!(title("it's ÉTÉ"), "It's Été");
/// ```
pub fn title(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            push_titlecase(&mut out, c);
        }

        if !is_case_ignorable(c) {
            in_word = is_cased(c);
        }
    }

    out
}

fn push_titlecase(out: &mut String, c: char) {
    if let Some(t) = titlecase_exception(c) {
        out.push(t);
        return;
    }

    // Multi-character uppercase expansions (ß -> SS, ﬁ -> FI) keep only the
    // first character capitalized.
    let mut upper = c.to_uppercase();
    if let Some(first) = upper.next() {
        out.push(first);
    }
    for rest in upper {
        out.extend(rest.to_lowercase());
    }
}

/// Code points whose titlecase differs from the first char of their uppercase.
fn titlecase_exception(c: char) -> Option<char> {
    let t = match c as u32 {
        // Latin digraphs: DŽ/Dž/dž, LJ/Lj/lj, NJ/Nj/nj, DZ/Dz/dz
        0x01C4..=0x01C6 => 0x01C5,
        0x01C7..=0x01C9 => 0x01C8,
        0x01CA..=0x01CC => 0x01CB,
        0x01F1..=0x01F3 => 0x01F2,
        // Greek with ypogegrammeni map to prosgegrammeni forms
        cp @ (0x1F80..=0x1F87 | 0x1F90..=0x1F97 | 0x1FA0..=0x1FA7) => cp + 8,
        cp @ (0x1F88..=0x1F8F | 0x1F98..=0x1F9F | 0x1FA8..=0x1FAF) => cp,
        0x1FB3 | 0x1FBC => 0x1FBC,
        0x1FC3 | 0x1FCC => 0x1FCC,
        0x1FF3 | 0x1FFC => 0x1FFC,
        _ => return None,
    };
    char::from_u32(t)
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || is_titlecase_letter(c)
}

fn is_titlecase_letter(c: char) -> bool {
    c.general_category() == GeneralCategory::TitlecaseLetter
}

/// Case-ignorable: combining marks, format controls, modifier letters and
/// modifier symbols, plus word-internal punctuation (apostrophes, periods,
/// colons).
fn is_case_ignorable(c: char) -> bool {
    matches!(
        c.general_category(),
        GeneralCategory::NonspacingMark
            | GeneralCategory::EnclosingMark
            | GeneralCategory::Format
            | GeneralCategory::ModifierLetter
            | GeneralCategory::ModifierSymbol
    ) || is_mid_word_punctuation(c)
}

// Word_Break MidLetter / MidNumLet / Single_Quote
fn is_mid_word_punctuation(c: char) -> bool {
    matches!(
        c,
        '\'' | '.' | ':' | '\u{00B7}' | '\u{0387}' | '\u{055F}' | '\u{05F4}'
            | '\u{2018}' | '\u{2019}' | '\u{2024}' | '\u{2027}'
            | '\u{FE13}' | '\u{FE52}' | '\u{FE55}' | '\u{FF07}' | '\u{FF0E}' | '\u{FF1A}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_reference_cases() {
        assert_eq!(title("HelloWorld"), "Helloworld");
        assert_eq!(title("hello_world"), "Hello_World");
        assert_eq!(title("hello-world"), "Hello-World");
        assert_eq!(title("hello world"), "Hello World");
    }

    #[test]
    fn test_title_lowercases_rest_of_word() {
        assert_eq!(title("HELLO WORLD"), "Hello World");
        assert_eq!(title("mIxEd"), "Mixed");
    }

    #[test]
    fn test_title_apostrophe_stays_in_word() {
        assert_eq!(title("it's o'neil"), "It's O'neil");
        assert_eq!(title("don\u{2019}t"), "Don\u{2019}t");
    }

    #[test]
    fn test_title_digits_break_words() {
        assert_eq!(title("1st place"), "1St Place");
        assert_eq!(title("abc123def"), "Abc123Def");
    }

    #[test]
    fn test_title_non_ascii() {
        assert_eq!(title("élan vital"), "Élan Vital");
        assert_eq!(title("ΑΘΗΝΑ"), "Αθηνα");
        assert_eq!(title("straße"), "Straße");
    }

    #[test]
    fn test_title_combining_mark_stays_in_word() {
        // "e" + COMBINING ACUTE ACCENT + "t"
        assert_eq!(title("e\u{301}TE"), "E\u{301}te");
    }

    #[test]
    fn test_title_ignorable_outside_common_blocks() {
        // COMBINING CYRILLIC LETTER BE
        assert_eq!(title("а\u{2DE0}б"), "А\u{2DE0}б");
        // EMOJI MODIFIER FITZPATRICK TYPE-1-2
        assert_eq!(title("a\u{1F3FB}b"), "A\u{1F3FB}b");
        // MODIFIER LETTER CHINESE TONE YIN PING
        assert_eq!(title("a\u{A700}b"), "A\u{A700}b");
        // VARIATION SELECTOR-17
        assert_eq!(title("a\u{E0100}b"), "A\u{E0100}b");
    }

    #[test]
    fn test_title_adlam_combining_mark() {
        // ADLAM SMALL ALIF + ADLAM ALIF LENGTHENER + ADLAM SMALL BA
        assert_eq!(title("\u{1E922}\u{1E944}\u{1E923}"), "\u{1E900}\u{1E944}\u{1E923}");
    }

    #[test]
    fn test_title_titlecase_letter_is_cased() {
        assert!(is_cased('\u{01C5}'));
        assert_eq!(title("\u{01C5}A"), "\u{01C5}a");
    }

    #[test]
    fn test_title_special_expansions() {
        assert_eq!(title("ßa"), "Ssa");
        assert_eq!(title("ǆungla"), "ǅungla");
        assert_eq!(title("ﬁne"), "Fine");
    }

    #[test]
    fn test_title_empty_and_symbols() {
        assert_eq!(title(""), "");
        assert_eq!(title("--"), "--");
        assert_eq!(title("  a  b "), "  A  B ");
    }
}
