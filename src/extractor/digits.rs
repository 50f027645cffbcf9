// file: src/extractor/digits.rs
// description: eastern arabic digit normalization for phone scanning
// reference: unicode extended arabic-indic digits U+06F0..U+06F9

/// First code point of the Extended Arabic-Indic digit block used by
/// Persian, Dari and Urdu text.
const EASTERN_ZERO: u32 = 0x06F0;
const EASTERN_NINE: u32 = 0x06F9;

/// Maps the ten Eastern Arabic digit glyphs to ASCII `0`-`9`, leaving every
/// other character untouched. One-to-one per character, so the output has the
/// same character count as the input, and applying it twice is a no-op since
/// ASCII digits are never substitution targets.
pub fn normalize_digits(text: &str) -> String {
    text.chars().map(normalize_digit).collect()
}

fn normalize_digit(c: char) -> char {
    let code = c as u32;
    if (EASTERN_ZERO..=EASTERN_NINE).contains(&code) {
        char::from(b'0' + (code - EASTERN_ZERO) as u8)
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_maps_all_ten_digits() {
        assert_eq!(normalize_digits("۰۱۲۳۴۵۶۷۸۹"), "0123456789");
    }

    #[test]
    fn test_leaves_other_text_untouched() {
        assert_eq!(
            normalize_digits("شماره من ۰۹۱۲ است, call 555"),
            "شماره من 0912 است, call 555"
        );
    }

    #[test]
    fn test_idempotent() {
        let input = "پلاک ۱۲ و 34";
        let once = normalize_digits(input);
        let twice = normalize_digits(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_character_count_preserved() {
        let input = "آدرس ۱۲۳ Main St";
        let output = normalize_digits(input);
        assert_eq!(input.chars().count(), output.chars().count());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_digits(""), "");
    }
}
