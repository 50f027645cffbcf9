// file: src/extractor/patterns.rs
// description: compiled regex patterns for entity extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // URLs: scheme, www with up to 3 digits, or bare domain ending in a
    // short TLD plus slash. The body keeps one level of balanced parentheses
    // and the final character class drops trailing sentence punctuation and
    // closing quotes/guillemets.
    pub static ref URL: Regex = Regex::new(
        r#"(?i)\b(?:https?://|www\d{0,3}[.]|[a-z0-9.\-]+[.][a-z]{2,4}/)(?:[^\s()<>]+|\((?:[^\s()<>]+|\([^\s()<>]+\))*\))+(?:\((?:[^\s()<>]+|\([^\s()<>]+\))*\)|[^\s`!()\[\]{};:'".,<>?«»“”‘’])"#
    ).expect("URL regex is valid");

    pub static ref EMAIL: Regex = Regex::new(
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}\b"
    ).expect("EMAIL regex is valid");

    // Broad phone shape: optional country code, optional parenthesized area
    // code, then a run of digits/space/dot/hyphen at least 7 long ending in a
    // digit. Candidates still go through the digit-count post-filter.
    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+?\d{1,4}[-.\s]?)?(?:\(\d{1,5}\)[-.\s]?)?[\d\s.\-]{6,}\d"
    ).expect("PHONE regex is valid");

    // English street address: house number, one to five name tokens, and a
    // recognized street-type suffix. Long suffix forms come first so the
    // alternation prefers them.
    pub static ref EN_STREET: Regex = Regex::new(
        r"(?i)\b\d{1,5}\s+(?:[a-z]+\s+){1,5}(?:street|avenue|road|boulevard|lane|drive|court|place|circle|st|ave|rd|blvd|ln|dr|ct|pl|cir)\b"
    ).expect("EN_STREET regex is valid");

    pub static ref PO_BOX: Regex = Regex::new(
        r"(?i)\bp\.?\s*o\.?\s*box\s+\d+"
    ).expect("PO_BOX regex is valid");

    // Farsi/Dari address: a keyword anchor followed by a greedy run of
    // Arabic-block characters (which includes the Arabic-Indic digits and the
    // Arabic comma), Latin letters, whitespace, comma, dot and hyphen.
    pub static ref FA_ADDRESS: Regex = Regex::new(
        r"(?:آدرس|خیابان|کوچه|بلوار|میدان|پلاک)[\x{0600}-\x{06FF}a-zA-Z\s,.\-]+"
    ).expect("FA_ADDRESS regex is valid");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_excludes_trailing_period() {
        let m = URL.find("visit https://example.org/help. today").unwrap();
        assert_eq!(m.as_str(), "https://example.org/help");
    }

    #[test]
    fn test_url_keeps_balanced_parens() {
        let m = URL
            .find("see https://en.wikipedia.org/wiki/Rust_(language) now")
            .unwrap();
        assert_eq!(m.as_str(), "https://en.wikipedia.org/wiki/Rust_(language)");
    }

    #[test]
    fn test_url_www_form() {
        assert!(URL.is_match("go to www.example.com/page"));
        assert!(URL.is_match("go to www2.example.com/page"));
    }

    #[test]
    fn test_email_pattern() {
        let m = EMAIL.find("write to help@example.org or else").unwrap();
        assert_eq!(m.as_str(), "help@example.org");
        assert!(!EMAIL.is_match("not-an-email@"));
    }

    #[test]
    fn test_phone_pattern_shapes() {
        assert!(PHONE.is_match("+1 (555) 123-4567"));
        assert!(PHONE.is_match("555-123-4567"));
        assert!(PHONE.is_match("09123456789"));
    }

    #[test]
    fn test_street_suffix_bounds_match() {
        let m = EN_STREET.find("123 Main Street, Springfield").unwrap();
        assert_eq!(m.as_str(), "123 Main Street");
    }

    #[test]
    fn test_po_box_spacing_variants() {
        assert!(PO_BOX.is_match("P.O. Box 42"));
        assert!(PO_BOX.is_match("PO Box 42"));
        assert!(PO_BOX.is_match("p. o. box 1024"));
    }

    #[test]
    fn test_farsi_keyword_anchor() {
        let m = FA_ADDRESS.find("آدرس: خیابان ولیعصر، پلاک ۱۲").unwrap();
        assert!(m.as_str().starts_with("خیابان"));
    }
}
