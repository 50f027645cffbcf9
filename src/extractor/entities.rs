// file: src/extractor/entities.rs
// description: entity extraction engine for bilingual response text
// reference: layered heuristic scanners over raw and digit-normalized text

use crate::extractor::digits::normalize_digits;
use crate::extractor::patterns::{EMAIL, EN_STREET, FA_ADDRESS, PHONE, PO_BOX, URL};
use crate::models::ExtractedEntities;
use std::collections::HashSet;

/// Candidates with fewer digits than this after stripping separators are
/// dropped; it removes accidental matches like bare 4-digit years.
const MIN_PHONE_DIGITS: usize = 7;

/// Scans free-form response text for URLs, emails, phone numbers and
/// physical addresses. Each scanner is an independent regex pass: links,
/// emails and addresses read the original text, phones read a copy with
/// Eastern Arabic digits normalized to ASCII. Addresses are the only
/// deduplicated category.
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> ExtractedEntities {
        if text.trim().is_empty() {
            return ExtractedEntities::default();
        }

        let links = self.scan_links(text);
        let emails = self.scan_emails(text);

        let normalized = normalize_digits(text);
        let phones = self.scan_phones(&normalized);

        // Address heuristics run on the original text so the Farsi pattern
        // still sees the Eastern Arabic digit glyphs.
        let addresses = self.scan_addresses(text);

        ExtractedEntities::new(links, emails, phones, addresses)
    }

    fn scan_links(&self, text: &str) -> Vec<String> {
        URL.find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn scan_emails(&self, text: &str) -> Vec<String> {
        EMAIL
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn scan_phones(&self, normalized: &str) -> Vec<String> {
        PHONE
            .find_iter(normalized)
            .map(|m| m.as_str().trim().to_string())
            .filter(|candidate| digit_count(candidate) >= MIN_PHONE_DIGITS)
            .collect()
    }

    fn scan_addresses(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut addresses = Vec::new();

        // English matches first, then P.O. boxes, then Farsi matches; the
        // first occurrence of a value wins.
        for pattern in [&*EN_STREET, &*PO_BOX, &*FA_ADDRESS] {
            for capture in pattern.find_iter(text) {
                let cleaned = clean_address(capture.as_str());
                if cleaned.is_empty() {
                    continue;
                }
                if seen.insert(cleaned.clone()) {
                    addresses.push(cleaned);
                }
            }
        }

        addresses
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Single entry point: analyze one response text.
pub fn analyze(text: &str) -> ExtractedEntities {
    EntityExtractor::new().extract(text)
}

fn clean_address(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    trimmed.trim_end().to_string()
}

fn digit_count(candidate: &str) -> usize {
    candidate.chars().filter(|c| c.is_ascii_digit()).count()
}
