//! Component Field Extractor
//!
//! Turns one inventory block into a [`ComponentRecord`]. Each field is filled
//! by an ordered list of rules; the first rule that finds something wins and
//! a field no rule can fill gets its placeholder.

use labstock_models::{
    ComponentRecord, DESCRIPTION_NOT_AVAILABLE, LOCATION_NOT_AVAILABLE, PART_NUMBER_NOT_DETECTED,
};
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

use super::classifier::DescriptionClassifier;

/// A description line containing this token continues on the next two lines
const CONTINUATION_TOKEN: &str = "CHROMA";

type FieldRule = fn(&FieldExtractor, &str) -> Option<String>;

const PART_NUMBER_RULES: &[FieldRule] = &[FieldExtractor::labelled_part_number];

const DESCRIPTION_RULES: &[FieldRule] = &[
    FieldExtractor::labelled_description,
    FieldExtractor::keyword_line_description,
];

const LOCATION_RULES: &[FieldRule] = &[FieldExtractor::labelled_location];

/// Block to record extractor
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    part_number_label: Regex,
    description_label: Regex,
    location_label: Regex,
    classifier: DescriptionClassifier,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self {
            part_number_label: case_insensitive(r"(?:Lot #|P/N|N):\s*([A-Za-z0-9\-/# ]+)"),
            description_label: case_insensitive(r"DESC:\s*(.*)"),
            location_label: case_insensitive(r"Location:\s*(.*)"),
            classifier: DescriptionClassifier::shared().clone(),
        }
    }
}

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("field label pattern compiles")
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide extractor, compiled on first use
    pub fn shared() -> &'static Self {
        static EXTRACTOR: OnceLock<FieldExtractor> = OnceLock::new();
        EXTRACTOR.get_or_init(Self::default)
    }

    /// Extracts a record; never fails.
    pub fn extract(&self, block: &str) -> ComponentRecord {
        self.extract_with_owner(block, None)
    }

    /// Extracts a record, using `owner` as the location when the block carries
    /// no `Location:` label of its own.
    pub fn extract_with_owner(&self, block: &str, owner: Option<&str>) -> ComponentRecord {
        let part_number = self
            .first_match(PART_NUMBER_RULES, block)
            .unwrap_or_else(|| PART_NUMBER_NOT_DETECTED.to_string());

        let description = self
            .first_match(DESCRIPTION_RULES, block)
            .unwrap_or_else(|| DESCRIPTION_NOT_AVAILABLE.to_string());

        let location = self
            .first_match(LOCATION_RULES, block)
            .or_else(|| owner.map(str::to_string))
            .unwrap_or_else(|| LOCATION_NOT_AVAILABLE.to_string());

        ComponentRecord::new(part_number, description, location)
    }

    fn first_match(&self, rules: &[FieldRule], block: &str) -> Option<String> {
        rules.iter().find_map(|rule| rule(self, block))
    }

    /// `Lot #:`, `P/N:` or `N:` followed by the part number
    fn labelled_part_number(&self, block: &str) -> Option<String> {
        capture_trimmed(&self.part_number_label, block).filter(|value| !value.is_empty())
    }

    /// Everything after `DESC:`, even when empty
    fn labelled_description(&self, block: &str) -> Option<String> {
        capture_trimmed(&self.description_label, block)
    }

    /// First line the classifier accepts
    fn keyword_line_description(&self, block: &str) -> Option<String> {
        let lines: Vec<&str> = block.lines().collect();
        let (index, line) = lines
            .iter()
            .enumerate()
            .find(|(_, line)| self.classifier.is_description_line(line))?;

        let mut description = line.trim().to_string();

        // Optics labels wrap: the lens data sits on the following two lines
        if description.to_uppercase().contains(CONTINUATION_TOKEN) && index + 2 < lines.len() {
            description.push_str(lines[index + 1].trim());
            description.push_str(lines[index + 2].trim());
        }

        Some(description)
    }

    fn labelled_location(&self, block: &str) -> Option<String> {
        capture_trimmed(&self.location_label, block).filter(|value| !value.is_empty())
    }
}

fn capture_trimmed(pattern: &Regex, block: &str) -> Option<String> {
    pattern
        .captures(block)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().trim().to_string())
}

/// Extracts a record from one block with the shared extractor.
pub fn extract_record(block: &str) -> ComponentRecord {
    FieldExtractor::shared().extract(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_block_yields_placeholders() {
        let record = extract_record("");
        assert_eq!(record.part_number, PART_NUMBER_NOT_DETECTED);
        assert_eq!(record.description, DESCRIPTION_NOT_AVAILABLE);
        assert_eq!(record.location, LOCATION_NOT_AVAILABLE);
    }

    #[test]
    fn test_digikey_label_block() {
        let block = " IMG_2231.jpg\nDIGI-KEY\nP/N: 399-C0805C220J5GACTU-ND\nMFG P/N C0805C220J5GACTU\nDESC: CAP CER 22PF 50V C0G/NP0 0805\nLocation: Drawer B3\n";
        let record = extract_record(block);
        assert_eq!(record.part_number, "399-C0805C220J5GACTU-ND");
        assert_eq!(record.description, "CAP CER 22PF 50V C0G/NP0 0805");
        assert_eq!(record.location, "Drawer B3");
    }

    #[test]
    fn test_lot_number_label() {
        let record = extract_record("Lot #: 22A-118/3 \nQty 50");
        assert_eq!(record.part_number, "22A-118/3");
    }

    #[test]
    fn test_description_label_takes_precedence() {
        let block = "RES 10K 1% 0603\ndesc:   LED GREEN CLEAR 0805 SMD   \n";
        assert_eq!(extract_record(block).description, "LED GREEN CLEAR 0805 SMD");
    }

    #[test]
    fn test_keyword_line_fallback() {
        let block = " IMG_0042.jpg\nQty 10\n  MOSFET N-CH 60V 0.3A SOT23  \nRES 1k\n";
        assert_eq!(extract_record(block).description, "MOSFET N-CH 60V 0.3A SOT23");
    }

    #[test]
    fn test_chroma_continuation() {
        let block = "foo CHROMA bar\nline2\nline3\nline4";
        assert_eq!(extract_record(block).description, "foo CHROMA barline2line3");
    }

    #[test]
    fn test_chroma_without_two_following_lines() {
        assert_eq!(extract_record("Chroma lens\nonly one").description, "Chroma lens");
    }

    #[test]
    fn test_owner_is_used_only_without_location_label() {
        let extractor = FieldExtractor::new();
        let labelled = extractor.extract_with_owner("CAP 1uF\nLocation: Shelf 2", Some("Workshop"));
        assert_eq!(labelled.location, "Shelf 2");

        let unlabelled = extractor.extract_with_owner("CAP 1uF", Some("Workshop"));
        assert_eq!(unlabelled.location, "Workshop");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let block = "P/N: ABC-1\nLENS ASPHERE 12mm";
        assert_eq!(extract_record(block), extract_record(block));
    }

    proptest! {
        #[test]
        fn prop_description_label_wins(
            description in "[A-Za-z0-9][A-Za-z0-9 ]{0,30}",
            keyword_line in "(CAP|RES|LED) [0-9]{1,3}",
            label in "(DESC|desc|Desc)",
        ) {
            let block = format!("{}\n{}: {}\n", keyword_line, label, description);
            prop_assert_eq!(extract_record(&block).description, description.trim());
        }

        #[test]
        fn prop_first_keyword_line_is_description(
            padding in " {0,3}",
            first in "(DIODE|PRISM|IC) [A-Z0-9]{1,8}",
            second in "(CAP|LED) [A-Z0-9]{1,8}",
        ) {
            let block = format!("Qty 4\n{}{}{}\n{}\n", padding, first, padding, second);
            prop_assert_eq!(extract_record(&block).description, first);
        }

        #[test]
        fn prop_blocks_without_labels_keep_placeholders(text in "[a-z ]{0,40}") {
            let record = extract_record(&text);
            prop_assert_eq!(record.part_number, PART_NUMBER_NOT_DETECTED);
            prop_assert_eq!(record.location, LOCATION_NOT_AVAILABLE);
        }
    }
}
