//! Description Line Classifier
//!
//! Decides whether a line of an inventory block reads like a component
//! description, using a fixed vocabulary of electronics and optics terms.

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Terms that mark a description line, matched as whole words ignoring case.
///
/// This is the single canonical table; every caller goes through
/// [`DescriptionClassifier`].
pub const DESCRIPTION_KEYWORDS: [&str; 22] = [
    "DESC",
    "Part Description",
    "CIC",
    "ESC",
    "SC",
    "CAP",
    "RES",
    "IC",
    "LED",
    "DIODE",
    "MOSFET",
    "REF DES",
    "TEST POINT",
    "SCHOTTKY",
    "ARRAY",
    "REG LINEAR",
    "POS ADJ",
    // Optical elements
    "LENS",
    "CHROMA",
    "ASPHERE",
    "PRISM",
    "OPTICS",
];

/// Compiled keyword matcher
#[derive(Debug, Clone)]
pub struct DescriptionClassifier {
    pattern: Regex,
}

impl Default for DescriptionClassifier {
    fn default() -> Self {
        let alternatives: Vec<String> = DESCRIPTION_KEYWORDS
            .iter()
            .map(|keyword| regex::escape(keyword))
            .collect();

        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
            .case_insensitive(true)
            .build()
            .expect("description keyword table compiles");

        Self { pattern }
    }
}

impl DescriptionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide classifier, compiled on first use
    pub fn shared() -> &'static Self {
        static CLASSIFIER: OnceLock<DescriptionClassifier> = OnceLock::new();
        CLASSIFIER.get_or_init(Self::default)
    }

    pub fn is_description_line(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        &DESCRIPTION_KEYWORDS
    }
}

/// Returns true if `line` contains any description keyword as a whole word.
pub fn is_description_line(line: &str) -> bool {
    DescriptionClassifier::shared().is_description_line(line)
}
