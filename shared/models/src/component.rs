//! Component record model for the Labstock inventory search.
//!
//! A `ComponentRecord` is the structured view of one block of an inventory
//! dump. Every field always carries a value: fields the extractor cannot find
//! fall back to the placeholder constants below.

use serde::{Deserialize, Serialize};

/// Placeholder used when no part number label is found in a block.
pub const PART_NUMBER_NOT_DETECTED: &str = "P/N not detected";

/// Placeholder used when neither a `DESC:` label nor a description line is found.
pub const DESCRIPTION_NOT_AVAILABLE: &str = "Description not available";

/// Placeholder used when a block has no `Location:` label and no owner is known.
pub const LOCATION_NOT_AVAILABLE: &str = "Location not available";

/// Structured projection of one inventory block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComponentRecord {
    pub part_number: String,
    pub description: String,
    pub location: String,
    /// Inventory owner the block came from, set by multi-source searches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Default for ComponentRecord {
    fn default() -> Self {
        Self {
            part_number: PART_NUMBER_NOT_DETECTED.to_string(),
            description: DESCRIPTION_NOT_AVAILABLE.to_string(),
            location: LOCATION_NOT_AVAILABLE.to_string(),
            source: None,
        }
    }
}

impl ComponentRecord {
    pub fn new(part_number: String, description: String, location: String) -> Self {
        Self {
            part_number,
            description,
            location,
            source: None,
        }
    }

    /// Tags the record with the inventory owner it was found in
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
