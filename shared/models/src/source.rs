//! Inventory source models.
//!
//! Each lab member (or room) keeps a separate inventory dump. Sources are
//! kept in a caller-defined order and searched in that order.

use serde::{Deserialize, Serialize};

/// Named location of an inventory dump
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventorySource {
    pub name: String,
    pub url: String,
}

impl InventorySource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Display label used as the location of records found in this source,
    /// e.g. `workshop` becomes `Workshop`.
    pub fn owner_label(&self) -> String {
        owner_label(&self.name)
    }

    /// Case-insensitive comparison against a user supplied name
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// Inventory text already retrieved for a source.
///
/// `text` may be a fetch-failure sentinel; the search engine skips those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDump {
    pub name: String,
    pub text: String,
}

impl SourceDump {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn owner_label(&self) -> String {
        owner_label(&self.name)
    }
}

/// Uppercases the first character and lowercases the rest.
pub fn owner_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
