//! Search query model.

use serde::{Deserialize, Serialize};

/// Three optional filters over inventory blocks.
///
/// An empty or whitespace-only filter is treated the same as an absent one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub footprint: Option<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = Some(part_number.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_footprint(mut self, footprint: impl Into<String>) -> Self {
        self.footprint = Some(footprint.into());
        self
    }

    /// Part number filter, trimmed, if populated
    pub fn part_number(&self) -> Option<&str> {
        populated(self.part_number.as_deref())
    }

    /// Value filter, trimmed, if populated
    pub fn value(&self) -> Option<&str> {
        populated(self.value.as_deref())
    }

    /// Footprint filter, trimmed, if populated
    pub fn footprint(&self) -> Option<&str> {
        populated(self.footprint.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.part_number().is_none() && self.value().is_none() && self.footprint().is_none()
    }
}

fn populated(filter: Option<&str>) -> Option<&str> {
    filter.map(str::trim).filter(|f| !f.is_empty())
}
