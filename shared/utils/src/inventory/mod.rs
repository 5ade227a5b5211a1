//! Inventory Text Search Engine
//!
//! Parses flat inventory dumps (text extracted from photos of component
//! bags and labels) and matches the resulting records against user queries.
//!
//! The pipeline is split into four stages:
//! - `splitter`: dump → blocks on the `Image:` marker
//! - `classifier`: keyword test for description lines
//! - `extractor`: block → `ComponentRecord` with per-field fallbacks
//! - `matcher`: query → predicates, applied across blocks and sources
//!
//! Everything here is synchronous and holds no mutable state.

pub mod classifier;
pub mod splitter;
pub mod extractor;
pub mod matcher;

pub use classifier::{is_description_line, DescriptionClassifier, DESCRIPTION_KEYWORDS};
pub use splitter::{
    fetch_failure_message, is_fetch_failure, non_blank_blocks, split_blocks, BLOCK_DELIMITER,
    FETCH_FAILURE_PREFIX,
};
pub use extractor::{extract_record, FieldExtractor};
pub use matcher::{
    find_owner, match_records, search_sources, QueryMatcher, SearchMode, SearchOptions,
    SearchOutcome, SearchPatterns,
};
