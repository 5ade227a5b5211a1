//! Inventory Dump Splitter
//!
//! Breaks a raw inventory dump into per-component blocks. Each entry in a dump
//! starts with an `Image:` marker naming the photo the text was extracted from.

use std::fmt::Display;

/// Literal marker separating component entries
pub const BLOCK_DELIMITER: &str = "Image:";

/// Prefix of the text returned by the fetcher when a dump could not be retrieved
pub const FETCH_FAILURE_PREFIX: &str = "Failed to fetch";

/// Splits a dump on [`BLOCK_DELIMITER`], keeping the segment before the first
/// marker and any blank segments. Order follows the dump.
pub fn split_blocks(dump: &str) -> Vec<&str> {
    dump.split(BLOCK_DELIMITER).collect()
}

/// Blocks that contain something other than whitespace
pub fn non_blank_blocks(dump: &str) -> impl Iterator<Item = &str> {
    dump.split(BLOCK_DELIMITER)
        .filter(|block| !block.trim().is_empty())
}

/// True when `text` is a fetch-failure sentinel rather than inventory data
pub fn is_fetch_failure(text: &str) -> bool {
    text.starts_with(FETCH_FAILURE_PREFIX)
}

/// Builds the sentinel text for a failed fetch, e.g. `Failed to fetch file: 404`
pub fn fetch_failure_message(reason: impl Display) -> String {
    format!("{} file: {}", FETCH_FAILURE_PREFIX, reason)
}
