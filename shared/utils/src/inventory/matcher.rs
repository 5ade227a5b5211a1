//! Query Matcher
//!
//! Compiles a [`SearchQuery`] into block predicates and runs them over the
//! blocks of one or more inventory dumps.

use labstock_models::{ComponentRecord, SearchQuery, SourceDump};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::extractor::FieldExtractor;
use super::splitter::{is_fetch_failure, non_blank_blocks};
use crate::error::LabstockResult;

/// Distributor suffix that may follow a part number, e.g. Digi-Key's `-ND`
const PART_NUMBER_SUFFIX: &str = "-ND";

/// `part_number` followed by an optional distributor suffix, anywhere in the block
pub fn part_number_pattern(part_number: &str) -> String {
    format!(
        "(?i){}(?:{})?",
        regex::escape(part_number),
        regex::escape(PART_NUMBER_SUFFIX)
    )
}

/// Whole-word value pattern that tolerates whitespace between digits and
/// letters, so `22pF` also finds `22 pF`.
///
/// Returns `None` when the value is only spaces.
pub fn value_pattern(value: &str) -> Option<String> {
    let cleaned: Vec<char> = value.chars().filter(|c| *c != ' ').collect();
    let last = *cleaned.last()?;

    let mut pattern = String::from(r"(?i)\b");
    for pair in cleaned.windows(2) {
        pattern.push_str(&regex::escape(&pair[0].to_string()));
        if is_digit_letter_transition(pair[0], pair[1]) {
            pattern.push_str(r"\s*");
        }
    }
    pattern.push_str(&regex::escape(&last.to_string()));
    pattern.push_str(r"\b");

    Some(pattern)
}

fn is_digit_letter_transition(current: char, next: char) -> bool {
    (current.is_numeric() && next.is_alphabetic()) || (current.is_alphabetic() && next.is_numeric())
}

/// Whole-word literal footprint, e.g. `0805` or `SOT-23`
pub fn footprint_pattern(footprint: &str) -> String {
    format!(r"(?i)\b{}\b", regex::escape(footprint))
}

/// Compiled predicates for one query; a block matches when every present
/// predicate matches.
#[derive(Debug, Clone, Default)]
pub struct SearchPatterns {
    part_number: Option<Regex>,
    value: Option<Regex>,
    footprint: Option<Regex>,
}

impl SearchPatterns {
    pub fn compile(query: &SearchQuery) -> LabstockResult<Self> {
        let part_number = query
            .part_number()
            .map(|part_number| Regex::new(&part_number_pattern(part_number)))
            .transpose()?;

        let value = query
            .value()
            .and_then(value_pattern)
            .map(|pattern| Regex::new(&pattern))
            .transpose()?;

        let footprint = query
            .footprint()
            .map(|footprint| Regex::new(&footprint_pattern(footprint)))
            .transpose()?;

        Ok(Self {
            part_number,
            value,
            footprint,
        })
    }

    pub fn matches(&self, block: &str) -> bool {
        [&self.part_number, &self.value, &self.footprint]
            .into_iter()
            .flatten()
            .all(|pattern| pattern.is_match(block))
    }
}

/// How a multi-source search was interpreted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "owner", rename_all = "snake_case")]
pub enum SearchMode {
    /// Filters applied to the contents of every source
    Content,
    /// Value named an inventory owner: everything from that source is listed
    Owner(String),
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub owner_shortcut: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            owner_shortcut: true,
        }
    }
}

/// Result of a search over several sources
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub mode: SearchMode,
    pub records: Vec<ComponentRecord>,
    /// Sources actually scanned, in search order
    pub searched_sources: Vec<String>,
    /// Sources whose dump was a fetch failure
    pub skipped_sources: Vec<String>,
}

/// Name of the source the value filter designates, if the owner shortcut applies.
pub fn find_owner<'a, I>(query: &SearchQuery, names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let value = query.value()?;
    names.into_iter().find(|name| name.eq_ignore_ascii_case(value))
}

/// Blocks → records matcher
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    extractor: FieldExtractor,
}

impl Default for QueryMatcher {
    fn default() -> Self {
        Self {
            extractor: FieldExtractor::shared().clone(),
        }
    }
}

impl QueryMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for every non-blank block matching all populated filters
    pub fn match_records<'b, I>(&self, blocks: I, query: &SearchQuery) -> LabstockResult<Vec<ComponentRecord>>
    where
        I: IntoIterator<Item = &'b str>,
    {
        let patterns = SearchPatterns::compile(query)?;
        Ok(self.collect_matches(blocks, &patterns, None))
    }

    /// Searches each dump in order. Dumps holding a fetch-failure sentinel
    /// are skipped and reported.
    pub fn search_sources(
        &self,
        dumps: &[SourceDump],
        query: &SearchQuery,
        options: &SearchOptions,
    ) -> LabstockResult<SearchOutcome> {
        let owner = if options.owner_shortcut {
            find_owner(query, dumps.iter().map(|dump| dump.name.as_str())).map(str::to_string)
        } else {
            None
        };

        // Owner mode lists the whole source, so no predicate is compiled
        let patterns = match owner {
            Some(_) => SearchPatterns::default(),
            None => SearchPatterns::compile(query)?,
        };

        let mut outcome = SearchOutcome {
            mode: owner
                .clone()
                .map_or(SearchMode::Content, SearchMode::Owner),
            records: Vec::new(),
            searched_sources: Vec::new(),
            skipped_sources: Vec::new(),
        };

        let selected = dumps.iter().filter(|dump| match &owner {
            Some(owner) => dump.name.eq_ignore_ascii_case(owner),
            None => true,
        });

        for dump in selected {
            if is_fetch_failure(&dump.text) {
                debug!(source = %dump.name, "Skipping source without inventory data");
                outcome.skipped_sources.push(dump.name.clone());
                continue;
            }

            let label = dump.owner_label();
            let records = self.collect_matches(non_blank_blocks(&dump.text), &patterns, Some(&label));
            debug!(source = %dump.name, matches = records.len(), "Searched source");

            outcome
                .records
                .extend(records.into_iter().map(|record| record.with_source(label.clone())));
            outcome.searched_sources.push(dump.name.clone());
        }

        Ok(outcome)
    }

    fn collect_matches<'b, I>(
        &self,
        blocks: I,
        patterns: &SearchPatterns,
        owner: Option<&str>,
    ) -> Vec<ComponentRecord>
    where
        I: IntoIterator<Item = &'b str>,
    {
        blocks
            .into_iter()
            .filter(|block| !block.trim().is_empty())
            .filter(|block| patterns.matches(block))
            .map(|block| self.extractor.extract_with_owner(block, owner))
            .collect()
    }
}

/// Matches blocks of a single dump with the shared extractor.
pub fn match_records<'b, I>(blocks: I, query: &SearchQuery) -> LabstockResult<Vec<ComponentRecord>>
where
    I: IntoIterator<Item = &'b str>,
{
    QueryMatcher::default().match_records(blocks, query)
}

/// Multi-source search with the shared extractor.
pub fn search_sources(
    dumps: &[SourceDump],
    query: &SearchQuery,
    options: &SearchOptions,
) -> LabstockResult<SearchOutcome> {
    QueryMatcher::default().search_sources(dumps, query, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::splitter::split_blocks;
    use proptest::prelude::*;

    fn matches_value(value: &str, text: &str) -> bool {
        Regex::new(&value_pattern(value).unwrap()).unwrap().is_match(text)
    }

    #[test]
    fn test_value_pattern_shape() {
        assert_eq!(value_pattern("22pF").unwrap(), r"(?i)\b22\s*pF\b");
        assert_eq!(value_pattern("4.7 uF").unwrap(), r"(?i)\b4\.7\s*uF\b");
        assert_eq!(value_pattern("LM317T").unwrap(), r"(?i)\bLM\s*317\s*T\b");
        assert_eq!(value_pattern("   "), None);
    }

    #[test]
    fn test_value_tolerates_whitespace() {
        assert!(matches_value("22pF", "CAP CER 22 pF 50V"));
        assert!(matches_value("22pF", "CAP CER 22pF 50V"));
        assert!(matches_value("22 pF", "CAP CER 22pF 50V"));
        assert!(matches_value("22pf", "CAP CER 22PF 50V"));
    }

    #[test]
    fn test_value_respects_word_boundaries() {
        assert!(!matches_value("22pF", "CAP CER 122pF 50V"));
        assert!(!matches_value("22pF", "CAP CER 22pFX"));
        assert!(matches_value("10k", "RES 10k 1%"));
        assert!(!matches_value("10k", "RES 110k 1%"));
    }

    #[test]
    fn test_part_number_suffix_tolerance() {
        let pattern = Regex::new(&part_number_pattern("C12345")).unwrap();
        assert!(pattern.is_match("P/N: C12345-ND"));
        assert!(pattern.is_match("P/N: C12345"));
        assert!(pattern.is_match("p/n: c12345"));
        assert!(!pattern.is_match("P/N: C1234"));
    }

    #[test]
    fn test_part_number_is_literal() {
        let pattern = Regex::new(&part_number_pattern("LM317(T)")).unwrap();
        assert!(pattern.is_match("LM317(T)"));
        assert!(!pattern.is_match("LM317T"));
    }

    #[test]
    fn test_footprint_is_whole_word() {
        let pattern = Regex::new(&footprint_pattern("0805")).unwrap();
        assert!(pattern.is_match("CAP 10uF 0805 X7R"));
        assert!(!pattern.is_match("CAP 10uF 08055"));
    }

    #[test]
    fn test_all_filters_must_match() {
        let dump = "Image: a\nP/N: X-1\nRES 10k 0603\nImage: b\nP/N: Y-2\nRES 10k 0805\nImage: c\nP/N: X-1\nCAP 1uF 0805\n";
        let query = SearchQuery::new().with_part_number("X-1").with_footprint("0805");
        let records = match_records(split_blocks(dump), &query).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "CAP 1uF 0805");
    }

    #[test]
    fn test_empty_query_matches_every_non_blank_block() {
        let dump = "Image: a\nLED RED\nImage:  \nImage: b\nLED BLUE\n";
        let records = match_records(split_blocks(dump), &SearchQuery::new()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_results_follow_block_order() {
        let dump = "Image: 1\nLED RED 0805\nImage: 2\nLED GREEN 0805\nImage: 3\nLED BLUE 0805\n";
        let records = match_records(split_blocks(dump), &SearchQuery::new().with_footprint("0805")).unwrap();
        let descriptions: Vec<&str> = records.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descriptions, vec!["LED RED 0805", "LED GREEN 0805", "LED BLUE 0805"]);
    }

    fn lab_dumps() -> Vec<SourceDump> {
        vec![
            SourceDump::new("workshop", "Image: w1\nP/N: C12345-ND\nCAP CER 22 pF 0805\nImage: w2\nRES 10k 0603\n"),
            SourceDump::new("federico", "Failed to fetch file: 403"),
            SourceDump::new("marcel", "Image: m1\nCAP 22pF 0402\nLocation: Box 7\nImage: m2\nLENS ASPHERE 10mm\n"),
        ]
    }

    #[test]
    fn test_multi_source_content_search() {
        let query = SearchQuery::new().with_value("22pF");
        let outcome = search_sources(&lab_dumps(), &query, &SearchOptions::default()).unwrap();

        assert_eq!(outcome.mode, SearchMode::Content);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].location, "Workshop");
        assert_eq!(outcome.records[0].source.as_deref(), Some("Workshop"));
        assert_eq!(outcome.records[1].location, "Box 7");
        assert_eq!(outcome.records[1].source.as_deref(), Some("Marcel"));
        assert_eq!(outcome.searched_sources, vec!["workshop", "marcel"]);
        assert_eq!(outcome.skipped_sources, vec!["federico"]);
    }

    #[test]
    fn test_owner_shortcut_lists_whole_source() {
        let query = SearchQuery::new().with_value("MARCEL").with_part_number("does-not-exist");
        let outcome = search_sources(&lab_dumps(), &query, &SearchOptions::default()).unwrap();

        assert_eq!(outcome.mode, SearchMode::Owner("marcel".to_string()));
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.records.iter().all(|r| r.source.as_deref() == Some("Marcel")));
        assert_eq!(outcome.searched_sources, vec!["marcel"]);
    }

    #[test]
    fn test_owner_shortcut_can_be_disabled() {
        let query = SearchQuery::new().with_value("marcel");
        let options = SearchOptions { owner_shortcut: false };
        let outcome = search_sources(&lab_dumps(), &query, &options).unwrap();

        assert_eq!(outcome.mode, SearchMode::Content);
        assert!(outcome.records.is_empty());
    }

    #[test]
    fn test_find_owner() {
        let names = ["workshop", "marcel"];
        assert_eq!(find_owner(&SearchQuery::new().with_value(" Workshop "), names), Some("workshop"));
        assert_eq!(find_owner(&SearchQuery::new().with_value("work"), names), None);
        assert_eq!(find_owner(&SearchQuery::new(), names), None);
    }

    proptest! {
        #[test]
        fn prop_value_matches_with_or_without_space(
            number in "[1-9][0-9]{0,3}",
            unit in "(pF|nF|uF|k|M|mH|V)",
            spaces in " {0,2}",
        ) {
            let query = format!("{}{}", number, unit);
            let text = format!("CAP {}{}{} 50V", number, spaces, unit);
            prop_assert!(matches_value(&query, &text));
        }

        #[test]
        fn prop_value_rejects_longer_numbers(
            prefix in "[1-9]",
            number in "[1-9][0-9]{0,3}",
            unit in "(pF|nF|uF)",
        ) {
            let query = format!("{}{}", number, unit);
            let text = format!("CAP {}{}{} 50V", prefix, number, unit);
            prop_assert!(!matches_value(&query, &text));
        }
    }
}
