//! Re-order request model.
//!
//! Requests are stored one per line in an append-only ledger. The ledger has
//! no notion of identity: submitting the same part twice yields two lines.

use chrono::{Local, NaiveDateTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::OnceLock;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Timestamp layout used in ledger lines
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Well-known ledger name
pub const LEDGER_FILE_NAME: &str = "to_be_ordered.txt";

/// Label sequences separating the fields of a ledger line. No field may
/// contain one, or the line could not be read back unambiguously.
pub const LEDGER_SEPARATORS: [&str; 3] = [", Part Number: ", ", Description: ", ", Requester Name: "];

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct ReorderRequest {
    pub requested_at: NaiveDateTime,
    #[validate(
        length(min = 1, max = 200, message = "Part number must be between 1 and 200 characters"),
        custom = "validate_ledger_field"
    )]
    pub part_number: String,
    #[validate(
        length(min = 1, max = 500, message = "Description must be between 1 and 500 characters"),
        custom = "validate_ledger_field"
    )]
    pub description: String,
    #[validate(
        length(min = 1, max = 100, message = "Requester name must be between 1 and 100 characters"),
        custom = "validate_ledger_field"
    )]
    pub requester_name: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerLineError {
    #[error("line does not follow the ledger format")]
    Malformed,
    #[error("invalid timestamp '{0}'")]
    Timestamp(String),
}

impl ReorderRequest {
    /// Creates a request stamped with the current local time
    pub fn new(part_number: String, description: String, requester_name: String) -> Self {
        Self::at(Local::now().naive_local(), part_number, description, requester_name)
    }

    pub fn at(
        requested_at: NaiveDateTime,
        part_number: String,
        description: String,
        requester_name: String,
    ) -> Self {
        Self {
            // Ledger timestamps carry whole seconds only
            requested_at: requested_at.with_nanosecond(0).unwrap_or(requested_at),
            part_number,
            description,
            requester_name,
        }
    }

    /// Serializes the request as one ledger line, without the trailing newline.
    ///
    /// Line breaks inside fields are folded into spaces so the request always
    /// occupies exactly one line.
    pub fn to_ledger_line(&self) -> String {
        format!(
            "Date and Time: {}, Part Number: {}, Description: {}, Requester Name: {}",
            self.requested_at.format(TIMESTAMP_FORMAT),
            single_line(&self.part_number),
            single_line(&self.description),
            single_line(&self.requester_name),
        )
    }

    /// Parses a line previously produced by [`ReorderRequest::to_ledger_line`]
    pub fn from_ledger_line(line: &str) -> Result<Self, LedgerLineError> {
        let captures = ledger_line_regex()
            .captures(line.trim_end_matches(['\r', '\n']))
            .ok_or(LedgerLineError::Malformed)?;

        let timestamp = &captures[1];
        let requested_at = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .map_err(|_| LedgerLineError::Timestamp(timestamp.to_string()))?;

        Ok(Self {
            requested_at,
            part_number: captures[2].to_string(),
            description: captures[3].to_string(),
            requester_name: captures[4].to_string(),
        })
    }
}

fn ledger_line_regex() -> &'static Regex {
    static LINE: OnceLock<Regex> = OnceLock::new();
    LINE.get_or_init(|| {
        Regex::new(r"^Date and Time: (.+?), Part Number: (.*), Description: (.*), Requester Name: (.*)$")
            .expect("ledger line pattern compiles")
    })
}

fn validate_ledger_field(value: &str) -> Result<(), ValidationError> {
    let folded = single_line(value);
    match LEDGER_SEPARATORS.iter().find(|separator| folded.contains(*separator)) {
        Some(separator) => {
            let mut error = ValidationError::new("ledger_separator");
            error.message = Some(Cow::from(format!(
                "Fields must not contain '{}'",
                separator.trim_start_matches(", ").trim_end()
            )));
            Err(error)
        }
        None => Ok(()),
    }
}

fn single_line(field: &str) -> String {
    field
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
