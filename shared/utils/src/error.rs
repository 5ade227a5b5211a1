use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LabstockError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Inventory fetch error: {source_name} - {message}")]
    Fetch { source_name: String, message: String },

    #[error("Search pattern error: {message}")]
    Pattern { message: String },

    #[error("Ledger storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl LabstockError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn fetch(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Fetch { .. } => "INVENTORY_FETCH_ERROR",
            Self::Pattern { .. } => "SEARCH_PATTERN_ERROR",
            Self::Storage { .. } => "LEDGER_STORAGE_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Fetch { .. } => 502,
            Self::Pattern { .. } => 400,
            Self::Storage { .. } => 500,
            Self::Configuration { .. } => 500,
            Self::NotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }
}

pub type LabstockResult<T> = Result<T, LabstockError>;

// Conversion from common error types
impl From<reqwest::Error> for LabstockError {
    fn from(error: reqwest::Error) -> Self {
        let source_name = error
            .url()
            .map(|url| url.to_string())
            .unwrap_or_else(|| "HTTP Client".to_string());
        Self::fetch(source_name, error.to_string())
    }
}

impl From<std::io::Error> for LabstockError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string())
    }
}

impl From<regex::Error> for LabstockError {
    fn from(error: regex::Error) -> Self {
        Self::pattern(error.to_string())
    }
}

