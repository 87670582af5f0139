//! Error types and exit codes for toolgraph
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Data error (unreadable catalog, unknown tool id)
//!
//! The engine operations themselves (similarity, distance matrix, connections,
//! classification, `process`) are total and never return these errors. They only
//! surface at the configuration, catalog, and matrix-construction seams.

mod macros;

use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - bad catalog, unknown tool (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during toolgraph operations
#[derive(Error, Debug)]
pub enum ToolgraphError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Other(String),
}

impl ToolgraphError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        ToolgraphError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        ToolgraphError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a malformed catalog
    pub fn invalid_catalog(reason: impl Into<String>) -> Self {
        ToolgraphError::InvalidCatalog {
            reason: reason.into(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ToolgraphError::UnknownFormat(_)
            | ToolgraphError::UsageError(_)
            | ToolgraphError::InvalidValue { .. } => ExitCode::Usage,

            ToolgraphError::InvalidCatalog { .. }
            | ToolgraphError::NotFound { .. }
            | ToolgraphError::Csv(_) => ExitCode::Data,

            ToolgraphError::Io(_)
            | ToolgraphError::Json(_)
            | ToolgraphError::Toml(_)
            | ToolgraphError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            ToolgraphError::UnknownFormat(_) => "unknown_format",
            ToolgraphError::UsageError(_) => "usage_error",
            ToolgraphError::InvalidValue { .. } => "invalid_value",
            ToolgraphError::InvalidCatalog { .. } => "invalid_catalog",
            ToolgraphError::NotFound { .. } => "not_found",
            ToolgraphError::Io(_) => "io_error",
            ToolgraphError::Json(_) => "json_error",
            ToolgraphError::Toml(_) => "toml_error",
            ToolgraphError::Csv(_) => "csv_error",
            ToolgraphError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for toolgraph operations
pub type Result<T> = std::result::Result<T, ToolgraphError>;
