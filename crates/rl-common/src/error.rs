//! Error types for Rowlens.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for callers that offer a retry action
//!
//! All source-adapter failures are local: they surface to the caller as a
//! user-visible message and leave the session's dataset untouched. Nothing
//! here is retried automatically and nothing is fatal to the process.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Rowlens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed tabular content.
    Parse,
    /// Network/HTTP failures.
    Fetch,
    /// Sharing-URL shape errors.
    Url,
    /// Object-store auth/lookup failures.
    Storage,
    /// Session-state preconditions (no dataset, no report).
    Session,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Parse => write!(f, "parse"),
            ErrorCategory::Fetch => write!(f, "fetch"),
            ErrorCategory::Url => write!(f, "url"),
            ErrorCategory::Storage => write!(f, "storage"),
            ErrorCategory::Session => write!(f, "session"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for Rowlens.
#[derive(Error, Debug)]
pub enum Error {
    // Parse errors (10-19)
    #[error("failed to parse tabular data: {0}")]
    Parse(String),

    // Fetch errors (20-29)
    #[error("fetch failed{}: {reason}", fmt_status(.status))]
    Fetch { status: Option<u16>, reason: String },

    // URL errors (30-39)
    #[error("sharing URL has no '/d/<id>' segment: {url}")]
    MalformedUrl { url: String },

    // Storage errors (40-49)
    #[error("object store error: {0}")]
    Storage(String),

    // Session errors (50-59)
    #[error("no dataset loaded")]
    NoDataset,

    #[error("no report generated")]
    NoReport,

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Parse errors
    /// - 20-29: Fetch errors
    /// - 30-39: URL errors
    /// - 40-49: Storage errors
    /// - 50-59: Session errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Parse(_) => 10,
            Error::Fetch { .. } => 20,
            Error::MalformedUrl { .. } => 30,
            Error::Storage(_) => 40,
            Error::NoDataset => 50,
            Error::NoReport => 51,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Parse(_) => ErrorCategory::Parse,
            Error::Fetch { .. } => ErrorCategory::Fetch,
            Error::MalformedUrl { .. } => ErrorCategory::Url,
            Error::Storage(_) => ErrorCategory::Storage,
            Error::NoDataset | Error::NoReport => ErrorCategory::Session,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether the user may resolve this error by retrying the
    /// action, possibly with corrected input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Bad input data: recoverable with a different file
            Error::Parse(_) => true,

            // Network: often transient
            Error::Fetch { .. } => true,

            // URL shape: recoverable with a corrected link
            Error::MalformedUrl { .. } => true,

            // Storage: recoverable with corrected credentials/path
            Error::Storage(_) => true,

            // Session preconditions: recoverable by loading/generating first
            Error::NoDataset => true,
            Error::NoReport => true,

            // I/O: often transient
            Error::Io(_) => true,
            Error::Json(_) => false,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Parse(_) => "Malformed Tabular Data",
            Error::Fetch { .. } => "Fetch Failed",
            Error::MalformedUrl { .. } => "Malformed Sharing URL",
            Error::Storage(_) => "Object Store Error",
            Error::NoDataset => "No Dataset Loaded",
            Error::NoReport => "No Report Generated",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Error",
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
