//! Custom error types for the cleaning agent.
//!
//! This module provides the error hierarchy using `thiserror`. Only two
//! failure classes abort a session: a failed reasoning provider and a failed
//! ingestion. Everything else (malformed tool input, invalid column
//! selections, exhausted budgets) is recovered locally and surfaced as
//! report lines or observation strings, never as an error.
//!
//! Errors are serializable so they can be forwarded to a frontend as JSON.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the cleaning agent.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The uploaded file could not be read or parsed into a table.
    #[error("Failed to ingest dataset: {0}")]
    IngestionFailed(String),

    /// The cleaned table could not be encoded for download.
    #[error("Failed to export dataset: {0}")]
    ExportFailed(String),

    /// The reasoning provider was unreachable or returned an error.
    /// Fatal to the session: no partial trace is produced.
    #[error("Reasoning provider failed: {0}")]
    ReasoningFailed(String),

    /// Replaying the trace against the original table failed.
    #[error("Failed to replay cleaning trace: {0}")]
    ReplayFailed(String),

    /// No dataset loaded in the session.
    #[error("No data loaded")]
    NoDataLoaded,

    /// Internal error (e.g., thread join failure).
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error (only with "ai" feature).
    #[cfg(feature = "ai")]
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::IngestionFailed(_) => "INGESTION_FAILED",
            Self::ExportFailed(_) => "EXPORT_FAILED",
            Self::ReasoningFailed(_) => "REASONING_FAILED",
            Self::ReplayFailed(_) => "REPLAY_FAILED",
            Self::NoDataLoaded => "NO_DATA_LOADED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            #[cfg(feature = "ai")]
            Self::HttpRequest(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error aborts the session outright.
    ///
    /// Per the error taxonomy, only reasoning-source and ingestion failures
    /// are session-fatal; everything else can be retried with adjusted
    /// inputs.
    pub fn is_session_fatal(&self) -> bool {
        match self {
            Self::ReasoningFailed(_) | Self::IngestionFailed(_) => true,
            Self::WithContext { source, .. } => source.is_session_fatal(),
            _ => false,
        }
    }
}

/// Serialize implementation for IPC/JSON compatibility.
///
/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}
