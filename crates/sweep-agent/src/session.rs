//! Session state for one loaded dataset.
//!
//! A session owns the original frame, its source-format tag, and the most
//! recent cleaning result. Re-running cleaning replaces the previous
//! result wholesale (the report is rebuilt from scratch by replay), and
//! loading a new file means creating a new session.

use crate::error::{CleaningError, Result};
use crate::io::{self, SourceFormat};
use crate::pipeline::Cleaner;
use crate::types::CleaningResult;
use polars::prelude::DataFrame;
use std::path::Path;

/// Encoded download payload for a cleaned dataset.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    /// Encoded file content.
    pub bytes: Vec<u8>,
    /// MIME content type matching the source format.
    pub content_type: &'static str,
    /// Suggested download file name.
    pub file_name: String,
}

/// One loaded dataset and its cleaning state.
pub struct Session {
    original: DataFrame,
    format: SourceFormat,
    result: Option<CleaningResult>,
}

impl Session {
    /// Create a session over an already-ingested frame.
    pub fn new(original: DataFrame, format: SourceFormat) -> Self {
        Self {
            original,
            format,
            result: None,
        }
    }

    /// Create a session by ingesting a file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CleaningError::IngestionFailed`] if the file cannot be
    /// read; no session exists in that case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let (df, format) = io::read_table(path)?;
        Ok(Self::new(df, format))
    }

    /// The original, never-mutated frame.
    pub fn original(&self) -> &DataFrame {
        &self.original
    }

    /// The declared source format of the dataset.
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// The most recent cleaning result, if cleaning has been run.
    pub fn result(&self) -> Option<&CleaningResult> {
        self.result.as_ref()
    }

    /// The cleaned frame, if cleaning has been run.
    pub fn cleaned(&self) -> Option<&DataFrame> {
        self.result.as_ref().map(|r| &r.cleaned)
    }

    /// Run (or re-run) cleaning over the original frame.
    ///
    /// Any previous result and report are replaced by this run's output.
    pub fn run(&mut self, cleaner: &Cleaner) -> Result<&CleaningResult> {
        let result = cleaner.clean(self.original.clone())?;
        Ok(self.result.insert(result))
    }

    /// Encode the cleaned frame for download in the source format.
    ///
    /// # Errors
    ///
    /// Returns [`CleaningError::NoDataLoaded`] if cleaning has not been
    /// run yet.
    pub fn export(&self) -> Result<ExportPayload> {
        let cleaned = self
            .result
            .as_ref()
            .map(|r| &r.cleaned)
            .ok_or(CleaningError::NoDataLoaded)?;

        Ok(ExportPayload {
            bytes: io::encode_table(cleaned, self.format)?,
            content_type: self.format.content_type(),
            file_name: format!("cleaned_data.{}", self.format.extension()),
        })
    }
}
