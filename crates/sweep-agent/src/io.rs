//! Dataset ingestion and export.
//!
//! The core pipeline neither parses file bytes nor encodes output; it
//! works on DataFrames. This module is the boundary collaborator that
//! turns an uploaded file into a frame plus a source-format tag, and a
//! cleaned frame back into an encoded byte stream with the right content
//! type for download.

use crate::error::{CleaningError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// The declared format of an ingested dataset.
///
/// Carried through the session untouched so the cleaned dataset can be
/// exported in the same format it arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Csv,
    Parquet,
}

impl SourceFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "parquet" => Some(Self::Parquet),
            _ => None,
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    /// MIME content type for download responses.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Parquet => "application/vnd.apache.parquet",
        }
    }
}

/// Read a dataset from disk into a DataFrame plus its format tag.
///
/// # Errors
///
/// Returns [`CleaningError::IngestionFailed`] for missing files,
/// unsupported extensions, and unparseable content. Ingestion failure is
/// fatal and happens before any session is created.
pub fn read_table(path: &Path) -> Result<(DataFrame, SourceFormat)> {
    if !path.exists() {
        return Err(CleaningError::IngestionFailed(format!(
            "file not found: {}",
            path.display()
        )));
    }

    let format = SourceFormat::from_path(path).ok_or_else(|| {
        CleaningError::IngestionFailed(format!(
            "unsupported file extension: {}",
            path.display()
        ))
    })?;

    let df = match format {
        SourceFormat::Csv => read_csv_with_fallbacks(path)?,
        SourceFormat::Parquet => {
            let file = File::open(path)
                .map_err(|e| CleaningError::IngestionFailed(e.to_string()))?;
            ParquetReader::new(file)
                .finish()
                .map_err(|e| CleaningError::IngestionFailed(e.to_string()))?
        }
    };

    info!(
        "Loaded {} as {:?}: {} rows x {} columns",
        path.display(),
        format,
        df.height(),
        df.width()
    );

    Ok((df, format))
}

/// Load CSV with multiple fallback strategies.
fn read_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
    // Strategy 1: standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Standard CSV loading failed: {}", e),
    }

    // Strategy 2: without quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("CSV loading without quotes failed: {}", e),
    }

    // Strategy 3: pre-clean content
    let content = std::fs::read_to_string(path)
        .map_err(|e| CleaningError::IngestionFailed(e.to_string()))?;
    let cleaned = clean_csv_content(&content);

    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(cleaned))
        .finish()
        .map_err(|e| CleaningError::IngestionFailed(e.to_string()))
}

/// Strip doubled quotes and blank lines that trip the parser.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Encode a DataFrame into a downloadable byte stream.
///
/// # Errors
///
/// Returns [`CleaningError::ExportFailed`] if encoding fails.
pub fn encode_table(df: &DataFrame, format: SourceFormat) -> Result<Vec<u8>> {
    let mut df = df.clone();
    let mut buffer: Vec<u8> = Vec::new();

    match format {
        SourceFormat::Csv => {
            CsvWriter::new(&mut buffer)
                .include_header(true)
                .finish(&mut df)
                .map_err(|e| CleaningError::ExportFailed(e.to_string()))?;
        }
        SourceFormat::Parquet => {
            ParquetWriter::new(&mut buffer)
                .finish(&mut df)
                .map_err(|e| CleaningError::ExportFailed(e.to_string()))?;
        }
    }

    Ok(buffer)
}

/// Write a DataFrame to disk in the given format.
pub fn write_table(df: &DataFrame, path: &Path, format: SourceFormat) -> Result<()> {
    let bytes = encode_table(df, format)?;
    std::fs::write(path, bytes).map_err(|e| CleaningError::ExportFailed(e.to_string()))?;
    info!("Wrote cleaned dataset to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sweep-agent-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SourceFormat::from_path(Path::new("data.csv")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("DATA.CSV")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("data.parquet")),
            Some(SourceFormat::Parquet)
        );
        assert_eq!(SourceFormat::from_path(Path::new("data.xls")), None);
        assert_eq!(SourceFormat::from_path(Path::new("data")), None);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(SourceFormat::Csv.content_type(), "text/csv");
        assert_eq!(
            SourceFormat::Parquet.content_type(),
            "application/vnd.apache.parquet"
        );
    }

    #[test]
    fn test_encode_csv_contains_header_and_rows() {
        let df = df![
            "age" => [22i64, 35],
            "name" => ["alice", "bob"],
        ]
        .unwrap();

        let bytes = encode_table(&df, SourceFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("age,name"));
        assert!(text.contains("22,alice"));
        assert!(text.contains("35,bob"));
    }

    #[test]
    fn test_csv_roundtrip_through_disk() {
        let df = df![
            "a" => [1i64, 2, 3],
            "b" => ["x", "y", "z"],
        ]
        .unwrap();

        let path = temp_file("roundtrip.csv");
        write_table(&df, &path, SourceFormat::Csv).unwrap();

        let (loaded, format) = read_table(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(format, SourceFormat::Csv);
        assert_eq!(loaded.shape(), (3, 2));
        assert!(loaded.equals(&df));
    }

    #[test]
    fn test_read_missing_file_is_ingestion_failure() {
        let error = read_table(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert_eq!(error.error_code(), "INGESTION_FAILED");
        assert!(error.is_session_fatal());
    }

    #[test]
    fn test_read_unsupported_extension() {
        let path = temp_file("data.xls");
        std::fs::write(&path, b"whatever").unwrap();

        let error = read_table(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(error.error_code(), "INGESTION_FAILED");
    }

    #[test]
    fn test_clean_csv_content_strips_blank_lines() {
        let cleaned = clean_csv_content("a,b\n\n1,2\n  \n3,4");
        assert_eq!(cleaned, "a,b\n1,2\n3,4");
    }
}
