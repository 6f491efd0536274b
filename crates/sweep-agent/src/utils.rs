//! Shared utilities for the cleaning agent.
//!
//! This module contains the dtype helpers used by the transform library and
//! the parse functions for the free-form tool inputs chosen by the model.
//! Parse functions never fail: malformed input falls back to documented
//! defaults so a bad model output can never crash the planning loop.

use polars::prelude::*;

/// Default Z-score threshold for outlier detection and removal.
pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;

/// Default number of rows returned by the sample tool.
pub const DEFAULT_SAMPLE_ROWS: usize = 5;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Names of all numeric columns in a DataFrame, in column order.
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| is_numeric_dtype(col.dtype()))
        .map(|col| col.name().to_string())
        .collect()
}

/// Check whether a named column exists and is numeric.
pub fn is_numeric_column(df: &DataFrame, name: &str) -> bool {
    df.column(name)
        .map(|col| is_numeric_dtype(col.dtype()))
        .unwrap_or(false)
}

// =============================================================================
// Tool Input Parsing
// =============================================================================

/// Placeholder tokens models emit when a tool takes no meaningful input.
const NULL_INPUT_TOKENS: [&str; 2] = ["_", "none"];

/// Check if a tool input is empty or a null placeholder token.
pub fn is_null_input(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.is_empty()
        || NULL_INPUT_TOKENS
            .iter()
            .any(|&tok| trimmed.eq_ignore_ascii_case(tok))
}

/// Parse a comma-separated column list.
///
/// Returns `None` for empty input or a null token, meaning "all columns"
/// (or "all numeric columns", depending on the operation).
pub fn parse_column_list(input: &str) -> Option<Vec<String>> {
    if is_null_input(input) {
        return None;
    }

    let columns: Vec<String> = input
        .split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect();

    if columns.is_empty() { None } else { Some(columns) }
}

/// Parse a Z-score threshold, falling back to [`DEFAULT_Z_THRESHOLD`].
pub fn parse_threshold(input: &str) -> f64 {
    if is_null_input(input) {
        return DEFAULT_Z_THRESHOLD;
    }
    input.trim().parse::<f64>().unwrap_or(DEFAULT_Z_THRESHOLD)
}

/// Parse a sample row count, falling back to [`DEFAULT_SAMPLE_ROWS`].
///
/// Only plain digit strings are accepted, so negative numbers and floats
/// fall back to the default as well.
pub fn parse_row_count(input: &str) -> usize {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return DEFAULT_SAMPLE_ROWS;
    }
    trimmed.parse::<usize>().unwrap_or(DEFAULT_SAMPLE_ROWS)
}

/// Parse a `"threshold,col1,col2,…"` outlier-removal input.
///
/// The first comma-separated part is the threshold; if it does not parse as
/// a number the default applies. Remaining parts are the column selection,
/// `None` meaning "all numeric columns". The first part is consumed by the
/// threshold slot even when it is not numeric.
pub fn parse_outlier_args(input: &str) -> (f64, Option<Vec<String>>) {
    if is_null_input(input) {
        return (DEFAULT_Z_THRESHOLD, None);
    }

    let parts: Vec<&str> = input
        .split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();

    let threshold = parts
        .first()
        .and_then(|part| part.parse::<f64>().ok())
        .unwrap_or(DEFAULT_Z_THRESHOLD);

    let columns = if parts.len() > 1 {
        Some(parts[1..].iter().map(|part| part.to_string()).collect())
    } else {
        None
    };

    (threshold, columns)
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a numeric Series with a specific value.
///
/// The result is always Float64, matching how a mean-derived fill value
/// widens integer columns.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let mask = series.is_null();
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        if mask.get(i).unwrap_or(false) {
            result_vec.push(Some(fill_value));
        } else {
            let val = series.get(i)?;
            result_vec.push(Some(val.try_extract::<f64>()?));
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(is_numeric_dtype(&DataType::UInt8));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_numeric_column_names() {
        let df = df![
            "age" => [1.0, 2.0],
            "name" => ["a", "b"],
            "score" => [10i64, 20],
        ]
        .unwrap();

        assert_eq!(numeric_column_names(&df), vec!["age", "score"]);
    }

    #[test]
    fn test_is_null_input() {
        assert!(is_null_input(""));
        assert!(is_null_input("   "));
        assert!(is_null_input("_"));
        assert!(is_null_input("none"));
        assert!(is_null_input("None"));
        assert!(!is_null_input("age"));
        assert!(!is_null_input("3"));
    }

    #[test]
    fn test_parse_column_list_empty_means_all() {
        assert_eq!(parse_column_list(""), None);
        assert_eq!(parse_column_list("_"), None);
        assert_eq!(parse_column_list("none"), None);
        assert_eq!(parse_column_list(" , , "), None);
    }

    #[test]
    fn test_parse_column_list_splits_and_trims() {
        assert_eq!(
            parse_column_list("age, income ,score"),
            Some(vec![
                "age".to_string(),
                "income".to_string(),
                "score".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_threshold_defaults() {
        assert_eq!(parse_threshold(""), DEFAULT_Z_THRESHOLD);
        assert_eq!(parse_threshold("_"), DEFAULT_Z_THRESHOLD);
        assert_eq!(parse_threshold("abc"), DEFAULT_Z_THRESHOLD);
        assert_eq!(parse_threshold("none"), DEFAULT_Z_THRESHOLD);
    }

    #[test]
    fn test_parse_threshold_valid() {
        assert_eq!(parse_threshold("2"), 2.0);
        assert_eq!(parse_threshold(" 2.5 "), 2.5);
    }

    #[test]
    fn test_parse_row_count() {
        assert_eq!(parse_row_count("10"), 10);
        assert_eq!(parse_row_count(" 3 "), 3);
        assert_eq!(parse_row_count(""), DEFAULT_SAMPLE_ROWS);
        assert_eq!(parse_row_count("abc"), DEFAULT_SAMPLE_ROWS);
        assert_eq!(parse_row_count("-1"), DEFAULT_SAMPLE_ROWS);
        assert_eq!(parse_row_count("2.5"), DEFAULT_SAMPLE_ROWS);
    }

    #[test]
    fn test_parse_outlier_args_empty() {
        assert_eq!(parse_outlier_args(""), (DEFAULT_Z_THRESHOLD, None));
        assert_eq!(parse_outlier_args("_"), (DEFAULT_Z_THRESHOLD, None));
    }

    #[test]
    fn test_parse_outlier_args_threshold_only() {
        assert_eq!(parse_outlier_args("2.5"), (2.5, None));
    }

    #[test]
    fn test_parse_outlier_args_threshold_and_columns() {
        let (threshold, columns) = parse_outlier_args("2, age, income");
        assert_eq!(threshold, 2.0);
        assert_eq!(
            columns,
            Some(vec!["age".to_string(), "income".to_string()])
        );
    }

    #[test]
    fn test_parse_outlier_args_bad_threshold_defaults() {
        // The first part is consumed by the threshold slot even when it
        // fails to parse; remaining parts are still the column list.
        let (threshold, columns) = parse_outlier_args("age, income");
        assert_eq!(threshold, DEFAULT_Z_THRESHOLD);
        assert_eq!(columns, Some(vec!["income".to_string()]));
    }

    #[test]
    fn test_fill_numeric_nulls() {
        let series = Series::new("test".into(), &[Some(1.0), None, Some(3.0)]);
        let filled = fill_numeric_nulls(&series, 2.0).unwrap();

        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.get(1).unwrap().try_extract::<f64>().unwrap(), 2.0);
    }
}
