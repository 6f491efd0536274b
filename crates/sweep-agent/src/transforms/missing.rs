//! Missing-value handling.
//!
//! Provides the two replay-time strategies: dropping rows with missing
//! values and filling missing numeric values with the column mean.

use crate::utils::{fill_numeric_nulls, is_numeric_column, numeric_column_names};
use anyhow::Result;
use polars::prelude::*;

/// Drop rows containing missing values.
///
/// With a column selection, only nulls in the named columns count; names
/// not present in the frame are ignored, and if none remain the operation
/// is skipped with a report line. Without a selection, a row is dropped
/// when any of its values is null.
pub fn drop_rows(
    df: DataFrame,
    columns: Option<&[String]>,
    steps: &mut Vec<String>,
) -> Result<DataFrame> {
    let original_rows = df.height();

    match columns {
        Some(cols) => {
            let valid: Vec<String> = cols
                .iter()
                .filter(|col| df.column(col).is_ok())
                .cloned()
                .collect();

            if valid.is_empty() {
                steps.push("No valid columns specified for dropping missing values.".to_string());
                return Ok(df);
            }

            let filtered = drop_null_rows(&df, &valid)?;
            let dropped = original_rows - filtered.height();
            steps.push(format!(
                "Dropped {} rows with missing values in columns: {}",
                dropped,
                valid.join(", ")
            ));
            Ok(filtered)
        }
        None => {
            let all: Vec<String> = df
                .get_column_names()
                .iter()
                .map(|name| name.to_string())
                .collect();
            let filtered = drop_null_rows(&df, &all)?;
            let dropped = original_rows - filtered.height();
            steps.push(format!("Dropped {} rows with any missing values", dropped));
            Ok(filtered)
        }
    }
}

/// Keep only rows with no null in any of the given columns.
fn drop_null_rows(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];

    for col_name in columns {
        let series = df.column(col_name)?.as_materialized_series();
        for (i, is_null) in series.is_null().into_iter().enumerate() {
            if is_null.unwrap_or(false) {
                keep[i] = false;
            }
        }
    }

    let mask = BooleanChunked::from_slice("mask".into(), &keep);
    Ok(df.filter(&mask)?)
}

/// Fill missing numeric values with the column mean.
///
/// Without a selection, all numeric columns are targeted. The fill value is
/// the mean rounded to two decimals; one report line is appended per column
/// that actually had missing values.
pub fn fill_with_mean(
    mut df: DataFrame,
    columns: Option<&[String]>,
    steps: &mut Vec<String>,
) -> Result<DataFrame> {
    let targets: Vec<String> = match columns {
        None => numeric_column_names(&df),
        Some(cols) => {
            let valid: Vec<String> = cols
                .iter()
                .filter(|col| is_numeric_column(&df, col))
                .cloned()
                .collect();

            if valid.is_empty() {
                steps.push(
                    "No valid numeric columns specified for filling missing values.".to_string(),
                );
                return Ok(df);
            }
            valid
        }
    };

    for col_name in &targets {
        let (missing, mean) = {
            let series = df.column(col_name)?.as_materialized_series();
            (series.null_count(), series.mean())
        };

        if missing > 0
            && let Some(mean) = mean
        {
            let rounded = (mean * 100.0).round() / 100.0;
            let series = df.column(col_name)?.as_materialized_series().clone();
            let filled = fill_numeric_nulls(&series, rounded)?;
            df.replace(col_name, filled)?;

            steps.push(format!(
                "Filled {} missing values in '{}' with mean: {:.2}",
                missing, col_name, rounded
            ));
        }
    }

    Ok(df)
}
