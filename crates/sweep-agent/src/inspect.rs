//! Textual dataset inspection.
//!
//! These renderers back the catalog's read-only tools. They always run
//! against the live original frame so the planner's understanding stays
//! accurate from turn to turn, and they return plain text the model can
//! read as an observation.

use crate::transforms::outliers;
use anyhow::Result;
use polars::prelude::*;

/// Render per-column missing-value statistics as a text table.
///
/// Only columns that actually have missing values are listed.
pub fn missing_values_report(df: &DataFrame) -> String {
    let total_rows = df.height();

    let mut lines: Vec<String> = Vec::new();
    for col in df.get_columns() {
        let missing = col.null_count();
        if missing == 0 {
            continue;
        }
        let percentage = if total_rows == 0 {
            0.0
        } else {
            (missing as f64 / total_rows as f64) * 100.0
        };
        lines.push(format!(
            "{:<25} {:<15} {:<10.2}",
            col.name().as_str(),
            missing,
            percentage
        ));
    }

    if lines.is_empty() {
        return "No missing values detected.".to_string();
    }

    let mut out = format!(
        "{:<25} {:<15} {:<10}\n",
        "Column", "Missing Values", "Missing %"
    );
    out.push_str(&lines.join("\n"));
    out
}

/// Render per-column Z-score outlier statistics as a text table.
pub fn outlier_report(df: &DataFrame, threshold: f64) -> Result<String> {
    let stats = outliers::detect(df, threshold)?;

    if stats.is_empty() {
        return Ok(format!(
            "No outliers detected with Z-score threshold {}.",
            threshold
        ));
    }

    let mut out = format!(
        "{:<25} {:<15} {:<12} {:<12} {:<12} {:<12} {:<12}\n",
        "Column", "Outlier Count", "Outlier %", "Mean", "Std Dev", "Min", "Max"
    );
    let rows: Vec<String> = stats
        .iter()
        .map(|s| {
            format!(
                "{:<25} {:<15} {:<12.2} {:<12.2} {:<12.2} {:<12.2} {:<12.2}",
                s.column, s.count, s.percentage, s.mean, s.std_dev, s.min, s.max
            )
        })
        .collect();
    out.push_str(&rows.join("\n"));
    Ok(out)
}

/// Render the frame's shape, column names, and dtypes.
pub fn frame_info(df: &DataFrame) -> String {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let dtypes: Vec<String> = df
        .get_columns()
        .iter()
        .map(|col| format!("  {}: {}", col.name().as_str(), col.dtype()))
        .collect();

    format!(
        "DataFrame shape: ({}, {})\nColumns: {}\nDatatypes:\n{}",
        df.height(),
        df.width(),
        columns.join(", "),
        dtypes.join("\n")
    )
}

/// Render the first `rows` rows of the frame.
pub fn frame_sample(df: &DataFrame, rows: usize) -> String {
    format!("{}", df.head(Some(rows)))
}
