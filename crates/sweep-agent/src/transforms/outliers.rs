//! Z-score outlier detection and removal.

use crate::utils::{is_numeric_column, numeric_column_names};
use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

/// Per-column outlier statistics produced by detection.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierStats {
    pub column: String,
    pub count: usize,
    pub percentage: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Detect outliers in all numeric columns using the Z-score method.
///
/// Z-scores use the sample standard deviation (ddof = 1). Columns with
/// fewer than two non-null values, a zero standard deviation, or no
/// outliers beyond the threshold are omitted from the result.
pub fn detect(df: &DataFrame, threshold: f64) -> Result<Vec<OutlierStats>> {
    let mut stats = Vec::new();

    for col_name in numeric_column_names(df) {
        let series = df.column(&col_name)?.as_materialized_series();
        let values = series.cast(&DataType::Float64)?;
        let values = values.f64()?;

        if non_null_count(values) < 2 {
            continue;
        }

        let (Some(mean), Some(std_dev)) = (values.mean(), values.std(1)) else {
            continue;
        };
        if std_dev == 0.0 {
            continue;
        }

        let count = values
            .into_iter()
            .flatten()
            .filter(|v| ((v - mean) / std_dev).abs() > threshold)
            .count();

        if count > 0 {
            stats.push(OutlierStats {
                column: col_name,
                count,
                percentage: (count as f64 / df.height() as f64) * 100.0,
                mean,
                std_dev,
                min: values.min().unwrap_or(f64::NAN),
                max: values.max().unwrap_or(f64::NAN),
            });
        }
    }

    Ok(stats)
}

/// Remove rows whose Z-score exceeds the threshold, column by column.
///
/// Each column's Z-scores are computed against the frame left by the
/// previous column's filtering, not the original row set, so later columns
/// operate on an already-shrunk frame. Rows whose value is null in the
/// column under test fail the threshold comparison and are removed with
/// the outliers.
pub fn remove(
    df: DataFrame,
    threshold: f64,
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
                    "No valid numeric columns specified for removing outliers.".to_string(),
                );
                return Ok(df);
            }
            valid
        }
    };

    let mut df = df;
    for col_name in &targets {
        let series = df.column(col_name)?.as_materialized_series();
        let values = series.cast(&DataType::Float64)?;
        let values = values.f64()?;

        if non_null_count(values) < 2 {
            continue;
        }

        let (Some(mean), Some(std_dev)) = (values.mean(), values.std(1)) else {
            continue;
        };
        if std_dev == 0.0 {
            continue;
        }

        let mut mask_values = Vec::with_capacity(values.len());
        for opt_val in values.into_iter() {
            match opt_val {
                Some(val) => mask_values.push(((val - mean) / std_dev).abs() <= threshold),
                None => mask_values.push(false),
            }
        }

        let mask = BooleanChunked::from_slice("mask".into(), &mask_values);
        let before = df.height();
        df = df.filter(&mask)?;

        let removed = before - df.height();
        if removed > 0 {
            steps.push(format!(
                "Removed {} outliers from column '{}' using Z-score > {}",
                removed, col_name, threshold
            ));
            debug!("Removed {} outlier rows via column '{}'", removed, col_name);
        }
    }

    Ok(df)
}

fn non_null_count(values: &Float64Chunked) -> usize {
    values.len() - values.null_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nine values near zero plus one extreme outlier.
    fn outlier_frame() -> DataFrame {
        df![
            "value" => [1.0, 2.0, 1.5, 2.5, 1.0, 2.0, 1.5, 2.5, 1.8, 1000.0],
        ]
        .unwrap()
    }

    // ==================== detect tests ====================

    #[test]
    fn test_detect_finds_single_outlier() {
        let df = outlier_frame();

        let stats = detect(&df, 2.0).unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].column, "value");
        assert_eq!(stats[0].count, 1);
        assert!((stats[0].percentage - 10.0).abs() < 0.01);
        assert_eq!(stats[0].max, 1000.0);
    }

    #[test]
    fn test_detect_large_cluster_threshold_three() {
        // 99 clustered values and one at 1000: exactly one outlier at Z > 3
        let mut values: Vec<f64> = (0..99).map(|i| (i % 5) as f64 * 0.1).collect();
        values.push(1000.0);
        let df = df!["value" => values].unwrap();

        let stats = detect(&df, 3.0).unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].count, 1);
    }

    #[test]
    fn test_detect_no_outliers() {
        let df = df![
            "value" => [1.0, 2.0, 3.0, 4.0, 5.0],
        ]
        .unwrap();

        let stats = detect(&df, 3.0).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn test_detect_skips_constant_columns() {
        let df = df![
            "constant" => [5.0, 5.0, 5.0],
        ]
        .unwrap();

        let stats = detect(&df, 3.0).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn test_detect_skips_non_numeric() {
        let df = df![
            "name" => ["a", "b", "c"],
        ]
        .unwrap();

        let stats = detect(&df, 3.0).unwrap();
        assert!(stats.is_empty());
    }

    // ==================== remove tests ====================

    #[test]
    fn test_remove_single_outlier() {
        let df = outlier_frame();
        let mut steps = Vec::new();

        let result = remove(df, 2.0, None, &mut steps).unwrap();

        assert_eq!(result.height(), 9);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].contains("Removed 1 outliers from column 'value'"));
        assert!(steps[0].contains("Z-score > 2"));
    }

    #[test]
    fn test_remove_no_outliers_no_report() {
        let df = df![
            "value" => [1.0, 2.0, 3.0, 4.0, 5.0],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let result = remove(df, 3.0, None, &mut steps).unwrap();

        assert_eq!(result.height(), 5);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_remove_invalid_selection() {
        let df = df![
            "value" => [1.0, 2.0, 3.0],
            "name" => ["a", "b", "c"],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let columns = vec!["name".to_string(), "ghost".to_string()];
        let result = remove(df, 3.0, Some(&columns), &mut steps).unwrap();

        assert_eq!(result.height(), 3);
        assert_eq!(
            steps,
            vec!["No valid numeric columns specified for removing outliers."]
        );
    }

    #[test]
    fn test_remove_sequential_shrink_across_columns() {
        // The second column's statistics are computed after the first
        // column's outlier row is already gone.
        let df = df![
            "a" => [1.0, 2.0, 1.5, 2.5, 1.0, 2.0, 1.5, 2.5, 1.8, 500.0],
            "b" => [10.0, 11.0, 10.5, 11.5, 10.0, 11.0, 10.5, 11.5, 10.8, 12.0],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let result = remove(df, 2.0, None, &mut steps).unwrap();

        // Column "a" removes its extreme row; column "b" is then re-evaluated
        // over the remaining nine rows.
        assert!(result.height() <= 9);
        assert!(steps.iter().any(|s| s.contains("column 'a'")));
    }

    #[test]
    fn test_remove_drops_null_rows_in_target_column() {
        let df = df![
            "value" => [Some(1.0), Some(2.0), None, Some(1.5), Some(2.5), Some(1.0)],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let result = remove(df, 3.0, None, &mut steps).unwrap();

        // The null value cannot pass the threshold comparison
        assert_eq!(result.column("value").unwrap().null_count(), 0);
        assert_eq!(result.height(), 5);
    }

    #[test]
    fn test_remove_constant_column_untouched() {
        let df = df![
            "constant" => [5.0, 5.0, 5.0, 5.0],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let result = remove(df, 3.0, None, &mut steps).unwrap();

        assert_eq!(result.height(), 4);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_remove_exactly_two_beyond_threshold() {
        // 8 identical values and two symmetric extremes: mean 0, sample std
        // ~4.71, so the extremes sit at |Z| ~2.12 and only they exceed 2
        let df = df![
            "value" => [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0, -10.0],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let result = remove(df, 2.0, None, &mut steps).unwrap();

        assert_eq!(result.height(), 8);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].contains("Removed 2 outliers"));
        assert!(steps[0].contains("Z-score > 2"));
    }
}
