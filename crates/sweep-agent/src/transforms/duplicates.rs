//! Duplicate-row removal.

use anyhow::Result;
use polars::prelude::*;

/// Remove duplicate rows, keeping the first occurrence.
///
/// With a column subset, only the named columns are compared; names not
/// present in the frame are ignored, and if none remain the operation is
/// skipped with a report line. Row order is preserved. A report line is
/// appended only when rows were actually removed.
pub fn remove(
    df: DataFrame,
    subset: Option<&[String]>,
    steps: &mut Vec<String>,
) -> Result<DataFrame> {
    let original_rows = df.height();

    let valid_subset: Option<Vec<String>> = match subset {
        Some(cols) => {
            let valid: Vec<String> = cols
                .iter()
                .filter(|col| df.column(col).is_ok())
                .cloned()
                .collect();

            if valid.is_empty() {
                steps.push("No valid columns specified for removing duplicates.".to_string());
                return Ok(df);
            }
            Some(valid)
        }
        None => None,
    };

    let deduped = match &valid_subset {
        Some(cols) => df.unique_stable(Some(cols.as_slice()), UniqueKeepStrategy::First, None)?,
        None => df.unique_stable(None, UniqueKeepStrategy::First, None)?,
    };

    let removed = original_rows - deduped.height();
    if removed > 0 {
        match &valid_subset {
            Some(cols) => steps.push(format!(
                "Removed {} duplicate rows based on columns: {}",
                removed,
                cols.join(", ")
            )),
            None => steps.push(format!("Removed {} duplicate rows", removed)),
        }
    }

    Ok(deduped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_full_row_duplicates() {
        let df = df![
            "a" => [1i64, 1, 3],
            "b" => [2i64, 2, 4],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let result = remove(df, None, &mut steps).unwrap();

        assert_eq!(result.height(), 2);
        assert_eq!(steps, vec!["Removed 1 duplicate rows"]);
    }

    #[test]
    fn test_remove_keeps_first_and_order() {
        let df = df![
            "a" => [1i64, 2, 1, 3],
            "b" => ["x", "y", "x", "z"],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let result = remove(df, None, &mut steps).unwrap();

        assert_eq!(result.height(), 3);
        let a = result.column("a").unwrap();
        assert_eq!(a.get(0).unwrap().try_extract::<i64>().unwrap(), 1);
        assert_eq!(a.get(1).unwrap().try_extract::<i64>().unwrap(), 2);
        assert_eq!(a.get(2).unwrap().try_extract::<i64>().unwrap(), 3);
    }

    #[test]
    fn test_remove_with_subset() {
        let df = df![
            "id" => [1i64, 1, 2],
            "note" => ["first", "second", "third"],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let subset = vec!["id".to_string()];
        let result = remove(df, Some(&subset), &mut steps).unwrap();

        assert_eq!(result.height(), 2);
        assert!(steps[0].contains("based on columns: id"));
        // Keep-first: the surviving row for id=1 is "first"
        let note = result.column("note").unwrap();
        assert!(note.get(0).unwrap().to_string().contains("first"));
    }

    #[test]
    fn test_remove_no_duplicates_no_report() {
        let df = df![
            "a" => [1i64, 2, 3],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let result = remove(df, None, &mut steps).unwrap();

        assert_eq!(result.height(), 3);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_remove_invalid_subset_skipped() {
        let df = df![
            "a" => [1i64, 1],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let subset = vec!["ghost".to_string()];
        let result = remove(df, Some(&subset), &mut steps).unwrap();

        assert_eq!(result.height(), 2);
        assert_eq!(
            steps,
            vec!["No valid columns specified for removing duplicates."]
        );
    }
}
