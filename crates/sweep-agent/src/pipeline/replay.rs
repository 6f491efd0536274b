//! Deterministic replay of the planner's trace.
//!
//! The planner never mutates the real frame; this executor reconciles
//! "what the planner decided" with "what actually happens to the data".
//! It walks the trace in decision order and re-applies only the mutating
//! calls that are consistent with the session's missing-value policy.
//! Inspection tools and policy-mismatched calls are ignored.
//!
//! Replay is deterministic and idempotent for a fixed (frame, trace,
//! policy): it never consults the reasoning provider, so planner
//! nondeterminism cannot leak into the cleaned dataset.

use crate::catalog::names;
use crate::transforms::{duplicates, missing, outliers};
use crate::types::{MissingValueStrategy, TraceEntry};
use crate::utils::{parse_column_list, parse_outlier_args};
use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::debug;

/// Replays a trace's mutating calls against a copy of the original frame.
pub struct ReplayExecutor;

impl ReplayExecutor {
    /// Apply the policy-consistent mutating calls of `trace` to a fresh
    /// copy of `original`, in decision order.
    ///
    /// Returns the cleaned frame and the report of effect descriptions
    /// accumulated by the transform library.
    pub fn apply(
        &self,
        original: &DataFrame,
        trace: &[TraceEntry],
        strategy: MissingValueStrategy,
    ) -> Result<(DataFrame, Vec<String>)> {
        let mut df = original.clone();
        let mut report: Vec<String> = Vec::new();

        for entry in trace {
            let call = &entry.call;
            match call.tool.as_str() {
                names::DROP_MISSING_VALUES if strategy == MissingValueStrategy::Drop => {
                    let columns = parse_column_list(&call.input);
                    debug!(columns = ?columns, "Replaying drop_missing_values");
                    df = missing::drop_rows(df, columns.as_deref(), &mut report)?;
                }
                names::FILL_MISSING_WITH_MEAN if strategy == MissingValueStrategy::FillMean => {
                    let columns = parse_column_list(&call.input);
                    debug!(columns = ?columns, "Replaying fill_missing_with_mean");
                    df = missing::fill_with_mean(df, columns.as_deref(), &mut report)?;
                }
                names::REMOVE_OUTLIERS => {
                    let (threshold, columns) = parse_outlier_args(&call.input);
                    debug!(threshold, columns = ?columns, "Replaying remove_outliers");
                    df = outliers::remove(df, threshold, columns.as_deref(), &mut report)?;
                }
                names::REMOVE_DUPLICATES => {
                    let subset = parse_column_list(&call.input);
                    debug!(subset = ?subset, "Replaying remove_duplicates");
                    df = duplicates::remove(df, subset.as_deref(), &mut report)?;
                }
                // Inspection tools, policy-filtered calls, and unknown
                // names have no effect on the frame
                _ => {}
            }
        }

        Ok((df, report))
    }
}
