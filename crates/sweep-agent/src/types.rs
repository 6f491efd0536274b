//! Core data types for the planning and replay flow.

use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// User-chosen policy for missing-value handling.
///
/// The policy is fixed once per session and constrains which mutating tool
/// calls are honored at replay time: with [`MissingValueStrategy::Drop`] any
/// `fill_missing_with_mean` call in the trace is ignored, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingValueStrategy {
    /// Fill missing numeric values with the column mean
    #[default]
    FillMean,
    /// Drop rows containing missing values
    Drop,
}

impl MissingValueStrategy {
    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FillMean => "fill with mean",
            Self::Drop => "drop rows",
        }
    }
}

/// One planner decision: a tool name and its single-string input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the invoked catalog tool.
    pub tool: String,
    /// Free-form input string the model chose for the tool.
    pub input: String,
}

impl ToolCall {
    /// Create a new tool call.
    pub fn new(tool: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            input: input.into(),
        }
    }
}

/// One trace entry: a tool call paired with the observation it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// The planner's decision.
    pub call: ToolCall,
    /// The textual observation returned to the planner.
    pub observation: String,
}

/// Ordered record of the planner's tool-call decisions.
///
/// Insertion order is decision order and is semantically significant: later
/// mutating calls apply to the result of earlier ones during replay.
pub type Trace = Vec<TraceEntry>;

/// Outcome of one bounded planning loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerOutcome {
    /// Ordered tool-call trace the planner produced.
    pub trace: Trace,
    /// Final natural-language summary, `None` if the budget expired before
    /// the planner declared completion.
    pub summary: Option<String>,
    /// Number of reasoning steps consumed.
    pub steps_used: usize,
    /// Whether the loop was cut off by the step or wall-clock ceiling.
    pub budget_exhausted: bool,
}

/// Serializable summary of a completed cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Number of rows before cleaning.
    pub rows_before: usize,
    /// Number of rows after cleaning.
    pub rows_after: usize,
    /// Number of columns before cleaning.
    pub columns_before: usize,
    /// Number of columns after cleaning.
    pub columns_after: usize,

    /// Missing-value policy the run was constrained by.
    pub strategy: MissingValueStrategy,

    /// Ordered, append-only report of effect descriptions from replay.
    pub report: Vec<String>,

    /// The planner's tool-call trace.
    pub trace: Trace,

    /// The planner's final natural-language summary, if it produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_summary: Option<String>,

    /// Reasoning steps the planner consumed.
    pub steps_used: usize,
    /// Whether the planner hit its step or wall-clock ceiling.
    pub budget_exhausted: bool,

    /// Name of the reasoning provider used.
    pub provider: String,
    /// Model identifier, if the provider exposes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Total run duration in milliseconds.
    pub duration_ms: u64,
    /// Completion timestamp.
    pub completed_at: DateTime<Utc>,
}

impl CleaningSummary {
    /// Number of rows removed by the run.
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    /// Percentage of rows removed by the run.
    pub fn rows_removed_percentage(&self) -> f64 {
        if self.rows_before == 0 {
            0.0
        } else {
            (self.rows_removed() as f64 / self.rows_before as f64) * 100.0
        }
    }
}

/// Result of a cleaning run: the cleaned table plus its summary.
///
/// The DataFrame itself is not serializable; serialize the summary and
/// encode the frame via the export path instead.
#[derive(Debug, Clone)]
pub struct CleaningResult {
    /// The cleaned table produced by replay.
    pub cleaned: DataFrame,
    /// Serializable run summary.
    pub summary: CleaningSummary,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> CleaningSummary {
        CleaningSummary {
            rows_before: 100,
            rows_after: 90,
            columns_before: 5,
            columns_after: 5,
            strategy: MissingValueStrategy::FillMean,
            report: vec!["Removed 10 duplicate rows".to_string()],
            trace: vec![TraceEntry {
                call: ToolCall::new("remove_duplicates", ""),
                observation: "Operation completed.".to_string(),
            }],
            agent_summary: Some("Cleaned the dataset.".to_string()),
            steps_used: 4,
            budget_exhausted: false,
            provider: "Scripted".to_string(),
            model: None,
            duration_ms: 12,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_strategy_default_is_fill_mean() {
        assert_eq!(MissingValueStrategy::default(), MissingValueStrategy::FillMean);
    }

    #[test]
    fn test_strategy_serialization() {
        assert_eq!(
            serde_json::to_string(&MissingValueStrategy::FillMean).unwrap(),
            "\"fill_mean\""
        );
        assert_eq!(
            serde_json::to_string(&MissingValueStrategy::Drop).unwrap(),
            "\"drop\""
        );
    }

    #[test]
    fn test_rows_removed_percentage() {
        let summary = sample_summary();
        assert_eq!(summary.rows_removed(), 10);
        assert!((summary.rows_removed_percentage() - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_rows_removed_percentage_empty_input() {
        let mut summary = sample_summary();
        summary.rows_before = 0;
        summary.rows_after = 0;
        assert_eq!(summary.rows_removed_percentage(), 0.0);
    }

    #[test]
    fn test_summary_json_roundtrip() {
        let summary = sample_summary();

        let json = serde_json::to_string(&summary).expect("Should serialize");
        let deserialized: CleaningSummary =
            serde_json::from_str(&json).expect("Should deserialize");

        assert_eq!(summary.rows_before, deserialized.rows_before);
        assert_eq!(summary.strategy, deserialized.strategy);
        assert_eq!(summary.report, deserialized.report);
        assert_eq!(summary.trace.len(), deserialized.trace.len());
        assert_eq!(summary.trace[0].call.tool, deserialized.trace[0].call.tool);
    }

    #[test]
    fn test_agent_summary_omitted_when_none() {
        let mut summary = sample_summary();
        summary.agent_summary = None;
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("agent_summary"));
    }
}
