//! The fixed tool catalog exposed to the planner.
//!
//! Every tool takes a single free-form input string; argument grammars live
//! in [`crate::utils`] and never fail. Inspection tools run against the
//! live original frame. Mutating tools return a static acknowledgment and
//! do not touch any frame: the real mutation is deferred to replay, which
//! is what keeps replay deterministic even though the planner is not.
//!
//! Tool invocation never raises an error visible to the planner; any
//! internal failure is rendered into the observation string so the loop
//! can continue.

use crate::inspect;
use crate::utils::{parse_row_count, parse_threshold};
use polars::prelude::DataFrame;

/// Tool name constants, as the planner must spell them.
pub mod names {
    pub const DETECT_MISSING_VALUES: &str = "detect_missing_values";
    pub const DROP_MISSING_VALUES: &str = "drop_missing_values";
    pub const FILL_MISSING_WITH_MEAN: &str = "fill_missing_with_mean";
    pub const DETECT_OUTLIERS: &str = "detect_outliers";
    pub const REMOVE_OUTLIERS: &str = "remove_outliers";
    pub const REMOVE_DUPLICATES: &str = "remove_duplicates";
    pub const GET_DATAFRAME_INFO: &str = "get_dataframe_info";
    pub const GET_DATAFRAME_SAMPLE: &str = "get_dataframe_sample";
}

/// Acknowledgment returned by mutating tools during planning.
pub const MUTATION_ACK: &str =
    "Operation completed. Use the 'get_dataframe_info' tool to see the current state.";

/// A named catalog entry with the description shown to the model.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// The full catalog, in the order it is presented to the model.
pub const TOOL_SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: names::DETECT_MISSING_VALUES,
        description: "Detects missing values in the dataset and provides statistics. No input is needed.",
    },
    ToolSpec {
        name: names::DROP_MISSING_VALUES,
        description: "Drops rows with missing values. Input can be a comma-separated list of column names, or leave empty to drop rows with any missing values.",
    },
    ToolSpec {
        name: names::FILL_MISSING_WITH_MEAN,
        description: "Fills missing values with the column mean for numeric columns. Input can be a comma-separated list of column names, or leave empty to fill all numeric columns.",
    },
    ToolSpec {
        name: names::DETECT_OUTLIERS,
        description: "Detects outliers in numeric columns using Z-Score method. Input is the Z-Score threshold (default 3).",
    },
    ToolSpec {
        name: names::REMOVE_OUTLIERS,
        description: "Removes outliers from numeric columns using Z-Score method. Input format: 'threshold,col1,col2,...' or just 'threshold' to check all numeric columns. Default threshold is 3.",
    },
    ToolSpec {
        name: names::REMOVE_DUPLICATES,
        description: "Removes duplicate rows. Input can be a comma-separated list of column names to consider for duplicates, or leave empty to check all columns.",
    },
    ToolSpec {
        name: names::GET_DATAFRAME_INFO,
        description: "Returns information about the current state of the dataframe. No input is needed.",
    },
    ToolSpec {
        name: names::GET_DATAFRAME_SAMPLE,
        description: "Returns a sample of the first N rows of the dataframe. Input is the number of rows to show (default 5).",
    },
];

/// Check whether a tool defers its effect to replay.
pub fn is_mutating(tool: &str) -> bool {
    matches!(
        tool,
        names::DROP_MISSING_VALUES
            | names::FILL_MISSING_WITH_MEAN
            | names::REMOVE_OUTLIERS
            | names::REMOVE_DUPLICATES
    )
}

/// The tool catalog bound to a session's original frame.
pub struct ToolCatalog<'a> {
    df: &'a DataFrame,
}

impl<'a> ToolCatalog<'a> {
    /// Create a catalog over the live original frame.
    pub fn new(df: &'a DataFrame) -> Self {
        Self { df }
    }

    /// The catalog entries, for prompt construction.
    pub fn specs(&self) -> &'static [ToolSpec] {
        TOOL_SPECS
    }

    /// All tool names, for prompt construction and validation messages.
    pub fn tool_names(&self) -> Vec<&'static str> {
        TOOL_SPECS.iter().map(|spec| spec.name).collect()
    }

    /// Invoke a tool by name with a free-form input string.
    ///
    /// Never fails: unknown tools, malformed inputs, and internal errors
    /// all come back as observation text.
    pub fn invoke(&self, tool: &str, input: &str) -> String {
        match tool {
            names::DETECT_MISSING_VALUES => inspect::missing_values_report(self.df),
            names::DETECT_OUTLIERS => {
                let threshold = parse_threshold(input);
                inspect::outlier_report(self.df, threshold)
                    .unwrap_or_else(|e| format!("Outlier detection failed: {}", e))
            }
            names::GET_DATAFRAME_INFO => inspect::frame_info(self.df),
            names::GET_DATAFRAME_SAMPLE => {
                let rows = parse_row_count(input);
                inspect::frame_sample(self.df, rows)
            }
            name if is_mutating(name) => MUTATION_ACK.to_string(),
            unknown => format!(
                "{} is not a valid tool, try one of [{}].",
                unknown,
                self.tool_names().join(", ")
            ),
        }
    }
}
