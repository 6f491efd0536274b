//! The bounded think/act/observe loop.

use crate::agent::prompt;
use crate::ai::ReasoningProvider;
use crate::catalog::ToolCatalog;
use crate::config::AgentConfig;
use crate::error::{CleaningError, Result};
use crate::types::{PlannerOutcome, ToolCall, Trace, TraceEntry};
use once_cell::sync::Lazy;
use polars::prelude::DataFrame;
use regex::Regex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Observation injected when a reasoning step cannot be parsed.
const PARSE_RETRY_OBSERVATION: &str = "Could not parse the last step. Reply with one Action \
and Action Input, or end with a Final Answer.";

static FINAL_ANSWER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)Final Answer\s*:\s*(.*)").expect("valid regex"));
static ACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*Action\s*:\s*(.+?)\s*$").expect("valid regex"));
static ACTION_INPUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*Action Input\s*:\s*(.*?)\s*$").expect("valid regex"));

/// One parsed reasoning step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Invoke a catalog tool with an input string.
    Act { tool: String, input: String },
    /// Stop planning with a final natural-language summary.
    Finish { summary: String },
}

/// Parse a raw reasoning output into a decision.
///
/// Returns `None` when the output matches neither shape, or ambiguously
/// matches both — the loop converts that into a corrective observation
/// rather than aborting.
pub fn parse_decision(output: &str) -> Option<Decision> {
    let action = ACTION_RE.captures(output);
    let final_answer = FINAL_ANSWER_RE.captures(output);

    match (action, final_answer) {
        // An action and a final answer in one step is ambiguous
        (Some(_), Some(_)) => None,
        (Some(action), None) => {
            let tool = clean_tool_name(action.get(1)?.as_str());
            if tool.is_empty() {
                return None;
            }
            let input = ACTION_INPUT_RE
                .captures(output)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            Some(Decision::Act { tool, input })
        }
        (None, Some(final_answer)) => Some(Decision::Finish {
            summary: final_answer.get(1)?.as_str().trim().to_string(),
        }),
        (None, None) => None,
    }
}

/// Strip decoration models sometimes wrap tool names in.
fn clean_tool_name(raw: &str) -> String {
    raw.trim().replace(['[', ']', '"', '\'', '`'], "")
}

/// The bounded planning loop.
///
/// Drives the reasoning provider against the tool catalog until the model
/// produces a final answer or a budget expires. The planner only reads
/// the dataset through inspection tools; mutating calls are recorded in
/// the trace for the replay executor and acknowledged without effect.
pub struct Planner {
    provider: Arc<dyn ReasoningProvider>,
    config: AgentConfig,
}

impl Planner {
    /// Create a planner over a provider and session configuration.
    pub fn new(provider: Arc<dyn ReasoningProvider>, config: AgentConfig) -> Self {
        Self { provider, config }
    }

    /// Run the planning loop against the live original frame.
    ///
    /// # Errors
    ///
    /// Returns [`CleaningError::ReasoningFailed`] if the provider errors;
    /// this is the only fatal failure. Budget exhaustion and malformed
    /// reasoning output are recovered and reflected in the outcome.
    pub fn run(&self, df: &DataFrame) -> Result<PlannerOutcome> {
        let catalog = ToolCatalog::new(df);
        let wall_clock = Duration::from_secs(self.config.max_wall_clock_secs);
        let started = Instant::now();

        let mut transcript: Vec<String> = Vec::new();
        let mut trace: Trace = Vec::new();
        let mut steps_used = 0usize;

        info!(
            "Starting planning loop (provider: {}, max {} steps, {}s budget)",
            self.provider.name(),
            self.config.max_steps,
            self.config.max_wall_clock_secs
        );

        while steps_used < self.config.max_steps {
            if started.elapsed() >= wall_clock {
                warn!(
                    "Planning wall-clock budget exhausted after {} steps",
                    steps_used
                );
                return Ok(PlannerOutcome {
                    trace,
                    summary: None,
                    steps_used,
                    budget_exhausted: true,
                });
            }

            let prompt = prompt::build_prompt(catalog.specs(), self.config.strategy, &transcript);
            let output = self
                .provider
                .complete(&prompt)
                .map_err(|e| CleaningError::ReasoningFailed(e.to_string()))?;
            steps_used += 1;

            match parse_decision(&output) {
                Some(Decision::Finish { summary }) => {
                    info!("Planner finished after {} steps", steps_used);
                    return Ok(PlannerOutcome {
                        trace,
                        summary: Some(summary),
                        steps_used,
                        budget_exhausted: false,
                    });
                }
                Some(Decision::Act { tool, input }) => {
                    let observation = catalog.invoke(&tool, &input);
                    debug!(step = steps_used, tool = %tool, input = %input, "Tool invoked");
                    transcript.push(format!("{}\nObservation: {}", output.trim(), observation));
                    trace.push(TraceEntry {
                        call: ToolCall { tool, input },
                        observation,
                    });
                }
                None => {
                    warn!(step = steps_used, "Unparseable reasoning output, asking for retry");
                    transcript.push(format!(
                        "{}\nObservation: {}",
                        output.trim(),
                        PARSE_RETRY_OBSERVATION
                    ));
                }
            }
        }

        warn!("Planning step ceiling reached ({} steps)", steps_used);
        Ok(PlannerOutcome {
            trace,
            summary: None,
            steps_used,
            budget_exhausted: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ScriptedProvider;
    use crate::types::MissingValueStrategy;
    use polars::prelude::*;

    fn sample_frame() -> DataFrame {
        df![
            "age" => [Some(22.0), None, Some(35.0)],
            "name" => ["alice", "bob", "carol"],
        ]
        .unwrap()
    }

    fn config_with(max_steps: usize) -> AgentConfig {
        AgentConfig::builder()
            .strategy(MissingValueStrategy::FillMean)
            .max_steps(max_steps)
            .build()
            .unwrap()
    }

    // ==================== parse_decision tests ====================

    #[test]
    fn test_parse_action_with_input() {
        let output = "Thought: check size\nAction: get_dataframe_sample\nAction Input: 10";

        assert_eq!(
            parse_decision(output),
            Some(Decision::Act {
                tool: "get_dataframe_sample".to_string(),
                input: "10".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_action_without_input_line() {
        let output = "Thought: inspect\nAction: get_dataframe_info";

        assert_eq!(
            parse_decision(output),
            Some(Decision::Act {
                tool: "get_dataframe_info".to_string(),
                input: String::new(),
            })
        );
    }

    #[test]
    fn test_parse_action_strips_decoration() {
        let output = "Action: [remove_duplicates]\nAction Input: _";

        assert_eq!(
            parse_decision(output),
            Some(Decision::Act {
                tool: "remove_duplicates".to_string(),
                input: "_".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_final_answer() {
        let output = "Thought: I now know the final answer\nFinal Answer: The dataset is clean.";

        assert_eq!(
            parse_decision(output),
            Some(Decision::Finish {
                summary: "The dataset is clean.".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_final_answer_multiline() {
        let output = "Final Answer: Cleaned the data.\nDropped 2 rows.";

        match parse_decision(output) {
            Some(Decision::Finish { summary }) => {
                assert!(summary.contains("Cleaned the data."));
                assert!(summary.contains("Dropped 2 rows."));
            }
            other => panic!("expected Finish, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse_decision("I would like to clean the data."), None);
        assert_eq!(parse_decision(""), None);
    }

    #[test]
    fn test_parse_both_action_and_final_is_none() {
        let output = "Action: get_dataframe_info\nAction Input: \nFinal Answer: done";
        assert_eq!(parse_decision(output), None);
    }

    // ==================== Planner::run tests ====================

    #[test]
    fn test_run_records_trace_and_summary() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            "Thought: inspect\nAction: get_dataframe_info\nAction Input: ",
            "Thought: check missing\nAction: detect_missing_values\nAction Input: ",
            "Thought: fill them\nAction: fill_missing_with_mean\nAction Input: age",
            "Thought: I now know the final answer\nFinal Answer: Filled missing ages.",
        ]));

        let planner = Planner::new(provider, config_with(10));
        let outcome = planner.run(&sample_frame()).unwrap();

        assert_eq!(outcome.trace.len(), 3);
        assert_eq!(outcome.trace[0].call.tool, "get_dataframe_info");
        assert_eq!(outcome.trace[2].call.tool, "fill_missing_with_mean");
        assert_eq!(outcome.trace[2].call.input, "age");
        assert_eq!(outcome.summary.as_deref(), Some("Filled missing ages."));
        assert_eq!(outcome.steps_used, 4);
        assert!(!outcome.budget_exhausted);
    }

    #[test]
    fn test_run_never_terminating_source_hits_step_ceiling() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            "Thought: look again\nAction: get_dataframe_info\nAction Input: ",
        ]));

        let planner = Planner::new(provider, config_with(5));
        let outcome = planner.run(&sample_frame()).unwrap();

        assert!(outcome.budget_exhausted);
        assert!(outcome.summary.is_none());
        assert_eq!(outcome.steps_used, 5);
        assert!(!outcome.trace.is_empty());
    }

    #[test]
    fn test_run_recovers_from_unparseable_output() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            "Let me think about this dataset for a while.",
            "Thought: ok\nFinal Answer: Nothing to do.",
        ]));

        let planner = Planner::new(provider, config_with(10));
        let outcome = planner.run(&sample_frame()).unwrap();

        // The malformed step does not enter the trace but consumes a step
        assert!(outcome.trace.is_empty());
        assert_eq!(outcome.steps_used, 2);
        assert_eq!(outcome.summary.as_deref(), Some("Nothing to do."));
    }

    #[test]
    fn test_run_unknown_tool_recorded_with_observation() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            "Thought: hm\nAction: make_coffee\nAction Input: espresso",
            "Thought: ok\nFinal Answer: done",
        ]));

        let planner = Planner::new(provider, config_with(10));
        let outcome = planner.run(&sample_frame()).unwrap();

        assert_eq!(outcome.trace.len(), 1);
        assert_eq!(outcome.trace[0].call.tool, "make_coffee");
        assert!(outcome.trace[0].observation.contains("not a valid tool"));
    }

    #[test]
    fn test_run_provider_failure_is_fatal() {
        let provider = Arc::new(ScriptedProvider::new(Vec::<String>::new()));

        let planner = Planner::new(provider, config_with(10));
        let error = planner.run(&sample_frame()).unwrap_err();

        assert!(matches!(error, CleaningError::ReasoningFailed(_)));
        assert!(error.is_session_fatal());
    }

    #[test]
    fn test_run_mutating_calls_leave_frame_untouched() {
        let df = sample_frame();
        let provider = Arc::new(ScriptedProvider::new(vec![
            "Action: drop_missing_values\nAction Input: ",
            "Action: remove_duplicates\nAction Input: ",
            "Final Answer: done",
        ]));

        let planner = Planner::new(provider, config_with(10));
        let outcome = planner.run(&df).unwrap();

        assert_eq!(outcome.trace.len(), 2);
        // The planner's view of the data never changes
        assert_eq!(df.height(), 3);
        assert_eq!(df.column("age").unwrap().null_count(), 1);
    }
}
