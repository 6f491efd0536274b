//! Scripted reasoning provider for deterministic tests.

use super::ReasoningProvider;
use anyhow::{Result, anyhow};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A reasoning provider that replays a fixed script of responses.
///
/// Each call to [`ReasoningProvider::complete`] returns the next scripted
/// response; once the script is exhausted the last response repeats, which
/// makes it easy to exercise the planner's budget cutoff with a source
/// that never produces a final answer.
///
/// # Example
///
/// ```rust,ignore
/// use sweep_agent::ai::ScriptedProvider;
///
/// let provider = ScriptedProvider::new(vec![
///     "Thought: look first\nAction: get_dataframe_info\nAction Input: ",
///     "Thought: done\nFinal Answer: Nothing to clean.",
/// ]);
/// ```
pub struct ScriptedProvider {
    responses: Vec<String>,
    cursor: AtomicUsize,
}

impl ScriptedProvider {
    /// Create a provider from an ordered script of responses.
    pub fn new<S: Into<String>>(responses: Vec<S>) -> Self {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of completions served so far.
    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl ReasoningProvider for ScriptedProvider {
    fn complete(&self, _prompt: &str) -> Result<String> {
        if self.responses.is_empty() {
            return Err(anyhow!("Scripted provider has no responses"));
        }

        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        let index = index.min(self.responses.len() - 1);
        Ok(self.responses[index].clone())
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}
