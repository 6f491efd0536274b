//! Reasoning provider trait for abstracting LLM interactions.
//!
//! The planner depends on an external capability that, given the
//! instruction template plus the accumulated transcript, returns the
//! model's next reasoning step as text. This trait makes that capability
//! pluggable: multiple interchangeable backends, including a scripted one
//! for deterministic tests.

use anyhow::Result;

/// Trait for reasoning sources that drive the planning loop.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a provider can be shared
/// behind an `Arc` across sessions.
///
/// # Error Handling
///
/// A returned error is fatal to the session: unlike malformed output,
/// which the loop recovers from, an unreachable or failing provider
/// aborts planning with no partial trace.
pub trait ReasoningProvider: Send + Sync {
    /// Produce the model's next reasoning step for the given prompt.
    ///
    /// The prompt contains the fixed instructions, the tool catalog
    /// descriptions, and the transcript of previous steps. The returned
    /// text is expected to follow the Thought/Action/Action Input format
    /// or end with a final answer, but the planner tolerates and corrects
    /// deviations.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the provider name for logging and debugging.
    fn name(&self) -> &str;

    /// Get the model being used by this provider.
    ///
    /// Returns `None` if the provider doesn't expose model information.
    fn model(&self) -> Option<&str> {
        None
    }
}
