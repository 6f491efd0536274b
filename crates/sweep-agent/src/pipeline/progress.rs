//! Progress reporting for the cleaning pipeline.
//!
//! A cleaning run has two working phases: the planning loop and the
//! deterministic replay. Progress updates let an embedding application
//! (CLI spinner, desktop UI) show which phase is active without the
//! pipeline knowing anything about the frontend.

use serde::{Deserialize, Serialize};

/// Stages of a cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Validating inputs and preparing the session
    Initializing,
    /// The planner loop is consulting the reasoning provider
    Planning,
    /// Replaying the trace's mutating calls against the real frame
    Replay,
    /// Run completed successfully
    Complete,
    /// Run failed with an error
    Failed,
}

impl CleaningStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::Planning => "Planning",
            Self::Replay => "Replaying Trace",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    ///
    /// Planning dominates wall-clock time because every step round-trips
    /// to the reasoning provider; replay is local and fast.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Initializing => 0.0,
            Self::Planning => 0.05,
            Self::Replay => 0.85,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// A progress update emitted during a cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current stage.
    pub stage: CleaningStage,
    /// Overall progress (0.0 - 1.0).
    pub progress: f32,
    /// Human-readable message describing current activity.
    pub message: String,
}

impl ProgressUpdate {
    /// Creates a new progress update for a stage.
    pub fn new(stage: CleaningStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: stage.base_progress(),
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(CleaningStage::Complete, message)
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(CleaningStage::Failed, message)
    }
}

/// Trait for receiving progress updates during a cleaning run.
///
/// Implementations must be `Send + Sync` so the pipeline can run on a
/// background thread while the frontend consumes updates.
pub trait ProgressReporter: Send + Sync {
    /// Called when the run moves between stages.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}
