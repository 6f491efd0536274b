//! The main cleaning pipeline facade.
//!
//! This module provides the core `Cleaner` struct and builder for
//! orchestrating a full cleaning run: planning loop first, deterministic
//! replay second, summary assembly last.

use crate::agent::Planner;
use crate::ai::ReasoningProvider;
use crate::config::AgentConfig;
use crate::error::{CleaningError, Result};
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::pipeline::replay::ReplayExecutor;
use crate::types::{CleaningResult, CleaningSummary};
use chrono::Utc;
use polars::prelude::DataFrame;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// The cleaning pipeline.
///
/// Use [`Cleaner::builder()`] to create a new pipeline with a reasoning
/// provider and session configuration.
///
/// # Example
///
/// ```rust,ignore
/// use sweep_agent::ai::OpenAiProvider;
/// use sweep_agent::{AgentConfig, Cleaner, MissingValueStrategy};
/// use std::sync::Arc;
///
/// let provider = Arc::new(OpenAiProvider::new(api_key)?);
///
/// let result = Cleaner::builder()
///     .provider(provider)
///     .config(AgentConfig::builder()
///         .strategy(MissingValueStrategy::Drop)
///         .build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .clean(dataframe)?;
///
/// println!("{} -> {} rows", result.summary.rows_before, result.summary.rows_after);
/// ```
pub struct Cleaner {
    config: AgentConfig,
    provider: Arc<dyn ReasoningProvider>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    executor: ReplayExecutor,
}

// Ensure Cleaner is Send (can be moved to a background thread)
static_assertions::assert_impl_all!(Cleaner: Send);

// The trait-object fields (provider, progress reporter) are not `Debug`, so
// `Debug` is implemented by hand over the parts that can be printed.
impl std::fmt::Debug for Cleaner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cleaner")
            .field("config", &self.config)
            .field("provider", &self.provider.name())
            .field("has_progress_reporter", &self.progress_reporter.is_some())
            .finish()
    }
}

impl Cleaner {
    /// Create a new pipeline builder.
    pub fn builder() -> CleanerBuilder {
        CleanerBuilder::default()
    }

    /// The session configuration this pipeline runs with.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run a full cleaning session over a DataFrame.
    ///
    /// # Errors
    ///
    /// Returns [`CleaningError::ReasoningFailed`] if the provider fails
    /// (fatal, no partial result) and [`CleaningError::ReplayFailed`] if
    /// the trace cannot be re-applied. Budget exhaustion is not an error:
    /// the result carries whatever partial trace existed, flagged via
    /// `summary.budget_exhausted`.
    pub fn clean(&self, df: DataFrame) -> Result<CleaningResult> {
        match self.clean_internal(df) {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Cleaning completed"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Cleaning run failed: {}", e);
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn clean_internal(&self, df: DataFrame) -> Result<CleaningResult> {
        let start_time = Instant::now();

        self.report_progress(ProgressUpdate::new(
            CleaningStage::Initializing,
            "Starting cleaning session",
        ));

        let rows_before = df.height();
        let columns_before = df.width();
        info!(
            "Starting cleaning session over {} rows x {} columns",
            rows_before, columns_before
        );

        // Phase 1: bounded planning loop. The planner only observes the
        // frame; its mutating tool calls are acknowledged without effect.
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Planning,
            format!("Planning with {}", self.provider.name()),
        ));

        let planner = Planner::new(self.provider.clone(), self.config.clone());
        let outcome = planner.run(&df)?;

        if outcome.budget_exhausted {
            info!(
                "Planner budget exhausted after {} steps; replaying partial trace",
                outcome.steps_used
            );
        }

        // Phase 2: deterministic replay of the trace against the real
        // frame. This is the only place the dataset is actually mutated.
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Replay,
            format!("Replaying {} tool calls", outcome.trace.len()),
        ));

        let (cleaned, report) = self
            .executor
            .apply(&df, &outcome.trace, self.config.strategy)
            .map_err(|e| CleaningError::ReplayFailed(e.to_string()))?;

        info!(
            "Replay complete: {} -> {} rows, {} report entries",
            rows_before,
            cleaned.height(),
            report.len()
        );

        let summary = CleaningSummary {
            rows_before,
            rows_after: cleaned.height(),
            columns_before,
            columns_after: cleaned.width(),
            strategy: self.config.strategy,
            report,
            trace: outcome.trace,
            agent_summary: outcome.summary,
            steps_used: outcome.steps_used,
            budget_exhausted: outcome.budget_exhausted,
            provider: self.provider.name().to_string(),
            model: self.provider.model().map(str::to_string),
            duration_ms: start_time.elapsed().as_millis() as u64,
            completed_at: Utc::now(),
        };

        Ok(CleaningResult { cleaned, summary })
    }
}

/// Builder for [`Cleaner`].
#[derive(Default)]
pub struct CleanerBuilder {
    config: Option<AgentConfig>,
    provider: Option<Arc<dyn ReasoningProvider>>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl CleanerBuilder {
    /// Set the session configuration.
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the reasoning provider (required).
    pub fn provider(mut self, provider: Arc<dyn ReasoningProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set a progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a closure-based progress reporter.
    pub fn on_progress<F>(self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter(Arc::new(ClosureProgressReporter::new(callback)))
    }

    /// Build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`CleaningError::InvalidConfig`] if no provider was set or
    /// the configuration fails validation.
    pub fn build(self) -> Result<Cleaner> {
        let provider = self.provider.ok_or_else(|| {
            CleaningError::InvalidConfig("a reasoning provider is required".to_string())
        })?;

        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;

        Ok(Cleaner {
            config,
            provider,
            progress_reporter: self.progress_reporter,
            executor: ReplayExecutor,
        })
    }
}
