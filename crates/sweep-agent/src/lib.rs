//! Agent-Driven Data Cleaning Library
//!
//! An LLM-planned, deterministically-replayed data cleaning library built
//! with Rust and Polars.
//!
//! # Overview
//!
//! This library lets an automated agent decide which cleaning operations
//! to apply to a tabular dataset (missing values, outliers, duplicates)
//! and returns a cleaned frame plus a human-readable report:
//!
//! - **Tool Catalog**: a fixed menu of inspection and cleaning operations
//!   with single-string inputs and never-failing argument parsing
//! - **Planning Loop**: a bounded think/act/observe loop driven by a
//!   pluggable reasoning provider, with hard step and wall-clock budgets
//! - **Deterministic Replay**: mutating tool calls are acknowledged
//!   during planning and re-applied for real afterwards, so the cleaned
//!   output depends only on the recorded trace and the session policy
//! - **Session & Report**: ordered effect descriptions accumulated during
//!   replay, rebuilt from scratch on every (re)run
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sweep_agent::ai::OpenAiProvider;
//! use sweep_agent::{AgentConfig, Cleaner, MissingValueStrategy, Session};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! // Load data
//! let mut session = Session::from_path(Path::new("data.csv"))?;
//!
//! // Build the pipeline with an AI provider
//! let provider = Arc::new(OpenAiProvider::new(api_key)?);
//! let cleaner = Cleaner::builder()
//!     .provider(provider)
//!     .config(AgentConfig::builder()
//!         .strategy(MissingValueStrategy::FillMean)
//!         .build()?)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?;
//!
//! // Run cleaning and export
//! let result = session.run(&cleaner)?;
//! for line in &result.summary.report {
//!     println!("- {}", line);
//! }
//! let payload = session.export()?;
//! std::fs::write(&payload.file_name, payload.bytes)?;
//! ```
//!
//! # Reasoning Providers
//!
//! The planner works against any [`ai::ReasoningProvider`]. Implemented
//! providers:
//!
//! - [`ai::OpenAiProvider`] - OpenAI chat completions API
//! - [`ai::AnthropicProvider`] - Anthropic Messages API
//! - [`ai::MistralProvider`] - Mistral chat completions API
//! - [`ai::ScriptedProvider`] - deterministic scripted responses, for
//!   tests and offline runs
//!
//! The HTTP providers require the default `ai` feature; the trait and the
//! scripted provider are always available.
//!
//! # Determinism
//!
//! The planning loop is not repeatable: a nondeterministic reasoning
//! source may produce a different trace on every run. Replay is: given
//! the same original frame, trace, and missing-value policy, it always
//! produces the same cleaned frame and the same report. The planner only
//! ever sees inspection output and static acknowledgments, never the
//! effect of its own mutating calls.

// Core modules
pub mod agent;
pub mod ai;
pub mod catalog;
pub mod config;
pub mod error;
pub mod inspect;
pub mod io;
pub mod pipeline;
pub mod session;
pub mod transforms;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use catalog::{MUTATION_ACK, TOOL_SPECS, ToolCatalog, ToolSpec};
pub use config::{AgentConfig, AgentConfigBuilder, ConfigValidationError};
pub use error::{CleaningError, Result as SweepResult, ResultExt};
pub use io::SourceFormat;
pub use pipeline::{
    Cleaner, CleanerBuilder, CleaningStage, ClosureProgressReporter, ProgressReporter,
    ProgressUpdate, ReplayExecutor,
};
pub use session::{ExportPayload, Session};
pub use types::{
    CleaningResult, CleaningSummary, MissingValueStrategy, PlannerOutcome, ToolCall, Trace,
    TraceEntry,
};
