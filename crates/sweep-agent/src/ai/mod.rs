//! Reasoning providers for the planning loop.
//!
//! This module provides a trait-based abstraction over LLM backends so the
//! planner can work with any reasoning source. The source is treated as a
//! black box with unspecified latency and nondeterminism; the planner only
//! ever sends a prompt and reads back a completion string.
//!
//! # Feature Flag
//!
//! The HTTP-backed providers require the `ai` feature flag (enabled by
//! default). The [`ReasoningProvider`] trait and the [`ScriptedProvider`]
//! are always available, so the planning loop stays fully testable without
//! network access.
//!
//! ```toml
//! # Enable AI support (default)
//! sweep_agent = { version = "0.1", features = ["ai"] }
//!
//! # Disable AI support for smaller binary
//! sweep_agent = { version = "0.1", default-features = false }
//! ```
//!
//! # Adding a New Provider
//!
//! 1. Create a new file (e.g., `src/ai/ollama.rs`)
//! 2. Implement the [`ReasoningProvider`] trait
//! 3. Export the new provider in this module
//!
//! # Example
//!
//! ```rust,ignore
//! use sweep_agent::ai::{OpenAiProvider, ReasoningProvider};
//! use sweep_agent::Cleaner;
//! use std::sync::Arc;
//!
//! let provider = Arc::new(OpenAiProvider::new("your-api-key")?);
//!
//! let result = Cleaner::builder()
//!     .provider(provider)
//!     .build()?
//!     .clean(dataframe)?;
//! ```

// Provider trait and scripted provider are always available
mod provider;
mod scripted;

pub use provider::ReasoningProvider;
pub use scripted::ScriptedProvider;

// HTTP-backed providers require the "ai" feature
#[cfg(feature = "ai")]
mod anthropic;
#[cfg(feature = "ai")]
mod mistral;
#[cfg(feature = "ai")]
mod openai;

#[cfg(feature = "ai")]
pub use anthropic::{AnthropicConfig, AnthropicConfigBuilder, AnthropicProvider};

#[cfg(feature = "ai")]
pub use mistral::{MistralConfig, MistralProvider};

#[cfg(feature = "ai")]
pub use openai::{OpenAiConfig, OpenAiConfigBuilder, OpenAiProvider};
