//! Configuration types for the cleaning agent.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic setup.

use crate::types::MissingValueStrategy;
use serde::{Deserialize, Serialize};

/// Default maximum number of reasoning steps per planning session.
pub const DEFAULT_MAX_STEPS: usize = 60;

/// Default wall-clock ceiling for a planning session, in seconds.
pub const DEFAULT_MAX_WALL_CLOCK_SECS: u64 = 60;

/// Configuration for a cleaning agent session.
///
/// Use [`AgentConfig::builder()`] to create a new configuration with a
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use sweep_agent::{AgentConfig, MissingValueStrategy};
///
/// let config = AgentConfig::builder()
///     .strategy(MissingValueStrategy::Drop)
///     .max_steps(30)
///     .max_wall_clock_secs(45)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Missing-value policy for the session.
    /// Constrains which mutating tool calls are honored at replay time.
    /// Default: FillMean
    pub strategy: MissingValueStrategy,

    /// Maximum number of reasoning steps before the loop is cut off.
    /// Default: 60
    pub max_steps: usize,

    /// Wall-clock ceiling in seconds, checked between steps.
    /// Default: 60
    pub max_wall_clock_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            strategy: MissingValueStrategy::default(),
            max_steps: DEFAULT_MAX_STEPS,
            max_wall_clock_secs: DEFAULT_MAX_WALL_CLOCK_SECS,
        }
    }
}

impl AgentConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_steps == 0 {
            return Err(ConfigValidationError::InvalidMaxSteps(self.max_steps));
        }

        if self.max_wall_clock_secs == 0 {
            return Err(ConfigValidationError::InvalidWallClock(
                self.max_wall_clock_secs,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid max_steps: {0} (must be at least 1)")]
    InvalidMaxSteps(usize),

    #[error("Invalid max_wall_clock_secs: {0} (must be at least 1)")]
    InvalidWallClock(u64),
}

/// Builder for [`AgentConfig`].
#[derive(Default)]
pub struct AgentConfigBuilder {
    strategy: Option<MissingValueStrategy>,
    max_steps: Option<usize>,
    max_wall_clock_secs: Option<u64>,
}

impl AgentConfigBuilder {
    /// Set the missing-value policy.
    pub fn strategy(mut self, strategy: MissingValueStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the maximum number of reasoning steps.
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Set the wall-clock ceiling in seconds.
    pub fn max_wall_clock_secs(mut self, secs: u64) -> Self {
        self.max_wall_clock_secs = Some(secs);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<AgentConfig, ConfigValidationError> {
        let config = AgentConfig {
            strategy: self.strategy.unwrap_or_default(),
            max_steps: self.max_steps.unwrap_or(DEFAULT_MAX_STEPS),
            max_wall_clock_secs: self.max_wall_clock_secs.unwrap_or(DEFAULT_MAX_WALL_CLOCK_SECS),
        };
        config.validate()?;
        Ok(config)
    }
}
