//! OpenAI provider implementation.
//!
//! This module provides the [`OpenAiProvider`] which implements the
//! [`ReasoningProvider`] trait for the OpenAI chat completions API
//! (<https://platform.openai.com/>).

use super::ReasoningProvider;
use anyhow::{Result, anyhow};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default OpenAI API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for planning steps.
const DEFAULT_MODEL: &str = "gpt-4o";

/// Default timeout for API requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default temperature (0 for reproducible planning).
const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Default max tokens for responses.
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<Message>,
}

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// The model to use (e.g., "gpt-4o", "gpt-4o-mini").
    pub model: String,
    /// Temperature for response generation (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens in the response.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Base URL for the API (useful for proxies or custom endpoints).
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl OpenAiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> OpenAiConfigBuilder {
        OpenAiConfigBuilder::default()
    }
}

/// Builder for [`OpenAiConfig`].
#[derive(Default)]
pub struct OpenAiConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
    base_url: Option<String>,
}

impl OpenAiConfigBuilder {
    /// Set the model to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature (0.0 - 2.0).
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set a custom base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenAiConfig {
        OpenAiConfig {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// OpenAI reasoning provider.
///
/// # Example
///
/// ```rust,ignore
/// use sweep_agent::ai::{OpenAiConfig, OpenAiProvider};
///
/// // Simple usage with defaults
/// let provider = OpenAiProvider::new("your-api-key")?;
///
/// // With custom configuration
/// let config = OpenAiConfig::builder()
///     .model("gpt-4o-mini")
///     .timeout_secs(30)
///     .build();
/// let provider = OpenAiProvider::with_config("your-api-key", config)?;
/// ```
pub struct OpenAiProvider {
    api_key: String,
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, OpenAiConfig::default())
    }

    /// Create a new OpenAI provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            api_key: api_key.into(),
            config,
            client,
        })
    }

    fn call_api(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "OpenAI API Error {}: {}",
                response.status(),
                response.text()?
            ));
        }

        let result: ChatResponse = response.json()?;

        let text = result
            .choices
            .as_ref()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.message.as_ref())
            .map(|msg| msg.content.clone())
            .ok_or_else(|| anyhow!("No response content from OpenAI API"))?;

        Ok(text)
    }
}

impl ReasoningProvider for OpenAiProvider {
    fn complete(&self, prompt: &str) -> Result<String> {
        self.call_api(prompt)
    }

    fn name(&self) -> &str {
        "OpenAI"
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.model)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_response_structure() {
        let json = r#"{
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Thought: inspect first\nAction: get_dataframe_info\nAction Input: "
                }
            }]
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        let choices = response.choices.unwrap();
        assert_eq!(choices.len(), 1);
        assert!(
            choices[0]
                .message
                .as_ref()
                .unwrap()
                .content
                .contains("get_dataframe_info")
        );
    }

    #[test]
    fn test_parse_response_with_empty_choices() {
        let json = r#"{"choices": []}"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices.unwrap().is_empty());
    }

    #[test]
    fn test_parse_response_with_null_choices() {
        let json = r#"{"choices": null}"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices.is_none());
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = OpenAiConfig::builder().build();

        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_builder_custom_values() {
        let config = OpenAiConfig::builder()
            .model("gpt-4o-mini")
            .temperature(0.5)
            .max_tokens(256)
            .timeout_secs(15)
            .base_url("https://proxy.example.com/v1/chat/completions")
            .build();

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.max_tokens, 256);
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.base_url, "https://proxy.example.com/v1/chat/completions");
    }

    #[test]
    fn test_provider_name_and_model() {
        let provider = OpenAiProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "OpenAI");
        assert_eq!(provider.model(), Some(DEFAULT_MODEL));
    }
}
