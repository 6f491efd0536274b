//! Anthropic provider implementation.
//!
//! This module provides the [`AnthropicProvider`] which implements the
//! [`ReasoningProvider`] trait for the Anthropic Messages API
//! (<https://docs.anthropic.com/>).

use super::ReasoningProvider;
use anyhow::{Result, anyhow};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Anthropic API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// API version header required by the Messages API.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model for planning steps.
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";

/// Default timeout for API requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default temperature (0 for reproducible planning).
const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Default max tokens for responses.
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Option<Vec<ContentBlock>>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// The model to use (e.g., "claude-3-5-sonnet-20240620").
    pub model: String,
    /// Temperature for response generation (0.0 - 1.0).
    pub temperature: f32,
    /// Maximum tokens in the response.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Base URL for the API (useful for proxies or custom endpoints).
    pub base_url: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl AnthropicConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnthropicConfigBuilder {
        AnthropicConfigBuilder::default()
    }
}

/// Builder for [`AnthropicConfig`].
#[derive(Default)]
pub struct AnthropicConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
    base_url: Option<String>,
}

impl AnthropicConfigBuilder {
    /// Set the model to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature (0.0 - 1.0).
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
    pub fn build(self) -> AnthropicConfig {
        AnthropicConfig {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        }
    }
}

/// Anthropic reasoning provider.
pub struct AnthropicProvider {
    api_key: String,
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, AnthropicConfig::default())
    }

    /// Create a new Anthropic provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: AnthropicConfig) -> Result<Self> {
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
        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Anthropic API Error {}: {}",
                response.status(),
                response.text()?
            ));
        }

        let result: MessagesResponse = response.json()?;

        // The Messages API returns a list of content blocks; concatenate
        // the text blocks.
        let text: String = result
            .content
            .unwrap_or_default()
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .collect();

        if text.is_empty() {
            return Err(anyhow!("No response content from Anthropic API"));
        }

        Ok(text)
    }
}

impl ReasoningProvider for AnthropicProvider {
    fn complete(&self, prompt: &str) -> Result<String> {
        self.call_api(prompt)
    }

    fn name(&self) -> &str {
        "Anthropic"
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_messages_response() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "Thought: done\nFinal Answer: all clean"}
            ]
        }"#;

        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        let content = response.content.unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].kind, "text");
        assert!(content[0].text.as_ref().unwrap().contains("Final Answer"));
    }

    #[test]
    fn test_parse_response_skips_non_text_blocks() {
        let json = r#"{
            "content": [
                {"type": "thinking", "text": null},
                {"type": "text", "text": "hello"}
            ]
        }"#;

        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        let text: String = response
            .content
            .unwrap_or_default()
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .collect();
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_config_builder() {
        let config = AnthropicConfig::builder()
            .model("claude-3-haiku-20240307")
            .max_tokens(512)
            .build();

        assert_eq!(config.model, "claude-3-haiku-20240307");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_provider_name_and_model() {
        let provider = AnthropicProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "Anthropic");
        assert_eq!(provider.model(), Some(DEFAULT_MODEL));
    }
}
