//! Mistral provider implementation.
//!
//! Mistral exposes an OpenAI-compatible chat completions API
//! (<https://docs.mistral.ai/>), so this provider mirrors the OpenAI one
//! with its own endpoint and default model.

use super::ReasoningProvider;
use anyhow::{Result, anyhow};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Mistral API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1/chat/completions";

/// Default model for planning steps.
const DEFAULT_MODEL: &str = "mistral-large-latest";

/// Default timeout for API requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

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

/// Configuration for the Mistral provider.
#[derive(Debug, Clone)]
pub struct MistralConfig {
    /// The model to use (e.g., "mistral-large-latest").
    pub model: String,
    /// Temperature for response generation.
    pub temperature: f32,
    /// Maximum tokens in the response.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Base URL for the API.
    pub base_url: String,
}

impl Default for MistralConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            temperature: 0.0,
            max_tokens: 1024,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

/// Mistral reasoning provider.
pub struct MistralProvider {
    api_key: String,
    config: MistralConfig,
    client: Client,
}

impl MistralProvider {
    /// Create a new Mistral provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, MistralConfig::default())
    }

    /// Create a new Mistral provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: MistralConfig) -> Result<Self> {
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
                "Mistral API Error {}: {}",
                response.status(),
                response.text()?
            ));
        }

        let result: ChatResponse = response.json()?;

        result
            .choices
            .as_ref()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.message.as_ref())
            .map(|msg| msg.content.clone())
            .ok_or_else(|| anyhow!("No response content from Mistral API"))
    }
}

impl ReasoningProvider for MistralProvider {
    fn complete(&self, prompt: &str) -> Result<String> {
        self.call_api(prompt)
    }

    fn name(&self) -> &str {
        "Mistral"
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.model)
    }
}
