use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            max_tokens: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Single-turn completion; returns the reply text.
    async fn generate(&self, request: GenerationRequest) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<MessageParam<'a>>,
}

#[derive(Debug, Serialize)]
struct MessageParam<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Anthropic Messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: SecretString,
    api_url: String,
    model: String,
    default_max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.anthropic_api_key.clone(),
            api_url: config.anthropic_api_url.trim_end_matches('/').to_string(),
            model: config.llm_model.clone(),
            default_max_tokens: config.llm_max_tokens,
        })
    }

    fn messages_endpoint(&self) -> String {
        format!("{}/v1/messages", self.api_url)
    }
}

fn build_request_body<'a>(
    model: &'a str,
    default_max_tokens: u32,
    request: &'a GenerationRequest,
) -> MessagesRequest<'a> {
    MessagesRequest {
        model,
        max_tokens: request.max_tokens.unwrap_or(default_max_tokens),
        system: request
            .system_prompt
            .as_deref()
            .filter(|system| !system.is_empty()),
        messages: vec![MessageParam {
            role: "user",
            content: &request.prompt,
        }],
    }
}

fn extract_text(response: MessagesResponse) -> AppResult<String> {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or_else(|| AppError::UpstreamError("Model reply contained no text".to_string()))
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    async fn generate(&self, request: GenerationRequest) -> AppResult<String> {
        let body = build_request_body(&self.model, self.default_max_tokens, &request);
        log::debug!(
            "Requesting completion from {} (max_tokens={})",
            self.model,
            body.max_tokens
        );

        let response = self
            .http
            .post(self.messages_endpoint())
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to reach language model API: {}", e);
                AppError::UpstreamError(format!("Failed to reach language model API: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response body".to_string());
            log::error!("Language model API returned {}: {}", status, detail);
            return Err(AppError::UpstreamError(format!(
                "Language model API returned {}: {}",
                status, detail
            )));
        }

        let parsed: MessagesResponse = response.json().await?;
        extract_text(parsed)
    }
}
