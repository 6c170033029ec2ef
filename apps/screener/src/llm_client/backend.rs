use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{ChatMessage, CompletionBackend, CompletionOptions, LlmError};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const CLAUDE_BASE_URL: &str = "https://api.anthropic.com/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Providers reachable through an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    OpenAi,
    Gemini,
    Claude,
    Ollama,
}

impl Provider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::OpenAi => OPENAI_BASE_URL,
            Provider::Gemini => GEMINI_BASE_URL,
            Provider::Claude => CLAUDE_BASE_URL,
            Provider::Ollama => OLLAMA_BASE_URL,
        }
    }

    /// Maps short model aliases onto the provider's full model identifiers.
    /// Unknown names pass through untouched.
    pub fn resolve_model(self, model: &str) -> String {
        let resolved = match (self, model) {
            (Provider::OpenAi, "gpt-4") => "gpt-4-turbo",
            (Provider::OpenAi, "gpt-3.5") => "gpt-3.5-turbo",
            (Provider::Claude, "claude-3-opus") => "claude-3-opus-20240229",
            (Provider::Claude, "claude-3-sonnet") => "claude-3-sonnet-20240229",
            (Provider::Claude, "claude-3-haiku") => "claude-3-haiku-20240307",
            (Provider::Ollama, "llama3") => "llama3.2",
            _ => model,
        };
        resolved.to_string()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown LLM provider '{0}'")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "gemini" => Ok(Provider::Gemini),
            "claude" | "anthropic" => Ok(Provider::Claude),
            "ollama" => Ok(Provider::Ollama),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Claude => "claude",
            Provider::Ollama => "ollama",
        };
        f.write_str(name)
    }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

// ─── Backend ─────────────────────────────────────────────────────────────────

/// Talks to `{base_url}/chat/completions` with bearer authentication.
/// Makes exactly one HTTP call per `chat`; retrying is the client's job.
pub struct HttpChatBackend {
    client: Client,
    provider: Provider,
    model: String,
    endpoint: String,
    api_key: String,
}

impl HttpChatBackend {
    pub fn new(
        provider: Provider,
        model: &str,
        api_key: String,
        base_url: Option<String>,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let base = base_url.unwrap_or_else(|| provider.default_base_url().to_string());
        let api_key = match provider {
            Provider::Ollama if api_key.is_empty() => "ollama".to_string(),
            _ => api_key,
        };

        Ok(Self {
            client,
            provider,
            model: provider.resolve_model(model),
            endpoint: format!("{}/chat/completions", base.trim_end_matches('/')),
            api_key,
        })
    }

    pub fn describe(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }
}

#[async_trait]
impl CompletionBackend for HttpChatBackend {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: options.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(e.to_string())
                } else {
                    LlmError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, body));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "Completion from {}: prompt_tokens={}, completion_tokens={}",
                self.describe(),
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)
    }
}

fn classify_failure(status: StatusCode, body: String) -> LlmError {
    let message = serde_json::from_str::<ProviderError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => LlmError::Timeout(message),
        _ => LlmError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}
