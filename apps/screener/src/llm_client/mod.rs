//! Completion client: the single point of entry for every model call in the pipeline.
//!
//! RULE: agents never talk to a provider directly. They hand a (system, user)
//! prompt pair to `CompletionClient`, which owns the retry policy, and the
//! client forwards to whichever `CompletionBackend` was injected at startup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

mod backend;
pub mod json_repair;
#[cfg(test)]
pub mod mock;
pub mod prompts;

pub use backend::{HttpChatBackend, Provider};

/// Upper bound on attempts for one completion, including the first call.
pub const MAX_ATTEMPTS: u32 = 8;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Request rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider returned an unexpected payload: {0}")]
    MalformedResponse(String),

    #[error("Provider returned empty content")]
    EmptyContent,

    #[error("Gave up after {attempts} attempts: {last}")]
    Unavailable { attempts: u32, last: String },
}

impl LlmError {
    /// Only rate limits and timeouts are worth waiting out.
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::RateLimited(_) | LlmError::Timeout(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub json_mode: bool,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 4096,
            json_mode: true,
        }
    }
}

/// A provider capable of answering a chat transcript with text.
/// The pipeline is indifferent to which model sits behind it.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, LlmError>;
}

/// Linear backoff with jitter: `base + attempt * step + rand(0..jitter)`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base: Duration,
    pub step: Duration,
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base: Duration::from_secs(30),
            step: Duration::from_secs(15),
            jitter: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the failed attempt with zero-based index `attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::thread_rng().gen_range(0..jitter_ms))
        };
        self.base + self.step * attempt + jitter
    }
}

/// Retrying wrapper around a `CompletionBackend`.
#[derive(Clone)]
pub struct CompletionClient {
    backend: Arc<dyn CompletionBackend>,
    policy: RetryPolicy,
}

impl CompletionClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    /// Sends a system + user prompt pair and returns the raw completion text.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        let messages = [ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)];
        self.chat(&messages, options).await
    }

    /// Sends a transcript, retrying rate limits and timeouts up to the policy bound.
    /// Every other failure propagates on the first occurrence.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..max_attempts {
            match self.backend.chat(messages, options).await {
                Ok(text) if text.trim().is_empty() => return Err(LlmError::EmptyContent),
                Ok(text) => {
                    debug!(attempt = attempt + 1, chars = text.len(), "Completion succeeded");
                    return Ok(text);
                }
                Err(e) if e.is_transient() => {
                    if attempt + 1 < max_attempts {
                        let delay = self.policy.delay_for(attempt);
                        warn!(
                            "Completion attempt {}/{} failed ({}), retrying after {}ms...",
                            attempt + 1,
                            max_attempts,
                            e,
                            delay.as_millis()
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(LlmError::Unavailable {
            attempts: max_attempts,
            last: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempts made".to_string()),
        })
    }
}
