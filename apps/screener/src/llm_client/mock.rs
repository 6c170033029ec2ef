//! Scripted completion backend for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ChatMessage, CompletionBackend, CompletionClient, CompletionOptions, LlmError, RetryPolicy};

type Responder = dyn Fn(&[ChatMessage]) -> Result<String, LlmError> + Send + Sync;

/// Answers every call through a closure and counts how often it was asked.
pub struct MockBackend {
    responder: Box<Responder>,
    calls: AtomicUsize,
}

impl MockBackend {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[ChatMessage]) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always returns the same text.
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Returns the scripted results in order, then reports empty content.
    pub fn sequence(results: Vec<Result<String, LlmError>>) -> Self {
        let queue = Mutex::new(VecDeque::from(results));
        Self::new(move |_| {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        })
    }

    /// Picks the reply whose marker appears in the system prompt.
    /// Unmatched calls are rejected so a missing route fails loudly.
    pub fn routed(routes: Vec<(&'static str, String)>) -> Self {
        Self::new(move |messages| {
            let system = messages.first().map(|m| m.content.as_str()).unwrap_or("");
            routes
                .iter()
                .find(|(marker, _)| system.contains(marker))
                .map(|(_, reply)| Ok(reply.clone()))
                .unwrap_or_else(|| {
                    Err(LlmError::Rejected {
                        status: 400,
                        message: "no scripted reply for this prompt".to_string(),
                    })
                })
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.responder)(messages)
    }
}

/// A client over `backend` with the production retry policy.
pub fn client(backend: Arc<MockBackend>) -> Arc<CompletionClient> {
    Arc::new(CompletionClient::new(backend, RetryPolicy::default()))
}
