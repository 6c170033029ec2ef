//! Seams between the orchestrator and the outside world.
//!
//! Production adapters live in `crate::integrations`; tests use the in-memory
//! versions in `crate::testing::memory`.

use anyhow::Result;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::models::{CandidateFeedback, ExternalVerdict, InternalVerdict};

/// Lowercase hex SHA-256 of a document's bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobDescriptionDocument {
    pub link: String,
    pub text: String,
    pub content_hash: String,
}

impl JobDescriptionDocument {
    pub fn new(link: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            link: link.into(),
            content_hash: content_hash(text.as_bytes()),
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeDocument {
    pub id: String,
    pub file_name: String,
    pub link: String,
    /// Extracted text. May be blank when extraction found nothing.
    pub text: String,
    /// Hash of the stored bytes, not of the extracted text.
    pub content_hash: String,
}

/// A resume is identified by its campaign and content, not its file name,
/// so a re-uploaded copy is still recognised.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResumeIdentity {
    pub campaign: String,
    pub content_hash: String,
}

impl ResumeIdentity {
    pub fn new(campaign: &str, resume: &ResumeDocument) -> Self {
        Self {
            campaign: campaign.to_string(),
            content_hash: resume.content_hash.clone(),
        }
    }
}

#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn list_campaigns(&self) -> Result<Vec<String>>;

    /// The campaign's current job description, if one has been uploaded.
    async fn job_description(&self, campaign: &str) -> Result<Option<JobDescriptionDocument>>;

    /// Resumes in discovery order. May include already-processed ones; the
    /// orchestrator filters them through the idempotency store.
    async fn list_unprocessed_resumes(&self, campaign: &str) -> Result<Vec<ResumeDocument>>;
}

#[async_trait]
pub trait IdempotencyStore: Send + Sync {
    async fn is_processed(&self, identity: &ResumeIdentity) -> Result<bool>;

    async fn mark_processed(&self, identity: &ResumeIdentity) -> Result<()>;
}

#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Appends one verdict row. Appending the same resume twice must not
    /// produce a second row.
    async fn append_verdict(
        &self,
        campaign: &str,
        verdict: &InternalVerdict,
        resume_feedback: &CandidateFeedback,
        assignment_feedback: Option<&CandidateFeedback>,
    ) -> Result<()>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_reviewer(&self, verdict: &InternalVerdict) -> Result<()>;

    async fn notify_candidate(&self, email: &str, name: &str, verdict: &ExternalVerdict) -> Result<()>;
}
