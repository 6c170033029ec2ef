//! In-memory collaborators with switchable failures.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::models::{CandidateFeedback, ExternalVerdict, InternalVerdict, VerdictRow};
use crate::workflow::collaborators::{
    DocumentSource, IdempotencyStore, JobDescriptionDocument, Notifier, ResultSink,
    ResumeDocument, ResumeIdentity,
};

#[derive(Default)]
struct CampaignDocs {
    jd: Option<JobDescriptionDocument>,
    resumes: Vec<ResumeDocument>,
}

#[derive(Default)]
pub struct MemorySource {
    campaigns: Mutex<BTreeMap<String, CampaignDocs>>,
}

impl MemorySource {
    pub fn set_job_description(&self, campaign: &str, text: &str) {
        let mut campaigns = self.campaigns.lock().unwrap();
        campaigns.entry(campaign.to_string()).or_default().jd =
            Some(JobDescriptionDocument::new(format!("mem://{campaign}/jd.txt"), text));
    }

    pub fn add_resume(&self, campaign: &str, resume: ResumeDocument) {
        let mut campaigns = self.campaigns.lock().unwrap();
        campaigns
            .entry(campaign.to_string())
            .or_default()
            .resumes
            .push(resume);
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn list_campaigns(&self) -> Result<Vec<String>> {
        Ok(self.campaigns.lock().unwrap().keys().cloned().collect())
    }

    async fn job_description(&self, campaign: &str) -> Result<Option<JobDescriptionDocument>> {
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .get(campaign)
            .and_then(|docs| docs.jd.clone()))
    }

    async fn list_unprocessed_resumes(&self, campaign: &str) -> Result<Vec<ResumeDocument>> {
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .get(campaign)
            .map(|docs| docs.resumes.clone())
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    processed: Mutex<HashSet<ResumeIdentity>>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.processed.lock().unwrap().len()
    }
}

#[async_trait]
impl IdempotencyStore for MemoryStore {
    async fn is_processed(&self, identity: &ResumeIdentity) -> Result<bool> {
        Ok(self.processed.lock().unwrap().contains(identity))
    }

    async fn mark_processed(&self, identity: &ResumeIdentity) -> Result<()> {
        self.processed.lock().unwrap().insert(identity.clone());
        Ok(())
    }
}

/// Keeps rows keyed by (campaign, resume hash) like the verdict table does.
#[derive(Default)]
pub struct MemorySink {
    rows: Mutex<Vec<(String, String, VerdictRow)>>,
    failing: AtomicBool,
}

impl MemorySink {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<VerdictRow> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, row)| row.clone())
            .collect()
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn append_verdict(
        &self,
        campaign: &str,
        verdict: &InternalVerdict,
        resume_feedback: &CandidateFeedback,
        assignment_feedback: Option<&CandidateFeedback>,
    ) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("verdict table unavailable");
        }
        let mut rows = self.rows.lock().unwrap();
        let duplicate = rows
            .iter()
            .any(|(c, hash, _)| c == campaign && *hash == verdict.resume_hash);
        if !duplicate {
            rows.push((
                campaign.to_string(),
                verdict.resume_hash.clone(),
                VerdictRow::from_verdict(verdict, resume_feedback, assignment_feedback),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Reviewer { candidate: String },
    Candidate { email: String, next_steps: Vec<String> },
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_reviewer(&self, verdict: &InternalVerdict) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("mail relay down");
        }
        self.sent.lock().unwrap().push(Notification::Reviewer {
            candidate: verdict.candidate_name.clone(),
        });
        Ok(())
    }

    async fn notify_candidate(&self, email: &str, _name: &str, verdict: &ExternalVerdict) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("mail relay down");
        }
        self.sent.lock().unwrap().push(Notification::Candidate {
            email: email.to_string(),
            next_steps: verdict.next_steps.clone(),
        });
        Ok(())
    }
}
