//! Campaign documents stored in S3 / MinIO.
//!
//! Layout: `<prefix><campaign>/jd/<file>` and `<prefix><campaign>/resumes/<file>`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::types::Object;
use aws_sdk_s3::Client as S3Client;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::pdf::{extract_text, is_supported};
use crate::workflow::collaborators::{
    content_hash, DocumentSource, IdempotencyStore, JobDescriptionDocument, ResumeDocument,
    ResumeIdentity,
};

pub struct S3DocumentSource {
    client: S3Client,
    bucket: String,
    prefix: String,
    processed: Option<Arc<dyn IdempotencyStore>>,
    /// Content hash per `key#etag`, so an unchanged object is downloaded once.
    known_hashes: Mutex<HashMap<String, String>>,
}

impl S3DocumentSource {
    pub fn new(client: S3Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
            processed: None,
            known_hashes: Mutex::new(HashMap::new()),
        }
    }

    /// Resumes already marked in `store` are left out of the listing once
    /// their hash is known, without downloading them again.
    pub fn with_processed_index(mut self, store: Arc<dyn IdempotencyStore>) -> Self {
        self.processed = Some(store);
        self
    }

    fn link(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }

    /// All objects under `prefix`, following continuation tokens.
    async fn list_objects(&self, prefix: &str) -> Result<Vec<Object>> {
        let mut objects = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let resp = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(token.take())
                .send()
                .await
                .map_err(|e| anyhow!("S3 list failed for {prefix}: {e}"))?;

            objects.extend(resp.contents().iter().cloned());

            match resp.next_continuation_token() {
                Some(next) if resp.is_truncated().unwrap_or(false) => token = Some(next.to_string()),
                _ => break,
            }
        }
        Ok(objects)
    }

    async fn download(&self, key: &str) -> Result<bytes::Bytes> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| anyhow!("S3 download failed for {key}: {e}"))?;
        let body = resp
            .body
            .collect()
            .await
            .with_context(|| format!("Reading body of {key}"))?;
        Ok(body.into_bytes())
    }

    /// Readable documents under `folder`, oldest first.
    async fn documents(&self, campaign: &str, folder: &str) -> Result<Vec<Object>> {
        let prefix = format!("{}{}/{}/", self.prefix, campaign, folder);
        let mut objects: Vec<Object> = self
            .list_objects(&prefix)
            .await?
            .into_iter()
            .filter(|o| o.key().is_some_and(is_supported))
            .collect();
        objects.sort_by_key(|o| (modified_at(o), o.key().unwrap_or_default().to_string()));
        Ok(objects)
    }
}

impl S3DocumentSource {
    /// Downloads and extracts one resume. `Ok(None)` means it is known to be processed.
    async fn fetch_resume(
        &self,
        campaign: &str,
        key: String,
        etag: Option<String>,
    ) -> Result<Option<ResumeDocument>> {
        let cache_key = hash_cache_key(&key, etag.as_deref());

        if let (Some(store), Some(cache_key)) = (&self.processed, &cache_key) {
            let known = self.known_hashes.lock().await.get(cache_key).cloned();
            if let Some(hash) = known {
                let identity = ResumeIdentity {
                    campaign: campaign.to_string(),
                    content_hash: hash,
                };
                let processed = store
                    .is_processed(&identity)
                    .await
                    .with_context(|| format!("Checking whether {key} was processed"))?;
                if processed {
                    debug!("[{}] {} unchanged and already processed", campaign, key);
                    return Ok(None);
                }
            }
        }

        let bytes = self.download(&key).await?;
        let hash = content_hash(&bytes);
        if let Some(cache_key) = cache_key {
            self.known_hashes.lock().await.insert(cache_key, hash.clone());
        }

        // An unreadable file still flows through so the orchestrator can
        // report it as an empty document.
        let text = match extract_text(file_name(&key), bytes).await {
            Ok(text) => text,
            Err(e) => {
                warn!("[{}] Could not extract text from {}: {:#}", campaign, key, e);
                String::new()
            }
        };

        Ok(Some(ResumeDocument {
            id: key.clone(),
            file_name: file_name(&key).to_string(),
            link: self.link(&key),
            text,
            content_hash: hash,
        }))
    }
}

fn hash_cache_key(key: &str, etag: Option<&str>) -> Option<String> {
    etag.filter(|e| !e.is_empty()).map(|e| format!("{key}#{e}"))
}

/// Fetches each item in order. A failed item is logged and left for the next
/// tick; the rest of the campaign still goes through.
async fn gather_resumes<I, F, Fut>(campaign: &str, items: Vec<I>, mut fetch: F) -> Vec<ResumeDocument>
where
    F: FnMut(I) -> Fut,
    Fut: Future<Output = Result<Option<ResumeDocument>>>,
{
    let mut resumes = Vec::with_capacity(items.len());
    for item in items {
        match fetch(item).await {
            Ok(Some(resume)) => resumes.push(resume),
            Ok(None) => {}
            Err(e) => warn!("[{}] Skipping resume this tick: {:#}", campaign, e),
        }
    }
    resumes
}

fn modified_at(object: &Object) -> (i64, u32) {
    object
        .last_modified()
        .map(|t| (t.secs(), t.subsec_nanos()))
        .unwrap_or_default()
}

/// Campaign id from a common prefix such as `campaigns/ledger-backend/`.
pub fn campaign_from_prefix(root: &str, common_prefix: &str) -> Option<String> {
    let campaign = common_prefix.strip_prefix(root)?.trim_end_matches('/');
    (!campaign.is_empty()).then(|| campaign.to_string())
}

fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

#[async_trait]
impl DocumentSource for S3DocumentSource {
    async fn list_campaigns(&self) -> Result<Vec<String>> {
        let mut campaigns = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let resp = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(&self.prefix)
                .delimiter("/")
                .set_continuation_token(token.take())
                .send()
                .await
                .map_err(|e| anyhow!("S3 campaign listing failed: {e}"))?;

            campaigns.extend(
                resp.common_prefixes()
                    .iter()
                    .filter_map(|p| p.prefix())
                    .filter_map(|p| campaign_from_prefix(&self.prefix, p)),
            );

            match resp.next_continuation_token() {
                Some(next) if resp.is_truncated().unwrap_or(false) => token = Some(next.to_string()),
                _ => break,
            }
        }

        debug!("Found {} campaigns under s3://{}/{}", campaigns.len(), self.bucket, self.prefix);
        Ok(campaigns)
    }

    async fn job_description(&self, campaign: &str) -> Result<Option<JobDescriptionDocument>> {
        let Some(latest) = self.documents(campaign, "jd").await?.pop() else {
            return Ok(None);
        };
        let key = latest.key().unwrap_or_default();

        let bytes = self.download(key).await?;
        let text = extract_text(file_name(key), bytes).await?;
        Ok(Some(JobDescriptionDocument::new(self.link(key), text)))
    }

    async fn list_unprocessed_resumes(&self, campaign: &str) -> Result<Vec<ResumeDocument>> {
        let items: Vec<(String, Option<String>)> = self
            .documents(campaign, "resumes")
            .await?
            .iter()
            .map(|o| {
                (
                    o.key().unwrap_or_default().to_string(),
                    o.e_tag().map(str::to_string),
                )
            })
            .collect();

        Ok(gather_resumes(campaign, items, |(key, etag)| {
            self.fetch_resume(campaign, key, etag)
        })
        .await)
    }
}
