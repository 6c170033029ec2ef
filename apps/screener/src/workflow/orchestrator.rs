//! Per-campaign pipeline: JD once, then every new resume in discovery order.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::collaborators::{
    DocumentSource, IdempotencyStore, JobDescriptionDocument, Notifier, ResultSink,
    ResumeDocument, ResumeIdentity,
};
use crate::agents::candidate_feedback::FeedbackInput;
use crate::agents::{
    Agent, AssignmentGeneration, AssignmentInput, CandidateFeedbackGeneration, EvaluationInput,
    FounderConfidence, JdInput, JdReality, ResumeInput, ResumeStructuring, TechnicalChecking,
};
use crate::errors::PipelineError;
use crate::llm_client::CompletionClient;
use crate::models::{FeedbackStage, JdSpec, ProcessingResult};
use crate::synthesis::{RelevanceSynthesizer, VerdictSynthesizer};

// ─── JD cache ────────────────────────────────────────────────────────────────

struct CachedJd {
    content_hash: String,
    spec: JdSpec,
}

/// One slot per campaign. A slot is only valid for the JD content it was built from.
#[derive(Default)]
pub struct JdCache {
    slots: HashMap<String, CachedJd>,
}

impl JdCache {
    pub fn lookup(&self, campaign: &str, content_hash: &str) -> Option<&JdSpec> {
        self.slots
            .get(campaign)
            .filter(|slot| slot.content_hash == content_hash)
            .map(|slot| &slot.spec)
    }

    /// Replaces the campaign's slot.
    pub fn store(&mut self, campaign: &str, content_hash: &str, spec: JdSpec) -> &JdSpec {
        let slot = CachedJd {
            content_hash: content_hash.to_string(),
            spec,
        };
        self.slots.insert(campaign.to_string(), slot);
        &self.slots[campaign].spec
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

// ─── Wiring ──────────────────────────────────────────────────────────────────

/// The six agents, all sharing one completion client.
pub struct Agents {
    jd: Agent<JdReality>,
    resume: Agent<ResumeStructuring>,
    technical: Agent<TechnicalChecking>,
    founder: Agent<FounderConfidence>,
    assignment: Agent<AssignmentGeneration>,
    feedback: Agent<CandidateFeedbackGeneration>,
}

impl Agents {
    pub fn new(llm: Arc<CompletionClient>) -> Self {
        Self {
            jd: Agent::new(JdReality, llm.clone()),
            resume: Agent::new(ResumeStructuring, llm.clone()),
            technical: Agent::new(TechnicalChecking, llm.clone()),
            founder: Agent::new(FounderConfidence, llm.clone()),
            assignment: Agent::new(AssignmentGeneration, llm.clone()),
            feedback: Agent::new(CandidateFeedbackGeneration, llm),
        }
    }
}

#[derive(Clone)]
pub struct Collaborators {
    pub source: Arc<dyn DocumentSource>,
    pub store: Arc<dyn IdempotencyStore>,
    pub sink: Arc<dyn ResultSink>,
    pub notifier: Arc<dyn Notifier>,
}

#[derive(Debug)]
pub enum ResumeOutcome {
    Processed(Box<ProcessingResult>),
    /// Already in the idempotency store.
    Skipped,
    Failed(PipelineError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub campaigns: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failed_campaigns: usize,
}

impl TickSummary {
    fn record(&mut self, outcome: &ResumeOutcome) {
        match outcome {
            ResumeOutcome::Processed(_) => self.processed += 1,
            ResumeOutcome::Skipped => self.skipped += 1,
            ResumeOutcome::Failed(_) => self.failed += 1,
        }
    }
}

// ─── Orchestrator ────────────────────────────────────────────────────────────

pub struct WorkflowOrchestrator {
    agents: Agents,
    relevance: RelevanceSynthesizer,
    verdicts: VerdictSynthesizer,
    collaborators: Collaborators,
    jd_cache: JdCache,
}

impl WorkflowOrchestrator {
    pub fn new(
        llm: Arc<CompletionClient>,
        relevance: RelevanceSynthesizer,
        collaborators: Collaborators,
    ) -> Self {
        Self {
            agents: Agents::new(llm),
            relevance,
            verdicts: VerdictSynthesizer,
            collaborators,
            jd_cache: JdCache::default(),
        }
    }

    pub fn jd_cache(&self) -> &JdCache {
        &self.jd_cache
    }

    /// One polling pass over every campaign. Failures are logged and counted,
    /// never returned.
    pub async fn run_tick(&mut self) -> TickSummary {
        let mut summary = TickSummary::default();

        let campaigns = match self.collaborators.source.list_campaigns().await {
            Ok(campaigns) => campaigns,
            Err(e) => {
                error!("Could not list campaigns: {:#}", e);
                return summary;
            }
        };

        for campaign in campaigns {
            summary.campaigns += 1;
            match self.process_campaign(&campaign).await {
                Ok(outcomes) => outcomes.iter().for_each(|o| summary.record(o)),
                Err(e) => {
                    error!("[{}] Campaign skipped this tick: {}", campaign, e);
                    summary.failed_campaigns += 1;
                }
            }
        }

        info!(
            "Tick complete: {} campaigns, {} processed, {} skipped, {} failed",
            summary.campaigns, summary.processed, summary.skipped, summary.failed
        );
        summary
    }

    pub async fn process_campaign(
        &mut self,
        campaign: &str,
    ) -> Result<Vec<ResumeOutcome>, PipelineError> {
        let source = self.collaborators.source.clone();

        let Some(jd_doc) = source
            .job_description(campaign)
            .await
            .map_err(|e| PipelineError::Source(format!("{e:#}")))?
        else {
            info!("[{}] No job description yet, skipping", campaign);
            return Ok(Vec::new());
        };

        let jd = self.resolve_jd(campaign, &jd_doc).await?;

        let resumes = source
            .list_unprocessed_resumes(campaign)
            .await
            .map_err(|e| PipelineError::Source(format!("{e:#}")))?;
        debug!("[{}] {} resumes discovered", campaign, resumes.len());

        let mut outcomes = Vec::with_capacity(resumes.len());
        for resume in &resumes {
            outcomes.push(self.process_resume(campaign, &jd, resume).await);
        }
        Ok(outcomes)
    }

    /// Returns the cached spec when the JD is unchanged; otherwise analyzes it
    /// and generates the campaign's standard assignment.
    async fn resolve_jd(
        &mut self,
        campaign: &str,
        doc: &JobDescriptionDocument,
    ) -> Result<JdSpec, PipelineError> {
        if let Some(spec) = self.jd_cache.lookup(campaign, &doc.content_hash) {
            debug!("[{}] Using cached JD analysis", campaign);
            return Ok(spec.clone());
        }
        if doc.text.trim().is_empty() {
            return Err(PipelineError::EmptyDocument(doc.link.clone()));
        }

        info!("[{}] Analyzing job description {}", campaign, doc.link);
        let mut spec = self
            .agents
            .jd
            .execute(&JdInput {
                jd_text: &doc.text,
                content_hash: &doc.content_hash,
            })
            .await?
            .data;
        info!(
            "[{}] Role context: {} (criticality {:.2})",
            campaign, spec.role_context, spec.criticality_factor
        );

        match self.agents.assignment.execute(&AssignmentInput { jd: &spec }).await {
            Ok(result) => {
                info!("[{}] Standard assignment: {}", campaign, result.data.title);
                spec.standard_assignment = Some(result.data);
            }
            Err(e) => warn!("[{}] Standard assignment generation failed: {}", campaign, e),
        }

        Ok(self
            .jd_cache
            .store(campaign, &doc.content_hash, spec)
            .clone())
    }

    pub async fn process_resume(
        &self,
        campaign: &str,
        jd: &JdSpec,
        resume: &ResumeDocument,
    ) -> ResumeOutcome {
        let identity = ResumeIdentity::new(campaign, resume);

        match self.collaborators.store.is_processed(&identity).await {
            Ok(true) => {
                info!("[{}] Skipping {}: already processed", campaign, resume.file_name);
                return ResumeOutcome::Skipped;
            }
            Ok(false) => {}
            Err(e) => {
                error!("[{}] Idempotency check failed for {}: {:#}", campaign, resume.file_name, e);
                return ResumeOutcome::Failed(PipelineError::Idempotency(format!("{e:#}")));
            }
        }

        info!("[{}] Processing resume {}", campaign, resume.file_name);
        match self.run_pipeline(campaign, jd, resume, &identity).await {
            Ok(result) => {
                info!(
                    "[{}] Completed {}: {}",
                    campaign, result.candidate.name, result.internal_verdict.recommendation
                );
                ResumeOutcome::Processed(Box::new(result))
            }
            Err(e) => {
                error!("[{}] Abandoned {}: {}", campaign, resume.file_name, e);
                ResumeOutcome::Failed(e)
            }
        }
    }

    /// Evaluate, then persist, mark processed and notify, in that order.
    async fn run_pipeline(
        &self,
        campaign: &str,
        jd: &JdSpec,
        resume: &ResumeDocument,
        identity: &ResumeIdentity,
    ) -> Result<ProcessingResult, PipelineError> {
        let result = self.evaluate(jd, resume).await?;

        self.collaborators
            .sink
            .append_verdict(
                campaign,
                &result.internal_verdict,
                &result.resume_feedback,
                result.assignment_feedback.as_ref(),
            )
            .await
            .map_err(|e| PipelineError::Persistence(format!("{e:#}")))?;

        self.collaborators
            .store
            .mark_processed(identity)
            .await
            .map_err(|e| PipelineError::Idempotency(format!("{e:#}")))?;

        self.notify(&result).await;
        Ok(result)
    }

    /// The pure part of the pipeline: completion calls and synthesis, no side effects.
    async fn evaluate(
        &self,
        jd: &JdSpec,
        resume: &ResumeDocument,
    ) -> Result<ProcessingResult, PipelineError> {
        if resume.text.trim().is_empty() {
            return Err(PipelineError::EmptyDocument(resume.file_name.clone()));
        }

        let candidate = self
            .agents
            .resume
            .execute(&ResumeInput {
                resume_text: &resume.text,
                resume_link: &resume.link,
                resume_hash: &resume.content_hash,
            })
            .await?
            .data;
        info!(
            "  Candidate: {} ({})",
            candidate.name,
            candidate.email.as_deref().unwrap_or("no email")
        );

        let evaluation = EvaluationInput {
            candidate: &candidate,
            jd,
        };
        let execution_fit = self.agents.technical.execute(&evaluation).await?.data;
        info!("  Execution Fit: {:.1}/100", execution_fit.score);

        let founder_confidence = self.agents.founder.execute(&evaluation).await?.data;
        info!("  Founder Confidence: {:.1}/100", founder_confidence.score);

        let relevance = self.relevance.synthesize(
            &execution_fit,
            &founder_confidence,
            jd.criticality_factor,
            jd.role_context,
        );
        info!(
            "  Relevance: {:.1}/100 (passed: {})",
            relevance.score, relevance.passed_threshold
        );

        let resume_feedback = self
            .agents
            .feedback
            .execute(&FeedbackInput {
                candidate: &candidate,
                jd,
                execution_fit: &execution_fit,
                founder_confidence: &founder_confidence,
                stage: FeedbackStage::Resume,
                passed_threshold: relevance.passed_threshold,
                assignment_observations: None,
            })
            .await?
            .data;

        let assignment = jd.standard_assignment.clone();
        if assignment.is_none() {
            debug!("  No standard assignment available");
        }

        let internal_verdict = self.verdicts.internal_verdict(
            &candidate,
            jd,
            &execution_fit,
            &founder_confidence,
            &relevance,
            assignment.as_ref(),
        );
        let external_verdict = self.verdicts.external_verdict(&resume_feedback, &relevance);

        Ok(ProcessingResult {
            candidate,
            jd_spec: jd.clone(),
            execution_fit,
            founder_confidence,
            relevance,
            resume_feedback,
            assignment,
            assignment_feedback: None,
            internal_verdict,
            external_verdict,
        })
    }

    /// Best effort. The verdict is already durable when this runs.
    async fn notify(&self, result: &ProcessingResult) {
        let notifier = &self.collaborators.notifier;

        if let Err(e) = notifier.notify_reviewer(&result.internal_verdict).await {
            warn!("Reviewer notification failed for {}: {:#}", result.candidate.name, e);
        }

        if let Some(email) = &result.candidate.email {
            if let Err(e) = notifier
                .notify_candidate(email, &result.candidate.name, &result.external_verdict)
                .await
            {
                warn!("Candidate notification failed for {}: {:#}", email, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::{self, MockBackend};
    use crate::models::Recommendation;
    use crate::testing::fixtures;
    use crate::testing::memory::{
        MemorySink, MemorySource, MemoryStore, Notification, RecordingNotifier,
    };

    const CAMPAIGN: &str = "ledger-backend";

    const JD_REPLY: &str = r#"{
        "coreWork": "Build and operate the payments ledger backend",
        "nonNegotiableSkills": ["Rust", "Postgres", "Kafka"],
        "ownershipLevel": "High",
        "ambiguityLevel": "Medium",
        "pressureLevel": "Medium",
        "expectedRoleDuration": "Long-term",
        "roleContext": "Stable_Long_Term",
        "criticalityFactor": 0.85
    }"#;

    const RESUME_REPLY: &str = r#"{
        "name": "Jordan Lee",
        "workExperience": [{
            "company": "Acme",
            "title": "Senior Engineer",
            "duration": "Jan 2020 - Present",
            "responsibilities": ["Owned the ledger service"]
        }],
        "projects": [],
        "skills": [{"name": "Rust", "confidence": "High", "yearsOfExperience": 4}],
        "education": []
    }"#;

    const TECHNICAL_REPLY: &str = r#"{"S": 0.8, "D": 0.7, "W": 0.6, "R": 0.1,
        "justifications": {"riskPenalty": "No notable risks in the history"}}"#;

    const FOUNDER_REPLY: &str = r#"{"O": 0.5, "L": 0.9, "P": 0.4, "G": 0.6,
        "justifications": {"longevity": "Long tenure at Acme"}}"#;

    const ASSIGNMENT_REPLY: &str = r#"{"title": "Idempotent payment ingestion",
        "objective": "Ingest payment events exactly once", "timeboxHours": 4}"#;

    const FEEDBACK_REPLY: &str = r#"{
        "strengths": ["Clear ownership of the ledger service"],
        "gaps": ["Limited detail on Kafka operations", "Scored 40% on depth"],
        "recommendations": ["Describe a Kafka incident you handled"]
    }"#;

    fn routes() -> Vec<(&'static str, String)> {
        vec![
            ("You are a hiring analyst", JD_REPLY.to_string()),
            ("You are a resume parser", RESUME_REPLY.to_string()),
            ("You are a technical evaluator", TECHNICAL_REPLY.to_string()),
            ("You are a talent evaluator", FOUNDER_REPLY.to_string()),
            ("You design take-home assignments", ASSIGNMENT_REPLY.to_string()),
            ("You write constructive, respectful feedback", FEEDBACK_REPLY.to_string()),
        ]
    }

    const RESUME_TEXT: &str = "Jordan Lee\njordan.lee@example.com\n+1 415 555 0134\n\
        Senior Engineer, Acme, Jan 2020 - Present";

    struct Harness {
        backend: Arc<MockBackend>,
        source: Arc<MemorySource>,
        store: Arc<MemoryStore>,
        sink: Arc<MemorySink>,
        notifier: Arc<RecordingNotifier>,
        orchestrator: WorkflowOrchestrator,
    }

    fn harness(backend: MockBackend) -> Harness {
        let backend = Arc::new(backend);
        let source = Arc::new(MemorySource::default());
        let store = Arc::new(MemoryStore::default());
        let sink = Arc::new(MemorySink::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let orchestrator = WorkflowOrchestrator::new(
            mock::client(backend.clone()),
            RelevanceSynthesizer::default(),
            Collaborators {
                source: source.clone(),
                store: store.clone(),
                sink: sink.clone(),
                notifier: notifier.clone(),
            },
        );

        Harness {
            backend,
            source,
            store,
            sink,
            notifier,
            orchestrator,
        }
    }

    fn reviewer_notifications(h: &Harness) -> usize {
        h.notifier
            .sent()
            .iter()
            .filter(|n| matches!(n, Notification::Reviewer { .. }))
            .count()
    }

    #[test]
    fn test_jd_cache_replaces_slot_on_new_hash() {
        let mut cache = JdCache::default();
        let spec = fixtures::jd_spec();

        assert!(cache.lookup("a", "h1").is_none());
        cache.store("a", "h1", spec.clone());
        assert!(cache.lookup("a", "h1").is_some());
        assert!(cache.lookup("a", "h2").is_none());
        assert!(cache.lookup("b", "h1").is_none());

        cache.store("a", "h2", spec);
        assert!(cache.lookup("a", "h1").is_none());
        assert!(cache.lookup("a", "h2").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let mut h = harness(MockBackend::routed(routes()));
        h.source.set_job_description(CAMPAIGN, fixtures::JD_TEXT);
        h.source
            .add_resume(CAMPAIGN, fixtures::resume_document("jordan", RESUME_TEXT));

        let outcomes = h.orchestrator.process_campaign(CAMPAIGN).await.unwrap();
        assert_eq!(outcomes.len(), 1);
        let ResumeOutcome::Processed(result) = &outcomes[0] else {
            panic!("expected a processed resume, got {:?}", outcomes[0]);
        };

        assert!((result.execution_fit.score - 63.0).abs() < 1e-9);
        assert!((result.founder_confidence.score - 67.0).abs() < 1e-9);
        assert!((result.relevance.score - 54.91).abs() < 1e-9);
        assert!(!result.relevance.passed_threshold);
        assert_eq!(result.internal_verdict.recommendation, Recommendation::Maybe);
        assert_eq!(
            result.candidate.email.as_deref(),
            Some("jordan.lee@example.com")
        );
        assert_eq!(
            result.assignment.as_ref().map(|a| a.title.as_str()),
            Some("Idempotent payment ingestion")
        );
        assert_eq!(result.resume_feedback.gaps.len(), 1);

        let rows = h.sink.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].relevance, 54.9);
        assert_eq!(rows[0].recommendation, "Maybe");
        assert_eq!(h.store.len(), 1);
        assert_eq!(
            h.notifier.sent(),
            vec![
                Notification::Reviewer {
                    candidate: "Jordan Lee".to_string()
                },
                Notification::Candidate {
                    email: "jordan.lee@example.com".to_string(),
                    next_steps: crate::synthesis::verdict::next_steps(FeedbackStage::Resume, false),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_same_resume_twice_is_processed_once() {
        let mut h = harness(MockBackend::routed(routes()));
        h.source.set_job_description(CAMPAIGN, fixtures::JD_TEXT);
        h.source
            .add_resume(CAMPAIGN, fixtures::resume_document("jordan", RESUME_TEXT));
        // Same bytes under another file name.
        h.source
            .add_resume(CAMPAIGN, fixtures::resume_document("jordan-copy", RESUME_TEXT));

        let first = h.orchestrator.run_tick().await;
        let second = h.orchestrator.run_tick().await;

        assert_eq!(first.processed, 1);
        assert_eq!(first.skipped, 1);
        assert_eq!(second.processed, 0);
        assert_eq!(second.skipped, 2);
        assert_eq!(h.sink.rows().len(), 1);
        assert_eq!(reviewer_notifications(&h), 1);
    }

    #[tokio::test]
    async fn test_jd_is_analyzed_once_per_content() {
        let mut h = harness(MockBackend::routed(routes()));
        h.source.set_job_description(CAMPAIGN, fixtures::JD_TEXT);

        h.orchestrator.run_tick().await;
        // JD analysis + assignment generation
        assert_eq!(h.backend.calls(), 2);

        h.orchestrator.run_tick().await;
        assert_eq!(h.backend.calls(), 2);

        h.source
            .set_job_description(CAMPAIGN, "Staff engineer for the payments ledger.");
        h.orchestrator.run_tick().await;
        assert_eq!(h.backend.calls(), 4);
        assert_eq!(h.orchestrator.jd_cache().len(), 1);
    }

    #[tokio::test]
    async fn test_assignment_failure_still_caches_jd() {
        let mut routes = routes();
        routes.retain(|(marker, _)| !marker.starts_with("You design"));
        let mut h = harness(MockBackend::routed(routes));
        h.source.set_job_description(CAMPAIGN, fixtures::JD_TEXT);
        h.source
            .add_resume(CAMPAIGN, fixtures::resume_document("jordan", RESUME_TEXT));

        let outcomes = h.orchestrator.process_campaign(CAMPAIGN).await.unwrap();

        let ResumeOutcome::Processed(result) = &outcomes[0] else {
            panic!("expected a processed resume");
        };
        assert!(result.assignment.is_none());
        assert!(h.sink.rows()[0].assignment_title.is_none());
        assert_eq!(h.orchestrator.jd_cache().len(), 1);
    }

    #[tokio::test]
    async fn test_notifier_failure_keeps_verdict() {
        let mut h = harness(MockBackend::routed(routes()));
        h.notifier.set_failing(true);
        h.source.set_job_description(CAMPAIGN, fixtures::JD_TEXT);
        h.source
            .add_resume(CAMPAIGN, fixtures::resume_document("jordan", RESUME_TEXT));

        let summary = h.orchestrator.run_tick().await;

        assert_eq!(summary.processed, 1);
        assert_eq!(h.sink.rows().len(), 1);
        assert_eq!(h.store.len(), 1);
        assert!(h.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_leaves_resume_for_next_tick() {
        let mut h = harness(MockBackend::routed(routes()));
        h.sink.set_failing(true);
        h.source.set_job_description(CAMPAIGN, fixtures::JD_TEXT);
        h.source
            .add_resume(CAMPAIGN, fixtures::resume_document("jordan", RESUME_TEXT));

        let first = h.orchestrator.run_tick().await;
        assert_eq!(first.failed, 1);
        assert_eq!(h.store.len(), 0);
        assert!(h.notifier.sent().is_empty());

        h.sink.set_failing(false);
        let second = h.orchestrator.run_tick().await;
        assert_eq!(second.processed, 1);
        assert_eq!(h.sink.rows().len(), 1);
        assert_eq!(reviewer_notifications(&h), 1);
    }

    #[tokio::test]
    async fn test_empty_resume_is_abandoned_without_model_calls() {
        let mut h = harness(MockBackend::routed(routes()));
        h.source.set_job_description(CAMPAIGN, fixtures::JD_TEXT);
        h.source
            .add_resume(CAMPAIGN, fixtures::resume_document("blank", "   \n"));

        let outcomes = h.orchestrator.process_campaign(CAMPAIGN).await.unwrap();

        assert!(matches!(
            outcomes[0],
            ResumeOutcome::Failed(PipelineError::EmptyDocument(_))
        ));
        // JD analysis + assignment only
        assert_eq!(h.backend.calls(), 2);
        assert!(h.sink.rows().is_empty());
    }

    #[tokio::test]
    async fn test_one_bad_resume_does_not_stop_the_rest() {
        let mut h = harness(MockBackend::routed(routes()));
        h.source.set_job_description(CAMPAIGN, fixtures::JD_TEXT);
        h.source.add_resume(CAMPAIGN, fixtures::resume_document("blank", ""));
        h.source
            .add_resume(CAMPAIGN, fixtures::resume_document("jordan", RESUME_TEXT));

        let summary = h.orchestrator.run_tick().await;

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.processed, 1);
    }

    #[tokio::test]
    async fn test_campaign_without_jd_is_skipped() {
        let mut h = harness(MockBackend::routed(routes()));
        h.source
            .add_resume(CAMPAIGN, fixtures::resume_document("jordan", RESUME_TEXT));

        let summary = h.orchestrator.run_tick().await;

        assert_eq!(summary.campaigns, 1);
        assert_eq!(summary.processed, 0);
        assert_eq!(h.backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_unparseable_scoring_abandons_resume() {
        let mut routes = routes();
        for route in routes.iter_mut() {
            if route.0 == "You are a technical evaluator" {
                route.1 = "I cannot evaluate this candidate.".to_string();
            }
        }
        let mut h = harness(MockBackend::routed(routes));
        h.source.set_job_description(CAMPAIGN, fixtures::JD_TEXT);
        h.source
            .add_resume(CAMPAIGN, fixtures::resume_document("jordan", RESUME_TEXT));

        let outcomes = h.orchestrator.process_campaign(CAMPAIGN).await.unwrap();

        assert!(matches!(
            outcomes[0],
            ResumeOutcome::Failed(PipelineError::UnparseableResponse {
                agent: "Technical Checking Agent",
                ..
            })
        ));
        assert_eq!(h.store.len(), 0);
    }
}
