use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::assignment::Assignment;
use super::candidate::CandidateProfile;
use super::feedback::CandidateFeedback;
use super::jd::JdSpec;
use super::role::RoleContext;
use super::scores::{ExecutionFitScore, FounderConfidenceScore, RelevanceScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Yes")]
    StrongYes,
    Yes,
    Maybe,
    #[serde(rename = "Not Now")]
    NotNow,
}

impl Recommendation {
    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::StrongYes => "Strong Yes",
            Recommendation::Yes => "Yes",
            Recommendation::Maybe => "Maybe",
            Recommendation::NotNow => "Not Now",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reviewer-facing evaluation. Carries every score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalVerdict {
    pub candidate_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume_link: String,
    pub resume_hash: String,
    pub execution_fit: ExecutionFitScore,
    pub founder_confidence: FounderConfidenceScore,
    pub relevance: RelevanceScore,
    pub role_context: RoleContext,
    pub interview_focus_areas: Vec<String>,
    pub risk_notes: Vec<String>,
    pub assignment: Option<Assignment>,
    pub recommendation: Recommendation,
    pub timestamp: DateTime<Utc>,
}

/// Candidate-facing message. Has no numeric field by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalVerdict {
    pub feedback: CandidateFeedback,
    pub next_steps: Vec<String>,
}

/// Everything produced for one resume.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    pub candidate: CandidateProfile,
    pub jd_spec: JdSpec,
    pub execution_fit: ExecutionFitScore,
    pub founder_confidence: FounderConfidenceScore,
    pub relevance: RelevanceScore,
    pub resume_feedback: CandidateFeedback,
    pub assignment: Option<Assignment>,
    pub assignment_feedback: Option<CandidateFeedback>,
    pub internal_verdict: InternalVerdict,
    pub external_verdict: ExternalVerdict,
}

/// One flattened verdict as stored in the verdict table and served by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct VerdictRow {
    pub recorded_at: DateTime<Utc>,
    pub candidate_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume_link: String,
    pub execution_fit: f64,
    pub founder_confidence: f64,
    pub relevance: f64,
    pub role_context: String,
    pub interview_focus_areas: String,
    pub risk_notes: String,
    pub assignment_title: Option<String>,
    pub recommendation: String,
    pub resume_feedback: String,
    pub assignment_feedback: Option<String>,
}

/// Scores are kept to one decimal place in the flattened row.
fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl VerdictRow {
    pub fn from_verdict(
        verdict: &InternalVerdict,
        resume_feedback: &CandidateFeedback,
        assignment_feedback: Option<&CandidateFeedback>,
    ) -> Self {
        Self {
            recorded_at: verdict.timestamp,
            candidate_name: verdict.candidate_name.clone(),
            email: verdict.email.clone(),
            phone: verdict.phone.clone(),
            resume_link: verdict.resume_link.clone(),
            execution_fit: one_decimal(verdict.execution_fit.score),
            founder_confidence: one_decimal(verdict.founder_confidence.score),
            relevance: one_decimal(verdict.relevance.score),
            role_context: verdict.role_context.label().to_string(),
            interview_focus_areas: verdict.interview_focus_areas.join("; "),
            risk_notes: verdict.risk_notes.join("; "),
            assignment_title: verdict.assignment.as_ref().map(|a| a.title.clone()),
            recommendation: verdict.recommendation.to_string(),
            resume_feedback: resume_feedback.format_plain(),
            assignment_feedback: assignment_feedback.map(CandidateFeedback::format_plain),
        }
    }
}
