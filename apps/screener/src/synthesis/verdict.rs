//! Turns scores into the reviewer verdict and the candidate-facing message.

use chrono::{DateTime, NaiveDate, Utc};

use super::tenure::is_short_tenure;
use crate::models::{
    AmbiguityLevel, Assignment, CandidateFeedback, CandidateProfile, ExecutionFitScore,
    ExternalVerdict, FeedbackStage, FounderConfidenceScore, IntensityLevel, InternalVerdict,
    JdSpec, Recommendation, RelevanceScore,
};

const MAX_FOCUS_AREAS: usize = 5;
const MAX_RISK_NOTES: usize = 5;

pub fn recommendation_for(relevance: f64) -> Recommendation {
    if relevance >= 80.0 {
        Recommendation::StrongYes
    } else if relevance >= 65.0 {
        Recommendation::Yes
    } else if relevance >= 50.0 {
        Recommendation::Maybe
    } else {
        Recommendation::NotNow
    }
}

/// What the interviewer should probe, most important first.
pub fn interview_focus_areas(
    execution_fit: &ExecutionFitScore,
    founder_confidence: &FounderConfidenceScore,
    jd: &JdSpec,
) -> Vec<String> {
    let tech = &execution_fit.metrics;
    let behavior = &founder_confidence.metrics;
    let mut areas = Vec::new();

    if tech.s < 0.7 {
        let skills: Vec<&str> = jd
            .non_negotiable_skills
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        areas.push(format!("Verify depth in: {}", skills.join(", ")));
    }
    if tech.d < 0.6 {
        areas.push("Probe technical depth with real-world scenarios".to_string());
    }
    if tech.w < 0.6 {
        areas.push("Explore transferable experience from different domains".to_string());
    }
    if behavior.o < 0.6 {
        areas.push("Assess ownership mindset with past examples of initiative".to_string());
    }
    if behavior.p < 0.6 && jd.pressure_level != IntensityLevel::Low {
        areas.push("Explore how they handled high-pressure situations".to_string());
    }
    if behavior.l < 0.6 {
        areas.push("Discuss career goals and commitment expectations".to_string());
    }
    if behavior.g < 0.6 {
        areas.push("Understand their learning approach and growth mindset".to_string());
    }
    if jd.ambiguity_level == AmbiguityLevel::High {
        areas.push("Test comfort with ambiguity and unstructured problems".to_string());
    }
    if jd.ownership_level == IntensityLevel::VeryHigh {
        areas.push("Discuss experience driving projects end-to-end".to_string());
    }

    areas.truncate(MAX_FOCUS_AREAS);
    areas
}

pub fn risk_notes(
    execution_fit: &ExecutionFitScore,
    founder_confidence: &FounderConfidenceScore,
    candidate: &CandidateProfile,
    today: NaiveDate,
) -> Vec<String> {
    let mut risks = Vec::new();

    if execution_fit.metrics.r >= 0.4 {
        risks.push(execution_fit.metrics.justifications.risk_penalty.clone());
    }
    if candidate.work_experience.is_empty() {
        risks.push("No prior work experience listed".to_string());
    }

    let short_stints = candidate
        .work_experience
        .iter()
        .filter(|exp| is_short_tenure(&exp.duration, today))
        .count();
    if short_stints >= 2 {
        risks.push(format!(
            "Multiple short-term roles ({short_stints} positions < 1 year)"
        ));
    }

    if founder_confidence.metrics.l < 0.4 {
        risks.push(founder_confidence.metrics.justifications.longevity.clone());
    }
    if candidate.email.is_none() {
        risks.push("No email address found in resume".to_string());
    }

    risks.retain(|note| !note.trim().is_empty());
    risks.truncate(MAX_RISK_NOTES);
    risks
}

pub fn next_steps(stage: FeedbackStage, passed: bool) -> Vec<String> {
    let steps: &[&str] = match (stage, passed) {
        (FeedbackStage::Resume, true) => &[
            "You will receive an assignment to complete at your convenience.",
            "The assignment is designed to simulate real work and is time-boxed.",
            "Feel free to reach out if you have any questions about the assignment.",
        ],
        (FeedbackStage::Resume, false) => &[
            "We encourage you to continue building your experience in the areas mentioned.",
            "Consider taking on projects that demonstrate the skills discussed.",
            "Feel free to reapply in the future as your experience grows.",
            "Connect with us on LinkedIn to stay updated on future opportunities.",
        ],
        (FeedbackStage::Assignment, true) => &[
            "Your submission has been reviewed and you will hear from us regarding next steps.",
            "If you have any questions about the process, feel free to reach out.",
        ],
        (FeedbackStage::Assignment, false) => &[
            "Thank you for completing the assignment and investing your time.",
            "We encourage you to continue developing in the areas mentioned.",
            "Your effort is appreciated and we hope this feedback is helpful.",
            "Feel free to reapply in the future as your skills evolve.",
        ],
    };
    steps.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VerdictSynthesizer;

impl VerdictSynthesizer {
    pub fn internal_verdict(
        &self,
        candidate: &CandidateProfile,
        jd: &JdSpec,
        execution_fit: &ExecutionFitScore,
        founder_confidence: &FounderConfidenceScore,
        relevance: &RelevanceScore,
        assignment: Option<&Assignment>,
    ) -> InternalVerdict {
        self.internal_verdict_at(
            candidate,
            jd,
            execution_fit,
            founder_confidence,
            relevance,
            assignment,
            Utc::now(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn internal_verdict_at(
        &self,
        candidate: &CandidateProfile,
        jd: &JdSpec,
        execution_fit: &ExecutionFitScore,
        founder_confidence: &FounderConfidenceScore,
        relevance: &RelevanceScore,
        assignment: Option<&Assignment>,
        now: DateTime<Utc>,
    ) -> InternalVerdict {
        InternalVerdict {
            candidate_name: candidate.name.clone(),
            email: candidate.email.clone(),
            phone: candidate.phone.clone(),
            resume_link: candidate.resume_link.clone(),
            resume_hash: candidate.resume_hash.clone(),
            execution_fit: execution_fit.clone(),
            founder_confidence: founder_confidence.clone(),
            relevance: relevance.clone(),
            role_context: jd.role_context,
            interview_focus_areas: interview_focus_areas(execution_fit, founder_confidence, jd),
            risk_notes: risk_notes(execution_fit, founder_confidence, candidate, now.date_naive()),
            assignment: assignment.cloned(),
            recommendation: recommendation_for(relevance.score),
            timestamp: now,
        }
    }

    pub fn external_verdict(
        &self,
        feedback: &CandidateFeedback,
        relevance: &RelevanceScore,
    ) -> ExternalVerdict {
        ExternalVerdict {
            next_steps: next_steps(feedback.stage, relevance.passed_threshold),
            feedback: feedback.clone(),
        }
    }
}
