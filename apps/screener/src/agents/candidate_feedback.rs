//! Candidate Feedback: respectful, score-free feedback for the candidate.
//!
//! Whatever the model writes passes through the banned-pattern filter in
//! `models::feedback` before it leaves this agent.

use serde::Deserialize;
use serde_json::Value;

use super::prompts::{FEEDBACK_PROMPT_TEMPLATE, FEEDBACK_SYSTEM};
use super::{fill_template, opt_string, string_list, Transform};
use crate::models::{
    CandidateFeedback, CandidateProfile, ExecutionFitScore, FeedbackStage,
    FounderConfidenceScore, JdSpec,
};

/// Strengths and weaknesses observed in a submitted assignment.
pub struct AssignmentObservations<'a> {
    pub strengths: &'a [String],
    pub weaknesses: &'a [String],
}

pub struct FeedbackInput<'a> {
    pub candidate: &'a CandidateProfile,
    pub jd: &'a JdSpec,
    pub execution_fit: &'a ExecutionFitScore,
    pub founder_confidence: &'a FounderConfidenceScore,
    pub stage: FeedbackStage,
    pub passed_threshold: bool,
    pub assignment_observations: Option<AssignmentObservations<'a>>,
}

/// Maps a [0, 1] metric onto a word so no number reaches the prompt.
pub fn score_to_qualitative(value: f64) -> &'static str {
    if value >= 0.8 {
        "Strong"
    } else if value >= 0.6 {
        "Good"
    } else if value >= 0.4 {
        "Moderate"
    } else if value >= 0.2 {
        "Limited"
    } else {
        "Minimal"
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRaw {
    #[serde(default, deserialize_with = "string_list")]
    strengths: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    gaps: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    recommendations: Vec<String>,
    #[serde(default, deserialize_with = "opt_string")]
    growth_trajectory_note: Option<String>,
}

pub struct CandidateFeedbackGeneration;

impl CandidateFeedbackGeneration {
    fn summary(&self, input: &FeedbackInput<'_>) -> String {
        match (input.stage, &input.assignment_observations) {
            (FeedbackStage::Resume, _) => {
                let tech = &input.execution_fit.metrics;
                let founder = &input.founder_confidence.metrics;
                format!(
                    "---RESUME ANALYSIS SUMMARY---\n\
                     Skill Match: {}\n\
                     Experience Depth: {}\n\
                     Work Relevance: {}\n\
                     Ownership Evidence: {}\n\
                     Growth Trajectory: {}\n\n\
                     Key observations:\n- {}\n- {}\n- {}",
                    score_to_qualitative(tech.s),
                    score_to_qualitative(tech.d),
                    score_to_qualitative(tech.w),
                    score_to_qualitative(founder.o),
                    score_to_qualitative(founder.g),
                    tech.justifications.skill_relevance,
                    tech.justifications.depth_evidence,
                    founder.justifications.ownership,
                )
            }
            (FeedbackStage::Assignment, Some(obs)) => format!(
                "---ASSIGNMENT EVALUATION SUMMARY---\n\
                 Demonstrated strengths: {}\n\
                 Areas needing work: {}",
                obs.strengths.join(", "),
                obs.weaknesses.join(", ")
            ),
            (FeedbackStage::Assignment, None) => String::new(),
        }
    }
}

impl Transform for CandidateFeedbackGeneration {
    const NAME: &'static str = "Candidate Feedback Agent";

    type Input<'a> = FeedbackInput<'a>;
    type Raw = FeedbackRaw;
    type Output = CandidateFeedback;

    fn system_prompt(&self) -> &'static str {
        FEEDBACK_SYSTEM
    }

    fn build_prompt(&self, input: &FeedbackInput<'_>) -> String {
        let stage = match input.stage {
            FeedbackStage::Resume => "Resume Review",
            FeedbackStage::Assignment => "Assignment Review",
        };
        let outcome = if input.passed_threshold {
            "The candidate is moving forward in the process."
        } else {
            "The candidate is not moving forward for this role; keep the feedback constructive."
        };

        let skills = input.jd.non_negotiable_skills.join(", ");
        let role_count = input.candidate.work_experience.len().to_string();
        let project_count = input.candidate.projects.len().to_string();
        let skill_count = input.candidate.skills.len().to_string();
        let summary = self.summary(input);

        fill_template(
            FEEDBACK_PROMPT_TEMPLATE,
            &[
                ("name", input.candidate.name.as_str()),
                ("core_work", input.jd.core_work.as_str()),
                ("skills", skills.as_str()),
                ("role_count", role_count.as_str()),
                ("project_count", project_count.as_str()),
                ("skill_count", skill_count.as_str()),
                ("summary", summary.as_str()),
                ("stage", stage),
                ("outcome", outcome),
            ],
        )
    }

    fn validate(&self, raw: FeedbackRaw, input: &FeedbackInput<'_>) -> CandidateFeedback {
        CandidateFeedback::sanitized(
            input.stage,
            raw.strengths,
            raw.gaps,
            raw.recommendations,
            raw.growth_trajectory_note,
        )
    }

    fn confidence(&self, feedback: &CandidateFeedback, _response: &Value) -> f64 {
        let mut confidence: f64 = 0.6;
        if feedback.strengths.len() >= 2 {
            confidence += 0.1;
        }
        if !feedback.gaps.is_empty() {
            confidence += 0.1;
        }
        if feedback.recommendations.len() >= 2 {
            confidence += 0.1;
        }
        if feedback.growth_note.is_some() {
            confidence += 0.1;
        }
        confidence.min(1.0)
    }
}
