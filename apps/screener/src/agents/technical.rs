//! Technical Checking: execution fit from skill relevance, depth, work similarity and risk.

use serde::Deserialize;
use serde_json::Value;

use super::prompts::{TECHNICAL_PROMPT_TEMPLATE, TECHNICAL_SYSTEM};
use super::{fill_template, opt_string, EvaluationInput, Transform};
use crate::models::scores::{execution_fit, lenient_f64, TechnicalJustifications};
use crate::models::{CandidateProfile, ExecutionFitScore, TechnicalMetrics};

#[derive(Debug, Deserialize)]
pub struct TechnicalRaw {
    #[serde(rename = "S", default, deserialize_with = "lenient_f64")]
    s: f64,
    #[serde(rename = "D", default, deserialize_with = "lenient_f64")]
    d: f64,
    #[serde(rename = "W", default, deserialize_with = "lenient_f64")]
    w: f64,
    #[serde(rename = "R", default, deserialize_with = "lenient_f64")]
    r: f64,
    #[serde(default)]
    justifications: RawJustifications,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawJustifications {
    #[serde(default, deserialize_with = "opt_string")]
    skill_relevance: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    depth_evidence: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    work_similarity: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    risk_penalty: Option<String>,
}

pub struct TechnicalChecking;

impl Transform for TechnicalChecking {
    const NAME: &'static str = "Technical Checking Agent";

    type Input<'a> = EvaluationInput<'a>;
    type Raw = TechnicalRaw;
    type Output = ExecutionFitScore;

    fn system_prompt(&self) -> &'static str {
        TECHNICAL_SYSTEM
    }

    fn build_prompt(&self, input: &EvaluationInput<'_>) -> String {
        let candidate = input.candidate;
        let jd = input.jd;

        let skills = jd.non_negotiable_skills.join(", ");
        let experience = or_none(experience_summary(candidate));
        let projects = or_none(project_summary(candidate));
        let candidate_skills = or_none(skill_summary(candidate));
        let education = or_unspecified(candidate.education.join(", "));

        fill_template(
            TECHNICAL_PROMPT_TEMPLATE,
            &[
                ("core_work", jd.core_work.as_str()),
                ("skills", skills.as_str()),
                ("ownership", jd.ownership_level.label()),
                ("role_context", jd.role_context.label()),
                ("name", candidate.name.as_str()),
                ("experience", experience.as_str()),
                ("projects", projects.as_str()),
                ("candidate_skills", candidate_skills.as_str()),
                ("education", education.as_str()),
            ],
        )
    }

    fn validate(&self, raw: TechnicalRaw, _input: &EvaluationInput<'_>) -> ExecutionFitScore {
        let j = raw.justifications;
        let metrics = TechnicalMetrics {
            s: raw.s,
            d: raw.d,
            w: raw.w,
            r: raw.r,
            justifications: TechnicalJustifications {
                skill_relevance: j.skill_relevance.unwrap_or_default(),
                depth_evidence: j.depth_evidence.unwrap_or_default(),
                work_similarity: j.work_similarity.unwrap_or_default(),
                risk_penalty: j.risk_penalty.unwrap_or_default(),
            },
        }
        .clamped();

        let score = execution_fit(&metrics);
        ExecutionFitScore {
            explanation: explain_execution_fit(&metrics, score),
            score,
            metrics,
        }
    }

    fn confidence(&self, output: &ExecutionFitScore, _response: &Value) -> f64 {
        let j = &output.metrics.justifications;
        let substantive = [
            &j.skill_relevance,
            &j.depth_evidence,
            &j.work_similarity,
            &j.risk_penalty,
        ]
        .iter()
        .all(|text| text.chars().count() > 20);

        if substantive {
            0.85
        } else {
            0.65
        }
    }

    fn explain(&self, output: &ExecutionFitScore, _response: &Value) -> String {
        output.explanation.clone()
    }
}

pub fn explain_execution_fit(metrics: &TechnicalMetrics, score: f64) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(
        if metrics.s >= 0.7 {
            "Strong skill alignment with requirements."
        } else if metrics.s >= 0.4 {
            "Partial skill match with some gaps."
        } else {
            "Limited relevant skills for this role."
        }
        .to_string(),
    );

    if metrics.d >= 0.7 {
        parts.push("Deep technical expertise demonstrated.".to_string());
    } else if metrics.d >= 0.4 {
        parts.push("Moderate depth in relevant areas.".to_string());
    }

    if metrics.r >= 0.4 {
        parts.push(format!(
            "Risk factors identified: {}",
            metrics.justifications.risk_penalty
        ));
    }

    parts.push(format!("Execution Fit Score: {score:.1}/100"));
    parts.join(" ")
}

fn experience_summary(candidate: &CandidateProfile) -> String {
    candidate
        .work_experience
        .iter()
        .map(|exp| {
            let top: Vec<&str> = exp.responsibilities.iter().take(3).map(String::as_str).collect();
            format!(
                "- {} at {} ({}): {}",
                exp.title,
                exp.company,
                exp.duration,
                top.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn project_summary(candidate: &CandidateProfile) -> String {
    candidate
        .projects
        .iter()
        .map(|p| format!("- {}: {} [{}]", p.name, p.description, p.technologies.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn skill_summary(candidate: &CandidateProfile) -> String {
    candidate
        .skills
        .iter()
        .map(|s| match s.years_of_experience {
            Some(years) if years > 0.0 => {
                format!("{} ({:?} confidence, {}y)", s.name, s.confidence, years)
            }
            _ => format!("{} ({:?} confidence)", s.name, s.confidence),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn or_none(text: String) -> String {
    if text.is_empty() {
        "None listed".to_string()
    } else {
        text
    }
}

fn or_unspecified(text: String) -> String {
    if text.is_empty() {
        "Not specified".to_string()
    } else {
        text
    }
}
