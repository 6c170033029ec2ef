//! Founder Confidence: behavioral fit weighted by the role context.

use serde::Deserialize;
use serde_json::Value;

use super::prompts::{FOUNDER_CONFIDENCE_PROMPT_TEMPLATE, FOUNDER_CONFIDENCE_SYSTEM};
use super::{fill_template, opt_string, EvaluationInput, Transform};
use crate::models::scores::{founder_confidence, lenient_f64, FounderJustifications};
use crate::models::{BehavioralWeights, FounderConfidenceScore, FounderMetrics, RoleContext};

#[derive(Debug, Deserialize)]
pub struct FounderRaw {
    #[serde(rename = "O", default, deserialize_with = "lenient_f64")]
    o: f64,
    #[serde(rename = "L", default, deserialize_with = "lenient_f64")]
    l: f64,
    #[serde(rename = "P", default, deserialize_with = "lenient_f64")]
    p: f64,
    #[serde(rename = "G", default, deserialize_with = "lenient_f64")]
    g: f64,
    #[serde(default)]
    justifications: RawJustifications,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawJustifications {
    #[serde(default, deserialize_with = "opt_string")]
    ownership: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    longevity: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pressure_handling: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    growth_trajectory: Option<String>,
}

pub struct FounderConfidence;

impl Transform for FounderConfidence {
    const NAME: &'static str = "Founder Confidence Agent";

    type Input<'a> = EvaluationInput<'a>;
    type Raw = FounderRaw;
    type Output = FounderConfidenceScore;

    fn system_prompt(&self) -> &'static str {
        FOUNDER_CONFIDENCE_SYSTEM
    }

    fn build_prompt(&self, input: &EvaluationInput<'_>) -> String {
        let candidate = input.candidate;
        let jd = input.jd;

        let experience = candidate
            .work_experience
            .iter()
            .map(|exp| {
                let responsibilities: Vec<&str> = exp
                    .responsibilities
                    .iter()
                    .take(4)
                    .map(String::as_str)
                    .collect();
                let mut line = format!(
                    "- {} at {} ({})\n    Responsibilities: {}",
                    exp.title,
                    exp.company,
                    exp.duration,
                    responsibilities.join("; ")
                );
                if !exp.achievements.is_empty() {
                    line.push_str(&format!("\n    Achievements: {}", exp.achievements.join("; ")));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n");

        let projects = candidate
            .projects
            .iter()
            .map(|p| {
                let blurb: String = p.description.chars().take(100).collect();
                format!("- {}: {}", p.name, blurb)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let project_count = candidate.projects.len().to_string();

        fill_template(
            FOUNDER_CONFIDENCE_PROMPT_TEMPLATE,
            &[
                ("role_context", jd.role_context.label()),
                ("ownership", jd.ownership_level.label()),
                ("pressure", jd.pressure_level.label()),
                ("ambiguity", jd.ambiguity_level.label()),
                ("duration", jd.expected_role_duration.label()),
                ("name", candidate.name.as_str()),
                (
                    "experience",
                    if experience.is_empty() {
                        "None listed"
                    } else {
                        experience.as_str()
                    },
                ),
                ("project_count", project_count.as_str()),
                ("projects", projects.as_str()),
            ],
        )
    }

    fn validate(&self, raw: FounderRaw, input: &EvaluationInput<'_>) -> FounderConfidenceScore {
        let j = raw.justifications;
        let metrics = FounderMetrics {
            o: raw.o,
            l: raw.l,
            p: raw.p,
            g: raw.g,
            justifications: FounderJustifications {
                ownership: j.ownership.unwrap_or_default(),
                longevity: j.longevity.unwrap_or_default(),
                pressure_handling: j.pressure_handling.unwrap_or_default(),
                growth_trajectory: j.growth_trajectory.unwrap_or_default(),
            },
        }
        .clamped();

        let role_context = input.jd.role_context;
        let weights = role_context.behavioral_weights();
        let score = founder_confidence(&metrics, &weights);

        FounderConfidenceScore {
            explanation: explain_founder_confidence(&metrics, &weights, role_context, score),
            score,
            metrics,
            weights,
            role_context,
        }
    }

    fn confidence(&self, output: &FounderConfidenceScore, _response: &Value) -> f64 {
        let j = &output.metrics.justifications;
        let substantive = [
            &j.ownership,
            &j.longevity,
            &j.pressure_handling,
            &j.growth_trajectory,
        ]
        .iter()
        .all(|text| text.chars().count() > 20);

        if substantive {
            0.8
        } else {
            0.6
        }
    }

    fn explain(&self, output: &FounderConfidenceScore, _response: &Value) -> String {
        output.explanation.clone()
    }
}

pub fn explain_founder_confidence(
    metrics: &FounderMetrics,
    weights: &BehavioralWeights,
    role_context: RoleContext,
    score: f64,
) -> String {
    let (dimension, weight) = weights.dominant_dimension();
    let value = metrics.value_of(dimension);
    let mut parts = vec![format!(
        "For {}, {} is weighted highest ({:.0}%).",
        role_context.label().replace('_', " "),
        dimension,
        weight * 100.0
    )];

    if value >= 0.7 {
        parts.push(format!(
            "Candidate is strong ({:.0}%) on this key dimension.",
            value * 100.0
        ));
    } else if value < 0.4 {
        parts.push(format!(
            "Concern: candidate is weak ({:.0}%) on this critical dimension.",
            value * 100.0
        ));
    }

    parts.push(format!("Founder Confidence Score: {score:.1}/100"));
    parts.join(" ")
}
