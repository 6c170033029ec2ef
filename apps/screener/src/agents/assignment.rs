//! Assignment Generation: one standard take-home exercise per job description.

use serde::Deserialize;
use serde_json::Value;

use super::prompts::{ASSIGNMENT_PROMPT_TEMPLATE, ASSIGNMENT_SYSTEM};
use super::{fill_template, non_blank, opt_string, string_list, Transform};
use crate::models::assignment::{clamp_timebox, DEFAULT_ASSIGNMENT_TITLE};
use crate::models::scores::lenient_opt_f64;
use crate::models::{Assignment, JdSpec};

/// Built from the JD alone so every candidate of a campaign gets the same exercise.
pub struct AssignmentInput<'a> {
    pub jd: &'a JdSpec,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRaw {
    #[serde(default, deserialize_with = "opt_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    objective: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    context: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    requirements: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    evaluation_criteria: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    optional_parts: Vec<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    timebox_hours: Option<f64>,
    #[serde(default, deserialize_with = "string_list")]
    deliverables: Vec<String>,
}

pub struct AssignmentGeneration;

impl Transform for AssignmentGeneration {
    const NAME: &'static str = "Assignment Generation Agent";

    type Input<'a> = AssignmentInput<'a>;
    type Raw = AssignmentRaw;
    type Output = Assignment;

    fn system_prompt(&self) -> &'static str {
        ASSIGNMENT_SYSTEM
    }

    fn build_prompt(&self, input: &AssignmentInput<'_>) -> String {
        let jd = input.jd;
        let top_skills: Vec<&str> = jd
            .non_negotiable_skills
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();

        let role_context = jd.role_context.label().replace('_', " ");
        let skills = jd.non_negotiable_skills.join(", ");
        let top_skills = top_skills.join(", ");

        fill_template(
            ASSIGNMENT_PROMPT_TEMPLATE,
            &[
                ("role_context", role_context.as_str()),
                ("core_work", jd.core_work.as_str()),
                ("skills", skills.as_str()),
                ("ownership", jd.ownership_level.label()),
                ("pressure", jd.pressure_level.label()),
                ("ambiguity", jd.ambiguity_level.label()),
                ("top_skills", top_skills.as_str()),
            ],
        )
    }

    fn validate(&self, raw: AssignmentRaw, _input: &AssignmentInput<'_>) -> Assignment {
        Assignment {
            title: non_blank(raw.title).unwrap_or_else(|| DEFAULT_ASSIGNMENT_TITLE.to_string()),
            objective: raw.objective.unwrap_or_default(),
            context: raw.context.unwrap_or_default(),
            requirements: raw.requirements,
            evaluation_criteria: raw.evaluation_criteria,
            optional_parts: raw.optional_parts,
            timebox_hours: clamp_timebox(raw.timebox_hours),
            deliverables: raw.deliverables,
        }
    }

    fn confidence(&self, assignment: &Assignment, _response: &Value) -> f64 {
        let mut confidence: f64 = 0.5;
        if assignment.objective.chars().count() > 50 {
            confidence += 0.1;
        }
        if assignment.requirements.len() >= 2 {
            confidence += 0.15;
        }
        if assignment.evaluation_criteria.len() >= 3 {
            confidence += 0.15;
        }
        if !assignment.optional_parts.is_empty() {
            confidence += 0.1;
        }
        confidence.min(1.0)
    }
}
