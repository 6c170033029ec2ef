//! JD Reality: decodes a job description into the role that is actually being hired for.

use serde::Deserialize;
use serde_json::Value;

use super::prompts::{JD_REALITY_PROMPT_TEMPLATE, JD_REALITY_SYSTEM};
use super::{opt_string, string_list, Transform};
use crate::models::jd::clamp_criticality;
use crate::models::scores::lenient_opt_f64;
use crate::models::{AmbiguityLevel, IntensityLevel, JdSpec, RoleContext, RoleDuration};

pub struct JdInput<'a> {
    pub jd_text: &'a str,
    pub content_hash: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdRaw {
    #[serde(default, deserialize_with = "opt_string")]
    core_work: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    non_negotiable_skills: Vec<String>,
    #[serde(default, deserialize_with = "opt_string")]
    ownership_level: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    ambiguity_level: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pressure_level: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    expected_role_duration: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    role_context: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    criticality_factor: Option<f64>,
}

pub struct JdReality;

impl Transform for JdReality {
    const NAME: &'static str = "JD Reality Agent";

    type Input<'a> = JdInput<'a>;
    type Raw = JdRaw;
    type Output = JdSpec;

    fn system_prompt(&self) -> &'static str {
        JD_REALITY_SYSTEM
    }

    fn build_prompt(&self, input: &JdInput<'_>) -> String {
        JD_REALITY_PROMPT_TEMPLATE.replace("{jd_text}", input.jd_text)
    }

    fn validate(&self, raw: JdRaw, input: &JdInput<'_>) -> JdSpec {
        let label = |v: &Option<String>| v.as_deref().unwrap_or_default().to_string();

        JdSpec {
            core_work: raw.core_work.unwrap_or_default().trim().to_string(),
            non_negotiable_skills: raw
                .non_negotiable_skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            ownership_level: IntensityLevel::from_label(&label(&raw.ownership_level)),
            ambiguity_level: AmbiguityLevel::from_label(&label(&raw.ambiguity_level)),
            pressure_level: IntensityLevel::from_label(&label(&raw.pressure_level)),
            expected_role_duration: RoleDuration::from_label(&label(&raw.expected_role_duration)),
            role_context: raw
                .role_context
                .as_deref()
                .and_then(RoleContext::from_label)
                .unwrap_or_default(),
            criticality_factor: clamp_criticality(raw.criticality_factor),
            standard_assignment: None,
            raw_text: input.jd_text.to_string(),
            content_hash: input.content_hash.to_string(),
        }
    }

    fn confidence(&self, spec: &JdSpec, response: &Value) -> f64 {
        let mut confidence: f64 = 0.5;
        if spec.core_work.chars().count() > 50 {
            confidence += 0.1;
        }
        if spec.non_negotiable_skills.len() >= 3 {
            confidence += 0.15;
        }
        if spec.non_negotiable_skills.len() >= 5 {
            confidence += 0.1;
        }
        let recognized = response
            .get("roleContext")
            .and_then(Value::as_str)
            .and_then(RoleContext::from_label)
            .is_some();
        if recognized {
            confidence += 0.15;
        }
        confidence.min(1.0)
    }
}
