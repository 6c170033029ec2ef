//! Resume Structuring: extracts a `CandidateProfile` from resume text.
//!
//! Contact details come from regexes over the raw text, never from the model.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::prompts::{RESUME_STRUCTURING_PROMPT_TEMPLATE, RESUME_STRUCTURING_SYSTEM};
use super::{non_blank, opt_string, string_list, Transform};
use crate::models::candidate::UNKNOWN_CANDIDATE;
use crate::models::scores::lenient_opt_f64;
use crate::models::{CandidateProfile, ExtractedSkill, Project, SkillConfidence, WorkExperience};

/// Name recorded when the model's answer could not be read at all.
pub const UNPARSED_CANDIDATE: &str = "Unable to Parse";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{2,4}\)?[-.\s]?\d{3,4}[-.\s]?\d{3,4}")
        .expect("valid phone regex")
});

/// First email and first phone number found in `text`. Whitespace is removed
/// from the phone number.
pub fn extract_contact(text: &str) -> (Option<String>, Option<String>) {
    let email = EMAIL_RE.find(text).map(|m| m.as_str().to_string());
    let phone = PHONE_RE
        .find(text)
        .map(|m| m.as_str().split_whitespace().collect::<String>());
    (email, phone)
}

pub struct ResumeInput<'a> {
    pub resume_text: &'a str,
    pub resume_link: &'a str,
    pub resume_hash: &'a str,
}

// ─── Raw model output ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRaw {
    #[serde(default, deserialize_with = "opt_string")]
    name: Option<String>,
    #[serde(default)]
    work_experience: Vec<RawExperience>,
    #[serde(default)]
    projects: Vec<RawProject>,
    #[serde(default)]
    skills: Vec<RawSkill>,
    #[serde(default, deserialize_with = "string_list")]
    education: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExperience {
    #[serde(default, deserialize_with = "opt_string")]
    company: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    duration: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    achievements: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    technologies: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    #[serde(default, deserialize_with = "opt_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    technologies: Vec<String>,
    #[serde(default, deserialize_with = "opt_string")]
    impact: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSkill {
    #[serde(default, deserialize_with = "opt_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    confidence: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    years_of_experience: Option<f64>,
    #[serde(default, deserialize_with = "opt_string")]
    last_used: Option<String>,
}

// ─── Transform ───────────────────────────────────────────────────────────────

pub struct ResumeStructuring;

impl ResumeStructuring {
    fn profile(&self, name: String, input: &ResumeInput<'_>) -> CandidateProfile {
        let (email, phone) = extract_contact(input.resume_text);
        CandidateProfile {
            name,
            email,
            phone,
            resume_link: input.resume_link.to_string(),
            resume_hash: input.resume_hash.to_string(),
            work_experience: Vec::new(),
            projects: Vec::new(),
            skills: Vec::new(),
            education: Vec::new(),
            raw_text: input.resume_text.to_string(),
            extracted_at: Utc::now(),
        }
    }
}

impl Transform for ResumeStructuring {
    const NAME: &'static str = "Resume Structuring Agent";

    type Input<'a> = ResumeInput<'a>;
    type Raw = ResumeRaw;
    type Output = CandidateProfile;

    fn system_prompt(&self) -> &'static str {
        RESUME_STRUCTURING_SYSTEM
    }

    fn build_prompt(&self, input: &ResumeInput<'_>) -> String {
        RESUME_STRUCTURING_PROMPT_TEMPLATE.replace("{resume_text}", input.resume_text)
    }

    fn validate(&self, raw: ResumeRaw, input: &ResumeInput<'_>) -> CandidateProfile {
        let name = non_blank(raw.name).unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string());
        let mut profile = self.profile(name, input);

        profile.work_experience = raw
            .work_experience
            .into_iter()
            .map(|exp| WorkExperience {
                company: exp.company.unwrap_or_default(),
                title: exp.title.unwrap_or_default(),
                duration: exp.duration.unwrap_or_default(),
                responsibilities: exp.responsibilities,
                achievements: exp.achievements,
                technologies: exp.technologies,
            })
            .collect();

        profile.projects = raw
            .projects
            .into_iter()
            .map(|proj| Project {
                name: proj.name.unwrap_or_default(),
                description: proj.description.unwrap_or_default(),
                technologies: proj.technologies,
                impact: non_blank(proj.impact),
                url: non_blank(proj.url),
            })
            .collect();

        profile.skills = raw
            .skills
            .into_iter()
            .filter_map(|skill| {
                let name = non_blank(skill.name)?;
                Some(ExtractedSkill {
                    name,
                    confidence: skill
                        .confidence
                        .as_deref()
                        .map(SkillConfidence::from_label)
                        .unwrap_or(SkillConfidence::Low),
                    years_of_experience: skill
                        .years_of_experience
                        .filter(|y| y.is_finite() && *y >= 0.0),
                    last_used: non_blank(skill.last_used),
                })
            })
            .collect();

        profile.education = raw
            .education
            .into_iter()
            .filter(|e| !e.trim().is_empty())
            .collect();

        profile
    }

    /// A minimal profile so one bad answer does not lose the resume.
    fn fallback(&self, input: &ResumeInput<'_>) -> Option<CandidateProfile> {
        Some(self.profile(UNPARSED_CANDIDATE.to_string(), input))
    }

    fn confidence(&self, profile: &CandidateProfile, _response: &Value) -> f64 {
        let mut confidence: f64 = 0.4;
        if profile.has_real_name() {
            confidence += 0.1;
        }
        if profile.email.is_some() {
            confidence += 0.1;
        }
        if !profile.work_experience.is_empty() {
            confidence += 0.15;
        }
        if !profile.projects.is_empty() {
            confidence += 0.1;
        }
        if profile.skills.len() >= 5 {
            confidence += 0.15;
        }
        confidence.min(1.0)
    }
}
