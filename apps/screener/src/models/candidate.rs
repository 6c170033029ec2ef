use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name used when the resume gives no usable name.
pub const UNKNOWN_CANDIDATE: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SkillConfidence {
    Low,
    #[default]
    Medium,
    High,
}

impl SkillConfidence {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => SkillConfidence::Low,
            "high" => SkillConfidence::High,
            _ => SkillConfidence::Medium,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSkill {
    pub name: String,
    pub confidence: SkillConfidence,
    pub years_of_experience: Option<f64>,
    pub last_used: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub title: String,
    /// Free text as written on the resume, e.g. "Jan 2021 - Present".
    pub duration: String,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub impact: Option<String>,
    pub url: Option<String>,
}

/// Structured view of one resume. Written once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume_link: String,
    pub resume_hash: String,
    pub work_experience: Vec<WorkExperience>,
    pub projects: Vec<Project>,
    pub skills: Vec<ExtractedSkill>,
    pub education: Vec<String>,
    pub raw_text: String,
    pub extracted_at: DateTime<Utc>,
}

impl CandidateProfile {
    pub fn has_real_name(&self) -> bool {
        let name = self.name.trim();
        !name.is_empty() && name != UNKNOWN_CANDIDATE
    }
}
