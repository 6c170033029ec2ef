use chrono::Utc;

use crate::agents::founder_confidence::explain_founder_confidence;
use crate::agents::technical::explain_execution_fit;
use crate::models::scores::{
    execution_fit as execution_fit_score, founder_confidence as founder_confidence_score,
    FounderJustifications, TechnicalJustifications,
};
use crate::models::{
    AmbiguityLevel, Assignment, CandidateProfile, ExecutionFitScore, ExtractedSkill,
    FounderConfidenceScore, FounderMetrics, IntensityLevel, JdSpec, Project, RoleContext,
    RoleDuration, SkillConfidence, TechnicalMetrics, WorkExperience,
};
use crate::workflow::collaborators::{content_hash, ResumeDocument};

pub const JD_TEXT: &str = "Senior backend engineer to own the payments ledger. \
    Rust, Postgres and Kafka in production. Long-term hire for a stable team.";

pub fn jd_spec() -> JdSpec {
    JdSpec {
        core_work: "Build and operate the payments ledger backend".to_string(),
        non_negotiable_skills: vec!["Rust".into(), "Postgres".into(), "Kafka".into()],
        ownership_level: IntensityLevel::High,
        ambiguity_level: AmbiguityLevel::Medium,
        pressure_level: IntensityLevel::Medium,
        expected_role_duration: RoleDuration::LongTerm,
        role_context: RoleContext::StableLongTerm,
        criticality_factor: 0.85,
        standard_assignment: None,
        raw_text: JD_TEXT.to_string(),
        content_hash: content_hash(JD_TEXT.as_bytes()),
    }
}

pub fn candidate() -> CandidateProfile {
    CandidateProfile {
        name: "Jordan Lee".to_string(),
        email: Some("jordan.lee@example.com".to_string()),
        phone: Some("+14155550134".to_string()),
        resume_link: "s3://screener/campaigns/ledger/resumes/jordan.pdf".to_string(),
        resume_hash: content_hash(b"jordan"),
        work_experience: vec![WorkExperience {
            company: "Acme".to_string(),
            title: "Senior Engineer".to_string(),
            duration: "Jan 2020 - Present".to_string(),
            responsibilities: vec![
                "Owned the ledger service".to_string(),
                "Ran the Kafka consumer fleet".to_string(),
            ],
            achievements: vec!["Cut reconciliation time in half".to_string()],
            technologies: vec!["Rust".to_string(), "Postgres".to_string()],
        }],
        projects: vec![Project {
            name: "ledgerctl".to_string(),
            description: "Command line tool for auditing ledger entries".to_string(),
            technologies: vec!["Rust".to_string()],
            ..Default::default()
        }],
        skills: vec![ExtractedSkill {
            name: "Rust".to_string(),
            confidence: SkillConfidence::High,
            years_of_experience: Some(4.0),
            last_used: None,
        }],
        education: vec!["BSc Computer Science".to_string()],
        raw_text: "Jordan Lee, Senior Engineer at Acme".to_string(),
        extracted_at: Utc::now(),
    }
}

/// Execution fit built through the production formula and explanation.
pub fn execution_fit(s: f64, d: f64, w: f64, r: f64) -> ExecutionFitScore {
    let metrics = TechnicalMetrics {
        s,
        d,
        w,
        r,
        justifications: TechnicalJustifications {
            skill_relevance: "Uses Rust and Postgres daily on the ledger".to_string(),
            depth_evidence: "Owned the ledger service end to end".to_string(),
            work_similarity: "Previous work is a close match for payments".to_string(),
            risk_penalty: "Short stints early in the career".to_string(),
        },
    };
    let score = execution_fit_score(&metrics);
    ExecutionFitScore {
        explanation: explain_execution_fit(&metrics, score),
        score,
        metrics,
    }
}

/// Founder confidence under `Stable_Long_Term` weights.
pub fn founder_confidence(o: f64, l: f64, p: f64, g: f64) -> FounderConfidenceScore {
    let role_context = RoleContext::StableLongTerm;
    let weights = role_context.behavioral_weights();
    let metrics = FounderMetrics {
        o,
        l,
        p,
        g,
        justifications: FounderJustifications {
            ownership: "Drove the ledger migration without being asked".to_string(),
            longevity: "Has moved between employers frequently".to_string(),
            pressure_handling: "Shipped through a peak season freeze".to_string(),
            growth_trajectory: "Grew from engineer to senior engineer".to_string(),
        },
    };
    let score = founder_confidence_score(&metrics, &weights);
    FounderConfidenceScore {
        explanation: explain_founder_confidence(&metrics, &weights, role_context, score),
        score,
        metrics,
        weights,
        role_context,
    }
}

pub fn assignment() -> Assignment {
    Assignment {
        title: "Idempotent payment ingestion".to_string(),
        objective: "Ingest payment events exactly once into Postgres".to_string(),
        context: "Events arrive with at-least-once delivery".to_string(),
        requirements: vec!["Consume events".to_string(), "Deduplicate by id".to_string()],
        evaluation_criteria: vec!["Correctness".to_string(), "Tests".to_string()],
        optional_parts: vec!["Backpressure".to_string()],
        timebox_hours: 4,
        deliverables: vec!["Repository link".to_string()],
    }
}

pub fn resume_document(id: &str, text: &str) -> ResumeDocument {
    ResumeDocument {
        id: id.to_string(),
        file_name: format!("{id}.pdf"),
        link: format!("s3://screener/campaigns/ledger/resumes/{id}.pdf"),
        text: text.to_string(),
        content_hash: content_hash(text.as_bytes()),
    }
}
