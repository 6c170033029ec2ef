//! Append-only verdict table in PostgreSQL, plus the read queries the
//! dashboard serves from it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info};

use crate::models::{CandidateFeedback, InternalVerdict, VerdictRow};
use crate::workflow::collaborators::ResultSink;

const CREATE_VERDICTS: &str = r#"
CREATE TABLE IF NOT EXISTS verdicts (
    id                  BIGSERIAL PRIMARY KEY,
    campaign_id         TEXT NOT NULL,
    resume_hash         TEXT NOT NULL,
    recorded_at         TIMESTAMPTZ NOT NULL,
    candidate_name      TEXT NOT NULL,
    email               TEXT,
    phone               TEXT,
    resume_link         TEXT NOT NULL,
    execution_fit       DOUBLE PRECISION NOT NULL,
    founder_confidence  DOUBLE PRECISION NOT NULL,
    relevance           DOUBLE PRECISION NOT NULL,
    role_context        TEXT NOT NULL,
    interview_focus_areas TEXT NOT NULL,
    risk_notes          TEXT NOT NULL,
    assignment_title    TEXT,
    recommendation      TEXT NOT NULL,
    resume_feedback     TEXT NOT NULL,
    assignment_feedback TEXT,
    payload             JSONB NOT NULL,
    UNIQUE (campaign_id, resume_hash)
)
"#;

/// Creates the verdict table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_VERDICTS)
        .execute(pool)
        .await
        .context("Creating verdicts table")?;
    info!("Verdict table ready");
    Ok(())
}

pub struct PgVerdictSink {
    pool: PgPool,
}

impl PgVerdictSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultSink for PgVerdictSink {
    async fn append_verdict(
        &self,
        campaign: &str,
        verdict: &InternalVerdict,
        resume_feedback: &CandidateFeedback,
        assignment_feedback: Option<&CandidateFeedback>,
    ) -> Result<()> {
        let row = VerdictRow::from_verdict(verdict, resume_feedback, assignment_feedback);

        let result = sqlx::query(
            r#"
            INSERT INTO verdicts
                (campaign_id, resume_hash, recorded_at, candidate_name, email, phone,
                 resume_link, execution_fit, founder_confidence, relevance, role_context,
                 interview_focus_areas, risk_notes, assignment_title, recommendation,
                 resume_feedback, assignment_feedback, payload)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            ON CONFLICT (campaign_id, resume_hash) DO NOTHING
            "#,
        )
        .bind(campaign)
        .bind(&verdict.resume_hash)
        .bind(row.recorded_at)
        .bind(&row.candidate_name)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.resume_link)
        .bind(row.execution_fit)
        .bind(row.founder_confidence)
        .bind(row.relevance)
        .bind(&row.role_context)
        .bind(&row.interview_focus_areas)
        .bind(&row.risk_notes)
        .bind(&row.assignment_title)
        .bind(&row.recommendation)
        .bind(&row.resume_feedback)
        .bind(&row.assignment_feedback)
        .bind(Json(verdict))
        .execute(&self.pool)
        .await
        .with_context(|| format!("Inserting verdict for {}", row.candidate_name))?;

        if result.rows_affected() == 0 {
            debug!("[{}] Verdict for {} already stored", campaign, verdict.resume_hash);
        } else {
            info!("[{}] Stored verdict for {}", campaign, row.candidate_name);
        }
        Ok(())
    }
}

// ─── Dashboard queries ───────────────────────────────────────────────────────

#[derive(Debug, Serialize, FromRow)]
pub struct CampaignSummary {
    pub campaign_id: String,
    pub verdicts: i64,
    pub latest: Option<chrono::DateTime<chrono::Utc>>,
}

pub async fn campaign_summaries(pool: &PgPool) -> Result<Vec<CampaignSummary>, sqlx::Error> {
    sqlx::query_as::<_, CampaignSummary>(
        r#"
        SELECT campaign_id, COUNT(*) AS verdicts, MAX(recorded_at) AS latest
        FROM verdicts
        GROUP BY campaign_id
        ORDER BY campaign_id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Verdict rows of one campaign in the order they were recorded.
pub async fn campaign_verdicts(
    pool: &PgPool,
    campaign: &str,
) -> Result<Vec<VerdictRow>, sqlx::Error> {
    sqlx::query_as::<_, VerdictRow>(
        r#"
        SELECT recorded_at, candidate_name, email, phone, resume_link,
               execution_fit, founder_confidence, relevance, role_context,
               interview_focus_areas, risk_notes, assignment_title, recommendation,
               resume_feedback, assignment_feedback
        FROM verdicts
        WHERE campaign_id = $1
        ORDER BY id
        "#,
    )
    .bind(campaign)
    .fetch_all(pool)
    .await
}
