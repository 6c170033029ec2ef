use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::integrations::pg_sink::{campaign_summaries, campaign_verdicts, CampaignSummary};
use crate::models::{Recommendation, VerdictRow};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CampaignListResponse {
    pub campaigns: Vec<CampaignSummary>,
}

#[derive(Deserialize)]
pub struct VerdictQuery {
    pub recommendation: Option<String>,
}

#[derive(Serialize)]
pub struct CampaignVerdictsResponse {
    pub campaign_id: String,
    pub relevance_threshold: f64,
    pub verdicts: Vec<VerdictRow>,
}

/// GET /api/v1/campaigns
pub async fn handle_list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<CampaignListResponse>, AppError> {
    let campaigns = campaign_summaries(&state.db).await?;
    Ok(Json(CampaignListResponse { campaigns }))
}

/// GET /api/v1/campaigns/:id/verdicts
pub async fn handle_campaign_verdicts(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    Query(params): Query<VerdictQuery>,
) -> Result<Json<CampaignVerdictsResponse>, AppError> {
    validate_campaign_id(&campaign_id)?;
    let wanted = params
        .recommendation
        .as_deref()
        .map(parse_recommendation)
        .transpose()?;

    let rows = campaign_verdicts(&state.db, &campaign_id).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound(format!(
            "No verdicts recorded for campaign '{campaign_id}'"
        )));
    }

    let verdicts = match wanted {
        Some(recommendation) => rows
            .into_iter()
            .filter(|row| row.recommendation == recommendation.as_str())
            .collect(),
        None => rows,
    };

    Ok(Json(CampaignVerdictsResponse {
        campaign_id,
        relevance_threshold: state.config.relevance_threshold,
        verdicts,
    }))
}

/// Campaign ids are single path segments of the document store.
fn validate_campaign_id(id: &str) -> Result<(), AppError> {
    if id.trim().is_empty() || id.contains('/') || id.len() > 128 {
        return Err(AppError::Validation(format!("Invalid campaign id '{id}'")));
    }
    Ok(())
}

fn parse_recommendation(value: &str) -> Result<Recommendation, AppError> {
    [
        Recommendation::StrongYes,
        Recommendation::Yes,
        Recommendation::Maybe,
        Recommendation::NotNow,
    ]
    .into_iter()
    .find(|r| r.as_str().eq_ignore_ascii_case(value.trim()))
    .ok_or_else(|| {
        AppError::Validation(format!(
            "recommendation must be one of Strong Yes, Yes, Maybe, Not Now (got '{value}')"
        ))
    })
}
