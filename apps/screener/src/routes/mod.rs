pub mod campaigns;
pub mod health;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Read-only dashboard over the verdict table
        .route("/api/v1/campaigns", get(campaigns::handle_list_campaigns))
        .route(
            "/api/v1/campaigns/:id/verdicts",
            get(campaigns::handle_campaign_verdicts),
        )
        .with_state(state)
}
