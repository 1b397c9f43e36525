//! Drug-interaction endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::ApiContext;
use crate::interaction::InteractionSummary;

#[derive(Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub include_report: bool,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub success: bool,
    pub summary: InteractionSummary,
    pub detailed_report: Option<String>,
}

/// `POST /api/v2/interactions/check` — pairwise interaction check.
pub async fn check(
    State(ctx): State<ApiContext>,
    Json(req): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    let outcome = ctx
        .core
        .interactions
        .check(&req.medications, req.include_report)
        .map_err(|_| {
            ApiError::BadRequest("Pelo menos 2 medicamentos são necessários".to_string())
        })?;
    Ok(Json(CheckResponse {
        success: true,
        summary: outcome.summary,
        detailed_report: outcome.detailed_report,
    }))
}
