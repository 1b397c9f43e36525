//! Disease search and detail endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::ApiContext;
use crate::catalog::DiseaseRecord;
use crate::error::CoreError;
use crate::search::{self, SearchHit};

#[derive(Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<SearchHit>,
    pub total_found: usize,
}

/// `POST /api/v2/search/name` — search by CID code or name fragment.
pub async fn by_name(
    State(ctx): State<ApiContext>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = ctx
        .core
        .matcher
        .search(&req.query, req.limit.unwrap_or(search::DEFAULT_LIMIT))?;
    Ok(Json(SearchResponse {
        success: true,
        total_found: results.len(),
        results,
    }))
}

#[derive(Serialize)]
pub struct DetailsResponse {
    pub success: bool,
    pub disease_details: DiseaseRecord,
}

/// `GET /api/v2/disease/:code/details` — full record for one code.
pub async fn details(
    State(ctx): State<ApiContext>,
    Path(code): Path<String>,
) -> Result<Json<DetailsResponse>, ApiError> {
    let record = ctx
        .core
        .index
        .by_code(&code)
        .ok_or(CoreError::NotFound(code))?;
    Ok(Json(DetailsResponse {
        success: true,
        disease_details: record.clone(),
    }))
}
