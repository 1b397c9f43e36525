//! Health check endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::ApiContext;
use crate::config;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
    pub version: &'static str,
    pub fallback_data: bool,
}

/// `GET /health` — liveness check, reports catalogue degradation.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: format!("{} API está funcionando", config::APP_NAME),
        version: config::APP_VERSION,
        fallback_data: ctx.core.catalog.used_fallback,
    })
}

#[derive(Serialize)]
pub struct FeaturesResponse {
    pub status: &'static str,
    pub message: String,
    pub version: &'static str,
    pub features: Vec<&'static str>,
    pub fallback_data: bool,
}

/// `GET /api/v2/health` — feature listing for clients.
pub async fn features(State(ctx): State<ApiContext>) -> Json<FeaturesResponse> {
    Json(FeaturesResponse {
        status: "healthy",
        message: format!("{} API v2 está funcionando", config::APP_NAME),
        version: config::APP_VERSION,
        features: vec![
            "Busca aprimorada de doenças",
            "Diagnóstico por sintomas",
            "Verificação de interações medicamentosas",
            "Categorização CID-10",
        ],
        fallback_data: ctx.core.catalog.used_fallback,
    })
}
