//! Diagnostic endpoints: narrative text and explicit symptom list.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::ApiContext;
use crate::diagnostic::{DiagnosticCandidate, SymptomValidation};

#[derive(Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub symptoms_report: String,
    #[serde(default)]
    pub include_report: bool,
}

#[derive(Serialize)]
pub struct TextResponse {
    pub success: bool,
    pub diagnostic_results: Vec<DiagnosticCandidate>,
    pub total_diagnoses: usize,
    pub medical_report: Option<String>,
}

/// `POST /api/v2/diagnose/symptoms` — diagnosis from a symptom narrative.
pub async fn from_text(
    State(ctx): State<ApiContext>,
    Json(req): Json<TextRequest>,
) -> Result<Json<TextResponse>, ApiError> {
    let outcome = ctx
        .core
        .diagnostics
        .diagnose_from_text(&req.symptoms_report, req.include_report)
        .map_err(|_| ApiError::BadRequest("Descrição de sintomas é obrigatória".to_string()))?;
    Ok(Json(TextResponse {
        success: true,
        total_diagnoses: outcome.candidates.len(),
        diagnostic_results: outcome.candidates,
        medical_report: outcome.report,
    }))
}

#[derive(Deserialize)]
pub struct ListRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub include_report: bool,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub symptom_validation: Vec<SymptomValidation>,
    pub diagnostic_results: Vec<DiagnosticCandidate>,
    pub total_diagnoses: usize,
    pub medical_report: Option<String>,
}

/// `POST /api/v2/diagnose/objective_symptoms` — diagnosis from a selected
/// symptom list.
pub async fn from_symptoms(
    State(ctx): State<ApiContext>,
    Json(req): Json<ListRequest>,
) -> Result<Json<ListResponse>, ApiError> {
    let outcome = ctx
        .core
        .diagnostics
        .diagnose_from_symptoms(&req.symptoms, req.include_report)
        .map_err(|_| ApiError::BadRequest("Lista de sintomas é obrigatória".to_string()))?;
    Ok(Json(ListResponse {
        success: true,
        symptom_validation: outcome.validation,
        total_diagnoses: outcome.candidates.len(),
        diagnostic_results: outcome.candidates,
        medical_report: outcome.report,
    }))
}
