//! Chapter listing, per-chapter membership and symptom reference groups.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::ApiContext;
use crate::catalog::DiseaseRecord;
use crate::category::{Category, SymptomCategory};

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
    pub total_categories: usize,
}

/// `GET /api/v2/categories` — all CID-10 chapters with metadata.
pub async fn list(State(ctx): State<ApiContext>) -> Json<CategoriesResponse> {
    let categories = ctx.core.categorizer.categories();
    Json(CategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories,
    })
}

/// Compact disease view for chapter listings.
#[derive(Serialize)]
pub struct CategoryDisease {
    pub code: String,
    pub description: String,
    pub severity: Option<String>,
    pub has_treatment: bool,
    pub treatment_type: Option<String>,
}

impl From<&DiseaseRecord> for CategoryDisease {
    fn from(record: &DiseaseRecord) -> Self {
        let medicated = !record.medications.is_empty();
        let non_medicated = !record.non_medication_treatment.is_empty();
        let treatment_type = match (medicated, non_medicated) {
            (true, true) => Some("Medicamentoso e não medicamentoso".to_string()),
            (true, false) => Some("Medicamentoso".to_string()),
            (false, true) => Some("Não medicamentoso".to_string()),
            (false, false) => None,
        };
        Self {
            code: record.code.clone(),
            description: record.name.clone(),
            severity: record.severity.clone(),
            has_treatment: medicated || non_medicated,
            treatment_type,
        }
    }
}

#[derive(Serialize)]
pub struct CategoryDiseasesResponse {
    pub success: bool,
    pub category: String,
    pub diseases: Vec<CategoryDisease>,
    pub total_diseases: usize,
}

/// `GET /api/v2/categories/:letter/diseases` — chapter membership.
/// Unknown letters yield an empty list, not an error.
pub async fn diseases(
    State(ctx): State<ApiContext>,
    Path(letter): Path<String>,
) -> Json<CategoryDiseasesResponse> {
    let diseases: Vec<CategoryDisease> = ctx
        .core
        .categorizer
        .diseases_in_category(&letter)
        .into_iter()
        .map(CategoryDisease::from)
        .collect();
    Json(CategoryDiseasesResponse {
        success: true,
        category: letter.trim().to_uppercase(),
        total_diseases: diseases.len(),
        diseases,
    })
}

#[derive(Serialize)]
pub struct SymptomCategoriesResponse {
    pub success: bool,
    pub categories: Vec<SymptomCategory>,
    pub total_categories: usize,
}

/// `GET /api/v2/symptoms/categories` — symptom groups for the guided picker.
pub async fn symptoms(State(ctx): State<ApiContext>) -> Json<SymptomCategoriesResponse> {
    let categories = ctx.core.categorizer.symptom_categories();
    Json(SymptomCategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories,
    })
}
