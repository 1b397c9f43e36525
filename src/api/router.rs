//! API router.
//!
//! Returns a composable `Router` mounting every endpoint of the v2 API with
//! permissive CORS, matching the original service's surface.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::ApiContext;
use crate::core_state::CoreState;

/// Build the API router around a loaded `CoreState`.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/api/v2/health", get(endpoints::health::features))
        .route("/api/v2/search/name", post(endpoints::search::by_name))
        .route("/api/v2/disease/:code/details", get(endpoints::search::details))
        .route("/api/v2/categories", get(endpoints::categories::list))
        .route(
            "/api/v2/categories/:letter/diseases",
            get(endpoints::categories::diseases),
        )
        .route("/api/v2/symptoms/categories", get(endpoints::categories::symptoms))
        .route("/api/v2/diagnose/symptoms", post(endpoints::diagnose::from_text))
        .route(
            "/api/v2/diagnose/objective_symptoms",
            post(endpoints::diagnose::from_symptoms),
        )
        .route("/api/v2/interactions/check", post(endpoints::interactions::check))
        .with_state(ctx)
        .layer(CorsLayer::permissive())
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::catalog::{default_records, Catalog};

    fn test_app() -> Router {
        let core = Arc::new(CoreState::new(Catalog::assemble(default_records(), false)));
        api_router(core)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok_without_fallback() {
        let response = test_app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["fallback_data"], false);
    }

    #[tokio::test]
    async fn search_finds_code_with_high_relevance() {
        let req = post_request("/api/v2/search/name", json!({"query": "E10"}));
        let response = test_app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        let results = body["results"].as_array().unwrap();
        assert!(results
            .iter()
            .any(|hit| hit["code"] == "E10" && hit["relevance"] == 90));
    }

    #[tokio::test]
    async fn empty_search_query_is_bad_request() {
        let req = post_request("/api/v2/search/name", json!({"query": "  "}));
        let response = test_app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn unknown_code_details_is_not_found() {
        let response = test_app()
            .oneshot(get_request("/api/v2/disease/Z99/details"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn known_code_details_carries_clinical_fields() {
        let response = test_app()
            .oneshot(get_request("/api/v2/disease/e10/details"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["disease_details"]["code"], "E10");
        assert!(!body["disease_details"]["symptoms"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn categories_lists_ten_chapters() {
        let response = test_app()
            .oneshot(get_request("/api/v2/categories"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["total_categories"], 10);
    }

    #[tokio::test]
    async fn category_membership_is_prefix_based() {
        let response = test_app()
            .oneshot(get_request("/api/v2/categories/e/diseases"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["category"], "E");
        let diseases = body["diseases"].as_array().unwrap();
        assert!(diseases.iter().all(|d| d["code"].as_str().unwrap().starts_with('E')));
    }

    #[tokio::test]
    async fn diagnose_rejects_empty_symptom_list() {
        let req = post_request("/api/v2/diagnose/objective_symptoms", json!({"symptoms": []}));
        let response = test_app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn diagnose_narrative_returns_candidates() {
        let req = post_request(
            "/api/v2/diagnose/symptoms",
            json!({"symptoms_report": "febre e dor de cabeça", "include_report": true}),
        );
        let response = test_app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["total_diagnoses"], 2);
        assert!(body["medical_report"].as_str().unwrap().contains("consulta médica"));
    }

    #[tokio::test]
    async fn interactions_require_two_drugs() {
        let req = post_request("/api/v2/interactions/check", json!({"medications": ["A"]}));
        let response = test_app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_pair_summary_is_none() {
        let req = post_request(
            "/api/v2/interactions/check",
            json!({"medications": ["A", "B"]}),
        );
        let response = test_app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["summary"]["highest_severity"], "Nenhuma");
        assert!(body["detailed_report"].is_null());
    }

    #[tokio::test]
    async fn symptom_categories_endpoint_lists_groups() {
        let response = test_app()
            .oneshot(get_request("/api/v2/symptoms/categories"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["total_categories"], 5);
    }
}
