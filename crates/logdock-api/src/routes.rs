//! Route configuration for the API.

use std::sync::Arc;

use axum::routing::{Router, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{browse_records, health_check, ingest_record, search_records};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(state.config());

    let api_routes = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Ingest
        .route("/logdata", post(ingest_record))
        // Precise-mode query
        .route("/query_search", get(search_records))
        // Year-shorthand query
        .route("/logs", get(browse_records));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &crate::config::ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use logdock_core::shared_store;
    use tower::ServiceExt;

    fn make_state() -> Arc<AppState> {
        Arc::new(AppState::new(ApiConfig::default(), shared_store()))
    }

    const DISK_FULL: &str = r#"{
        "level": "ERROR",
        "message": "disk full",
        "resourceId": "svc-1",
        "timestamp": "2023-06-01T10:00:00Z",
        "traceId": "t1",
        "spanId": "s1",
        "commit": "abc",
        "metadata": {"parentResourceId": "p1"}
    }"#;

    async fn ingest(app: &Router, body: &str) -> StatusCode {
        let request = Request::builder()
            .method("POST")
            .uri("/api/logdata")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        app.clone().oneshot(request).await.expect("response").status()
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = create_router(make_state());
        let (status, json) = get_json(&app, "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn ingest_returns_created_with_nested_metadata() {
        let state = make_state();
        let app = create_router(Arc::clone(&state));

        let request = Request::builder()
            .method("POST")
            .uri("/api/logdata")
            .header("content-type", "application/json")
            .body(Body::from(DISK_FULL))
            .expect("request");
        let response = app.oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json");

        assert_eq!(json["resourceId"], "svc-1");
        assert_eq!(json["metadata"]["parentResourceId"], "p1");
        assert_eq!(state.store().len(), 1);
    }

    #[tokio::test]
    async fn ingest_without_timestamp_is_client_error() {
        let app = create_router(make_state());
        let status = ingest(&app, r#"{"level": "INFO"}"#).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn search_filters_by_level_case_insensitively() {
        let app = create_router(make_state());
        assert_eq!(ingest(&app, DISK_FULL).await, StatusCode::CREATED);

        let (status, json) = get_json(&app, "/api/query_search?level=error").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(1));

        let (status, json) = get_json(&app, "/api/query_search?level=debug").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn search_supports_regex_parameter() {
        let app = create_router(make_state());
        assert_eq!(ingest(&app, DISK_FULL).await, StatusCode::CREATED);

        let (status, json) = get_json(&app, "/api/query_search?regex_search=dis.*full").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(1));

        let (status, json) = get_json(&app, "/api/query_search?regex_search=%5Efull").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn search_rejects_malformed_regex_with_400() {
        let app = create_router(make_state());

        let (status, json) = get_json(&app, "/api/query_search?regex_search=%28%5B").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_filter");
    }

    #[tokio::test]
    async fn search_rejects_malformed_date_with_400() {
        let app = create_router(make_state());

        let (status, json) =
            get_json(&app, "/api/query_search?start_date=yesterday&end_date=today").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["message"]
                .as_str()
                .expect("message")
                .contains("yesterday")
        );
    }

    #[tokio::test]
    async fn browse_filters_by_year_and_echoes_params() {
        let app = create_router(make_state());
        assert_eq!(ingest(&app, DISK_FULL).await, StatusCode::CREATED);

        let (status, json) = get_json(&app, "/api/logs?start_date=2023").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["records"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["start_date"], "2023");

        let (status, json) = get_json(&app, "/api/logs?start_date=1999").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["records"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn browse_rejects_bad_year_with_400() {
        let app = create_router(make_state());

        let (status, json) = get_json(&app, "/api/logs?start_date=20x3").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_filter");
    }

    #[tokio::test]
    async fn browse_resource_id_is_exact_while_search_is_substring() {
        let app = create_router(make_state());
        assert_eq!(ingest(&app, DISK_FULL).await, StatusCode::CREATED);
        let svc10 = DISK_FULL.replace("svc-1", "svc-10");
        assert_eq!(ingest(&app, &svc10).await, StatusCode::CREATED);

        let (_, json) = get_json(&app, "/api/logs?resourceId=svc-1").await;
        assert_eq!(json["records"].as_array().map(Vec::len), Some(1));

        let (_, json) = get_json(&app, "/api/query_search?resource_id=svc-1").await;
        assert_eq!(json.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn unknown_endpoint_is_404() {
        let app = create_router(make_state());
        let (status, _) = get_json(&app, "/api/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
