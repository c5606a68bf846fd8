use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::metrics_middleware;
use super::query;
use super::state::AppState;
use super::ui;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Web form
        .route("/", get(ui::index))
        // JSON API
        .route("/api/query", post(query::create_query))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route_layer(middleware::from_fn(metrics_middleware))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Router plus the Prometheus endpoint when metrics are enabled
pub fn create_router_with_metrics(
    state: AppState,
    metrics: Option<PrometheusMetrics>,
    metrics_path: &str,
) -> Router {
    let router = create_router(state);

    match metrics {
        Some(metrics) => router.merge(create_metrics_router(metrics, metrics_path)),
        None => router,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::corpus::Recommendation;
    use crate::domain::llm::Usage;
    use crate::domain::store::{Document, DocumentStore};
    use crate::domain::{DomainError, PipelineResult, QueryService};
    use crate::infrastructure::store::InMemoryDocumentStore;

    /// Echoes the query back, or fails when configured to
    #[derive(Default)]
    struct StubQueryService {
        error: Option<fn() -> DomainError>,
        calls: std::sync::atomic::AtomicUsize,
    }

    impl StubQueryService {
        fn calls(&self) -> usize {
            self.calls.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QueryService for StubQueryService {
        async fn answer(&self, query: &str) -> Result<PipelineResult, DomainError> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

            if let Some(error) = self.error {
                return Err(error());
            }

            let doc = Document::from_recommendation(&Recommendation::new(
                "Offer regular paracetamol",
                "Guideline X",
            ))
            .with_score(0.9);

            Ok(PipelineResult {
                reply: format!("Summary for {}\n\nReferences\n- Guideline X", query),
                documents: vec![doc],
                model: "gpt-4-turbo-2024-04-09".to_string(),
                usage: Some(Usage::new(100, 20)),
            })
        }
    }

    async fn app_with(service: Arc<StubQueryService>, documents: usize) -> Router {
        let store = InMemoryDocumentStore::new();
        let docs = (0..documents)
            .map(|i| Document::new(format!("doc-{i}"), "text").with_embedding(vec![1.0]))
            .collect();
        store.write_documents(docs).await.unwrap();

        create_router(AppState::new(service, Arc::new(store)))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn json_post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_without_query_skips_pipeline() {
        let service = Arc::new(StubQueryService::default());
        let app = app_with(service.clone(), 1).await;

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("ChatCPG-demo"));
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_index_with_blank_query_skips_pipeline() {
        let service = Arc::new(StubQueryService::default());
        let app = app_with(service.clone(), 1).await;

        let response = app
            .oneshot(Request::get("/?query=%20%20").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_index_with_query_shows_reply() {
        let service = Arc::new(StubQueryService::default());
        let app = app_with(service.clone(), 1).await;

        let response = app
            .oneshot(
                Request::get("/?query=hip+fracture")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Summary for hip fracture"));
        assert!(body.contains("Guideline X"));
        assert!(body.contains(r#"value="hip fracture""#));
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_index_pipeline_failure_is_http_error() {
        let service = Arc::new(StubQueryService {
            error: Some(|| DomainError::provider("openai", "rate limited")),
            ..Default::default()
        });
        let app = app_with(service, 1).await;

        let response = app
            .oneshot(Request::get("/?query=falls").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_api_query_returns_reply_and_documents() {
        let service = Arc::new(StubQueryService::default());
        let app = app_with(service, 1).await;

        let response = app
            .oneshot(json_post(r#"{"query": "hip fracture"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json["reply"].as_str().unwrap().starts_with("Summary for hip fracture"));
        assert_eq!(json["documents"][0]["source"], "Guideline X");
        assert_eq!(json["usage"]["prompt_tokens"], 100);
    }

    #[tokio::test]
    async fn test_api_query_rejects_empty_query() {
        let service = Arc::new(StubQueryService::default());
        let app = app_with(service.clone(), 1).await;

        let response = app.oneshot(json_post(r#"{"query": "  "}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_api_query_credential_error_is_unauthorized() {
        let service = Arc::new(StubQueryService {
            error: Some(|| DomainError::credential("invalid api key")),
            ..Default::default()
        });
        let app = app_with(service, 1).await;

        let response = app.oneshot(json_post(r#"{"query": "falls"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_api_query_malformed_body() {
        let app = app_with(Arc::new(StubQueryService::default()), 1).await;

        let response = app.oneshot(json_post("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ready_reports_document_count() {
        let app = app_with(Arc::new(StubQueryService::default()), 3).await;

        let response = app
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["checks"][0]["documents"], 3);
    }

    #[tokio::test]
    async fn test_ready_with_empty_store_is_degraded() {
        let app = app_with(Arc::new(StubQueryService::default()), 0).await;

        let response = app
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "degraded");
    }

    #[tokio::test]
    async fn test_health_and_live() {
        let app = app_with(Arc::new(StubQueryService::default()), 0).await;

        let health = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let live = app
            .oneshot(Request::get("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(live.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_without_metrics_no_metrics_route() {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
        let app = create_router_with_metrics(
            AppState::new(Arc::new(StubQueryService::default()), store),
            None,
            "/metrics",
        );

        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
