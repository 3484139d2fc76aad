//! API Module
//!
//! HTTP API layer of the server.
//! Each submodule handles endpoints for one remote-backed feature.

pub mod analyze;
pub mod error;
pub mod health;
pub mod shopping;
pub mod tryon;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        // Health check
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Feature endpoints
        .route("/api/try-on", post(tryon::create_try_on))
        .route("/api/analyze-outfit", post(analyze::analyze_outfit))
        .route("/api/shopping-search", post(shopping::shopping_search))
        // Add state and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use fitcheck_client::{
        ClientError, JobPoller, JobSubmitter, OutfitAnalyzer, PollConfig, ShoppingProvider,
        StatusSource,
    };
    use fitcheck_core::domain::analysis::OutfitAnalysis;
    use fitcheck_core::domain::shopping::ShoppingItem;
    use fitcheck_core::domain::tryon::{JobHandle, JobStatus, StatusReport, TryOnRequest};
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tower::util::ServiceExt;

    use crate::state::{ShoppingBackend, TryOnBackend};

    enum Submit {
        Accept,
        HttpError(u16),
        Rejected(&'static str),
    }

    struct FakeSubmitter(Submit);

    #[async_trait]
    impl JobSubmitter for FakeSubmitter {
        async fn submit(&self, _req: &TryOnRequest) -> fitcheck_client::Result<JobHandle> {
            match &self.0 {
                Submit::Accept => Ok(JobHandle::new("job-1").unwrap()),
                Submit::HttpError(status) => Err(ClientError::api_error(*status, "denied")),
                Submit::Rejected(msg) => Err(ClientError::Rejected(msg.to_string())),
            }
        }
    }

    /// Replays scripted answers, then reports `pending`
    struct FakeStatus(Mutex<VecDeque<fitcheck_client::Result<StatusReport>>>);

    #[async_trait]
    impl StatusSource for FakeStatus {
        async fn fetch_status(&self, _handle: &JobHandle) -> fitcheck_client::Result<StatusReport> {
            self.0
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(StatusReport::with_status(JobStatus::Pending)))
        }
    }

    struct FakeAnalyzer;

    #[async_trait]
    impl OutfitAnalyzer for FakeAnalyzer {
        async fn analyze(&self, image_url: &str) -> fitcheck_client::Result<OutfitAnalysis> {
            Ok(OutfitAnalysis {
                message: format!("Great fit in {}", image_url),
            })
        }
    }

    /// Echoes the query it receives as the title of a single item
    struct FakeShopping;

    #[async_trait]
    impl ShoppingProvider for FakeShopping {
        async fn search(
            &self,
            query: &str,
            _num_results: usize,
        ) -> fitcheck_client::Result<Vec<ShoppingItem>> {
            Ok(vec![ShoppingItem {
                title: query.to_string(),
                price: "£20".to_string(),
                seller: "Shop".to_string(),
                link: "https://shop/item".to_string(),
                image_url: "https://shop/item.jpg".to_string(),
            }])
        }
    }

    fn empty_state() -> AppState {
        AppState {
            tryon: None,
            analyzer: None,
            shopping: None,
        }
    }

    fn tryon_state(
        submit: Submit,
        statuses: Vec<fitcheck_client::Result<StatusReport>>,
    ) -> AppState {
        let status: Arc<dyn StatusSource> = Arc::new(FakeStatus(Mutex::new(statuses.into())));
        AppState {
            tryon: Some(TryOnBackend {
                submitter: Arc::new(FakeSubmitter(submit)),
                poller: Arc::new(JobPoller::new(
                    status,
                    PollConfig::new(3, Duration::from_millis(1)),
                )),
            }),
            ..empty_state()
        }
    }

    fn full_state() -> AppState {
        AppState {
            analyzer: Some(Arc::new(FakeAnalyzer)),
            shopping: Some(ShoppingBackend {
                provider: Arc::new(FakeShopping),
                num_results: 5,
                menswear: true,
            }),
            ..tryon_state(Submit::Accept, vec![])
        }
    }

    async fn send(state: AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        respond(state, request).await
    }

    /// Posts `body` verbatim, with an optional content type
    async fn send_raw(
        state: AppState,
        uri: &str,
        content_type: Option<&str>,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }

        respond(state, request.body(Body::from(body)).unwrap()).await
    }

    async fn respond(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let app = create_router(state, 1024 * 1024);
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, value)
    }

    fn try_on_body() -> Value {
        json!({ "modelImage": "https://img/model.jpg", "garmentImage": "https://img/shirt.jpg" })
    }

    #[tokio::test]
    async fn test_health_and_root() {
        let (status, body) = send(empty_state(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");

        let (status, body) = send(empty_state(), Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Server is running!");
    }

    #[tokio::test]
    async fn test_try_on_completes() {
        let state = tryon_state(
            Submit::Accept,
            vec![
                Ok(StatusReport::with_status(JobStatus::Processing)),
                Ok(StatusReport::completed("https://cdn/result.png")),
            ],
        );

        let (status, body) = send(state, Method::POST, "/api/try-on", Some(try_on_body())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "completed");
        assert_eq!(body["result"], "https://cdn/result.png");
    }

    #[tokio::test]
    async fn test_try_on_missing_image() {
        let (status, body) = send(
            full_state(),
            Method::POST,
            "/api/try-on",
            Some(json!({ "modelImage": "https://img/model.jpg" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required images");
    }

    #[tokio::test]
    async fn test_try_on_not_configured() {
        let (status, body) = send(empty_state(), Method::POST, "/api/try-on", Some(try_on_body())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "API key not configured");
    }

    #[tokio::test]
    async fn test_try_on_remote_failure() {
        let state = tryon_state(Submit::Accept, vec![Ok(StatusReport::failed("bad image"))]);

        let (status, body) = send(state, Method::POST, "/api/try-on", Some(try_on_body())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Processing failed: bad image");
    }

    #[tokio::test]
    async fn test_try_on_timeout() {
        let state = tryon_state(Submit::Accept, vec![]);

        let (status, body) = send(state, Method::POST, "/api/try-on", Some(try_on_body())).await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert!(body["error"].as_str().unwrap().contains("try again"));
    }

    #[tokio::test]
    async fn test_try_on_malformed_result() {
        let state = tryon_state(
            Submit::Accept,
            vec![Ok(StatusReport::with_status(JobStatus::Completed))],
        );

        let (status, _) = send(state, Method::POST, "/api/try-on", Some(try_on_body())).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_try_on_job_gone() {
        let state = tryon_state(
            Submit::Accept,
            vec![
                Err(ClientError::NotFound("gone".to_string())),
                Err(ClientError::NotFound("gone".to_string())),
            ],
        );

        let (status, body) = send(state, Method::POST, "/api/try-on", Some(try_on_body())).await;

        assert_eq!(status, StatusCode::GONE);
        assert!(body["error"].as_str().unwrap().contains("job-1"));
    }

    #[tokio::test]
    async fn test_try_on_submit_rejections() {
        let state = tryon_state(Submit::HttpError(401), vec![]);
        let (status, body) = send(state, Method::POST, "/api/try-on", Some(try_on_body())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["details"]["status"], 401);

        let state = tryon_state(Submit::Rejected("ImageLoadError"), vec![]);
        let (status, body) = send(state, Method::POST, "/api/try-on", Some(try_on_body())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ImageLoadError");
    }

    #[tokio::test]
    async fn test_unreadable_bodies_answer_with_json_errors() {
        for uri in ["/api/try-on", "/api/analyze-outfit"] {
            let (status, body) =
                send_raw(full_state(), uri, Some("application/json"), "{not json").await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert!(body["error"].as_str().unwrap().contains("JSON"), "{}", uri);

            let (status, body) = send_raw(full_state(), uri, None, r#"{"imageUrl":"x"}"#).await;
            assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE, "{}", uri);
            assert!(body["error"].as_str().unwrap().contains("Content-Type"), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_unreadable_shopping_body_keeps_results_field() {
        let (status, body) = send_raw(
            full_state(),
            "/api/shopping-search",
            Some("application/json"),
            "{not json",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(body["results"], json!([]));

        let (status, body) =
            send_raw(full_state(), "/api/shopping-search", None, r#"{"searchQuery":"x"}"#).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["results"], json!([]));
    }

    #[tokio::test]
    async fn test_analyze_outfit() {
        let (status, body) = send(
            full_state(),
            Method::POST,
            "/api/analyze-outfit",
            Some(json!({ "imageUrl": "https://img/outfit.jpg" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Great fit in https://img/outfit.jpg");

        let (status, body) =
            send(full_state(), Method::POST, "/api/analyze-outfit", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No image provided.");
    }

    #[tokio::test]
    async fn test_shopping_search() {
        let (status, body) = send(
            full_state(),
            Method::POST,
            "/api/shopping-search",
            Some(json!({ "searchQuery": "denim jacket" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["query"], "men's denim jacket");
        assert_eq!(body["results"][0]["title"], "men's denim jacket");
        assert_eq!(body["results"][0]["image_url"], "https://shop/item.jpg");
    }

    #[tokio::test]
    async fn test_shopping_errors_keep_results_field() {
        let (status, body) = send(
            empty_state(),
            Method::POST,
            "/api/shopping-search",
            Some(json!({ "searchQuery": "denim jacket" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["results"], json!([]));

        let (status, body) = send(
            full_state(),
            Method::POST,
            "/api/shopping-search",
            Some(json!({ "searchQuery": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No query provided");
    }
}
