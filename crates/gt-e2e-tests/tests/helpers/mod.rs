//! Shared test harness for E2E integration tests.
//!
//! Drives the full boundary — router, dispatcher, transport adapter,
//! classifier, weather extractor — with a mock advisory engine behind
//! the real engine seam.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use gt_advisory_api::engine::{EngineError, MockAdvisor};
use gt_advisory_api::routes::build_router;
use gt_advisory_api::state::AppState;

/// End-to-end test harness wiring the router to a mock engine.
pub struct TestHarness {
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
    /// The mock engine, kept for instruction assertions.
    pub engine: Arc<MockAdvisor>,
}

impl TestHarness {
    /// Harness whose engine returns sample advice with embedded weather
    /// wording.
    pub fn with_sample_advice() -> Self {
        let engine = Arc::new(MockAdvisor::with_advice(
            "Cool evening ahead at 12°C with 70% humidity, overcast. Cover the rose.",
            json!({
                "Rose": "Frost risk tonight; use a fleece cover.",
                "Boston Fern": "Conditions are currently ideal for your Boston Fern."
            }),
        ));
        Self::with_engine(engine)
    }

    /// Harness whose engine always fails with the given error.
    pub fn failing(fail_with: fn() -> EngineError) -> Self {
        Self::with_engine(Arc::new(MockAdvisor::failing(fail_with)))
    }

    fn with_engine(engine: Arc<MockAdvisor>) -> Self {
        let state = AppState::new(engine.clone());
        Self {
            router: build_router(state),
            engine,
        }
    }

    /// POST a raw event to /invoke and return the rendered response.
    pub async fn invoke(&self, event: Value) -> Value {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post("/invoke")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&event).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "hosting route is always 200");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }
}

/// Build a gateway proxy event with a JSON-string body.
pub fn gateway_event(method: &str, body: Value) -> Value {
    json!({
        "httpMethod": method,
        "path": "/advice",
        "headers": {"content-type": "application/json"},
        "body": body.to_string(),
    })
}

/// Decode the JSON-string body of a gateway envelope.
pub fn gateway_body(rendered: &Value) -> Value {
    serde_json::from_str(rendered["body"].as_str().expect("gateway body is a string"))
        .expect("gateway body is JSON")
}
