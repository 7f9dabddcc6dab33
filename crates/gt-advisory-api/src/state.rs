//! Shared application state for the Axum server.
//!
//! Each request is a fully independent unit of work; the state carries
//! only an immutable engine handle — no locks, no caches.

use std::sync::Arc;

use serde_json::json;

use crate::engine::{AdvisoryEngine, MockAdvisor};

/// Shared application state, wrapped in `Arc` for Axum handler sharing.
#[derive(Clone)]
pub struct AppState {
    /// Advisory engine serving this process.
    pub engine: Arc<dyn AdvisoryEngine>,
}

impl AppState {
    /// Create state around any engine implementation.
    pub fn new(engine: Arc<dyn AdvisoryEngine>) -> Self {
        Self { engine }
    }

    /// Create state with a canned sample advisor (development / tests).
    pub fn with_sample_engine() -> Self {
        let engine = MockAdvisor::with_advice(
            "Mild conditions at 18°C with 60% humidity, partly cloudy. Water the rose tonight.",
            json!({
                "Rose": "Expected light rain tomorrow; skip the morning watering.",
                "Boston Fern": "Indoor humidity is fine; mist as usual."
            }),
        );
        Self {
            engine: Arc::new(engine),
        }
    }
}
