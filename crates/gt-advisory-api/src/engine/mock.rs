//! Mock advisory engine for tests — canned advice or canned failure.

use async_trait::async_trait;
use std::sync::Mutex;

use gt_protocol::AdvisoryResult;

use super::{AdvisoryEngine, EngineError};

/// A mock engine that returns a fixed result (or a fixed failure) and
/// records the instructions it was given.
pub struct MockAdvisor {
    result: Option<AdvisoryResult>,
    fail_with: Option<fn() -> EngineError>,
    seen: Mutex<Vec<String>>,
}

impl MockAdvisor {
    /// Engine that always returns the given advice.
    pub fn with_advice(summary: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            result: Some(AdvisoryResult::new(summary, details)),
            fail_with: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Engine that always fails with the given error.
    pub fn failing(fail_with: fn() -> EngineError) -> Self {
        Self {
            result: None,
            fail_with: Some(fail_with),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Instructions this engine has been invoked with, in order.
    pub fn instructions(&self) -> Vec<String> {
        self.seen.lock().expect("instruction log poisoned").clone()
    }
}

#[async_trait]
impl AdvisoryEngine for MockAdvisor {
    async fn advise(&self, instruction: &str) -> Result<AdvisoryResult, EngineError> {
        self.seen
            .lock()
            .expect("instruction log poisoned")
            .push(instruction.to_string());

        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        Ok(self
            .result
            .clone()
            .unwrap_or_else(|| AdvisoryResult::new("", serde_json::json!({}))))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
