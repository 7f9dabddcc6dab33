use serde::{Deserialize, Serialize};

/// Successful output of the advisory engine.
///
/// Produced by the external engine, consumed exactly once by the
/// dispatcher. `details` is whatever structured mapping the engine
/// returned (typically advice keyed by plant common name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryResult {
    /// Concise overall advice text.
    pub summary: String,
    /// Per-plant detail mapping (free-form JSON).
    #[serde(default)]
    pub details: serde_json::Value,
}

impl AdvisoryResult {
    pub fn new(summary: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            summary: summary.into(),
            details,
        }
    }
}

/// Weather fields heuristically mined from the engine's prose.
///
/// Display aid only, never authoritative telemetry. Consumers must
/// tolerate total absence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl WeatherConditions {
    /// True when none of the three scans found anything.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none() && self.condition.is_none()
    }
}
