//! Core capability types and the AdvisorTool trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ToolResult;
use crate::store::PlantStore;

// ── User record ───────────────────────────────────────────────

/// A user's registered location and plant list.
///
/// Coordinates are optional because registration can be partial; the
/// lookup tool reports incomplete location as a non-terminal tool
/// failure rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Plant IDs registered to this user.
    #[serde(default)]
    pub plants: Vec<String>,
}

// ── Tool output ───────────────────────────────────────────────

/// Result of executing a capability tool, as reported to the engine.
///
/// A failed output (`success: false`) is conversational: the engine sees
/// the error text and decides how to proceed. Terminal faults use
/// `ToolError` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Tool name that produced this output.
    pub tool_name: String,
    /// Whether the tool execution succeeded.
    pub success: bool,
    /// Structured result data (JSON).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Error message if success is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutput {
    pub fn success(
        tool_name: impl Into<String>,
        data: serde_json::Value,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            data: Some(data),
            summary: Some(summary.into()),
            error: None,
        }
    }

    pub fn failure(tool_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            data: None,
            summary: None,
            error: Some(error.into()),
        }
    }

    /// JSON form sent back to the engine as the tool result payload.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({ "tool_name": self.tool_name, "success": false })
        })
    }
}

// ── Tool context ──────────────────────────────────────────────

/// Shared collaborators handed to every tool execution.
pub struct ToolContext<'a> {
    /// Backing data tables (user + plant).
    pub store: &'a dyn PlantStore,
    /// HTTP client for the forecast fetch capability.
    pub http: &'a reqwest::Client,
    /// Base URL of the forecast API (Open-Meteo compatible).
    pub forecast_base_url: &'a str,
}

// ── AdvisorTool trait ─────────────────────────────────────────

/// Trait for capability tools the advisory engine may invoke.
///
/// Mirrors the shape the engine declares to the model: name,
/// description, and a JSON Schema for arguments.
#[async_trait]
pub trait AdvisorTool: Send + Sync {
    /// Tool name (e.g., "lookup_user").
    fn name(&self) -> &str;

    /// Human-readable description, shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema describing accepted arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with JSON arguments.
    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> ToolResult<ToolOutput>;
}
