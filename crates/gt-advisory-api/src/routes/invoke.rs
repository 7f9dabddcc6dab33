//! Event ingestion endpoint — the hosting runtime's single entry point.

use axum::Json;
use axum::extract::State;
use serde_json::Value;

use crate::dispatch;
use crate::state::AppState;

/// POST /invoke — accept a raw incoming event of either shape and
/// return its rendered response.
///
/// The route itself always answers 200: transport-level status codes
/// live inside the gateway envelope, the way a proxy-integration
/// runtime delivers them.
pub async fn invoke(State(state): State<AppState>, Json(event): Json<Value>) -> Json<Value> {
    Json(dispatch::handle_event(&state, event).await)
}
