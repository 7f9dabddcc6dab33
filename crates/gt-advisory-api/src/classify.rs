//! Failure classification — maps collaborator failures to the
//! caller-facing taxonomy.
//!
//! Tool failures arrive as typed variants and map directly. Failures
//! from the engine backend cross a service boundary as text, so those
//! fall back to lower-cased substring matching over the description —
//! explicitly best-effort, first match wins.

use gt_advisor_tools::ToolError;
use gt_protocol::ClassifiedError;

use crate::engine::EngineError;

/// Classify an engine failure for the caller.
///
/// `user_id` is referenced in not-found and validation messages; raw
/// failure internals never reach the output.
pub fn classify(error: &EngineError, user_id: Option<&str>) -> ClassifiedError {
    match error {
        EngineError::Tool(tool_err) => classify_tool(tool_err, user_id),
        EngineError::Backend(text) => classify_text(text, user_id),
    }
}

/// Typed channel: one arm per tool failure variant.
fn classify_tool(error: &ToolError, user_id: Option<&str>) -> ClassifiedError {
    match error {
        ToolError::UserNotFound(id) => ClassifiedError::not_found(format!(
            "User not found: No user profile found for user_id: {id}"
        )),
        ToolError::PlantNotFound(id) => ClassifiedError::not_found(format!(
            "Plant not found: No plant definition found for plant_id: {id}"
        )),
        ToolError::AccessDenied(_) => {
            ClassifiedError::internal("Database access error. Please contact support.")
        }
        ToolError::Throttled(_) => ClassifiedError::unavailable(
            "Service temporarily unavailable due to high demand. Please try again later.",
        ),
        ToolError::Validation(_) => ClassifiedError::bad_request(format!(
            "Invalid user_id format: {}",
            user_id.unwrap_or("unknown")
        )),
        ToolError::Forecast(_) => ClassifiedError::unavailable(
            "Weather service temporarily unavailable. Please try again later.",
        ),
        ToolError::Store(_) | ToolError::Other(_) => {
            ClassifiedError::internal("A database error occurred while processing your request.")
        }
    }
}

/// Opaque channel: substring matching over the failure description,
/// in priority order.
pub fn classify_text(description: &str, user_id: Option<&str>) -> ClassifiedError {
    let text = description.to_lowercase();
    let id = user_id.unwrap_or("unknown");

    // 1. Not-found style resource errors reference the identifier.
    if text.contains("no user data found")
        || text.contains("no user item found")
        || text.contains("no data found")
        || text.contains("no item found")
        || text.contains("resourcenotfoundexception")
    {
        return ClassifiedError::not_found(format!(
            "User not found: No user profile found for user_id: {id}"
        ));
    }

    // 2. Data-layer access faults: generic message, never echo internals.
    if text.contains("accessdeniedexception") || text.contains("unauthorizedoperation") {
        return ClassifiedError::internal("Database access error. Please contact support.");
    }

    // 3. Data-layer throttling.
    if text.contains("throttlingexception") || text.contains("provisionedthroughputexceeded") {
        return ClassifiedError::unavailable(
            "Service temporarily unavailable due to high demand. Please try again later.",
        );
    }

    // 4. Data-layer validation faults.
    if text.contains("validationexception") {
        return ClassifiedError::bad_request(format!("Invalid user_id format: {id}"));
    }

    // 5. Advisory engine / model backend faults.
    if text.contains("bedrock") || text.contains("nova") {
        if text.contains("throttling") || text.contains("rate") {
            return ClassifiedError::unavailable(
                "AI service temporarily unavailable due to high demand. Please try again later.",
            );
        }
        if text.contains("access") || text.contains("unauthorized") {
            return ClassifiedError::internal("AI service access error. Please contact support.");
        }
        return ClassifiedError::unavailable(
            "AI service temporarily unavailable. Please try again later.",
        );
    }

    // 6. Forecast-fetch faults.
    if text.contains("weather") || text.contains("open-meteo") || text.contains("forecast") {
        return ClassifiedError::unavailable(
            "Weather service temporarily unavailable. Please try again later.",
        );
    }

    // 7. Everything else.
    ClassifiedError::internal("An internal error occurred while processing your request.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_protocol::ErrorKind;

    // ── classify_text ────────────────────────────────────────────

    #[test]
    fn resource_not_found_maps_to_404() {
        let err = classify_text("ResourceNotFoundException", Some("u1"));
        assert_eq!(err.status_code, 404);
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.contains("u1"));
    }

    #[test]
    fn user_data_not_found_maps_to_404() {
        let err = classify_text("No user data found for user ID 'u9'.", Some("u9"));
        assert_eq!(err.status_code, 404);
    }

    #[test]
    fn throttling_maps_to_503() {
        let err = classify_text("ThrottlingException", None);
        assert_eq!(err.status_code, 503);
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn access_denied_hides_internals() {
        let err = classify_text(
            "AccessDeniedException: arn:aws:iam::123456789:role/lookup is not authorized",
            Some("u1"),
        );
        assert_eq!(err.status_code, 500);
        assert!(!err.message.contains("arn:aws"));
        assert!(!err.message.contains("u1"));
    }

    #[test]
    fn validation_exception_maps_to_400() {
        let err = classify_text("ValidationException: key element mismatch", Some("u1"));
        assert_eq!(err.status_code, 400);
        assert!(err.message.contains("u1"));
    }

    #[test]
    fn engine_throttling_maps_to_503() {
        let err = classify_text("bedrock converse error: rate limit exceeded", None);
        assert_eq!(err.status_code, 503);
        assert!(err.message.contains("AI service"));
    }

    #[test]
    fn engine_access_maps_to_500() {
        let err = classify_text("bedrock: access denied for model invocation", None);
        assert_eq!(err.status_code, 500);
        assert!(err.message.contains("AI service"));
    }

    #[test]
    fn engine_generic_maps_to_503() {
        let err = classify_text("nova model returned malformed response", None);
        assert_eq!(err.status_code, 503);
    }

    #[test]
    fn forecast_failure_maps_to_503() {
        let err = classify_text("weather forecast fetch failed: HTTP 502", None);
        assert_eq!(err.status_code, 503);
        assert!(err.message.contains("Weather service"));
    }

    #[test]
    fn unrecognized_defaults_to_500() {
        let err = classify_text("segfault in module xyz", None);
        assert_eq!(err.status_code, 500);
        assert_eq!(err.kind, ErrorKind::InternalError);
    }

    #[test]
    fn data_layer_throttle_wins_over_engine_wording() {
        // Priority order: data-layer patterns fire before engine patterns.
        let err = classify_text("bedrock tool error: ThrottlingException from dynamodb", None);
        assert_eq!(err.status_code, 503);
        assert!(err.message.contains("Service temporarily unavailable"));
    }

    // ── typed channel ────────────────────────────────────────────

    #[test]
    fn typed_user_not_found() {
        let err = classify(
            &EngineError::Tool(ToolError::UserNotFound("ghost".into())),
            Some("ghost"),
        );
        assert_eq!(err.status_code, 404);
        assert!(err.message.contains("ghost"));
    }

    #[test]
    fn typed_throttled() {
        let err = classify(
            &EngineError::Tool(ToolError::Throttled("ProvisionedThroughputExceeded".into())),
            None,
        );
        assert_eq!(err.status_code, 503);
    }

    #[test]
    fn typed_forecast_failure() {
        let err = classify(
            &EngineError::Tool(ToolError::Forecast("connect timeout".into())),
            None,
        );
        assert_eq!(err.status_code, 503);
        assert!(!err.message.contains("connect timeout"));
    }

    #[test]
    fn typed_store_fault_is_internal() {
        let err = classify(
            &EngineError::Tool(ToolError::Store("socket closed".into())),
            None,
        );
        assert_eq!(err.status_code, 500);
    }

    #[test]
    fn opaque_backend_falls_through_to_text_matching() {
        let err = classify(
            &EngineError::Backend("bedrock converse error: throttling".into()),
            None,
        );
        assert_eq!(err.status_code, 503);
    }
}
