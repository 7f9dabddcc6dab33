//! Request dispatcher — orchestrates one advisory request end to end.
//!
//! Detect transport, parse, validate, synthesize the engine
//! instruction, invoke the engine once, extract weather, render. Every
//! failure short-circuits to an error render; nothing propagates past
//! this module as an unhandled fault.

use serde_json::Value;
use uuid::Uuid;

use gt_protocol::{ClassifiedError, NormalizedRequest, Transport};

use crate::state::AppState;
use crate::{classify, transport, validate, weather};

/// Handle one incoming event of either shape and produce the rendered
/// response for it.
pub async fn handle_event(state: &AppState, event: Value) -> Value {
    let request_id = Uuid::now_v7();

    if transport::is_gateway_event(&event) {
        tracing::info!(request_id = %request_id, "processing gateway event");
        handle_gateway(state, &event, request_id).await
    } else {
        tracing::info!(request_id = %request_id, "processing direct invocation");
        handle_direct(state, &event, request_id).await
    }
}

async fn handle_gateway(state: &AppState, event: &Value, request_id: Uuid) -> Value {
    // CORS preflight bypasses all validation and dispatch.
    if event["httpMethod"].as_str() == Some("OPTIONS") {
        return transport::render_gateway_preflight();
    }

    let body = match transport::parse_gateway_body(event) {
        Ok(body) => body,
        Err(parse_error) => {
            tracing::warn!(request_id = %request_id, error = %parse_error, "malformed gateway body");
            return transport::render_gateway_error(
                &ClassifiedError::bad_request(format!("Invalid request format: {parse_error}")),
                None,
                request_id,
            );
        }
    };

    let user_value = &body["user_id"];
    let user_id = match validate::validate_user_id(user_value) {
        Ok(user_id) => user_id,
        Err(validation_error) => {
            tracing::warn!(request_id = %request_id, error = %validation_error, "invalid user_id");
            // Echo the identifier only if it was at least a string.
            return transport::render_gateway_error(
                &ClassifiedError::bad_request(validation_error.to_string()),
                user_value.as_str(),
                request_id,
            );
        }
    };

    let request =
        NormalizedRequest::for_identifier(Transport::Gateway, user_id).with_request_id(request_id);
    run(state, request).await
}

async fn handle_direct(state: &AppState, event: &Value, request_id: Uuid) -> Value {
    let user_value = &event["user_id"];

    let request = if !user_value.is_null() {
        match validate::validate_user_id(user_value) {
            Ok(user_id) => NormalizedRequest::for_identifier(Transport::Direct, user_id)
                .with_request_id(request_id),
            Err(validation_error) => {
                tracing::warn!(request_id = %request_id, error = %validation_error, "invalid user_id");
                return transport::render_direct_error(
                    &format!("Error: {validation_error}"),
                    user_value.as_str(),
                    request_id,
                );
            }
        }
    } else if let Some(prompt) = event["prompt"].as_str() {
        NormalizedRequest::for_instruction(Transport::Direct, prompt).with_request_id(request_id)
    } else {
        return transport::render_direct_error(
            "Error: Either 'user_id' or 'prompt' must be provided in the event.",
            None,
            request_id,
        );
    };

    run(state, request).await
}

/// Invoke the engine exactly once and render the terminal outcome.
async fn run(state: &AppState, request: NormalizedRequest) -> Value {
    tracing::info!(
        request_id = %request.request_id,
        transport = ?request.transport,
        user_id = ?request.user_id,
        "dispatching advisory request"
    );

    match state.engine.advise(&request.instruction).await {
        Ok(result) => {
            let weather = weather::extract(&result);
            match request.transport {
                Transport::Gateway => transport::render_gateway_success(
                    &result,
                    request.user_id.as_deref(),
                    weather.as_ref(),
                    request.request_id,
                ),
                Transport::Direct => transport::render_direct_success(
                    &result,
                    request.user_id.as_deref(),
                    weather.as_ref(),
                    request.request_id,
                ),
            }
        }
        Err(engine_error) => {
            // Full detail stays server-side; callers get the classified
            // summary only.
            tracing::error!(
                request_id = %request.request_id,
                error = %engine_error,
                "advisory engine failed"
            );
            let classified = classify::classify(&engine_error, request.user_id.as_deref());
            match request.transport {
                Transport::Gateway => transport::render_gateway_error(
                    &classified,
                    request.user_id.as_deref(),
                    request.request_id,
                ),
                Transport::Direct => transport::render_direct_error(
                    &classified.message,
                    request.user_id.as_deref(),
                    request.request_id,
                ),
            }
        }
    }
}
