//! Transport adapter — detects the invocation shape, parses it, and
//! renders results back into the shape the caller expects.
//!
//! Two shapes exist: the HTTP-gateway proxy event (carrying
//! httpMethod/path/headers/body) and the raw direct payload. Both
//! converge on `NormalizedRequest`; rendering diverges again at the
//! end.

use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use gt_protocol::{AdvisoryResult, ClassifiedError, WeatherConditions};

/// Marker fields only the gateway proxy shape carries. An event is the
/// gateway shape iff all four are present.
const GATEWAY_MARKERS: [&str; 4] = ["httpMethod", "path", "headers", "body"];

/// Detect whether the event came through the HTTP gateway.
pub fn is_gateway_event(event: &Value) -> bool {
    GATEWAY_MARKERS
        .iter()
        .all(|field| event.get(field).is_some())
}

/// Fixed CORS header set attached to every gateway response.
fn cors_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Headers": "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
        "Access-Control-Allow-Methods": "POST,OPTIONS"
    })
}

/// Response timestamp: RFC 3339 UTC with trailing `Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Decode the gateway request body into a mapping.
///
/// A string body is JSON-decoded; an already-structured body is used
/// as-is; an absent or empty body becomes an empty mapping. A malformed
/// string body is the only failure, surfaced before any other
/// processing.
pub fn parse_gateway_body(event: &Value) -> Result<Value, String> {
    match event.get("body") {
        Some(Value::String(s)) if !s.is_empty() => serde_json::from_str(s)
            .map_err(|e| format!("Invalid JSON in request body: {e}")),
        Some(Value::Object(map)) => Ok(Value::Object(map.clone())),
        _ => Ok(json!({})),
    }
}

/// Wrap a body value into the gateway proxy response envelope.
fn gateway_envelope(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": cors_headers(),
        "body": body.to_string(),
    })
}

/// 200 envelope with no body, for CORS preflight negotiation.
pub fn render_gateway_preflight() -> Value {
    json!({
        "statusCode": 200,
        "headers": cors_headers(),
        "body": "",
    })
}

/// Gateway success render.
pub fn render_gateway_success(
    result: &AdvisoryResult,
    user_id: Option<&str>,
    weather: Option<&WeatherConditions>,
    request_id: Uuid,
) -> Value {
    let mut body = json!({
        "statusCode": 200,
        "advice": result.summary,
        "details": result.details,
        "request_id": request_id,
        "timestamp": timestamp_now(),
    });
    if let Some(user_id) = user_id {
        body["user_id"] = json!(user_id);
    }
    if let Some(weather) = weather {
        body["weather_conditions"] = json!(weather);
    }
    gateway_envelope(200, &body)
}

/// Gateway error render. The classified status lands both on the
/// envelope and inside the body.
pub fn render_gateway_error(
    error: &ClassifiedError,
    user_id: Option<&str>,
    request_id: Uuid,
) -> Value {
    let mut body = json!({
        "statusCode": error.status_code,
        "error": error.label(),
        "message": error.message,
        "request_id": request_id,
        "timestamp": timestamp_now(),
    });
    if let Some(user_id) = user_id {
        body["user_id"] = json!(user_id);
    }
    gateway_envelope(error.status_code, &body)
}

/// Direct success render — no HTTP envelope.
pub fn render_direct_success(
    result: &AdvisoryResult,
    user_id: Option<&str>,
    weather: Option<&WeatherConditions>,
    request_id: Uuid,
) -> Value {
    let mut response = json!({
        "advice": result.summary,
        "details": result.details,
        "timestamp": timestamp_now(),
        "request_id": request_id,
    });
    if let Some(user_id) = user_id {
        response["user_id"] = json!(user_id);
    }
    if let Some(weather) = weather {
        response["weather_conditions"] = json!(weather);
    }
    response
}

/// Direct error render — summary carries the message, details stay
/// empty.
pub fn render_direct_error(summary: &str, user_id: Option<&str>, request_id: Uuid) -> Value {
    let mut response = json!({
        "details": {},
        "summary": summary,
        "timestamp": timestamp_now(),
        "request_id": request_id,
    });
    if let Some(user_id) = user_id {
        response["user_id"] = json!(user_id);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_protocol::ErrorKind;
    use serde_json::json;

    // ── detection ────────────────────────────────────────────────

    #[test]
    fn detects_gateway_shape() {
        let event = json!({
            "httpMethod": "POST",
            "path": "/advice",
            "headers": {},
            "body": "{}",
        });
        assert!(is_gateway_event(&event));
    }

    #[test]
    fn partial_markers_are_direct_shape() {
        // All four markers must be present simultaneously.
        let event = json!({"httpMethod": "POST", "path": "/advice"});
        assert!(!is_gateway_event(&event));
        assert!(!is_gateway_event(&json!({"user_id": "abc"})));
    }

    // ── body parsing ─────────────────────────────────────────────

    #[test]
    fn string_body_is_decoded() {
        let event = json!({"body": r#"{"user_id": "abc"}"#});
        let body = parse_gateway_body(&event).unwrap();
        assert_eq!(body["user_id"], "abc");
    }

    #[test]
    fn structured_body_used_as_is() {
        let event = json!({"body": {"user_id": "abc"}});
        let body = parse_gateway_body(&event).unwrap();
        assert_eq!(body["user_id"], "abc");
    }

    #[test]
    fn absent_or_empty_body_becomes_empty_mapping() {
        assert_eq!(parse_gateway_body(&json!({})).unwrap(), json!({}));
        assert_eq!(parse_gateway_body(&json!({"body": null})).unwrap(), json!({}));
        assert_eq!(parse_gateway_body(&json!({"body": ""})).unwrap(), json!({}));
    }

    #[test]
    fn malformed_body_is_rejected() {
        let event = json!({"body": "{not json"});
        let err = parse_gateway_body(&event).unwrap_err();
        assert!(err.contains("Invalid JSON"));
    }

    // ── rendering ────────────────────────────────────────────────

    #[test]
    fn gateway_success_envelope() {
        let result = AdvisoryResult::new("Water tonight", json!({"Rose": "cover"}));
        let id = Uuid::now_v7();
        let rendered = render_gateway_success(&result, Some("u1"), None, id);

        assert_eq!(rendered["statusCode"], 200);
        assert_eq!(
            rendered["headers"]["Access-Control-Allow-Origin"],
            "*"
        );
        assert_eq!(
            rendered["headers"]["Access-Control-Allow-Methods"],
            "POST,OPTIONS"
        );

        let body: Value = serde_json::from_str(rendered["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["advice"], "Water tonight");
        assert_eq!(body["user_id"], "u1");
        assert_eq!(body["request_id"], json!(id));
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(body.get("weather_conditions").is_none());
    }

    #[test]
    fn gateway_success_includes_weather_when_found() {
        let result = AdvisoryResult::new("22°C, sunny", json!({}));
        let weather = WeatherConditions {
            temperature: Some(22),
            humidity: None,
            condition: Some("sunny".into()),
        };
        let rendered = render_gateway_success(&result, Some("u1"), Some(&weather), Uuid::now_v7());
        let body: Value = serde_json::from_str(rendered["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["weather_conditions"]["temperature"], 22);
        assert_eq!(body["weather_conditions"]["condition"], "sunny");
    }

    #[test]
    fn gateway_error_envelope() {
        let error = ClassifiedError::new(ErrorKind::NotFound, "User not found");
        let id = Uuid::now_v7();
        let rendered = render_gateway_error(&error, Some("ghost"), id);

        assert_eq!(rendered["statusCode"], 404);
        let body: Value = serde_json::from_str(rendered["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "User not found");
        assert_eq!(body["user_id"], "ghost");
        assert_eq!(body["request_id"], json!(id));
    }

    #[test]
    fn gateway_error_omits_non_string_identifier() {
        let error = ClassifiedError::bad_request("'user_id' must be a string.");
        let rendered = render_gateway_error(&error, None, Uuid::now_v7());
        let body: Value = serde_json::from_str(rendered["body"].as_str().unwrap()).unwrap();
        assert!(body.get("user_id").is_none());
    }

    #[test]
    fn preflight_render() {
        let rendered = render_gateway_preflight();
        assert_eq!(rendered["statusCode"], 200);
        assert_eq!(rendered["body"], "");
        assert_eq!(
            rendered["headers"]["Access-Control-Allow-Headers"],
            "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token"
        );
    }

    #[test]
    fn direct_success_render() {
        let result = AdvisoryResult::new("All fine", json!({"Fern": "mist daily"}));
        let id = Uuid::now_v7();
        let rendered = render_direct_success(&result, Some("u1"), None, id);

        assert_eq!(rendered["advice"], "All fine");
        assert_eq!(rendered["details"]["Fern"], "mist daily");
        assert_eq!(rendered["user_id"], "u1");
        assert_eq!(rendered["request_id"], json!(id));
        assert!(rendered.get("statusCode").is_none());
    }

    #[test]
    fn direct_error_render() {
        let id = Uuid::now_v7();
        let rendered = render_direct_error("Error: something went wrong", None, id);
        assert_eq!(rendered["summary"], "Error: something went wrong");
        assert_eq!(rendered["details"], json!({}));
        assert_eq!(rendered["request_id"], json!(id));
        assert!(rendered.get("user_id").is_none());
    }
}
