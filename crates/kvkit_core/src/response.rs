use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

pub fn success_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: default_headers(),
        body: serde_json::to_string(&payload).expect("response payload should serialize"),
    }
}

pub fn error_response(status_code: u16, payload: Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: default_headers(),
        body: payload.to_string(),
    }
}

pub fn validation_error_response(message: &str) -> ApiGatewayResponse {
    error_response(
        400,
        json!({
            "error": "validation_error",
            "message": message,
        }),
    )
}

fn default_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Credentials": true,
    })
}

/// Unwraps an API Gateway proxy event down to its JSON request payload.
/// Accepts a bare object (direct invocation), an event whose `body` is an
/// object or a stringified JSON document, or a null body.
pub fn normalize_apigw_event(event: Value) -> Result<Value, String> {
    let Some(fields) = event.as_object() else {
        return Err("Event payload must be a JSON object".to_string());
    };

    match fields.get("body") {
        None => Ok(event),
        Some(Value::Null) => Ok(json!({})),
        Some(body @ Value::Object(_)) => Ok(body.clone()),
        Some(Value::String(raw)) => serde_json::from_str(raw)
            .map_err(|error| format!("Request body is not valid JSON: {error}")),
        Some(_) => Err("Request body must decode to a JSON object".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_serializes_payload_with_json_headers() {
        let response = success_response(200, json!({ "status": "ok" }));

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.body, r#"{"status":"ok"}"#);
    }

    #[test]
    fn validation_error_response_uses_400_envelope() {
        let response = validation_error_response("table name cannot be empty");

        assert_eq!(response.status_code, 400);
        let body: Value = serde_json::from_str(&response.body).expect("body should parse");
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "table name cannot be empty");
    }

    #[test]
    fn normalize_event_unwraps_stringified_body() {
        let payload = normalize_apigw_event(json!({ "body": "{\"table\":\"records\"}" }))
            .expect("event should normalize");
        assert_eq!(payload["table"], "records");
    }

    #[test]
    fn normalize_event_passes_bare_object_through() {
        let payload = normalize_apigw_event(json!({ "table": "records" }))
            .expect("event should normalize");
        assert_eq!(payload["table"], "records");
    }

    #[test]
    fn normalize_event_maps_null_body_to_empty_object() {
        let payload =
            normalize_apigw_event(json!({ "body": null })).expect("event should normalize");
        assert_eq!(payload, json!({}));
    }

    #[test]
    fn normalize_event_rejects_non_object_payloads() {
        let error = normalize_apigw_event(json!([1, 2, 3])).expect_err("event should fail");
        assert_eq!(error, "Event payload must be a JSON object");
    }

    #[test]
    fn normalize_event_rejects_non_object_body() {
        let error =
            normalize_apigw_event(json!({ "body": 42 })).expect_err("event should fail");
        assert_eq!(error, "Request body must decode to a JSON object");
    }

    #[test]
    fn normalize_event_reports_unparseable_string_body() {
        let error = normalize_apigw_event(json!({ "body": "not json" }))
            .expect_err("event should fail");
        assert!(error.starts_with("Request body is not valid JSON:"));
    }
}
