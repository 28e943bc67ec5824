use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::{ApiResult, ErrorInfo, RawResponse, ResponseShape};

/// Classify a raw response as success or failure.
///
/// Never fails: malformed bodies, missing fields and HTTP errors all become
/// [`ApiResult::Failure`] with a message describing what was received.
pub fn parse(raw: &RawResponse, shape: ResponseShape) -> ApiResult<Value> {
    if !raw.is_success() {
        return ApiResult::Failure(http_failure(raw));
    }

    match shape {
        ResponseShape::LegacyStatusField { collection } => parse_legacy(raw, collection),
        ResponseShape::HttpStatusWithBody => {
            if raw.body.iter().all(u8::is_ascii_whitespace) {
                return ApiResult::Success(Value::Null);
            }
            parse_json(raw).map_or_else(ApiResult::Failure, ApiResult::Success)
        }
        ResponseShape::SingleField(field) => match parse_json(raw) {
            Ok(Value::Object(mut object)) => match object.remove(field) {
                Some(value) => ApiResult::Success(value),
                None => ApiResult::Failure(
                    ErrorInfo::new(format!("response is missing `{field}`"))
                        .with_status_code(raw.status),
                ),
            },
            Ok(other) => ApiResult::Failure(
                ErrorInfo::new(format!("expected a JSON object, got {other}"))
                    .with_status_code(raw.status),
            ),
            Err(error) => ApiResult::Failure(error),
        },
    }
}

/// Decode a successful payload into `T`; a payload that does not fit becomes a failure.
pub fn project<T: DeserializeOwned>(result: ApiResult<Value>) -> ApiResult<T> {
    result.and_then(|value| match serde_json::from_value(value) {
        Ok(decoded) => ApiResult::Success(decoded),
        Err(err) => ApiResult::Failure(ErrorInfo::new(format!(
            "failed to decode response: {err}"
        ))),
    })
}

fn parse_json(raw: &RawResponse) -> Result<Value, ErrorInfo> {
    serde_json::from_slice(&raw.body).map_err(|err| {
        ErrorInfo::new(format!("invalid JSON response: {err}")).with_status_code(raw.status)
    })
}

fn parse_legacy(raw: &RawResponse, collection: Option<&'static str>) -> ApiResult<Value> {
    let body = match parse_json(raw) {
        Ok(body) => body,
        Err(error) => return ApiResult::Failure(error),
    };

    let element = match collection {
        Some(name) => match body.get(name).and_then(Value::as_array).and_then(|it| it.first()) {
            Some(first) => first.clone(),
            None => {
                return ApiResult::Failure(
                    ErrorInfo::new(format!("response has no `{name}` entries"))
                        .with_status_code(raw.status),
                );
            }
        },
        None => body,
    };

    let Some(raw_status) = element.get("status") else {
        return ApiResult::Failure(
            ErrorInfo::new("response is missing `status`").with_status_code(raw.status),
        );
    };

    let status = match raw_status {
        Value::String(text) => text.trim().parse::<i64>().ok(),
        Value::Number(number) => number.as_i64(),
        _ => None,
    };
    let raw_status_text = match raw_status {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    match status {
        Some(0) => ApiResult::Success(element),
        Some(code) => {
            let text = string_field(&element, &["error-text", "error_text"])
                .unwrap_or("unknown error");
            ApiResult::Failure(ErrorInfo {
                message: format!("{text} (status={code})"),
                status_code: Some(raw.status),
                raw_status: Some(raw_status_text),
                error_type: None,
            })
        }
        None => ApiResult::Failure(ErrorInfo {
            message: format!("response has a non-numeric `status`: {raw_status_text}"),
            status_code: Some(raw.status),
            raw_status: Some(raw_status_text),
            error_type: None,
        }),
    }
}

fn http_failure(raw: &RawResponse) -> ErrorInfo {
    let body = serde_json::from_slice::<Value>(&raw.body).ok();
    let object = body.as_ref().and_then(Value::as_object);

    let title = object.and_then(|it| {
        object_string(
            it,
            &[
                "error_title",
                "title",
                "error-code-label",
                "error_text",
                "error-text",
            ],
        )
    });
    let detail = object.and_then(|it| object_string(it, &["detail"]));
    let status = raw.status;

    let message = match (title, detail) {
        (Some(title), Some(detail)) => format!("{title}: {detail} (http status {status})"),
        (Some(text), None) | (None, Some(text)) => format!("{text} (http status {status})"),
        (None, None) => format!("unexpected HTTP status {status}"),
    };

    ErrorInfo {
        message,
        status_code: Some(status),
        raw_status: object
            .and_then(|it| object_string(it, &["error-code", "code"]))
            .map(str::to_owned),
        error_type: object
            .and_then(|it| object_string(it, &["type"]))
            .map(str::to_owned),
    }
}

fn string_field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a str> {
    value.as_object().and_then(|object| object_string(object, names))
}

fn object_string<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| object.get(*name).and_then(Value::as_str))
        .filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::SentMessage;

    use super::*;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body: body.as_bytes().to_vec(),
        }
    }

    const MESSAGES: ResponseShape = ResponseShape::LegacyStatusField {
        collection: Some("messages"),
    };

    #[test]
    fn legacy_status_zero_is_success_with_message_id() {
        let raw = response(200, r#"{"messages":[{"status":"0","message-id":"abc"}]}"#);
        let result = project::<SentMessage>(parse(&raw, MESSAGES));
        match result {
            ApiResult::Success(message) => assert_eq!(message.message_id, "abc"),
            ApiResult::Failure(error) => panic!("unexpected failure: {error}"),
        }
    }

    #[test]
    fn legacy_non_zero_status_is_failure_with_error_text() {
        let raw = response(
            200,
            r#"{"messages":[{"status":"6","error-text":"Invalid Message"}]}"#,
        );
        let error = parse(&raw, MESSAGES).into_result().unwrap_err();
        assert_eq!(error.message, "Invalid Message (status=6)");
        assert_eq!(error.raw_status.as_deref(), Some("6"));
        assert_eq!(error.status_code, Some(200));
    }

    #[test]
    fn legacy_top_level_status_accepts_numbers_and_error_text_underscore() {
        let shape = ResponseShape::LegacyStatusField { collection: None };

        let ok = response(200, r#"{"request_id":"req-1","status":0}"#);
        assert_eq!(
            parse(&ok, shape),
            ApiResult::Success(json!({"request_id": "req-1", "status": 0}))
        );

        let failed = response(
            200,
            r#"{"status":"16","error_text":"The code provided does not match"}"#,
        );
        let error = parse(&failed, shape).into_result().unwrap_err();
        assert_eq!(error.message, "The code provided does not match (status=16)");
    }

    #[test]
    fn legacy_shape_reports_missing_pieces() {
        let empty = response(200, r#"{"message-count":"0","messages":[]}"#);
        assert_eq!(
            parse(&empty, MESSAGES).failure().map(|e| e.message.as_str()),
            Some("response has no `messages` entries")
        );

        let no_status = response(200, r#"{"messages":[{"message-id":"abc"}]}"#);
        assert_eq!(
            parse(&no_status, MESSAGES)
                .failure()
                .map(|e| e.message.as_str()),
            Some("response is missing `status`")
        );

        let garbage_status = response(200, r#"{"messages":[{"status":"ok"}]}"#);
        assert!(parse(&garbage_status, MESSAGES).is_failure());
    }

    #[test]
    fn malformed_json_on_success_status_is_failure() {
        for shape in [
            MESSAGES,
            ResponseShape::HttpStatusWithBody,
            ResponseShape::SingleField("value"),
        ] {
            let error = parse(&response(200, "{ not json }"), shape)
                .into_result()
                .unwrap_err();
            assert!(
                error.message.starts_with("invalid JSON response"),
                "{shape:?}: {}",
                error.message
            );
            assert_eq!(error.status_code, Some(200));
        }
    }

    #[test]
    fn http_shape_wraps_body_on_success() {
        let raw = response(200, r#"{"_embedded":{"calls":[]}}"#);
        assert_eq!(
            parse(&raw, ResponseShape::HttpStatusWithBody),
            ApiResult::Success(json!({"_embedded": {"calls": []}}))
        );

        let no_content = response(204, "");
        assert_eq!(
            parse(&no_content, ResponseShape::HttpStatusWithBody),
            ApiResult::Success(Value::Null)
        );
    }

    #[test]
    fn http_shape_builds_error_from_problem_body() {
        let raw = response(
            404,
            r#"{"type":"https://developer.nexmo.com/api-errors#not-found","error_title":"Not Found","detail":"Leg xxxxxx was not found"}"#,
        );
        let error = parse(&raw, ResponseShape::HttpStatusWithBody)
            .into_result()
            .unwrap_err();
        assert_eq!(
            error.message,
            "Not Found: Leg xxxxxx was not found (http status 404)"
        );
        assert_eq!(error.status_code, Some(404));
        assert_eq!(
            error.error_type.as_deref(),
            Some("https://developer.nexmo.com/api-errors#not-found")
        );
    }

    #[test]
    fn http_shape_reads_numbers_error_labels() {
        let raw = response(
            420,
            r#"{"error-code":"420","error-code-label":"method failed"}"#,
        );
        let error = parse(&raw, ResponseShape::HttpStatusWithBody)
            .into_result()
            .unwrap_err();
        assert_eq!(error.message, "method failed (http status 420)");
        assert_eq!(error.raw_status.as_deref(), Some("420"));
    }

    #[test]
    fn http_failure_without_json_body_uses_generic_message() {
        for shape in [MESSAGES, ResponseShape::HttpStatusWithBody] {
            let error = parse(&response(502, "<html>Bad Gateway</html>"), shape)
                .into_result()
                .unwrap_err();
            assert_eq!(error.message, "unexpected HTTP status 502");
            assert_eq!(error.status_code, Some(502));
        }
    }

    #[test]
    fn single_field_extracts_value() {
        let raw = response(200, r#"{"value": 12.5, "autoReload": false}"#);
        assert_eq!(
            parse(&raw, ResponseShape::SingleField("value")),
            ApiResult::Success(json!(12.5))
        );

        let missing = response(200, r#"{"autoReload": false}"#);
        assert_eq!(
            parse(&missing, ResponseShape::SingleField("value"))
                .failure()
                .map(|e| e.message.as_str()),
            Some("response is missing `value`")
        );
    }

    #[test]
    fn projection_failure_is_a_value() {
        let raw = response(200, r#"{"messages":[{"status":"0"}]}"#);
        let result = project::<SentMessage>(parse(&raw, MESSAGES));
        let error = result.into_result().unwrap_err();
        assert!(error.message.starts_with("failed to decode response"));
    }
}
