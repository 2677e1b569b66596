//! Request parsing helpers shared by the resource handlers.
//!
//! Bodies are taken as raw JSON objects so that every field can be checked
//! individually and reported with its own error code, instead of failing
//! the whole body on the first type mismatch.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::{Map, Value};

use crate::domain::parse_event_date;
use crate::error::ApiError;

/// A request body that must be a JSON object.
///
/// Rejects malformed JSON and non-object bodies with
/// [`ApiError::MalformedBody`].
#[derive(Debug, Clone, Default)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ApiError::MalformedBody(
                "expected a JSON object".to_string(),
            )),
        }
    }
}

/// Parses a required row id from a path segment or `?id=` parameter.
///
/// # Errors
///
/// Returns `INVALID_ID` when `raw` is missing or not an integer.
pub fn parse_id(raw: Option<&str>) -> Result<i64, ApiError> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .ok_or_else(|| ApiError::bad_request("INVALID_ID", "Valid ID is required"))
}

/// Parses an optional integer query filter. Missing or empty values mean
/// "no filter".
///
/// # Errors
///
/// Returns a `BadRequest` with `code` when the value is not an integer.
pub fn int_filter(
    raw: Option<&str>,
    code: &'static str,
    message: &str,
) -> Result<Option<i64>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::bad_request(code, message)),
    }
}

/// Drops empty query values so that `?sport=` behaves like no filter.
#[must_use]
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

/// Returns the value stored under `key` unless it is absent or `null`.
#[must_use]
pub fn present<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

/// Reads a JSON integer or an integer string such as `"42"`.
#[must_use]
pub fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Reads a string that is non-empty after trimming.
#[must_use]
pub fn text_value(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Reads an optional text field. Absent, `null` and blank strings all map
/// to `None`.
///
/// # Errors
///
/// Returns a `BadRequest` with `code` when the value is not a string.
pub fn optional_text(
    body: &Map<String, Value>,
    key: &str,
    code: &'static str,
) -> Result<Option<String>, ApiError> {
    match present(body, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string()).filter(|s| !s.is_empty())),
        Some(_) => Err(ApiError::bad_request(code, format!("{key} must be a string"))),
    }
}

/// Coerces a boolean-like value: booleans as is, numbers by non-zero, and
/// the strings `true`/`false`/`1`/`0`.
#[must_use]
pub fn flag_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Returns `true` if `raw` is an accepted event date.
#[must_use]
pub fn is_valid_date(raw: &str) -> bool {
    parse_event_date(raw).is_some()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_must_be_integers() {
        assert!(matches!(parse_id(Some("42")), Ok(42)));
        let Err(err) = parse_id(Some("abc")) else {
            panic!("expected error");
        };
        assert_eq!(err.error_code(), Some("INVALID_ID"));
        assert!(parse_id(None).is_err());
        assert!(parse_id(Some("12abc")).is_err());
    }

    #[test]
    fn int_filter_ignores_empty_values() {
        assert!(matches!(int_filter(None, "X", "x"), Ok(None)));
        assert!(matches!(int_filter(Some(""), "X", "x"), Ok(None)));
        assert!(matches!(int_filter(Some(" 7 "), "X", "x"), Ok(Some(7))));
        let Err(err) = int_filter(Some("seven"), "INVALID_EVENT_ID", "bad") else {
            panic!("expected error");
        };
        assert_eq!(err.error_code(), Some("INVALID_EVENT_ID"));
    }

    #[test]
    fn int_value_accepts_numbers_and_numeric_strings() {
        assert_eq!(int_value(&json!(5)), Some(5));
        assert_eq!(int_value(&json!("5")), Some(5));
        assert_eq!(int_value(&json!(4.5)), None);
        assert_eq!(int_value(&json!("five")), None);
        assert_eq!(int_value(&json!(true)), None);
    }

    #[test]
    fn text_value_trims_and_rejects_blank() {
        assert_eq!(text_value(&json!("  Lakers ")), Some("Lakers".to_string()));
        assert_eq!(text_value(&json!("   ")), None);
        assert_eq!(text_value(&json!(3)), None);
    }

    #[test]
    fn optional_text_rejects_non_strings() {
        let Some(body) = json!({ "league": "  NBA ", "score": 3, "location": "" })
            .as_object()
            .cloned()
        else {
            panic!("object");
        };
        assert!(matches!(
            optional_text(&body, "league", "INVALID_LEAGUE"),
            Ok(Some(ref s)) if s == "NBA"
        ));
        assert!(matches!(optional_text(&body, "location", "X"), Ok(None)));
        assert!(matches!(optional_text(&body, "missing", "X"), Ok(None)));
        let Err(err) = optional_text(&body, "score", "INVALID_SCORE") else {
            panic!("expected error");
        };
        assert_eq!(err.error_code(), Some("INVALID_SCORE"));
    }

    #[test]
    fn flags_coerce_common_encodings() {
        assert_eq!(flag_value(&json!(true)), Some(true));
        assert_eq!(flag_value(&json!(0)), Some(false));
        assert_eq!(flag_value(&json!(2)), Some(true));
        assert_eq!(flag_value(&json!("1")), Some(true));
        assert_eq!(flag_value(&json!("false")), Some(false));
        assert_eq!(flag_value(&json!("yes")), None);
        assert_eq!(flag_value(&json!([])), None);
    }

    #[test]
    fn dates_accept_common_formats() {
        assert!(is_valid_date("2024-03-15"));
        assert!(is_valid_date("2024-03-15T19:30:00"));
        assert!(is_valid_date("2024-03-15T19:30"));
        assert!(is_valid_date("2024-03-15T19:30:00Z"));
        assert!(is_valid_date("2024-03-15T19:30:00.000+01:00"));
        assert!(!is_valid_date("next tuesday"));
        assert!(!is_valid_date("2024-13-40"));
    }
}
