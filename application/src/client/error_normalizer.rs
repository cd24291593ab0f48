//! Maps non-2xx responses to [`ApiError::Http`].

use serde_json::Value;
use strata_domain::ApiError;

/// Build the normalized error for a non-2xx response.
///
/// The message comes from the JSON body's `detail` (a string, or the
/// `msg` fields of a validation error list) or `message` field, and falls
/// back to `HTTP {status}` when neither is usable.
pub fn normalize(status: u16, body: &[u8]) -> ApiError {
    match extract_message(body) {
        Some(message) => ApiError::http(status, message.clone(), Some(message)),
        None => ApiError::http(status, format!("HTTP {}", status), None),
    }
}

fn extract_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    detail_text(value.get("detail")).or_else(|| non_empty_str(value.get("message")))
}

fn detail_text(detail: Option<&Value>) -> Option<String> {
    match detail? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .filter(|msg| !msg.trim().is_empty())
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
