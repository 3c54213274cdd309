//! Error-message selection for failed backend calls.
//!
//! Read-style operations surface the body's `message` field. Write
//! operations surface the `error` field, then the serialized body. Both fall
//! back to a fixed per-operation string when nothing usable is present.
//! Binary downloads never read their error body.

use serde_json::Value;

/// Where a failed operation looks for its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageSource {
    /// `message` field, else fallback.
    MessageField,
    /// `error` field, else the serialized body, else fallback.
    ErrorFieldOrBody,
    /// Always the fallback; the body is a binary payload.
    FallbackOnly,
}

impl MessageSource {
    /// Picks the message for an error response body.
    pub(crate) fn resolve(self, body: &str, fallback: &str) -> String {
        let trimmed = body.trim();
        let parsed = serde_json::from_str::<Value>(trimmed).ok();
        let picked = match self {
            Self::MessageField => parsed.as_ref().and_then(|value| field_text(value, "message")),
            Self::ErrorFieldOrBody => parsed
                .as_ref()
                .and_then(|value| field_text(value, "error"))
                .or_else(|| serialized_body(parsed.as_ref(), trimmed)),
            Self::FallbackOnly => None,
        };
        picked.unwrap_or_else(|| fallback.to_owned())
    }
}

/// Returns the text of `body[key]` if the field is present and truthy.
fn field_text(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(truthy_text)
}

/// Renders a JSON value as message text, skipping empty and falsy values.
fn truthy_text(value: &Value) -> Option<String> {
    match *value {
        Value::Null | Value::Bool(false) => None,
        Value::String(ref text) => (!text.is_empty()).then(|| text.clone()),
        Value::Number(ref number) => (number.as_f64() != Some(0.0)).then(|| number.to_string()),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// The whole error body as text.
///
/// Any non-empty body other than JSON `null` is returned as sent (trimmed),
/// whether or not it parses as JSON. Nothing is re-serialized or quoted.
fn serialized_body(parsed: Option<&Value>, raw: &str) -> Option<String> {
    match parsed {
        Some(&Value::Null) => None,
        Some(_) => Some(raw.to_owned()),
        None => (!raw.is_empty()).then(|| raw.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_is_used() {
        let msg = MessageSource::MessageField.resolve(r#"{"message":"not found"}"#, "Failed");
        assert_eq!(msg, "not found");
    }

    #[test]
    fn message_source_ignores_error_field() {
        let msg = MessageSource::MessageField.resolve(r#"{"error":"boom"}"#, "Failed to delete merchant");
        assert_eq!(msg, "Failed to delete merchant");
    }

    #[test]
    fn drf_detail_falls_back() {
        let msg = MessageSource::MessageField.resolve(r#"{"detail":"Not found."}"#, "Failed to fetch merchant");
        assert_eq!(msg, "Failed to fetch merchant");
    }

    #[test]
    fn empty_message_falls_back() {
        let msg = MessageSource::MessageField.resolve(r#"{"message":""}"#, "Failed to fetch statistics");
        assert_eq!(msg, "Failed to fetch statistics");
    }

    #[test]
    fn non_json_body_falls_back_for_reads() {
        let msg = MessageSource::MessageField.resolve("<html>502</html>", "Failed to fetch merchants");
        assert_eq!(msg, "Failed to fetch merchants");
    }

    #[test]
    fn error_field_wins_for_writes() {
        let body = r#"{"error":"{'email': [ErrorDetail(string='merchant with this email already exists.', code='unique')]}"}"#;
        let msg = MessageSource::ErrorFieldOrBody.resolve(body, "Failed to create merchant");
        assert!(msg.starts_with("{'email'"));
    }

    #[test]
    fn body_is_serialized_when_error_missing() {
        let body = r#"{"name":["This field is required."]}"#;
        let msg = MessageSource::ErrorFieldOrBody.resolve(body, "Failed to create merchant");
        assert_eq!(msg, body);
    }

    #[test]
    fn plain_text_body_is_used_for_writes() {
        let msg = MessageSource::ErrorFieldOrBody.resolve("Bad Gateway", "Failed to update merchant");
        assert_eq!(msg, "Bad Gateway");
    }

    #[test]
    fn empty_body_falls_back_for_writes() {
        let msg = MessageSource::ErrorFieldOrBody.resolve("  ", "Failed to update merchant");
        assert_eq!(msg, "Failed to update merchant");
        let null = MessageSource::ErrorFieldOrBody.resolve("null", "Failed to update merchant");
        assert_eq!(null, "Failed to update merchant");
    }

    #[test]
    fn download_bodies_are_never_read() {
        let msg = MessageSource::FallbackOnly.resolve(r#"{"message":"nothing to export"}"#, "Failed to export data");
        assert_eq!(msg, "Failed to export data");
    }

    #[test]
    fn spaced_json_body_is_passed_through() {
        let body = r#"{ "name": ["This field is required."] }"#;
        let msg = MessageSource::ErrorFieldOrBody.resolve(body, "Failed to create merchant");
        assert_eq!(msg, body);
    }

    #[test]
    fn non_string_message_is_rendered() {
        let msg = MessageSource::MessageField.resolve(r#"{"message":404}"#, "Failed");
        assert_eq!(msg, "404");
        let zero = MessageSource::MessageField.resolve(r#"{"message":0}"#, "Failed");
        assert_eq!(zero, "Failed");
    }
}
