//! Backend reply envelope shared by every endpoint

use serde::Deserialize;
use serde_json::Value;

/// Outcome of a request that reached the backend
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// 2xx with a decoded body
    Accepted(T),
    /// Non-2xx, with whatever error fields the body carried
    Rejected(Rejection),
}

/// A non-2xx reply
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub status: u16,
    pub body: ErrorBody,
}

impl Rejection {
    pub fn new(status: u16, body: ErrorBody) -> Self {
        Self { status, body }
    }
}

/// Error fields a backend reply may carry.
///
/// `detail` is a plain string for handled errors and a list of objects for
/// request validation failures.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, treating anything that is not a JSON object as empty
    pub fn from_slice(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// `detail` rendered as text
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn message_text(&self) -> Option<String> {
        self.message.clone().filter(|m| !m.is_empty())
    }

    /// `detail` first, then `message`
    pub fn reason(&self) -> Option<String> {
        self.detail_text().or_else(|| self.message_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let body = ErrorBody::from_slice(br#"{"detail": "No chunks found in the database."}"#);
        assert_eq!(
            body.reason().as_deref(),
            Some("No chunks found in the database.")
        );
    }

    #[test]
    fn test_structured_detail_is_stringified() {
        let body = ErrorBody::from_slice(br#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#);
        let text = body.detail_text().unwrap();
        assert!(text.contains("field required"));
    }

    #[test]
    fn test_message_used_when_detail_absent() {
        let body = ErrorBody::from_slice(br#"{"status": "error", "message": "Internal server error"}"#);
        assert_eq!(body.reason().as_deref(), Some("Internal server error"));
    }

    #[test]
    fn test_non_json_body_is_empty() {
        let body = ErrorBody::from_slice(b"<html>Bad Gateway</html>");
        assert_eq!(body, ErrorBody::default());
        assert!(body.reason().is_none());
    }
}
