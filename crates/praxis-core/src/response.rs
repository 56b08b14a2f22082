//! The response sink capability.
//!
//! Middleware, handlers and the dispatch pipeline itself all write through
//! [`ResponseSink`], so the pipeline's short-circuit logic ("has a response
//! already been committed?") stays transport-agnostic. A response counts as
//! committed once a status has been set or a body written; setting only a
//! header does not commit.
//!
//! [`BufferedResponse`] is the in-memory implementation used by tests and by
//! embedders that flush to their transport after dispatch returns.

use http::StatusCode;
use serde_json::Value;

/// Capability for writing one response.
pub trait ResponseSink: Send {
    /// Returns `true` once a status has been set or a body written.
    fn is_committed(&self) -> bool;

    /// Sets the response status code.
    fn set_status(&mut self, status: StatusCode);

    /// Sets a response header. Last value wins.
    fn set_header(&mut self, name: &str, value: &str);

    /// Writes the serialized response body.
    fn write_json(&mut self, body: &Value);
}

/// In-memory [`ResponseSink`] recording everything written to it.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use praxis_core::{BufferedResponse, ResponseSink};
/// use serde_json::json;
///
/// let mut response = BufferedResponse::new();
/// assert!(!response.is_committed());
///
/// response.set_status(StatusCode::CREATED);
/// response.write_json(&json!({ "id": 7 }));
///
/// assert!(response.is_committed());
/// assert_eq!(response.status(), Some(StatusCode::CREATED));
/// ```
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl BufferedResponse {
    /// Creates an empty, uncommitted response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the status code, if one was set.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Looks up a header value, case-insensitively. Last value wins.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the written body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl ResponseSink for BufferedResponse {
    fn is_committed(&self) -> bool {
        self.status.is_some() || self.body.is_some()
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn write_json(&mut self, body: &Value) {
        self.body = Some(body.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fresh_response_is_uncommitted() {
        let response = BufferedResponse::new();
        assert!(!response.is_committed());
        assert_eq!(response.status(), None);
        assert_eq!(response.body(), None);
    }

    #[test]
    fn test_status_alone_commits() {
        let mut response = BufferedResponse::new();
        response.set_status(StatusCode::NO_CONTENT);
        assert!(response.is_committed());
        assert_eq!(response.body(), None);
    }

    #[test]
    fn test_body_alone_commits() {
        let mut response = BufferedResponse::new();
        response.write_json(&json!({ "ok": true }));
        assert!(response.is_committed());
        assert_eq!(response.status(), None);
    }

    #[test]
    fn test_header_alone_does_not_commit() {
        let mut response = BufferedResponse::new();
        response.set_header("allow", "GET, POST");
        assert!(!response.is_committed());
        assert_eq!(response.header("Allow"), Some("GET, POST"));
    }

    #[test]
    fn test_header_lookup_last_wins() {
        let mut response = BufferedResponse::new();
        response.set_header("X-Trace", "first");
        response.set_header("x-trace", "second");
        assert_eq!(response.header("X-TRACE"), Some("second"));
    }
}
