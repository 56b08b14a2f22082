//! Transport-agnostic view of an incoming request.
//!
//! The dispatch pipeline never touches a socket: the embedding server
//! parses the wire request and hands Praxis a [`Request`] carrying the raw
//! method string, headers, the pre-parsed JSON body and the query map.
//! Bodies and queries are validated lazily, only when the matched operation
//! declares a schema for them.

use serde_json::{Map, Value};

/// An incoming request as seen by the dispatch pipeline.
///
/// # Example
///
/// ```
/// use praxis_core::Request;
/// use serde_json::json;
///
/// let request = Request::builder("POST")
///     .header("Content-Type", "application/json; charset=utf-8")
///     .body(json!({ "name": "Ada" }))
///     .query_param("verbose", "1")
///     .build();
///
/// assert_eq!(request.method(), "POST");
/// assert_eq!(request.content_type(), Some("application/json; charset=utf-8"));
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    /// Raw method string as received from the transport.
    method: String,
    /// Header pairs; lookup is case-insensitive, last value wins.
    headers: Vec<(String, String)>,
    /// Pre-parsed request body. `Null` when the request carried none.
    body: Value,
    /// Query parameters: values are strings or arrays of strings.
    query: Value,
}

impl Request {
    /// Creates a builder for a request with the given raw method string.
    ///
    /// The method is kept verbatim; normalization happens at dispatch.
    #[must_use]
    pub fn builder(method: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method)
    }

    /// Returns the raw method string.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
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

    /// Returns the `Content-Type` header, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns the pre-parsed body.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Returns the query parameters as a JSON object.
    #[must_use]
    pub fn query(&self) -> &Value {
        &self.query
    }
}

/// Fluent builder for [`Request`].
#[derive(Debug)]
pub struct RequestBuilder {
    method: String,
    headers: Vec<(String, String)>,
    body: Value,
    query: Map<String, Value>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            headers: Vec::new(),
            body: Value::Null,
            query: Map::new(),
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the pre-parsed body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Adds a query parameter.
    ///
    /// Repeating a key turns its value into an array of strings, matching
    /// how query strings with duplicate keys are conventionally parsed.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = Value::String(value.into());
        match self.query.remove(&key) {
            None => {
                self.query.insert(key, value);
            }
            Some(Value::Array(mut values)) => {
                values.push(value);
                self.query.insert(key, Value::Array(values));
            }
            Some(existing) => {
                self.query.insert(key, Value::Array(vec![existing, value]));
            }
        }
        self
    }

    /// Builds the request.
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            headers: self.headers,
            body: self.body,
            query: Value::Object(self.query),
        }
    }
}
