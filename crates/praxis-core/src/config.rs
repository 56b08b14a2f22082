//! Dispatch configuration.
//!
//! [`DispatchConfig`] is deserialized from the embedder's configuration file
//! (or built in code) and handed to the dispatcher at construction. Every
//! field carries a default, so an empty document yields a working config.

use serde::{Deserialize, Serialize};

/// Configuration for a dispatcher instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Client-facing texts used by the error contract.
    pub messages: ErrorMessages,
}

/// Client-facing message texts, one per rejection kind.
///
/// Each field can be overridden independently; unset fields keep their
/// default text.
///
/// # Example
///
/// ```
/// use praxis_core::ErrorMessages;
///
/// let messages: ErrorMessages =
///     serde_json::from_str(r#"{ "not_implemented": "coming soon" }"#).unwrap();
/// assert_eq!(messages.not_implemented, "coming soon");
/// assert_eq!(messages.method_not_allowed, "method not allowed");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorMessages {
    /// Text for 501 responses.
    pub not_implemented: String,
    /// Text for 405 responses.
    pub method_not_allowed: String,
    /// Text for 415 responses.
    pub invalid_media_type: String,
    /// Text for 400 responses caused by body validation.
    pub invalid_request_body: String,
    /// Text for 400 responses caused by query validation.
    pub invalid_query_parameters: String,
    /// Text for 500 responses.
    pub unexpected_error: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            not_implemented: "not implemented".to_string(),
            method_not_allowed: "method not allowed".to_string(),
            invalid_media_type: "unsupported media type".to_string(),
            invalid_request_body: "invalid request body".to_string(),
            invalid_query_parameters: "invalid query parameters".to_string(),
            unexpected_error: "unexpected error".to_string(),
        }
    }
}
