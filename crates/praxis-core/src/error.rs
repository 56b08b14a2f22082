//! The dispatch rejection taxonomy and its HTTP projection.
//!
//! Every failure the pipeline can produce is one of the [`Rejection`]
//! variants below. A rejection maps deterministically to an HTTP status and
//! a JSON body of the shape `{ "message": "..." }`, extended with an
//! `"errors"` array for the validation variants. Message texts come from
//! [`ErrorMessages`](crate::config::ErrorMessages) so embedders can reword
//! them without touching the pipeline.

use crate::config::ErrorMessages;
use crate::method::Method;
use crate::schema::FieldError;
use http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

/// A normalized dispatch failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// No operation in the registry is declared for the request method.
    #[error("no operation declared for the request method")]
    MethodNotAllowed {
        /// Methods the registry does declare, in registration order.
        allow: Vec<Method>,
    },

    /// The matched operation has no handler, or its handler produced no
    /// response.
    #[error("operation has no usable handler")]
    NotImplemented,

    /// The request content type does not satisfy the operation's input
    /// contract.
    #[error("request content type does not match the input contract")]
    UnsupportedMediaType,

    /// The request body violated the declared body schema.
    #[error("request body failed validation ({} error(s))", errors.len())]
    InvalidRequestBody {
        /// All violations, in document order.
        errors: Vec<FieldError>,
    },

    /// The query parameters violated the declared query schema.
    #[error("query parameters failed validation ({} error(s))", errors.len())]
    InvalidQueryParameters {
        /// All violations, in document order.
        errors: Vec<FieldError>,
    },

    /// A middleware step or the handler faulted.
    #[error("middleware or handler faulted")]
    Unexpected,
}

impl Rejection {
    /// Returns the HTTP status this rejection maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidRequestBody { .. } | Self::InvalidQueryParameters { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the configured message text for this rejection.
    #[must_use]
    pub fn message<'a>(&self, messages: &'a ErrorMessages) -> &'a str {
        match self {
            Self::MethodNotAllowed { .. } => &messages.method_not_allowed,
            Self::NotImplemented => &messages.not_implemented,
            Self::UnsupportedMediaType => &messages.invalid_media_type,
            Self::InvalidRequestBody { .. } => &messages.invalid_request_body,
            Self::InvalidQueryParameters { .. } => &messages.invalid_query_parameters,
            Self::Unexpected => &messages.unexpected_error,
        }
    }

    /// Builds the JSON body for this rejection.
    ///
    /// Validation variants carry their field errors; all other variants
    /// expose only the message, never internal detail.
    #[must_use]
    pub fn body(&self, messages: &ErrorMessages) -> Value {
        match self {
            Self::InvalidRequestBody { errors } | Self::InvalidQueryParameters { errors } => {
                json!({
                    "message": self.message(messages),
                    "errors": errors,
                })
            }
            _ => json!({ "message": self.message(messages) }),
        }
    }

    /// Returns the `Allow` header value for 405 rejections.
    ///
    /// Distinct methods in registration order, comma-separated. `None` for
    /// other rejections and for an empty registry.
    #[must_use]
    pub fn allow_header(&self) -> Option<String> {
        match self {
            Self::MethodNotAllowed { allow } if !allow.is_empty() => Some(
                allow
                    .iter()
                    .map(|method| method.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }
}
