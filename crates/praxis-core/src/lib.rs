//! # Praxis Core
//!
//! Core types for the Praxis dispatch pipeline.
//!
//! This crate provides the vocabulary the pipeline crate is built from:
//!
//! - [`Operation`] - Immutable operation descriptor with its fluent builder
//! - [`Method`] - The closed set of supported HTTP verbs
//! - [`Request`] / [`ResponseSink`] - Transport-agnostic request and response views
//! - [`Schema`] - Data-shape schemas and the [`schema::validate`] adapter
//! - [`Rejection`] - The normalized failure taxonomy and its HTTP projection
//! - [`DispatchConfig`] / [`ErrorMessages`] - Dispatcher configuration
//! - [`Diagnostics`] - Fault reporting seam, defaulting to `tracing`

#![doc(html_root_url = "https://docs.rs/praxis-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod diagnostics;
mod error;
mod method;
mod operation;
mod request;
mod response;
pub mod schema;

pub use config::{DispatchConfig, ErrorMessages};
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use error::Rejection;
pub use method::{Method, UnsupportedMethod};
pub use operation::{
    BoxFuture, Handler, InputContract, Middleware, Operation, OperationBuilder,
    OperationRegistry, Options, Output,
};
pub use request::{Request, RequestBuilder};
pub use response::{BufferedResponse, ResponseSink};
pub use schema::{FieldError, PathSegment, Schema, ValidationReport};
