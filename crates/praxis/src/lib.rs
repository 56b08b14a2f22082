//! # Praxis
//!
//! Transport-agnostic HTTP operation dispatch.
//!
//! Praxis splits an HTTP endpoint into two halves: an immutable
//! [`Operation`] descriptor (method, input contract, middleware chain,
//! handler), built once with the fluent [`OperationBuilder`], and a
//! [`Dispatcher`] that executes requests against a registry of those
//! descriptors. The dispatcher method-matches, negotiates content types,
//! validates bodies and queries against [`Schema`]s, threads an options
//! accumulator through the middleware chain, invokes the handler, and
//! normalizes every failure into a fixed error contract (405, 501, 415,
//! 400, 500).
//!
//! ```
//! use praxis::{
//!     BoxFuture, DispatchConfig, Dispatcher, Method, Operation, OperationRegistry, Options,
//!     Request, ResponseSink,
//! };
//!
//! fn ping<'a>(
//!     _request: &'a Request,
//!     sink: &'a mut dyn ResponseSink,
//!     _options: &'a Options,
//! ) -> BoxFuture<'a, anyhow::Result<()>> {
//!     Box::pin(async move {
//!         sink.set_status(http::StatusCode::OK);
//!         sink.write_json(&serde_json::json!({ "pong": true }));
//!         Ok(())
//!     })
//! }
//!
//! # tokio_test::block_on(async {
//! let mut registry = OperationRegistry::new();
//! registry.insert("ping".to_string(), Operation::builder(Method::Get).handler(ping));
//!
//! let dispatcher = Dispatcher::new(DispatchConfig::default());
//! let mut response = praxis::BufferedResponse::new();
//! dispatcher
//!     .dispatch(&registry, &Request::builder("GET").build(), &mut response)
//!     .await;
//!
//! assert_eq!(response.status(), Some(http::StatusCode::OK));
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/praxis/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dispatch;
pub mod negotiate;

pub use dispatch::Dispatcher;

pub use praxis_core::{
    schema, BoxFuture, BufferedResponse, Diagnostics, DispatchConfig, ErrorMessages, FieldError,
    Handler, InputContract, Method, Middleware, Operation, OperationBuilder, OperationRegistry,
    Options, Output, PathSegment, Rejection, Request, RequestBuilder, ResponseSink, Schema,
    TracingDiagnostics, UnsupportedMethod, ValidationReport,
};
