//! Operation descriptors and the fluent builder.
//!
//! An [`Operation`] bundles one HTTP method with an optional input contract,
//! documentation-only output contracts, an ordered middleware chain and an
//! optional terminal handler. Descriptors are immutable once built: each
//! builder step consumes and returns the builder, so operations derived from
//! a shared base never alias each other's configuration.
//!
//! ## Building an operation
//!
//! Steps run left to right: optionally [`input`](OperationBuilder::input),
//! optionally [`outputs`](OperationBuilder::outputs), zero or more
//! [`middleware`](OperationBuilder::middleware), then exactly one
//! [`handler`](OperationBuilder::handler) — or [`build`](OperationBuilder::build)
//! for a deliberately handler-less descriptor (valid, answered with 501 at
//! dispatch). The method is fixed at construction and cannot be changed.
//!
//! ## Middleware contract
//!
//! Middleware receives `(request, sink, options)` and either
//!
//! - writes a terminal response to the sink, stopping the chain and skipping
//!   the handler, or
//! - returns `Ok(Some(value))`, replacing the options threaded to the next
//!   step, or
//! - returns `Ok(None)`, leaving the options unchanged.
//!
//! Returning `Err` is a fault: the pipeline logs it and answers 500.

use crate::method::Method;
use crate::request::Request;
use crate::response::ResponseSink;
use crate::schema::Schema;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A boxed future, as returned by middleware and handlers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The options accumulator threaded through a middleware chain.
///
/// Starts as `Value::Null` at dispatch and is replaced (never merged
/// automatically) by middleware return values. Middleware that wants merge
/// semantics clones the previous value and extends it.
pub type Options = Value;

/// A middleware step in an operation's chain.
///
/// Implemented directly for stateful middleware, or satisfied by any `fn`
/// with the matching signature via the blanket impl.
pub trait Middleware: Send + Sync + 'static {
    /// Runs this step.
    ///
    /// See the [module docs](self) for the return contract.
    fn call<'a>(
        &'a self,
        request: &'a Request,
        sink: &'a mut dyn ResponseSink,
        options: &'a Options,
    ) -> BoxFuture<'a, anyhow::Result<Option<Options>>>;
}

impl<F> Middleware for F
where
    F: for<'a> Fn(
            &'a Request,
            &'a mut dyn ResponseSink,
            &'a Options,
        ) -> BoxFuture<'a, anyhow::Result<Option<Options>>>
        + Send
        + Sync
        + 'static,
{
    fn call<'a>(
        &'a self,
        request: &'a Request,
        sink: &'a mut dyn ResponseSink,
        options: &'a Options,
    ) -> BoxFuture<'a, anyhow::Result<Option<Options>>> {
        self(request, sink, options)
    }
}

/// The terminal handler of an operation.
///
/// Receives the final options value and writes its response to the sink.
/// A handler that completes without committing anything is answered with
/// 501 by the pipeline.
pub trait Handler: Send + Sync + 'static {
    /// Runs the handler.
    fn call<'a>(
        &'a self,
        request: &'a Request,
        sink: &'a mut dyn ResponseSink,
        options: &'a Options,
    ) -> BoxFuture<'a, anyhow::Result<()>>;
}

impl<F> Handler for F
where
    F: for<'a> Fn(
            &'a Request,
            &'a mut dyn ResponseSink,
            &'a Options,
        ) -> BoxFuture<'a, anyhow::Result<()>>
        + Send
        + Sync
        + 'static,
{
    fn call<'a>(
        &'a self,
        request: &'a Request,
        sink: &'a mut dyn ResponseSink,
        options: &'a Options,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        self(request, sink, options)
    }
}

/// The input contract of an operation: expected content type plus optional
/// body and query schemas.
#[derive(Debug, Clone)]
pub struct InputContract {
    content_type: String,
    body: Option<Schema>,
    query: Option<Schema>,
}

impl InputContract {
    /// Creates a contract expecting the given content type, with no schemas.
    #[must_use]
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            body: None,
            query: None,
        }
    }

    /// Sets the body schema.
    #[must_use]
    pub fn body(mut self, schema: Schema) -> Self {
        self.body = Some(schema);
        self
    }

    /// Sets the query schema.
    #[must_use]
    pub fn query(mut self, schema: Schema) -> Self {
        self.query = Some(schema);
        self
    }

    /// Returns the declared content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the body schema, if declared.
    #[must_use]
    pub fn body_schema(&self) -> Option<&Schema> {
        self.body.as_ref()
    }

    /// Returns the query schema, if declared.
    #[must_use]
    pub fn query_schema(&self) -> Option<&Schema> {
        self.query.as_ref()
    }
}

/// One documented response shape of an operation.
///
/// Outputs describe; they never block the handler at dispatch.
#[derive(Debug, Clone)]
pub struct Output {
    /// Response status code this output documents.
    pub status: u16,
    /// Content type of the documented response.
    pub content_type: String,
    /// Shape of the documented response body.
    pub schema: Schema,
}

impl Output {
    /// Creates an output contract.
    #[must_use]
    pub fn new(status: u16, content_type: impl Into<String>, schema: Schema) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            schema,
        }
    }
}

/// An immutable operation descriptor.
#[derive(Clone)]
pub struct Operation {
    method: Method,
    input: Option<InputContract>,
    outputs: Vec<Output>,
    middleware: Vec<Arc<dyn Middleware>>,
    handler: Option<Arc<dyn Handler>>,
}

impl Operation {
    /// Starts building an operation for the given method.
    ///
    /// # Example
    ///
    /// ```
    /// use praxis_core::{BoxFuture, Method, Operation, Options, Request, ResponseSink};
    ///
    /// fn hello<'a>(
    ///     _request: &'a Request,
    ///     sink: &'a mut dyn ResponseSink,
    ///     _options: &'a Options,
    /// ) -> BoxFuture<'a, anyhow::Result<()>> {
    ///     Box::pin(async move {
    ///         sink.set_status(http::StatusCode::OK);
    ///         sink.write_json(&serde_json::json!({ "hello": "world" }));
    ///         Ok(())
    ///     })
    /// }
    ///
    /// let operation = Operation::builder(Method::Get).handler(hello);
    /// assert_eq!(operation.method(), Method::Get);
    /// ```
    #[must_use]
    pub fn builder(method: Method) -> OperationBuilder {
        OperationBuilder::new(method)
    }

    /// Returns the method this operation is declared for.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the input contract, if declared.
    #[must_use]
    pub fn input(&self) -> Option<&InputContract> {
        self.input.as_ref()
    }

    /// Returns the documented outputs.
    #[must_use]
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Returns the middleware chain, in declaration order.
    #[must_use]
    pub fn middleware(&self) -> &[Arc<dyn Middleware>] {
        &self.middleware
    }

    /// Returns the terminal handler, if one was declared.
    #[must_use]
    pub fn handler(&self) -> Option<&Arc<dyn Handler>> {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("method", &self.method)
            .field("input", &self.input)
            .field("outputs", &self.outputs.len())
            .field("middleware", &self.middleware.len())
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// Fluent builder for [`Operation`].
///
/// Augments the accumulated descriptor at each step; `input` and `outputs`
/// replace any prior value wholesale, `middleware` appends.
pub struct OperationBuilder {
    method: Method,
    input: Option<InputContract>,
    outputs: Vec<Output>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl OperationBuilder {
    /// Creates a builder for the given method with no input, no outputs,
    /// an empty middleware chain and no handler.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            input: None,
            outputs: Vec::new(),
            middleware: Vec::new(),
        }
    }

    /// Sets the input contract. A later call overwrites wholesale.
    #[must_use]
    pub fn input(mut self, input: InputContract) -> Self {
        self.input = Some(input);
        self
    }

    /// Sets the documented outputs. A later call overwrites wholesale.
    #[must_use]
    pub fn outputs(mut self, outputs: Vec<Output>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Appends a middleware step to the chain.
    #[must_use]
    pub fn middleware<M: Middleware>(mut self, middleware: M) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Sets the terminal handler and finishes the descriptor.
    #[must_use]
    pub fn handler<H: Handler>(self, handler: H) -> Operation {
        Operation {
            method: self.method,
            input: self.input,
            outputs: self.outputs,
            middleware: self.middleware,
            handler: Some(Arc::new(handler)),
        }
    }

    /// Finishes the descriptor without a handler.
    ///
    /// Handler-less operations are valid but incomplete: dispatch answers
    /// them with 501.
    #[must_use]
    pub fn build(self) -> Operation {
        Operation {
            method: self.method,
            input: self.input,
            outputs: self.outputs,
            middleware: self.middleware,
            handler: None,
        }
    }
}

/// Mapping from operation name to descriptor, supplied wholesale per
/// dispatch call.
///
/// Insertion order is preserved; the `Allow` header on 405 responses lists
/// methods in the order their operations were registered.
pub type OperationRegistry = IndexMap<String, Operation>;
