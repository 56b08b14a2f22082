//! The request dispatch pipeline.
//!
//! [`Dispatcher::dispatch`] takes a registry of operations, one request and
//! one response sink, and always leaves a committed response behind. The
//! pipeline runs a fixed sequence of gates before user code executes:
//!
//! 1. **Method match** - First registered operation declared for the
//!    request method, or 405 with an `Allow` header
//! 2. **Handler presence** - Operations without a handler answer 501
//! 3. **Content negotiation** - Only when an input contract is declared;
//!    mismatches answer 415
//! 4. **Body validation** - Against the declared body schema; 400
//! 5. **Query validation** - Against the declared query schema; 400
//!
//! Then the operation's middleware chain runs in declaration order,
//! threading the options accumulator, and finally the handler. Middleware
//! that commits a response ends the dispatch. A fault anywhere in user code
//! is reported through [`Diagnostics`] and answered with 500, unless a
//! response was already committed, in which case the committed response
//! stands and the fault is only reported.

use crate::negotiate::content_type_matches;
use praxis_core::schema::validate;
use praxis_core::{
    Diagnostics, DispatchConfig, Method, Operation, OperationRegistry, Options, Rejection,
    Request, ResponseSink, TracingDiagnostics,
};
use std::sync::Arc;

/// Executes requests against an operation registry.
///
/// Cheap to clone; holds only configuration and the diagnostics sink.
///
/// # Example
///
/// ```
/// use praxis::{DispatchConfig, Dispatcher};
///
/// let dispatcher = Dispatcher::new(DispatchConfig::default());
/// # let _ = dispatcher;
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    config: DispatchConfig,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Dispatcher {
    /// Creates a dispatcher reporting faults through `tracing`.
    #[must_use]
    pub fn new(config: DispatchConfig) -> Self {
        Self::with_diagnostics(config, Arc::new(TracingDiagnostics))
    }

    /// Creates a dispatcher with a custom diagnostics sink.
    #[must_use]
    pub fn with_diagnostics(config: DispatchConfig, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            config,
            diagnostics,
        }
    }

    /// Dispatches one request.
    ///
    /// Always commits a response to the sink: either the one user code
    /// wrote, or a rejection from the fixed error contract. This method
    /// itself never fails; all failures become responses.
    pub async fn dispatch(
        &self,
        registry: &OperationRegistry,
        request: &Request,
        sink: &mut dyn ResponseSink,
    ) {
        let Some((name, operation)) = match_operation(registry, request.method()) else {
            self.reject(
                sink,
                &Rejection::MethodNotAllowed {
                    allow: allowed_methods(registry),
                },
            );
            return;
        };

        let Some(handler) = operation.handler() else {
            tracing::debug!(operation = name, "operation has no handler");
            self.reject(sink, &Rejection::NotImplemented);
            return;
        };

        if let Some(input) = operation.input() {
            if !content_type_matches(request.content_type(), input.content_type()) {
                tracing::debug!(
                    operation = name,
                    content_type = request.content_type().unwrap_or("<none>"),
                    "content type rejected"
                );
                self.reject(sink, &Rejection::UnsupportedMediaType);
                return;
            }

            let body_report = validate(input.body_schema(), request.body());
            if !body_report.valid {
                self.reject(
                    sink,
                    &Rejection::InvalidRequestBody {
                        errors: body_report.errors,
                    },
                );
                return;
            }

            let query_report = validate(input.query_schema(), request.query());
            if !query_report.valid {
                self.reject(
                    sink,
                    &Rejection::InvalidQueryParameters {
                        errors: query_report.errors,
                    },
                );
                return;
            }
        }

        let mut options = Options::Null;
        for middleware in operation.middleware() {
            match middleware.call(request, sink, &options).await {
                Ok(next) => {
                    if sink.is_committed() {
                        // Middleware wrote a terminal response; the rest of
                        // the chain and the handler are skipped.
                        return;
                    }
                    if let Some(next) = next {
                        options = next;
                    }
                }
                Err(error) => {
                    self.fault(sink, name, &error);
                    return;
                }
            }
        }

        match handler.call(request, sink, &options).await {
            Ok(()) => {
                if !sink.is_committed() {
                    tracing::debug!(operation = name, "handler produced no response");
                    self.reject(sink, &Rejection::NotImplemented);
                }
            }
            Err(error) => self.fault(sink, name, &error),
        }
    }

    /// Commits a rejection response.
    fn reject(&self, sink: &mut dyn ResponseSink, rejection: &Rejection) {
        tracing::debug!(status = %rejection.status(), "request rejected");
        if let Some(allow) = rejection.allow_header() {
            sink.set_header(http::header::ALLOW.as_str(), &allow);
        }
        sink.set_status(rejection.status());
        sink.write_json(&rejection.body(&self.config.messages));
    }

    /// Reports a fault and commits a 500, unless a response already stands.
    fn fault(&self, sink: &mut dyn ResponseSink, operation: &str, error: &anyhow::Error) {
        self.diagnostics.report_fault(operation, error);
        if !sink.is_committed() {
            self.reject(sink, &Rejection::Unexpected);
        }
    }
}

/// Finds the first registered operation declared for the request method.
fn match_operation<'r>(
    registry: &'r OperationRegistry,
    raw_method: &str,
) -> Option<(&'r str, &'r Operation)> {
    let method = Method::parse(raw_method)?;
    registry
        .iter()
        .find(|(_, operation)| operation.method() == method)
        .map(|(name, operation)| (name.as_str(), operation))
}

/// Distinct declared methods, in registration order.
fn allowed_methods(registry: &OperationRegistry) -> Vec<Method> {
    let mut methods = Vec::new();
    for operation in registry.values() {
        if !methods.contains(&operation.method()) {
            methods.push(operation.method());
        }
    }
    methods
}
