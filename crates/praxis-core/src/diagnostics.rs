//! Fault reporting.
//!
//! Middleware and handler faults never leak to clients; their detail goes
//! through [`Diagnostics`] instead, while the client sees only the generic
//! 500 body. The default implementation forwards to `tracing`.

use std::fmt;

/// Receives fault detail that must not reach the client.
pub trait Diagnostics: Send + Sync {
    /// Reports one fault, with the name of the operation that produced it.
    fn report_fault(&self, operation: &str, error: &anyhow::Error);
}

/// [`Diagnostics`] backed by the `tracing` error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report_fault(&self, operation: &str, error: &anyhow::Error) {
        tracing::error!(operation, error = %format_chain(error), "dispatch fault");
    }
}

/// Formats an error with its source chain, outermost first.
fn format_chain(error: &anyhow::Error) -> impl fmt::Display + '_ {
    struct Chain<'a>(&'a anyhow::Error);

    impl fmt::Display for Chain<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)?;
            for cause in self.0.chain().skip(1) {
                write!(f, ": {cause}")?;
            }
            Ok(())
        }
    }

    Chain(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_format_chain_includes_causes() {
        let error = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let error = anyhow::Error::from(error).context("loading profile");

        let formatted = format_chain(&error).to_string();
        assert_eq!(formatted, "loading profile: disk on fire");
    }

    #[test]
    fn test_tracing_diagnostics_does_not_panic() {
        // No subscriber installed; the call must still be safe.
        TracingDiagnostics.report_fault("get_user", &anyhow::anyhow!("boom"));
    }
}
