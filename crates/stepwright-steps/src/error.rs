//! Step error types.

use crate::source::SourceScope;

/// Errors from constructing or invoking steps.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// A step unit was constructed with invalid fields.
    #[error("invalid step unit: {0}")]
    InvalidUnit(String),

    /// The step was called with the wrong number of arguments.
    #[error("step {step} expects {expected} argument(s), got {found}")]
    ArgumentCount {
        /// Step name.
        step: String,
        /// Arguments the step declares.
        expected: usize,
        /// Arguments supplied.
        found: usize,
    },

    /// The step body reported a failure.
    #[error("step {step} failed: {message}")]
    Invocation {
        /// Step name.
        step: String,
        /// Failure reason.
        message: String,
    },
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// A source scope could not be enumerated.
///
/// Discovery recovers from this locally by falling back to a marker-only
/// scan of the scope; it is never returned from a discovery pass.
#[derive(Debug, thiserror::Error)]
pub enum SourceScanError {
    /// The scope does not resolve to anything the enumerator can read.
    #[error("cannot resolve source scope {scope}: {message}")]
    Unresolvable {
        /// The scope being scanned.
        scope: SourceScope,
        /// Failure reason.
        message: String,
    },

    /// A provider registered under the scope could not be materialized.
    #[error("step provider {provider} in scope {scope} failed to load: {message}")]
    ProviderFailed {
        /// The scope being scanned.
        scope: SourceScope,
        /// Origin path of the failing provider.
        provider: String,
        /// Failure reason.
        message: String,
    },
}
