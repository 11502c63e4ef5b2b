//! Faults raised while a validator is being built.

use crate::validator::FieldPolicy;

/// A validator configuration that cannot be satisfied.
///
/// These surface from builder methods, before any value is evaluated:
///
/// ```rust
/// use typegate::{BuildError, TypeValidators};
///
/// let result = TypeValidators::object()
///     .allow_extra()
///     .and_then(|v| v.allow_less());
///
/// assert!(matches!(result, Err(BuildError::ConflictingFieldPolicy { .. })));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A string pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Two field policies that exclude each other were requested on one object validator.
    #[error("cannot apply {requested} to an object validator already configured with {current}")]
    ConflictingFieldPolicy {
        requested: FieldPolicy,
        current: FieldPolicy,
    },
}
