//! The outcome of evaluating a validator.
//!
//! Every validator returns an [`Outcome`]: `Validation::Success(())` when the
//! value passes, `Validation::Failure(ValidationError)` with a complete,
//! non-empty message when it does not. Failures are plain return values; no
//! validator panics or returns `Err` for bad data.

use stillwater::Validation;

use crate::error::ValidationError;
use crate::path::ValuePath;

/// Result of a single validator evaluation.
pub type Outcome = Validation<(), ValidationError>;

/// Convenience accessors for [`Outcome`].
///
/// ```rust
/// use typegate::{OutcomeExt, TypeValidators, Validator, Value};
///
/// let outcome = TypeValidators::string().validate(&Value::from(123));
/// assert_eq!(
///     outcome.error_message(),
///     Some("Error: El valor proporcionado no es un string.")
/// );
/// ```
pub trait OutcomeExt {
    /// The failure message, or `None` on success.
    fn error_message(&self) -> Option<&str>;

    /// Collapses the outcome into "pass, or the message to show".
    fn into_verdict(self) -> Result<(), String>;
}

impl OutcomeExt for Outcome {
    fn error_message(&self) -> Option<&str> {
        match self {
            Validation::Success(()) => None,
            Validation::Failure(error) => Some(error.message()),
        }
    }

    fn into_verdict(self) -> Result<(), String> {
        match self {
            Validation::Success(()) => Ok(()),
            Validation::Failure(error) => Err(error.message),
        }
    }
}

pub(crate) fn pass() -> Outcome {
    Validation::Success(())
}

pub(crate) fn fail(error: ValidationError) -> Outcome {
    Validation::Failure(error)
}

/// Standard type-mismatch failure shared by every base check.
pub(crate) fn type_mismatch(
    path: &ValuePath,
    message: String,
    expected: &str,
    got: &crate::Value,
) -> Outcome {
    fail(type_mismatch_error(path, message, expected, got))
}

pub(crate) fn type_mismatch_error(
    path: &ValuePath,
    message: String,
    expected: &str,
    got: &crate::Value,
) -> ValidationError {
    ValidationError::new(path.clone(), message)
        .with_code("invalid_type")
        .with_expected(expected)
        .with_got(got.type_name())
}
