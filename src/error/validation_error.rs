//! Validation failure types.
//!
//! [`ValidationError`] is the failure half of an [`Outcome`](crate::Outcome);
//! [`ValidationErrors`] gathers several of them for reports that keep going
//! after the first failure.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::ValuePath;

/// Message used when a failure would otherwise carry no text.
pub(crate) const FALLBACK_MESSAGE: &str = "Error: El valor no es válido.";

/// A single validation failure.
///
/// - **message**: the complete, human-readable text callers show to users
/// - **code**: machine-readable identifier of the rule that failed
/// - **path**: where in the input the failing value sits
/// - **got** / **expected**: optional descriptions of the mismatch
///
/// The message is never empty. `Display` prints it verbatim.
///
/// # Example
///
/// ```rust
/// use typegate::{ValidationError, ValuePath};
///
/// let error = ValidationError::new(ValuePath::root().push_field("age"), "Error: Debe ser un número positivo.")
///     .with_code("positive")
///     .with_got("-3");
///
/// assert_eq!(error.to_string(), "Error: Debe ser un número positivo.");
/// assert_eq!(error.path.to_string(), "age");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub path: ValuePath,
    pub message: String,
    pub got: Option<String>,
    pub expected: Option<String>,
    pub code: String,
}

impl ValidationError {
    /// Creates an error with the default `validation_error` code.
    ///
    /// An empty message is replaced by a generic one.
    pub fn new(path: ValuePath, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            path,
            message,
            got: None,
            expected: None,
            code: "validation_error".to_string(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Prefixes the message with the name of the field that held the failing value.
    pub fn within_field(mut self, field: &str) -> Self {
        self.message = format!(
            "Error: El campo \"{}\" no es válido. {}",
            field, self.message
        );
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// A non-empty collection of validation failures.
///
/// Produced by accumulating reports such as
/// [`ObjectValidator::validate_all`](crate::ObjectValidator::validate_all).
/// Collections combine through `Semigroup`:
///
/// ```rust
/// use typegate::{ValidationError, ValidationErrors, ValuePath};
/// use stillwater::prelude::*;
///
/// let a = ValidationErrors::single(ValidationError::new(ValuePath::root().push_field("id"), "missing"));
/// let b = ValidationErrors::single(ValidationError::new(ValuePath::root().push_field("name"), "too short"));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Returns `None` when `errors` is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        errors
            .into_iter()
            .map(Self::single)
            .reduce(|acc, next| acc.combine(next))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection holds at least one error.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Errors raised for the value at `path`.
    pub fn at_path(&self, path: &ValuePath) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    pub fn with_code(&self, code: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// The messages in report order.
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            if error.path.is_root() {
                writeln!(f, "  {}. {}", i + 1, error)?;
            } else {
                writeln!(f, "  {}. {}: {}", i + 1, error.path, error)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let error = ValidationError::new(ValuePath::root(), "Error: Solo se permiten letras.");
        assert_eq!(error.code, "validation_error");
        assert_eq!(error.message(), "Error: Solo se permiten letras.");
        assert!(error.got.is_none());
        assert!(error.expected.is_none());
    }

    #[test]
    fn test_empty_message_is_replaced() {
        let error = ValidationError::new(ValuePath::root(), "   ");
        assert_eq!(error.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_within_field_wraps_once_per_call() {
        let error = ValidationError::new(ValuePath::root(), "Error: Debe ser un número positivo.")
            .within_field("age")
            .within_field("user");
        assert_eq!(
            error.message,
            "Error: El campo \"user\" no es válido. Error: El campo \"age\" no es válido. Error: Debe ser un número positivo."
        );
    }

    #[test]
    fn test_errors_query_by_path_and_code() {
        let id = ValuePath::root().push_field("id");
        let errors = ValidationErrors::single(
            ValidationError::new(id.clone(), "missing").with_code("missing_field"),
        )
        .combine(ValidationErrors::single(
            ValidationError::new(ValuePath::root().push_field("x"), "extra").with_code("unknown_field"),
        ));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.at_path(&id).len(), 1);
        assert_eq!(errors.with_code("unknown_field").len(), 1);
        assert_eq!(errors.messages(), vec!["missing", "extra"]);
    }

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(ValidationErrors::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_errors_display_lists_paths() {
        let errors = ValidationErrors::single(ValidationError::new(
            ValuePath::root().push_field("name"),
            "Error: Debe tener al menos 3 caracteres.",
        ));
        let display = errors.to_string();
        assert!(display.contains("1 error(s)"));
        assert!(display.contains("name: Error: Debe tener al menos 3 caracteres."));
    }
}
