//! Validator definitions.
//!
//! Every validator starts as a base type check obtained from
//! [`TypeValidators`] and is refined by chaining constraint methods. Each
//! chain call returns a new validator; the receiver is left untouched, so a
//! base validator can be branched into as many derived validators as needed.
//! Evaluation stops at the first failing rule.
//!
//! # Example
//!
//! ```rust
//! use typegate::{OutcomeExt, TypeValidators, Validator, Value};
//!
//! let username = TypeValidators::string().required().min(3).alphanumeric();
//!
//! assert!(username.validate(&Value::from("ana99")).is_success());
//! assert_eq!(
//!     username.validate(&Value::from("ab")).error_message(),
//!     Some("Error: Debe tener al menos 3 caracteres.")
//! );
//! ```

mod array;
mod boolean;
mod combinators;
mod instance;
mod marker;
mod number;
mod object;
mod string;
mod traits;

pub use array::{ArrayConfig, ArrayValidator};
pub use boolean::BooleanValidator;
pub use combinators::{FnValidator, Named, Optional, Tagged};
pub use instance::InstanceValidator;
pub use marker::MarkerValidator;
pub use number::NumberValidator;
pub use object::{FieldPolicy, ObjectValidator};
pub use string::StringValidator;
pub use traits::{SharedValidator, Validator, ValidatorKind};

use crate::error::ValidationError;
use crate::path::ValuePath;
use crate::value::{Class, Value};

/// Entry point for building validators.
///
/// One constructor per kind; each returns a base validator that only checks
/// the runtime kind of the value.
///
/// ```rust
/// use typegate::{TypeValidators, Validator, ValidatorKind, Value};
///
/// let age = TypeValidators::number().integer().between(0.0, 130.0);
/// assert_eq!(age.kind(), Some(ValidatorKind::Number));
/// assert!(age.validate(&Value::from(42)).is_success());
/// assert!(age.validate(&Value::from("42")).is_failure());
/// ```
pub struct TypeValidators;

impl TypeValidators {
    pub fn string() -> StringValidator {
        StringValidator::new()
    }

    /// Numbers; `NaN` is rejected by the base check.
    pub fn number() -> NumberValidator {
        NumberValidator::new()
    }

    pub fn boolean() -> BooleanValidator {
        BooleanValidator::new()
    }

    pub fn bigint() -> MarkerValidator {
        MarkerValidator::new(ValidatorKind::BigInt)
    }

    pub fn symbol() -> MarkerValidator {
        MarkerValidator::new(ValidatorKind::Symbol)
    }

    pub fn null() -> MarkerValidator {
        MarkerValidator::new(ValidatorKind::Null)
    }

    pub fn undefined() -> MarkerValidator {
        MarkerValidator::new(ValidatorKind::Undefined)
    }

    pub fn array() -> ArrayValidator {
        ArrayValidator::new()
    }

    /// Array validator configured in one call.
    ///
    /// Unless `optional_empty` is set, empty arrays are rejected.
    ///
    /// ```rust
    /// use typegate::{ArrayConfig, OutcomeExt, TypeValidators, Validator, Value};
    ///
    /// let tags = TypeValidators::array_with(ArrayConfig {
    ///     max_length: Some(3),
    ///     ..ArrayConfig::default()
    /// });
    ///
    /// assert_eq!(
    ///     tags.validate(&Value::array(Vec::<Value>::new())).error_message(),
    ///     Some("Error: El array no puede estar vacío.")
    /// );
    /// ```
    pub fn array_with(config: ArrayConfig) -> ArrayValidator {
        ArrayValidator::new().configure(config)
    }

    pub fn object() -> ObjectValidator {
        ObjectValidator::new()
    }

    pub fn instance_of(class: &Class) -> InstanceValidator {
        InstanceValidator::new(class)
    }

    pub fn not_instance_of(class: &Class) -> InstanceValidator {
        InstanceValidator::new(class).not()
    }

    /// Wraps a closure as an untagged validator.
    pub fn custom<F>(check: F) -> FnValidator
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        FnValidator::new(check)
    }
}

/// A chained rule plus its optional message override.
#[derive(Clone)]
pub(crate) struct Constraint<R> {
    pub(crate) rule: R,
    pub(crate) message: Option<String>,
}

impl<R> Constraint<R> {
    pub(crate) fn new(rule: R) -> Self {
        Self {
            rule,
            message: None,
        }
    }

    /// Builds the failure for this rule, preferring the override message.
    pub(crate) fn error(
        &self,
        path: &ValuePath,
        code: &str,
        default: impl FnOnce() -> String,
    ) -> ValidationError {
        let message = self.message.clone().unwrap_or_else(default);
        ValidationError::new(path.clone(), message).with_code(code)
    }
}

/// Sets `message` on the last constraint, or on `fallback` when there is none.
pub(crate) fn override_last<R>(
    constraints: &mut [Constraint<R>],
    fallback: &mut Option<String>,
    message: String,
) {
    match constraints.last_mut() {
        Some(last) => last.message = Some(message),
        None => *fallback = Some(message),
    }
}

pub(crate) const REQUIRED_MESSAGE: &str = "Error: Este campo es requerido.";
