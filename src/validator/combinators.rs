//! Wrappers that derive new validators from existing ones.
//!
//! - [`Optional`]: an absent (`Undefined`) value passes
//! - [`Named`]: attaches a display name used in composite error messages
//! - [`Tagged`]: attaches a kind tag to a validator that lacks one
//! - [`FnValidator`]: an untagged validator built from a closure
//!
//! # Example
//!
//! ```rust
//! use typegate::{TypeValidators, Validator, Value};
//!
//! let nickname = TypeValidators::string().min(2).optional();
//!
//! assert!(nickname.validate(&Value::Undefined).is_success());
//! assert!(nickname.validate(&Value::from("Jo")).is_success());
//! assert!(nickname.validate(&Value::from("J")).is_failure());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::path::ValuePath;
use crate::validation::{fail, pass, Outcome};
use crate::value::Value;

use super::traits::{Validator, ValidatorKind};

/// Accepts `Undefined`, otherwise defers to the inner validator.
///
/// `Null` is still handed to the inner validator.
#[derive(Clone)]
pub struct Optional<V> {
    inner: V,
}

impl<V> Optional<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V: Validator> Validator for Optional<V> {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        match value {
            Value::Undefined => pass(),
            other => self.inner.validate_at(other, path),
        }
    }

    fn kind(&self) -> Option<ValidatorKind> {
        self.inner.kind()
    }

    fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    fn accepts_undefined(&self) -> bool {
        true
    }
}

/// Carries a display name for the inner validator.
#[derive(Clone)]
pub struct Named<V> {
    inner: V,
    name: String,
}

impl<V> Named<V> {
    pub fn new(inner: V, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }
}

impl<V: Validator> Validator for Named<V> {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        self.inner.validate_at(value, path)
    }

    fn kind(&self) -> Option<ValidatorKind> {
        self.inner.kind()
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn accepts_undefined(&self) -> bool {
        self.inner.accepts_undefined()
    }
}

/// Overrides the kind tag of the inner validator.
#[derive(Clone)]
pub struct Tagged<V> {
    inner: V,
    kind: ValidatorKind,
}

impl<V> Tagged<V> {
    pub fn new(inner: V, kind: ValidatorKind) -> Self {
        Self { inner, kind }
    }
}

impl<V: Validator> Validator for Tagged<V> {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        self.inner.validate_at(value, path)
    }

    fn kind(&self) -> Option<ValidatorKind> {
        Some(self.kind)
    }

    fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    fn accepts_undefined(&self) -> bool {
        self.inner.accepts_undefined()
    }
}

type CheckFn = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// A validator backed by a closure.
///
/// It carries no kind tag, so array element typing rejects it unless it is
/// wrapped with [`Validator::tagged`].
///
/// ```rust
/// use typegate::{OutcomeExt, TypeValidators, Validator, Value};
///
/// let even = TypeValidators::custom(|value| match value.as_f64() {
///     Some(n) if n % 2.0 == 0.0 => Ok(()),
///     _ => Err("Error: Debe ser par.".to_string()),
/// });
///
/// assert!(even.validate(&Value::from(4)).is_success());
/// assert_eq!(even.validate(&Value::from(3)).error_message(), Some("Error: Debe ser par."));
/// assert!(even.kind().is_none());
/// ```
#[derive(Clone)]
pub struct FnValidator {
    check: CheckFn,
}

impl FnValidator {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }
}

impl fmt::Debug for FnValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").finish_non_exhaustive()
    }
}

impl Validator for FnValidator {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        match (self.check)(value) {
            Ok(()) => pass(),
            Err(message) => fail(ValidationError::new(path.clone(), message).with_code("custom")),
        }
    }

    fn kind(&self) -> Option<ValidatorKind> {
        None
    }
}
