//! The validator capability and its kind tags.
//!
//! [`Validator`] is what every constructor in this crate returns and what
//! composite validators (array element typing, object shapes) accept. The
//! [`ValidatorKind`] tag is how a composite tells a real, typed validator
//! from an ad-hoc closure it cannot describe.

use std::fmt::{self, Display};
use std::sync::Arc;

use crate::path::ValuePath;
use crate::validation::Outcome;
use crate::value::{Value, ValueKind};

use super::combinators::{Named, Optional, Tagged};

/// Discriminator attached to every typed validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Array,
    Object,
    InstanceOf,
    Null,
    Undefined,
}

impl ValidatorKind {
    pub const ALL: [ValidatorKind; 10] = [
        ValidatorKind::String,
        ValidatorKind::Number,
        ValidatorKind::Boolean,
        ValidatorKind::BigInt,
        ValidatorKind::Symbol,
        ValidatorKind::Array,
        ValidatorKind::Object,
        ValidatorKind::InstanceOf,
        ValidatorKind::Null,
        ValidatorKind::Undefined,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValidatorKind::String => "string",
            ValidatorKind::Number => "number",
            ValidatorKind::Boolean => "boolean",
            ValidatorKind::BigInt => "bigint",
            ValidatorKind::Symbol => "symbol",
            ValidatorKind::Array => "array",
            ValidatorKind::Object => "object",
            ValidatorKind::InstanceOf => "instanceof",
            ValidatorKind::Null => "null",
            ValidatorKind::Undefined => "undefined",
        }
    }

    /// True when values of runtime kind `kind` are what this validator checks.
    pub fn admits(self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (ValidatorKind::String, ValueKind::String)
                | (ValidatorKind::Number, ValueKind::Number)
                | (ValidatorKind::Boolean, ValueKind::Boolean)
                | (ValidatorKind::BigInt, ValueKind::BigInt)
                | (ValidatorKind::Symbol, ValueKind::Symbol)
                | (ValidatorKind::Array, ValueKind::Array)
                | (ValidatorKind::Object, ValueKind::Object)
                | (ValidatorKind::InstanceOf, ValueKind::Instance)
                | (ValidatorKind::Null, ValueKind::Null)
                | (ValidatorKind::Undefined, ValueKind::Undefined)
        )
    }
}

impl Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pure function from a value to an [`Outcome`], optionally tagged with a kind.
///
/// Implementations must be deterministic and must not keep mutable state:
/// the same validator may be evaluated any number of times, from any number
/// of threads, and always gives the same answer for the same input.
///
/// # Example
///
/// ```rust
/// use typegate::{TypeValidators, Validator, ValidatorKind, Value};
///
/// let name = TypeValidators::string().min(3);
/// assert_eq!(name.kind(), Some(ValidatorKind::String));
/// assert!(name.validate(&Value::from("Ana")).is_success());
/// assert!(name.validate(&Value::from("Al")).is_failure());
/// ```
pub trait Validator: Send + Sync {
    /// Evaluates `value`, located at `path` inside the outermost input.
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome;

    /// Evaluates `value` as the outermost input.
    fn validate(&self, value: &Value) -> Outcome {
        self.validate_at(value, &ValuePath::root())
    }

    /// The kind tag, or `None` for untagged validators.
    fn kind(&self) -> Option<ValidatorKind>;

    /// Display name used when this validator is reported as invalid.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Whether an absent value passes this validator.
    ///
    /// Object shapes use this to treat a field as implicitly optional.
    fn accepts_undefined(&self) -> bool {
        self.validate(&Value::Undefined).is_success()
    }

    /// Type-erases this validator for storage in composites and registries.
    fn shared(self) -> SharedValidator
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }

    /// Derives a validator that also accepts an absent value.
    fn optional(&self) -> Optional<Self>
    where
        Self: Sized + Clone,
    {
        Optional::new(self.clone())
    }

    /// Derives a validator reporting `name` when composites describe it.
    fn named(&self, name: impl Into<String>) -> Named<Self>
    where
        Self: Sized + Clone,
    {
        Named::new(self.clone(), name)
    }

    /// Derives a validator carrying `kind` as its tag.
    fn tagged(&self, kind: ValidatorKind) -> Tagged<Self>
    where
        Self: Sized + Clone,
    {
        Tagged::new(self.clone(), kind)
    }
}

/// A type-erased, shareable validator.
pub type SharedValidator = Arc<dyn Validator>;

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        (**self).validate_at(value, path)
    }

    fn kind(&self) -> Option<ValidatorKind> {
        (**self).kind()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }

    fn accepts_undefined(&self) -> bool {
        (**self).accepts_undefined()
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        (**self).validate_at(value, path)
    }

    fn kind(&self) -> Option<ValidatorKind> {
        (**self).kind()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }

    fn accepts_undefined(&self) -> bool {
        (**self).accepts_undefined()
    }
}

/// Name shown for validators that carry none.
pub(crate) fn display_name(validator: &dyn Validator) -> &str {
    validator.name().unwrap_or("desconocido")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let names: Vec<_> = ValidatorKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "string",
                "number",
                "boolean",
                "bigint",
                "symbol",
                "array",
                "object",
                "instanceof",
                "null",
                "undefined"
            ]
        );
    }

    #[test]
    fn test_admits_matches_runtime_kind() {
        assert!(ValidatorKind::InstanceOf.admits(ValueKind::Instance));
        assert!(ValidatorKind::Number.admits(ValueKind::Number));
        assert!(!ValidatorKind::Number.admits(ValueKind::BigInt));
        assert!(!ValidatorKind::Object.admits(ValueKind::Array));
    }
}
