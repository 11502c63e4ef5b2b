//! Boolean validation.

use std::sync::Arc;

use crate::error::ValidationError;
use crate::path::ValuePath;
use crate::validation::{fail, pass, type_mismatch, Outcome};
use crate::value::Value;

use super::traits::{Validator, ValidatorKind};
use super::{override_last, Constraint, REQUIRED_MESSAGE};

type BoolCheck = Arc<dyn Fn(bool) -> Result<(), String> + Send + Sync>;

#[derive(Clone)]
enum BooleanRule {
    Required,
    IsTrue,
    IsFalse,
    Custom(BoolCheck),
}

/// A validator for boolean values.
///
/// ```rust
/// use typegate::{OutcomeExt, TypeValidators, Validator, Value};
///
/// let accepted = TypeValidators::boolean().is_true().error("Debes aceptar los términos.");
///
/// assert!(accepted.validate(&Value::from(true)).is_success());
/// assert_eq!(
///     accepted.validate(&Value::from(false)).error_message(),
///     Some("Debes aceptar los términos.")
/// );
/// ```
#[derive(Clone)]
pub struct BooleanValidator {
    constraints: Vec<Constraint<BooleanRule>>,
    type_error_message: Option<String>,
}

impl BooleanValidator {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    fn with(&self, rule: BooleanRule) -> Self {
        let mut next = self.clone();
        next.constraints.push(Constraint::new(rule));
        next
    }

    /// Never fails on its own: the boolean check already rejects absent values.
    pub fn required(&self) -> Self {
        self.with(BooleanRule::Required)
    }

    pub fn is_true(&self) -> Self {
        self.with(BooleanRule::IsTrue)
    }

    pub fn is_false(&self) -> Self {
        self.with(BooleanRule::IsFalse)
    }

    /// Runs `check` on the boolean; its `Err` text becomes the message.
    pub fn custom<F>(&self, check: F) -> Self
    where
        F: Fn(bool) -> Result<(), String> + Send + Sync + 'static,
    {
        self.with(BooleanRule::Custom(Arc::new(check)))
    }

    pub fn error(&self, message: impl Into<String>) -> Self {
        let mut next = self.clone();
        override_last(
            &mut next.constraints,
            &mut next.type_error_message,
            message.into(),
        );
        next
    }
}

impl Default for BooleanValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for BooleanValidator {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        let b = match value.as_bool() {
            Some(b) => b,
            None => {
                let message = self.type_error_message.clone().unwrap_or_else(|| {
                    "Error: El valor proporcionado no es un booleano.".to_string()
                });
                return type_mismatch(path, message, "boolean", value);
            }
        };

        match self
            .constraints
            .iter()
            .find_map(|c| check_constraint(c, value, b, path))
        {
            Some(error) => fail(error),
            None => pass(),
        }
    }

    fn kind(&self) -> Option<ValidatorKind> {
        Some(ValidatorKind::Boolean)
    }
}

fn check_constraint(
    constraint: &Constraint<BooleanRule>,
    original: &Value,
    b: bool,
    path: &ValuePath,
) -> Option<ValidationError> {
    match &constraint.rule {
        BooleanRule::Required => original
            .is_absent()
            .then(|| constraint.error(path, "required", || REQUIRED_MESSAGE.to_string())),
        BooleanRule::IsTrue => (!b).then(|| {
            constraint.error(path, "is_true", || {
                "Error: El valor debe ser verdadero.".to_string()
            })
        }),
        BooleanRule::IsFalse => b.then(|| {
            constraint.error(path, "is_false", || "Error: El valor debe ser falso.".to_string())
        }),
        BooleanRule::Custom(check) => check(b)
            .err()
            .map(|message| constraint.error(path, "custom", || message)),
    }
}
