//! Validators for kinds that carry no constraints of their own:
//! `bigint`, `symbol`, `null` and `undefined`.

use tracing::trace;

use crate::error::ValidationError;
use crate::path::ValuePath;
use crate::validation::{fail, pass, type_mismatch, Outcome};
use crate::value::Value;

use super::traits::{Validator, ValidatorKind};
use super::{override_last, Constraint, REQUIRED_MESSAGE};

#[derive(Clone)]
enum MarkerRule {
    Required,
}

/// Checks that a value is of one fixed kind, or with [`not`](Self::not),
/// that it is not.
///
/// `required()` means the value must be present and non-null, as it does for
/// every other validator. On `null()` and `undefined()` that rule can never
/// pass; use [`not`](Self::not) to reject a kind instead.
///
/// ```rust
/// use typegate::{OutcomeExt, TypeValidators, Validator, Value};
///
/// let id = TypeValidators::bigint();
/// assert!(id.validate(&Value::bigint(9_007_199_254_740_993_i64)).is_success());
/// assert_eq!(
///     id.validate(&Value::from(1)).error_message(),
///     Some("Error: El valor debe ser `bigint`.")
/// );
///
/// let defined = TypeValidators::undefined().not();
/// assert_eq!(
///     defined.validate(&Value::Undefined).error_message(),
///     Some("Error: Este campo no puede ser `undefined`.")
/// );
/// ```
#[derive(Clone)]
pub struct MarkerValidator {
    kind: ValidatorKind,
    negated: bool,
    constraints: Vec<Constraint<MarkerRule>>,
    type_error_message: Option<String>,
}

impl MarkerValidator {
    pub(crate) fn new(kind: ValidatorKind) -> Self {
        Self {
            kind,
            negated: false,
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    pub fn required(&self) -> Self {
        let mut next = self.clone();
        next.constraints.push(Constraint::new(MarkerRule::Required));
        next
    }

    /// Inverts the base check: the value must not be of this kind.
    pub fn not(&self) -> Self {
        Self {
            negated: !self.negated,
            ..self.clone()
        }
    }

    pub fn is_negated(&self) -> bool {
        self.negated
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

    fn base_check(&self, value: &Value, path: &ValuePath) -> Option<Outcome> {
        let matches = self.kind.admits(value.kind());
        if self.negated && matches {
            trace!(kind = %self.kind, path = %path, "value has a rejected kind");
            let message = self
                .type_error_message
                .clone()
                .unwrap_or_else(|| format!("Error: Este campo no puede ser `{}`.", self.kind));
            Some(fail(
                ValidationError::new(path.clone(), message)
                    .with_code("forbidden_type")
                    .with_expected(format!("not {}", self.kind))
                    .with_got(value.type_name()),
            ))
        } else if !self.negated && !matches {
            let message = self
                .type_error_message
                .clone()
                .unwrap_or_else(|| format!("Error: El valor debe ser `{}`.", self.kind));
            Some(type_mismatch(path, message, self.kind.as_str(), value))
        } else {
            None
        }
    }
}

impl Validator for MarkerValidator {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        if let Some(failure) = self.base_check(value, path) {
            return failure;
        }

        let failure = self.constraints.iter().find_map(|c| match c.rule {
            MarkerRule::Required => value
                .is_absent()
                .then(|| c.error(path, "required", || REQUIRED_MESSAGE.to_string())),
        });
        match failure {
            Some(error) => fail(error),
            None => pass(),
        }
    }

    fn kind(&self) -> Option<ValidatorKind> {
        Some(self.kind)
    }
}
