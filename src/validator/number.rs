//! Number validation.
//!
//! [`NumberValidator`] accepts finite and infinite doubles but never `NaN`,
//! then applies range, sign, integrality and divisibility rules.

use std::ops::RangeInclusive;

use crate::error::ValidationError;
use crate::path::ValuePath;
use crate::validation::{fail, pass, type_mismatch, Outcome};
use crate::value::Value;

use super::traits::{Validator, ValidatorKind};
use super::{override_last, Constraint, REQUIRED_MESSAGE};

#[derive(Clone)]
enum NumberRule {
    Required,
    Min(f64),
    Max(f64),
    Between(f64, f64),
    Positive,
    Negative,
    Integer,
    MultipleOf(f64),
}

/// A validator for number values.
///
/// The base check runs before any rule, so `required()` can only ever see a
/// number; absent values are already rejected with the type message.
///
/// # Example
///
/// ```rust
/// use typegate::{OutcomeExt, TypeValidators, Validator, Value};
///
/// let quantity = TypeValidators::number().integer().between(5.0, 10.0);
///
/// assert!(quantity.validate(&Value::from(7)).is_success());
/// assert_eq!(
///     quantity.validate(&Value::from(12)).error_message(),
///     Some("Error: Debe estar entre 5 y 10.")
/// );
/// assert_eq!(
///     quantity.validate(&Value::from(f64::NAN)).error_message(),
///     Some("Error: El valor proporcionado no es un número válido.")
/// );
/// ```
#[derive(Clone)]
pub struct NumberValidator {
    constraints: Vec<Constraint<NumberRule>>,
    type_error_message: Option<String>,
}

impl NumberValidator {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    fn with(&self, rule: NumberRule) -> Self {
        let mut next = self.clone();
        next.constraints.push(Constraint::new(rule));
        next
    }

    /// Never fails on its own: the number check already rejects absent values.
    pub fn required(&self) -> Self {
        self.with(NumberRule::Required)
    }

    /// Inclusive lower bound.
    pub fn min(&self, min: f64) -> Self {
        self.with(NumberRule::Min(min))
    }

    /// Inclusive upper bound.
    pub fn max(&self, max: f64) -> Self {
        self.with(NumberRule::Max(max))
    }

    /// Inclusive range, reported as one rule.
    pub fn between(&self, lo: f64, hi: f64) -> Self {
        self.with(NumberRule::Between(lo, hi))
    }

    pub fn range(&self, range: RangeInclusive<f64>) -> Self {
        self.between(*range.start(), *range.end())
    }

    /// Strictly greater than zero.
    pub fn positive(&self) -> Self {
        self.with(NumberRule::Positive)
    }

    /// Strictly less than zero.
    pub fn negative(&self) -> Self {
        self.with(NumberRule::Negative)
    }

    pub fn integer(&self) -> Self {
        self.with(NumberRule::Integer)
    }

    /// The floating remainder by `divisor` must be zero.
    pub fn multiple_of(&self, divisor: f64) -> Self {
        self.with(NumberRule::MultipleOf(divisor))
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

impl Default for NumberValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for NumberValidator {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        let n = match value.as_f64() {
            Some(n) if !n.is_nan() => n,
            _ => {
                let message = self.type_error_message.clone().unwrap_or_else(|| {
                    "Error: El valor proporcionado no es un número válido.".to_string()
                });
                return type_mismatch(path, message, "number", value);
            }
        };

        match self
            .constraints
            .iter()
            .find_map(|c| check_constraint(c, value, n, path))
        {
            Some(error) => fail(error),
            None => pass(),
        }
    }

    fn kind(&self) -> Option<ValidatorKind> {
        Some(ValidatorKind::Number)
    }
}

fn check_constraint(
    constraint: &Constraint<NumberRule>,
    original: &Value,
    n: f64,
    path: &ValuePath,
) -> Option<ValidationError> {
    let failed = match constraint.rule {
        NumberRule::Required => original.is_absent(),
        NumberRule::Min(min) => n < min,
        NumberRule::Max(max) => n > max,
        NumberRule::Between(lo, hi) => n < lo || n > hi,
        NumberRule::Positive => n <= 0.0,
        NumberRule::Negative => n >= 0.0,
        NumberRule::Integer => n.fract() != 0.0 || !n.is_finite(),
        NumberRule::MultipleOf(divisor) => n % divisor != 0.0,
    };
    if !failed {
        return None;
    }

    let (code, expected, default) = match constraint.rule {
        NumberRule::Required => ("required", None, REQUIRED_MESSAGE.to_string()),
        NumberRule::Min(min) => (
            "min_value",
            Some(format!("at least {}", min)),
            format!("Error: Debe ser mayor o igual a {}.", min),
        ),
        NumberRule::Max(max) => (
            "max_value",
            Some(format!("at most {}", max)),
            format!("Error: Debe ser menor o igual a {}.", max),
        ),
        NumberRule::Between(lo, hi) => (
            "range",
            Some(format!("between {} and {}", lo, hi)),
            format!("Error: Debe estar entre {} y {}.", lo, hi),
        ),
        NumberRule::Positive => (
            "positive",
            Some("value > 0".to_string()),
            "Error: Debe ser un número positivo.".to_string(),
        ),
        NumberRule::Negative => (
            "negative",
            Some("value < 0".to_string()),
            "Error: Debe ser un número negativo.".to_string(),
        ),
        NumberRule::Integer => (
            "integer",
            Some("integer".to_string()),
            "Error: Debe ser un número entero.".to_string(),
        ),
        NumberRule::MultipleOf(divisor) => (
            "multiple_of",
            Some(format!("multiple of {}", divisor)),
            format!("Error: Debe ser múltiplo de {}.", divisor),
        ),
    };

    let error = constraint.error(path, code, || default).with_got(n.to_string());
    Some(match expected {
        Some(expected) => error.with_expected(expected),
        None => error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_failure(v: Outcome) -> ValidationError {
        v.into_result().unwrap_err()
    }

    fn message(v: &NumberValidator, value: impl Into<Value>) -> String {
        unwrap_failure(v.validate(&value.into())).message
    }

    #[test]
    fn test_accepts_numbers() {
        let v = NumberValidator::new();
        assert!(v.validate(&Value::from(0)).is_success());
        assert!(v.validate(&Value::from(-2.5)).is_success());
        assert!(v.validate(&Value::from(f64::INFINITY)).is_success());
    }

    #[test]
    fn test_rejects_nan_and_non_numbers() {
        let v = NumberValidator::new();
        let expected = "Error: El valor proporcionado no es un número válido.";
        assert_eq!(message(&v, f64::NAN), expected);
        assert_eq!(message(&v, "123"), expected);
        assert_eq!(message(&v, Value::bigint(1)), expected);
        assert_eq!(message(&v, Value::Undefined), expected);
    }

    #[test]
    fn test_bounds() {
        let v = NumberValidator::new().min(1.0).max(3.0);
        assert!(v.validate(&Value::from(1)).is_success());
        assert!(v.validate(&Value::from(3)).is_success());
        assert_eq!(message(&v, 0), "Error: Debe ser mayor o igual a 1.");
        assert_eq!(message(&v, 3.5), "Error: Debe ser menor o igual a 3.");
    }

    #[test]
    fn test_between_is_inclusive() {
        let v = NumberValidator::new().between(5.0, 10.0);
        assert!(v.validate(&Value::from(5)).is_success());
        assert!(v.validate(&Value::from(10)).is_success());
        assert_eq!(message(&v, 12), "Error: Debe estar entre 5 y 10.");
        assert_eq!(message(&v, 4.9), "Error: Debe estar entre 5 y 10.");
    }

    #[test]
    fn test_range_matches_between() {
        let v = NumberValidator::new().range(0.5..=1.5);
        assert_eq!(message(&v, 2), "Error: Debe estar entre 0.5 y 1.5.");
    }

    #[test]
    fn test_sign_rules_are_strict() {
        let positive = NumberValidator::new().positive();
        assert!(positive.validate(&Value::from(0.1)).is_success());
        assert_eq!(message(&positive, 0), "Error: Debe ser un número positivo.");

        let negative = NumberValidator::new().negative();
        assert!(negative.validate(&Value::from(-1)).is_success());
        assert_eq!(message(&negative, 0), "Error: Debe ser un número negativo.");
    }

    #[test]
    fn test_integer() {
        let v = NumberValidator::new().integer();
        assert!(v.validate(&Value::from(4)).is_success());
        assert!(v.validate(&Value::from(-4.0)).is_success());
        assert_eq!(message(&v, 3.5), "Error: Debe ser un número entero.");
        assert!(v.validate(&Value::from(f64::INFINITY)).is_failure());
    }

    #[test]
    fn test_multiple_of() {
        let v = NumberValidator::new().multiple_of(5.0);
        assert!(v.validate(&Value::from(15)).is_success());
        assert!(v.validate(&Value::from(0)).is_success());
        assert_eq!(message(&v, 7), "Error: Debe ser múltiplo de 5.");

        let decimal = NumberValidator::new().multiple_of(0.5);
        assert!(decimal.validate(&Value::from(2.5)).is_success());
    }

    #[test]
    fn test_required_passes_any_number() {
        let v = NumberValidator::new().required();
        assert!(v.validate(&Value::from(0)).is_success());
        assert_eq!(
            message(&v, Value::Null),
            "Error: El valor proporcionado no es un número válido."
        );
    }

    #[test]
    fn test_custom_messages() {
        let v = NumberValidator::new()
            .error("número, por favor")
            .positive()
            .error("mayor que cero");
        assert_eq!(message(&v, "x"), "número, por favor");
        assert_eq!(message(&v, -1), "mayor que cero");
    }

    #[test]
    fn test_error_codes() {
        let v = NumberValidator::new().integer().min(10.0);
        let error = unwrap_failure(v.validate(&Value::from(2)));
        assert_eq!(error.code, "min_value");
        assert_eq!(error.got.as_deref(), Some("2"));
        assert_eq!(error.expected.as_deref(), Some("at least 10"));
    }
}
