//! String validation.
//!
//! [`StringValidator`] checks that a value is a string, then applies chained
//! rules (presence, length bounds, character classes, patterns) in the order
//! they were added, stopping at the first failure.

use regex::Regex;
use tracing::debug;

use crate::error::{BuildError, ValidationError};
use crate::path::ValuePath;
use crate::validation::{fail, pass, type_mismatch, Outcome};
use crate::value::Value;

use super::traits::{Validator, ValidatorKind};
use super::{override_last, Constraint, REQUIRED_MESSAGE};

#[derive(Clone)]
enum StringRule {
    Required,
    Min(usize),
    Max(usize),
    Exact(usize),
    OnlyLetters,
    OnlyNumbers,
    Alphanumeric,
    Pattern { regex: Regex, message: String },
}

/// A validator for string values.
///
/// Lengths count Unicode scalar values, not bytes.
///
/// # Example
///
/// ```rust
/// use typegate::{OutcomeExt, TypeValidators, Validator, Value};
///
/// let code = TypeValidators::string()
///     .exact(4)
///     .only_numbers()
///     .error("El código son cuatro dígitos.");
///
/// assert!(code.validate(&Value::from("0421")).is_success());
/// assert_eq!(
///     code.validate(&Value::from("04a1")).error_message(),
///     Some("El código son cuatro dígitos.")
/// );
/// ```
#[derive(Clone)]
pub struct StringValidator {
    constraints: Vec<Constraint<StringRule>>,
    type_error_message: Option<String>,
}

impl StringValidator {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    fn with(&self, rule: StringRule) -> Self {
        let mut next = self.clone();
        next.constraints.push(Constraint::new(rule));
        next
    }

    /// Rejects empty and whitespace-only strings.
    pub fn required(&self) -> Self {
        self.with(StringRule::Required)
    }

    pub fn min(&self, len: usize) -> Self {
        self.with(StringRule::Min(len))
    }

    pub fn max(&self, len: usize) -> Self {
        self.with(StringRule::Max(len))
    }

    pub fn exact(&self, len: usize) -> Self {
        self.with(StringRule::Exact(len))
    }

    /// ASCII letters only; the empty string fails.
    pub fn only_letters(&self) -> Self {
        self.with(StringRule::OnlyLetters)
    }

    /// ASCII digits only; the empty string fails.
    pub fn only_numbers(&self) -> Self {
        self.with(StringRule::OnlyNumbers)
    }

    pub fn alphanumeric(&self) -> Self {
        self.with(StringRule::Alphanumeric)
    }

    /// Requires a match of `pattern`; `message` is reported verbatim on failure.
    ///
    /// ```rust
    /// use typegate::{OutcomeExt, TypeValidators, Validator, Value};
    ///
    /// let email = TypeValidators::string()
    ///     .regex(r"^[^@\s]+@[^@\s]+$", "Error: Correo no válido.")
    ///     .unwrap();
    ///
    /// assert!(email.validate(&Value::from("ana@example.com")).is_success());
    /// assert_eq!(
    ///     email.validate(&Value::from("ana")).error_message(),
    ///     Some("Error: Correo no válido.")
    /// );
    /// ```
    pub fn regex(&self, pattern: &str, message: impl Into<String>) -> Result<Self, BuildError> {
        let regex = Regex::new(pattern).map_err(|err| {
            debug!(pattern, error = %err, "rejected string pattern");
            BuildError::from(err)
        })?;
        Ok(self.regex_with(regex, message))
    }

    /// Like [`regex`](Self::regex) with an already compiled pattern.
    pub fn regex_with(&self, regex: Regex, message: impl Into<String>) -> Self {
        self.with(StringRule::Pattern {
            regex,
            message: message.into(),
        })
    }

    /// Overrides the message of the most recent rule, or of the type check
    /// when no rule has been added yet.
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

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for StringValidator {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "Error: El valor proporcionado no es un string.".to_string());
                return type_mismatch(path, message, "string", value);
            }
        };

        match self
            .constraints
            .iter()
            .find_map(|c| check_constraint(c, s, path))
        {
            Some(error) => fail(error),
            None => pass(),
        }
    }

    fn kind(&self) -> Option<ValidatorKind> {
        Some(ValidatorKind::String)
    }
}

fn check_constraint(
    constraint: &Constraint<StringRule>,
    value: &str,
    path: &ValuePath,
) -> Option<ValidationError> {
    let len = || value.chars().count();
    match &constraint.rule {
        StringRule::Required => value
            .trim()
            .is_empty()
            .then(|| constraint.error(path, "required", || REQUIRED_MESSAGE.to_string())),
        StringRule::Min(min) => (len() < *min).then(|| {
            constraint
                .error(path, "min_length", || {
                    format!("Error: Debe tener al menos {} caracteres.", min)
                })
                .with_expected(format!("at least {} characters", min))
                .with_got(format!("{} characters", len()))
        }),
        StringRule::Max(max) => (len() > *max).then(|| {
            constraint
                .error(path, "max_length", || {
                    format!("Error: No puede superar los {} caracteres.", max)
                })
                .with_expected(format!("at most {} characters", max))
                .with_got(format!("{} characters", len()))
        }),
        StringRule::Exact(exact) => (len() != *exact).then(|| {
            constraint
                .error(path, "exact_length", || {
                    format!("Error: Debe tener exactamente {} caracteres.", exact)
                })
                .with_expected(format!("exactly {} characters", exact))
                .with_got(format!("{} characters", len()))
        }),
        StringRule::OnlyLetters => (!all_ascii(value, |c| c.is_ascii_alphabetic())).then(|| {
            constraint.error(path, "only_letters", || {
                "Error: Solo se permiten letras.".to_string()
            })
        }),
        StringRule::OnlyNumbers => (!all_ascii(value, |c| c.is_ascii_digit())).then(|| {
            constraint.error(path, "only_numbers", || {
                "Error: Solo se permiten números.".to_string()
            })
        }),
        StringRule::Alphanumeric => {
            (!all_ascii(value, |c| c.is_ascii_alphanumeric())).then(|| {
                constraint.error(path, "alphanumeric", || {
                    "Error: Solo se permiten letras y números.".to_string()
                })
            })
        }
        StringRule::Pattern { regex, message } => (!regex.is_match(value)).then(|| {
            constraint
                .error(path, "pattern", || message.clone())
                .with_expected(format!("string matching '{}'", regex.as_str()))
        }),
    }
}

/// Non-empty and every char satisfies `pred`.
fn all_ascii(value: &str, pred: impl Fn(char) -> bool) -> bool {
    !value.is_empty() && value.chars().all(pred)
}
