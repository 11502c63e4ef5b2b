//! Array validation.
//!
//! [`ArrayValidator`] checks that a value is an array, then applies length
//! bounds and element typing in the order they were chained. Element typing
//! comes in two forms:
//!
//! - [`of_one`](ArrayValidator::of_one): every element must pass one validator
//! - [`of_any`](ArrayValidator::of_any): every element must pass at least one
//!   of several validators, tried in declaration order

use tracing::trace;

use crate::error::ValidationError;
use crate::path::ValuePath;
use crate::validation::{fail, pass, type_mismatch, Outcome};
use crate::value::Value;

use super::traits::{display_name, SharedValidator, Validator, ValidatorKind};
use super::{override_last, Constraint, REQUIRED_MESSAGE};

/// One-call configuration for an [`ArrayValidator`].
///
/// Unless `optional_empty` is set, a configured validator rejects empty
/// arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayConfig {
    pub optional_empty: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

#[derive(Clone)]
enum ArrayRule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    OfOne(SharedValidator),
    OfAny(Vec<SharedValidator>),
}

/// How a zero-length array is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmptyPolicy {
    /// Empty arrays go through the chained rules like any other.
    Unspecified,
    /// Empty arrays that pass the chained rules fail with the emptiness message.
    Forbid,
    /// Empty arrays pass without consulting length bounds.
    Allow,
}

/// Which part of the validator the next `.error()` call applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastSet {
    Constraint,
    EmptyPolicy,
}

/// A validator for arrays and their elements.
///
/// # Example
///
/// ```rust
/// use typegate::{OutcomeExt, TypeValidators, Validator, Value};
///
/// let scores = TypeValidators::array()
///     .min_length(2)
///     .max_length(4)
///     .of_one(TypeValidators::number());
///
/// assert!(scores.validate(&Value::array([1, 2])).is_success());
/// assert_eq!(
///     scores.validate(&Value::array([Value::from(1), Value::from("a")])).error_message(),
///     Some("Error en posición [1]: Se esperaba un valor de tipo \"number\", pero se recibió \"string\".")
/// );
/// ```
#[derive(Clone)]
pub struct ArrayValidator {
    constraints: Vec<Constraint<ArrayRule>>,
    empty_policy: EmptyPolicy,
    empty_message: Option<String>,
    type_error_message: Option<String>,
    last_set: LastSet,
}

impl ArrayValidator {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            empty_policy: EmptyPolicy::Unspecified,
            empty_message: None,
            type_error_message: None,
            last_set: LastSet::Constraint,
        }
    }

    fn with(&self, rule: ArrayRule) -> Self {
        let mut next = self.clone();
        next.constraints.push(Constraint::new(rule));
        next.last_set = LastSet::Constraint;
        next
    }

    fn with_empty_policy(&self, policy: EmptyPolicy) -> Self {
        Self {
            empty_policy: policy,
            last_set: LastSet::EmptyPolicy,
            ..self.clone()
        }
    }

    /// Never fails on its own: the array check already rejects absent values.
    pub fn required(&self) -> Self {
        self.with(ArrayRule::Required)
    }

    pub fn min_length(&self, min: usize) -> Self {
        self.with(ArrayRule::MinLength(min))
    }

    pub fn max_length(&self, max: usize) -> Self {
        self.with(ArrayRule::MaxLength(max))
    }

    /// Lets empty arrays pass regardless of length bounds.
    pub fn optional_empty(&self) -> Self {
        self.with_empty_policy(EmptyPolicy::Allow)
    }

    /// Rejects empty arrays with a dedicated message once the chained rules
    /// have passed.
    pub fn non_empty(&self) -> Self {
        self.with_empty_policy(EmptyPolicy::Forbid)
    }

    /// Applies a whole [`ArrayConfig`]: bounds first, then the emptiness policy.
    pub fn configure(&self, config: ArrayConfig) -> Self {
        let mut next = self.clone();
        if let Some(min) = config.min_length {
            next = next.min_length(min);
        }
        if let Some(max) = config.max_length {
            next = next.max_length(max);
        }
        if config.optional_empty {
            next.optional_empty()
        } else {
            next.non_empty()
        }
    }

    /// Every element must pass `validator`.
    pub fn of_one(&self, validator: impl Validator + 'static) -> Self {
        self.with(ArrayRule::OfOne(validator.shared()))
    }

    /// Every element must pass at least one of `validators`.
    ///
    /// The first validator that accepts an element wins. An empty list
    /// accepts no element.
    pub fn of_any<I>(&self, validators: I) -> Self
    where
        I: IntoIterator<Item = SharedValidator>,
    {
        self.with(ArrayRule::OfAny(validators.into_iter().collect()))
    }

    /// Single-validator form of [`of_any`](Self::of_any).
    pub fn of(&self, validator: impl Validator + 'static) -> Self {
        self.of_any([validator.shared()])
    }

    /// Overrides the message of the most recent rule, the emptiness check if
    /// that was configured last, or the type check when nothing was added.
    pub fn error(&self, message: impl Into<String>) -> Self {
        let mut next = self.clone();
        match next.last_set {
            LastSet::EmptyPolicy => next.empty_message = Some(message.into()),
            LastSet::Constraint => override_last(
                &mut next.constraints,
                &mut next.type_error_message,
                message.into(),
            ),
        }
        next
    }

    fn empty_error(&self, path: &ValuePath) -> ValidationError {
        let message = self
            .empty_message
            .clone()
            .unwrap_or_else(|| "Error: El array no puede estar vacío.".to_string());
        ValidationError::new(path.clone(), message)
            .with_code("non_empty")
            .with_expected("at least 1 item")
            .with_got("0 items")
    }
}

impl Default for ArrayValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ArrayValidator {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                let message = self.type_error_message.clone().unwrap_or_else(|| {
                    "Error: El valor proporcionado no es un array.".to_string()
                });
                return type_mismatch(path, message, "array", value);
            }
        };

        // Empty arrays skip the rules under `Allow`, but untagged element
        // validators are still reported.
        let failure = if items.is_empty() && self.empty_policy == EmptyPolicy::Allow {
            self.constraints
                .iter()
                .find_map(|c| untagged_component(c, path))
        } else {
            self.constraints
                .iter()
                .find_map(|c| check_constraint(c, value, items, path))
                .or_else(|| {
                    (items.is_empty() && self.empty_policy == EmptyPolicy::Forbid)
                        .then(|| self.empty_error(path))
                })
        };

        match failure {
            Some(error) => fail(error),
            None => pass(),
        }
    }

    fn kind(&self) -> Option<ValidatorKind> {
        Some(ValidatorKind::Array)
    }
}

fn check_constraint(
    constraint: &Constraint<ArrayRule>,
    original: &Value,
    items: &[Value],
    path: &ValuePath,
) -> Option<ValidationError> {
    match &constraint.rule {
        ArrayRule::Required => original
            .is_absent()
            .then(|| constraint.error(path, "required", || REQUIRED_MESSAGE.to_string())),
        ArrayRule::MinLength(min) => (items.len() < *min).then(|| {
            constraint
                .error(path, "min_items", || {
                    format!("Error: El array debe tener al menos {} elementos.", min)
                })
                .with_expected(format!("at least {} items", min))
                .with_got(format!("{} items", items.len()))
        }),
        ArrayRule::MaxLength(max) => (items.len() > *max).then(|| {
            constraint
                .error(path, "max_items", || {
                    format!("Error: El array no puede tener más de {} elementos.", max)
                })
                .with_expected(format!("at most {} items", max))
                .with_got(format!("{} items", items.len()))
        }),
        ArrayRule::OfOne(validator) => check_of_one(constraint, validator, items, path),
        ArrayRule::OfAny(validators) => check_of_any(constraint, validators, items, path),
    }
}

fn invalid_validator(
    constraint: &Constraint<ArrayRule>,
    position: usize,
    validator: &dyn Validator,
    path: &ValuePath,
) -> ValidationError {
    let name = display_name(validator);
    trace!(position, name, path = %path, "element validator has no kind");
    constraint.error(path, "invalid_validator", || {
        format!(
            "Error: El validador en la posición [{}] ({}) no es válido.",
            position, name
        )
    })
}

/// The first element validator of `constraint` that carries no kind tag.
fn untagged_component(
    constraint: &Constraint<ArrayRule>,
    path: &ValuePath,
) -> Option<ValidationError> {
    let validators = match &constraint.rule {
        ArrayRule::OfOne(validator) => std::slice::from_ref(validator),
        ArrayRule::OfAny(validators) => validators.as_slice(),
        _ => return None,
    };
    validators
        .iter()
        .enumerate()
        .find(|(_, v)| v.kind().is_none())
        .map(|(position, validator)| {
            invalid_validator(constraint, position, validator.as_ref(), path)
        })
}

fn check_of_one(
    constraint: &Constraint<ArrayRule>,
    validator: &SharedValidator,
    items: &[Value],
    path: &ValuePath,
) -> Option<ValidationError> {
    let Some(kind) = validator.kind() else {
        return untagged_component(constraint, path);
    };

    items.iter().enumerate().find_map(|(i, item)| {
        let item_path = path.push_index(i);
        let inner = validator.validate_at(item, &item_path).into_result().err()?;

        let error = if kind.admits(item.kind()) {
            let message = constraint
                .message
                .clone()
                .unwrap_or_else(|| format!("Error en posición [{}]: {}", i, inner.message));
            let mut error = ValidationError::new(inner.path, message).with_code(inner.code);
            error.expected = inner.expected;
            error.got = inner.got;
            error
        } else {
            constraint
                .error(&item_path, "invalid_item_type", || {
                    format!(
                        "Error en posición [{}]: Se esperaba un valor de tipo \"{}\", pero se recibió \"{}\".",
                        i,
                        kind,
                        item.type_name()
                    )
                })
                .with_expected(kind.as_str())
                .with_got(item.type_name())
        };
        Some(error)
    })
}

fn check_of_any(
    constraint: &Constraint<ArrayRule>,
    validators: &[SharedValidator],
    items: &[Value],
    path: &ValuePath,
) -> Option<ValidationError> {
    if let Some(error) = untagged_component(constraint, path) {
        return Some(error);
    }

    let allowed = join_unique(validators.iter().filter_map(|v| v.kind()));

    items.iter().enumerate().find_map(|(i, item)| {
        let item_path = path.push_index(i);
        let mut first_detail = None;
        for validator in validators {
            match validator.validate_at(item, &item_path).into_result() {
                Ok(()) => return None,
                Err(error) => {
                    first_detail.get_or_insert(error.message);
                }
            }
        }

        let error = constraint.error(&item_path, "no_matching_validator", || {
            let mut message = format!(
                "Error en posición [{}]: Tipo \"{}\" no permitido. Se esperaba: {}. Valor recibido: {}.",
                i,
                item.type_name(),
                allowed,
                item
            );
            if let Some(detail) = &first_detail {
                message.push_str(" Detalle: ");
                message.push_str(detail);
            }
            message
        });
        Some(error.with_expected(allowed.clone()).with_got(item.type_name()))
    })
}

/// Kind names in first-seen order, without repeats.
fn join_unique(kinds: impl Iterator<Item = ValidatorKind>) -> String {
    let mut seen: Vec<ValidatorKind> = Vec::new();
    for kind in kinds {
        if !seen.contains(&kind) {
            seen.push(kind);
        }
    }
    seen.iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
