//! Object validation.
//!
//! [`ObjectValidator`] checks that a value is a structural record and, once
//! given a shape, that every declared field is present and valid and that
//! no undeclared key slips through. What counts as a missing or extra field
//! is governed by a single [`FieldPolicy`].

use std::fmt::{self, Display};

use indexmap::IndexMap;
use stillwater::Validation;
use tracing::debug;

use crate::error::{BuildError, ValidationError, ValidationErrors};
use crate::path::ValuePath;
use crate::validation::{fail, pass, type_mismatch_error, Outcome};
use crate::value::{Record, Value};

use super::traits::{SharedValidator, Validator, ValidatorKind};
use super::{override_last, Constraint, REQUIRED_MESSAGE};

/// How an object validator treats keys that are missing from, or not
/// declared in, its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPolicy {
    /// Declared fields are required unless they accept `undefined`;
    /// undeclared keys are rejected.
    #[default]
    Closed,
    /// Undeclared keys are accepted.
    AllowExtra,
    /// Declared fields may be missing unless listed in `required_keys`.
    AllowLess,
    /// Missing and undeclared keys are reported together in one message.
    Strict,
}

impl Display for FieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldPolicy::Closed => "closed",
            FieldPolicy::AllowExtra => "allow_extra",
            FieldPolicy::AllowLess => "allow_less",
            FieldPolicy::Strict => "strict",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
enum ObjectRule {
    Required,
}

/// A validator for records and their fields.
///
/// # Example
///
/// ```rust
/// use typegate::{OutcomeExt, TypeValidators, Validator, Value};
///
/// let user = TypeValidators::object()
///     .field("id", TypeValidators::number().required())
///     .field("name", TypeValidators::string().min(3))
///     .required_keys(["id", "name"]);
///
/// assert!(user.validate(&Value::object([("id", Value::from(1)), ("name", Value::from("Ana"))])).is_success());
/// assert_eq!(
///     user.validate(&Value::object([("name", "Ana")])).error_message(),
///     Some("Error: El campo \"id\" es obligatorio.")
/// );
/// assert_eq!(
///     user.validate(&Value::object([
///         ("id", Value::from(1)),
///         ("name", Value::from("Ana")),
///         ("extra", Value::from(true)),
///     ]))
///     .error_message(),
///     Some("Error: Los siguientes campos no son permitidos: extra")
/// );
/// ```
#[derive(Clone)]
pub struct ObjectValidator {
    fields: IndexMap<String, SharedValidator>,
    shaped: bool,
    policy: FieldPolicy,
    required_keys: Vec<String>,
    constraints: Vec<Constraint<ObjectRule>>,
    type_error_message: Option<String>,
}

/// What went wrong with one declared or undeclared key.
enum FieldProblem {
    Missing(String),
    Invalid(ValidationError),
    Extra(String),
}

impl ObjectValidator {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            shaped: false,
            policy: FieldPolicy::Closed,
            required_keys: Vec::new(),
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Never fails on its own: the record check already rejects absent values.
    pub fn required(&self) -> Self {
        let mut next = self.clone();
        next.constraints.push(Constraint::new(ObjectRule::Required));
        next
    }

    /// Declares one field, keeping any already declared.
    pub fn field(&self, name: impl Into<String>, validator: impl Validator + 'static) -> Self {
        let mut next = self.clone();
        next.fields.insert(name.into(), validator.shared());
        next.shaped = true;
        next
    }

    /// Binds the whole field mapping, replacing any declared fields.
    ///
    /// ```rust
    /// use typegate::{TypeValidators, Validator, Value};
    ///
    /// let point = TypeValidators::object().shape([
    ///     ("x", TypeValidators::number().shared()),
    ///     ("y", TypeValidators::number().shared()),
    /// ]);
    ///
    /// assert!(point.validate(&Value::object([("x", 1), ("y", 2)])).is_success());
    /// assert!(point.validate(&Value::object([("x", 1)])).is_failure());
    /// ```
    #[doc(alias = "scheme")]
    pub fn shape<I, K>(&self, schema: I) -> Self
    where
        I: IntoIterator<Item = (K, SharedValidator)>,
        K: Into<String>,
    {
        Self {
            fields: schema.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            shaped: true,
            ..self.clone()
        }
    }

    /// Forces the listed keys to be present, whatever their validator
    /// accepts. Listed keys count as declared.
    pub fn required_keys<I, K>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut next = self.clone();
        for name in names {
            let name = name.into();
            if !next.required_keys.contains(&name) {
                next.required_keys.push(name);
            }
        }
        next
    }

    /// Accepts keys the shape does not declare.
    #[doc(alias = "allow_more_fields")]
    #[doc(alias = "allow_unknown")]
    pub fn allow_extra(&self) -> Result<Self, BuildError> {
        self.with_policy(FieldPolicy::AllowExtra)
    }

    /// Lets declared fields be missing.
    pub fn allow_less(&self) -> Result<Self, BuildError> {
        self.with_policy(FieldPolicy::AllowLess)
    }

    /// Reports missing and undeclared keys together.
    pub fn strict(&self) -> Result<Self, BuildError> {
        self.with_policy(FieldPolicy::Strict)
    }

    pub fn policy(&self) -> FieldPolicy {
        self.policy
    }

    fn with_policy(&self, requested: FieldPolicy) -> Result<Self, BuildError> {
        if self.policy != FieldPolicy::Closed && self.policy != requested {
            debug!(%requested, current = %self.policy, "rejected conflicting field policy");
            return Err(BuildError::ConflictingFieldPolicy {
                requested,
                current: self.policy,
            });
        }
        Ok(Self {
            policy: requested,
            ..self.clone()
        })
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

    /// Validates `value` and reports every field problem instead of the
    /// first one.
    ///
    /// Each missing, invalid or undeclared field yields its own error at its
    /// own path.
    ///
    /// ```rust
    /// use typegate::{TypeValidators, Value};
    ///
    /// let user = TypeValidators::object()
    ///     .field("id", TypeValidators::number())
    ///     .field("name", TypeValidators::string().min(3));
    ///
    /// let report = user
    ///     .validate_all(&Value::object([("name", Value::from("Al")), ("x", Value::from(1))]))
    ///     .into_result()
    ///     .unwrap_err();
    ///
    /// assert_eq!(report.len(), 3);
    /// ```
    pub fn validate_all(&self, value: &Value) -> Validation<(), ValidationErrors> {
        let path = ValuePath::root();
        let record = match self.check_record(value, &path) {
            Ok(record) => record,
            Err(error) => return Validation::Failure(ValidationErrors::single(error)),
        };

        let mut problems = self.missing_and_invalid(record, &path, true);
        problems.extend(self.extra_keys(record).into_iter().map(FieldProblem::Extra));

        let errors = problems
            .into_iter()
            .map(|problem| match problem {
                FieldProblem::Missing(key) => missing_error(&path, &key),
                FieldProblem::Invalid(error) => error,
                FieldProblem::Extra(key) => ValidationError::new(
                    path.push_field(&key),
                    format!("Error: Los siguientes campos no son permitidos: {}", key),
                )
                .with_code("unknown_field"),
            })
            .collect();

        match ValidationErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }

    /// Base check and chained rules; yields the record on success.
    fn check_record<'v>(
        &self,
        value: &'v Value,
        path: &ValuePath,
    ) -> Result<&'v Record, ValidationError> {
        let record = match value.as_object() {
            Some(record) => record,
            None => {
                let message = self.type_error_message.clone().unwrap_or_else(|| {
                    "Error: El valor proporcionado no es un objeto válido.".to_string()
                });
                return Err(type_mismatch_error(path, message, "object", value));
            }
        };

        let failure = self.constraints.iter().find_map(|c| match c.rule {
            ObjectRule::Required => value
                .is_absent()
                .then(|| c.error(path, "required", || REQUIRED_MESSAGE.to_string())),
        });
        match failure {
            Some(error) => Err(error),
            None => Ok(record),
        }
    }

    /// Declared keys in order: shape fields first, then forced keys the
    /// shape does not mention.
    fn declared_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str).chain(
            self.required_keys
                .iter()
                .map(String::as_str)
                .filter(|k| !self.fields.contains_key(*k)),
        )
    }

    fn is_required(&self, key: &str) -> bool {
        if self.required_keys.iter().any(|k| k == key) {
            return true;
        }
        if self.policy == FieldPolicy::AllowLess {
            return false;
        }
        self.fields
            .get(key)
            .map_or(true, |validator| !validator.accepts_undefined())
    }

    /// Missing and invalid fields in declaration order. Stops at the first
    /// problem unless `exhaustive`.
    fn missing_and_invalid(
        &self,
        record: &Record,
        path: &ValuePath,
        exhaustive: bool,
    ) -> Vec<FieldProblem> {
        let mut problems = Vec::new();
        for key in self.declared_keys() {
            let problem = match record.get(key) {
                None if self.is_required(key) => Some(FieldProblem::Missing(key.to_string())),
                None => None,
                Some(field_value) => self.fields.get(key).and_then(|validator| {
                    validator
                        .validate_at(field_value, &path.push_field(key))
                        .into_result()
                        .err()
                        .map(|error| FieldProblem::Invalid(error.within_field(key)))
                }),
            };
            if let Some(problem) = problem {
                problems.push(problem);
                if !exhaustive {
                    break;
                }
            }
        }
        problems
    }

    /// Undeclared keys in input order; always empty for unshaped validators
    /// and under `AllowExtra`.
    fn extra_keys(&self, record: &Record) -> Vec<String> {
        if !self.shaped || self.policy == FieldPolicy::AllowExtra {
            return Vec::new();
        }
        record
            .keys()
            .filter(|k| !self.fields.contains_key(*k) && !self.required_keys.contains(*k))
            .cloned()
            .collect()
    }

    fn validate_strict(&self, record: &Record, path: &ValuePath) -> Outcome {
        let missing: Vec<&str> = self
            .declared_keys()
            .filter(|k| !record.contains_key(*k) && self.is_required(k))
            .collect();
        let extra = self.extra_keys(record);

        let mut parts = Vec::new();
        if !missing.is_empty() {
            parts.push(format!(
                "Error: Faltan los siguientes campos obligatorios: {}.",
                missing.join(", ")
            ));
        }
        if !extra.is_empty() {
            let prefix = if missing.is_empty() { "Error: " } else { "" };
            parts.push(format!(
                "{}Los siguientes campos no son permitidos: {}",
                prefix,
                extra.join(", ")
            ));
        }
        if !parts.is_empty() {
            let declared: Vec<&str> = self.declared_keys().collect();
            let received: Vec<&str> = record.keys().map(String::as_str).collect();
            return fail(
                ValidationError::new(path.clone(), parts.join(" "))
                    .with_code("field_policy")
                    .with_expected(declared.join(", "))
                    .with_got(received.join(", ")),
            );
        }

        self.report_first(self.missing_and_invalid(record, path, false), path)
    }

    fn report_first(&self, problems: Vec<FieldProblem>, path: &ValuePath) -> Outcome {
        match problems.into_iter().next() {
            None => pass(),
            Some(FieldProblem::Missing(key)) => fail(missing_error(path, &key)),
            Some(FieldProblem::Invalid(error)) => fail(error),
            Some(FieldProblem::Extra(key)) => fail(
                ValidationError::new(
                    path.clone(),
                    format!("Error: Los siguientes campos no son permitidos: {}", key),
                )
                .with_code("unknown_field"),
            ),
        }
    }
}

fn missing_error(path: &ValuePath, key: &str) -> ValidationError {
    ValidationError::new(
        path.push_field(key),
        format!("Error: El campo \"{}\" es obligatorio.", key),
    )
    .with_code("missing_field")
    .with_expected("value")
}

impl Default for ObjectValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ObjectValidator {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        let record = match self.check_record(value, path) {
            Ok(record) => record,
            Err(error) => return fail(error),
        };

        if self.policy == FieldPolicy::Strict {
            return self.validate_strict(record, path);
        }

        let problems = self.missing_and_invalid(record, path, false);
        if !problems.is_empty() {
            return self.report_first(problems, path);
        }

        let extra = self.extra_keys(record);
        if extra.is_empty() {
            pass()
        } else {
            fail(
                ValidationError::new(
                    path.clone(),
                    format!(
                        "Error: Los siguientes campos no son permitidos: {}",
                        extra.join(", ")
                    ),
                )
                .with_code("unknown_field")
                .with_got(extra.join(", ")),
            )
        }
    }

    fn kind(&self) -> Option<ValidatorKind> {
        Some(ValidatorKind::Object)
    }
}
