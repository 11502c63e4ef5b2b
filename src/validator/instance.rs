//! Class membership checks for [`Value::Instance`] values.

use crate::error::ValidationError;
use crate::path::ValuePath;
use crate::validation::{fail, pass, Outcome};
use crate::value::{Class, Value};

use super::traits::{Validator, ValidatorKind};

/// Checks that a value is an instance of a class or one of its subclasses.
///
/// Only [`Value::Instance`] values can be instances; `null` and `undefined`
/// fail the check and pass its negation.
///
/// ```rust
/// use typegate::{Class, OutcomeExt, TypeValidators, Validator, Value};
///
/// let animal = Class::new("Animal");
/// let dog = animal.extends("Perro");
///
/// let v = TypeValidators::instance_of(&animal);
/// assert!(v.validate(&Value::instance(&dog)).is_success());
/// assert_eq!(
///     v.validate(&Value::from("Firulais")).error_message(),
///     Some("Error: El valor debe ser una instancia de Animal, pero se recibió un valor de tipo string.")
/// );
/// ```
#[derive(Clone)]
pub struct InstanceValidator {
    class: Class,
    negated: bool,
    message: Option<String>,
}

impl InstanceValidator {
    pub fn new(class: &Class) -> Self {
        Self {
            class: class.clone(),
            negated: false,
            message: None,
        }
    }

    /// Inverts the check.
    pub fn not(&self) -> Self {
        Self {
            negated: !self.negated,
            ..self.clone()
        }
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn error(&self, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..self.clone()
        }
    }
}

impl Validator for InstanceValidator {
    fn validate_at(&self, value: &Value, path: &ValuePath) -> Outcome {
        let is_instance = value
            .as_instance()
            .is_some_and(|instance| instance.is_instance_of(&self.class));

        match (self.negated, is_instance) {
            (false, true) | (true, false) => pass(),
            (false, false) => {
                let message = self.message.clone().unwrap_or_else(|| {
                    format!(
                        "Error: El valor debe ser una instancia de {}, pero se recibió un valor de tipo {}.",
                        self.class,
                        value.type_name()
                    )
                });
                fail(
                    ValidationError::new(path.clone(), message)
                        .with_code("instance_of")
                        .with_expected(self.class.name())
                        .with_got(value.type_name()),
                )
            }
            (true, true) => {
                let message = self.message.clone().unwrap_or_else(|| {
                    format!("Error: El valor NO debe ser una instancia de {}.", self.class)
                });
                fail(
                    ValidationError::new(path.clone(), message)
                        .with_code("not_instance_of")
                        .with_expected(format!("not {}", self.class))
                        .with_got(value.type_name()),
                )
            }
        }
    }

    fn kind(&self) -> Option<ValidatorKind> {
        Some(ValidatorKind::InstanceOf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fecha;

    fn message(v: &InstanceValidator, value: Value) -> String {
        v.validate(&value).into_result().unwrap_err().message
    }

    #[test]
    fn test_rust_type_membership() {
        let v = InstanceValidator::new(&Class::of::<Fecha>());
        assert!(v.validate(&Value::instance_of_type(Fecha)).is_success());
        assert_eq!(
            message(&v, Value::from(3)),
            "Error: El valor debe ser una instancia de Fecha, pero se recibió un valor de tipo number."
        );
    }

    #[test]
    fn test_absent_values_are_never_instances() {
        let class = Class::new("Date");
        let v = InstanceValidator::new(&class);
        assert!(v.validate(&Value::Null).is_failure());
        assert!(v.validate(&Value::Undefined).is_failure());
        assert!(v.not().validate(&Value::Null).is_success());
        assert!(v.not().validate(&Value::Undefined).is_success());
    }

    #[test]
    fn test_not_message() {
        let class = Class::new("Date");
        let v = InstanceValidator::new(&class).not();
        assert_eq!(
            message(&v, Value::instance(&class)),
            "Error: El valor NO debe ser una instancia de Date."
        );
    }

    #[test]
    fn test_actual_type_names_other_class() {
        let date = Class::new("Date");
        let regex = Class::new("RegExp");
        let v = InstanceValidator::new(&date);
        assert_eq!(
            message(&v, Value::instance(&regex)),
            "Error: El valor debe ser una instancia de Date, pero se recibió un valor de tipo RegExp."
        );
    }

    #[test]
    fn test_parent_is_not_instance_of_child() {
        let animal = Class::new("Animal");
        let dog = animal.extends("Dog");
        assert!(InstanceValidator::new(&dog)
            .validate(&Value::instance(&animal))
            .is_failure());
    }
}
