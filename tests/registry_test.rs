//! Tests for validator registry operations.

use typegate::{
    OutcomeExt, RegistryError, TypeValidators, Validator, ValidatorKind, ValidatorRegistry, Value,
};

#[test]
fn test_register_and_get() {
    let registry = ValidatorRegistry::new();

    registry
        .register("Email", TypeValidators::string().min(3))
        .unwrap();

    assert!(registry.get("Email").is_some());
    assert!(registry.get("Missing").is_none());
}

#[test]
fn test_duplicate_registration_fails() {
    let registry = ValidatorRegistry::new();

    registry.register("Email", TypeValidators::string()).unwrap();

    let result = registry.register("Email", TypeValidators::number());
    assert!(matches!(result, Err(RegistryError::DuplicateName(name)) if name == "Email"));
}

#[test]
fn test_validate_with_registry() {
    let registry = ValidatorRegistry::new();

    registry
        .register(
            "User",
            TypeValidators::object()
                .field("name", TypeValidators::string().min(1))
                .field("age", TypeValidators::number().positive()),
        )
        .unwrap();

    let outcome = registry
        .validate("User", &Value::object([("name", Value::from("Ana")), ("age", Value::from(30))]))
        .unwrap();
    assert!(outcome.is_success());

    let outcome = registry
        .validate("User", &Value::object([("name", Value::from("Ana")), ("age", Value::from(-1))]))
        .unwrap();
    assert_eq!(
        outcome.error_message(),
        Some("Error: El campo \"age\" no es válido. Error: Debe ser un número positivo.")
    );
}

#[test]
fn test_validate_unknown_name() {
    let registry = ValidatorRegistry::new();
    let err = registry.validate("Nope", &Value::Null).unwrap_err();
    assert_eq!(err, RegistryError::NotFound("Nope".to_string()));
    assert_eq!(err.to_string(), "validator 'Nope' not found");
}

#[test]
fn test_registered_validators_compose() {
    let registry = ValidatorRegistry::with_builtins();
    let string = registry.get("string").unwrap();

    let v = TypeValidators::array().of_one(string);
    assert!(v.validate(&Value::array(["a", "b"])).is_success());
}

#[test]
fn test_clones_share_storage() {
    let registry = ValidatorRegistry::new();
    let clone = registry.clone();

    clone.register("flag", TypeValidators::boolean()).unwrap();

    assert_eq!(registry.kind_of("flag"), Some(ValidatorKind::Boolean));
    assert_eq!(registry.names(), vec!["flag".to_string()]);
}

#[test]
fn test_register_shared() {
    let registry = ValidatorRegistry::new();
    let shared = TypeValidators::number().integer().shared();

    registry.register_shared("a", shared.clone()).unwrap();
    registry.register_shared("b", shared).unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.validate("b", &Value::from(1.5)).unwrap().is_failure());
}
