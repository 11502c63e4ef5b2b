//! Integration tests for object validation.

use stillwater::Validation;
use typegate::{
    BuildError, FieldPolicy, ObjectValidator, OutcomeExt, TypeValidators, Validator, Value,
    ValuePath,
};

fn user_schema() -> ObjectValidator {
    TypeValidators::object()
        .field("id", TypeValidators::number().required())
        .field("name", TypeValidators::string().min(3))
        .required_keys(["id", "name"])
}

fn ana() -> Vec<(&'static str, Value)> {
    vec![("id", Value::from(1)), ("name", Value::from("Ana"))]
}

#[test]
fn test_valid_user() {
    assert!(user_schema().validate(&Value::object(ana())).is_success());
}

#[test]
fn test_missing_id() {
    let value = Value::object([("name", "Ana")]);
    assert_eq!(
        user_schema().validate(&value).error_message(),
        Some("Error: El campo \"id\" es obligatorio.")
    );
}

#[test]
fn test_extra_field_rejected() {
    let mut entries = ana();
    entries.push(("extra", Value::from(true)));
    assert_eq!(
        user_schema().validate(&Value::object(entries)).error_message(),
        Some("Error: Los siguientes campos no son permitidos: extra")
    );
}

#[test]
fn test_extra_field_allowed() {
    let mut entries = ana();
    entries.push(("extra", Value::from(true)));
    let v = user_schema().allow_extra().unwrap();
    assert!(v.validate(&Value::object(entries)).is_success());
}

#[test]
fn test_conflicting_policies_fail_at_build_time() {
    let err = TypeValidators::object()
        .field("id", TypeValidators::number())
        .allow_extra()
        .and_then(|v| v.allow_less())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        BuildError::ConflictingFieldPolicy {
            requested: FieldPolicy::AllowLess,
            current: FieldPolicy::AllowExtra,
        }
    ));
    assert_eq!(
        err.to_string(),
        "cannot apply allow_less to an object validator already configured with allow_extra"
    );

    let err = TypeValidators::object()
        .allow_less()
        .and_then(|v| v.allow_extra());
    assert!(err.is_err());
}

#[test]
fn test_optional_field_is_implicitly_optional() {
    let v = TypeValidators::object()
        .field("id", TypeValidators::number())
        .field("nickname", TypeValidators::string().optional());
    assert!(v.validate(&Value::object([("id", 1)])).is_success());
    assert!(v
        .validate(&Value::object([("id", Value::from(1)), ("nickname", Value::from(2))]))
        .is_failure());
}

#[test]
fn test_undefined_typed_field_is_optional() {
    let v = TypeValidators::object()
        .field("id", TypeValidators::number())
        .field("legacy", TypeValidators::undefined());
    assert!(v.validate(&Value::object([("id", 1)])).is_success());
}

#[test]
fn test_nested_message_wrapped_per_level() {
    let v = TypeValidators::object().field(
        "order",
        TypeValidators::object().field(
            "customer",
            TypeValidators::object().field("email", TypeValidators::string().min(5)),
        ),
    );
    let value = Value::object([(
        "order",
        Value::object([("customer", Value::object([("email", "a@b")]))]),
    )]);
    let error = v.validate(&value).into_result().unwrap_err();
    assert_eq!(
        error.message,
        "Error: El campo \"order\" no es válido. Error: El campo \"customer\" no es válido. Error: El campo \"email\" no es válido. Error: Debe tener al menos 5 caracteres."
    );
    assert_eq!(error.path.to_string(), "order.customer.email");
}

#[test]
fn test_strict_reports_both() {
    let v = user_schema().strict().unwrap();
    let value = Value::object([("name", Value::from("Ana")), ("role", Value::from("admin"))]);
    assert_eq!(
        v.validate(&value).error_message(),
        Some("Error: Faltan los siguientes campos obligatorios: id. Los siguientes campos no son permitidos: role")
    );
}

#[test]
fn test_array_field() {
    let v = TypeValidators::object().field(
        "tags",
        TypeValidators::array().of_one(TypeValidators::string()),
    );
    let value = Value::object([("tags", Value::array([Value::from("a"), Value::from(1)]))]);
    let error = v.validate(&value).into_result().unwrap_err();
    assert_eq!(
        error.message,
        "Error: El campo \"tags\" no es válido. Error en posición [1]: Se esperaba un valor de tipo \"string\", pero se recibió \"number\"."
    );
    assert_eq!(error.path.to_string(), "tags[1]");
}

#[test]
fn test_validate_all_reports_every_field() {
    let v = TypeValidators::object()
        .field("id", TypeValidators::number())
        .field("name", TypeValidators::string().min(3))
        .field("email", TypeValidators::string());
    let value = Value::object([("name", Value::from("Al")), ("x", Value::from(0))]);

    let errors = match v.validate_all(&value) {
        Validation::Failure(errors) => errors,
        Validation::Success(()) => panic!("expected failure"),
    };
    assert_eq!(errors.len(), 4);
    assert_eq!(
        errors.messages(),
        vec![
            "Error: El campo \"id\" es obligatorio.",
            "Error: El campo \"name\" no es válido. Error: Debe tener al menos 3 caracteres.",
            "Error: El campo \"email\" es obligatorio.",
            "Error: Los siguientes campos no son permitidos: x",
        ]
    );
    assert_eq!(errors.at_path(&ValuePath::root().push_field("x")).len(), 1);
}

#[test]
fn test_validate_all_type_mismatch() {
    let errors = match user_schema().validate_all(&Value::Null) {
        Validation::Failure(errors) => errors,
        Validation::Success(()) => panic!("expected failure"),
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, "invalid_type");
}

#[test]
fn test_from_json() {
    let value = Value::from(serde_json::json!({"id": 2, "name": "Luis"}));
    assert!(user_schema().validate(&value).is_success());
}
