//! Tests for sharing validators and the registry across threads.

use std::sync::Arc;
use std::thread;

use typegate::{
    OutcomeExt, SharedValidator, TypeValidators, Validator, ValidatorRegistry, Value,
};

#[test]
fn test_concurrent_validation() {
    let registry = Arc::new(ValidatorRegistry::new());

    registry
        .register(
            "User",
            TypeValidators::object()
                .field("name", TypeValidators::string())
                .field("age", TypeValidators::number().positive()),
        )
        .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let value = Value::object([
                    ("name", Value::from(format!("User{}", i))),
                    ("age", Value::from(20 + i)),
                ]);
                let outcome = registry.validate("User", &value).unwrap();
                assert!(outcome.is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_registration_and_lookup() {
    let registry = ValidatorRegistry::new();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                registry
                    .register(format!("v{}", i), TypeValidators::number().min(i as f64))
                    .unwrap();
                assert!(registry.get(&format!("v{}", i)).is_some());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.len(), 8);
}

#[test]
fn test_shared_validator_gives_same_answer_everywhere() {
    let validator: SharedValidator = TypeValidators::array()
        .min_length(1)
        .of_one(TypeValidators::string().min(2))
        .shared();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let bad = Value::array(["ok", "x"]);
                validator.validate(&bad).into_verdict()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            Err("Error en posición [1]: Error: Debe tener al menos 2 caracteres.".to_string())
        );
    }
}

#[test]
fn test_validators_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<typegate::StringValidator>();
    assert_send_sync::<typegate::NumberValidator>();
    assert_send_sync::<typegate::ArrayValidator>();
    assert_send_sync::<typegate::ObjectValidator>();
    assert_send_sync::<typegate::FnValidator>();
    assert_send_sync::<ValidatorRegistry>();
    assert_send_sync::<Value>();
}
