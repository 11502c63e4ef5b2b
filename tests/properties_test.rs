//! Property tests for validator purity and message guarantees.

use proptest::prelude::*;
use typegate::{OutcomeExt, TypeValidators, Validator, Value};

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        any::<i64>().prop_map(Value::bigint),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::vec(("[a-c]", inner), 0..4).prop_map(Value::object),
        ]
    })
}

fn validators() -> Vec<typegate::SharedValidator> {
    vec![
        TypeValidators::string().min(2).max(8).alphanumeric().shared(),
        TypeValidators::number().integer().range(-10.0..=10.0).shared(),
        TypeValidators::boolean().is_true().shared(),
        TypeValidators::null().not().shared(),
        TypeValidators::array()
            .non_empty()
            .of_any([
                TypeValidators::string().shared(),
                TypeValidators::number().shared(),
            ])
            .shared(),
        TypeValidators::object()
            .field("a", TypeValidators::string())
            .field("b", TypeValidators::number().optional())
            .shared(),
    ]
}

#[test]
fn test_empty_custom_messages_fall_back() {
    let date = typegate::Class::new("Date");
    let cases: Vec<(typegate::SharedValidator, Value)> = vec![
        (TypeValidators::string().min(3).error("").shared(), Value::from("a")),
        (TypeValidators::number().positive().error("").shared(), Value::from(-1)),
        (TypeValidators::boolean().is_true().error("").shared(), Value::from(false)),
        (TypeValidators::bigint().error("").shared(), Value::from(1)),
        (TypeValidators::symbol().not().error("").shared(), Value::symbol("id")),
        (TypeValidators::instance_of(&date).error("").shared(), Value::Null),
        (TypeValidators::array().non_empty().error("").shared(), Value::array(Vec::<Value>::new())),
        (
            TypeValidators::array().of_any([TypeValidators::string().shared()]).error("").shared(),
            Value::array([1]),
        ),
        (TypeValidators::object().error("").shared(), Value::Null),
        (TypeValidators::custom(|_| Err(String::new())).shared(), Value::Null),
    ];
    for (validator, value) in cases {
        assert_eq!(
            validator.validate(&value).error_message(),
            Some("Error: El valor no es válido."),
            "{:?}",
            value
        );
    }
}

proptest! {
    #[test]
    fn prop_validation_is_deterministic(value in arb_value()) {
        for validator in validators() {
            let first = validator.validate(&value).into_verdict();
            let second = validator.validate(&value).into_verdict();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn prop_validation_does_not_mutate_input(value in arb_value()) {
        let before = value.clone();
        for validator in validators() {
            let _ = validator.validate(&value);
        }
        // NaN never equals itself, so compare the rendered structure.
        prop_assert_eq!(format!("{:?}", before), format!("{:?}", value));
    }

    #[test]
    fn prop_failures_carry_a_message(value in arb_value()) {
        for validator in validators() {
            if let Err(message) = validator.validate(&value).into_verdict() {
                prop_assert!(!message.is_empty());
            }
        }
    }

    #[test]
    fn prop_string_length_bounds(s in "[a-z]{0,20}") {
        let v = TypeValidators::string().min(3).max(10);
        let len = s.chars().count();
        prop_assert_eq!(v.validate(&Value::from(s)).is_success(), (3..=10).contains(&len));
    }

    #[test]
    fn prop_custom_message_replaces_default(value in arb_value()) {
        let v = TypeValidators::number().positive().error("Mensaje propio.");
        if let Some(message) = v.validate(&value).error_message() {
            if value.as_f64().is_some_and(|n| !n.is_nan()) {
                prop_assert_eq!(message, "Mensaje propio.");
            }
        }
    }
}
