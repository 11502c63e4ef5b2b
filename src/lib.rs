//! # Typegate
//!
//! Chainable runtime validators for untyped values.
//!
//! ## Overview
//!
//! A validator is a pure function from a [`Value`] to an [`Outcome`]: either
//! success, or a failure carrying one complete, human-readable message. You
//! start from a base type check on [`TypeValidators`] and chain constraints
//! onto it; every chain call returns a new validator and leaves the original
//! untouched, so validators can be shared freely, across threads included.
//!
//! Composite validators take other validators as configuration:
//! [`ArrayValidator`] types its elements, [`ObjectValidator`] checks a record
//! against a field shape. Each validator carries a [`ValidatorKind`] tag that
//! composites use to describe what they expected.
//!
//! ## Core Types
//!
//! - [`Value`]: the untyped input (strings, numbers, records, instances, ...)
//! - [`Validator`]: the capability every validator implements
//! - [`Outcome`]: `Validation<(), ValidationError>` from stillwater
//! - [`ValidationError`]: message, code and [`ValuePath`] of a failure
//! - [`ValidatorRegistry`]: named, thread-safe validator storage
//!
//! ## Example
//!
//! ```rust
//! use typegate::{OutcomeExt, TypeValidators, Validator, Value};
//!
//! let product = TypeValidators::object()
//!     .field("name", TypeValidators::string().required().max(40))
//!     .field("price", TypeValidators::number().positive())
//!     .field("tags", TypeValidators::array().max_length(5).of_one(TypeValidators::string()));
//!
//! let value = Value::object([
//!     ("name", Value::from("Lámpara")),
//!     ("price", Value::from(-3)),
//!     ("tags", Value::array(["hogar"])),
//! ]);
//!
//! assert_eq!(
//!     product.validate(&value).error_message(),
//!     Some("Error: El campo \"price\" no es válido. Error: Debe ser un número positivo.")
//! );
//! ```

pub mod error;
pub mod path;
pub mod registry;
pub mod validation;
pub mod validator;
pub mod value;

pub use error::{BuildError, ValidationError, ValidationErrors};
pub use path::{PathSegment, ValuePath};
pub use registry::{RegistryError, ValidatorRegistry};
pub use validation::{Outcome, OutcomeExt};
pub use validator::{
    ArrayConfig, ArrayValidator, BooleanValidator, FieldPolicy, FnValidator, InstanceValidator,
    MarkerValidator, Named, NumberValidator, ObjectValidator, Optional, SharedValidator,
    StringValidator, Tagged, TypeValidators, Validator, ValidatorKind,
};
pub use value::{Class, Instance, Record, Symbol, Value, ValueKind};
