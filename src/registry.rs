//! Named validator storage.
//!
//! [`ValidatorRegistry`] maps names to shared validators so that an
//! application can define its validators once and look them up by name
//! wherever values arrive, including from several threads at once.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::validation::Outcome;
use crate::validator::{SharedValidator, TypeValidators, Validator, ValidatorKind};
use crate::value::Value;

type ValidatorMap = Arc<RwLock<HashMap<String, SharedValidator>>>;

/// A thread-safe name → validator map.
///
/// Clones share the same storage: a validator registered through one clone
/// is visible through every other.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>`:
/// - lookups and validations take the read lock and run concurrently
/// - registrations take the write lock
///
/// The lock is released before a looked-up validator runs.
///
/// # Example
///
/// ```rust
/// use typegate::{OutcomeExt, TypeValidators, ValidatorRegistry, Value};
///
/// let registry = ValidatorRegistry::new();
/// registry.register("username", TypeValidators::string().min(3).alphanumeric()).unwrap();
///
/// let outcome = registry.validate("username", &Value::from("ab")).unwrap();
/// assert_eq!(outcome.error_message(), Some("Error: Debe tener al menos 3 caracteres."));
/// ```
pub struct ValidatorRegistry {
    validators: ValidatorMap,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self {
            validators: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// A registry holding one base validator per kind, under the kind's name.
    ///
    /// ```rust
    /// use typegate::{ValidatorKind, ValidatorRegistry};
    ///
    /// let registry = ValidatorRegistry::with_builtins();
    /// assert_eq!(registry.kind_of("bigint"), Some(ValidatorKind::BigInt));
    /// assert!(registry.get("instanceof").is_none());
    /// ```
    pub fn with_builtins() -> Self {
        let builtins: [(&str, SharedValidator); 9] = [
            ("string", TypeValidators::string().shared()),
            ("number", TypeValidators::number().shared()),
            ("boolean", TypeValidators::boolean().shared()),
            ("bigint", TypeValidators::bigint().shared()),
            ("symbol", TypeValidators::symbol().shared()),
            ("null", TypeValidators::null().shared()),
            ("undefined", TypeValidators::undefined().shared()),
            ("array", TypeValidators::array().shared()),
            ("object", TypeValidators::object().shared()),
        ];

        let map = builtins
            .into_iter()
            .map(|(name, validator)| (name.to_string(), validator))
            .collect();
        Self {
            validators: Arc::new(RwLock::new(map)),
        }
    }

    /// Registers `validator` under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is taken.
    pub fn register<V>(&self, name: impl Into<String>, validator: V) -> Result<(), RegistryError>
    where
        V: Validator + 'static,
    {
        self.register_shared(name, validator.shared())
    }

    /// Registers an already shared validator.
    pub fn register_shared(
        &self,
        name: impl Into<String>,
        validator: SharedValidator,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut validators = self.validators.write();

        if validators.contains_key(&name) {
            debug!(name = %name, "validator name already registered");
            return Err(RegistryError::DuplicateName(name));
        }

        debug!(name = %name, kind = ?validator.kind(), "registered validator");
        validators.insert(name, validator);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<SharedValidator> {
        self.validators.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.read().contains_key(name)
    }

    /// Kind tag of the named validator; `None` when the name is unknown or
    /// the validator is untagged.
    pub fn kind_of(&self, name: &str) -> Option<ValidatorKind> {
        self.get(name)?.kind()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.validators.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.validators.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.read().is_empty()
    }

    /// Evaluates the named validator against `value`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if no validator has that name.
    pub fn validate(&self, name: &str, value: &Value) -> Result<Outcome, RegistryError> {
        let validator = self.get(name).ok_or_else(|| {
            debug!(name, "validator name not found");
            RegistryError::NotFound(name.to_string())
        })?;
        Ok(validator.validate(value))
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ValidatorRegistry {
    fn clone(&self) -> Self {
        Self {
            validators: Arc::clone(&self.validators),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A validator with that name already exists.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),

    /// No validator with that name exists.
    #[error("validator '{0}' not found")]
    NotFound(String),
}
