//! The untyped values validators run against.
//!
//! [`Value`] models the inputs a form handler or loosely-typed data source
//! produces: it distinguishes an absent value (`Undefined`) from an explicit
//! `Null`, keeps big integers and symbols apart from plain numbers, and can
//! carry opaque class instances for the instance-of validator.
//!
//! Most inputs are easiest to build from `serde_json::json!` and convert with
//! `Value::from`; the remaining variants have dedicated constructors.
//!
//! ```rust
//! use typegate::{Class, Value, ValueKind};
//! use serde_json::json;
//!
//! let user = Value::from(json!({"name": "Ana", "tags": ["a", "b"]}));
//! assert_eq!(user.kind(), ValueKind::Object);
//!
//! let date = Class::new("Date");
//! let today = Value::instance(&date);
//! assert_eq!(today.type_name(), "Date");
//! ```

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;

/// Insertion-ordered record used for object values.
pub type Record = IndexMap<String, Value>;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);
static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(0);

/// An arbitrary runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value at all (a missing field, an unset argument).
    Undefined,
    Null,
    Bool(bool),
    /// Double precision number. `NaN` is representable; the number validator rejects it.
    Number(f64),
    /// Integer kind that is distinct from `Number`.
    BigInt(i128),
    Symbol(Symbol),
    String(String),
    Array(Vec<Value>),
    Object(Record),
    Instance(Instance),
}

/// The runtime kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    BigInt,
    Symbol,
    String,
    Array,
    Object,
    Instance,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::BigInt => "bigint",
            ValueKind::Symbol => "symbol",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Instance => "instance",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Builds an instance of `class` without a payload.
    pub fn instance(class: &Class) -> Self {
        Value::Instance(Instance::new(class))
    }

    /// Wraps a Rust value as an instance of `Class::of::<T>()`.
    pub fn instance_of_type<T: Any + Send + Sync>(payload: T) -> Self {
        Value::Instance(Instance::with_payload(payload))
    }

    pub fn bigint(n: impl Into<i128>) -> Self {
        Value::BigInt(n.into())
    }

    pub fn symbol(description: impl Into<String>) -> Self {
        Value::Symbol(Symbol::new(description))
    }

    /// Builds an array value from anything convertible to values.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Builds an object value, keeping the order of `entries`.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::Symbol(_) => ValueKind::Symbol,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Instance(_) => ValueKind::Instance,
        }
    }

    /// Name used for this value's type in error messages.
    ///
    /// Instances report their class name, everything else its kind.
    pub fn type_name(&self) -> Cow<'_, str> {
        match self {
            Value::Instance(instance) => Cow::Borrowed(instance.class().name()),
            other => Cow::Borrowed(other.kind().as_str()),
        }
    }

    /// True for `Undefined` and `Null`.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Record> {
        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) if n.is_nan() => f.write_str("NaN"),
            Value::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Number(n) => write!(f, "{}", n),
            Value::BigInt(n) => write!(f, "{}", n),
            Value::Symbol(symbol) => write!(f, "{}", symbol),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !item.is_absent() {
                        write!(f, "{}", item)?;
                    }
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Instance(instance) => write!(f, "[object {}]", instance.class().name()),
        }
    }
}

/// A unique token, equal only to its own clones.
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: Some(Arc::from(description.into())),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ClassId {
    Native(TypeId),
    Declared(u64),
}

#[derive(Debug)]
struct ClassInner {
    id: ClassId,
    name: String,
    parent: Option<Class>,
}

/// Runtime type descriptor used by instance values and the instance-of validator.
///
/// Two descriptors are the same class when they share an identity: clones of
/// one declared class, or two `Class::of::<T>()` calls for the same `T`.
///
/// ```rust
/// use typegate::Class;
///
/// let animal = Class::new("Animal");
/// let dog = animal.extends("Dog");
///
/// assert!(dog.is_subclass_of(&animal));
/// assert!(!animal.is_subclass_of(&dog));
/// assert_eq!(Class::of::<String>(), Class::of::<String>());
/// ```
#[derive(Debug, Clone)]
pub struct Class(Arc<ClassInner>);

impl Class {
    /// Declares a new class with no parent.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(ClassInner {
            id: ClassId::Declared(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
            parent: None,
        }))
    }

    /// Describes the Rust type `T`.
    pub fn of<T: Any>() -> Self {
        Self(Arc::new(ClassInner {
            id: ClassId::Native(TypeId::of::<T>()),
            name: short_type_name(std::any::type_name::<T>()),
            parent: None,
        }))
    }

    /// Declares a new class whose parent is `self`.
    pub fn extends(&self, name: impl Into<String>) -> Self {
        Self(Arc::new(ClassInner {
            id: ClassId::Declared(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
            parent: Some(self.clone()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&Class> {
        self.0.parent.as_ref()
    }

    /// True when `self` is `other` or inherits from it.
    pub fn is_subclass_of(&self, other: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.parent();
        }
        false
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Class {}

impl Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strips module paths from a type name, keeping generic arguments.
fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    let short = base.rsplit("::").next().unwrap_or(base);
    format!("{}{}", short, &full[base.len()..])
}

/// An opaque value tagged with its class.
#[derive(Clone)]
pub struct Instance {
    class: Class,
    payload: Option<Arc<dyn Any + Send + Sync>>,
}

impl Instance {
    pub fn new(class: &Class) -> Self {
        Self {
            class: class.clone(),
            payload: None,
        }
    }

    pub fn with_payload<T: Any + Send + Sync>(payload: T) -> Self {
        Self {
            class: Class::of::<T>(),
            payload: Some(Arc::new(payload)),
        }
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn is_instance_of(&self, class: &Class) -> bool {
        self.class.is_subclass_of(class)
    }

    /// Borrows the wrapped Rust value when it is a `T`.
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref()?.downcast_ref::<T>()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name())
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        let same_payload = match (&self.payload, &other.payload) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.class == other.class && same_payload
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

/// `None` becomes `Undefined`.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        Value::from(value.clone())
    }
}
