//! Configuration objects.
//!
//! An [`Object`] is one node of a parsed document: an optional key plus a
//! [`Value`]. Objects nest through [`Value::Object`] (keyed members, see
//! [`ObjectMap`]) and [`Value::Array`] (positional elements).

use std::borrow::Cow;
use std::fmt;

use crate::map::{Iter, ObjectMap};

/// The type tag of an [`Object`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ObjectType {
    Object,
    Array,
    Int,
    Float,
    String,
    Boolean,
    Time,
    Null,
}

impl ObjectType {
    /// Lowercase name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ObjectType::Object => "object",
            ObjectType::Array => "array",
            ObjectType::Int => "int",
            ObjectType::Float => "float",
            ObjectType::String => "string",
            ObjectType::Boolean => "boolean",
            ObjectType::Time => "time",
            ObjectType::Null => "null",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of an [`Object`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Object(ObjectMap),
    Array(Vec<Object>),
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    /// Duration in seconds (`30s`, `5min`, `1.5h`).
    Time(f64),
    Null,
}

impl Value {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Value::Object(_) => ObjectType::Object,
            Value::Array(_) => ObjectType::Array,
            Value::Int(_) => ObjectType::Int,
            Value::Float(_) => ObjectType::Float,
            Value::String(_) => ObjectType::String,
            Value::Bool(_) => ObjectType::Boolean,
            Value::Time(_) => ObjectType::Time,
            Value::Null => ObjectType::Null,
        }
    }
}

/// A keyed or anonymous node in a configuration document.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    key: Option<String>,
    value: Value,
}

impl Object {
    /// Create an anonymous object (array element or document root).
    pub fn new(value: Value) -> Self {
        Object { key: None, value }
    }

    /// Create an object carrying `key`.
    pub fn with_key(key: impl Into<String>, value: Value) -> Self {
        Object {
            key: Some(key.into()),
            value,
        }
    }

    /// An empty object-typed node.
    pub fn empty_object() -> Self {
        Object::new(Value::Object(ObjectMap::new()))
    }

    /// The key this object was stored under, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub(crate) fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn object_type(&self) -> ObjectType {
        self.value.object_type()
    }

    /// Number of elements this object holds.
    ///
    /// - objects: number of distinct keys
    /// - arrays: number of elements
    /// - strings: length in bytes
    /// - other scalars: 0
    pub fn len(&self) -> usize {
        match &self.value {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            Value::String(s) => s.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Members of an object-typed node.
    pub fn as_map(&self) -> Option<&ObjectMap> {
        match &self.value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ObjectMap> {
        match &mut self.value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// First value stored under `key`. `None` for non-objects.
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Every value stored under `key` (the key's implicit array).
    pub fn get_all(&self, key: &str) -> &[Object] {
        match self.as_map() {
            Some(map) => map.get_all(key),
            None => &[],
        }
    }

    /// Remove `key` and all of its values. Returns whether the key existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.as_map_mut()
            .is_some_and(|map| map.remove(key).is_some())
    }

    /// Iterate over this object's children.
    ///
    /// For objects, `expand = true` yields every value of every key
    /// (implicit arrays flattened); `expand = false` yields the first value
    /// of each key. Arrays always yield their elements. Scalars yield
    /// themselves once.
    pub fn iter(&self, expand: bool) -> Iter<'_> {
        match &self.value {
            Value::Object(map) => Iter::entries(map.entries(), expand),
            Value::Array(items) => Iter::elements(items),
            _ => Iter::single(self),
        }
    }

    /// Integer view: ints, truncated floats and times, booleans as 0/1.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "truncation toward zero is the documented conversion"
    )]
    pub fn to_int(&self) -> Option<i64> {
        match self.value {
            Value::Int(i) => Some(i),
            Value::Float(f) | Value::Time(f) => Some(f as i64),
            Value::Bool(b) => Some(i64::from(b)),
            _ => None,
        }
    }

    /// Floating-point view of numeric values.
    #[allow(
        clippy::cast_precision_loss,
        reason = "large integers lose precision as floats, same as the source format"
    )]
    pub fn to_float(&self) -> Option<f64> {
        match self.value {
            Value::Int(i) => Some(i as f64),
            Value::Float(f) | Value::Time(f) => Some(f),
            _ => None,
        }
    }

    /// Boolean view: booleans, and integers compared against zero.
    pub fn to_bool(&self) -> Option<bool> {
        match self.value {
            Value::Bool(b) => Some(b),
            Value::Int(i) => Some(i != 0),
            _ => None,
        }
    }

    /// String contents of string-typed objects.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Lenient string view: strings are borrowed, other scalars are
    /// formatted. Containers and `null` have no string form.
    pub fn to_str(&self) -> Option<Cow<'_, str>> {
        match &self.value {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Int(i) => Some(Cow::Owned(i.to_string())),
            Value::Float(f) | Value::Time(f) => Some(Cow::Owned(f.to_string())),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Object(_) | Value::Array(_) | Value::Null => None,
        }
    }
}

impl From<Value> for Object {
    fn from(value: Value) -> Self {
        Object::new(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
