//! Decoding documents into native Rust types.
//!
//! [`from_object`] drives any `serde::Deserialize` type from an [`Object`].
//! Conversions are lenient in the same places the configuration format is:
//!
//! - strings parse into integers, floats and booleans (`numstr = "42"`)
//! - integers and booleans format into strings
//! - a repeated key decodes as a sequence when the target asks for one,
//!   merges its objects when the target is a map or struct, and otherwise
//!   takes the last value
//! - struct fields match keys exactly first, then case-insensitively
//! - a struct field named [`KEY_FIELD`] (`#[serde(rename = "$key")]`)
//!   receives the key the decoded object was stored under
//!
//! Errors carry the dotted path of the failing value (`server.ports[1]`).

use std::fmt;

use serde::de::{
    self, value::BorrowedStrDeserializer, DeserializeSeed, Deserializer, EnumAccess, MapAccess,
    SeqAccess, VariantAccess, Visitor,
};
use serde::Deserialize;

use crate::{Object, ObjectType, Value};

/// Struct field name that receives the object's own key instead of a member.
///
/// ```
/// # use serde::Deserialize;
/// #[derive(Deserialize)]
/// struct Server {
///     #[serde(rename = "$key")]
///     name: String,
///     port: u16,
/// }
/// ```
pub const KEY_FIELD: &str = "$key";

/// Error produced while decoding an [`Object`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeError {
    path: String,
    message: String,
}

impl DecodeError {
    fn new(message: impl Into<String>) -> Self {
        DecodeError {
            path: String::new(),
            message: message.into(),
        }
    }

    /// Attach `path` unless a deeper path was already recorded.
    fn at(mut self, path: &str) -> Self {
        if self.path.is_empty() {
            self.path = path.to_owned();
        }
        self
    }

    /// Dotted path of the value that failed to decode. Empty for the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for DecodeError {}

impl de::Error for DecodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        DecodeError::new(msg.to_string())
    }
}

/// Decode `object` into `T`.
pub fn from_object<'de, T: Deserialize<'de>>(object: &'de Object) -> Result<T, DecodeError> {
    T::deserialize(ValueDeserializer::new(vec![object], String::new()))
}

impl Object {
    /// Decode this object into `T`. See [`from_object`].
    pub fn decode<'de, T: Deserialize<'de>>(&'de self) -> Result<T, DecodeError> {
        from_object(self)
    }
}

fn join_field(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_owned()
    } else {
        format!("{path}.{field}")
    }
}

/// Deserializer over the values stored under one key.
///
/// Invariant: `values` is never empty.
struct ValueDeserializer<'de> {
    values: Vec<&'de Object>,
    path: String,
}

impl<'de> ValueDeserializer<'de> {
    fn new(values: Vec<&'de Object>, path: String) -> Self {
        debug_assert!(!values.is_empty(), "deserializer needs at least one value");
        ValueDeserializer { values, path }
    }

    /// The value a scalar target sees: the last one written.
    fn last(&self) -> &'de Object {
        self.values[self.values.len() - 1]
    }

    fn unsupported(&self, target: &str) -> DecodeError {
        DecodeError::new(format!(
            "unsupported type to {target}: {}",
            self.last().object_type()
        ))
    }

    fn integer(&self) -> Result<i64, DecodeError> {
        let obj = self.last();
        match obj.value() {
            Value::String(s) => parse_int(s)
                .ok_or_else(|| DecodeError::new(format!("cannot parse '{s}' as int"))),
            _ => obj.to_int().ok_or_else(|| self.unsupported("int")),
        }
    }

    fn float(&self) -> Result<f64, DecodeError> {
        let obj = self.last();
        match obj.value() {
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| DecodeError::new(format!("cannot parse '{s}' as float"))),
            _ => obj.to_float().ok_or_else(|| self.unsupported("float")),
        }
    }

    fn boolean(&self) -> Result<bool, DecodeError> {
        let obj = self.last();
        match obj.value() {
            Value::String(s) => parse_bool(s)
                .ok_or_else(|| DecodeError::new(format!("cannot parse '{s}' as bool"))),
            _ => obj.to_bool().ok_or_else(|| self.unsupported("bool")),
        }
    }

    fn map_access(
        self,
        fields: Option<&'static [&'static str]>,
    ) -> Result<MapDeserializer<'de>, DecodeError> {
        if self.values.iter().any(|v| v.object_type() != ObjectType::Object) {
            return Err(DecodeError::new(format!(
                "not an object type, can't decode {} to map",
                self.last().object_type()
            )));
        }
        let own_key = fields
            .filter(|fields| fields.contains(&KEY_FIELD))
            .and_then(|_| self.last().key());
        let entries = merge_entries(&self.values)
            .into_iter()
            .filter(|(key, _)| own_key.is_none() || *key != KEY_FIELD)
            .collect::<Vec<_>>();
        Ok(MapDeserializer {
            own_key,
            entries: entries.into_iter(),
            pending: None,
            fields,
            path: self.path,
        })
    }

    fn seq_access(self) -> SeqDeserializer<'de> {
        let items: Vec<Vec<&'de Object>> = if self.values.len() > 1 {
            self.values.iter().map(|v| vec![*v]).collect()
        } else {
            let obj = self.values[0];
            match obj.value() {
                Value::Array(items) => items.iter().map(|v| vec![v]).collect(),
                Value::Object(map) => map.entries().map(|e| e.values().iter().collect()).collect(),
                _ => vec![vec![obj]],
            }
        };
        SeqDeserializer {
            items: items.into_iter(),
            index: 0,
            path: self.path,
        }
    }
}

/// Group the members of several objects by key, keeping first-seen order.
fn merge_entries<'de>(objects: &[&'de Object]) -> Vec<(&'de str, Vec<&'de Object>)> {
    let mut merged: Vec<(&'de str, Vec<&'de Object>)> = Vec::new();
    for entry in objects.iter().filter_map(|o| o.as_map()).flat_map(|m| m.entries()) {
        let values = entry.values().iter();
        match merged.iter_mut().find(|(k, _)| *k == entry.key()) {
            Some((_, existing)) => existing.extend(values),
            None => merged.push((entry.key(), values.collect())),
        }
    }
    merged
}

/// Integer parsing with `0x`, `0o` and `0b` prefixes and an optional sign.
fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if let Some(oct) = digits.strip_prefix("0o") {
        (8, oct)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        (2, bin)
    } else {
        (10, digits)
    };
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

macro_rules! forward_integers {
    ($($method:ident)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
                let value = self.integer().map_err(|e| e.at(&self.path))?;
                visitor.visit_i64(value)
            }
        )*
    };
}

impl<'de> Deserializer<'de> for ValueDeserializer<'de> {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        if self.values.len() > 1 {
            return self.deserialize_seq(visitor);
        }
        let obj = self.values[0];
        match obj.value() {
            Value::Object(_) => self.deserialize_map(visitor),
            Value::Array(_) => self.deserialize_seq(visitor),
            Value::Int(i) => visitor.visit_i64(*i),
            Value::Float(f) | Value::Time(f) => visitor.visit_f64(*f),
            Value::String(s) => visitor.visit_borrowed_str(s),
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Null => visitor.visit_unit(),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        let value = self.boolean().map_err(|e| e.at(&self.path))?;
        visitor.visit_bool(value)
    }

    forward_integers! {
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        let value = self.float().map_err(|e| e.at(&self.path))?;
        visitor.visit_f64(value)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        self.deserialize_str(visitor)
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        let obj = self.last();
        match obj.value() {
            Value::String(s) => visitor.visit_borrowed_str(s),
            Value::Bool(b) => visitor.visit_string(b.to_string()),
            Value::Int(i) => visitor.visit_string(i.to_string()),
            Value::Float(f) | Value::Time(f) => visitor.visit_string(f.to_string()),
            _ => Err(self.unsupported("string").at(&self.path)),
        }
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        match self.last().value() {
            Value::String(s) => visitor.visit_borrowed_bytes(s.as_bytes()),
            _ => Err(self.unsupported("bytes").at(&self.path)),
        }
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        if self.values.len() == 1 && self.values[0].object_type() == ObjectType::Null {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        match self.last().value() {
            Value::Null => visitor.visit_unit(),
            _ => Err(self.unsupported("unit").at(&self.path)),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        visitor.visit_seq(self.seq_access())
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        let path = self.path.clone();
        let access = self.map_access(None).map_err(|e| e.at(&path))?;
        visitor.visit_map(access)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        let path = self.path.clone();
        let access = self.map_access(Some(fields)).map_err(|e| e.at(&path))?;
        visitor.visit_map(access)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        let obj = self.last();
        match obj.value() {
            Value::String(s) => visitor.visit_enum(EnumDeserializer {
                variant: s,
                content: None,
                path: self.path,
            }),
            Value::Object(map) if map.len() == 1 => {
                let Some(entry) = map.entries().next() else {
                    return Err(self.unsupported("enum").at(&self.path));
                };
                visitor.visit_enum(EnumDeserializer {
                    variant: entry.key(),
                    content: Some(entry.values().iter().collect()),
                    path: self.path,
                })
            }
            _ => Err(self.unsupported("enum").at(&self.path)),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DecodeError> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        visitor.visit_unit()
    }
}

struct SeqDeserializer<'de> {
    items: std::vec::IntoIter<Vec<&'de Object>>,
    index: usize,
    path: String,
}

impl<'de> SeqAccess<'de> for SeqDeserializer<'de> {
    type Error = DecodeError;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, DecodeError> {
        let Some(values) = self.items.next() else {
            return Ok(None);
        };
        let path = format!("{}[{}]", self.path, self.index);
        self.index += 1;
        seed.deserialize(ValueDeserializer::new(values, path.clone()))
            .map(Some)
            .map_err(|e| e.at(&path))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

struct MapDeserializer<'de> {
    /// Key handed to a [`KEY_FIELD`] field before any member.
    own_key: Option<&'de str>,
    entries: std::vec::IntoIter<(&'de str, Vec<&'de Object>)>,
    pending: Option<Pending<'de>>,
    fields: Option<&'static [&'static str]>,
    path: String,
}

enum Pending<'de> {
    OwnKey(&'de str),
    Member(String, Vec<&'de Object>),
}

impl MapDeserializer<'_> {
    /// Struct field name a key should decode as.
    fn field_name<'k>(&self, key: &'k str) -> &'k str {
        let Some(fields) = self.fields else {
            return key;
        };
        if fields.iter().any(|f| *f == key) {
            return key;
        }
        fields
            .iter()
            .copied()
            .find(|f| f.eq_ignore_ascii_case(key))
            .unwrap_or(key)
    }
}

impl<'de> MapAccess<'de> for MapDeserializer<'de> {
    type Error = DecodeError;

    fn next_key_seed<K: de::DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, DecodeError> {
        if let Some(own) = self.own_key.take() {
            self.pending = Some(Pending::OwnKey(own));
            return seed
                .deserialize(BorrowedStrDeserializer::<DecodeError>::new(KEY_FIELD))
                .map(Some);
        }
        let Some((key, values)) = self.entries.next() else {
            return Ok(None);
        };
        let name = self.field_name(key);
        let child = if self.fields.is_some() {
            join_field(&self.path, name)
        } else {
            format!("{}[{key}]", self.path)
        };
        self.pending = Some(Pending::Member(child, values));
        seed.deserialize(BorrowedStrDeserializer::<DecodeError>::new(name))
            .map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(
        &mut self,
        seed: V,
    ) -> Result<V::Value, DecodeError> {
        match self.pending.take() {
            Some(Pending::OwnKey(key)) => seed
                .deserialize(BorrowedStrDeserializer::<DecodeError>::new(key))
                .map_err(|e| e.at(&join_field(&self.path, KEY_FIELD))),
            Some(Pending::Member(path, values)) => seed
                .deserialize(ValueDeserializer::new(values, path.clone()))
                .map_err(|e| e.at(&path)),
            None => Err(DecodeError::new("value requested before key").at(&self.path)),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len() + usize::from(self.own_key.is_some()))
    }
}

struct EnumDeserializer<'de> {
    variant: &'de str,
    content: Option<Vec<&'de Object>>,
    path: String,
}

impl<'de> EnumAccess<'de> for EnumDeserializer<'de> {
    type Error = DecodeError;
    type Variant = VariantDeserializer<'de>;

    fn variant_seed<V: DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, VariantDeserializer<'de>), DecodeError> {
        let variant = seed.deserialize(BorrowedStrDeserializer::<DecodeError>::new(self.variant))?;
        let path = join_field(&self.path, self.variant);
        Ok((
            variant,
            VariantDeserializer {
                content: self.content,
                path,
            },
        ))
    }
}

struct VariantDeserializer<'de> {
    content: Option<Vec<&'de Object>>,
    path: String,
}

impl<'de> VariantDeserializer<'de> {
    fn content(self) -> Result<ValueDeserializer<'de>, DecodeError> {
        match self.content {
            Some(values) => Ok(ValueDeserializer::new(values, self.path)),
            None => Err(DecodeError::new("expected variant content").at(&self.path)),
        }
    }
}

impl<'de> VariantAccess<'de> for VariantDeserializer<'de> {
    type Error = DecodeError;

    fn unit_variant(self) -> Result<(), DecodeError> {
        match self.content {
            None => Ok(()),
            Some(_) => Err(DecodeError::new("unexpected content for unit variant").at(&self.path)),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(
        self,
        seed: T,
    ) -> Result<T::Value, DecodeError> {
        seed.deserialize(self.content()?)
    }

    fn tuple_variant<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        self.content()?.deserialize_seq(visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        self.content()?.deserialize_struct("", fields, visitor)
    }
}
