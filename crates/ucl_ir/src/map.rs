//! Keyed object members.
//!
//! Members keep insertion order. Storing a key that is already present
//! appends to that key's *implicit array* instead of replacing the
//! existing value, so `port = 80; port = 443;` keeps both values.

use std::fmt;
use std::slice;

use rustc_hash::FxHashMap;

use crate::{Object, Value};

/// One key together with every value stored under it.
///
/// Invariant: `values` is never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    key: String,
    values: Vec<Object>,
}

impl Entry {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The first value stored under this key.
    pub fn first(&self) -> &Object {
        &self.values[0]
    }

    /// All values stored under this key, in insertion order.
    pub fn values(&self) -> &[Object] {
        &self.values
    }

    /// Whether the key was repeated.
    pub fn is_implicit_array(&self) -> bool {
        self.values.len() > 1
    }
}

/// Insertion-ordered members of an object.
///
/// Keys are looked up through a hash index over `entries`, so building a
/// map of N keys is linear.
#[derive(Clone, Default)]
pub struct ObjectMap {
    entries: Vec<Entry>,
    /// key -> position in `entries`.
    index: FxHashMap<String, usize>,
}

impl ObjectMap {
    pub fn new() -> Self {
        ObjectMap {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    fn push_entry(&mut self, key: String, values: Vec<Object>) -> usize {
        let idx = self.entries.len();
        self.index.insert(key.clone(), idx);
        self.entries.push(Entry { key, values });
        idx
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.position(key).map(|i| self.entries[i].first())
    }

    pub fn get_all(&self, key: &str) -> &[Object] {
        match self.position(key) {
            Some(idx) => &self.entries[idx].values,
            None => &[],
        }
    }

    /// The first object-typed value stored under `key`.
    ///
    /// Used when descending into named sections: `server "a" { }` followed
    /// by `server "b" { }` fills one `server` object.
    pub fn find_object_mut(&mut self, key: &str) -> Option<&mut ObjectMap> {
        let idx = self.position(key)?;
        self.entries[idx]
            .values
            .iter_mut()
            .find_map(Object::as_map_mut)
    }

    /// The object a named section under `key` descends into.
    ///
    /// Returns the first object-typed value stored under `key`, creating an
    /// empty one (appended to the key's implicit array) when there is none.
    pub fn section_mut(&mut self, key: &str) -> &mut ObjectMap {
        let idx = match self.position(key) {
            Some(idx) => idx,
            None => self.push_entry(key.to_owned(), Vec::new()),
        };
        let values = &mut self.entries[idx].values;
        let slot = match values.iter().position(|v| v.as_map().is_some()) {
            Some(slot) => slot,
            None => {
                values.push(Object::with_key(key, Value::Object(ObjectMap::new())));
                values.len() - 1
            }
        };
        match values[slot].value_mut() {
            Value::Object(map) => map,
            _ => unreachable!("section slot is always object-typed"),
        }
    }

    /// Store `value` under `key`, appending to the key's implicit array
    /// when the key already exists. The stored object takes `key` as its key.
    pub fn insert(&mut self, key: impl Into<String>, mut value: Object) {
        let key = key.into();
        value.set_key(key.clone());
        match self.position(&key) {
            Some(idx) => self.entries[idx].values.push(value),
            None => {
                self.push_entry(key, vec![value]);
            }
        }
    }

    /// Remove `key` and return its entry. Later keys keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let idx = self.index.remove(key)?;
        let entry = self.entries.remove(idx);
        for (pos, shifted) in self.entries.iter().enumerate().skip(idx) {
            if let Some(slot) = self.index.get_mut(shifted.key.as_str()) {
                *slot = pos;
            }
        }
        Some(entry)
    }

    /// Move all members of `other` into `self`, in order, following the
    /// same append rule as [`insert`](Self::insert).
    pub fn extend(&mut self, other: ObjectMap) {
        for entry in other.entries {
            for value in entry.values {
                self.insert(entry.key.clone(), value);
            }
        }
    }

    pub fn entries(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::key)
    }
}

impl PartialEq for ObjectMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for ObjectMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectMap")
            .field("entries", &self.entries)
            .finish()
    }
}

/// Iterator returned by [`Object::iter`].
pub struct Iter<'a> {
    inner: IterInner<'a>,
}

enum IterInner<'a> {
    Entries {
        entries: slice::Iter<'a, Entry>,
        current: slice::Iter<'a, Object>,
        expand: bool,
    },
    Elements(slice::Iter<'a, Object>),
    Single(Option<&'a Object>),
}

impl<'a> Iter<'a> {
    pub(crate) fn entries(entries: slice::Iter<'a, Entry>, expand: bool) -> Self {
        Iter {
            inner: IterInner::Entries {
                entries,
                current: <&[Object]>::default().iter(),
                expand,
            },
        }
    }

    pub(crate) fn elements(items: &'a [Object]) -> Self {
        Iter {
            inner: IterInner::Elements(items.iter()),
        }
    }

    pub(crate) fn single(object: &'a Object) -> Self {
        Iter {
            inner: IterInner::Single(Some(object)),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Object;

    fn next(&mut self) -> Option<&'a Object> {
        match &mut self.inner {
            IterInner::Entries {
                entries,
                current,
                expand,
            } => {
                if !*expand {
                    return entries.next().map(Entry::first);
                }
                loop {
                    if let Some(obj) = current.next() {
                        return Some(obj);
                    }
                    *current = entries.next()?.values.iter();
                }
            }
            IterInner::Elements(items) => items.next(),
            IterInner::Single(obj) => obj.take(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
