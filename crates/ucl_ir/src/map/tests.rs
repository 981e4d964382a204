use super::*;
use crate::Value;
use pretty_assertions::assert_eq;

fn string(s: &str) -> Object {
    Object::new(Value::String(s.into()))
}

#[test]
fn insert_preserves_order() {
    let mut map = ObjectMap::new();
    map.insert("b", string("1"));
    map.insert("a", string("2"));
    map.insert("c", string("3"));
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
}

#[test]
fn insert_sets_key_on_value() {
    let mut map = ObjectMap::new();
    map.insert("name", string("x"));
    assert_eq!(map.get("name").and_then(Object::key), Some("name"));
}

#[test]
fn repeated_key_appends() {
    let mut map = ObjectMap::new();
    map.insert("k", string("1"));
    map.insert("k", string("2"));
    assert_eq!(map.len(), 1);
    let entry = map.entries().next();
    assert_eq!(entry.map(Entry::is_implicit_array), Some(true));
    assert_eq!(map.get("k").and_then(Object::as_str), Some("1"));
}

#[test]
fn find_object_mut_skips_scalars() {
    let mut map = ObjectMap::new();
    map.insert("k", string("scalar"));
    map.insert("k", Object::empty_object());
    let inner = map.find_object_mut("k");
    assert!(inner.is_some());
    if let Some(inner) = inner {
        inner.insert("nested", string("v"));
    }
    let nested = map.get_all("k")[1].get("nested").and_then(Object::as_str);
    assert_eq!(nested, Some("v"));
}

#[test]
fn extend_appends_in_order() {
    let mut a = ObjectMap::new();
    a.insert("x", string("1"));
    let mut b = ObjectMap::new();
    b.insert("x", string("2"));
    b.insert("y", string("3"));
    a.extend(b);
    assert_eq!(a.len(), 2);
    assert_eq!(a.get_all("x").len(), 2);
    assert_eq!(a.get("y").and_then(Object::as_str), Some("3"));
}

#[test]
fn remove_returns_entry() {
    let mut map = ObjectMap::new();
    map.insert("x", string("1"));
    let removed = map.remove("x");
    assert_eq!(removed.as_ref().map(Entry::key), Some("x"));
    assert!(map.is_empty());
    assert!(map.remove("x").is_none());
}

#[test]
fn section_mut_reuses_existing_object() {
    let mut map = ObjectMap::new();
    map.section_mut("bundle").insert("foo", Object::empty_object());
    map.section_mut("bundle").insert("bar", Object::empty_object());
    assert_eq!(map.get_all("bundle").len(), 1);
    let bundle = map.get("bundle").and_then(Object::as_map).unwrap();
    assert_eq!(bundle.keys().collect::<Vec<_>>(), vec!["foo", "bar"]);
}

#[test]
fn section_mut_appends_after_scalar() {
    let mut map = ObjectMap::new();
    map.insert("bundle", string("flat"));
    map.section_mut("bundle").insert("x", string("1"));
    let values = map.get_all("bundle");
    assert_eq!(values.len(), 2);
    assert_eq!(values[1].key(), Some("bundle"));
    assert!(values[1].get("x").is_some());
}

#[test]
fn lookups_follow_removal() {
    let mut map = ObjectMap::new();
    for (key, value) in [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")] {
        map.insert(key, string(value));
    }
    assert!(map.remove("b").is_some());
    assert!(map.remove("b").is_none());
    assert_eq!(map.get("a").and_then(Object::as_str), Some("1"));
    assert_eq!(map.get("c").and_then(Object::as_str), Some("3"));
    assert_eq!(map.get("d").and_then(Object::as_str), Some("4"));
    assert!(map.get("b").is_none());

    map.insert("d", string("5"));
    map.insert("b", string("6"));
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "c", "d", "b"]);
    assert_eq!(map.get_all("d").len(), 2);
    assert_eq!(map.get("b").and_then(Object::as_str), Some("6"));

    map.section_mut("e").insert("x", string("7"));
    assert!(map.remove("a").is_some());
    let section = map.get("e").and_then(Object::as_map).unwrap();
    assert_eq!(section.get("x").and_then(Object::as_str), Some("7"));
    assert_eq!(map.len(), 4);
}

#[test]
fn equality_ignores_index_layout() {
    let mut a = ObjectMap::new();
    a.insert("x", string("1"));
    a.insert("y", string("2"));
    a.remove("x");
    let mut b = ObjectMap::new();
    b.insert("y", string("2"));
    assert_eq!(a, b);
}
