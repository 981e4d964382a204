use super::*;
use pretty_assertions::assert_eq;

fn sample() -> Object {
    let mut map = ObjectMap::new();
    map.insert("foo", Object::new(Value::String("bar".into())));
    map.insert("port", Object::new(Value::Int(80)));
    map.insert("port", Object::new(Value::Int(443)));
    map.insert(
        "list",
        Object::new(Value::Array(vec![
            Object::new(Value::Int(1)),
            Object::new(Value::Int(2)),
        ])),
    );
    Object::new(Value::Object(map))
}

#[test]
fn get_returns_first_value_with_key() {
    let obj = sample();
    let port = obj.get("port");
    assert_eq!(port.map(Object::key), Some(Some("port")));
    assert_eq!(port.and_then(Object::to_int), Some(80));
    assert_eq!(obj.get("missing"), None);
}

#[test]
fn get_all_returns_implicit_array() {
    let obj = sample();
    let ports: Vec<_> = obj.get_all("port").iter().filter_map(Object::to_int).collect();
    assert_eq!(ports, vec![80, 443]);
    assert!(obj.get_all("missing").is_empty());
}

#[test]
fn len_counts_distinct_keys() {
    let obj = sample();
    assert_eq!(obj.len(), 3);
    assert_eq!(obj.get("list").map(Object::len), Some(2));
    assert_eq!(obj.get("foo").map(Object::len), Some(3));
    assert_eq!(Object::new(Value::Int(5)).len(), 0);
}

#[test]
fn delete_removes_every_value() {
    let mut obj = sample();
    assert!(obj.delete("port"));
    assert!(obj.get("port").is_none());
    assert!(!obj.delete("port"));
    assert_eq!(obj.len(), 2);
}

#[test]
fn delete_on_scalar_is_noop() {
    let mut obj = Object::new(Value::Int(1));
    assert!(!obj.delete("foo"));
}

#[test]
fn iter_expanded_flattens_implicit_arrays() {
    let obj = sample();
    let keys: Vec<_> = obj.iter(true).filter_map(Object::key).collect();
    assert_eq!(keys, vec!["foo", "port", "port", "list"]);
}

#[test]
fn iter_unexpanded_yields_one_per_key() {
    let obj = sample();
    let keys: Vec<_> = obj.iter(false).filter_map(Object::key).collect();
    assert_eq!(keys, vec!["foo", "port", "list"]);
}

#[test]
fn iter_array_and_scalar() {
    let obj = sample();
    let list = obj.get("list").map(|l| l.iter(true).count());
    assert_eq!(list, Some(2));
    let scalar = Object::new(Value::Bool(true));
    assert_eq!(scalar.iter(false).count(), 1);
}

#[test]
fn conversions() {
    assert_eq!(Object::new(Value::Float(2.9)).to_int(), Some(2));
    assert_eq!(Object::new(Value::Bool(true)).to_int(), Some(1));
    assert_eq!(Object::new(Value::Time(1.5)).to_float(), Some(1.5));
    assert_eq!(Object::new(Value::Int(0)).to_bool(), Some(false));
    assert_eq!(Object::new(Value::String("x".into())).to_int(), None);
    assert_eq!(Object::new(Value::String("x".into())).as_str(), Some("x"));
    assert_eq!(Object::new(Value::Null).as_str(), None);
}

#[test]
fn object_type_names() {
    assert_eq!(sample().object_type(), ObjectType::Object);
    assert_eq!(ObjectType::Boolean.to_string(), "boolean");
    assert_eq!(Value::Time(1.0).object_type(), ObjectType::Time);
}

#[test]
fn lenient_string_view() {
    let text = Object::new(Value::String("hi".into()));
    assert!(matches!(text.to_str(), Some(Cow::Borrowed("hi"))));
    assert_eq!(Object::new(Value::Int(42)).to_str().as_deref(), Some("42"));
    assert_eq!(Object::new(Value::Float(0.5)).to_str().as_deref(), Some("0.5"));
    assert_eq!(Object::new(Value::Bool(false)).to_str().as_deref(), Some("false"));
    assert_eq!(Object::new(Value::Null).to_str(), None);
    assert_eq!(Object::empty_object().to_str(), None);
}
