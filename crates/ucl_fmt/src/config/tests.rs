use super::*;
use crate::output::StringOutput;
use pretty_assertions::assert_eq;

fn render(root: &Object) -> String {
    let mut out = StringOutput::new();
    emit(root, &mut EmitContext::new(&mut out));
    out.output()
}

fn string(s: &str) -> Object {
    Object::new(Value::String(s.into()))
}

#[test]
fn flat_pairs() {
    let mut map = ObjectMap::new();
    map.insert("foo", string("bar"));
    map.insert("bar", string("baz"));
    let root = Object::new(Value::Object(map));
    assert_eq!(render(&root), "foo = \"bar\";\nbar = \"baz\";\n");
}

#[test]
fn nested_block_and_array() {
    let mut inner = ObjectMap::new();
    inner.insert("listen", Object::new(Value::Int(80)));
    let mut map = ObjectMap::new();
    map.insert("server", Object::new(Value::Object(inner)));
    map.insert(
        "tags",
        Object::new(Value::Array(vec![string("a"), Object::new(Value::Bool(false))])),
    );
    let root = Object::new(Value::Object(map));
    assert_eq!(
        render(&root),
        "server {\n    listen = 80;\n}\ntags [\n    \"a\",\n    false,\n]\n"
    );
}

#[test]
fn implicit_array_is_bracketed() {
    let mut map = ObjectMap::new();
    map.insert("port", Object::new(Value::Int(80)));
    map.insert("port", Object::new(Value::Int(443)));
    let root = Object::new(Value::Object(map));
    assert_eq!(render(&root), "port [\n    80,\n    443,\n]\n");
}

#[test]
fn awkward_keys_are_quoted() {
    assert_eq!(config_key("plain_key-1"), "plain_key-1");
    assert_eq!(config_key("with space"), "\"with space\"");
    assert_eq!(config_key(".dot"), "\".dot\"");
    assert_eq!(config_key(""), "\"\"");
}

#[test]
fn object_elements_in_arrays() {
    let mut member = ObjectMap::new();
    member.insert("x", Object::new(Value::Int(1)));
    let root = Object::new(Value::Object({
        let mut map = ObjectMap::new();
        map.insert(
            "items",
            Object::new(Value::Array(vec![Object::new(Value::Object(member))])),
        );
        map
    }));
    assert_eq!(render(&root), "items [\n    {\n        x = 1;\n    },\n]\n");
}
