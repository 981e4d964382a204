use super::*;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::collections::BTreeMap;

#[test]
fn parse_str_returns_root() {
    let root = parse_str("foo = bar;").unwrap();
    assert_eq!(root.object_type(), ObjectType::Object);
    assert_eq!(root.get("foo").and_then(Object::as_str), Some("bar"));
}

#[test]
fn parse_str_reports_location() {
    let err = parse_str("a = 1;\nb = ;").unwrap_err();
    assert_eq!(err.to_string(), "2:5: expected a value, found `;`");
    assert_eq!(err.as_parse().map(ParseError::line_col), Some(Some((2, 5))));
}

#[test]
fn numeric_strings_decode_as_integers() {
    #[derive(Deserialize)]
    struct Doc {
        numstr: i64,
    }
    let doc: Doc = from_str("numstr = \"42\"").unwrap();
    assert_eq!(doc.numstr, 42);
}

#[test]
fn decode_into_nested_maps() {
    let doc: BTreeMap<String, BTreeMap<String, i64>> =
        from_str("limits { open = 10; idle = 2 }").unwrap();
    assert_eq!(doc["limits"]["open"], 10);
    assert_eq!(doc["limits"]["idle"], 2);
}

#[test]
fn decode_errors_carry_the_path() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code, reason = "only the error is inspected")]
    struct Doc {
        ports: Vec<u16>,
    }
    let err = from_str::<Doc>("ports = [80, \"http\"]").unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert!(err.to_string().starts_with("decode error: ports[1]"), "{err}");
}

#[test]
fn parse_file_reads_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.conf");
    std::fs::write(&path, "name = \"app\"\n").unwrap();
    let root = parse_file(&path).unwrap();
    assert_eq!(root.get("name").and_then(Object::as_str), Some("app"));
}

#[test]
fn init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}

#[test]
fn named_sections_decode_with_their_keys() {
    #[derive(Debug, Deserialize)]
    struct Server {
        #[serde(rename = "$key")]
        name: String,
        port: u16,
    }
    #[derive(Debug, Deserialize)]
    struct Doc {
        server: Vec<Server>,
    }
    let text = "server \"alpha\" { port = 80 }\nserver \"beta\" { port = 443 }";
    let doc: Doc = from_str(text).unwrap();
    let names: Vec<_> = doc.server.iter().map(|s| (s.name.as_str(), s.port)).collect();
    assert_eq!(names, vec![("alpha", 80), ("beta", 443)]);
}
