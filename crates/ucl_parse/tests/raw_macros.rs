//! Directive handlers registered through the raw C-ABI surface.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
#![allow(unsafe_code, reason = "exercises the C-ABI handler contract")]

use std::collections::HashMap;
use std::ffi::c_void;

use pretty_assertions::assert_eq;
use ucl_diagnostic::ErrorCode;
use ucl_ir::Object;
use ucl_parse::{Parser, ParserFlags, UserData};

/// In-memory include resolver driven by `.include "name"`.
#[derive(Default)]
struct Includes {
    files: HashMap<&'static str, &'static str>,
    calls: Vec<String>,
    loaded: Vec<Object>,
}

unsafe extern "C" fn include(data: *const u8, len: usize, user_data: *mut c_void) -> bool {
    // SAFETY: every test registers a live `Includes` and the parser passes
    // a valid slice.
    let (includes, arg) = unsafe {
        (
            &mut *user_data.cast::<Includes>(),
            std::slice::from_raw_parts(data, len),
        )
    };
    let Ok(name) = std::str::from_utf8(arg) else {
        return false;
    };
    includes.calls.push(name.to_owned());
    let Some(source) = includes.files.get(name).copied() else {
        return false;
    };
    // Nested parse on the same thread, while the outer parse is suspended.
    let mut nested = Parser::default();
    if nested.add_string(source).is_err() {
        return false;
    }
    match nested.into_object() {
        Some(object) => {
            includes.loaded.push(object);
            true
        }
        None => false,
    }
}

unsafe extern "C" fn count_calls(_: *const u8, _: usize, user_data: *mut c_void) -> bool {
    // SAFETY: registered with a live `u32`.
    unsafe { *user_data.cast::<u32>() += 1 };
    true
}

fn parser_with_includes(includes: &mut Includes) -> Parser {
    let mut parser = Parser::new(ParserFlags::empty());
    // SAFETY: `include` only dereferences `user_data` as the `Includes`
    // that outlives `parser` in each test.
    unsafe {
        parser.register_raw_macro(
            "include",
            include,
            UserData::new(std::ptr::from_mut(includes).cast::<c_void>()),
        );
    }
    parser
}

#[test]
fn include_resolves_and_nests() {
    let mut includes = Includes::default();
    includes.files.insert("foo", "inner = 1; deep { x = y }");
    let mut parser = parser_with_includes(&mut includes);
    parser.add_string("before = 1;\n.include \"foo\";\nafter = 2;").unwrap();

    let root = parser.into_object().unwrap();
    assert_eq!(root.len(), 2);
    assert_eq!(includes.calls, vec!["foo".to_owned()]);
    assert_eq!(includes.loaded.len(), 1);
    assert_eq!(
        includes.loaded[0].get("deep").unwrap().get("x").and_then(Object::as_str),
        Some("y")
    );
}

#[test]
fn failing_include_stops_the_parse() {
    let mut includes = Includes::default();
    let mut parser = parser_with_includes(&mut includes);
    let err = parser
        .add_string("a = 1;\n.include \"missing\";\nb = 2;")
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1007);
    assert_eq!(err.line_col(), Some((2, 1)));
    assert!(parser.object().is_none());
    drop(parser);
    assert_eq!(includes.calls, vec!["missing".to_owned()]);
}

#[test]
fn handlers_run_once_per_directive_in_order() {
    let mut includes = Includes::default();
    includes.files.insert("a", "x = 1");
    includes.files.insert("b", "y = 2");
    let mut parser = parser_with_includes(&mut includes);
    parser
        .add_string(".include a\nsection { .include \"b\" }\n.include a")
        .unwrap();
    drop(parser);
    assert_eq!(includes.calls, vec!["a", "b", "a"]);
}

#[test]
fn re_registration_replaces_handler() {
    let mut calls = 0_u32;
    let mut parser = Parser::default();
    // SAFETY: the `include` registration is replaced before any chunk is
    // added; `count_calls` increments the `u32` that outlives `parser`.
    unsafe {
        parser.register_raw_macro("m", include, UserData::NULL);
        parser.register_raw_macro(
            "m",
            count_calls,
            UserData::new(std::ptr::from_mut(&mut calls).cast::<c_void>()),
        );
    }
    parser.add_string(".m one; .m two;").unwrap();
    drop(parser);
    assert_eq!(calls, 2);
}

#[test]
fn unknown_macro_is_an_error() {
    let mut parser = Parser::default();
    let err = parser.add_string(".include \"x\"").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1006);
}

unsafe extern "C" fn record_bytes(data: *const u8, len: usize, user_data: *mut c_void) -> bool {
    // SAFETY: registered with a live `Vec<Vec<u8>>`; the parser passes a
    // valid slice.
    unsafe {
        let seen = &mut *user_data.cast::<Vec<Vec<u8>>>();
        seen.push(std::slice::from_raw_parts(data, len).to_vec());
    }
    true
}

#[test]
fn arguments_carry_non_utf8_bytes() {
    let mut seen: Vec<Vec<u8>> = Vec::new();
    let mut parser = Parser::default();
    // SAFETY: `seen` outlives `parser`.
    unsafe {
        parser.register_raw_macro(
            "blob",
            record_bytes,
            UserData::new((&raw mut seen).cast::<c_void>()),
        );
    }
    parser
        .add_bytes(b".blob \"\xff\xfe\"\n.blob {\x80 \xc3}\nk = v")
        .unwrap();
    let root = parser.into_object().unwrap();
    assert_eq!(seen, vec![b"\xff\xfe".to_vec(), b"\x80 \xc3".to_vec()]);
    assert_eq!(root.get("k").and_then(Object::as_str), Some("v"));
}

#[test]
fn non_utf8_outside_arguments_is_still_rejected() {
    let mut seen: Vec<Vec<u8>> = Vec::new();
    let mut parser = Parser::default();
    // SAFETY: `seen` outlives `parser`.
    unsafe {
        parser.register_raw_macro(
            "blob",
            record_bytes,
            UserData::new((&raw mut seen).cast::<c_void>()),
        );
    }
    let err = parser
        .add_bytes(b".blob \"\xff\"\nname = \"caf\xe9\"")
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E0002);
    assert_eq!(err.line_col(), Some((2, 12)));
    assert_eq!(seen, vec![b"\xff".to_vec()]);
}
