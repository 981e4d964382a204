use pretty_assertions::assert_eq;

use super::*;

fn atom(text: &str) -> Value {
    parse_atom(text, ParserFlags::empty()).unwrap()
}

#[test]
fn booleans_and_null() {
    for word in ["true", "yes", "on", "TRUE", "Yes"] {
        assert_eq!(atom(word), Value::Bool(true), "{word}");
    }
    for word in ["false", "no", "off", "Off"] {
        assert_eq!(atom(word), Value::Bool(false), "{word}");
    }
    assert_eq!(atom("null"), Value::Null);
}

#[test]
fn integers() {
    assert_eq!(atom("80"), Value::Int(80));
    assert_eq!(atom("-12"), Value::Int(-12));
    assert_eq!(atom("+7"), Value::Int(7));
    assert_eq!(atom("0x1F"), Value::Int(31));
    assert_eq!(atom("-0x10"), Value::Int(-16));
}

#[test]
fn floats() {
    assert_eq!(atom("1.5"), Value::Float(1.5));
    assert_eq!(atom("-0.25"), Value::Float(-0.25));
    assert_eq!(atom("1e3"), Value::Float(1000.0));
}

#[test]
fn size_suffixes() {
    assert_eq!(atom("10k"), Value::Int(10_000));
    assert_eq!(atom("2m"), Value::Int(2_000_000));
    assert_eq!(atom("1g"), Value::Int(1_000_000_000));
    assert_eq!(atom("8kb"), Value::Int(8192));
    assert_eq!(atom("1MB"), Value::Int(1_048_576));
    assert_eq!(atom("1.5k"), Value::Float(1500.0));
}

#[test]
fn time_suffixes() {
    assert_eq!(atom("10s"), Value::Time(10.0));
    assert_eq!(atom("250ms"), Value::Time(0.25));
    assert_eq!(atom("5min"), Value::Time(300.0));
    assert_eq!(atom("1.5h"), Value::Time(5400.0));
    assert_eq!(atom("1d"), Value::Time(86400.0));
    assert_eq!(atom("2w"), Value::Time(1_209_600.0));
    assert_eq!(atom("1y"), Value::Time(31_536_000.0));
}

#[test]
fn no_time_flag_keeps_strings() {
    let flags = ParserFlags::NO_TIME;
    assert_eq!(parse_atom("10s", flags), Ok(Value::String("10s".into())));
    assert_eq!(parse_atom("10k", flags), Ok(Value::Int(10_000)));
}

#[test]
fn integer_bounds() {
    assert_eq!(atom("9223372036854775807"), Value::Int(i64::MAX));
    assert_eq!(atom("-9223372036854775808"), Value::Int(i64::MIN));
    assert_eq!(atom("0x7fffffffffffffff"), Value::Int(i64::MAX));
    assert_eq!(atom("-0x8000000000000000"), Value::Int(i64::MIN));
    assert_eq!(atom("9223372036854775808.0"), Value::Float(9_223_372_036_854_775_808.0));
}

#[test]
fn overflowing_integers_are_errors() {
    for text in [
        "9223372036854775808",
        "-9223372036854775809",
        "+99999999999999999999",
        "0x8000000000000000",
        "0x1ffffffffffffffff",
        "-0x8000000000000001",
        "9223372036854775807k",
        "99999999999999999999s",
    ] {
        assert_eq!(
            parse_atom(text, ParserFlags::empty()),
            Err(IntegerOverflow),
            "{text}"
        );
    }
}

#[test]
fn everything_else_is_a_string() {
    for text in ["bar", "inf", "NaN", "1-2", "0x", "0xZZ", "10 apples", "e5", "-"] {
        assert_eq!(atom(text), Value::String(text.into()), "{text}");
    }
}

#[test]
fn double_quoted_escapes() {
    assert_eq!(unescape_double("plain").unwrap(), "plain");
    assert_eq!(
        unescape_double(r#"a\nb\tc\\d\"e\/f"#).unwrap(),
        "a\nb\tc\\d\"e/f"
    );
    assert_eq!(unescape_double(r"\u00e9").unwrap(), "é");
    assert_eq!(unescape_double(r"\ud83d\ude00!").unwrap(), "😀!");
    assert_eq!(unescape_double("a\\\nb").unwrap(), "ab");
}

#[test]
fn double_quoted_errors() {
    let err = unescape_double(r"ok\q").unwrap_err();
    assert_eq!(err.offset, 2);
    assert_eq!(err.len, 2);
    assert!(err.message.contains("`\\q`"));

    assert!(unescape_double(r"\u12").is_err());
    assert!(unescape_double(r"\ud83d").is_err());
    assert!(unescape_double("end\\").is_err());
}

#[test]
fn single_quoted_escapes() {
    assert_eq!(unescape_single(r"it\'s"), "it's");
    assert_eq!(unescape_single(r"a\\b"), r"a\b");
    assert_eq!(unescape_single(r"C:\path\n"), r"C:\path\n");
}

#[test]
fn heredoc_bodies() {
    assert_eq!(heredoc_body("<<EOD\nline one\nline two\nEOD"), "line one\nline two");
    assert_eq!(heredoc_body("<<EOD\nEOD"), "");
    assert_eq!(heredoc_body("<<X\n\nX"), "");
    assert_eq!(heredoc_body("<<X\n\n\nX"), "\n");
}
