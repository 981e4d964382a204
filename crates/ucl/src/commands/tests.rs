use super::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path: PathBuf = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn options_parse_all_flags() {
    let options = Options::parse(&args(&[
        "--format=yaml",
        "--allow-macro=.include",
        "--lowercase",
        "--no-time",
    ]))
    .unwrap();
    assert_eq!(options.format, Emitter::Yaml);
    assert_eq!(options.allow_macros, vec!["include".to_owned()]);
    assert_eq!(options.flags, ParserFlags::KEY_LOWERCASE | ParserFlags::NO_TIME);
}

#[test]
fn options_reject_unknown() {
    assert_eq!(
        Options::parse(&args(&["--verbose"])).unwrap_err(),
        "error: unknown option '--verbose'"
    );
    assert!(Options::parse(&args(&["--format=toml"])).is_err());
}

#[test]
fn parse_prints_requested_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "a.conf", "foo = bar;\nbar = baz;\n");
    let options = Options {
        format: Emitter::JsonCompact,
        ..Options::default()
    };
    assert_eq!(
        parse_file(&path, &options).unwrap(),
        r#"{"foo":"bar","bar":"baz"}"#
    );
}

#[test]
fn parse_renders_errors_with_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "bad.conf", "a = 1;\nb = ;\n");
    let err = parse_file(&path, &Options::default()).unwrap_err();
    assert!(err.starts_with("error[E1002]"), "{err}");
    assert!(err.contains(&format!("{path}:2:5")), "{err}");
}

#[test]
fn check_needs_allowed_macros() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "m.conf", ".include \"other.conf\"\nk = v\n");

    let err = check_file(&path, &Options::default()).unwrap_err();
    assert!(err.starts_with("error[E1006]"), "{err}");

    let options = Options::parse(&args(&["--allow-macro=include"])).unwrap();
    assert_eq!(
        check_file(&path, &options).unwrap(),
        format!("{path}: ok (1 top-level keys)")
    );
}

#[test]
fn missing_file_is_e9001() {
    let err = check_file("/definitely/not/here.conf", &Options::default()).unwrap_err();
    assert!(err.starts_with("error[E9001]: cannot find file"), "{err}");
}

#[test]
fn lex_lists_tokens_and_macro_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "l.conf", "a = hello world;\n.m {x}\n");
    let out = lex_file(&path).unwrap();
    let expected = format!(
        "Tokens for '{path}' (8 tokens):\n\
         \x20 Atom @ 0..1 \"a\"\n\
         \x20 Equal @ 2..3 \"=\"\n\
         \x20 Atom @ 4..15 \"hello world\"\n\
         \x20 Semicolon @ 15..16 \";\"\n\
         \x20 Newline @ 16..17 \"\\n\"\n\
         \x20 Directive @ 17..19 \".m\"\n\
         \x20 MacroArgument(Braced) @ 21..22 \"x\"\n\
         \x20 Newline @ 23..24 \"\\n\"\n"
    );
    assert_eq!(out, expected);
}
