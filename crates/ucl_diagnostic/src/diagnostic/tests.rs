use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E1006)
        .with_message("unknown macro `.inclde`")
        .with_label(Span::new(0, 7), "no handler registered for this name")
        .with_note("registered macros: include");

    assert_eq!(diag.code, ErrorCode::E1006);
    assert_eq!(diag.message, "unknown macro `.inclde`");
    assert_eq!(diag.primary_span(), Some(Span::new(0, 7)));
    assert_eq!(diag.notes, vec!["registered macros: include".to_owned()]);
}

#[test]
fn test_default_message_is_description() {
    let diag = Diagnostic::error(ErrorCode::E1005);
    assert_eq!(diag.message, "nesting too deep");
    assert_eq!(diag.primary_span(), None);
}

#[test]
fn test_display_format() {
    let diag = unexpected_token(Span::new(4, 5), "a value", "`}`");
    assert_eq!(diag.to_string(), "error[E1001]: expected a value, found `}`");
}

#[test]
fn test_unclosed_delimiter_labels() {
    let diag = unclosed_delimiter(Span::new(6, 7), Span::point(20), '{');
    assert_eq!(diag.primary_span(), Some(Span::point(20)));
    assert_eq!(diag.labels.len(), 2);
    assert!(!diag.labels[1].is_primary);
    assert_eq!(diag.labels[1].span, Span::new(6, 7));
}
