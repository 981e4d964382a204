use pretty_assertions::assert_eq;
use ucl_ir::Span;

use super::*;

#[test]
fn display_with_location() {
    let diag = Diagnostic::error(ErrorCode::E1002)
        .with_message("expected a value, found `;`")
        .with_label(Span::new(11, 12), "");
    let err = ParseError::new(diag, "a = 1;\nb = ;");
    assert_eq!(err.line_col(), Some((2, 5)));
    assert_eq!(err.to_string(), "2:5: expected a value, found `;`");
    assert_eq!(err.code(), ErrorCode::E1002);
}

#[test]
fn display_without_location() {
    let diag = Diagnostic::error(ErrorCode::E9001).with_message("cannot read `x.conf`");
    let err = ParseError::without_location(diag);
    assert_eq!(err.line_col(), None);
    assert_eq!(err.to_string(), "cannot read `x.conf`");
}
