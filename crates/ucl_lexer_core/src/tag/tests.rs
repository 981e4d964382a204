use super::*;

#[test]
fn repr_u8_semantic_ranges() {
    assert_eq!(RawTag::Atom as u8, 0);
    assert_eq!(RawTag::Directive as u8, 4);
    assert_eq!(RawTag::LeftBrace as u8, 32);
    assert_eq!(RawTag::Comma as u8, 41);
    assert_eq!(RawTag::Whitespace as u8, 112);
    assert_eq!(RawTag::BlockComment as u8, 115);
    assert_eq!(RawTag::InvalidByte as u8, 240);
    assert_eq!(RawTag::Eof as u8, 255);
}

#[test]
fn tag_is_one_byte() {
    assert_eq!(std::mem::size_of::<RawTag>(), 1);
}

#[test]
fn punctuation_lexemes() {
    assert_eq!(RawTag::LeftBrace.lexeme(), Some("{"));
    assert_eq!(RawTag::Semicolon.lexeme(), Some(";"));
    assert_eq!(RawTag::Atom.lexeme(), None);
    assert_eq!(RawTag::Eof.lexeme(), None);
}

#[test]
fn classification() {
    assert!(RawTag::Whitespace.is_trivia());
    assert!(RawTag::Newline.is_trivia());
    assert!(RawTag::LineComment.is_trivia());
    assert!(RawTag::BlockComment.is_trivia());
    assert!(!RawTag::Atom.is_trivia());

    assert!(RawTag::UnterminatedString.is_error());
    assert!(RawTag::InteriorNull.is_error());
    assert!(!RawTag::Eof.is_error());

    assert!(RawTag::Atom.is_key_like());
    assert!(RawTag::SingleString.is_key_like());
    assert!(!RawTag::Directive.is_key_like());
}

#[test]
fn names_for_messages() {
    assert_eq!(RawTag::RightBrace.name(), "`}`");
    assert_eq!(RawTag::Eof.name(), "end of input");
    assert_eq!(RawTag::DoubleString.name(), RawTag::SingleString.name());
}
