//! Raw token tags.

/// Kind of raw token, one byte wide.
///
/// Discriminants are grouped by range:
/// - 0-15: atoms and literals
/// - 32-47: punctuation
/// - 112-119: trivia
/// - 240-247: errors
/// - 255: EOF
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum RawTag {
    // Atoms & Literals
    /// Unquoted word: a key, or a value such as `80`, `true`, `10s`.
    Atom = 0,
    /// `"..."` with escapes.
    DoubleString = 1,
    /// `'...'`, raw except `\'` and `\\`.
    SingleString = 2,
    /// `<<TAG\n...\nTAG`.
    Heredoc = 3,
    /// `.name`: a macro directive.
    Directive = 4,

    // Punctuation
    LeftBrace = 32,
    RightBrace = 33,
    LeftBracket = 34,
    RightBracket = 35,
    LeftParen = 36,
    RightParen = 37,
    Equal = 38,
    Colon = 39,
    Semicolon = 40,
    Comma = 41,

    // Trivia
    Whitespace = 112,
    Newline = 113,
    /// `# ...` or `// ...` (newline excluded).
    LineComment = 114,
    /// `/* ... */`, possibly nested.
    BlockComment = 115,

    // Errors
    /// Byte that cannot start any token.
    InvalidByte = 240,
    UnterminatedString = 241,
    UnterminatedComment = 242,
    UnterminatedHeredoc = 243,
    InteriorNull = 244,

    Eof = 255,
}

impl RawTag {
    /// Fixed source text for punctuation tags.
    pub fn lexeme(self) -> Option<&'static str> {
        Some(match self {
            RawTag::LeftBrace => "{",
            RawTag::RightBrace => "}",
            RawTag::LeftBracket => "[",
            RawTag::RightBracket => "]",
            RawTag::LeftParen => "(",
            RawTag::RightParen => ")",
            RawTag::Equal => "=",
            RawTag::Colon => ":",
            RawTag::Semicolon => ";",
            RawTag::Comma => ",",
            _ => return None,
        })
    }

    /// Human-readable name for "expected X, found Y" messages.
    pub fn name(self) -> &'static str {
        match self {
            RawTag::Atom => "word",
            RawTag::DoubleString | RawTag::SingleString => "string",
            RawTag::Heredoc => "heredoc",
            RawTag::Directive => "macro directive",
            RawTag::LeftBrace => "`{`",
            RawTag::RightBrace => "`}`",
            RawTag::LeftBracket => "`[`",
            RawTag::RightBracket => "`]`",
            RawTag::LeftParen => "`(`",
            RawTag::RightParen => "`)`",
            RawTag::Equal => "`=`",
            RawTag::Colon => "`:`",
            RawTag::Semicolon => "`;`",
            RawTag::Comma => "`,`",
            RawTag::Whitespace => "whitespace",
            RawTag::Newline => "newline",
            RawTag::LineComment | RawTag::BlockComment => "comment",
            RawTag::InvalidByte => "invalid character",
            RawTag::UnterminatedString => "unterminated string",
            RawTag::UnterminatedComment => "unterminated comment",
            RawTag::UnterminatedHeredoc => "unterminated heredoc",
            RawTag::InteriorNull => "null byte",
            RawTag::Eof => "end of input",
        }
    }

    /// Whitespace, newlines and comments.
    #[inline]
    pub fn is_trivia(self) -> bool {
        (self as u8) >= 112 && (self as u8) < 120
    }

    #[inline]
    pub fn is_error(self) -> bool {
        (self as u8) >= 240 && self != RawTag::Eof
    }

    /// Tokens that can name a key or a section.
    #[inline]
    pub fn is_key_like(self) -> bool {
        matches!(
            self,
            RawTag::Atom | RawTag::DoubleString | RawTag::SingleString
        )
    }
}

/// A `(tag, length)` pair; the start offset is tracked by the caller.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

#[cfg(test)]
mod tests;
