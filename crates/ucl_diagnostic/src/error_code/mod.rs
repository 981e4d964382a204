//! Error codes for all parser diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the stage that produced it.

use std::fmt;

/// Error codes for all parser diagnostics.
///
/// Format: E#### where first digit indicates stage:
/// - E0xxx: Scanner errors
/// - E1xxx: Grammar errors
/// - E2xxx: Decode errors
/// - E9xxx: I/O and internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Scanner Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character or encoding in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Invalid escape sequence
    E0004,
    /// Unterminated block comment
    E0005,
    /// Unterminated heredoc
    E0006,

    // Grammar Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected a value
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected a key
    E1004,
    /// Nesting too deep
    E1005,
    /// Unknown macro directive
    E1006,
    /// Macro handler rejected its argument
    E1007,

    // Decode Errors (E2xxx)
    /// Value cannot be decoded into the requested type
    E2001,

    // I/O and Internal Errors (E9xxx)
    /// Input could not be read
    E9001,
    /// Input exceeds the addressable size
    E9002,
}

impl ErrorCode {
    /// All error code variants, for iteration and lookup.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E2001,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// One-line description, used when a diagnostic carries no message.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character or encoding",
            ErrorCode::E0003 => "invalid number literal",
            ErrorCode::E0004 => "invalid escape sequence",
            ErrorCode::E0005 => "unterminated block comment",
            ErrorCode::E0006 => "unterminated heredoc",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected a value",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "expected a key",
            ErrorCode::E1005 => "nesting too deep",
            ErrorCode::E1006 => "unknown macro",
            ErrorCode::E1007 => "macro rejected its argument",
            ErrorCode::E2001 => "value cannot be decoded",
            ErrorCode::E9001 => "input could not be read",
            ErrorCode::E9002 => "input too large",
        }
    }

    pub fn is_scanner_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Errors raised by directive handling rather than by the grammar itself.
    pub fn is_macro_error(&self) -> bool {
        matches!(self, ErrorCode::E1006 | ErrorCode::E1007)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1007"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
