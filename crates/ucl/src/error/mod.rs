//! Facade error type.

use ucl_ir::DecodeError;
use ucl_parse::ParseError;

/// Anything [`parse_str`](crate::parse_str) and friends can fail with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The parser was asked for a document before any chunk was added.
    #[error("no document was parsed")]
    Empty,
}

impl Error {
    /// The parse error, when this is one.
    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }
}
