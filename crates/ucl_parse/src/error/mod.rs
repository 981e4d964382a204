//! Parse error type.

use std::fmt;

use ucl_diagnostic::{Diagnostic, ErrorCode, LineIndex};

/// A failed chunk.
///
/// Carries the full [`Diagnostic`] plus the resolved 1-based line/column of
/// its primary span, so callers without the source can still point at it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    diagnostic: Diagnostic,
    location: Option<(u32, u32)>,
}

impl ParseError {
    /// Resolve `diagnostic` against the chunk it came from.
    pub fn new(diagnostic: Diagnostic, source: &str) -> Self {
        Self::from_bytes(diagnostic, source.as_bytes())
    }

    /// Resolve `diagnostic` against raw chunk bytes, which need not be
    /// valid UTF-8.
    pub fn from_bytes(diagnostic: Diagnostic, source: &[u8]) -> Self {
        let location = diagnostic.primary_span().map(|span| {
            let index = LineIndex::from_bytes(source);
            index.line_col_bytes(source, span.start)
        });
        ParseError {
            diagnostic,
            location,
        }
    }

    /// An error with no source location (I/O, oversized input).
    pub fn without_location(diagnostic: Diagnostic) -> Self {
        ParseError {
            diagnostic,
            location: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.diagnostic.code
    }

    pub fn message(&self) -> &str {
        &self.diagnostic.message
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// 1-based (line, column) of the error, if it has a location.
    pub fn line_col(&self) -> Option<(u32, u32)> {
        self.location
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some((line, col)) => write!(f, "{line}:{col}: {}", self.diagnostic.message),
            None => f.write_str(&self.diagnostic.message),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests;
