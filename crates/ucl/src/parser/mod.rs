//! Parser handle that owns its macro handlers.

use std::mem;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;
use ucl_ir::Object;
use ucl_macro::{register_with, MacroOutcome, MacroRegistry, MacroToken};
use ucl_parse::{ParseError, ParserFlags};

use crate::Error;

/// A [`ucl_parse::Parser`] whose directives are served by Rust closures.
///
/// Handlers registered through [`register_macro`](Self::register_macro)
/// live in the global [`MacroRegistry`] and are removed when the parser is
/// dropped. After that, any raw registration still pointing at their tokens
/// rejects.
///
/// ```
/// use ucl::{Parser, ParserFlags};
///
/// let mut parser = Parser::new(ParserFlags::empty());
/// parser.register_macro("require", |arg: &[u8]| arg == b"tls");
/// parser.add_string(".require \"tls\"\nport = 443").unwrap();
/// let root = parser.object().unwrap();
/// assert_eq!(root.get("port").and_then(|p| p.to_int()), Some(443));
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    inner: ucl_parse::Parser,
    tokens: Vec<MacroToken>,
}

impl Parser {
    pub fn new(flags: ParserFlags) -> Self {
        Parser {
            inner: ucl_parse::Parser::new(flags),
            tokens: Vec::new(),
        }
    }

    pub fn flags(&self) -> ParserFlags {
        self.inner.flags()
    }

    /// Bind `.name` to `handler`, returning the token it was stored under.
    ///
    /// The handler receives the raw argument bytes (delimiters stripped,
    /// escapes untouched) and returns anything convertible to a
    /// [`MacroOutcome`]: a `bool` or a `Result<(), E>`. It may itself run a
    /// nested parser.
    pub fn register_macro<F, R>(&mut self, name: &str, handler: F) -> MacroToken
    where
        F: Fn(&[u8]) -> R + Send + Sync + 'static,
        R: Into<MacroOutcome>,
    {
        let token = MacroRegistry::global().register(handler);
        register_with(&mut self.inner, name, token);
        self.tokens.push(token);
        debug!(name, %token, "macro bound");
        token
    }

    /// Names with a registered handler, sorted.
    pub fn macro_names(&self) -> Vec<&str> {
        self.inner.macro_names()
    }

    pub fn add_string(&mut self, source: &str) -> Result<(), ParseError> {
        self.inner.add_string(source)
    }

    pub fn add_bytes(&mut self, source: &[u8]) -> Result<(), ParseError> {
        self.inner.add_bytes(source)
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<(), ParseError> {
        self.inner.add_file(path)
    }

    /// The root object, or `None` when nothing was parsed or a chunk failed.
    pub fn object(&self) -> Option<Object> {
        self.inner.object()
    }

    pub fn into_object(mut self) -> Option<Object> {
        mem::take(&mut self.inner).into_object()
    }

    /// The error that poisoned this parser, if any.
    pub fn error(&self) -> Option<&ParseError> {
        self.inner.error()
    }

    /// Decode the parsed document into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if let Some(err) = self.inner.error() {
            return Err(Error::Parse(err.clone()));
        }
        let object = self.inner.object().ok_or(Error::Empty)?;
        Ok(ucl_ir::from_object(&object)?)
    }
}

impl Drop for Parser {
    fn drop(&mut self) {
        let registry = MacroRegistry::global();
        for token in self.tokens.drain(..) {
            registry.remove(token);
        }
    }
}
