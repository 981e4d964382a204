//! The incremental parser handle.

use std::path::Path;

use tracing::debug;
use ucl_diagnostic::{Diagnostic, ErrorCode};
use ucl_ir::{Object, ObjectMap, Span, Value};
use ucl_lexer_core::{EncodingIssueKind, SourceBuffer};

use crate::grammar;
use crate::macros::{MacroHandler, MacroTable, UserData};
use crate::{ParseError, ParserFlags};

/// Accumulates one or more chunks into a single root object.
///
/// Every chunk adds its members to the same root. The first failing chunk
/// poisons the parser: later calls return the same error and
/// [`object`](Self::object) yields `None`.
///
/// # Example
///
/// ```
/// use ucl_parse::{Parser, ParserFlags};
///
/// let mut parser = Parser::new(ParserFlags::empty());
/// parser.add_string("listen = 80;").unwrap();
/// parser.add_string("listen = 443;").unwrap();
/// let root = parser.object().unwrap();
/// assert_eq!(root.get_all("listen").len(), 2);
/// ```
#[derive(Debug)]
pub struct Parser {
    flags: ParserFlags,
    root: ObjectMap,
    macros: MacroTable,
    chunks: usize,
    error: Option<ParseError>,
}

impl Parser {
    pub fn new(flags: ParserFlags) -> Self {
        Parser {
            flags,
            root: ObjectMap::new(),
            macros: MacroTable::default(),
            chunks: 0,
            error: None,
        }
    }

    pub fn flags(&self) -> ParserFlags {
        self.flags
    }

    /// Bind the directive `.name` to `handler`.
    ///
    /// Registering a name again replaces the earlier handler. Registrations
    /// apply to every chunk added afterwards.
    ///
    /// # Safety
    ///
    /// `handler` must be sound to call with any valid `(data, len)` byte
    /// slice together with `user_data`, on whichever thread drives this
    /// parser, for as long as the parser exists.
    #[allow(unsafe_code, reason = "raw registrations hand a C-ABI callback to the parser")]
    pub unsafe fn register_raw_macro(
        &mut self,
        name: &str,
        handler: MacroHandler,
        user_data: UserData,
    ) {
        debug!(name, ?user_data, "registering macro");
        self.macros.register(name, handler, user_data);
    }

    /// Names with a registered handler, sorted.
    pub fn macro_names(&self) -> Vec<&str> {
        self.macros.names()
    }

    pub fn add_string(&mut self, source: &str) -> Result<(), ParseError> {
        self.add_bytes(source.as_bytes())
    }

    /// Parse one chunk of raw bytes into the root object.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len(), chunk = self.chunks))]
    pub fn add_bytes(&mut self, source: &[u8]) -> Result<(), ParseError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        self.chunks += 1;
        let result = self.parse_chunk(source);
        if let Err(err) = &result {
            debug!(%err, "chunk failed");
            self.error = Some(err.clone());
        }
        result
    }

    /// Read `path` and parse its contents as one chunk.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<(), ParseError> {
        let path = path.as_ref();
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        match std::fs::read(path) {
            Ok(bytes) => self.add_bytes(&bytes),
            Err(io) => {
                let err = ParseError::without_location(
                    Diagnostic::error(ErrorCode::E9001)
                        .with_message(format!("cannot read {}: {io}", path.display())),
                );
                debug!(%err, "file chunk failed");
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn parse_chunk(&mut self, source: &[u8]) -> Result<(), ParseError> {
        if u32::try_from(source.len()).is_err() {
            return Err(ParseError::without_location(
                Diagnostic::error(ErrorCode::E9002)
                    .with_message(format!("input of {} bytes is too large", source.len())),
            ));
        }

        let buffer = SourceBuffer::new(source);
        // Invalid UTF-8 is reported where text is built (keys, strings,
        // atoms); directive arguments may carry arbitrary bytes.
        let blocking = buffer
            .encoding_issues()
            .iter()
            .filter(|i| i.kind != EncodingIssueKind::InvalidUtf8)
            .min_by_key(|i| i.pos);
        if let Some(issue) = blocking {
            let diag = Diagnostic::error(ErrorCode::E0002)
                .with_message(issue.kind.message())
                .with_label(Span::new(issue.pos, issue.pos + issue.len), "");
            return Err(ParseError::from_bytes(diag, source));
        }

        grammar::parse_chunk(&buffer, self.flags, &self.macros, &mut self.root)
            .map_err(|diag| ParseError::from_bytes(diag, source))
    }

    /// The root object, or `None` when no chunk was added or one failed.
    pub fn object(&self) -> Option<Object> {
        self.is_ready()
            .then(|| Object::new(Value::Object(self.root.clone())))
    }

    /// Consume the parser, yielding the root object under the same rules as
    /// [`object`](Self::object).
    pub fn into_object(self) -> Option<Object> {
        if self.is_ready() {
            Some(Object::new(Value::Object(self.root)))
        } else {
            None
        }
    }

    fn is_ready(&self) -> bool {
        self.error.is_none() && self.chunks > 0
    }

    /// The error that poisoned this parser, if any.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(ParserFlags::empty())
    }
}
