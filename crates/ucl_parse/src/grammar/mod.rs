//! Recursive-descent grammar engine.
//!
//! Drives a [`RawScanner`] over one chunk and builds members directly into
//! the parser's root [`ObjectMap`]. The scanner is `Copy`, so lookahead is a
//! snapshot: copy it, scan, and either keep the copy or drop it.
//!
//! Macro directives are dispatched here, synchronously, in document order.
//! A handler runs before anything after its directive is scanned.

use tracing::{debug, trace};
use ucl_diagnostic::{unclosed_delimiter, unexpected_token, Diagnostic, ErrorCode};
use ucl_ir::{Object, ObjectMap, Span, Value};
use ucl_lexer_core::{MacroArgKind, RawScanner, RawTag, SourceBuffer};

use crate::atom::{heredoc_body, parse_atom, unescape_double, unescape_single};
use crate::macros::MacroTable;
use crate::stack::ensure_sufficient_stack;
use crate::ParserFlags;

/// Deepest object/array nesting accepted in one chunk.
pub(crate) const MAX_DEPTH: u32 = 512;

type PResult<T> = Result<T, Diagnostic>;

/// A scanned token with its absolute span.
#[derive(Copy, Clone, Debug)]
struct Token {
    tag: RawTag,
    span: Span,
}

/// Parse one chunk into `root`.
///
/// On error `root` may hold the members parsed before the failure.
#[tracing::instrument(level = "trace", skip_all, fields(len = buffer.len()))]
pub(crate) fn parse_chunk(
    buffer: &SourceBuffer,
    flags: ParserFlags,
    macros: &MacroTable,
    root: &mut ObjectMap,
) -> PResult<()> {
    let mut grammar = Grammar {
        scanner: RawScanner::new(buffer.cursor()),
        flags,
        macros,
        depth: 0,
    };
    grammar.document(root)
}

/// Parser state for one chunk. `Copy`, so a clone is a lookahead probe.
#[derive(Clone, Copy)]
struct Grammar<'src, 'p> {
    scanner: RawScanner<'src>,
    flags: ParserFlags,
    macros: &'p MacroTable,
    depth: u32,
}

impl<'src> Grammar<'src, '_> {
    // ─── Token Access ────────────────────────────────────────────────

    fn bump(&mut self) -> Token {
        let start = self.scanner.pos();
        let raw = self.scanner.next_token();
        Token {
            tag: raw.tag,
            span: Span::new(start, start + raw.len),
        }
    }

    fn bump_value(&mut self) -> Token {
        let start = self.scanner.pos();
        let raw = self.scanner.next_value_token();
        Token {
            tag: raw.tag,
            span: Span::new(start, start + raw.len),
        }
    }

    fn peek(&self) -> Token {
        let mut probe = *self;
        probe.bump()
    }

    fn peek_value(&self) -> Token {
        let mut probe = *self;
        probe.bump_value()
    }

    /// Skip whitespace and comments, and newlines when `newlines` is set.
    fn skip_trivia(&mut self, newlines: bool) {
        loop {
            let mut probe = self.scanner;
            let tag = probe.next_token().tag;
            let skip = match tag {
                RawTag::Newline => newlines,
                tag => tag.is_trivia(),
            };
            if !skip {
                return;
            }
            self.scanner = probe;
        }
    }

    fn bytes(&self, span: Span) -> &'src [u8] {
        self.scanner.cursor().slice(span.start, span.end)
    }

    /// The text of `span`. Chunks are not validated up front, so this is
    /// where invalid UTF-8 in keys and values is caught.
    fn text(&self, span: Span) -> PResult<&'src str> {
        std::str::from_utf8(self.bytes(span)).map_err(|err| {
            let start = span.start + offset_u32(err.valid_up_to());
            let len = err.error_len().map_or(span.end - start, offset_u32);
            Diagnostic::error(ErrorCode::E0002)
                .with_message("invalid UTF-8 sequence")
                .with_label(Span::new(start, start + len), "")
        })
    }

    /// How a token reads in "found ..." messages.
    fn describe(&self, token: Token) -> String {
        match token.tag {
            RawTag::Atom | RawTag::Directive => match self.text(token.span) {
                Ok(text) if text.len() <= 32 => format!("`{text}`"),
                _ => token.tag.name().to_owned(),
            },
            tag => match tag.lexeme() {
                Some(lexeme) => format!("`{lexeme}`"),
                None => tag.name().to_owned(),
            },
        }
    }

    // ─── Document & Members ──────────────────────────────────────────

    fn document(&mut self, root: &mut ObjectMap) -> PResult<()> {
        self.skip_trivia(true);
        let first = self.peek();
        if first.tag != RawTag::LeftBrace {
            return self.members(root, None);
        }
        self.bump();
        self.members(root, Some(first.span))?;
        self.skip_trivia(true);
        let trailing = self.peek();
        match trailing.tag {
            RawTag::Eof => Ok(()),
            _ => Err(unexpected_token(
                trailing.span,
                "end of input",
                &self.describe(trailing),
            )),
        }
    }

    /// Members until `}` (when `open` is set) or end of input.
    fn members(&mut self, map: &mut ObjectMap, open: Option<Span>) -> PResult<()> {
        loop {
            self.skip_trivia(true);
            let token = self.peek();
            match token.tag {
                RawTag::Eof => {
                    return match open {
                        Some(open) => Err(unclosed_delimiter(open, token.span, '{')),
                        None => Ok(()),
                    };
                }
                RawTag::RightBrace if open.is_some() => {
                    self.bump();
                    return Ok(());
                }
                RawTag::Directive => self.directive()?,
                tag if tag.is_key_like() => self.pair(map)?,
                tag if tag.is_error() => return Err(self.scan_error(token)),
                _ => {
                    return Err(Diagnostic::error(ErrorCode::E1004)
                        .with_message(format!("expected a key, found {}", self.describe(token)))
                        .with_label(token.span, "expected a key"));
                }
            }
        }
    }

    fn pair(&mut self, map: &mut ObjectMap) -> PResult<()> {
        let key_token = self.bump();
        let key = self.key_text(key_token)?;
        trace!(key = %key, "pair");
        self.skip_trivia(false);

        let next = self.peek();
        let value = match next.tag {
            RawTag::Equal | RawTag::Colon => {
                self.bump();
                self.skip_trivia(true);
                self.value()?
            }
            tag if tag.is_key_like() => {
                if let Some(names) = self.section_names()? {
                    return self.section(map, &key, names);
                }
                self.value()?
            }
            _ => self.value()?,
        };
        map.insert(key, value);
        self.end_of_value();
        Ok(())
    }

    /// Collect `"a" "b"` in `key "a" "b" { ... }`.
    ///
    /// Returns `None` (with the scanner restored) unless the run of names
    /// ends at `{` on the same line.
    fn section_names(&mut self) -> PResult<Option<Vec<String>>> {
        let snapshot = self.scanner;
        let mut names = Vec::new();
        loop {
            let token = self.peek();
            if !token.tag.is_key_like() {
                break;
            }
            self.bump();
            names.push(self.key_text(token)?);
            self.skip_trivia(false);
            if self.peek().tag == RawTag::LeftBrace {
                return Ok(Some(names));
            }
        }
        self.scanner = snapshot;
        Ok(None)
    }

    /// `key n1 n2 { body }` stores `body` at `key.n1.n2`, reusing existing
    /// objects for every level but the last.
    fn section(&mut self, map: &mut ObjectMap, key: &str, names: Vec<String>) -> PResult<()> {
        let open = self.bump();
        let body = self.object_body(open.span)?;
        let mut target = map.section_mut(key);
        let mut names = names.into_iter().peekable();
        while let Some(name) = names.next() {
            if names.peek().is_none() {
                target.insert(name, Object::new(Value::Object(body)));
                break;
            }
            target = target.section_mut(&name);
        }
        self.end_of_value();
        Ok(())
    }

    fn key_text(&self, token: Token) -> PResult<String> {
        let key = match token.tag {
            RawTag::DoubleString => self.double_string(token)?,
            RawTag::SingleString => unescape_single(self.text(string_body(token.span))?),
            _ => self.text(token.span)?.to_owned(),
        };
        if self.flags.contains(ParserFlags::KEY_LOWERCASE) {
            Ok(key.to_lowercase())
        } else {
            Ok(key)
        }
    }

    /// Optional `;` or `,` after a value on the same line.
    fn end_of_value(&mut self) {
        self.skip_trivia(false);
        if matches!(self.peek().tag, RawTag::Semicolon | RawTag::Comma) {
            self.bump();
        }
    }

    // ─── Values ──────────────────────────────────────────────────────

    fn value(&mut self) -> PResult<Object> {
        let token = self.bump_value();
        let value = match token.tag {
            RawTag::LeftBrace => Value::Object(self.object_body(token.span)?),
            RawTag::LeftBracket => Value::Array(self.array_body(token.span)?),
            RawTag::DoubleString => Value::String(self.double_string(token)?),
            RawTag::SingleString => {
                Value::String(unescape_single(self.text(string_body(token.span))?))
            }
            RawTag::Heredoc => Value::String(heredoc_body(self.text(token.span)?).to_owned()),
            RawTag::Atom => parse_atom(self.text(token.span)?, self.flags).map_err(|_| {
                Diagnostic::error(ErrorCode::E0003)
                    .with_message("integer literal out of range for a 64-bit integer")
                    .with_label(token.span, "does not fit in i64")
            })?,
            tag if tag.is_error() => return Err(self.scan_error(token)),
            _ => {
                return Err(Diagnostic::error(ErrorCode::E1002)
                    .with_message(format!(
                        "expected a value, found {}",
                        self.describe(token)
                    ))
                    .with_label(token.span, "expected a value"));
            }
        };
        Ok(Object::new(value))
    }

    fn double_string(&self, token: Token) -> PResult<String> {
        let body = string_body(token.span);
        unescape_double(self.text(body)?).map_err(|err| {
            let start = body.start + offset_u32(err.offset);
            Diagnostic::error(ErrorCode::E0004)
                .with_message(err.message)
                .with_label(Span::new(start, start + offset_u32(err.len)), "")
        })
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(&mut self, open: Span, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= MAX_DEPTH {
            return Err(Diagnostic::error(ErrorCode::E1005)
                .with_message(format!("nesting exceeds {MAX_DEPTH} levels"))
                .with_label(open, "too deeply nested"));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    fn object_body(&mut self, open: Span) -> PResult<ObjectMap> {
        self.nested(open, |g| {
            let mut map = ObjectMap::new();
            g.members(&mut map, Some(open))?;
            Ok(map)
        })
    }

    fn array_body(&mut self, open: Span) -> PResult<Vec<Object>> {
        self.nested(open, |g| {
            let mut items = Vec::new();
            loop {
                g.skip_trivia(true);
                let token = g.peek_value();
                match token.tag {
                    RawTag::RightBracket => {
                        g.bump_value();
                        return Ok(items);
                    }
                    RawTag::Eof => return Err(unclosed_delimiter(open, token.span, '[')),
                    _ => items.push(g.value()?),
                }

                g.skip_trivia(true);
                let sep = g.peek_value();
                match sep.tag {
                    RawTag::Comma => {
                        g.bump_value();
                    }
                    RawTag::RightBracket => {}
                    RawTag::Eof => return Err(unclosed_delimiter(open, sep.span, '[')),
                    _ => {
                        return Err(unexpected_token(sep.span, "`,` or `]`", &g.describe(sep)));
                    }
                }
            }
        })
    }

    // ─── Directives ──────────────────────────────────────────────────

    /// `.name argument`: call the registered handler once with the raw
    /// argument bytes.
    fn directive(&mut self) -> PResult<()> {
        let token = self.bump();
        let name = self.text(Span::new(token.span.start + 1, token.span.end))?;

        if self.scanner.peek_byte() == b'(' {
            return Err(Diagnostic::error(ErrorCode::E1001)
                .with_message(format!("macro `.{name}` does not take parameters"))
                .with_label(Span::new(token.span.end, token.span.end + 1), "parameter list here")
                .with_note("write the argument directly after the name: `.name \"value\"`"));
        }

        let Some(entry) = self.macros.get(name) else {
            let mut diag = Diagnostic::error(ErrorCode::E1006)
                .with_message(format!("unknown macro `.{name}`"))
                .with_label(token.span, "no handler registered for this name");
            let known = self.macros.names();
            if !known.is_empty() {
                diag = diag.with_note(format!("registered macros: {}", known.join(", ")));
            }
            return Err(diag);
        };

        let arg = self.scanner.scan_macro_argument();
        match arg.kind {
            MacroArgKind::UnterminatedString => {
                return Err(Diagnostic::error(ErrorCode::E0001)
                    .with_message("unterminated macro argument")
                    .with_label(Span::new(arg.open, arg.end), "missing closing quote"));
            }
            MacroArgKind::UnclosedBrace => {
                return Err(unclosed_delimiter(
                    Span::new(arg.open, arg.open + 1),
                    Span::point(arg.end),
                    '{',
                ));
            }
            _ => {}
        }

        let data = self.bytes(Span::new(arg.start, arg.end));
        debug!(name, len = data.len(), "calling macro handler");
        let accepted = ensure_sufficient_stack(|| entry.call(data));
        if !accepted {
            debug!(name, "macro handler rejected its argument");
            return Err(Diagnostic::error(ErrorCode::E1007)
                .with_message(format!("macro `.{name}` rejected its argument"))
                .with_label(Span::new(token.span.start, self.scanner.pos()), "rejected here"));
        }
        self.end_of_value();
        Ok(())
    }

    // ─── Scanner Errors ──────────────────────────────────────────────

    fn scan_error(&self, token: Token) -> Diagnostic {
        match token.tag {
            RawTag::UnterminatedString => Diagnostic::error(ErrorCode::E0001)
                .with_label(Span::new(token.span.start, token.span.start + 1), "string starts here")
                .with_note("strings end on the line they start; use a heredoc for multi-line text"),
            RawTag::UnterminatedComment => Diagnostic::error(ErrorCode::E0005)
                .with_label(Span::new(token.span.start, token.span.start + 2), "comment starts here"),
            RawTag::UnterminatedHeredoc => Diagnostic::error(ErrorCode::E0006)
                .with_label(token.span, "no terminator line for this heredoc"),
            _ => {
                let byte = self.bytes(token.span).first().copied().unwrap_or(0);
                Diagnostic::error(ErrorCode::E0002)
                    .with_message(format!("invalid character {:?}", char::from(byte)))
                    .with_label(token.span, "")
            }
        }
    }
}

/// Content of a quoted token, quotes excluded.
fn string_body(span: Span) -> Span {
    Span::new(span.start + 1, span.end.saturating_sub(1).max(span.start + 1))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "offsets within a chunk are bounded by its u32 length"
)]
fn offset_u32(offset: usize) -> u32 {
    offset as u32
}
