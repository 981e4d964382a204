//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! The scanner runs in two modes, chosen per call by the grammar engine:
//!
//! - key mode ([`next_token`](RawScanner::next_token)): atoms are restricted
//!   to key characters and `.name` is a macro directive.
//! - value mode ([`next_value_token`](RawScanner::next_value_token)): atoms
//!   run to the end of the value (inner spaces included, trailing spaces
//!   excluded) and `<<TAG` opens a heredoc.
//!
//! Comments (`#`, `//`, `/* */`) only start at a token boundary, so
//! `url = http://example.org/#top` is a single atom.
//!
//! [`scan_macro_argument`](RawScanner::scan_macro_argument) isolates the
//! raw argument of a directive. It never decodes escapes.

use crate::cursor::Cursor;
use crate::tag::{RawTag, RawToken};

/// Pure, allocation-free scanner (heredoc terminators aside).
///
/// `Copy`, so the grammar engine can snapshot it for lookahead.
#[derive(Clone, Copy, Debug)]
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
}

/// How a macro argument was delimited.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MacroArgKind {
    /// `"..."`; content excludes the quotes.
    DoubleQuoted,
    /// `'...'`; content excludes the quotes.
    SingleQuoted,
    /// `{...}`; content excludes the outer braces.
    Braced,
    /// Unquoted run of bytes. May be empty.
    Atom,
    /// Quoted argument with no closing quote on its line.
    UnterminatedString,
    /// Braced argument with no matching `}` before EOF.
    UnclosedBrace,
}

/// Location of a macro argument's content within the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MacroArgument {
    pub kind: MacroArgKind,
    /// First content byte.
    pub start: u32,
    /// One past the last content byte.
    pub end: u32,
    /// Offset of the opening delimiter (equal to `start` for atoms).
    pub open: u32,
}

impl MacroArgument {
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self.kind,
            MacroArgKind::UnterminatedString | MacroArgKind::UnclosedBrace
        )
    }
}

impl<'a> RawScanner<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self { cursor }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// The underlying cursor, for slicing token text.
    #[inline]
    pub fn cursor(&self) -> Cursor<'a> {
        self.cursor
    }

    /// Byte at the current position without consuming it.
    #[inline]
    pub fn peek_byte(&self) -> u8 {
        self.cursor.current()
    }

    /// Produce the next token in key mode.
    ///
    /// Returns `RawTag::Eof` with `len == 0` when the source is exhausted,
    /// and keeps returning it.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        if let Some(token) = self.common(start) {
            return token;
        }
        match self.cursor.current() {
            b'.' if is_directive_byte(self.cursor.peek()) => self.directive(start),
            b if is_key_byte(b) => self.key_atom(start),
            _ => self.invalid_byte(start),
        }
    }

    /// Produce the next token in value mode.
    pub fn next_value_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        if self.cursor.current() == b'<' && self.cursor.peek() == b'<' {
            return self.heredoc_or_atom(start);
        }
        match self.common(start) {
            Some(token) => token,
            None => self.value_atom(start),
        }
    }

    /// Tokens shared by both modes. `None` means "an atom starts here".
    fn common(&mut self, start: u32) -> Option<RawToken> {
        let token = match self.cursor.current() {
            0 => self.eof(),
            b' ' | b'\t' => self.whitespace(start),
            b'\r' => self.carriage_return(start),
            b'\n' => self.single(start, RawTag::Newline),
            b'#' => self.line_comment(start),
            b'/' if self.cursor.peek() == b'/' => self.line_comment(start),
            b'/' if self.cursor.peek() == b'*' => self.block_comment(start),
            b'"' => self.string(start, b'"', RawTag::DoubleString),
            b'\'' => self.string(start, b'\'', RawTag::SingleString),
            b'{' => self.single(start, RawTag::LeftBrace),
            b'}' => self.single(start, RawTag::RightBrace),
            b'[' => self.single(start, RawTag::LeftBracket),
            b']' => self.single(start, RawTag::RightBracket),
            b'(' => self.single(start, RawTag::LeftParen),
            b')' => self.single(start, RawTag::RightParen),
            b'=' => self.single(start, RawTag::Equal),
            b':' => self.single(start, RawTag::Colon),
            b';' => self.single(start, RawTag::Semicolon),
            b',' => self.single(start, RawTag::Comma),
            _ => return None,
        };
        Some(token)
    }

    #[inline]
    fn token(&self, tag: RawTag, start: u32) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    #[inline]
    fn single(&mut self, start: u32, tag: RawTag) -> RawToken {
        self.cursor.advance();
        self.token(tag, start)
    }

    // ─── EOF & Trivia ────────────────────────────────────────────────

    fn eof(&mut self) -> RawToken {
        if self.cursor.is_eof() {
            RawToken {
                tag: RawTag::Eof,
                len: 0,
            }
        } else {
            // Interior null: already reported by SourceBuffer.
            let start = self.cursor.pos();
            self.cursor.advance();
            self.token(RawTag::InteriorNull, start)
        }
    }

    fn whitespace(&mut self, start: u32) -> RawToken {
        self.cursor.eat_whitespace();
        self.token(RawTag::Whitespace, start)
    }

    fn carriage_return(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        if self.cursor.current() == b'\n' {
            self.cursor.advance();
        }
        self.token(RawTag::Newline, start)
    }

    fn line_comment(&mut self, start: u32) -> RawToken {
        self.cursor.eat_until_newline_or_eof();
        self.token(RawTag::LineComment, start)
    }

    fn block_comment(&mut self, start: u32) -> RawToken {
        self.cursor.advance_n(2);
        let mut depth = 1u32;
        loop {
            match self.cursor.skip_to_comment_delim() {
                b'*' if self.cursor.peek() == b'/' => {
                    self.cursor.advance_n(2);
                    depth -= 1;
                    if depth == 0 {
                        return self.token(RawTag::BlockComment, start);
                    }
                }
                b'/' if self.cursor.peek() == b'*' => {
                    self.cursor.advance_n(2);
                    depth += 1;
                }
                0 => return self.token(RawTag::UnterminatedComment, start),
                _ => self.cursor.advance(),
            }
        }
    }

    // ─── Atoms ───────────────────────────────────────────────────────

    fn directive(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        self.cursor.eat_while(is_directive_byte);
        self.token(RawTag::Directive, start)
    }

    fn key_atom(&mut self, start: u32) -> RawToken {
        self.cursor.eat_while(is_key_byte);
        self.token(RawTag::Atom, start)
    }

    fn value_atom(&mut self, start: u32) -> RawToken {
        loop {
            self.cursor
                .eat_while(|b| !is_value_end(b) && b != b' ' && b != b'\t');
            let before_space = self.cursor;
            self.cursor.eat_whitespace();
            if self.cursor.pos() == before_space.pos()
                || is_value_end(self.cursor.current())
                || self.at_comment_start()
            {
                self.cursor = before_space;
                return self.token(RawTag::Atom, start);
            }
        }
    }

    fn invalid_byte(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        self.token(RawTag::InvalidByte, start)
    }

    fn at_comment_start(&self) -> bool {
        match self.cursor.current() {
            b'#' => true,
            b'/' => matches!(self.cursor.peek(), b'/' | b'*'),
            _ => false,
        }
    }

    // ─── Strings ─────────────────────────────────────────────────────

    fn string(&mut self, start: u32, quote: u8, tag: RawTag) -> RawToken {
        self.cursor.advance();
        loop {
            match self.cursor.skip_to_string_delim(quote) {
                b if b == quote => {
                    self.cursor.advance();
                    return self.token(tag, start);
                }
                b'\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_eof() {
                        self.cursor.advance();
                    }
                }
                b'\n' | b'\r' | 0 => return self.token(RawTag::UnterminatedString, start),
                _ => self.cursor.advance(),
            }
        }
    }

    /// `<<TAG` immediately followed by a newline opens a heredoc closed by a
    /// line consisting of `TAG`. Anything else is an ordinary value atom.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "heredoc tags and offsets are bounded by source_len which fits in u32"
    )]
    fn heredoc_or_atom(&mut self, start: u32) -> RawToken {
        let mut probe = self.cursor;
        probe.advance_n(2);
        let tag_start = probe.pos();
        probe.eat_while(|b| b.is_ascii_uppercase());
        let tag = probe.slice_from(tag_start);
        if tag.is_empty() || probe.current() != b'\n' {
            return self.value_atom(start);
        }
        probe.advance();

        let tag_len = tag.len() as u32;
        if probe.starts_with(tag) && is_heredoc_end(&probe, tag_len) {
            probe.advance_n(tag_len);
            self.cursor = probe;
            return self.token(RawTag::Heredoc, start);
        }

        let mut needle = Vec::with_capacity(tag.len() + 1);
        needle.push(b'\n');
        needle.extend_from_slice(tag);
        while let Some(offset) = probe.find(&needle) {
            probe.advance_n(offset as u32 + 1);
            if is_heredoc_end(&probe, tag_len) {
                probe.advance_n(tag_len);
                self.cursor = probe;
                return self.token(RawTag::Heredoc, start);
            }
        }
        self.cursor.seek_end();
        self.token(RawTag::UnterminatedHeredoc, start)
    }

    // ─── Macro Arguments ─────────────────────────────────────────────

    /// Isolate the argument following a directive name.
    ///
    /// Leading spaces and tabs are skipped; a newline, terminator or comment
    /// right after the name yields an empty atom. The cursor ends after the
    /// argument's closing delimiter, if any.
    pub fn scan_macro_argument(&mut self) -> MacroArgument {
        self.cursor.eat_whitespace();
        let open = self.cursor.pos();
        match self.cursor.current() {
            q @ (b'"' | b'\'') => self.quoted_argument(open, q),
            b'{' => self.braced_argument(open),
            _ if self.at_comment_start() => MacroArgument {
                kind: MacroArgKind::Atom,
                start: open,
                end: open,
                open,
            },
            _ => {
                self.cursor.eat_while(|b| {
                    !matches!(
                        b,
                        0 | b' ' | b'\t' | b'\n' | b'\r' | b';' | b',' | b'}' | b']'
                    )
                });
                MacroArgument {
                    kind: MacroArgKind::Atom,
                    start: open,
                    end: self.cursor.pos(),
                    open,
                }
            }
        }
    }

    fn quoted_argument(&mut self, open: u32, quote: u8) -> MacroArgument {
        self.cursor.advance();
        let start = self.cursor.pos();
        loop {
            match self.cursor.skip_to_string_delim(quote) {
                b if b == quote => {
                    let end = self.cursor.pos();
                    self.cursor.advance();
                    let kind = if quote == b'"' {
                        MacroArgKind::DoubleQuoted
                    } else {
                        MacroArgKind::SingleQuoted
                    };
                    return MacroArgument {
                        kind,
                        start,
                        end,
                        open,
                    };
                }
                b'\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_eof() {
                        self.cursor.advance();
                    }
                }
                b'\n' | b'\r' | 0 => {
                    return MacroArgument {
                        kind: MacroArgKind::UnterminatedString,
                        start,
                        end: self.cursor.pos(),
                        open,
                    }
                }
                _ => self.cursor.advance(),
            }
        }
    }

    fn braced_argument(&mut self, open: u32) -> MacroArgument {
        self.cursor.advance();
        let start = self.cursor.pos();
        let mut depth = 1u32;
        loop {
            match self.cursor.current() {
                0 if self.cursor.is_eof() => {
                    return MacroArgument {
                        kind: MacroArgKind::UnclosedBrace,
                        start,
                        end: self.cursor.pos(),
                        open,
                    }
                }
                b'{' => {
                    depth += 1;
                    self.cursor.advance();
                }
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        let end = self.cursor.pos();
                        self.cursor.advance();
                        return MacroArgument {
                            kind: MacroArgKind::Braced,
                            start,
                            end,
                            open,
                        };
                    }
                    self.cursor.advance();
                }
                q @ (b'"' | b'\'') => self.skip_raw_string(q),
                _ => self.cursor.advance(),
            }
        }
    }

    /// Skip a quoted string inside a braced argument. Newlines are allowed;
    /// EOF ends the string and is then reported by the caller.
    fn skip_raw_string(&mut self, quote: u8) {
        self.cursor.advance();
        while !self.cursor.is_eof() {
            let b = self.cursor.current();
            self.cursor.advance();
            if b == b'\\' {
                if !self.cursor.is_eof() {
                    self.cursor.advance();
                }
            } else if b == quote {
                return;
            }
        }
    }
}

/// Bytes allowed in unquoted keys. Non-ASCII bytes are accepted so UTF-8
/// keys need no quoting.
#[inline]
fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(b, b'_' | b'.' | b'/' | b'@' | b'$' | b'-' | b'+')
        || b >= 0x80
}

#[inline]
fn is_directive_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Bytes that end a value atom regardless of what precedes them.
#[inline]
fn is_value_end(b: u8) -> bool {
    matches!(
        b,
        0 | b'\n' | b'\r' | b';' | b',' | b'{' | b'}' | b'[' | b']'
    )
}

/// Whether the `TAG` at the probe's position ends its line.
fn is_heredoc_end(probe: &Cursor<'_>, tag_len: u32) -> bool {
    let mut after = *probe;
    after.advance_n(tag_len);
    after.is_eof()
        || matches!(
            after.current(),
            b'\n' | b'\r' | b';' | b',' | b'}' | b']' | b' ' | b'\t'
        )
}
