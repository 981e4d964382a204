//! Zero-cost cursor over a sentinel-terminated buffer.
//!
//! EOF is detected when the current byte equals the sentinel (`0x00`) and
//! the position has reached the source length. A null at `pos < source_len`
//! is an interior null, reported separately by [`SourceBuffer`](crate::SourceBuffer).

/// Returns the earliest (minimum) of two optional positions.
///
/// Combines separate memchr results when a search needs more needles than
/// `memchr3` supports.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Zero-cost cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], enabling cheap state snapshots for backtracking.
///
/// # Invariant
///
/// `buf[source_len] == 0x00`, and all bytes after it are `0x00`.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], start: u32, source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        debug_assert!(start <= source_len);
        Self {
            buf,
            pos: start,
            source_len,
        }
    }

    /// Returns the byte at the current position, `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe at any position up to EOF: the padding guarantees valid reads.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` if the cursor has reached EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Source bytes in `start..end`.
    pub fn slice(&self, start: u32, end: u32) -> &'a [u8] {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds source length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        &self.buf[start as usize..end as usize]
    }

    /// Source bytes from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a [u8] {
        self.slice(start, self.pos)
    }

    /// Source bytes from the current position to EOF.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos as usize..self.source_len as usize]
    }

    /// Whether the remaining input starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false` so the sentinel terminates the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Advance to the next `\n` byte or EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        match memchr::memchr(b'\n', self.rest()) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Advance past ordinary string content to the next interesting byte
    /// (`quote`, `\`, `\n` or `\r`). Returns the byte found, or 0 for EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        let remaining = self.rest();
        let primary = memchr::memchr3(quote, b'\\', b'\n', remaining);
        let cr = memchr::memchr(b'\r', remaining);

        if let Some(off) = earliest_of(primary, cr) {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Advance to the next `/` or `*`, the only bytes that matter inside a
    /// block comment. Returns the byte found, or 0 for EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_comment_delim(&mut self) -> u8 {
        if let Some(off) = memchr::memchr2(b'/', b'*', self.rest()) {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Offset (relative to the current position) of the next occurrence of
    /// `needle`, without moving.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        memchr::memmem::find(self.rest(), needle)
    }

    /// Advance past horizontal whitespace (spaces and tabs).
    #[inline]
    pub fn eat_whitespace(&mut self) {
        loop {
            let b = self.buf[self.pos as usize];
            if b == b' ' || b == b'\t' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Advance until `byte` is found or EOF is reached.
    ///
    /// Returns the number of bytes consumed. Interior null bytes are skipped.
    pub fn eat_until(&mut self, byte: u8) -> u32 {
        let start = self.pos;
        loop {
            let b = self.buf[self.pos as usize];
            if b == byte {
                break;
            }
            if b == 0 && self.pos >= self.source_len {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    /// Move to EOF.
    pub fn seek_end(&mut self) {
        self.pos = self.source_len;
    }
}
