//! Byte offset to line/column resolution.
//!
//! Builds a table of line-start offsets once per source so every lookup is
//! a binary search instead of a rescan.

/// Pre-computed line offset table.
///
/// ```
/// use ucl_diagnostic::LineIndex;
///
/// let source = "a = 1;\nb = 2;\n";
/// let index = LineIndex::build(source);
///
/// assert_eq!(index.line_col(source, 0), (1, 1));
/// assert_eq!(index.line_col(source, 7), (2, 1));
/// assert_eq!(index.line_col(source, 11), (2, 5));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineIndex {
    /// offsets[0] = 0, offsets[n] = byte after the n-th newline.
    offsets: Vec<u32>,
}

impl LineIndex {
    pub fn build(source: &str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    /// Index raw input that may not be valid UTF-8.
    pub fn from_bytes(source: &[u8]) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            memchr::memchr_iter(b'\n', source)
                .map(|i| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineIndex { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line(&self, offset: u32) -> u32 {
        let idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column). Columns count characters, not bytes.
    pub fn line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        self.line_col_bytes(source.as_bytes(), offset)
    }

    /// [`line_col`](Self::line_col) over raw bytes. Every byte that is not
    /// a UTF-8 continuation byte counts as one column.
    pub fn line_col_bytes(&self, source: &[u8], offset: u32) -> (u32, u32) {
        let line = self.line(offset);
        let start = self.line_start(line).unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len()).max(start);
        let chars = source[start..end]
            .iter()
            .filter(|&&b| (b & 0xC0) != 0x80)
            .count();
        (line, u32::try_from(chars).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Byte offset where `line` (1-based) starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Text of `line` (1-based) without its line terminator.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let start = self.line_start(line)? as usize;
        let end = self
            .line_start(line + 1)
            .map_or(source.len(), |next| next as usize);
        let text = source.get(start..end)?;
        Some(text.trim_end_matches(['\n', '\r']))
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}
