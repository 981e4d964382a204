//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! allowing the scanner to detect EOF without explicit bounds checking.
//! The total buffer size is rounded up to the next 64-byte boundary, which
//! also provides safe padding for `peek()` and `peek2()` near the end.
//!
//! # Encoding Detection
//!
//! Configuration chunks arrive as raw bytes, so construction validates them:
//! - UTF-8 BOM: accepted, scanning starts after it
//! - UTF-16 BOMs: wrong encoding
//! - invalid UTF-8 sequences
//! - interior null bytes
//!
//! Everything except the UTF-8 BOM is recorded as an [`EncodingIssue`]; the
//! grammar engine turns those into `E0002` diagnostics.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Offset scanning starts at (3 when a UTF-8 BOM is present).
    content_start: u32,
    encoding_issues: Vec<EncodingIssue>,
}

/// Encoding issue detected during source buffer construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    pub kind: EncodingIssueKind,
    /// Byte position in the source where the issue was found.
    pub pos: u32,
    /// Byte length of the problematic sequence.
    pub len: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// UTF-16 Little-Endian BOM (`0xFF 0xFE`) at start.
    Utf16LeBom,
    /// UTF-16 Big-Endian BOM (`0xFE 0xFF`) at start.
    Utf16BeBom,
    /// Byte sequence that is not valid UTF-8.
    InvalidUtf8,
    /// Null byte in source content.
    InteriorNull,
}

impl EncodingIssueKind {
    pub fn message(self) -> &'static str {
        match self {
            EncodingIssueKind::Utf16LeBom => "UTF-16 (little-endian) input is not supported",
            EncodingIssueKind::Utf16BeBom => "UTF-16 (big-endian) input is not supported",
            EncodingIssueKind::InvalidUtf8 => "invalid UTF-8 sequence",
            EncodingIssueKind::InteriorNull => "null byte in input",
        }
    }
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from raw input bytes.
    ///
    /// Inputs larger than `u32::MAX` bytes saturate `len()`; the grammar
    /// engine rejects them before scanning (`E9002`).
    pub fn new(source: &[u8]) -> Self {
        let source_len = source.len();

        // Round up to next 64-byte boundary (minimum: source + 1 sentinel byte).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source);

        let content_start = if source.starts_with(&UTF8_BOM) { 3 } else { 0 };
        let mut encoding_issues = Vec::new();
        detect_encoding_issues(source, &mut encoding_issues);

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
            content_start,
            encoding_issues,
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// The source as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    /// Create a [`Cursor`] positioned at the first content byte.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.content_start, self.source_len)
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Whether the input started with a UTF-8 byte order mark.
    pub fn has_bom(&self) -> bool {
        self.content_start > 0
    }

    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }
}

const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 64);

fn detect_encoding_issues(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    if detect_utf16_bom(source, issues) {
        // Everything after a UTF-16 BOM is noise; one issue is enough.
        return;
    }
    detect_invalid_utf8(source, issues);
    detect_interior_nulls(source, issues);
}

fn detect_utf16_bom(source: &[u8], issues: &mut Vec<EncodingIssue>) -> bool {
    let kind = match source {
        [0xFF, 0xFE, ..] => EncodingIssueKind::Utf16LeBom,
        [0xFE, 0xFF, ..] => EncodingIssueKind::Utf16BeBom,
        _ => return false,
    };
    issues.push(EncodingIssue {
        kind,
        pos: 0,
        len: 2,
    });
    true
}

fn detect_invalid_utf8(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    let mut offset = 0;
    while offset < source.len() {
        let Err(err) = std::str::from_utf8(&source[offset..]) else {
            return;
        };
        let absolute = offset + err.valid_up_to();
        let len = err.error_len().unwrap_or(source.len() - absolute);
        if let Ok(pos) = u32::try_from(absolute) {
            issues.push(EncodingIssue {
                kind: EncodingIssueKind::InvalidUtf8,
                pos,
                len: u32::try_from(len).unwrap_or(1),
            });
        }
        offset = absolute + len.max(1);
    }
}

/// Detect null bytes within the source content with `memchr`.
fn detect_interior_nulls(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    for absolute in memchr::memchr_iter(0, source) {
        if let Ok(pos) = u32::try_from(absolute) {
            issues.push(EncodingIssue {
                kind: EncodingIssueKind::InteriorNull,
                pos,
                len: 1,
            });
        }
    }
}
