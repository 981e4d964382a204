//! Low-level UCL tokenizer.
//!
//! Three layers, each usable on its own:
//!
//! - [`SourceBuffer`]: owns the input bytes followed by a `0x00` sentinel and
//!   zero padding, and records encoding problems found at construction.
//! - [`Cursor`]: a `Copy` byte cursor over that buffer; EOF is the sentinel.
//! - [`RawScanner`]: turns the cursor into `(RawTag, len)` pairs, and isolates
//!   the raw argument of a macro directive without interpreting it.
//!
//! Nothing here allocates per token or decodes escapes; the grammar engine
//! (`ucl_parse`) does that.

mod cursor;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use raw_scanner::{MacroArgKind, MacroArgument, RawScanner};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
pub use tag::{RawTag, RawToken};
