//! Grammar engine for the UCL configuration language.
//!
//! A [`Parser`] takes one or more chunks (strings, byte slices or files) and
//! builds a single root [`ucl_ir::Object`]. Macro directives (`.name arg`)
//! are dispatched to C-ABI handlers registered with
//! [`Parser::register_raw_macro`]; each handler sees the raw argument bytes
//! and decides whether the parse continues.
//!
//! # Pipeline
//!
//! ```text
//! bytes -> SourceBuffer -> RawScanner -> grammar -> ObjectMap (root)
//!                                           |
//!                                           +-> MacroHandler(data, len, user_data)
//! ```
//!
//! Errors are [`ParseError`]s wrapping a [`ucl_diagnostic::Diagnostic`].

mod atom;
mod error;
mod flags;
mod grammar;
mod macros;
mod parser;
mod stack;

pub use error::ParseError;
pub use flags::ParserFlags;
pub use macros::{MacroHandler, UserData};
pub use parser::Parser;

/// Deepest object/array nesting a chunk may use.
pub const MAX_DEPTH: u32 = grammar::MAX_DEPTH;
