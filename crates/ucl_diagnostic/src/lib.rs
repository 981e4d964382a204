//! Diagnostics for the UCL parser.
//!
//! Every failure the scanner or grammar engine reports is a [`Diagnostic`]:
//! - an [`ErrorCode`] for searchability
//! - a message saying what went wrong
//! - a primary span saying where
//! - optional notes
//!
//! [`LineIndex`] resolves byte offsets to 1-based line/column pairs and
//! [`render`] prints a diagnostic against its source the way a terminal
//! user expects:
//!
//! ```text
//! error[E1007]: macro `include` rejected its argument
//!  --> app.conf:3:1
//!   |
//! 3 | .include "missing.conf"
//!   | ^^^^^^^^^^^^^^^^^^^^^^^
//! ```

mod diagnostic;
mod error_code;
mod line_index;
mod render;

pub use diagnostic::{unclosed_delimiter, unexpected_token, Diagnostic, Label};
pub use error_code::ErrorCode;
pub use line_index::LineIndex;
pub use render::render;
