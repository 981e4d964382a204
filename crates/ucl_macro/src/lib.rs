//! Macro directives backed by host handlers.
//!
//! The grammar engine only knows C-ABI handlers with one opaque user-data
//! slot. This crate lets ordinary Rust closures serve as directive handlers:
//!
//! - a [`MacroRegistry`] maps integer [`MacroToken`]s to handlers;
//! - the token travels through the parser's user-data slot;
//! - a single trampoline ([`ucl_macro_trampoline`]) decodes it and calls
//!   the handler, coercing the result fail-closed.
//!
//! ```
//! use ucl_macro::{register_with, MacroRegistry};
//! use ucl_parse::{Parser, ParserFlags};
//!
//! let token = MacroRegistry::global().register(|arg: &[u8]| arg == b"foo");
//! let mut parser = Parser::new(ParserFlags::empty());
//! register_with(&mut parser, "include", token);
//!
//! parser.add_string(".include \"foo\";\nkey = value;").unwrap();
//! assert!(parser.object().is_some());
//! MacroRegistry::global().remove(token);
//! ```

#[allow(unsafe_code, reason = "the bridge implements the C-ABI handler contract")]
mod bridge;
mod outcome;
mod registry;
mod token;

pub use bridge::{invoke, ucl_macro_call, ucl_macro_trampoline};
pub use outcome::{coerce_outcome, MacroOutcome, RAW_ACCEPTED, RAW_REJECTED};
pub use registry::{dispatch, MacroFunc, MacroRegistry};
pub use token::MacroToken;

use ucl_parse::Parser;

/// Bind the directive `.name` on `parser` to the handler behind `token`.
///
/// The handler is looked up in [`MacroRegistry::global`] on every call, so
/// removing the token later makes the directive reject instead of dangling.
#[allow(unsafe_code, reason = "registers the bridge trampoline as a raw handler")]
pub fn register_with(parser: &mut Parser, name: &str, token: MacroToken) {
    // SAFETY: the trampoline never dereferences its user data and accepts
    // any valid (data, len) pair; unknown tokens reject.
    unsafe {
        parser.register_raw_macro(name, ucl_macro_trampoline, token.into_user_data());
    }
}
