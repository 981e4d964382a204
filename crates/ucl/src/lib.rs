//! UCL configuration parser with host-registered macro directives.
//!
//! This crate ties the workspace together:
//!
//! - [`Parser`]: incremental parsing with closure-backed macros
//! - [`parse_str`], [`parse_file`], [`from_str`]: one-shot helpers
//! - [`emit`]: JSON, compact JSON, config and YAML output
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Server {
//!     listen: Vec<u16>,
//!     name: String,
//! }
//!
//! let server: Server = ucl::from_str("listen = 80; listen = 443; name = edge").unwrap();
//! assert_eq!(server.listen, vec![80, 443]);
//! assert_eq!(server.name, "edge");
//! ```

pub mod commands;
mod error;
mod parser;

use std::path::Path;
use std::sync::Once;

use serde::de::DeserializeOwned;

pub use error::Error;
pub use parser::Parser;
pub use ucl_fmt::{emit, emit_to, Emitter};
pub use ucl_ir::{from_object, DecodeError, Object, ObjectMap, ObjectType, Value};
pub use ucl_macro::{MacroOutcome, MacroRegistry, MacroToken};
pub use ucl_parse::{ParseError, ParserFlags};

/// Parse one string into a document.
pub fn parse_str(source: &str) -> Result<Object, Error> {
    let mut parser = Parser::new(ParserFlags::empty());
    parser.add_string(source)?;
    parser.into_object().ok_or(Error::Empty)
}

/// Parse one file into a document.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Object, Error> {
    let mut parser = Parser::new(ParserFlags::empty());
    parser.add_file(path)?;
    parser.into_object().ok_or(Error::Empty)
}

/// Parse `source` and decode it into `T`.
pub fn from_str<T: DeserializeOwned>(source: &str) -> Result<T, Error> {
    let object = parse_str(source)?;
    Ok(from_object(&object)?)
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
