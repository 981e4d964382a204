//! Emitters for UCL document trees.
//!
//! ```
//! use ucl_fmt::{emit, Emitter};
//! use ucl_ir::{Object, ObjectMap, Value};
//!
//! let mut map = ObjectMap::new();
//! map.insert("foo", Object::new(Value::String("bar".into())));
//! let root = Object::new(Value::Object(map));
//!
//! assert_eq!(emit(&root, Emitter::JsonCompact), r#"{"foo":"bar"}"#);
//! assert_eq!(emit(&root, Emitter::Config), "foo = \"bar\";\n");
//! ```
//!
//! Every format writes implicit arrays (repeated keys) as arrays.

mod config;
mod json;
mod output;
mod scalar;
mod yaml;

use std::fmt;
use std::str::FromStr;

use ucl_ir::Object;

pub use output::{Output, StringOutput, INDENT_WIDTH};

use output::EmitContext;

/// Output format.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Emitter {
    /// JSON with 4-space indentation.
    #[default]
    Json,
    /// JSON without whitespace.
    JsonCompact,
    /// UCL config syntax (`key = value;`).
    Config,
    /// Block-style YAML.
    Yaml,
}

impl Emitter {
    pub const ALL: [Emitter; 4] = [
        Emitter::Json,
        Emitter::JsonCompact,
        Emitter::Config,
        Emitter::Yaml,
    ];

    /// Name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Emitter::Json => "json",
            Emitter::JsonCompact => "compact",
            Emitter::Config => "config",
            Emitter::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown format name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownEmitter(pub String);

impl fmt::Display for UnknownEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown output format `{}` (expected json, compact, config or yaml)",
            self.0
        )
    }
}

impl std::error::Error for UnknownEmitter {}

impl FromStr for Emitter {
    type Err = UnknownEmitter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Emitter::Json),
            "compact" | "json-compact" | "json_compact" => Ok(Emitter::JsonCompact),
            "config" | "ucl" => Ok(Emitter::Config),
            "yaml" | "yml" => Ok(Emitter::Yaml),
            _ => Err(UnknownEmitter(s.to_owned())),
        }
    }
}

/// Render `root` in the given format.
pub fn emit(root: &Object, emitter: Emitter) -> String {
    let mut out = StringOutput::new();
    emit_to(root, emitter, &mut out);
    out.output()
}

/// Render `root` into any [`Output`].
pub fn emit_to<O: Output + ?Sized>(root: &Object, emitter: Emitter, out: &mut O) {
    let mut ctx = EmitContext::new(out);
    match emitter {
        Emitter::Json => json::emit(root, &mut ctx, false),
        Emitter::JsonCompact => json::emit(root, &mut ctx, true),
        Emitter::Config => config::emit(root, &mut ctx),
        Emitter::Yaml => yaml::emit(root, &mut ctx),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
