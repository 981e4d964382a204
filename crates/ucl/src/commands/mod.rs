//! Command handlers for the `ucl` CLI.
//!
//! Handlers return their output instead of printing so they can be tested;
//! `main` decides where it goes and which exit code to use. Failures come
//! back as already-rendered diagnostics.

mod check;
mod debug;

pub use check::check_file;
pub use debug::{lex_file, parse_file};

use ucl_diagnostic::{render, Diagnostic, ErrorCode};
use ucl_fmt::Emitter;
use ucl_parse::{ParseError, ParserFlags};

use crate::Parser;

/// Options shared by `parse` and `check`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub format: Emitter,
    pub flags: ParserFlags,
    /// Directive names accepted without inspecting their argument.
    pub allow_macros: Vec<String>,
}

impl Options {
    /// Parse flags following the file argument.
    pub fn parse(args: &[String]) -> Result<Options, String> {
        let mut options = Options::default();
        for arg in args {
            if let Some(format) = arg.strip_prefix("--format=") {
                options.format = format.parse().map_err(|e| format!("error: {e}"))?;
            } else if let Some(name) = arg.strip_prefix("--allow-macro=") {
                options.allow_macros.push(name.trim_start_matches('.').to_owned());
            } else if arg == "--lowercase" {
                options.flags |= ParserFlags::KEY_LOWERCASE;
            } else if arg == "--no-time" {
                options.flags |= ParserFlags::NO_TIME;
            } else {
                return Err(format!("error: unknown option '{arg}'"));
            }
        }
        Ok(options)
    }

    fn parser(&self) -> Parser {
        let mut parser = Parser::new(self.flags);
        for name in &self.allow_macros {
            parser.register_macro(name, |_: &[u8]| true);
        }
        parser
    }
}

/// Read `path` as bytes, turning I/O failures into a rendered message.
fn read_file(path: &str) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| {
        let msg = match e.kind() {
            std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
            _ => format!("error reading '{path}': {e}"),
        };
        render(&Diagnostic::error(ErrorCode::E9001).with_message(msg), path, "")
    })
}

/// Parse `path` with `options`, rendering any failure against its source.
fn parse_with(path: &str, options: &Options) -> Result<Parser, String> {
    let source = read_file(path)?;
    let mut parser = options.parser();
    parser
        .add_bytes(&source)
        .map_err(|err| report(&err, path, &source))?;
    Ok(parser)
}

fn report(err: &ParseError, path: &str, source: &[u8]) -> String {
    let text = String::from_utf8_lossy(source);
    render(err.diagnostic(), path, &text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
