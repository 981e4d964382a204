//! Inspection commands: `parse` prints the document, `lex` the raw tokens.

use std::fmt::Write as _;

use ucl_lexer_core::{RawScanner, RawTag, SourceBuffer};

use super::{parse_with, read_file, Options};
use crate::emit;

/// Parse a file and render it in `options.format`.
pub fn parse_file(path: &str, options: &Options) -> Result<String, String> {
    let parser = parse_with(path, options)?;
    let root = parser
        .into_object()
        .ok_or_else(|| format!("{path}: no document"))?;
    Ok(emit(&root, options.format))
}

/// Tokenize a file and list its non-whitespace tokens.
///
/// Tokens after `=` or `:` are scanned in value mode, the way the grammar
/// reads them. A directive is followed by its isolated argument.
pub fn lex_file(path: &str) -> Result<String, String> {
    let source = read_file(path)?;
    let buffer = SourceBuffer::new(&source);
    let cursor = buffer.cursor();
    let mut scanner = RawScanner::new(cursor);
    let mut out = String::new();
    let mut count = 0usize;
    let mut value_next = false;

    loop {
        let start = scanner.pos();
        let token = if value_next {
            scanner.next_value_token()
        } else {
            scanner.next_token()
        };
        if token.tag == RawTag::Eof {
            break;
        }
        if matches!(token.tag, RawTag::Whitespace) {
            continue;
        }
        value_next = matches!(token.tag, RawTag::Equal | RawTag::Colon);
        let end = start + token.len;
        let text = String::from_utf8_lossy(cursor.slice(start, end));
        count += 1;
        let _ = writeln!(out, "  {:?} @ {start}..{end} {text:?}", token.tag);

        if token.tag == RawTag::Directive {
            let arg = scanner.scan_macro_argument();
            let text = String::from_utf8_lossy(cursor.slice(arg.start, arg.end));
            count += 1;
            let _ = writeln!(
                out,
                "  MacroArgument({:?}) @ {}..{} {text:?}",
                arg.kind, arg.start, arg.end
            );
        }
    }

    Ok(format!("Tokens for '{path}' ({count} tokens):\n{out}"))
}
