//! Plain-text terminal rendering.

use std::fmt::Write;

use crate::{Diagnostic, Label, LineIndex};

/// Render `diagnostic` against the source it was produced from.
///
/// `path` only labels the location line; it is never opened.
pub fn render(diagnostic: &Diagnostic, path: &str, source: &str) -> String {
    let index = LineIndex::build(source);
    let mut out = String::new();
    let _ = writeln!(out, "{diagnostic}");

    let primary = diagnostic.labels.iter().find(|l| l.is_primary);
    let Some(primary) = primary else {
        let _ = writeln!(out, " --> {path}");
        write_notes(&mut out, diagnostic, 1);
        return out;
    };

    let (line, col) = index.line_col(source, primary.span.start);
    let width = digits(
        diagnostic
            .labels
            .iter()
            .map(|l| index.line(l.span.start))
            .max()
            .unwrap_or(line),
    );
    let _ = writeln!(out, "{:width$}--> {path}:{line}:{col}", "");
    let _ = writeln!(out, "{:width$} |", "");

    let mut labels: Vec<&Label> = diagnostic.labels.iter().collect();
    labels.sort_by_key(|l| l.span.start);
    for label in labels {
        write_snippet(&mut out, &index, source, label, width);
    }
    write_notes(&mut out, diagnostic, width);
    out
}

fn write_snippet(out: &mut String, index: &LineIndex, source: &str, label: &Label, width: usize) {
    let line = index.line(label.span.start);
    let Some(text) = index.line_text(source, line) else {
        return;
    };
    let (_, col) = index.line_col(source, label.span.start);
    let line_end = index.line_start(line).unwrap_or(0) as usize + text.len();
    let end = (label.span.end as usize).clamp(label.span.start as usize, line_end);
    let underline = source
        .get(label.span.start as usize..end)
        .map_or(1, |s| s.chars().count().max(1));
    let mark = if label.is_primary { '^' } else { '-' };

    let _ = writeln!(out, "{line:>width$} | {text}");
    let _ = write!(
        out,
        "{:width$} | {:pad$}{}",
        "",
        "",
        mark.to_string().repeat(underline),
        pad = (col - 1) as usize
    );
    if label.message.is_empty() {
        out.push('\n');
    } else {
        let _ = writeln!(out, " {}", label.message);
    }
}

fn write_notes(out: &mut String, diagnostic: &Diagnostic, width: usize) {
    for note in &diagnostic.notes {
        let _ = writeln!(out, "{:width$} = note: {note}", "");
    }
}

fn digits(mut n: u32) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
