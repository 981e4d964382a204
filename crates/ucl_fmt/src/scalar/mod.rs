//! Scalar rendering shared by every format.

use std::fmt::Write;

use ucl_ir::Value;

use crate::output::{EmitContext, Output};

/// Render a float so it reads back as a float.
///
/// Whole numbers keep one decimal (`2.0`); non-finite values have no
/// portable spelling and become `null`.
#[allow(clippy::float_cmp, reason = "exact test for a whole number")]
pub(crate) fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_owned();
    }
    if f.trunc() == f && f.abs() < 1e15 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

/// Append `s` as a JSON string literal.
pub(crate) fn quote_into(buf: &mut String, s: &str) {
    buf.reserve(s.len() + 2);
    buf.push('"');
    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            '\u{08}' => buf.push_str("\\b"),
            '\u{0C}' => buf.push_str("\\f"),
            c if u32::from(c) < 0x20 => {
                let _ = write!(buf, "\\u{:04x}", u32::from(c));
            }
            c => buf.push(c),
        }
    }
    buf.push('"');
}

pub(crate) fn quoted(s: &str) -> String {
    let mut buf = String::new();
    quote_into(&mut buf, s);
    buf
}

/// Write a scalar value. Objects and arrays are the caller's job.
pub(crate) fn write_scalar<O: Output + ?Sized>(ctx: &mut EmitContext<'_, O>, value: &Value) {
    match value {
        Value::Int(i) => ctx.text(&i.to_string()),
        Value::Float(f) | Value::Time(f) => ctx.text(&format_float(*f)),
        Value::String(s) => ctx.text(&quoted(s)),
        Value::Bool(true) => ctx.text("true"),
        Value::Bool(false) => ctx.text("false"),
        Value::Null | Value::Object(_) | Value::Array(_) => ctx.text("null"),
    }
}
