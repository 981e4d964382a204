//! Scalar conversion: unquoted atoms, string escapes, heredoc bodies.

use ucl_ir::Value;

use crate::ParserFlags;

/// An integer literal (or a multiplied one) that does not fit in `i64`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct IntegerOverflow;

/// Convert an unquoted value atom to a typed value.
///
/// Booleans (`true/yes/on`, `false/no/off`) and `null` are matched
/// case-insensitively. Numbers accept a sign, `0x` hex, decimal floats and a
/// multiplier or time suffix. Anything else is a string. Integers never
/// degrade to floats: a literal outside `i64` is an error.
pub(crate) fn parse_atom(text: &str, flags: ParserFlags) -> Result<Value, IntegerOverflow> {
    if ["true", "yes", "on"]
        .iter()
        .any(|w| text.eq_ignore_ascii_case(w))
    {
        return Ok(Value::Bool(true));
    }
    if ["false", "no", "off"]
        .iter()
        .any(|w| text.eq_ignore_ascii_case(w))
    {
        return Ok(Value::Bool(false));
    }
    if text.eq_ignore_ascii_case("null") {
        return Ok(Value::Null);
    }
    Ok(parse_number(text, !flags.contains(ParserFlags::NO_TIME))?
        .unwrap_or_else(|| Value::String(text.to_owned())))
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[allow(
        clippy::cast_precision_loss,
        reason = "integers beyond 2^53 lose precision as floats, as in any JSON float"
    )]
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn scale(self, factor: i64) -> Result<Value, IntegerOverflow> {
        match self {
            Number::Int(i) => i
                .checked_mul(factor)
                .map(Value::Int)
                .ok_or(IntegerOverflow),
            Number::Float(f) => Ok(Value::Float(f * as_f64(factor))),
        }
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "multipliers are at most 1024^3 and exact in f64"
)]
fn as_f64(i: i64) -> f64 {
    i as f64
}

/// Size multipliers, longest suffix first.
const SIZE_SUFFIXES: &[(&str, i64)] = &[
    ("kb", 1024),
    ("mb", 1024 * 1024),
    ("gb", 1024 * 1024 * 1024),
    ("k", 1000),
    ("m", 1000 * 1000),
    ("g", 1000 * 1000 * 1000),
];

/// Time units in seconds, longest suffix first.
const TIME_SUFFIXES: &[(&str, f64)] = &[
    ("min", 60.0),
    ("ms", 0.001),
    ("s", 1.0),
    ("h", 3600.0),
    ("d", 86400.0),
    ("w", 604_800.0),
    ("y", 31_536_000.0),
];

fn parse_number(text: &str, allow_time: bool) -> Result<Option<Value>, IntegerOverflow> {
    if let Some(hex) = parse_hex(text)? {
        return Ok(Some(Value::Int(hex)));
    }
    if let Some(n) = parse_plain(text)? {
        return Ok(Some(match n {
            Number::Int(i) => Value::Int(i),
            Number::Float(f) => Value::Float(f),
        }));
    }

    let lower = text.to_ascii_lowercase();
    if allow_time {
        for &(suffix, seconds) in TIME_SUFFIXES {
            if let Some(n) = plain_with_suffix(&lower, suffix)? {
                return Ok(Some(Value::Time(n.as_f64() * seconds)));
            }
        }
    }
    for &(suffix, factor) in SIZE_SUFFIXES {
        if let Some(n) = plain_with_suffix(&lower, suffix)? {
            return n.scale(factor).map(Some);
        }
    }
    Ok(None)
}

fn plain_with_suffix(text: &str, suffix: &str) -> Result<Option<Number>, IntegerOverflow> {
    match text.strip_suffix(suffix) {
        Some(body) => parse_plain(body),
        None => Ok(None),
    }
}

fn parse_hex(text: &str) -> Result<Option<i64>, IntegerOverflow> {
    let (negative, body) = split_sign(text);
    let Some(digits) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    else {
        return Ok(None);
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Ok(None);
    }
    let magnitude = u64::from_str_radix(digits, 16).map_err(|_| IntegerOverflow)?;
    let value = if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    };
    value.map(Some).ok_or(IntegerOverflow)
}

/// Decimal integer or float with no suffix.
fn parse_plain(text: &str) -> Result<Option<Number>, IntegerOverflow> {
    let (_, body) = split_sign(text);
    if !body.bytes().any(|b| b.is_ascii_digit())
        || !body
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return Ok(None);
    }
    if body.bytes().all(|b| b.is_ascii_digit()) {
        // Only overflow can fail here: the body is a non-empty digit run.
        return text
            .parse::<i64>()
            .map(|i| Some(Number::Int(i)))
            .map_err(|_| IntegerOverflow);
    }
    Ok(text.parse::<f64>().ok().map(Number::Float))
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

/// An invalid escape inside a double-quoted string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EscapeError {
    /// Byte offset of the backslash within the string body.
    pub offset: usize,
    pub len: usize,
    pub message: String,
}

/// Decode the body of a `"..."` string (quotes excluded).
pub(crate) fn unescape_double(body: &str) -> Result<String, EscapeError> {
    if !body.contains('\\') {
        return Ok(body.to_owned());
    }
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            return Err(EscapeError {
                offset: i,
                len: 1,
                message: "trailing backslash in string".to_owned(),
            });
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '/' => out.push('/'),
            // Escaped line break: line continuation.
            '\n' => {}
            'u' => {
                let (ch, consumed) = unicode_escape(&body[i..]).ok_or_else(|| EscapeError {
                    offset: i,
                    len: 2,
                    message: "invalid unicode escape".to_owned(),
                })?;
                out.push(ch);
                // Skip the hex digits (and a second `\uXXXX` for surrogate pairs).
                for _ in 0..consumed - 2 {
                    chars.next();
                }
            }
            other => {
                return Err(EscapeError {
                    offset: i,
                    len: 1 + other.len_utf8(),
                    message: format!("unknown escape sequence `\\{other}`"),
                })
            }
        }
    }
    Ok(out)
}

/// Decode `\uXXXX` (or a `\uD8XX\uDCXX` surrogate pair) at the start of
/// `s`. Returns the character and the number of bytes consumed.
fn unicode_escape(s: &str) -> Option<(char, usize)> {
    let high = hex4(s.get(2..6)?)?;
    if (0xD800..0xDC00).contains(&high) {
        if s.get(6..8)? != "\\u" {
            return None;
        }
        let low = hex4(s.get(8..12)?)?;
        if !(0xDC00..0xE000).contains(&low) {
            return None;
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(code).map(|c| (c, 12));
    }
    char::from_u32(high).map(|c| (c, 6))
}

fn hex4(s: &str) -> Option<u32> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(s, 16).ok()
}

/// Decode the body of a `'...'` string: only `\'` and `\\` are escapes.
pub(crate) fn unescape_single(body: &str) -> String {
    if !body.contains('\\') {
        return body.to_owned();
    }
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next @ ('\'' | '\\')) = chars.peek() {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Body of a heredoc token `<<TAG\n...\nTAG` (terminator line excluded).
pub(crate) fn heredoc_body(token: &str) -> &str {
    let Some(header_end) = token.find('\n') else {
        return "";
    };
    let tag_len = header_end - 2;
    let inner = &token[header_end + 1..token.len() - tag_len];
    inner.strip_suffix('\n').unwrap_or(inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
