//! Block-style YAML output.

use ucl_ir::{Object, ObjectMap, Value};

use crate::output::{EmitContext, Output};
use crate::scalar::{quoted, write_scalar};

pub(crate) fn emit<O: Output + ?Sized>(root: &Object, ctx: &mut EmitContext<'_, O>) {
    let mut yaml = Yaml { started: false };
    match root.value() {
        Value::Object(map) if !map.is_empty() => yaml.members(ctx, map),
        Value::Array(items) if !items.is_empty() => yaml.sequence(ctx, items),
        other => yaml.inline(ctx, other),
    }
}

struct Yaml {
    started: bool,
}

impl Yaml {
    fn begin_line<O: Output + ?Sized>(&mut self, ctx: &mut EmitContext<'_, O>) {
        if self.started {
            ctx.newline();
        }
        self.started = true;
        ctx.indent();
    }

    fn members<O: Output + ?Sized>(&mut self, ctx: &mut EmitContext<'_, O>, map: &ObjectMap) {
        for entry in map.entries() {
            self.begin_line(ctx);
            ctx.text(&yaml_key(entry.key()));
            ctx.text(":");
            match entry.values() {
                [single] => self.nested(ctx, single),
                many => {
                    ctx.push();
                    self.sequence(ctx, many);
                    ctx.pop();
                }
            }
        }
    }

    fn sequence<O: Output + ?Sized>(&mut self, ctx: &mut EmitContext<'_, O>, items: &[Object]) {
        for item in items {
            self.begin_line(ctx);
            ctx.text("-");
            self.nested(ctx, item);
        }
    }

    /// The value after `key:` or `-`: a block on the following lines, or an
    /// inline scalar.
    fn nested<O: Output + ?Sized>(&mut self, ctx: &mut EmitContext<'_, O>, object: &Object) {
        match object.value() {
            Value::Object(map) if !map.is_empty() => {
                ctx.push();
                self.members(ctx, map);
                ctx.pop();
            }
            Value::Array(items) if !items.is_empty() => {
                ctx.push();
                self.sequence(ctx, items);
                ctx.pop();
            }
            other => {
                ctx.text(" ");
                self.inline(ctx, other);
            }
        }
    }

    fn inline<O: Output + ?Sized>(&mut self, ctx: &mut EmitContext<'_, O>, value: &Value) {
        self.started = true;
        match value {
            Value::Object(_) => ctx.text("{}"),
            Value::Array(_) => ctx.text("[]"),
            scalar => write_scalar(ctx, scalar),
        }
    }
}

/// Plain keys that YAML would not read as another type stay unquoted.
fn yaml_key(key: &str) -> String {
    const RESERVED: [&str; 8] = ["true", "false", "yes", "no", "on", "off", "null", "~"];
    let plain = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b'/'))
        && !RESERVED.iter().any(|r| key.eq_ignore_ascii_case(r));
    if plain {
        key.to_owned()
    } else {
        quoted(key)
    }
}
