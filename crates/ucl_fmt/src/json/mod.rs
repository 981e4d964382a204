//! JSON output, pretty (4-space indent) or compact.
//!
//! Implicit arrays become JSON arrays, so repeated keys survive the trip.

use ucl_ir::{Object, ObjectMap, Value};

use crate::output::{EmitContext, Output};
use crate::scalar::{quoted, write_scalar};

pub(crate) fn emit<O: Output + ?Sized>(root: &Object, ctx: &mut EmitContext<'_, O>, compact: bool) {
    Json { compact }.value(ctx, root);
}

#[derive(Copy, Clone)]
struct Json {
    compact: bool,
}

impl Json {
    fn value<O: Output + ?Sized>(self, ctx: &mut EmitContext<'_, O>, object: &Object) {
        match object.value() {
            Value::Object(map) => self.object(ctx, map),
            Value::Array(items) => self.array(ctx, items),
            scalar => write_scalar(ctx, scalar),
        }
    }

    fn break_line<O: Output + ?Sized>(self, ctx: &mut EmitContext<'_, O>) {
        if !self.compact {
            ctx.line();
        }
    }

    fn object<O: Output + ?Sized>(self, ctx: &mut EmitContext<'_, O>, map: &ObjectMap) {
        if map.is_empty() {
            ctx.text("{}");
            return;
        }
        ctx.text("{");
        ctx.push();
        for (i, entry) in map.entries().enumerate() {
            if i > 0 {
                ctx.text(",");
            }
            self.break_line(ctx);
            ctx.text(&quoted(entry.key()));
            ctx.text(if self.compact { ":" } else { ": " });
            match entry.values() {
                [single] => self.value(ctx, single),
                many => self.array(ctx, many),
            }
        }
        ctx.pop();
        self.break_line(ctx);
        ctx.text("}");
    }

    fn array<O: Output + ?Sized>(self, ctx: &mut EmitContext<'_, O>, items: &[Object]) {
        if items.is_empty() {
            ctx.text("[]");
            return;
        }
        ctx.text("[");
        ctx.push();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                ctx.text(",");
            }
            self.break_line(ctx);
            self.value(ctx, item);
        }
        ctx.pop();
        self.break_line(ctx);
        ctx.text("]");
    }
}
