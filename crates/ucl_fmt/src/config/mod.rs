//! UCL config output: `key = value;` lines, nested blocks, bracketed arrays.
//!
//! The output parses back to the same tree. Implicit arrays are written as
//! explicit arrays.

use ucl_ir::{Object, ObjectMap, Value};

use crate::output::{EmitContext, Output};
use crate::scalar::{quoted, write_scalar};

pub(crate) fn emit<O: Output + ?Sized>(root: &Object, ctx: &mut EmitContext<'_, O>) {
    match root.value() {
        Value::Object(map) => members(ctx, map),
        _ => {
            element(ctx, root);
            ctx.newline();
        }
    }
}

fn members<O: Output + ?Sized>(ctx: &mut EmitContext<'_, O>, map: &ObjectMap) {
    for entry in map.entries() {
        ctx.indent();
        ctx.text(&config_key(entry.key()));
        match entry.values() {
            [single] => member_value(ctx, single),
            many => array_block(ctx, many),
        }
        ctx.newline();
    }
}

fn member_value<O: Output + ?Sized>(ctx: &mut EmitContext<'_, O>, object: &Object) {
    match object.value() {
        Value::Object(map) => {
            ctx.text(" ");
            object_block(ctx, map);
        }
        Value::Array(items) => array_block(ctx, items),
        scalar => {
            ctx.text(" = ");
            write_scalar(ctx, scalar);
            ctx.text(";");
        }
    }
}

fn object_block<O: Output + ?Sized>(ctx: &mut EmitContext<'_, O>, map: &ObjectMap) {
    ctx.text("{");
    ctx.newline();
    ctx.push();
    members(ctx, map);
    ctx.pop();
    ctx.indent();
    ctx.text("}");
}

fn array_block<O: Output + ?Sized>(ctx: &mut EmitContext<'_, O>, items: &[Object]) {
    ctx.text(" [");
    ctx.newline();
    ctx.push();
    for item in items {
        ctx.indent();
        element(ctx, item);
        ctx.text(",");
        ctx.newline();
    }
    ctx.pop();
    ctx.indent();
    ctx.text("]");
}

/// An array element: no key, no trailing `;`.
fn element<O: Output + ?Sized>(ctx: &mut EmitContext<'_, O>, object: &Object) {
    match object.value() {
        Value::Object(map) => object_block(ctx, map),
        Value::Array(items) => {
            ctx.text("[");
            ctx.newline();
            ctx.push();
            for item in items {
                ctx.indent();
                element(ctx, item);
                ctx.text(",");
                ctx.newline();
            }
            ctx.pop();
            ctx.indent();
            ctx.text("]");
        }
        scalar => write_scalar(ctx, scalar),
    }
}

/// Keys the scanner reads back as a single key atom stay bare.
fn config_key(key: &str) -> String {
    let bare = !key.is_empty()
        && !key.starts_with('.')
        && key.bytes().all(|b| {
            b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b'/' | b'@' | b'$')
        });
    if bare {
        key.to_owned()
    } else {
        quoted(key)
    }
}

#[cfg(test)]
mod tests;
