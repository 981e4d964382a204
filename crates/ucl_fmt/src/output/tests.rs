use super::*;
use pretty_assertions::assert_eq;

#[test]
fn string_output_indentation() {
    let mut out = StringOutput::new();
    out.emit("root");
    out.emit_newline();
    out.emit_indent(1);
    out.emit("child");
    out.emit_newline();
    out.emit_indent(2);
    out.emit("grandchild");
    assert_eq!(out.output(), "root\n    child\n        grandchild");
}

#[test]
fn context_tracks_depth() {
    let mut out = StringOutput::with_capacity(16);
    let mut ctx = EmitContext::new(&mut out);
    ctx.text("{");
    ctx.push();
    ctx.line();
    ctx.text("a");
    ctx.pop();
    ctx.line();
    ctx.text("}");
    ctx.pop();
    assert_eq!(out.as_str(), "{\n    a\n}");
}
