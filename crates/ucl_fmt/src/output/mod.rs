//! Output sinks for the emitters.

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Destination for emitted text.
pub trait Output {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self) {
        self.emit("\n");
    }

    /// Emit indentation for `level` nesting levels.
    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.emit("    ");
        }
    }
}

/// In-memory output.
#[derive(Default)]
pub struct StringOutput {
    buffer: String,
}

impl StringOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn output(self) -> String {
        self.buffer
    }
}

impl Output for StringOutput {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        self.buffer
            .extend(std::iter::repeat_n(' ', level * INDENT_WIDTH));
    }
}

/// Tracks nesting depth on top of an [`Output`].
pub(crate) struct EmitContext<'o, O: Output + ?Sized> {
    out: &'o mut O,
    depth: usize,
}

impl<'o, O: Output + ?Sized> EmitContext<'o, O> {
    pub(crate) fn new(out: &'o mut O) -> Self {
        EmitContext { out, depth: 0 }
    }

    pub(crate) fn text(&mut self, text: &str) {
        self.out.emit(text);
    }

    /// Newline followed by the current indentation.
    pub(crate) fn line(&mut self) {
        self.out.emit_newline();
        self.out.emit_indent(self.depth);
    }

    pub(crate) fn newline(&mut self) {
        self.out.emit_newline();
    }

    pub(crate) fn indent(&mut self) {
        self.out.emit_indent(self.depth);
    }

    pub(crate) fn push(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn pop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests;
