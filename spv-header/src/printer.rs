//! Header text builder
//!
//! Handles the low-level string building and indentation management.

use crate::config::RenderOptions;

/// A line-oriented writer that tracks indentation
pub struct Printer {
    indent: String,
    buffer: String,
    indent_level: usize,
    at_line_start: bool,
}

impl Printer {
    /// Create a printer with room for `capacity` bytes of output
    pub fn new(options: &RenderOptions, capacity: usize) -> Self {
        Self {
            indent: options.indent_str(),
            buffer: String::with_capacity(capacity),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Get the generated text
    pub fn finish(mut self) -> String {
        if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer
    }

    /// Write a string to the output
    pub fn write(&mut self, s: &str) {
        if self.at_line_start && !s.is_empty() {
            self.write_indent();
            self.at_line_start = false;
        }
        self.buffer.push_str(s);
    }

    /// Write a line (with newline)
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.buffer.push('\n');
        self.at_line_start = true;
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Execute a closure with increased indentation
    pub fn indented<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.indent();
        f(self);
        self.dedent();
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.indent);
        }
    }
}
