//! C++ header rendering
//!
//! Produces the include-guarded, namespaced `uint32_t` array declaration and
//! its `sizeof`-derived size constant.

use crate::config::{RenderOptions, TranscodeConfig};
use crate::printer::Printer;

/// Characters per rendered literal: `0x` + 8 digits + `, `
const LITERAL_WIDTH: usize = 12;

/// Render a header with the default layout (six words per line)
pub fn render_header(words: &[u32], config: &TranscodeConfig) -> String {
    render_header_with(words, config, &RenderOptions::default())
}

/// Render a header with a custom initializer layout
pub fn render_header_with(
    words: &[u32],
    config: &TranscodeConfig,
    options: &RenderOptions,
) -> String {
    let mut p = Printer::new(options, words.len() * LITERAL_WIDTH + 512);

    p.writeln(&format!("#ifndef {}", config.guard_token));
    p.writeln(&format!("#define {}", config.guard_token));
    p.newline();
    p.writeln("#include <cstdint>");
    p.writeln("#include <cstddef>");
    p.newline();

    for namespace in &config.namespace_path {
        p.writeln(&format!("namespace {namespace} {{"));
    }
    if !config.namespace_path.is_empty() {
        p.newline();
    }

    p.writeln(&format!("alignas(4) static const uint32_t {}[] = {{", config.array_name));
    p.indented(|p| {
        for chunk in words.chunks(options.line_width()) {
            p.writeln(&format_word_line(chunk));
        }
    });
    p.writeln("};");
    p.newline();
    p.writeln(&format!(
        "static const size_t {} = sizeof({});",
        config.size_constant_name(),
        config.array_name
    ));
    p.newline();

    for namespace in config.namespace_path.iter().rev() {
        p.writeln(&format!("}} // namespace {namespace}"));
    }
    if !config.namespace_path.is_empty() {
        p.newline();
    }

    p.writeln(&format!("#endif // {}", config.guard_token));
    p.finish()
}

/// `0x00000001, 0x00000002,` with a trailing comma after the last literal
fn format_word_line(words: &[u32]) -> String {
    let literals: Vec<String> = words.iter().map(|w| format!("0x{w:08x}")).collect();
    format!("{},", literals.join(", "))
}
