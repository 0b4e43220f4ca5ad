//! Tree-to-text writer.
//!
//! The [`Writer`] renders a [`Document`] (or a single [`Node`]) into a `String`. Two styles are
//! available through [`WriterOptions`]:
//!
//! - **Canonical**: bare identifiers where the text allows it, quoted strings otherwise, numbers
//!   in decimal form, `#true`/`#false`/`#null`. Slashdash trivia and `;` are dropped.
//! - **Verbatim**: each string keeps the form it was parsed from and each number keeps its
//!   spelling. Elided entries and explicit `;` terminators are written back.
//!
//! Writing cannot fail; only [`to_writer`](crate::to_writer) reports I/O errors.
//!
//! ## Usage
//!
//! ```rust
//! use kdl_reader::{Node, Writer, WriterOptions};
//!
//! let node = Node::builder("title").argument("Hello, world").build();
//!
//! let mut writer = Writer::new(WriterOptions::new());
//! writer.write_node(&node);
//! assert_eq!(writer.into_inner(), "title \"Hello, world\"\n");
//! ```

use crate::lexer::{is_bare_identifier, is_disallowed, is_newline, is_space};
use crate::node::{Block, Document, Entry, Node};
use crate::options::{WriteStyle, WriterOptions};
use crate::value::{KdlString, StringKind, TypedValue, Value};
use std::fmt::Write as _;

/// Renders trees as text.
pub struct Writer {
    output: String,
    options: WriterOptions,
    indent_level: usize,
}

impl Writer {
    pub fn new(options: WriterOptions) -> Self {
        Writer {
            output: String::with_capacity(256),
            options,
            indent_level: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes every top-level node, each followed by a newline. An empty document writes nothing.
    pub fn write_document(&mut self, document: &Document) {
        for node in document {
            self.write_node(node);
        }
    }

    /// Writes one node at the current nesting level, followed by a newline.
    pub fn write_node(&mut self, node: &Node) {
        let style = self.options.style;
        self.write_indent();
        if let Some(annotation) = node.annotation() {
            self.output.push('(');
            self.output.push_str(&render_identifier(annotation));
            self.output.push(')');
        }
        let name = self.string(node.name_string());
        self.output.push_str(&name);

        for entry in node.entries() {
            match entry {
                Entry::Argument(value) => {
                    self.output.push(' ');
                    self.write_typed_value(value);
                }
                Entry::Property { key, value } => {
                    self.output.push(' ');
                    let key = self.string(key);
                    self.output.push_str(&key);
                    self.output.push('=');
                    self.write_typed_value(value);
                }
                Entry::Skipped(text) if style.is_verbatim() => {
                    self.output.push_str(" /-");
                    self.output.push_str(text);
                }
                Entry::Skipped(_) => {}
            }
        }

        if let Some(children) = node.children() {
            self.write_block(children);
        }
        if style.is_verbatim() && node.is_terminated() {
            self.output.push(';');
        }
        self.output.push('\n');
    }

    fn write_block(&mut self, block: &Block) {
        if block.is_empty() {
            self.output.push_str(" {}");
            return;
        }
        self.output.push_str(" {\n");
        self.indent_level += 1;
        for child in block {
            self.write_node(child);
        }
        self.indent_level -= 1;
        self.write_indent();
        self.output.push('}');
    }

    fn write_typed_value(&mut self, value: &TypedValue) {
        if let Some(annotation) = value.annotation() {
            self.output.push('(');
            self.output.push_str(&render_identifier(annotation));
            self.output.push(')');
        }
        match value.value() {
            Value::String(s) => {
                let text = self.string(s);
                self.output.push_str(&text);
            }
            other => self.output.push_str(&render_value(other, self.options.style)),
        }
    }

    fn string(&self, s: &KdlString) -> String {
        let indent = " ".repeat(self.options.indent * self.indent_level);
        render_string_at(s, self.options.style, &indent)
    }

    fn write_indent(&mut self) {
        for _ in 0..self.options.indent * self.indent_level {
            self.output.push(' ');
        }
    }
}

/// Renders a single value with no annotation.
pub(crate) fn render_value(value: &Value, style: WriteStyle) -> String {
    match value {
        Value::Null => "#null".to_string(),
        Value::Bool(true) => "#true".to_string(),
        Value::Bool(false) => "#false".to_string(),
        Value::Number(n) if style.is_verbatim() => n.raw().to_string(),
        Value::Number(n) => n.canonical(),
        Value::String(s) => render_string(s, style),
    }
}

/// A node name, key or annotation: bare when possible, quoted otherwise.
pub(crate) fn render_identifier(text: &str) -> String {
    if is_bare_identifier(text) {
        text.to_string()
    } else {
        quoted(text)
    }
}

pub(crate) fn render_string(s: &KdlString, style: WriteStyle) -> String {
    render_string_at(s, style, "")
}

/// `indent` is the indentation of the line the string sits on; multiline forms indent their
/// content and closing delimiter by it.
fn render_string_at(s: &KdlString, style: WriteStyle, indent: &str) -> String {
    let text = s.value();
    if !style.is_verbatim() {
        return render_identifier(text);
    }
    match s.kind() {
        StringKind::Identifier if is_bare_identifier(text) => text.to_string(),
        StringKind::Raw { hashes } if fits_raw(text, hashes) => {
            let fence = "#".repeat(hashes);
            format!("r{fence}\"{text}\"{fence}")
        }
        StringKind::RawMultiline { hashes } if fits_raw_multiline(text, hashes) => {
            let fence = "#".repeat(hashes);
            format!("r{fence}{}{fence}", multiline(text, indent))
        }
        StringKind::Multiline | StringKind::RawMultiline { .. } if text.contains('\n') => {
            multiline(&escape_multiline(text), indent)
        }
        _ => quoted(text),
    }
}

/// Single-line quoted form with escapes.
fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{C}' => out.push_str("\\f"),
            ch if is_newline(ch) || is_disallowed(ch) => push_unicode_escape(&mut out, ch),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn push_unicode_escape(out: &mut String, ch: char) {
    let _ = write!(out, "\\u{{{:x}}}", ch as u32);
}

/// Wraps already-safe content lines in `"""` delimiters.
fn multiline(body: &str, indent: &str) -> String {
    let mut out = String::from("\"\"\"\n");
    for line in body.split('\n') {
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
        out.push('\n');
    }
    out.push_str(indent);
    out.push_str("\"\"\"");
    out
}

/// Escapes everything a multiline string cannot hold literally, keeping `\n` as line breaks.
fn escape_multiline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let quotes_need_escape = text.contains("\"\"\"");
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let blank = !line.is_empty() && line.chars().all(is_space);
        for ch in line.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '"' if quotes_need_escape => out.push_str("\\\""),
                '\t' if blank => out.push_str("\\t"),
                ' ' if blank => out.push_str("\\s"),
                ch if blank || is_newline(ch) || is_disallowed(ch) => {
                    push_unicode_escape(&mut out, ch)
                }
                ch => out.push(ch),
            }
        }
    }
    out
}

fn fits_raw(text: &str, hashes: usize) -> bool {
    let closer = format!("\"{}", "#".repeat(hashes));
    !text.contains(&closer)
        && !text.chars().any(|ch| is_newline(ch) || is_disallowed(ch))
}

fn fits_raw_multiline(text: &str, hashes: usize) -> bool {
    let closer = format!("\"\"\"{}", "#".repeat(hashes));
    text.contains('\n')
        && !text.contains(&closer)
        && text
            .chars()
            .all(|ch| ch == '\n' || !(is_newline(ch) || is_disallowed(ch)))
        && text
            .split('\n')
            .all(|line| line.is_empty() || !line.chars().all(is_space))
}
