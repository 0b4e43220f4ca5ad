//! Flattening a document into `path -> string` pairs.
//!
//! Useful for feeding configuration systems that only understand flat keys:
//!
//! - a node's path is its ancestors' names joined by the separator (default `:`)
//! - same-named siblings become an indexed array: `name:0`, `name:1`, …
//! - a single argument is the value of the node's own path; several become `path:0`, `path:1`, …
//! - each property becomes `path:key`
//! - a node with no arguments or properties produces no key of its own
//!
//! ## Examples
//!
//! ```rust
//! use kdl_reader::{flatten, parse};
//!
//! let doc = parse(r#"
//! server {
//!     host "localhost"
//!     port 8080
//!     tls enabled=#true
//! }
//! allow "10.0.0.1"
//! allow "10.0.0.2"
//! "#).unwrap();
//!
//! let flat = flatten(&doc);
//! assert_eq!(flat["server:host"], "localhost");
//! assert_eq!(flat["server:port"], "8080");
//! assert_eq!(flat["server:tls:enabled"], "true");
//! assert_eq!(flat["allow:1"], "10.0.0.2");
//! ```

use crate::node::{Entry, Node};
use crate::value::Value;
use indexmap::IndexMap;

/// Flattener configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlattenOptions {
    pub separator: String,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            separator: ":".to_string(),
        }
    }
}

impl FlattenOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// Flattens `nodes` with the default `:` separator.
pub fn flatten<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> IndexMap<String, String> {
    flatten_with_options(nodes, &FlattenOptions::default())
}

/// Flattens `nodes` with a custom separator.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::{flatten_with_options, parse, FlattenOptions};
///
/// let doc = parse("db url=\"postgres://db\" { pool 4 8 }").unwrap();
/// let flat = flatten_with_options(&doc, &FlattenOptions::new().with_separator("."));
/// let pairs: Vec<_> = flat.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
/// assert_eq!(pairs, vec!["db.url=postgres://db", "db.pool.0=4", "db.pool.1=8"]);
/// ```
pub fn flatten_with_options<'a>(
    nodes: impl IntoIterator<Item = &'a Node>,
    options: &FlattenOptions,
) -> IndexMap<String, String> {
    let mut out = IndexMap::new();
    let nodes: Vec<&Node> = nodes.into_iter().collect();
    flatten_siblings(&nodes, "", options, &mut out);
    out
}

fn flatten_siblings(
    nodes: &[&Node],
    prefix: &str,
    options: &FlattenOptions,
    out: &mut IndexMap<String, String>,
) {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for node in nodes {
        *counts.entry(node.name()).or_default() += 1;
    }
    let mut seen: IndexMap<&str, usize> = IndexMap::new();
    for node in nodes {
        let base = join(prefix, node.name(), options);
        let path = if counts.get(node.name()).copied().unwrap_or(0) > 1 {
            let index = seen.entry(node.name()).or_default();
            let path = join(&base, &index.to_string(), options);
            *index += 1;
            path
        } else {
            base
        };
        flatten_node(node, &path, options, out);
    }
}

fn flatten_node(node: &Node, path: &str, options: &FlattenOptions, out: &mut IndexMap<String, String>) {
    let arguments: Vec<_> = node.arguments().collect();
    match arguments.as_slice() {
        [] => {}
        [single] => {
            out.insert(path.to_string(), leaf(single.value()));
        }
        many => {
            for (i, value) in many.iter().enumerate() {
                out.insert(join(path, &i.to_string(), options), leaf(value.value()));
            }
        }
    }
    for entry in node.entries() {
        if let Entry::Property { key, value } = entry {
            out.insert(join(path, key.value(), options), leaf(value.value()));
        }
    }
    if let Some(children) = node.children() {
        let children: Vec<&Node> = children.iter().collect();
        flatten_siblings(&children, path, options, out);
    }
}

fn join(prefix: &str, segment: &str, options: &FlattenOptions) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", prefix, options.separator, segment)
    }
}

fn leaf(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.canonical().trim_start_matches('#').to_string(),
        Value::String(s) => s.value().to_string(),
    }
}
