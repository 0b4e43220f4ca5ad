//! # kdl_reader
//!
//! A reader, writer and validator for KDL-style node documents.
//!
//! ## What does a document look like?
//!
//! Every line is a *node*: a name, optional positional *arguments*, `key=value` *properties*
//! and an optional block of children. Values may carry a `(type)` annotation.
//!
//! ```text
//! // comments nest: /* like /* this */ */
//! (config)server "main" port=(u16)8080 {
//!     route "/" handler=index
//!     route "/api" /- "disabled" handler=api
//!     tls #true
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Exact errors**: every parse failure carries a byte offset, line and column
//! - **Lossless numbers**: numeric literals keep their spelling and convert on demand, with
//!   overflow reported instead of truncated
//! - **Two writer styles**: canonical output, or verbatim output that keeps string forms,
//!   number spellings and slashdash trivia
//! - **Reserved types**: `(u8)`, `(date-time)`, `(uuid)` and the rest of the catalog are checked,
//!   with all violations reported together
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```rust
//! use kdl_reader::{from_str, to_string};
//!
//! let doc = from_str("user name=Alice age=(u8)30\nuser name=Bob").unwrap();
//!
//! let names: Vec<_> = doc
//!     .nodes_named("user")
//!     .filter_map(|user| user.property("name"))
//!     .filter_map(|name| name.value().as_str())
//!     .collect();
//! assert_eq!(names, vec!["Alice", "Bob"]);
//!
//! assert_eq!(to_string(&doc), "user name=Alice age=(u8)30\nuser name=Bob\n");
//! ```
//!
//! ### Building documents
//!
//! ```rust
//! use kdl_reader::{kdl_value, to_string, Document, Node};
//!
//! let doc: Document = vec![Node::builder("package")
//!     .child(Node::builder("name").argument("kdl_reader").build())
//!     .child(Node::builder("version").argument(kdl_value!((semver) "0.1.0")).build())
//!     .build()]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(
//!     to_string(&doc),
//!     "package {\n    name kdl_reader\n    version (semver)\"0.1.0\"\n}\n"
//! );
//! ```
//!
//! ### Errors
//!
//! ```rust
//! use kdl_reader::{from_str, Error};
//!
//! match from_str("node key = 1") {
//!     Err(err @ Error::Syntax { .. }) => assert_eq!(err.column(), Some(9)),
//!     other => panic!("unexpected: {:?}", other),
//! }
//!
//! let err = from_str("limits (u8)256 (i8)-129").unwrap_err();
//! assert_eq!(err.validation_errors().map(|e| e.len()), Some(2));
//! ```
//!
//! ## Modules
//!
//! - [`lexer`]: character classes and literal recognizers
//! - [`node`]: the document tree and its builder
//! - [`value`], [`number`]: entry values
//! - [`writer`]: tree-to-text rendering
//! - [`validate`]: reserved type annotations
//! - [`reader`]: parse-then-validate façade
//! - [`binding`]: `FromNode`/`ToNode` contracts for application types
//! - [`flatten`]: `path -> string` view for configuration systems

pub mod binding;
pub mod error;
pub mod flatten;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod node;
pub mod number;
pub mod options;
mod parser;
pub mod reader;
pub mod validate;
pub mod value;
pub mod writer;

pub use binding::{FromNode, FromValue, ToNode};
pub use error::{Error, Position, Result};
pub use flatten::{flatten, flatten_with_options, FlattenOptions};
pub use map::PropertyMap;
pub use node::{Block, Document, Entry, Node, NodeBuilder};
pub use number::{Decimal, Number, NumberError, Radix};
pub use options::{ReaderOptions, WriteStyle, WriterOptions, DEFAULT_MAX_DEPTH};
pub use reader::{default_reader, KdlReader};
pub use validate::{validate, ReservedType, ValidationError, ValidationErrors, ValueLocation};
pub use value::{KdlString, StringKind, TypedValue, Value};
pub use writer::Writer;

use std::io;

/// Parses `input` into a document without checking reserved types.
///
/// Slashdash-elided content is dropped. Use [`KdlReader`] to keep it.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::parse;
///
/// let doc = parse("node 1 /- 2 3").unwrap();
/// let args: Vec<_> = doc.nodes()[0].arguments().filter_map(|v| v.value().as_i64()).collect();
/// assert_eq!(args, vec![1, 3]);
///
/// // reserved types are not checked here
/// assert!(parse("n (u8)256").is_ok());
/// ```
///
/// # Errors
///
/// Returns the first lexical, syntax or reserved-keyword error.
pub fn parse(input: &str) -> Result<Document> {
    let options = ReaderOptions::new().with_validate(false);
    parser::Parser::new(input, &options).parse_document()
}

/// Parses `input` and validates its reserved type annotations with the shared
/// [`default_reader`].
///
/// # Errors
///
/// Returns the first parse error, or [`Error::Validation`] listing every reserved-type violation.
pub fn from_str(input: &str) -> Result<Document> {
    default_reader().read(input)
}

/// Like [`from_str`], for UTF-8 bytes.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::from_slice;
///
/// let doc = from_slice(b"node \"bytes\"").unwrap();
/// assert_eq!(doc.len(), 1);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] for invalid UTF-8, otherwise as [`from_str`].
pub fn from_slice(bytes: &[u8]) -> Result<Document> {
    default_reader().read_slice(bytes)
}

/// Reads everything from `reader`, then behaves like [`from_str`].
///
/// # Examples
///
/// ```rust
/// use kdl_reader::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new("a\nb\n")).unwrap();
/// assert_eq!(doc.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as [`from_str`].
pub fn from_reader<R: io::Read>(reader: R) -> Result<Document> {
    default_reader().read_from(reader)
}

/// Writes `document` in canonical style with 4-space indentation.
#[must_use]
pub fn to_string(document: &Document) -> String {
    to_string_with_options(document, &WriterOptions::default())
}

/// Writes `document` with custom options.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::{parse, to_string_with_options, WriterOptions};
///
/// let doc = parse("a { b; }").unwrap();
/// let text = to_string_with_options(&doc, &WriterOptions::verbatim().with_indent(2));
/// assert_eq!(text, "a {\n  b;\n}\n");
/// ```
#[must_use]
pub fn to_string_with_options(document: &Document, options: &WriterOptions) -> String {
    let mut writer = Writer::new(options.clone());
    writer.write_document(document);
    writer.into_inner()
}

/// Writes `document` in canonical style to an I/O sink.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::{parse, to_writer};
///
/// let doc = parse("node 0b101").unwrap();
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &doc).unwrap();
/// assert_eq!(buffer, b"node 5\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if the sink fails.
pub fn to_writer<W: io::Write>(writer: W, document: &Document) -> Result<()> {
    to_writer_with_options(writer, document, &WriterOptions::default())
}

/// Writes `document` with custom options to an I/O sink.
///
/// # Errors
///
/// Returns [`Error::Io`] if the sink fails.
pub fn to_writer_with_options<W: io::Write>(
    mut writer: W,
    document: &Document,
    options: &WriterOptions,
) -> Result<()> {
    let text = to_string_with_options(document, options);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_validates() {
        assert!(matches!(from_str("n (u8)256"), Err(Error::Validation(_))));
        assert!(from_str("n (u8)255").is_ok());
    }

    #[test]
    fn test_empty_document() {
        let doc = parse("").unwrap();
        assert!(doc.is_empty());
        assert_eq!(to_string(&doc), "");
        assert!(parse("  // only a comment\n/* and this */\n").unwrap().is_empty());
    }

    #[test]
    fn test_to_writer_surfaces_io_errors() {
        struct Broken;
        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let doc = parse("a").unwrap();
        let err = to_writer(Broken, &doc).unwrap_err();
        assert!(matches!(err, Error::Io(msg) if msg.contains("disk full")));
    }
}
