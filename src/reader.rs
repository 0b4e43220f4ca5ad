//! The reader façade: parse, then optionally validate.
//!
//! A [`KdlReader`] only holds its [`ReaderOptions`]; every call keeps its working state on the
//! stack, so one reader can serve any number of threads. [`default_reader`] hands out a
//! process-wide instance built on first use.
//!
//! ## Examples
//!
//! ```rust
//! use kdl_reader::{Error, KdlReader, ReaderOptions};
//!
//! let strict = KdlReader::new();
//! assert!(matches!(strict.read("port (u8)300"), Err(Error::Validation(_))));
//!
//! let lenient = KdlReader::with_options(ReaderOptions::new().with_validate(false));
//! assert!(lenient.read("port (u8)300").is_ok());
//! ```

use crate::error::{Error, Result};
use crate::node::Document;
use crate::options::ReaderOptions;
use crate::parser::Parser;
use crate::validate::validate;
use std::io::Read;
use std::sync::OnceLock;

/// Reads documents with a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct KdlReader {
    options: ReaderOptions,
}

impl KdlReader {
    /// A reader that validates reserved types and drops slashdash trivia.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: ReaderOptions) -> Self {
        KdlReader { options }
    }

    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Parses `input` and, if enabled, validates its reserved type annotations.
    pub fn read(&self, input: &str) -> Result<Document> {
        let document = Parser::new(input, &self.options).parse_document()?;
        if self.options.validate {
            validate(&document)?;
        }
        Ok(document)
    }

    /// Like [`read`](Self::read), for UTF-8 bytes.
    pub fn read_slice(&self, bytes: &[u8]) -> Result<Document> {
        let input = std::str::from_utf8(bytes)
            .map_err(|e| Error::io(&format!("input is not valid UTF-8: {}", e)))?;
        self.read(input)
    }

    /// Reads all of `reader` and then parses it.
    pub fn read_from<R: Read>(&self, mut reader: R) -> Result<Document> {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .map_err(|e| Error::io(&e.to_string()))?;
        self.read(&input)
    }
}

/// The shared reader with default options, built on first use.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::default_reader;
///
/// let a = default_reader();
/// let b = default_reader();
/// assert!(std::ptr::eq(a, b));
/// assert!(a.options().validate);
/// ```
pub fn default_reader() -> &'static KdlReader {
    static READER: OnceLock<KdlReader> = OnceLock::new();
    READER.get_or_init(KdlReader::new)
}
