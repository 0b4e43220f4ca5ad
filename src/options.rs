//! Configuration for reading and writing documents.
//!
//! - [`WriterOptions`]: indentation and [`WriteStyle`] for the writer
//! - [`ReaderOptions`]: whether to validate reserved types and keep slashdash trivia
//!
//! ## Examples
//!
//! ```rust
//! use kdl_reader::{parse, to_string_with_options, WriterOptions};
//!
//! let doc = parse("node 0xff \"text\"").unwrap();
//!
//! let canonical = to_string_with_options(&doc, &WriterOptions::new());
//! assert_eq!(canonical, "node 255 text\n");
//!
//! let verbatim = to_string_with_options(&doc, &WriterOptions::verbatim());
//! assert_eq!(verbatim, "node 0xff \"text\"\n");
//! ```

/// How the writer renders strings and numbers.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::WriteStyle;
///
/// assert_eq!(WriteStyle::default(), WriteStyle::Canonical);
/// assert!(WriteStyle::Verbatim.is_verbatim());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WriteStyle {
    /// Fixed renderings: bare identifiers where possible, decimal numbers, no trivia.
    #[default]
    Canonical,
    /// Keep each value's string form and number spelling, slashdash trivia and `;` terminators.
    Verbatim,
}

impl WriteStyle {
    #[must_use]
    pub const fn is_verbatim(&self) -> bool {
        matches!(self, WriteStyle::Verbatim)
    }
}

/// Writer configuration.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::{WriterOptions, WriteStyle};
///
/// let options = WriterOptions::new();
/// assert_eq!(options.indent, 4);
/// assert_eq!(options.style, WriteStyle::Canonical);
///
/// let options = WriterOptions::verbatim().with_indent(2);
/// assert_eq!(options.indent, 2);
/// assert_eq!(options.style, WriteStyle::Verbatim);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriterOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    pub style: WriteStyle,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            indent: 4,
            style: WriteStyle::default(),
        }
    }
}

impl WriterOptions {
    /// Creates default options (canonical, 4-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn canonical() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn verbatim() -> Self {
        WriterOptions {
            style: WriteStyle::Verbatim,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: WriteStyle) -> Self {
        self.style = style;
        self
    }
}

/// Default nesting limit for children blocks. The parser recurses once per level.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Reader configuration.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::ReaderOptions;
///
/// let options = ReaderOptions::new();
/// assert!(options.validate);
/// assert!(!options.preserve_slashdash);
/// assert_eq!(options.max_depth, 128);
///
/// let lenient = ReaderOptions::new().with_validate(false);
/// assert!(!lenient.validate);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Check reserved type annotations after parsing.
    pub validate: bool,
    /// Keep slashdash-elided entries and blocks as [`Entry::Skipped`](crate::Entry::Skipped).
    ///
    /// Only elisions inside a node are kept. A slashdashed node has no entry list to live in
    /// and is always dropped, so verbatim output of `a\n/- b\nc` is `a\nc\n`.
    pub preserve_slashdash: bool,
    /// How deeply children blocks may nest before the parse fails.
    pub max_depth: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            validate: true,
            preserve_slashdash: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ReaderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    #[must_use]
    pub fn with_preserve_slashdash(mut self, preserve: bool) -> Self {
        self.preserve_slashdash = preserve;
        self
    }

    /// Sets the nesting limit for children blocks, elided ones included.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
