//! Error types for reading, writing and validating KDL documents.
//!
//! ## Error Categories
//!
//! - **Lexical errors**: malformed literals (bad escapes, unbalanced raw-string hashes,
//!   bad multiline indentation, unterminated strings or comments)
//! - **Syntax errors**: unexpected tokens, unexpected end of input, missing terminators
//! - **Reserved keywords**: bare `true`, `false` or `null` where an identifier is required
//! - **Validation errors**: values whose reserved type annotation does not match their content
//!
//! Parse errors carry a [`Position`]: a 0-based byte offset together with the 1-based line
//! and column of the failure.
//!
//! ## Examples
//!
//! ```rust
//! use kdl_reader::{parse, Error};
//!
//! let err = parse("node {\n  child 1\n").unwrap_err();
//! assert!(matches!(err, Error::Syntax { .. }));
//! assert_eq!(err.line(), Some(3));
//! ```

use crate::number::NumberError;
use crate::validate::ValidationErrors;
use std::fmt;
use thiserror::Error;

/// Location of a parse failure in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// 0-based byte offset.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Position {
    /// Computes the line and column of `offset` by scanning `input` up to it.
    ///
    /// Every newline class counts as a line break; `\r\n` counts once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_reader::Position;
    ///
    /// let pos = Position::locate("a\r\nbc", 4);
    /// assert_eq!((pos.line, pos.column), (2, 2));
    /// ```
    pub fn locate(input: &str, offset: usize) -> Self {
        let mut offset = offset.min(input.len());
        while !input.is_char_boundary(offset) {
            offset -= 1;
        }
        let mut line = 1;
        let mut column = 1;
        let mut chars = input[..offset].chars().peekable();
        while let Some(ch) = chars.next() {
            if crate::lexer::is_newline(ch) {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Position {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed literal
    #[error("Lexical error at line {line}, column {column}: {msg}")]
    Lexical {
        line: usize,
        column: usize,
        offset: usize,
        msg: String,
    },

    /// Unexpected token, unexpected end of input or missing terminator
    #[error("Syntax error at line {line}, column {column}: {msg}")]
    Syntax {
        line: usize,
        column: usize,
        offset: usize,
        msg: String,
    },

    /// A bare reserved word used where an identifier is required
    #[error("Reserved keyword `{keyword}` at line {line}, column {column}: bare identifiers cannot be keywords\nHelp: write `#{keyword}` for the keyword or \"{keyword}\" for the string")]
    ReservedKeyword {
        line: usize,
        column: usize,
        offset: usize,
        keyword: String,
    },

    /// Every reserved-type violation found in a document
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Numeric conversion failure
    #[error("Number error: {0}")]
    Number(#[from] NumberError),

    /// A binding contract could not be satisfied
    #[error("Binding error: {0}")]
    Binding(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a lexical error at `offset` within `input`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_reader::Error;
    ///
    /// let err = Error::lexical("a\nb", 2, "bad escape");
    /// assert!(err.to_string().contains("line 2"));
    /// ```
    pub fn lexical(input: &str, offset: usize, msg: &str) -> Self {
        let pos = Position::locate(input, offset);
        Error::Lexical {
            line: pos.line,
            column: pos.column,
            offset: pos.offset,
            msg: msg.to_string(),
        }
    }

    /// Creates a syntax error at `offset` within `input`.
    pub fn syntax(input: &str, offset: usize, msg: &str) -> Self {
        let pos = Position::locate(input, offset);
        Error::Syntax {
            line: pos.line,
            column: pos.column,
            offset: pos.offset,
            msg: msg.to_string(),
        }
    }

    /// Creates a reserved-keyword error for `keyword` found at `offset`.
    pub fn reserved_keyword(input: &str, offset: usize, keyword: &str) -> Self {
        let pos = Position::locate(input, offset);
        Error::ReservedKeyword {
            line: pos.line,
            column: pos.column,
            offset: pos.offset,
            keyword: keyword.to_string(),
        }
    }

    /// Creates a binding error.
    pub fn binding<T: fmt::Display>(msg: T) -> Self {
        Error::Binding(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_reader::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the source position for lexical, syntax and reserved-keyword errors.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Lexical {
                line,
                column,
                offset,
                ..
            }
            | Error::Syntax {
                line,
                column,
                offset,
                ..
            }
            | Error::ReservedKeyword {
                line,
                column,
                offset,
                ..
            } => Some(Position {
                offset: *offset,
                line: *line,
                column: *column,
            }),
            _ => None,
        }
    }

    /// 1-based line of a parse failure.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.position().map(|p| p.line)
    }

    /// 1-based column of a parse failure.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        self.position().map(|p| p.column)
    }

    /// 0-based byte offset of a parse failure.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        self.position().map(|p| p.offset)
    }

    /// The collected violations, if this is a validation failure.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
