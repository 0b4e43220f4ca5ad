//! Character classes, trivia and literal recognizers.
//!
//! The [`Cursor`] walks the input one `char` at a time and knows how to consume the
//! insignificant parts of a document (spaces, newlines, comments, line continuations) and the
//! four literal categories: strings, numbers, keywords and identifiers.
//!
//! Positions are byte offsets; line and column are only computed when an error is built.

use crate::error::{Error, Result};
use crate::number::Number;
use crate::value::{KdlString, StringKind, Value};

/// Words a bare identifier may not spell.
pub(crate) const RESERVED_WORDS: [&str; 6] = ["true", "false", "null", "inf", "-inf", "nan"];

/// Newline class: each of these ends a line. `\r\n` is consumed as one break.
#[inline]
pub fn is_newline(ch: char) -> bool {
    matches!(
        ch,
        '\u{A}' | '\u{B}' | '\u{C}' | '\u{D}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Unicode horizontal space class.
#[inline]
pub fn is_space(ch: char) -> bool {
    matches!(
        ch,
        '\u{9}' | '\u{20}' | '\u{A0}' | '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

/// Code points that may not appear anywhere in a document.
#[inline]
pub fn is_disallowed(ch: char) -> bool {
    matches!(
        ch,
        '\u{0}'..='\u{8}'
            | '\u{E}'..='\u{1F}'
            | '\u{7F}'
            | '\u{200E}'
            | '\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FEFF}'
    )
}

#[inline]
pub fn is_identifier_char(ch: char) -> bool {
    !(is_disallowed(ch)
        || is_space(ch)
        || is_newline(ch)
        || matches!(
            ch,
            '\\' | '/' | '(' | ')' | '{' | '}' | ';' | '[' | ']' | '"' | '#' | '='
        ))
}

/// `[+-]?[0-9]` prefix: the text must be read as a number.
pub(crate) fn looks_like_number(text: &str) -> bool {
    let text = text.strip_prefix(['+', '-']).unwrap_or(text);
    text.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// `[+-]?.[0-9]` prefix: neither a valid number nor a valid identifier.
fn looks_like_fraction(text: &str) -> bool {
    let text = text.strip_prefix(['+', '-']).unwrap_or(text);
    text.strip_prefix('.')
        .is_some_and(|rest| rest.as_bytes().first().is_some_and(u8::is_ascii_digit))
}

/// Returns `true` when `text` can be written without quotes.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::lexer::is_bare_identifier;
///
/// assert!(is_bare_identifier("node-name"));
/// assert!(is_bare_identifier("-flag"));
/// assert!(!is_bare_identifier("1st"));
/// assert!(!is_bare_identifier("true"));
/// assert!(!is_bare_identifier("with space"));
/// assert!(!is_bare_identifier(""));
/// ```
pub fn is_bare_identifier(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(is_identifier_char)
        && !looks_like_number(text)
        && !looks_like_fraction(text)
        && !RESERVED_WORDS.contains(&text)
}

/// A literal as recognized by the lexer, before any annotation is attached.
#[derive(Debug)]
pub(crate) enum Literal {
    String(KdlString),
    Number(Number),
    Bool(bool),
    Null,
}

impl Literal {
    pub(crate) fn into_value(self) -> Value {
        match self {
            Literal::String(s) => Value::String(s),
            Literal::Number(n) => Value::Number(n),
            Literal::Bool(b) => Value::Bool(b),
            Literal::Null => Value::Null,
        }
    }
}

/// A position-tracking reader over the document text.
pub(crate) struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Cursor { input, position: 0 }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Rewinds or advances to an offset previously returned by [`Cursor::position`].
    #[inline]
    pub(crate) fn reset(&mut self, position: usize) {
        self.position = position;
    }

    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    pub(crate) fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    #[inline]
    pub(crate) fn starts_with(&self, pattern: &str) -> bool {
        self.rest().starts_with(pattern)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_str(&mut self, expected: &str) -> bool {
        if self.starts_with(expected) {
            self.position += expected.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn lexical(&self, offset: usize, msg: &str) -> Error {
        Error::lexical(self.input, offset, msg)
    }

    pub(crate) fn syntax(&self, offset: usize, msg: &str) -> Error {
        Error::syntax(self.input, offset, msg)
    }

    pub(crate) fn reserved(&self, offset: usize, keyword: &str) -> Error {
        Error::reserved_keyword(self.input, offset, keyword)
    }

    fn disallowed(&self, ch: char) -> Error {
        self.lexical(
            self.position,
            &format!("disallowed character U+{:04X}", ch as u32),
        )
    }

    // ---- trivia -------------------------------------------------------------------------

    /// Consumes one line break if present; `\r\n` counts as one.
    pub(crate) fn eat_newline(&mut self) -> bool {
        match self.peek() {
            Some('\r') => {
                self.bump();
                self.eat('\n');
                true
            }
            Some(ch) if is_newline(ch) => {
                self.bump();
                true
            }
            _ => false,
        }
    }

    /// Body of a `//` comment: everything up to and including the line break.
    pub(crate) fn single_line_comment(&mut self) -> Result<()> {
        debug_assert!(self.starts_with("//"));
        self.position += 2;
        loop {
            match self.peek() {
                None => return Ok(()),
                Some(ch) if is_newline(ch) => {
                    self.eat_newline();
                    return Ok(());
                }
                Some(ch) if is_disallowed(ch) => return Err(self.disallowed(ch)),
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// A `/* ... */` comment; nested openers must each be closed.
    pub(crate) fn block_comment(&mut self) -> Result<()> {
        let start = self.position;
        debug_assert!(self.starts_with("/*"));
        self.position += 2;
        let mut depth = 1_usize;
        loop {
            if self.eat_str("*/") {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            } else if self.eat_str("/*") {
                depth += 1;
            } else {
                match self.peek() {
                    None => return Err(self.lexical(start, "unterminated block comment")),
                    Some(ch) if is_disallowed(ch) => return Err(self.disallowed(ch)),
                    Some(_) => {
                        self.bump();
                    }
                }
            }
        }
    }

    /// Line continuation after `\`: spaces and block comments, then a single-line comment,
    /// a newline or end of input.
    fn escline(&mut self) -> Result<()> {
        let start = self.position;
        debug_assert_eq!(self.peek(), Some('\\'));
        self.bump();
        loop {
            match self.peek() {
                Some(ch) if is_space(ch) => {
                    self.bump();
                }
                Some('/') if self.peek_second() == Some('*') => self.block_comment()?,
                _ => break,
            }
        }
        if self.starts_with("//") {
            self.single_line_comment()
        } else if self.eat_newline() || self.at_end() {
            Ok(())
        } else {
            Err(self.syntax(
                start,
                "line continuation `\\` must be followed by a newline or comment",
            ))
        }
    }

    /// Whitespace allowed inside a node: spaces, block comments and line continuations.
    /// Returns `true` if anything was consumed.
    pub(crate) fn node_space(&mut self) -> Result<bool> {
        let start = self.position;
        loop {
            match self.peek() {
                Some(ch) if is_space(ch) => {
                    self.bump();
                }
                Some('/') if self.peek_second() == Some('*') => self.block_comment()?,
                Some('\\') => self.escline()?,
                _ => break,
            }
        }
        Ok(self.position != start)
    }

    /// Whitespace allowed between nodes: node space, newlines and single-line comments.
    pub(crate) fn line_space(&mut self) -> Result<()> {
        loop {
            self.node_space()?;
            if self.eat_newline() {
                continue;
            }
            if self.starts_with("//") {
                self.single_line_comment()?;
                continue;
            }
            return Ok(());
        }
    }

    // ---- literals -----------------------------------------------------------------------

    /// Any literal: string, number, keyword or identifier.
    pub(crate) fn literal(&mut self) -> Result<Literal> {
        let start = self.position;
        match self.peek() {
            Some('"') => self.quoted_string().map(Literal::String),
            Some('#') => self.keyword(),
            Some('r') if self.raw_string_ahead() => self.raw_string().map(Literal::String),
            Some(ch) if is_identifier_char(ch) => {
                let text = self.identifier_run();
                if looks_like_number(text) {
                    Number::parse(text)
                        .map(Literal::Number)
                        .map_err(|_| self.lexical(start, &format!("invalid number `{}`", text)))
                } else if looks_like_fraction(text) {
                    Err(self.lexical(
                        start,
                        &format!("invalid number `{}`: a leading digit is required before `.`", text),
                    ))
                } else if RESERVED_WORDS.contains(&text) {
                    Err(self.reserved(start, text))
                } else {
                    Ok(Literal::String(KdlString::new(text, StringKind::Identifier)))
                }
            }
            Some(ch) if is_disallowed(ch) => Err(self.disallowed(ch)),
            Some(ch) => Err(self.syntax(start, &format!("expected a value, found `{}`", ch))),
            None => Err(self.syntax(start, "unexpected end of input, expected a value")),
        }
    }

    /// A literal that must be a string, e.g. a node name, key or annotation.
    pub(crate) fn string(&mut self, what: &str) -> Result<KdlString> {
        let start = self.position;
        match self.literal()? {
            Literal::String(s) => Ok(s),
            other => Err(self.syntax(
                start,
                &format!(
                    "{} must be a string, found {}",
                    what,
                    other.into_value().category()
                ),
            )),
        }
    }

    fn identifier_run(&mut self) -> &'a str {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if !is_identifier_char(ch) {
                break;
            }
            self.bump();
        }
        self.slice(start, self.position)
    }

    /// `#true`, `#false`, `#null`, `#inf`, `#-inf`, `#nan`.
    fn keyword(&mut self) -> Result<Literal> {
        let start = self.position;
        self.bump();
        let word = self.identifier_run();
        match word {
            "true" => Ok(Literal::Bool(true)),
            "false" => Ok(Literal::Bool(false)),
            "null" => Ok(Literal::Null),
            "inf" => Ok(Literal::Number(Number::infinity())),
            "-inf" => Ok(Literal::Number(Number::neg_infinity())),
            "nan" => Ok(Literal::Number(Number::nan())),
            "" => Err(self.lexical(start, "expected a keyword after `#`")),
            other => Err(self.lexical(start, &format!("unknown keyword `#{}`", other))),
        }
    }

    /// `r`, any number of `#`, then `"`.
    fn raw_string_ahead(&self) -> bool {
        let rest = &self.rest()[1..];
        rest.trim_start_matches('#').starts_with('"')
    }

    /// `"..."` or `"""..."""`.
    fn quoted_string(&mut self) -> Result<KdlString> {
        let start = self.position;
        if self.starts_with("\"\"\"") {
            self.position += 3;
            let body = self.multiline_body(start, 0, true)?;
            let text = self.dedent(body)?;
            let value = unescape(&text).map_err(|msg| self.lexical(start, &msg))?;
            return Ok(KdlString::new(value, StringKind::Multiline));
        }
        self.bump();
        let mut value = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.bump();
                    return Ok(KdlString::new(value, StringKind::Quoted));
                }
                Some('\\') => {
                    let at = self.position;
                    self.bump();
                    self.escape(at, &mut value)?;
                }
                Some(ch) if is_newline(ch) => {
                    return Err(self.lexical(
                        self.position,
                        "unexpected newline in single-line string; use a `\"\"\"` multiline string",
                    ))
                }
                Some(ch) if is_disallowed(ch) => return Err(self.disallowed(ch)),
                Some(ch) => {
                    self.bump();
                    value.push(ch);
                }
                None => return Err(self.lexical(start, "unterminated string")),
            }
        }
    }

    /// Escape sequence after `\` (already consumed at `at`).
    fn escape(&mut self, at: usize, out: &mut String) -> Result<()> {
        let ch = self
            .bump()
            .ok_or_else(|| self.lexical(at, "unterminated escape sequence"))?;
        match ch {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{C}'),
            's' => out.push(' '),
            'u' => {
                let rest = self.rest();
                let hex = rest
                    .strip_prefix('{')
                    .and_then(|r| r.split_once('}'))
                    .map(|(hex, _)| hex)
                    .filter(|hex| (1..=6).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit()))
                    .ok_or_else(|| self.lexical(at, "invalid unicode escape, expected `\\u{1-6 hex digits}`"))?;
                let ch = u32::from_str_radix(hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| self.lexical(at, "invalid unicode scalar value in escape"))?;
                self.position += hex.len() + 2;
                out.push(ch);
            }
            ch if is_space(ch) || is_newline(ch) => {
                while let Some(next) = self.peek() {
                    if !is_space(next) && !is_newline(next) {
                        break;
                    }
                    self.bump();
                }
            }
            other => {
                return Err(self.lexical(at, &format!("invalid escape sequence `\\{}`", other)))
            }
        }
        Ok(())
    }

    /// `r#"..."#` or `r#"""..."""#`.
    fn raw_string(&mut self) -> Result<KdlString> {
        let start = self.position;
        self.bump();
        let mut hashes = 0;
        while self.eat('#') {
            hashes += 1;
        }
        let closer = format!("\"{}", "#".repeat(hashes));
        if self.starts_with("\"\"\"") {
            self.position += 3;
            let body = self.multiline_body(start, hashes, false)?;
            let value = self.dedent(body)?;
            return Ok(KdlString::new(value, StringKind::RawMultiline { hashes }));
        }
        self.bump();
        let content_start = self.position;
        loop {
            if self.starts_with(&closer) {
                let value = self.slice(content_start, self.position).to_string();
                self.position += closer.len();
                if self.peek() == Some('#') {
                    return Err(self.lexical(
                        self.position,
                        &format!("raw string opened with {} `#` is closed with more", hashes),
                    ));
                }
                return Ok(KdlString::new(value, StringKind::Raw { hashes }));
            }
            match self.peek() {
                Some(ch) if is_newline(ch) => {
                    return Err(self.lexical(
                        self.position,
                        "unexpected newline in single-line raw string",
                    ))
                }
                Some(ch) if is_disallowed(ch) => return Err(self.disallowed(ch)),
                Some(_) => {
                    self.bump();
                }
                None => {
                    return Err(self.lexical(
                        start,
                        &format!("unterminated raw string, expected `{}`", closer),
                    ))
                }
            }
        }
    }

    /// Everything between the opening `"""` (already consumed) and the closing `"""` plus
    /// `hashes` hashes, which is consumed. Returns the body starting after the first newline
    /// together with its source offset.
    fn multiline_body(
        &mut self,
        start: usize,
        hashes: usize,
        escapes: bool,
    ) -> Result<(usize, &'a str)> {
        if !self.eat_newline() {
            return Err(self.lexical(
                self.position,
                "multiline string must start with a newline after `\"\"\"`",
            ));
        }
        let closer = format!("\"\"\"{}", "#".repeat(hashes));
        let body_start = self.position;
        loop {
            if self.starts_with(&closer) {
                let body = self.slice(body_start, self.position);
                self.position += closer.len();
                if hashes > 0 && self.peek() == Some('#') {
                    return Err(self.lexical(
                        self.position,
                        &format!("raw string opened with {} `#` is closed with more", hashes),
                    ));
                }
                return Ok((body_start, body));
            }
            match self.peek() {
                Some('\\') if escapes => {
                    self.bump();
                    self.bump();
                }
                Some(ch) if is_disallowed(ch) => return Err(self.disallowed(ch)),
                Some(_) => {
                    self.bump();
                }
                None => return Err(self.lexical(start, "unterminated multiline string")),
            }
        }
    }

    /// Strips the closing line's indentation from every content line.
    fn dedent(&self, (body_start, body): (usize, &str)) -> Result<String> {
        let mut lines: Vec<(usize, &str)> = Vec::new();
        let mut line_start = 0;
        let mut chars = body.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            if is_newline(ch) {
                lines.push((body_start + line_start, &body[line_start..i]));
                let mut next = i + ch.len_utf8();
                if ch == '\r' {
                    if let Some(&(j, '\n')) = chars.peek() {
                        chars.next();
                        next = j + 1;
                    }
                }
                line_start = next;
            }
        }
        let indent = &body[line_start..];
        if let Some(bad) = indent.char_indices().find(|&(_, ch)| !is_space(ch)) {
            return Err(self.lexical(
                body_start + line_start + bad.0,
                "closing `\"\"\"` must be on its own line, preceded only by whitespace",
            ));
        }
        let mut out = Vec::with_capacity(lines.len());
        for (offset, line) in lines {
            if line.chars().all(is_space) {
                out.push("");
            } else if let Some(stripped) = line.strip_prefix(indent) {
                out.push(stripped);
            } else {
                return Err(self.lexical(
                    offset,
                    "multiline string line is not indented like its closing `\"\"\"`",
                ));
            }
        }
        Ok(out.join("\n"))
    }
}

/// Processes escapes in already-dedented multiline text.
fn unescape(text: &str) -> std::result::Result<String, String> {
    if !text.contains('\\') {
        return Ok(text.to_string());
    }
    let mut cursor = Cursor::new(text);
    let mut out = String::with_capacity(text.len());
    while let Some(ch) = cursor.peek() {
        if ch == '\\' {
            let at = cursor.position();
            cursor.bump();
            cursor.escape(at, &mut out).map_err(|e| match e {
                Error::Lexical { msg, .. } => msg,
                other => other.to_string(),
            })?;
        } else {
            cursor.bump();
            out.push(ch);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(input: &str) -> Result<Literal> {
        Cursor::new(input).literal()
    }

    fn string_of(input: &str) -> KdlString {
        match lit(input).unwrap() {
            Literal::String(s) => s,
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_identifier() {
        let s = string_of("hello-world rest");
        assert_eq!(s.value(), "hello-world");
        assert_eq!(s.kind(), StringKind::Identifier);
    }

    #[test]
    fn test_reserved_bare_words() {
        for word in ["true", "false", "null", "inf", "-inf", "nan"] {
            assert!(
                matches!(lit(word), Err(Error::ReservedKeyword { .. })),
                "{word}"
            );
        }
        assert_eq!(string_of("trueish").value(), "trueish");
    }

    #[test]
    fn test_keywords() {
        assert!(matches!(lit("#true").unwrap(), Literal::Bool(true)));
        assert!(matches!(lit("#false").unwrap(), Literal::Bool(false)));
        assert!(matches!(lit("#null").unwrap(), Literal::Null));
        match lit("#-inf").unwrap() {
            Literal::Number(n) => assert_eq!(n.raw(), "#-inf"),
            other => panic!("{:?}", other),
        }
        assert!(matches!(lit("#yes"), Err(Error::Lexical { .. })));
    }

    #[test]
    fn test_numbers_keep_raw_text() {
        match lit("0xDEAD_beef").unwrap() {
            Literal::Number(n) => assert_eq!(n.raw(), "0xDEAD_beef"),
            other => panic!("{:?}", other),
        }
        assert!(matches!(lit("1.5.5"), Err(Error::Lexical { .. })));
        assert!(matches!(lit(".5"), Err(Error::Lexical { .. })));
    }

    #[test]
    fn test_quoted_escapes() {
        let s = string_of(r#""a\tb\n\"q\" \\ \u{1F600} \s\
              end""#);
        assert_eq!(s.value(), "a\tb\n\"q\" \\ \u{1F600}  end");
        assert_eq!(s.kind(), StringKind::Quoted);
    }

    #[test]
    fn test_invalid_escape() {
        let err = lit(r#""bad \q""#).unwrap_err();
        assert!(matches!(err, Error::Lexical { .. }));
        assert_eq!(err.column(), Some(6));
        assert!(lit(r#""\u{110000}""#).is_err());
        assert!(lit(r#""\u{}""#).is_err());
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(lit("\"abc"), Err(Error::Lexical { .. })));
        assert!(matches!(lit("\"abc\ndef\""), Err(Error::Lexical { .. })));
    }

    #[test]
    fn test_raw_strings() {
        let s = string_of(r##"r#"C:\path "quoted""#"##);
        assert_eq!(s.value(), r#"C:\path "quoted""#);
        assert_eq!(s.kind(), StringKind::Raw { hashes: 1 });

        let s = string_of(r#"r"plain""#);
        assert_eq!(s.value(), "plain");
        assert_eq!(s.kind(), StringKind::Raw { hashes: 0 });
    }

    #[test]
    fn test_raw_string_hash_mismatch() {
        assert!(matches!(lit(r###"r##"abc"#"###), Err(Error::Lexical { .. })));
        assert!(matches!(lit(r###"r#"abc"##"###), Err(Error::Lexical { .. })));
    }

    #[test]
    fn test_r_alone_is_identifier() {
        assert_eq!(string_of("r").value(), "r");
        assert_eq!(string_of("raw").value(), "raw");
    }

    #[test]
    fn test_multiline_dedent() {
        let s = string_of("\"\"\"\n    first\n      second\n\n    third\n    \"\"\"");
        assert_eq!(s.value(), "first\n  second\n\nthird");
        assert_eq!(s.kind(), StringKind::Multiline);
    }

    #[test]
    fn test_multiline_escapes_after_dedent() {
        let s = string_of("\"\"\"\n  a\\tb\n  \\\"\"\"\n  \"\"\"");
        assert_eq!(s.value(), "a\tb\n\"\"\"");
    }

    #[test]
    fn test_multiline_bad_indent() {
        let err = lit("\"\"\"\n  a\n b\n  \"\"\"").unwrap_err();
        assert!(matches!(err, Error::Lexical { .. }));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_multiline_requires_newline_and_own_closing_line() {
        assert!(lit("\"\"\"abc\n\"\"\"").is_err());
        assert!(lit("\"\"\"\n  abc\"\"\"").is_err());
    }

    #[test]
    fn test_raw_multiline() {
        let s = string_of("r#\"\"\"\n  a \\n \"\"\" b\n  \"\"\"#");
        assert_eq!(s.value(), "a \\n \"\"\" b");
        assert_eq!(s.kind(), StringKind::RawMultiline { hashes: 1 });
    }

    #[test]
    fn test_empty_multiline() {
        assert_eq!(string_of("\"\"\"\n\"\"\"").value(), "");
    }

    #[test]
    fn test_nested_block_comment() {
        let mut cursor = Cursor::new("/* a /* b */ c */rest");
        cursor.block_comment().unwrap();
        assert_eq!(cursor.rest(), "rest");
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut cursor = Cursor::new("/* a /* b */ c");
        let err = cursor.block_comment().unwrap_err();
        assert!(matches!(err, Error::Lexical { .. }));
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn test_line_space_skips_comments() {
        let mut cursor = Cursor::new("  // one\n/* two */\r\n  \\\n  node");
        cursor.line_space().unwrap();
        assert_eq!(cursor.rest(), "node");
    }

    #[test]
    fn test_node_space_stops_at_newline() {
        let mut cursor = Cursor::new(" \t/* c */ \nnext");
        assert!(cursor.node_space().unwrap());
        assert_eq!(cursor.rest(), "\nnext");
    }

    #[test]
    fn test_escline_requires_newline() {
        let mut cursor = Cursor::new("\\ x");
        assert!(matches!(cursor.node_space(), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_disallowed_character() {
        assert!(matches!(lit("\"a\u{7F}\""), Err(Error::Lexical { .. })));
    }
}
