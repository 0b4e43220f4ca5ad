//! Document grammar.
//!
//! A single-pass recursive descent over a [`Cursor`]: document → nodes → entries → values.
//! The first lexical or syntax failure aborts the parse; no partial tree is ever returned.
//!
//! ```text
//! document := bom? nodes
//! nodes    := (line-space* ('/-' line-space*)? node)* line-space*
//! node     := type? node-space* string (node-space+ entry)* (node-space* ('/-' line-space*)? children)* terminator
//! entry    := ('/-' line-space*)? (property | value)
//! property := string '=' value
//! value    := type? node-space* literal
//! type     := '(' node-space* string node-space* ')'
//! ```
//!
//! Children blocks nest at most [`ReaderOptions::max_depth`] levels deep.

use crate::error::Result;
use crate::lexer::{is_newline, Cursor, Literal};
use crate::node::{Block, Document, Entry, Node};
use crate::options::ReaderOptions;
use crate::value::TypedValue;
use log::{debug, trace};

pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    preserve_slashdash: bool,
    max_depth: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str, options: &ReaderOptions) -> Self {
        Parser {
            cursor: Cursor::new(input),
            preserve_slashdash: options.preserve_slashdash,
            max_depth: options.max_depth,
            depth: 0,
        }
    }

    pub(crate) fn parse_document(mut self) -> Result<Document> {
        self.cursor.eat('\u{FEFF}');
        let nodes = self.parse_nodes(None)?;
        debug!("parsed document with {} top-level nodes", nodes.len());
        Ok(Document::new(nodes))
    }

    /// Nodes up to the closing `}` of the block opened at `open_brace`, or to end of input for
    /// the document. The `}` itself is left for the caller.
    fn parse_nodes(&mut self, open_brace: Option<usize>) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            self.cursor.line_space()?;
            let at = self.cursor.position();
            match (self.cursor.peek(), open_brace) {
                (None, None) => return Ok(nodes),
                (None, Some(_)) => {
                    return Err(self
                        .cursor
                        .syntax(at, "unexpected end of input, expected `}` to close children block"))
                }
                (Some('}'), Some(_)) => return Ok(nodes),
                (Some('}'), None) => {
                    return Err(self.cursor.syntax(at, "unexpected `}` with no matching `{`"))
                }
                (Some(';'), _) => {
                    return Err(self.cursor.syntax(at, "unexpected `;` with no node to terminate"))
                }
                _ => {}
            }
            if self.cursor.eat_str("/-") {
                self.cursor.line_space()?;
                if self.cursor.at_end() || self.cursor.peek() == Some('}') {
                    return Err(self
                        .cursor
                        .syntax(at, "`/-` must be followed by a node"));
                }
                let node = self.parse_node()?;
                trace!("elided node `{}` at depth {}", node.name(), self.depth);
                continue;
            }
            nodes.push(self.parse_node()?);
        }
    }

    fn parse_node(&mut self) -> Result<Node> {
        let annotation = self.parse_annotation()?;
        if annotation.is_some() {
            self.cursor.node_space()?;
        }
        let name = self.cursor.string("node name")?;
        let mut entries = Vec::new();
        let mut children: Option<Block> = None;
        // Set by elided blocks as well; entries may not follow either kind.
        let mut seen_block = false;
        let mut terminated = false;

        loop {
            let spaced = self.cursor.node_space()?;
            let at = self.cursor.position();
            match self.cursor.peek() {
                None | Some('}') => break,
                Some(';') => {
                    self.cursor.bump();
                    terminated = true;
                    break;
                }
                Some(ch) if is_newline(ch) => {
                    self.cursor.eat_newline();
                    break;
                }
                Some('/') if self.cursor.starts_with("//") => {
                    self.cursor.single_line_comment()?;
                    break;
                }
                Some('{') => {
                    if children.is_some() {
                        return Err(self
                            .cursor
                            .syntax(at, "a node may have only one children block"));
                    }
                    children = Some(self.parse_children()?);
                    seen_block = true;
                }
                Some('/') if self.cursor.starts_with("/-") => {
                    self.cursor.eat_str("/-");
                    self.cursor.line_space()?;
                    let item = self.cursor.position();
                    match self.cursor.peek() {
                        None | Some('}') | Some(';') => {
                            return Err(self
                                .cursor
                                .syntax(at, "`/-` must be followed by an entry or children block"))
                        }
                        Some('{') => {
                            self.parse_children()?;
                            seen_block = true;
                        }
                        Some(_) => {
                            if seen_block {
                                return Err(self.cursor.syntax(
                                    item,
                                    "entries must come before the children block",
                                ));
                            }
                            if !spaced {
                                return Err(self
                                    .cursor
                                    .syntax(at, "expected whitespace before the next entry"));
                            }
                            self.parse_entry()?;
                        }
                    }
                    let text = self.cursor.slice(item, self.cursor.position());
                    trace!("elided `{}` on node `{}`", text, name.value());
                    if self.preserve_slashdash {
                        entries.push(Entry::Skipped(text.to_string()));
                    }
                }
                Some(_) => {
                    if seen_block {
                        return Err(self
                            .cursor
                            .syntax(at, "entries must come before the children block"));
                    }
                    if !spaced {
                        return Err(self
                            .cursor
                            .syntax(at, "expected whitespace before the next entry"));
                    }
                    entries.push(self.parse_entry()?);
                }
            }
        }

        trace!("parsed node `{}` at depth {}", name.value(), self.depth);
        Ok(Node::from_parts(
            annotation,
            name,
            entries,
            children,
            terminated,
        ))
    }

    /// `{ nodes }`, cursor on the `{`.
    fn parse_children(&mut self) -> Result<Block> {
        let open = self.cursor.position();
        if self.depth >= self.max_depth {
            return Err(self.cursor.syntax(
                open,
                &format!("children blocks nested deeper than {} levels", self.max_depth),
            ));
        }
        self.cursor.bump();
        self.depth += 1;
        let nodes = self.parse_nodes(Some(open))?;
        self.depth -= 1;
        self.cursor.eat('}');
        Ok(Block::new(nodes))
    }

    fn parse_entry(&mut self) -> Result<Entry> {
        let start = self.cursor.position();
        if self.cursor.peek() == Some('(') {
            let value = self.parse_value()?;
            if self.cursor.peek() == Some('=') {
                return Err(self
                    .cursor
                    .syntax(start, "property keys cannot carry a type annotation"));
            }
            return Ok(Entry::Argument(value));
        }

        let literal = self.cursor.literal()?;
        if self.cursor.peek() == Some('=') {
            let key = match literal {
                Literal::String(key) => key,
                other => {
                    return Err(self.cursor.syntax(
                        start,
                        &format!(
                            "property key must be a string, found {}",
                            other.into_value().category()
                        ),
                    ))
                }
            };
            self.cursor.bump();
            let value_start = self.cursor.position();
            if self.cursor.node_space()? {
                return Err(self
                    .cursor
                    .syntax(value_start, "whitespace is not allowed after `=`"));
            }
            match self.cursor.peek() {
                None => {
                    return Err(self
                        .cursor
                        .syntax(value_start, "unexpected end of input, expected a value after `=`"))
                }
                Some(ch) if is_newline(ch) => {
                    return Err(self
                        .cursor
                        .syntax(value_start, "expected a value after `=`"))
                }
                _ => {}
            }
            let value = self.parse_value()?;
            return Ok(Entry::Property { key, value });
        }

        let end = self.cursor.position();
        if self.cursor.node_space()? && self.cursor.peek() == Some('=') {
            return Err(self
                .cursor
                .syntax(end, "whitespace is not allowed before `=`"));
        }
        self.cursor.reset(end);
        Ok(Entry::Argument(TypedValue::from_parts(
            None,
            literal.into_value(),
        )))
    }

    /// `(type)? literal`
    fn parse_value(&mut self) -> Result<TypedValue> {
        let annotation = self.parse_annotation()?;
        if annotation.is_some() {
            self.cursor.node_space()?;
        }
        let literal = self.cursor.literal()?;
        Ok(TypedValue::from_parts(annotation, literal.into_value()))
    }

    fn parse_annotation(&mut self) -> Result<Option<String>> {
        if !self.cursor.eat('(') {
            return Ok(None);
        }
        self.cursor.node_space()?;
        let name = self.cursor.string("type annotation")?;
        self.cursor.node_space()?;
        if !self.cursor.eat(')') {
            return Err(self.cursor.syntax(
                self.cursor.position(),
                "expected `)` to close type annotation",
            ));
        }
        Ok(Some(name.into_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value::Value;

    fn parse(input: &str) -> Result<Document> {
        Parser::new(input, &ReaderOptions::default()).parse_document()
    }

    fn parse_preserving(input: &str) -> Result<Document> {
        let options = ReaderOptions::new().with_preserve_slashdash(true);
        Parser::new(input, &options).parse_document()
    }

    #[test]
    fn test_simple_node() {
        let doc = parse("node 1 \"two\" key=#true").unwrap();
        let node = &doc.nodes()[0];
        assert_eq!(node.name(), "node");
        assert_eq!(node.entries().len(), 3);
        assert_eq!(node.property("key").map(TypedValue::value), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_annotations() {
        let doc = parse("(config)server (u16)8080 port=(u16)80").unwrap();
        let node = &doc.nodes()[0];
        assert_eq!(node.annotation(), Some("config"));
        assert_eq!(node.argument(0).and_then(TypedValue::annotation), Some("u16"));
        assert_eq!(node.property("port").and_then(TypedValue::annotation), Some("u16"));
    }

    #[test]
    fn test_annotation_with_inner_space() {
        let doc = parse("node ( u8 ) 1").unwrap();
        assert_eq!(doc.nodes()[0].argument(0).and_then(TypedValue::annotation), Some("u8"));
        assert!(matches!(parse("node (u8 1"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_terminators() {
        let doc = parse("a; b\nc").unwrap();
        assert_eq!(doc.len(), 3);
        assert!(doc.nodes()[0].is_terminated());
        assert!(!doc.nodes()[1].is_terminated());
    }

    #[test]
    fn test_children_close_on_same_line() {
        let doc = parse("parent { child 1; other }").unwrap();
        let block = doc.nodes()[0].children().unwrap();
        assert_eq!(block.len(), 2);
        assert_eq!(block.nodes()[1].name(), "other");
    }

    #[test]
    fn test_children_without_space() {
        let doc = parse("parent{child}").unwrap();
        assert_eq!(doc.nodes()[0].children().map(Block::len), Some(1));
    }

    #[test]
    fn test_slashdash_entry_and_block() {
        let doc = parse("node 1 /- 2 3 /-key=4 /- { gone }").unwrap();
        let node = &doc.nodes()[0];
        assert_eq!(node.entries().len(), 2);
        assert!(node.children().is_none());
        assert!(node.property("key").is_none());
    }

    #[test]
    fn test_slashdash_node() {
        let doc = parse("/- skipped 1 {\n  inner\n}\nkept").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.nodes()[0].name(), "kept");
    }

    #[test]
    fn test_slashdash_across_lines() {
        let doc = parse("node 1 /-\n  2 3").unwrap();
        assert_eq!(doc.nodes()[0].arguments().count(), 2);
    }

    #[test]
    fn test_slashdash_preserved_as_trivia() {
        let doc = parse_preserving("node 1 /- 2 /- key=\"x\"").unwrap();
        let entries = doc.nodes()[0].entries();
        assert_eq!(entries.len(), 3);
        assert!(matches!(&entries[1], Entry::Skipped(text) if text == "2"));
        assert!(matches!(&entries[2], Entry::Skipped(text) if text == "key=\"x\""));
    }

    #[test]
    fn test_slashdash_dangling() {
        assert!(matches!(parse("node /-"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("/-"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("a { b /- }"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_skipped_block_alongside_real_block() {
        let doc = parse("node /-{ a } { b }").unwrap();
        let block = doc.nodes()[0].children().unwrap();
        assert_eq!(block.nodes()[0].name(), "b");
    }

    #[test]
    fn test_two_children_blocks() {
        assert!(matches!(parse("node { a } { b }"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_entry_after_children() {
        let err = parse("node { a } 1").unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
        assert_eq!(err.column(), Some(12));
    }

    #[test]
    fn test_property_spacing() {
        assert!(matches!(parse("node key = 1"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("node key =1"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("node key= 1"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("node key="), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_property_key_forms() {
        let doc = parse(r##"node "a b"=1 r#"c"#=2"##).unwrap();
        let node = &doc.nodes()[0];
        assert!(node.property("a b").is_some());
        assert!(node.property("c").is_some());
        assert!(matches!(parse("node 1=2"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("node (t)k=2"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_entries_need_separation() {
        assert!(matches!(parse("node \"a\"\"b\""), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_unmatched_braces() {
        assert!(matches!(parse("}"), Err(Error::Syntax { .. })));
        let err = parse("a {\n  b {\n    c\n  }\n").unwrap_err();
        assert_eq!(err.line(), Some(5));
    }

    #[test]
    fn test_reserved_node_name() {
        assert!(matches!(parse("null 1"), Err(Error::ReservedKeyword { .. })));
        assert!(matches!(parse("node (true)1"), Err(Error::ReservedKeyword { .. })));
        assert!(matches!(parse("node false=1"), Err(Error::ReservedKeyword { .. })));
    }

    #[test]
    fn test_bom_and_comments() {
        let doc = parse("\u{FEFF}// head\nnode /* inline */ 1 // tail\n/* a /* b */ c */\nnext").unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.nodes()[0].arguments().count(), 1);
    }

    #[test]
    fn test_line_continuation() {
        let doc = parse("node 1 \\ // more\n  2").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.nodes()[0].arguments().count(), 2);
    }

    #[test]
    fn test_stray_semicolon() {
        assert!(matches!(parse(";"), Err(Error::Syntax { .. })));
    }
}
