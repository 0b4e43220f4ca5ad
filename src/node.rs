//! The document tree.
//!
//! A [`Document`] owns its [`Node`]s, each node owns its [`Entry`]s and an optional child
//! [`Block`]. Nothing is shared and nothing points back up, so the whole tree is plain owned
//! data: cheap to clone, safe to send across threads and compared structurally.
//!
//! Trees are produced by the parser or assembled with [`Node::builder`]; there are no mutating
//! accessors.
//!
//! ```rust
//! use kdl_reader::{Document, Node};
//!
//! let doc: Document = vec![
//!     Node::builder("user").property("name", "Alice").build(),
//!     Node::builder("user").property("name", "Bob").build(),
//! ]
//! .into_iter()
//! .collect();
//!
//! let names: Vec<_> = doc
//!     .nodes_named("user")
//!     .filter_map(|n| n.property("name"))
//!     .filter_map(|v| v.value().as_str())
//!     .collect();
//! assert_eq!(names, vec!["Alice", "Bob"]);
//! ```

use crate::map::PropertyMap;
use crate::value::{KdlString, TypedValue};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// One item after a node's name.
#[derive(Clone, Debug)]
pub enum Entry {
    /// Positional value
    Argument(TypedValue),
    /// `key=value`
    Property { key: KdlString, value: TypedValue },
    /// Source text of a slashdash-elided entry or children block, kept only for verbatim output
    Skipped(String),
}

impl Entry {
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Entry::Skipped(_))
    }

    /// The entry's value, unless it was skipped.
    #[must_use]
    pub fn value(&self) -> Option<&TypedValue> {
        match self {
            Entry::Argument(value) | Entry::Property { value, .. } => Some(value),
            Entry::Skipped(_) => None,
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Entry::Argument(a), Entry::Argument(b)) => a == b,
            (
                Entry::Property { key: ka, value: va },
                Entry::Property { key: kb, value: vb },
            ) => ka == kb && va == vb,
            (Entry::Skipped(_), Entry::Skipped(_)) => true,
            _ => false,
        }
    }
}

/// A named unit with an optional annotation, entries and children.
#[derive(Clone, Debug)]
pub struct Node {
    annotation: Option<String>,
    name: KdlString,
    entries: Vec<Entry>,
    children: Option<Block>,
    terminated: bool,
}

impl Node {
    /// Starts building a node called `name`.
    pub fn builder(name: impl Into<KdlString>) -> NodeBuilder {
        NodeBuilder {
            node: Node {
                annotation: None,
                name: name.into(),
                entries: Vec::new(),
                children: None,
                terminated: false,
            },
        }
    }

    pub(crate) fn from_parts(
        annotation: Option<String>,
        name: KdlString,
        entries: Vec<Entry>,
        children: Option<Block>,
        terminated: bool,
    ) -> Self {
        Node {
            annotation,
            name,
            entries,
            children,
            terminated,
        }
    }

    /// The node's name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.value()
    }

    /// The node's name with its literal form.
    #[inline]
    #[must_use]
    pub fn name_string(&self) -> &KdlString {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// All entries in source order, including skipped ones.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> Option<&Block> {
        self.children.as_ref()
    }

    /// Whether the node was closed by an explicit `;`.
    #[inline]
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Positional values in order.
    pub fn arguments(&self) -> impl Iterator<Item = &TypedValue> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Argument(value) => Some(value),
            _ => None,
        })
    }

    /// The `index`-th argument.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_reader::{parse, Value};
    ///
    /// let doc = parse("node 1 key=#true 2").unwrap();
    /// let node = &doc.nodes()[0];
    /// assert_eq!(node.argument(1).map(|v| v.value()), Some(&Value::from(2)));
    /// assert!(node.argument(2).is_none());
    /// ```
    #[must_use]
    pub fn argument(&self, index: usize) -> Option<&TypedValue> {
        self.arguments().nth(index)
    }

    /// The value of property `key`; the rightmost occurrence wins.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&TypedValue> {
        self.entries.iter().rev().find_map(|entry| match entry {
            Entry::Property { key: k, value } if k.value() == key => Some(value),
            _ => None,
        })
    }

    /// Resolved properties in order of first appearance.
    #[must_use]
    pub fn properties(&self) -> PropertyMap<'_> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Property { key, value } => Some((key.value(), value)),
                _ => None,
            })
            .collect()
    }

    /// Children called `name`, in order.
    pub fn child_group<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children
            .iter()
            .flat_map(move |block| block.nodes_named(name))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let semantic = |node: &Node| {
            node.entries
                .iter()
                .filter(|entry| !entry.is_skipped())
                .cloned()
                .collect::<Vec<_>>()
        };
        self.annotation == other.annotation
            && self.name == other.name
            && self.children == other.children
            && semantic(self) == semantic(other)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = crate::writer::Writer::new(crate::WriterOptions::default());
        writer.write_node(self);
        f.write_str(writer.into_inner().trim_end_matches('\n'))
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", self.name())?;
        if let Some(annotation) = &self.annotation {
            map.serialize_entry("type", annotation)?;
        }
        let arguments: Vec<_> = self.arguments().collect();
        if !arguments.is_empty() {
            map.serialize_entry("arguments", &arguments)?;
        }
        let properties = self.properties();
        if !properties.is_empty() {
            map.serialize_entry("properties", &PropertiesSer(&properties))?;
        }
        if let Some(children) = &self.children {
            map.serialize_entry("children", children)?;
        }
        map.end()
    }
}

struct PropertiesSer<'a, 'b>(&'b PropertyMap<'a>);

impl Serialize for PropertiesSer<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Builds a [`Node`] entry by entry.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::{Node, TypedValue};
///
/// let node = Node::builder("server")
///     .annotation("http")
///     .argument("main")
///     .property("port", TypedValue::new(8080).with_annotation("u16"))
///     .child(Node::builder("route").argument("/").build())
///     .build();
///
/// assert_eq!(node.to_string(), "(http)server main port=(u16)8080 {\n    route \"/\"\n}");
/// ```
#[derive(Clone, Debug)]
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    #[must_use]
    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.node.annotation = Some(annotation.into());
        self
    }

    #[must_use]
    pub fn argument(mut self, value: impl Into<TypedValue>) -> Self {
        self.node.entries.push(Entry::Argument(value.into()));
        self
    }

    #[must_use]
    pub fn property(mut self, key: impl Into<KdlString>, value: impl Into<TypedValue>) -> Self {
        self.node.entries.push(Entry::Property {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn entry(mut self, entry: Entry) -> Self {
        self.node.entries.push(entry);
        self
    }

    /// Appends a child, creating the children block if needed.
    #[must_use]
    pub fn child(mut self, child: Node) -> Self {
        self.node
            .children
            .get_or_insert_with(Block::default)
            .nodes
            .push(child);
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.node
            .children
            .get_or_insert_with(Block::default)
            .nodes
            .extend(children);
        self
    }

    /// Gives the node an empty `{}` block.
    #[must_use]
    pub fn empty_children(mut self) -> Self {
        self.node.children.get_or_insert_with(Block::default);
        self
    }

    #[must_use]
    pub fn terminated(mut self, terminated: bool) -> Self {
        self.node.terminated = terminated;
        self
    }

    #[must_use]
    pub fn build(self) -> Node {
        self.node
    }
}

impl From<NodeBuilder> for Node {
    fn from(builder: NodeBuilder) -> Self {
        builder.build()
    }
}

macro_rules! node_list {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Default)]
        pub struct $name {
            nodes: Vec<Node>,
        }

        impl $name {
            #[must_use]
            pub fn new(nodes: Vec<Node>) -> Self {
                $name { nodes }
            }

            #[inline]
            #[must_use]
            pub fn nodes(&self) -> &[Node] {
                &self.nodes
            }

            #[inline]
            #[must_use]
            pub fn len(&self) -> usize {
                self.nodes.len()
            }

            #[inline]
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.nodes.is_empty()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, Node> {
                self.nodes.iter()
            }

            /// The first node called `name`.
            #[must_use]
            pub fn get(&self, name: &str) -> Option<&Node> {
                self.nodes.iter().find(|node| node.name() == name)
            }

            /// Every node called `name`, in order.
            pub fn nodes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
                self.nodes.iter().filter(move |node| node.name() == name)
            }

            pub fn into_nodes(self) -> Vec<Node> {
                self.nodes
            }
        }

        impl FromIterator<Node> for $name {
            fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
                $name {
                    nodes: iter.into_iter().collect(),
                }
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a Node;
            type IntoIter = std::slice::Iter<'a, Node>;

            fn into_iter(self) -> Self::IntoIter {
                self.nodes.iter()
            }
        }

        impl IntoIterator for $name {
            type Item = Node;
            type IntoIter = std::vec::IntoIter<Node>;

            fn into_iter(self) -> Self::IntoIter {
                self.nodes.into_iter()
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut seq = serializer.serialize_seq(Some(self.nodes.len()))?;
                for node in &self.nodes {
                    seq.serialize_element(node)?;
                }
                seq.end()
            }
        }
    };
}

node_list! {
    /// The root of a parse: top-level nodes in source order.
    ///
    /// Repeated names are meaningful and kept in order.
    Document
}

node_list! {
    /// A node's children in source order.
    Block
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = crate::writer::Writer::new(crate::WriterOptions::default());
        writer.write_document(self);
        f.write_str(&writer.into_inner())
    }
}

impl From<Block> for Document {
    fn from(block: Block) -> Self {
        Document { nodes: block.nodes }
    }
}

impl From<Document> for Block {
    fn from(document: Document) -> Self {
        Block {
            nodes: document.nodes,
        }
    }
}
