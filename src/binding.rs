//! Mapping between nodes and application types.
//!
//! Nothing here inspects application types at runtime. A type opts in by implementing
//! [`FromNode`] (read side) or [`ToNode`] (write side) against the tree accessors and the
//! [`NodeBuilder`](crate::NodeBuilder); [`FromValue`] covers the scalar leaves.
//!
//! ## Examples
//!
//! ```rust
//! use kdl_reader::binding::{to_document, FromNode, ToNode};
//! use kdl_reader::{parse, Node, Result};
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     name: String,
//!     age: Option<u8>,
//! }
//!
//! impl FromNode for User {
//!     fn from_node(node: &Node) -> Result<Self> {
//!         Ok(User {
//!             name: node.argument_as(0)?,
//!             age: node.property_as("age")?,
//!         })
//!     }
//! }
//!
//! impl ToNode for User {
//!     fn to_node(&self) -> Node {
//!         let mut builder = Node::builder("user").argument(self.name.as_str());
//!         if let Some(age) = self.age {
//!             builder = builder.property("age", age);
//!         }
//!         builder.build()
//!     }
//! }
//!
//! let doc = parse("user Alice age=30\nuser Bob").unwrap();
//! let users: Vec<User> = doc.decode_group("user").unwrap();
//! assert_eq!(users[1], User { name: "Bob".into(), age: None });
//!
//! let back = to_document(&users);
//! assert_eq!(back.to_string(), "user Alice age=30\nuser Bob\n");
//! ```

use crate::error::{Error, Result};
use crate::node::{Block, Document, Node};
use crate::number::Number;
use crate::value::{TypedValue, Value};

/// Builds a value of this type from one entry value.
pub trait FromValue: Sized {
    fn from_value(value: &TypedValue) -> Result<Self>;

    /// What an absent entry decodes to, if anything.
    fn missing() -> Option<Self> {
        None
    }
}

/// Builds a value of this type from a node.
pub trait FromNode: Sized {
    fn from_node(node: &Node) -> Result<Self>;
}

/// Renders a value of this type as a node.
pub trait ToNode {
    fn to_node(&self) -> Node;
}

fn mismatch(expected: &str, value: &TypedValue) -> Error {
    Error::binding(format!(
        "expected {}, found {} `{}`",
        expected,
        value.value().category(),
        value
    ))
}

impl FromValue for TypedValue {
    fn from_value(value: &TypedValue) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for Value {
    fn from_value(value: &TypedValue) -> Result<Self> {
        Ok(value.value().clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &TypedValue) -> Result<Self> {
        value
            .value()
            .as_bool()
            .ok_or_else(|| mismatch("boolean", value))
    }
}

impl FromValue for String {
    fn from_value(value: &TypedValue) -> Result<Self> {
        value
            .value()
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch("string", value))
    }
}

impl FromValue for Number {
    fn from_value(value: &TypedValue) -> Result<Self> {
        value
            .value()
            .as_number()
            .cloned()
            .ok_or_else(|| mismatch("number", value))
    }
}

macro_rules! from_value_number {
    ($($ty:ty => $convert:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &TypedValue) -> Result<Self> {
                    let number = value
                        .value()
                        .as_number()
                        .ok_or_else(|| mismatch("number", value))?;
                    Ok(number.$convert()?)
                }
            }
        )*
    };
}

from_value_number!(
    i8 => to_i8,
    i16 => to_i16,
    i32 => to_i32,
    i64 => to_i64,
    i128 => to_i128,
    u8 => to_u8,
    u16 => to_u16,
    u32 => to_u32,
    u64 => to_u64,
    u128 => to_u128,
    f32 => to_f32,
    f64 => to_f64,
);

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &TypedValue) -> Result<Self> {
        if value.value().is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }

    fn missing() -> Option<Self> {
        Some(None)
    }
}

impl FromNode for Node {
    fn from_node(node: &Node) -> Result<Self> {
        Ok(node.clone())
    }
}

impl ToNode for Node {
    fn to_node(&self) -> Node {
        self.clone()
    }
}

impl Node {
    /// Decodes this node as `T`.
    pub fn decode<T: FromNode>(&self) -> Result<T> {
        T::from_node(self)
    }

    /// Decodes the `index`-th argument. A missing argument is an error unless `T` is an
    /// `Option`.
    pub fn argument_as<T: FromValue>(&self, index: usize) -> Result<T> {
        match self.argument(index) {
            Some(value) => T::from_value(value).map_err(|e| self.context(&format!("argument {}", index), e)),
            None => T::missing().ok_or_else(|| {
                Error::binding(format!("node `{}` has no argument {}", self.name(), index))
            }),
        }
    }

    /// Decodes property `key`. A missing property is an error unless `T` is an `Option`.
    pub fn property_as<T: FromValue>(&self, key: &str) -> Result<T> {
        match self.property(key) {
            Some(value) => T::from_value(value).map_err(|e| self.context(&format!("property `{}`", key), e)),
            None => T::missing().ok_or_else(|| {
                Error::binding(format!("node `{}` has no property `{}`", self.name(), key))
            }),
        }
    }

    /// Decodes every child called `name`.
    pub fn decode_children<T: FromNode>(&self, name: &str) -> Result<Vec<T>> {
        self.child_group(name).map(T::from_node).collect()
    }

    fn context(&self, what: &str, error: Error) -> Error {
        let detail = match error {
            Error::Binding(msg) => msg,
            other => other.to_string(),
        };
        Error::binding(format!("node `{}` {}: {}", self.name(), what, detail))
    }
}

impl Document {
    /// Decodes every top-level node called `name`, in order.
    pub fn decode_group<T: FromNode>(&self, name: &str) -> Result<Vec<T>> {
        self.nodes_named(name).map(T::from_node).collect()
    }
}

impl Block {
    /// Decodes every node called `name`, in order.
    pub fn decode_group<T: FromNode>(&self, name: &str) -> Result<Vec<T>> {
        self.nodes_named(name).map(T::from_node).collect()
    }
}

/// Builds a document with one node per item.
pub fn to_document<'a, T, I>(items: I) -> Document
where
    T: ToNode + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(ToNode::to_node).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[derive(Debug, PartialEq)]
    struct Endpoint {
        path: String,
        methods: Vec<String>,
    }

    impl FromNode for Endpoint {
        fn from_node(node: &Node) -> Result<Self> {
            Ok(Endpoint {
                path: node.argument_as(0)?,
                methods: node
                    .child_group("method")
                    .map(|m| m.argument_as(0))
                    .collect::<Result<_>>()?,
            })
        }
    }

    #[test]
    fn test_decode_children() {
        let doc = parse("api {\n  endpoint \"/a\" { method GET; method POST }\n  endpoint \"/b\"\n}").unwrap();
        let api = doc.get("api").unwrap();
        let endpoints: Vec<Endpoint> = api.decode_children("endpoint").unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].methods, vec!["GET", "POST"]);
        assert!(endpoints[1].methods.is_empty());
    }

    #[test]
    fn test_missing_and_optional() {
        let doc = parse("n 1 flag=#null").unwrap();
        let node = &doc.nodes()[0];
        assert_eq!(node.argument_as::<Option<i32>>(3).unwrap(), None);
        assert!(node.argument_as::<i32>(3).is_err());
        assert_eq!(node.property_as::<Option<bool>>("flag").unwrap(), None);
        assert!(node.property_as::<bool>("flag").is_err());
    }

    #[test]
    fn test_overflow_reported_with_context() {
        let doc = parse("n 300").unwrap();
        let err = doc.nodes()[0].argument_as::<u8>(0).unwrap_err();
        assert!(matches!(err, Error::Binding(_)));
        assert!(err.to_string().contains("argument 0"));
        assert!(err.to_string().contains("u8"));
    }

    #[test]
    fn test_type_mismatch() {
        let doc = parse("n \"text\"").unwrap();
        let err = doc.nodes()[0].argument_as::<f64>(0).unwrap_err();
        assert!(err.to_string().contains("expected number, found string"));
    }
}
