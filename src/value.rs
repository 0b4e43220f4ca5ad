//! Values carried by node entries.
//!
//! - [`Value`]: null, boolean, number or string
//! - [`KdlString`]: a string together with the literal form it was written in
//! - [`TypedValue`]: a value with its optional `(annotation)`
//!
//! ## Creating Values
//!
//! ```rust
//! use kdl_reader::{TypedValue, Value};
//!
//! let port = Value::from(8080);
//! let host = Value::from("localhost");
//! let stamp = TypedValue::new("2024-01-15").with_annotation("date");
//!
//! assert!(port.is_number());
//! assert_eq!(host.as_str(), Some("localhost"));
//! assert_eq!(stamp.annotation(), Some("date"));
//! ```
//!
//! ## Equality
//!
//! The literal form of a string and the spelling of a number do not take part in equality:
//! `"abc"` equals `abc`, and `0xff` equals `255`.

use crate::number::Number;
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The literal form a string was written in.
///
/// Only the writer looks at this; it never affects equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StringKind {
    /// Unquoted identifier-style string: `node`
    Identifier,
    /// `"quoted"` with escapes
    #[default]
    Quoted,
    /// `r#"raw"#` with the given number of hashes
    Raw { hashes: usize },
    /// Triple-quoted multiline string with escapes
    Multiline,
    /// Triple-quoted raw multiline string with the given number of hashes
    RawMultiline { hashes: usize },
}

/// A string value and the form it was written in.
#[derive(Clone, Debug, Default)]
pub struct KdlString {
    value: String,
    kind: StringKind,
}

impl KdlString {
    /// Creates a string with an explicit literal form.
    pub fn new(value: impl Into<String>, kind: StringKind) -> Self {
        KdlString {
            value: value.into(),
            kind,
        }
    }

    /// Creates a string the writer will quote only when needed.
    pub fn identifier(value: impl Into<String>) -> Self {
        KdlString::new(value, StringKind::Identifier)
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> StringKind {
        self.kind
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl PartialEq for KdlString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for KdlString {}

impl Hash for KdlString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialEq<str> for KdlString {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for KdlString {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl From<&str> for KdlString {
    fn from(value: &str) -> Self {
        KdlString::identifier(value)
    }
}

impl From<String> for KdlString {
    fn from(value: String) -> Self {
        KdlString::identifier(value)
    }
}

impl fmt::Display for KdlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::writer::render_string(self, crate::WriteStyle::Canonical))
    }
}

/// A dynamically-typed entry value.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::Value;
///
/// assert!(Value::Null.is_null());
/// assert_eq!(Value::from(true).as_bool(), Some(true));
/// assert_eq!(Value::from(42).as_i64(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(KdlString),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Name of the value's category, used in diagnostics.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is a string, returns its text. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_reader::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.value()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_kdl_string(&self) -> Option<&KdlString> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer that fits in `i64`, returns it.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(|n| n.to_i64().ok())
    }

    /// If the value is an integer that fits in `u64`, returns it.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(|n| n.to_u64().ok())
    }

    /// If the value is a number, returns it as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(|n| n.to_f64().ok())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::writer::render_value(self, crate::WriteStyle::Canonical))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if let Ok(i) = n.to_i64() {
                    serializer.serialize_i64(i)
                } else if let Ok(u) = n.to_u64() {
                    serializer.serialize_u64(u)
                } else if n.is_special() || n.is_integer() {
                    serializer.serialize_str(&n.canonical())
                } else {
                    match n.to_f64() {
                        Ok(f) if f.is_finite() => serializer.serialize_f64(f),
                        _ => serializer.serialize_str(&n.canonical()),
                    }
                }
            }
            Value::String(s) => serializer.serialize_str(s.value()),
        }
    }
}

/// A value together with its optional type annotation.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::{TypedValue, Value};
///
/// let plain = TypedValue::from(255);
/// assert_eq!(plain.annotation(), None);
///
/// let typed = TypedValue::new(255).with_annotation("u8");
/// assert_eq!(typed.annotation(), Some("u8"));
/// assert_eq!(typed.value(), &Value::from(255));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct TypedValue {
    annotation: Option<String>,
    value: Value,
}

impl TypedValue {
    pub fn new(value: impl Into<Value>) -> Self {
        TypedValue {
            annotation: None,
            value: value.into(),
        }
    }

    /// Returns this value tagged with `annotation`.
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub(crate) fn from_parts(annotation: Option<String>, value: Value) -> Self {
        TypedValue { annotation, value }
    }

    #[inline]
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(annotation) = &self.annotation {
            write!(
                f,
                "({})",
                crate::writer::render_identifier(annotation)
            )?;
        }
        write!(f, "{}", self.value)
    }
}

impl Serialize for TypedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        match &self.annotation {
            None => self.value.serialize(serializer),
            Some(annotation) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", annotation)?;
                map.serialize_entry("value", &self.value)?;
                map.end()
            }
        }
    }
}

macro_rules! typed_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TypedValue {
                fn from(value: $ty) -> Self {
                    TypedValue::new(value)
                }
            }
        )*
    };
}

typed_value_from!(
    Value, Number, KdlString, String, &str, bool, i8, i16, i32, i64, i128, u8, u16, u32, u64,
    u128, isize, usize, f32, f64
);

// TryFrom implementations for extracting values
impl TryFrom<&Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: &Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n.to_i64()?),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value.category()
            ))),
        }
    }
}

impl TryFrom<&Value> for u64 {
    type Error = crate::Error;

    fn try_from(value: &Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n.to_u64()?),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value.category()
            ))),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: &Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n.to_f64()?),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {}",
                value.category()
            ))),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = crate::Error;

    fn try_from(value: &Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                value.category()
            ))),
        }
    }
}

impl TryFrom<&Value> for String {
    type Error = crate::Error;

    fn try_from(value: &Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s.value().to_string()),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value.category()
            ))),
        }
    }
}

// From implementations for creating values from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize, f32, f64);

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(KdlString::identifier(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(KdlString::identifier(value))
    }
}

impl From<KdlString> for Value {
    fn from(value: KdlString) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Option<T>> for TypedValue {
    fn from(value: Option<T>) -> Self {
        TypedValue::new(value)
    }
}
