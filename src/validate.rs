//! Reserved type annotations.
//!
//! Twenty-six annotation names carry a built-in meaning. [`validate`] walks a document, checks
//! every argument and property value annotated with one of them, and reports *all* violations
//! at once. Values with no annotation, or with any other annotation, are never checked.
//!
//! | Names | Rule |
//! |---|---|
//! | `i8` … `i64`, `u8` … `u64` | integer number that fits the width |
//! | `f32`, `f64` | any number, including `#inf`, `#-inf`, `#nan` |
//! | `decimal64`, `decimal128` | finite number |
//! | `date-time`, `date`, `time` | ISO 8601 string |
//! | `ipv4`, `ipv6` | address of that family |
//! | `url`, `uuid`, `regex`, `base64` | string that parses as one |
//! | `decimal`, `currency`, `country-2`, `country-3`, `duration` | always accepted |
//!
//! ## Examples
//!
//! ```rust
//! use kdl_reader::{parse, validate, ReservedType};
//!
//! let doc = parse("limits (u8)255 (u8)256 max=(i8)-129").unwrap();
//! let errors = validate(&doc).unwrap_err();
//!
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors.iter().next().map(|e| e.reserved()), Some(ReservedType::U8));
//! ```

use crate::node::{Document, Entry, Node};
use crate::number::Number;
use crate::value::{TypedValue, Value};
use base64::Engine as _;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use thiserror::Error;

/// An annotation name with a built-in validation rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReservedType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Decimal64,
    Decimal128,
    DateTime,
    Date,
    Time,
    Duration,
    Decimal,
    Currency,
    Country2,
    Country3,
    Ipv4,
    Ipv6,
    Url,
    Uuid,
    Regex,
    Base64,
}

impl ReservedType {
    /// Every reserved type, in catalog order.
    pub const ALL: [ReservedType; 26] = [
        ReservedType::I8,
        ReservedType::I16,
        ReservedType::I32,
        ReservedType::I64,
        ReservedType::U8,
        ReservedType::U16,
        ReservedType::U32,
        ReservedType::U64,
        ReservedType::F32,
        ReservedType::F64,
        ReservedType::Decimal64,
        ReservedType::Decimal128,
        ReservedType::DateTime,
        ReservedType::Date,
        ReservedType::Time,
        ReservedType::Duration,
        ReservedType::Decimal,
        ReservedType::Currency,
        ReservedType::Country2,
        ReservedType::Country3,
        ReservedType::Ipv4,
        ReservedType::Ipv6,
        ReservedType::Url,
        ReservedType::Uuid,
        ReservedType::Regex,
        ReservedType::Base64,
    ];

    /// The annotation spelling.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ReservedType::I8 => "i8",
            ReservedType::I16 => "i16",
            ReservedType::I32 => "i32",
            ReservedType::I64 => "i64",
            ReservedType::U8 => "u8",
            ReservedType::U16 => "u16",
            ReservedType::U32 => "u32",
            ReservedType::U64 => "u64",
            ReservedType::F32 => "f32",
            ReservedType::F64 => "f64",
            ReservedType::Decimal64 => "decimal64",
            ReservedType::Decimal128 => "decimal128",
            ReservedType::DateTime => "date-time",
            ReservedType::Date => "date",
            ReservedType::Time => "time",
            ReservedType::Duration => "duration",
            ReservedType::Decimal => "decimal",
            ReservedType::Currency => "currency",
            ReservedType::Country2 => "country-2",
            ReservedType::Country3 => "country-3",
            ReservedType::Ipv4 => "ipv4",
            ReservedType::Ipv6 => "ipv6",
            ReservedType::Url => "url",
            ReservedType::Uuid => "uuid",
            ReservedType::Regex => "regex",
            ReservedType::Base64 => "base64",
        }
    }

    /// Looks up a reserved type by annotation name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_reader::ReservedType;
    ///
    /// assert_eq!(ReservedType::from_name("date-time"), Some(ReservedType::DateTime));
    /// assert_eq!(ReservedType::from_name("color"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }

    /// Checks `value` against this type's rule, describing the mismatch on failure.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            ReservedType::I8 => numeric(self, value, |n| n.to_i8().map(drop)),
            ReservedType::I16 => numeric(self, value, |n| n.to_i16().map(drop)),
            ReservedType::I32 => numeric(self, value, |n| n.to_i32().map(drop)),
            ReservedType::I64 => numeric(self, value, |n| n.to_i64().map(drop)),
            ReservedType::U8 => numeric(self, value, |n| n.to_u8().map(drop)),
            ReservedType::U16 => numeric(self, value, |n| n.to_u16().map(drop)),
            ReservedType::U32 => numeric(self, value, |n| n.to_u32().map(drop)),
            ReservedType::U64 => numeric(self, value, |n| n.to_u64().map(drop)),
            ReservedType::F32 => numeric(self, value, |n| n.to_f32().map(drop)),
            ReservedType::F64 => numeric(self, value, |n| n.to_f64().map(drop)),
            ReservedType::Decimal64 | ReservedType::Decimal128 => {
                numeric(self, value, |n| n.to_decimal().map(drop))
            }
            ReservedType::DateTime => text(self, value, |s| {
                DateTime::parse_from_rfc3339(s)
                    .map(drop)
                    .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(drop))
                    .map_err(|e| e.to_string())
            }),
            ReservedType::Date => text(self, value, |s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map(drop)
                    .map_err(|e| e.to_string())
            }),
            ReservedType::Time => text(self, value, |s| {
                let s = s.strip_suffix('Z').unwrap_or(s);
                NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
                    .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
                    .map(drop)
                    .map_err(|e| e.to_string())
            }),
            ReservedType::Ipv4 => text(self, value, |s| {
                s.parse::<Ipv4Addr>().map(drop).map_err(|e| e.to_string())
            }),
            ReservedType::Ipv6 => text(self, value, |s| {
                s.parse::<Ipv6Addr>().map(drop).map_err(|e| e.to_string())
            }),
            ReservedType::Url => text(self, value, |s| {
                url::Url::parse(s).map(drop).map_err(|e| e.to_string())
            }),
            ReservedType::Uuid => text(self, value, |s| {
                if s.len() != 36 {
                    return Err("expected the hyphenated 8-4-4-4-12 form".to_string());
                }
                uuid::Uuid::parse_str(s).map(drop).map_err(|e| e.to_string())
            }),
            ReservedType::Regex => text(self, value, |s| {
                regex::Regex::new(s).map(drop).map_err(|e| e.to_string())
            }),
            ReservedType::Base64 => text(self, value, |s| {
                base64::engine::general_purpose::STANDARD
                    .decode(s)
                    .map(drop)
                    .map_err(|e| e.to_string())
            }),
            ReservedType::Duration
            | ReservedType::Decimal
            | ReservedType::Currency
            | ReservedType::Country2
            | ReservedType::Country3 => Ok(()),
        }
    }
}

fn numeric<E: fmt::Display>(
    ty: &ReservedType,
    value: &Value,
    convert: impl FnOnce(&Number) -> Result<(), E>,
) -> Result<(), String> {
    match value {
        Value::Number(n) => convert(n)
            .map_err(|e| format!("`{}` is not a valid {}: {}", n.raw(), ty.name(), e)),
        other => Err(format!(
            "{} expects a number, found {}",
            ty.name(),
            other.category()
        )),
    }
}

fn text(
    ty: &ReservedType,
    value: &Value,
    parse: impl FnOnce(&str) -> Result<(), String>,
) -> Result<(), String> {
    match value {
        Value::String(s) => parse(s.value())
            .map_err(|e| format!("{:?} is not a valid {}: {}", s.value(), ty.name(), e)),
        other => Err(format!(
            "{} expects a string, found {}",
            ty.name(),
            other.category()
        )),
    }
}

impl fmt::Display for ReservedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step from the document root: a node name and its index among its siblings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,
    pub index: usize,
}

/// Which entry of the node holds the value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueSlot {
    Argument(usize),
    Property(String),
}

/// Where an offending value sits in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueLocation {
    pub path: Vec<PathSegment>,
    pub slot: ValueSlot,
}

impl fmt::Display for ValueLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}[{}]", segment.name, segment.index)?;
        }
        match &self.slot {
            ValueSlot::Argument(index) => write!(f, " argument {}", index),
            ValueSlot::Property(key) => write!(f, " property `{}`", key),
        }
    }
}

/// A value whose reserved annotation does not match its content.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationError {
    message: String,
    reserved: ReservedType,
    location: ValueLocation,
    value: TypedValue,
}

impl ValidationError {
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn reserved(&self) -> ReservedType {
        self.reserved
    }

    #[must_use]
    pub fn location(&self) -> &ValueLocation {
        &self.location
    }

    /// The offending value.
    #[must_use]
    pub fn value(&self) -> &TypedValue {
        &self.value
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Every violation found in one document.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{}", render_list(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn render_list(errors: &[ValidationError]) -> String {
    let mut out = format!("{} reserved type violation(s)", errors.len());
    for error in errors {
        out.push_str("\n  ");
        out.push_str(&error.to_string());
    }
    out
}

impl ValidationErrors {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Checks every reserved-type annotation in `document`, collecting all violations.
///
/// # Examples
///
/// ```rust
/// use kdl_reader::{parse, validate};
///
/// let ok = parse("server (ipv4)\"10.0.0.1\" id=(uuid)\"67e55044-10b1-426f-9247-bb680e5fe0c8\"").unwrap();
/// assert!(validate(&ok).is_ok());
///
/// let bad = parse("server (ipv4)\"::1\" {\n  port (u16)70000\n}").unwrap();
/// let errors = validate(&bad).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.iter().nth(1).unwrap().location().to_string(), "server[0]/port[0] argument 0");
/// ```
pub fn validate(document: &Document) -> Result<(), ValidationErrors> {
    let mut walker = Walker::default();
    for (index, node) in document.iter().enumerate() {
        walker.node(node, index);
    }
    debug!(
        "validated {} annotated values, {} violations",
        walker.checked,
        walker.errors.len()
    );
    if walker.errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(walker.errors))
    }
}

#[derive(Default)]
struct Walker {
    path: Vec<PathSegment>,
    errors: Vec<ValidationError>,
    checked: usize,
}

impl Walker {
    fn node(&mut self, node: &Node, index: usize) {
        self.path.push(PathSegment {
            name: node.name().to_string(),
            index,
        });
        let mut argument = 0;
        for entry in node.entries() {
            match entry {
                Entry::Argument(value) => {
                    self.value(value, ValueSlot::Argument(argument));
                    argument += 1;
                }
                Entry::Property { key, value } => {
                    self.value(value, ValueSlot::Property(key.value().to_string()))
                }
                Entry::Skipped(_) => {}
            }
        }
        if let Some(children) = node.children() {
            for (index, child) in children.iter().enumerate() {
                self.node(child, index);
            }
        }
        self.path.pop();
    }

    fn value(&mut self, value: &TypedValue, slot: ValueSlot) {
        let Some(reserved) = value.annotation().and_then(ReservedType::from_name) else {
            return;
        };
        self.checked += 1;
        if let Err(message) = reserved.check(value.value()) {
            self.errors.push(ValidationError {
                message,
                reserved,
                location: ValueLocation {
                    path: self.path.clone(),
                    slot,
                },
                value: value.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(raw: &str) -> Value {
        Value::Number(Number::parse(raw).unwrap())
    }

    #[test]
    fn test_catalog_size_and_names() {
        assert_eq!(ReservedType::ALL.len(), 26);
        for ty in ReservedType::ALL {
            assert_eq!(ReservedType::from_name(ty.name()), Some(ty));
        }
    }

    #[test]
    fn test_integer_boundaries() {
        assert!(ReservedType::U8.check(&num("255")).is_ok());
        assert!(ReservedType::U8.check(&num("256")).is_err());
        assert!(ReservedType::I8.check(&num("-128")).is_ok());
        assert!(ReservedType::I8.check(&num("127")).is_ok());
        assert!(ReservedType::I8.check(&num("128")).is_err());
        assert!(ReservedType::I8.check(&num("-129")).is_err());
        assert!(ReservedType::U32.check(&num("4294967295")).is_ok());
        assert!(ReservedType::U32.check(&num("0xFFFF_FFFF")).is_ok());
        assert!(ReservedType::U64.check(&num("-1")).is_err());
        assert!(ReservedType::I32.check(&num("1.5")).is_err());
    }

    #[test]
    fn test_integer_wrong_category() {
        let err = ReservedType::I64.check(&Value::from("12")).unwrap_err();
        assert_eq!(err, "i64 expects a number, found string");
    }

    #[test]
    fn test_floats_accept_specials() {
        assert!(ReservedType::F64.check(&Value::Number(Number::nan())).is_ok());
        assert!(ReservedType::F32.check(&num("1e300")).is_ok());
        assert!(ReservedType::F32.check(&Value::Bool(true)).is_err());
    }

    #[test]
    fn test_decimal_must_be_finite() {
        assert!(ReservedType::Decimal64.check(&num("12.50")).is_ok());
        assert!(ReservedType::Decimal128.check(&Value::Number(Number::infinity())).is_err());
    }

    fn s(text: &str) -> Value {
        Value::from(text)
    }

    #[test]
    fn test_dates_and_times() {
        assert!(ReservedType::DateTime.check(&s("2024-01-15T10:30:00Z")).is_ok());
        assert!(ReservedType::DateTime.check(&s("2024-01-15T10:30:00.250+02:00")).is_ok());
        assert!(ReservedType::DateTime.check(&s("2024-01-15T10:30:00")).is_ok());
        assert!(ReservedType::DateTime.check(&s("yesterday")).is_err());
        assert!(ReservedType::Date.check(&s("2024-02-29")).is_ok());
        assert!(ReservedType::Date.check(&s("2023-02-29")).is_err());
        assert!(ReservedType::Time.check(&s("23:59:59")).is_ok());
        assert!(ReservedType::Time.check(&s("08:15")).is_ok());
        assert!(ReservedType::Time.check(&s("12:00:00.5Z")).is_ok());
        assert!(ReservedType::Time.check(&s("25:00")).is_err());
    }

    #[test]
    fn test_network_and_identifiers() {
        assert!(ReservedType::Ipv4.check(&s("192.168.0.1")).is_ok());
        assert!(ReservedType::Ipv4.check(&s("::1")).is_err());
        assert!(ReservedType::Ipv6.check(&s("::1")).is_ok());
        assert!(ReservedType::Ipv6.check(&s("192.168.0.1")).is_err());
        assert!(ReservedType::Url.check(&s("https://example.com/a?b=c")).is_ok());
        assert!(ReservedType::Url.check(&s("/relative/path")).is_err());
        assert!(ReservedType::Uuid.check(&s("67e55044-10b1-426f-9247-bb680e5fe0c8")).is_ok());
        assert!(ReservedType::Uuid.check(&s("67e5504410b1426f9247bb680e5fe0c8")).is_err());
        assert!(ReservedType::Regex.check(&s(r"^\d+$")).is_ok());
        assert!(ReservedType::Regex.check(&s("(unclosed")).is_err());
        assert!(ReservedType::Base64.check(&s("aGVsbG8=")).is_ok());
        assert!(ReservedType::Base64.check(&s("not base64!")).is_err());
    }

    #[test]
    fn test_pass_through_types() {
        for ty in [
            ReservedType::Decimal,
            ReservedType::Currency,
            ReservedType::Country2,
            ReservedType::Country3,
            ReservedType::Duration,
        ] {
            assert!(ty.check(&Value::from("anything")).is_ok());
            assert!(ty.check(&Value::Null).is_ok());
        }
    }

    #[test]
    fn test_non_fail_fast_collection() {
        let doc: Document = vec![
            Node::builder("a")
                .argument(TypedValue::new(300).with_annotation("u8"))
                .argument(TypedValue::new("x").with_annotation("color"))
                .property("p", TypedValue::new("x").with_annotation("ipv4"))
                .child(
                    Node::builder("b")
                        .argument(TypedValue::new(1.5).with_annotation("i32"))
                        .build(),
                )
                .build(),
        ]
        .into_iter()
        .collect();
        let errors = validate(&doc).unwrap_err();
        assert_eq!(errors.len(), 3);
        let slots: Vec<_> = errors.iter().map(|e| e.location().slot.clone()).collect();
        assert_eq!(
            slots,
            vec![
                ValueSlot::Argument(0),
                ValueSlot::Property("p".to_string()),
                ValueSlot::Argument(0)
            ]
        );
        assert_eq!(errors.iter().nth(2).map(|e| e.location().path.len()), Some(2));
    }

    #[test]
    fn test_node_annotation_not_checked() {
        let doc: Document = vec![Node::builder("n").annotation("u8").build()]
            .into_iter()
            .collect();
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_display_lists_every_error() {
        let doc: Document = vec![Node::builder("n")
            .argument(TypedValue::new(256).with_annotation("u8"))
            .argument(TypedValue::new(-1).with_annotation("u16"))
            .build()]
        .into_iter()
        .collect();
        let text = validate(&doc).unwrap_err().to_string();
        assert!(text.starts_with("2 reserved type violation(s)"));
        assert!(text.contains("n[0] argument 0"));
        assert!(text.contains("n[0] argument 1"));
    }
}
