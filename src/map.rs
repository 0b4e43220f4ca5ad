//! Keyed view over a node's properties.
//!
//! A node keeps its entries in source order and may repeat a key. [`PropertyMap`] is the
//! resolved view: one value per key, rightmost occurrence wins, keys ordered by first
//! appearance. It wraps an [`IndexMap`] so iteration is deterministic.
//!
//! ## Examples
//!
//! ```rust
//! use kdl_reader::parse;
//!
//! let doc = parse("server host=a port=80 host=b").unwrap();
//! let props = doc.nodes()[0].properties();
//!
//! assert_eq!(props.len(), 2);
//! assert_eq!(props.get("host").and_then(|v| v.value().as_str()), Some("b"));
//! let keys: Vec<_> = props.keys().collect();
//! assert_eq!(keys, vec!["host", "port"]);
//! ```

use crate::value::TypedValue;
use indexmap::IndexMap;

/// Resolved, ordered properties of a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyMap<'a>(IndexMap<&'a str, &'a TypedValue>);

impl<'a> PropertyMap<'a> {
    #[must_use]
    pub fn new() -> Self {
        PropertyMap(IndexMap::new())
    }

    /// Inserts `key`, replacing the value but keeping the position of an earlier occurrence.
    pub(crate) fn insert(&mut self, key: &'a str, value: &'a TypedValue) {
        self.0.insert(key, value);
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a TypedValue> {
        self.0.get(key).copied()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in order of first appearance.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.0.keys().copied()
    }

    /// Key-value pairs in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a TypedValue)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl<'a> IntoIterator for PropertyMap<'a> {
    type Item = (&'a str, &'a TypedValue);
    type IntoIter = indexmap::map::IntoIter<&'a str, &'a TypedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> FromIterator<(&'a str, &'a TypedValue)> for PropertyMap<'a> {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a TypedValue)>>(iter: T) -> Self {
        let mut map = PropertyMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rightmost_wins_keeps_first_position() {
        let a = TypedValue::new(1);
        let b = TypedValue::new(2);
        let c = TypedValue::new(3);
        let map: PropertyMap<'_> = vec![("x", &a), ("y", &b), ("x", &c)].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("x"), Some(&c));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn test_empty() {
        let map = PropertyMap::new();
        assert!(map.is_empty());
        assert!(!map.contains_key("x"));
        assert_eq!(map.get("x"), None);
    }
}
