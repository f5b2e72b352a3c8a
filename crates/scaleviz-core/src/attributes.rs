//! Ordered Graphviz attribute maps.
//!
//! Attribute values are opaque strings handed to Graphviz unchanged, so a
//! label such as `"500m CPU"` or a padding of `"0.5"` is never interpreted
//! here.

use indexmap::IndexMap;
use serde::Deserialize;

/// Insertion-ordered `name = value` attributes for a graph, node or edge.
///
/// Later writes to the same name replace the earlier value but keep its
/// original position.
///
/// # Examples
///
/// ```
/// use scaleviz_core::attributes::AttrMap;
///
/// let defaults = AttrMap::new().with("fontsize", "15").with("pad", "2.0");
/// let user = AttrMap::new().with("pad", "0.5");
///
/// let merged = defaults.merged(&user);
/// assert_eq!(merged.get("pad"), Some("0.5"));
/// assert_eq!(merged.get("fontsize"), Some("15"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AttrMap(IndexMap<String, String>);

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, returning the map for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name` to `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Applies every attribute of `other` on top of this map.
    pub fn extend(&mut self, other: &AttrMap) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    /// Returns a copy of this map with `other` applied on top.
    pub fn merged(&self, other: &AttrMap) -> AttrMap {
        let mut merged = self.clone();
        merged.extend(other);
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AttrMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
