//! Property system for element descriptions and portal relays
//!
//! - `PropValue`: a small dynamic value (null, bool, int, float, string)
//! - `Props`: ordered name → value mapping, insertion order preserved
//! - `PortalProps`: the property-set shape a portal node relays

use std::fmt;

use compact_str::CompactString;
use smallvec::SmallVec;

// =============================================================================
// PropValue
// =============================================================================

/// Dynamic property value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(CompactString),
}

impl PropValue {
    /// Check if this is `Null`
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    /// Get as string slice (only for `Str`)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get as bool (only for `Bool`)
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer (only for `Int`)
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => Ok(()),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Int(i) => write!(f, "{i}"),
            PropValue::Float(x) => write!(f, "{x}"),
            PropValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        PropValue::Int(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        PropValue::Int(v.into())
    }
}

impl From<u32> for PropValue {
    fn from(v: u32) -> Self {
        PropValue::Int(v.into())
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::Float(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::Str(v.into())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        PropValue::Str(v.into())
    }
}

impl From<CompactString> for PropValue {
    fn from(v: CompactString) -> Self {
        PropValue::Str(v)
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(PropValue::Null, Into::into)
    }
}

// =============================================================================
// Props
// =============================================================================

/// Ordered property mapping
///
/// Lookups are linear; property sets on a single element are small.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Props {
    entries: SmallVec<[(CompactString, PropValue); 4]>,
}

impl Props {
    /// Create an empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value by name
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Get a string property by name
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_str)
    }

    /// Check if a property exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Set a property (update in place if present, append otherwise)
    pub fn set(&mut self, name: impl Into<CompactString>, value: impl Into<PropValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Builder form of [`Props::set`]
    pub fn with(mut self, name: impl Into<CompactString>, value: impl Into<PropValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Remove a property, returning the old value if present
    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.entries
            .iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.entries.remove(pos).1)
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no properties
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over property names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Overlay every entry of `other` onto `self`
    pub fn extend(&mut self, other: &Props) {
        for (k, v) in &other.entries {
            self.set(k.clone(), v.clone());
        }
    }

    /// Return a new set with `overrides` applied on top of `self`
    ///
    /// Declared keys keep their position; override-only keys are appended.
    pub fn merged(&self, overrides: &Props) -> Props {
        let mut out = self.clone();
        out.extend(overrides);
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Props
where
    K: Into<CompactString>,
    V: Into<PropValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (k, v) in iter {
            props.set(k, v);
        }
        props
    }
}

// =============================================================================
// PortalProps
// =============================================================================

/// Property-set shape carried by a portal node's relay channel
///
/// `Props` is the untyped shape. Applications that want a fixed shape
/// implement this on their own struct; `Default` is the "nothing pushed"
/// value handed to renderers before any attachment point is active.
pub trait PortalProps: Clone + Default + fmt::Debug + Send + Sync + 'static {
    /// Flatten into the dynamic form merged into element descriptions
    fn to_props(&self) -> Props;
}

impl PortalProps for Props {
    fn to_props(&self) -> Props {
        self.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_operations() {
        let mut props = Props::new();

        props.set("id", "main");
        props.set("count", 3);
        assert_eq!(props.len(), 2);

        assert_eq!(props.get_str("id"), Some("main"));
        assert_eq!(props.get("count"), Some(&PropValue::Int(3)));
        assert_eq!(props.get("href"), None);
        assert!(props.contains("id"));

        // Update keeps position
        props.set("id", "other");
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["id", "count"]);
        assert_eq!(props.get_str("id"), Some("other"));

        let removed = props.remove("id");
        assert_eq!(removed, Some(PropValue::from("other")));
        assert!(!props.contains("id"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_merged_override_wins() {
        let declared = Props::new().with("label", "default").with("size", 2);
        let overrides = Props::new().with("theme", "dark").with("label", "override");

        let merged = declared.merged(&overrides);
        assert_eq!(merged.get_str("label"), Some("override"));
        assert_eq!(merged.get_str("theme"), Some("dark"));
        assert_eq!(
            merged.keys().collect::<Vec<_>>(),
            vec!["label", "size", "theme"]
        );

        // Declared set untouched
        assert_eq!(declared.get_str("label"), Some("default"));
        assert!(!declared.contains("theme"));
    }

    #[test]
    fn test_prop_value_display() {
        assert_eq!(PropValue::from("x").to_string(), "x");
        assert_eq!(PropValue::from(42).to_string(), "42");
        assert_eq!(PropValue::from(true).to_string(), "true");
        assert_eq!(PropValue::Null.to_string(), "");
        assert_eq!(PropValue::from(None::<&str>), PropValue::Null);
    }

    #[test]
    fn test_from_iterator() {
        let props: Props = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(props.len(), 2);
        assert_eq!(props.get("a").and_then(PropValue::as_int), Some(3));
    }
}
