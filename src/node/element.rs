//! Element type - host elements in an element description
//!
//! The core building block of a declared subtree. Properties on a host
//! element become attributes on the DOM node it mounts.

use compact_str::CompactString;

use crate::props::{PropValue, Props};

use super::{Children, VNode};

// =============================================================================
// Element
// =============================================================================

/// Host element description with properties and children
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Tag name
    pub tag: CompactString,
    /// Declared properties
    pub props: Props,
    /// Child descriptions
    pub children: Children,
}

impl Element {
    /// Create an element with no properties or children
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            props: Props::new(),
            children: Children::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    /// Set a property (builder)
    pub fn prop(mut self, name: impl Into<CompactString>, value: impl Into<PropValue>) -> Self {
        self.props.set(name, value);
        self
    }

    /// Overlay a whole property set (builder)
    pub fn with_props(mut self, props: &Props) -> Self {
        self.props.extend(props);
        self
    }

    /// Set the `id` property (builder)
    pub fn with_id(self, id: impl Into<PropValue>) -> Self {
        self.prop("id", id)
    }

    /// Set the `class` property (builder)
    pub fn with_class(self, class: impl Into<PropValue>) -> Self {
        self.prop("class", class)
    }

    /// Append a child (builder)
    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child (builder)
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(VNode::text(content));
        self
    }

    /// Append several children (builder)
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Property access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a property value by name
    pub fn get_prop(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    /// Set a property value
    pub fn set_prop(&mut self, name: impl Into<CompactString>, value: impl Into<PropValue>) {
        self.props.set(name, value);
    }

    /// Get the `id` property
    pub fn id(&self) -> Option<&str> {
        self.props.get_str("id")
    }

    /// Get the `class` property
    pub fn class(&self) -> Option<&str> {
        self.props.get_str("class")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Other helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if element has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children (all node kinds)
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Iterate over direct child elements
    pub fn children_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(VNode::as_element)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                VNode::Text(t) => buf.push_str(&t.content),
                VNode::Element(e) => e.collect_text(buf),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let elem = Element::new("div")
            .with_id("main")
            .with_class("container")
            .prop("data-foo", "bar")
            .child(Element::new("span").text("Hello"))
            .text(" world");

        assert_eq!(elem.id(), Some("main"));
        assert_eq!(elem.class(), Some("container"));
        assert_eq!(elem.props.get_str("data-foo"), Some("bar"));
        assert_eq!(elem.len(), 2);
        assert_eq!(elem.text_content(), "Hello world");
        assert_eq!(elem.children_elements().count(), 1);
    }

    #[test]
    fn test_element_set_prop() {
        let mut elem = Element::new("p");
        assert!(elem.is_empty());
        elem.set_prop("label", "x");
        assert_eq!(elem.get_prop("label"), Some(&PropValue::from("x")));
    }
}
