//! Element descriptions (virtual nodes).
//!
//! A `VNode` tree is what components declare and what the runtime
//! reconciles against the DOM. Besides elements, text and components it
//! carries the two host primitives portals are built on:
//!
//! - `VNode::Portal`: render children into an existing container,
//!   outside the surrounding parent
//! - `VNode::External`: host an externally owned DOM node at this position

mod component;
mod element;
mod text;

pub use component::{ComponentElement, PortalTarget};
pub use element::Element;
pub use text::Text;

use smallvec::SmallVec;

use crate::host::NodeId;
use crate::props::Props;

/// Type alias for children collection.
pub type Children = SmallVec<[VNode; 8]>;

// =============================================================================
// VNode
// =============================================================================

/// Node in an element description
#[derive(Debug, Clone, Default)]
pub enum VNode {
    /// Renders nothing
    #[default]
    Null,
    Element(Box<Element>),
    Component(Box<ComponentElement>),
    Text(Text),
    Portal(Box<PortalTarget>),
    External(NodeId),
}

impl VNode {
    // Generates for each variant (element -> Element, etc.):
    //   - is_xxx(&self) -> bool
    //   - as_xxx(&self) -> Option<&Type>
    //   - as_xxx_mut(&mut self) -> Option<&mut Type>
    crate::impl_enum_accessors!(element, text);

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text(Text::new(content))
    }

    /// Render `children` into `container` instead of the current parent
    pub fn portal<I>(container: NodeId, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VNode>,
    {
        VNode::Portal(Box::new(PortalTarget::new(
            container,
            children.into_iter().map(Into::into).collect(),
        )))
    }

    /// Check if this is `Null`
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, VNode::Null)
    }

    /// Try to get as component reference
    pub fn as_component(&self) -> Option<&ComponentElement> {
        match self {
            VNode::Component(c) => Some(c.as_ref()),
            _ => None,
        }
    }

    /// Whether this node carries properties (host element or component)
    ///
    /// Text, null, portal and external nodes are not element-bearing.
    #[inline]
    pub fn is_element_bearing(&self) -> bool {
        matches!(self, VNode::Element(_) | VNode::Component(_))
    }

    /// Declared properties, for element-bearing nodes
    pub fn props(&self) -> Option<&Props> {
        match self {
            VNode::Element(e) => Some(&e.props),
            VNode::Component(c) => Some(&c.props),
            _ => None,
        }
    }

    /// Copy of this node with `overrides` merged into its properties
    ///
    /// Non-element-bearing nodes are returned unchanged. `self` is never
    /// modified.
    pub fn with_merged_props(&self, overrides: &Props) -> VNode {
        match self {
            VNode::Element(e) => VNode::Element(Box::new(Element {
                tag: e.tag.clone(),
                props: e.props.merged(overrides),
                children: e.children.clone(),
            })),
            VNode::Component(c) => {
                let mut merged = c.clone();
                merged.props = c.props.merged(overrides);
                VNode::Component(merged)
            }
            other => other.clone(),
        }
    }
}

impl From<Element> for VNode {
    fn from(e: Element) -> Self {
        VNode::Element(Box::new(e))
    }
}

impl From<ComponentElement> for VNode {
    fn from(c: ComponentElement) -> Self {
        VNode::Component(Box::new(c))
    }
}

impl From<Text> for VNode {
    fn from(t: Text) -> Self {
        VNode::Text(t)
    }
}

impl From<&str> for VNode {
    fn from(s: &str) -> Self {
        VNode::text(s)
    }
}

impl From<String> for VNode {
    fn from(s: String) -> Self {
        VNode::text(s)
    }
}

impl<T: Into<VNode>> From<Option<T>> for VNode {
    fn from(v: Option<T>) -> Self {
        v.map_or(VNode::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;

    #[test]
    fn test_element_bearing() {
        assert!(VNode::from(Element::new("div")).is_element_bearing());
        assert!(!VNode::text("x").is_element_bearing());
        assert!(!VNode::Null.is_element_bearing());
        assert!(!VNode::External(NodeId::from_raw(1)).is_element_bearing());
    }

    #[test]
    fn test_with_merged_props_does_not_mutate() {
        let declared = VNode::from(Element::new("p").prop("label", "default").text("body"));
        let merged = declared.with_merged_props(&props! { "label" => "override" });

        assert_eq!(
            merged.props().and_then(|p| p.get_str("label")),
            Some("override")
        );
        assert_eq!(
            declared.props().and_then(|p| p.get_str("label")),
            Some("default")
        );
        // children carried over
        assert_eq!(
            merged.as_element().map(Element::text_content).as_deref(),
            Some("body")
        );
    }

    #[test]
    fn test_nested_descriptions_are_boxed() {
        // Recursive payloads sit behind a pointer
        assert!(std::mem::size_of::<VNode>() <= 32);

        let nested = VNode::portal(
            NodeId::from_raw(3),
            [VNode::portal(NodeId::from_raw(4), [Element::new("i")])],
        );
        let VNode::Portal(outer) = &nested else {
            panic!("expected portal");
        };
        assert!(matches!(&outer.children[0], VNode::Portal(inner) if inner.container == NodeId::from_raw(4)));
    }

    #[test]
    fn test_option_into_vnode() {
        assert!(VNode::from(None::<Element>).is_null());
        assert!(VNode::from(Some("hi")).is_text());
    }
}
