//! tola-portal - Reverse portals for retained UI trees
//!
//! Render a subtree once, then attach it at any position in the tree. Moving
//! the attachment point moves the rendered output without tearing down the
//! component instances inside it, so their internal state survives.
//!
//! ## Core Concepts
//!
//! - **Portal node**: a shared handle owning a detached container element
//!   and a single-slot props relay.
//! - **Source renderer** (`InPortal`): renders declared content into the
//!   container, merging relayed props into element-bearing children.
//! - **Attachment point** (`OutPortal`): places the container and pushes
//!   props to the source renderer.
//!
//! ## Modules
//! - `portal`: host-independent node, relay, and lifecycle state machines
//! - `node`: element descriptions (`VNode`, `Element`, `ComponentElement`)
//! - `props`: property values and the typed `PortalProps` shape
//! - `host`: reference in-memory DOM and component runtime
//! - `error`: error types
//!
//! ## Usage
//!
//! ```ignore
//! use tola_portal::prelude::*;
//!
//! let mut rt = Runtime::new();
//! let node = create_portal_node(rt.dom_mut(), PortalConfig::default());
//!
//! rt.render(
//!     Element::new("main")
//!         .child(in_portal(&node, [video_player()]))
//!         .child(Element::new("aside").child(out_portal(&node, props! { "theme" => "dark" }))),
//! )?;
//! ```

// =============================================================================
// Modules
// =============================================================================

mod macros;

/// Error types
pub mod error;

/// Property values and property sets
pub mod props;

/// Element descriptions: VNode, Element, ComponentElement, Text
pub mod node;

/// Portal node, relay channel, source and attachment state machines
pub mod portal;

/// Reference host: DOM, component runtime, portal components
pub mod host;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Props
pub use props::{PortalProps, PropValue, Props};

// Node types
pub use node::{Children, ComponentElement, Element, PortalTarget, Text, VNode};

// Portal core
pub use portal::{
    DetachPolicy, ElementFactory, InPortal, OutPortal, PortalConfig, PortalNode,
    create_portal_node, create_typed_portal_node,
};

// Host
pub use host::{
    Component, Context, Dom, NodeId, Runtime, RuntimeConfig, in_portal, in_portal_typed,
    out_portal, out_portal_typed,
};

// Error types
pub use error::{PortalError, PortalResult};

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(PortalNode: Send, Sync, Clone);
    static_assertions::assert_impl_all!(PortalNode<Props, String>: Send, Sync);
    static_assertions::assert_impl_all!(PortalError: Send, Sync, std::error::Error);

    #[test]
    fn test_end_to_end_move_keeps_output() {
        let mut rt = Runtime::new();
        let node = create_portal_node(rt.dom_mut(), PortalConfig::SPAN);
        let tree = |left: bool| {
            let place = |here: bool| {
                let slot = Element::new("li");
                if here {
                    slot.child(out_portal(&node, props! { "lang" => "en" }))
                } else {
                    slot
                }
            };
            Element::new("ul")
                .child(in_portal(&node, [Element::new("em").text("hi")]))
                .child(place(left))
                .child(place(!left))
        };

        rt.render(tree(true)).unwrap();
        assert_eq!(
            rt.html(),
            "<ul><li><span><em lang=\"en\">hi</em></span></li><li></li></ul>"
        );

        rt.render(tree(false)).unwrap();
        assert_eq!(
            rt.html(),
            "<ul><li></li><li><span><em lang=\"en\">hi</em></span></li></ul>"
        );
    }
}
