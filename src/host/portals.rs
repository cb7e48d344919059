//! Portal components for the reference runtime
//!
//! `in_portal` renders declared content into a portal node's container and
//! keeps it mounted there whether or not the container is placed anywhere.
//! `out_portal` places that container at its own position and relays props
//! back to the content. Moving an `out_portal` moves the container; the
//! component instances inside it are never remounted.

use crate::node::{ComponentElement, PortalTarget, VNode};
use crate::portal::{InPortal, OutPortal, PortalNode};
use crate::props::{PortalProps, Props};

use super::component::{Component, Context};
use super::dom::NodeId;

// =============================================================================
// InPortal
// =============================================================================

/// Source renderer: mounts its children into the node's container
pub struct InPortalComponent<P: PortalProps> {
    source: InPortal<P, NodeId>,
}

impl<P: PortalProps> Component for InPortalComponent<P> {
    fn render(&mut self, _props: &Props, children: &[VNode], _cx: &Context) -> VNode {
        VNode::Portal(Box::new(PortalTarget::new(
            *self.source.container(),
            self.source.render(children),
        )))
    }

    fn mounted(&mut self, _props: &Props, cx: &Context) {
        let invalidator = cx.invalidator();
        self.source.mount(move || invalidator.invalidate());
    }

    fn unmounting(&mut self, _cx: &Context) {
        self.source.unmount();
    }
}

/// Render `children` into `node`'s container (untyped props)
pub fn in_portal<I>(node: &PortalNode<Props, NodeId>, children: I) -> VNode
where
    I: IntoIterator,
    I::Item: Into<VNode>,
{
    in_portal_typed(node, children)
}

/// Render `children` into `node`'s container, relaying props of shape `P`
///
/// The description is keyed by the node, so pointing it at another node
/// remounts the content.
pub fn in_portal_typed<P, I>(node: &PortalNode<P, NodeId>, children: I) -> VNode
where
    P: PortalProps,
    I: IntoIterator,
    I::Item: Into<VNode>,
{
    let bound = node.clone();
    ComponentElement::new(move || InPortalComponent {
        source: InPortal::new(bound.clone()),
    })
    .key(node.id().to_string())
    .children(children)
    .into()
}

// =============================================================================
// OutPortal
// =============================================================================

/// Latest description of an attachment point
struct Attachment<P: PortalProps> {
    node: PortalNode<P, NodeId>,
    props: P,
}

/// Attachment point: places the node's container and pushes props
pub struct OutPortalComponent<P: PortalProps> {
    attach: OutPortal<P, NodeId>,
}

impl<P: PortalProps> Component for OutPortalComponent<P> {
    fn render(&mut self, _props: &Props, _children: &[VNode], cx: &Context) -> VNode {
        // Place the described node; `updated` moves ownership over after
        match cx.payload::<Attachment<P>>() {
            Some(attachment) => VNode::External(*attachment.node.container()),
            None => VNode::External(self.attach.placement()),
        }
    }

    fn mounted(&mut self, _props: &Props, cx: &Context) {
        let props = cx
            .payload::<Attachment<P>>()
            .map(|attachment| attachment.props.clone())
            .unwrap_or_default();
        self.attach.mount(props);
    }

    fn updated(&mut self, _props: &Props, cx: &Context) {
        if let Some(attachment) = cx.payload::<Attachment<P>>() {
            self.attach
                .update(&attachment.node, attachment.props.clone());
        }
    }

    fn unmounting(&mut self, _cx: &Context) {
        self.attach.unmount();
    }
}

/// Place `node`'s container here and relay `props` to its content
pub fn out_portal(node: &PortalNode<Props, NodeId>, props: Props) -> VNode {
    out_portal_typed(node, props)
}

/// Place `node`'s container here and relay typed `props` to its content
pub fn out_portal_typed<P: PortalProps>(node: &PortalNode<P, NodeId>, props: P) -> VNode {
    let bound = node.clone();
    ComponentElement::new(move || OutPortalComponent {
        attach: OutPortal::new(bound.clone()),
    })
    .with_props(&props.to_props())
    .with_payload(Attachment {
        node: node.clone(),
        props,
    })
    .into()
}

// =============================================================================
// Tests
// =============================================================================
