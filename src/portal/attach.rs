//! Attachment point (`OutPortal`) lifecycle.
//!
//! ```text
//! Unmounted ──mount(props)──▶ Mounted ──update(props)──▶ Mounted
//!     ▲                          │
//!     └─────────unmount──────────┘
//! ```
//!
//! An attachment point claims the node, pushes its props into the relay and
//! tells the host which container to place at its position. Placement is
//! requested once per mount, and again only when the node itself changes.

use crate::props::PortalProps;

use super::node::{OwnerId, PortalNode};

/// Lifecycle state of an attachment point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachState {
    /// Not displaying the node
    Unmounted,
    /// Owner of the node; its container is placed here
    Mounted,
}

/// Attachment point state machine
pub struct OutPortal<P: PortalProps, N> {
    node: PortalNode<P, N>,
    owner: OwnerId,
    state: AttachState,
}

impl<P: PortalProps, N: Clone> OutPortal<P, N> {
    /// Bind to `node` with a fresh owner tag
    pub fn new(node: PortalNode<P, N>) -> Self {
        Self {
            node,
            owner: OwnerId::next(),
            state: AttachState::Unmounted,
        }
    }

    /// Portal node currently displayed
    pub fn node(&self) -> &PortalNode<P, N> {
        &self.node
    }

    /// Owner tag recorded on the node while mounted
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Current lifecycle state
    pub fn state(&self) -> AttachState {
        self.state
    }

    /// Container to place at this attachment point
    pub fn placement(&self) -> N {
        self.node.container().clone()
    }

    /// Claim the node, push `props`, and return the container to place
    pub fn mount(&mut self, props: P) -> N {
        self.node.claim(self.owner);
        self.node.set_portal_props(props);
        self.state = AttachState::Mounted;
        self.placement()
    }

    /// Re-push `props`; retarget when `node` is a different portal node
    ///
    /// Returns the new container when placement must be redone.
    pub fn update(&mut self, node: &PortalNode<P, N>, props: P) -> Option<N> {
        if *node == self.node {
            self.node.set_portal_props(props);
            return None;
        }

        tracing::debug!(from = %self.node.id(), to = %node.id(), "out-portal retargeted");
        if self.state == AttachState::Mounted {
            self.node.release(self.owner);
        }
        self.node = node.clone();
        Some(self.mount(props))
    }

    /// Release the node; the node's detach policy decides what happens to
    /// the pushed props
    pub fn unmount(&mut self) {
        if self.state == AttachState::Unmounted {
            return;
        }
        self.node.release(self.owner);
        self.state = AttachState::Unmounted;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::portal::{DetachPolicy, ElementFactory, PortalConfig};
    use crate::props;
    use crate::props::Props;

    struct Seq(u32);

    impl ElementFactory for Seq {
        type Node = u32;

        fn create_element(&mut self, _tag: &str) -> u32 {
            self.0 += 1;
            self.0
        }
    }

    #[test]
    fn test_mount_claims_pushes_and_places() {
        let node: PortalNode<Props, u32> = PortalNode::new(&mut Seq(0), PortalConfig::default());
        let mut out = OutPortal::new(node.clone());

        let placed = out.mount(props! { "label" => "x" });
        assert_eq!(placed, 1);
        assert_eq!(out.state(), AttachState::Mounted);
        assert_eq!(node.current_owner(), Some(out.owner()));
        assert_eq!(node.get_initial_portal_props().get_str("label"), Some("x"));
    }

    #[test]
    fn test_update_repushes_without_placement() {
        let node: PortalNode<Props, u32> = PortalNode::new(&mut Seq(0), PortalConfig::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        node.set_portal_ref(Some(Arc::new(move |p: &Props| sink.lock().push(p.clone()))));

        let mut out = OutPortal::new(node.clone());
        out.mount(props! { "n" => 1 });
        assert_eq!(out.update(&node, props! { "n" => 2 }), None);

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].get("n").and_then(|v| v.as_int()), Some(2));
    }

    #[test]
    fn test_update_with_new_node_redoes_placement() {
        let mut seq = Seq(0);
        let first: PortalNode<Props, u32> = PortalNode::new(&mut seq, PortalConfig::default());
        let second: PortalNode<Props, u32> = PortalNode::new(&mut seq, PortalConfig::default());

        let mut out = OutPortal::new(first.clone());
        out.mount(props! { "k" => "a" });

        let placed = out.update(&second, props! { "k" => "b" });
        assert_eq!(placed, Some(2));
        assert_eq!(first.current_owner(), None);
        assert_eq!(second.current_owner(), Some(out.owner()));
        assert_eq!(second.get_initial_portal_props().get_str("k"), Some("b"));
        assert_eq!(out.node(), &second);
    }

    #[test]
    fn test_unmount_releases() {
        let config = PortalConfig::new().with_detach(DetachPolicy::ResetProps);
        let node: PortalNode<Props, u32> = PortalNode::new(&mut Seq(0), config);
        let mut out = OutPortal::new(node.clone());
        out.mount(props! { "theme" => "dark" });
        out.unmount();

        assert_eq!(out.state(), AttachState::Unmounted);
        assert_eq!(node.current_owner(), None);
        assert!(node.pending_props().is_none());

        // Unmount twice is harmless
        out.unmount();
    }

    #[test]
    fn test_unmount_of_displaced_owner_keeps_new_owner() {
        let node: PortalNode<Props, u32> = PortalNode::new(&mut Seq(0), PortalConfig::default());
        let mut a = OutPortal::new(node.clone());
        let mut b = OutPortal::new(node.clone());
        a.mount(Props::new());
        b.mount(Props::new());

        a.unmount();
        assert_eq!(node.current_owner(), Some(b.owner()));
    }
}
