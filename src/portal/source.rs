//! Source renderer (`InPortal`) lifecycle.
//!
//! ```text
//! Unmounted ──mount──▶ Mounted ◀──props pushed / parent render──▶ Mounted
//!     ▲                   │
//!     └──────unmount──────┘
//! ```
//!
//! The renderer owns the declared content. It keeps the latest relayed
//! props and merges them into its declared children on every render; the
//! host renders the result into the node's container.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::node::{Children, VNode};
use crate::props::PortalProps;

use super::merge::merge_children;
use super::node::{PortalNode, Subscriber};

/// Lifecycle state of a source renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// Not subscribed; pushed props are only stored on the node
    Unmounted,
    /// Subscribed; pushed props trigger a re-render
    Mounted,
}

/// Source renderer state machine
pub struct InPortal<P: PortalProps, N> {
    node: PortalNode<P, N>,
    latest: Arc<Mutex<P>>,
    subscriber: Option<Subscriber<P>>,
    state: SourceState,
}

impl<P: PortalProps, N> InPortal<P, N> {
    /// Bind to `node`, snapshotting whatever props were already pushed
    pub fn new(node: PortalNode<P, N>) -> Self {
        let latest = Arc::new(Mutex::new(node.get_initial_portal_props()));
        Self {
            node,
            latest,
            subscriber: None,
            state: SourceState::Unmounted,
        }
    }

    /// Portal node this renderer feeds
    pub fn node(&self) -> &PortalNode<P, N> {
        &self.node
    }

    /// Container the merged children must be rendered into
    pub fn container(&self) -> &N {
        self.node.container()
    }

    /// Current lifecycle state
    pub fn state(&self) -> SourceState {
        self.state
    }

    /// Whether `mount` ran without a matching `unmount`
    pub fn is_mounted(&self) -> bool {
        self.state == SourceState::Mounted
    }

    /// Latest known relayed props
    pub fn props(&self) -> P {
        self.latest.lock().clone()
    }

    /// Subscribe to the node; `trigger` requests a re-render from the host
    pub fn mount<T>(&mut self, trigger: T)
    where
        T: Fn() + Send + Sync + 'static,
    {
        let latest = Arc::clone(&self.latest);
        let subscriber: Subscriber<P> = Arc::new(move |props: &P| {
            *latest.lock() = props.clone();
            trigger();
        });
        self.node.set_portal_ref(Some(Arc::clone(&subscriber)));
        self.subscriber = Some(subscriber);
        self.state = SourceState::Mounted;
        tracing::debug!(portal = %self.node.id(), "in-portal mounted");
    }

    /// Declared children with the latest props merged in
    pub fn render(&self, declared: &[VNode]) -> Children {
        let overrides = self.latest.lock().to_props();
        merge_children(declared, &overrides)
    }

    /// Drop the subscription; the container and its node survive
    ///
    /// A subscription registered since by another renderer is left alone.
    pub fn unmount(&mut self) {
        if self.state == SourceState::Unmounted {
            return;
        }
        if let Some(subscriber) = self.subscriber.take() {
            self.node.clear_portal_ref(&subscriber);
        }
        self.state = SourceState::Unmounted;
        tracing::debug!(portal = %self.node.id(), "in-portal unmounted");
    }
}
