//! Shared portal node and its relay channel.
//!
//! A `PortalNode` is the rendezvous point between the place content is
//! declared (`InPortal`) and the place it is displayed (`OutPortal`). It
//! holds the detached container, the single-slot props mailbox, at most one
//! subscriber, and a non-owning tag of the current attachment point.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::props::{PortalProps, Props};

use super::config::{DetachPolicy, PortalConfig};

/// Callback registered by the source renderer; receives every pushed set.
pub type Subscriber<P> = Arc<dyn Fn(&P) + Send + Sync>;

// =============================================================================
// ElementFactory
// =============================================================================

/// Host capability: synthesize a detached element with the given tag
pub trait ElementFactory {
    /// Host node handle
    type Node;

    /// Create an element that is not attached to the visible document
    fn create_element(&mut self, tag: &str) -> Self::Node;
}

// =============================================================================
// Identifiers
// =============================================================================

static NEXT_PORTAL_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_OWNER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique portal node identifier (for logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortalId(u64);

impl PortalId {
    fn next() -> Self {
        Self(NEXT_PORTAL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PortalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "portal-{}", self.0)
    }
}

/// Tag identifying an attachment point
///
/// Plain value, not a reference: recording it never keeps the attachment
/// point alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocate a fresh owner tag
    pub fn next() -> Self {
        Self(NEXT_OWNER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner-{}", self.0)
    }
}

// =============================================================================
// PortalNode
// =============================================================================

struct Relay<P> {
    pending: Option<P>,
    subscriber: Option<Subscriber<P>>,
    owner: Option<OwnerId>,
}

struct Shared<P, N> {
    id: PortalId,
    container: N,
    config: PortalConfig,
    relay: Mutex<Relay<P>>,
}

/// Shared handle to a detached container plus its props relay
///
/// Cloning is cheap and yields the same node; equality is identity.
/// `P` is the relayed property shape (`Props` for the untyped path),
/// `N` the host's node handle.
pub struct PortalNode<P: PortalProps = Props, N = crate::host::NodeId> {
    inner: Arc<Shared<P, N>>,
}

impl<P: PortalProps, N> Clone for PortalNode<P, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: PortalProps, N> PartialEq for PortalNode<P, N> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<P: PortalProps, N> Eq for PortalNode<P, N> {}

impl<P: PortalProps, N: fmt::Debug> fmt::Debug for PortalNode<P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relay = self.inner.relay.lock();
        f.debug_struct("PortalNode")
            .field("id", &self.inner.id)
            .field("container", &self.inner.container)
            .field("tag", &self.inner.config.tag)
            .field("pending", &relay.pending)
            .field("owner", &relay.owner)
            .field("subscribed", &relay.subscriber.is_some())
            .finish()
    }
}

impl<P: PortalProps, N> PortalNode<P, N> {
    /// Create a node with an empty detached container and an empty relay
    pub fn new<F>(factory: &mut F, config: PortalConfig) -> Self
    where
        F: ElementFactory<Node = N> + ?Sized,
    {
        let container = factory.create_element(&config.tag);
        let id = PortalId::next();
        tracing::debug!(portal = %id, tag = %config.tag, "created portal node");
        Self {
            inner: Arc::new(Shared {
                id,
                container,
                config,
                relay: Mutex::new(Relay {
                    pending: None,
                    subscriber: None,
                    owner: None,
                }),
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Node identifier
    pub fn id(&self) -> PortalId {
        self.inner.id
    }

    /// The detached container; stable for the node's lifetime
    pub fn container(&self) -> &N {
        &self.inner.container
    }

    /// Container tag
    pub fn tag(&self) -> &str {
        &self.inner.config.tag
    }

    /// Construction-time configuration
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// Latest pushed props, if any attachment point has pushed
    pub fn pending_props(&self) -> Option<P> {
        self.inner.relay.lock().pending.clone()
    }

    /// Attachment point currently displaying this node
    pub fn current_owner(&self) -> Option<OwnerId> {
        self.inner.relay.lock().owner
    }

    /// Whether a source renderer is subscribed
    pub fn has_subscriber(&self) -> bool {
        self.inner.relay.lock().subscriber.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Relay channel
    // ─────────────────────────────────────────────────────────────────────────

    /// Store `props` as the pending set and notify the subscriber, if any
    ///
    /// The subscriber runs synchronously after the relay lock is released.
    pub fn set_portal_props(&self, props: P) {
        let subscriber = {
            let mut relay = self.inner.relay.lock();
            relay.pending = Some(props.clone());
            relay.subscriber.clone()
        };
        tracing::trace!(portal = %self.inner.id, ?props, notify = subscriber.is_some(), "set portal props");
        if let Some(subscriber) = subscriber {
            subscriber(&props);
        }
    }

    /// Pending props, or the empty set when nothing was pushed
    pub fn get_initial_portal_props(&self) -> P {
        self.pending_props().unwrap_or_default()
    }

    /// Register (`Some`) or clear (`None`) the single subscriber
    ///
    /// A new subscriber silently replaces the previous one.
    pub fn set_portal_ref(&self, subscriber: Option<Subscriber<P>>) {
        let registered = subscriber.is_some();
        self.inner.relay.lock().subscriber = subscriber;
        tracing::trace!(portal = %self.inner.id, registered, "set portal ref");
    }

    /// Clear the subscriber slot only if it still holds `subscriber`
    ///
    /// Returns whether the slot was cleared. A renderer replaced by a newer
    /// one must not drop the newer subscription.
    pub fn clear_portal_ref(&self, subscriber: &Subscriber<P>) -> bool {
        let cleared = {
            let mut relay = self.inner.relay.lock();
            let current = relay
                .subscriber
                .as_ref()
                .is_some_and(|registered| Arc::ptr_eq(registered, subscriber));
            if current {
                relay.subscriber = None;
            }
            current
        };
        tracing::trace!(portal = %self.inner.id, cleared, "clear portal ref");
        cleared
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership bookkeeping
    // ─────────────────────────────────────────────────────────────────────────

    /// Record `owner` as the attachment point displaying this node
    ///
    /// Returns the previous owner when a different one was still active.
    /// Two simultaneous owners break the one-attachment-point contract; the
    /// conflict is logged and the new owner wins, nothing more. A host that
    /// mounts a moved attachment point before unmounting the old one hits
    /// this briefly; the old owner's `release` is then a no-op.
    pub fn claim(&self, owner: OwnerId) -> Option<OwnerId> {
        let previous = self.inner.relay.lock().owner.replace(owner);
        match previous {
            Some(prev) if prev != owner => {
                tracing::warn!(
                    portal = %self.inner.id,
                    %owner,
                    previous = %prev,
                    "portal node attached at two points at once"
                );
                Some(prev)
            }
            _ => {
                tracing::debug!(portal = %self.inner.id, %owner, "portal node attached");
                None
            }
        }
    }

    /// Clear ownership if `owner` is the current owner
    ///
    /// Applies the configured [`DetachPolicy`]. Releasing a node owned by
    /// someone else is a no-op.
    pub fn release(&self, owner: OwnerId) {
        let reset = {
            let mut relay = self.inner.relay.lock();
            if relay.owner != Some(owner) {
                return;
            }
            relay.owner = None;
            match self.inner.config.detach {
                DetachPolicy::RetainProps => None,
                DetachPolicy::ResetProps => {
                    relay.pending = None;
                    Some(relay.subscriber.clone())
                }
            }
        };
        tracing::debug!(portal = %self.inner.id, %owner, "portal node detached");
        if let Some(Some(subscriber)) = reset {
            subscriber(&P::default());
        }
    }
}

/// Create an untyped portal node (props are a dynamic [`Props`] mapping)
pub fn create_portal_node<F>(factory: &mut F, config: PortalConfig) -> PortalNode<Props, F::Node>
where
    F: ElementFactory + ?Sized,
{
    PortalNode::new(factory, config)
}

/// Create a portal node relaying a fixed property shape `P`
pub fn create_typed_portal_node<P, F>(factory: &mut F, config: PortalConfig) -> PortalNode<P, F::Node>
where
    P: PortalProps,
    F: ElementFactory + ?Sized,
{
    PortalNode::new(factory, config)
}

// =============================================================================
// Tests
// =============================================================================
