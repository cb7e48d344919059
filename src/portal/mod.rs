//! Portal core: shared node, relay channel, and the two lifecycle roles.
//!
//! This module does not depend on the reference host. A host framework
//! supplies:
//!
//! - an [`ElementFactory`] for the detached container,
//! - an out-of-tree render primitive (fed by [`InPortal::render`]),
//! - an external-node placement primitive (fed by [`OutPortal::mount`]),
//! - mount/update/unmount notifications driving both state machines.
//!
//! At most one attachment point may display a node at a time. That is a
//! caller obligation; [`PortalNode::claim`] only logs a conflict.

mod attach;
mod config;
mod merge;
mod node;
mod source;

pub use attach::{AttachState, OutPortal};
pub use config::{DEFAULT_TAG, DetachPolicy, PortalConfig};
pub use merge::merge_children;
pub use node::{
    ElementFactory, OwnerId, PortalId, PortalNode, Subscriber, create_portal_node,
    create_typed_portal_node,
};
pub use source::{InPortal, SourceState};
