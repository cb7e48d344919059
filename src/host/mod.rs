//! Reference host: an in-memory DOM with a small component runtime.
//!
//! It supplies the four capabilities portals need from a UI framework:
//!
//! - element creation ([`Dom`] implements `ElementFactory`),
//! - out-of-tree rendering (`VNode::Portal`),
//! - external-node placement (`VNode::External`),
//! - lifecycle notifications ([`Component`] hooks).
//!
//! [`in_portal`] and [`out_portal`] wrap the portal state machines as
//! components for this runtime.

mod component;
mod dom;
mod portals;
mod render;
mod runtime;

pub use component::{AnyComponent, Component, Context, InstanceId, Invalidator, Payload, Scheduler};
pub use dom::{Dom, DomKind, NodeId};
pub use portals::{
    InPortalComponent, OutPortalComponent, in_portal, in_portal_typed, out_portal,
    out_portal_typed,
};
pub use render::{inner_html, outer_html};
pub use runtime::{Runtime, RuntimeConfig};
