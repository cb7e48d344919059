//! Prelude module for common imports.
//!
//! ```ignore
//! use tola_portal::prelude::*;
//! ```

// Props
pub use crate::props;
pub use crate::props::{PortalProps, PropValue, Props};

// Node types
pub use crate::node::{Children, ComponentElement, Element, PortalTarget, Text, VNode};

// Portal core
pub use crate::portal::{
    AttachState, DetachPolicy, ElementFactory, InPortal, OutPortal, OwnerId, PortalConfig,
    PortalId, PortalNode, SourceState, create_portal_node, create_typed_portal_node,
    merge_children,
};

// Host
pub use crate::host::{
    Component, Context, Dom, InstanceId, Invalidator, NodeId, Runtime, RuntimeConfig, in_portal,
    in_portal_typed, inner_html, out_portal, out_portal_typed, outer_html,
};

// Error
pub use crate::error::{PortalError, PortalResult};
