//! Error types for tola-portal.
//!
//! The portal relay itself never fails; these errors come from the
//! reference host (DOM arena and component runtime).

use thiserror::Error;

use crate::host::{InstanceId, NodeId};

/// Errors that can occur during DOM or runtime operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortalError {
    /// Node handle does not refer to a live node
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// Operation requires an element but the node is a text node
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// Operation requires a text node but the node is an element
    #[error("node {0} is not a text node")]
    NotText(NodeId),

    /// Inserting `child` under `parent` would make a node its own ancestor
    #[error("cannot insert node {child} under {parent}: would create a cycle")]
    CycleDetected {
        /// Intended parent
        parent: NodeId,
        /// Node being inserted
        child: NodeId,
    },

    /// Component instance handle is stale
    #[error("component instance {0} not found")]
    UnknownInstance(InstanceId),

    /// Flushing never settled: components kept invalidating each other
    #[error("render loop: still dirty after {passes} flush passes")]
    RenderLoop {
        /// Number of passes attempted
        passes: usize,
    },
}

/// Result type alias for portal host operations.
pub type PortalResult<T> = Result<T, PortalError>;

impl PortalError {
    /// Create a cycle error for an attempted insertion.
    pub fn cycle(parent: NodeId, child: NodeId) -> Self {
        Self::CycleDetected { parent, child }
    }
}
