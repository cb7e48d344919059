//! Component model for the reference runtime
//!
//! A component is a stateful object the runtime keeps alive while its
//! description stays at the same position. It renders a `VNode` from its
//! props and children and may ask to be rendered again through an
//! `Invalidator`. Values that do not fit in `Props` travel as an opaque
//! payload readable through `Context::payload`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::node::VNode;
use crate::props::Props;

/// Opaque per-description value handed to a component through its `Context`
pub type Payload = Arc<dyn Any>;

// =============================================================================
// InstanceId
// =============================================================================

/// Handle to a mounted component instance
///
/// Ids grow with mount order, so a parent always has a smaller id than the
/// components it mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Create from a raw value
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

// =============================================================================
// Component
// =============================================================================

/// Stateful UI component
///
/// Lifecycle: `render` → `mounted` on first mount; `render` → `updated`
/// when the parent re-renders it; `render` alone when it invalidated
/// itself; `unmounting` before its output is torn down.
pub trait Component: 'static {
    /// Describe the output for the current props and children
    fn render(&mut self, props: &Props, children: &[VNode], cx: &Context) -> VNode;

    /// Called once after the first render is in the DOM
    fn mounted(&mut self, _props: &Props, _cx: &Context) {}

    /// Called after a parent-driven re-render with new props
    fn updated(&mut self, _props: &Props, _cx: &Context) {}

    /// Called before the instance and its output are removed
    fn unmounting(&mut self, _cx: &Context) {}
}

/// Object-safe view of a component with downcasting
pub trait AnyComponent: Component {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> AnyComponent for C {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// =============================================================================
// Scheduler / Invalidator
// =============================================================================

/// Shared set of instances waiting for a re-render
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    dirty: Arc<Mutex<FxHashSet<InstanceId>>>,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` dirty
    pub fn schedule(&self, id: InstanceId) {
        self.dirty.lock().insert(id);
    }

    /// Whether anything is waiting
    pub fn is_idle(&self) -> bool {
        self.dirty.lock().is_empty()
    }

    /// Drain the dirty set in mount order
    pub fn take(&self) -> Vec<InstanceId> {
        let mut ids: Vec<_> = self.dirty.lock().drain().collect();
        ids.sort_unstable();
        ids
    }
}

/// Handle that schedules one instance for re-rendering
///
/// `Send + Sync`, so it can sit inside a portal subscriber.
#[derive(Debug, Clone)]
pub struct Invalidator {
    id: InstanceId,
    scheduler: Scheduler,
}

impl Invalidator {
    /// Instance this handle schedules
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Request a re-render on the next flush
    pub fn invalidate(&self) {
        tracing::trace!(instance = %self.id, "invalidated");
        self.scheduler.schedule(self.id);
    }
}

// =============================================================================
// Context
// =============================================================================

/// Per-call context handed to component methods
#[derive(Debug, Clone)]
pub struct Context {
    id: InstanceId,
    scheduler: Scheduler,
    payload: Option<Payload>,
}

impl Context {
    pub(crate) fn new(id: InstanceId, scheduler: Scheduler, payload: Option<Payload>) -> Self {
        Self {
            id,
            scheduler,
            payload,
        }
    }

    /// Id of the instance being called
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Handle that re-renders this instance when invoked
    pub fn invalidator(&self) -> Invalidator {
        Invalidator {
            id: self.id,
            scheduler: self.scheduler.clone(),
        }
    }

    /// Payload of the current description, if it holds a `T`
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|payload| payload.downcast_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_drains_in_mount_order() {
        let scheduler = Scheduler::new();
        scheduler.schedule(InstanceId::from_raw(3));
        scheduler.schedule(InstanceId::from_raw(1));
        scheduler.schedule(InstanceId::from_raw(3));

        assert!(!scheduler.is_idle());
        assert_eq!(
            scheduler.take(),
            vec![InstanceId::from_raw(1), InstanceId::from_raw(3)]
        );
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_invalidator_targets_its_instance() {
        let scheduler = Scheduler::new();
        let cx = Context::new(InstanceId::from_raw(7), scheduler.clone(), None);
        let invalidator = cx.invalidator();
        assert_eq!(invalidator.id(), cx.id());

        invalidator.invalidate();
        assert_eq!(scheduler.take(), vec![InstanceId::from_raw(7)]);
    }

    #[test]
    fn test_context_payload_downcast() {
        let payload: Payload = Arc::new(42_u32);
        let cx = Context::new(InstanceId::from_raw(0), Scheduler::new(), Some(payload));
        assert_eq!(cx.payload::<u32>(), Some(&42));
        assert_eq!(cx.payload::<i64>(), None);

        let bare = Context::new(InstanceId::from_raw(1), Scheduler::new(), None);
        assert_eq!(bare.payload::<u32>(), None);
    }

    static_assertions::assert_impl_all!(Invalidator: Send, Sync);
}
