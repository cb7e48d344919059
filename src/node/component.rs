//! Component and portal descriptions
//!
//! A `ComponentElement` names a component type plus the props and children
//! handed to it; the runtime keeps one live instance per mounted description.
//! A `PortalTarget` describes children rendered into an existing container.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

use crate::host::{AnyComponent, Component, NodeId, Payload};
use crate::props::{PropValue, Props};

use super::{Children, VNode};

type Factory = Arc<dyn Fn() -> Box<dyn AnyComponent>>;

// =============================================================================
// ComponentElement
// =============================================================================

/// Description of a component: its type, props, children and optional key
#[derive(Clone)]
pub struct ComponentElement {
    /// Component type name (for debugging)
    pub name: &'static str,
    /// Props passed to `Component::render`
    pub props: Props,
    /// Children passed through to `Component::render`
    pub children: Children,
    /// Reconciliation key; instances are only reused when keys match
    pub key: Option<CompactString>,
    type_id: TypeId,
    factory: Factory,
    payload: Option<Payload>,
}

impl ComponentElement {
    /// Describe a component built by `factory` when first mounted
    ///
    /// The factory runs once per mount. Re-renders reuse the live instance.
    pub fn new<C, F>(factory: F) -> Self
    where
        C: Component,
        F: Fn() -> C + 'static,
    {
        Self {
            name: std::any::type_name::<C>(),
            props: Props::new(),
            children: Children::new(),
            key: None,
            type_id: TypeId::of::<C>(),
            factory: Arc::new(move || Box::new(factory()) as Box<dyn AnyComponent>),
            payload: None,
        }
    }

    /// Set a property (builder)
    pub fn prop(mut self, name: impl Into<CompactString>, value: impl Into<PropValue>) -> Self {
        self.props.set(name, value);
        self
    }

    /// Overlay a whole property set (builder)
    pub fn with_props(mut self, props: &Props) -> Self {
        self.props.extend(props);
        self
    }

    /// Append a child (builder)
    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children (builder)
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Set the reconciliation key (builder)
    pub fn key(mut self, key: impl Into<CompactString>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach an opaque value readable through `Context::payload` (builder)
    pub fn with_payload<T: std::any::Any>(mut self, value: T) -> Self {
        self.payload = Some(Arc::new(value));
        self
    }

    /// Opaque value attached with `with_payload`
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Type identity of the described component
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Whether an instance mounted from `other` can be reused for `self`
    pub fn is_same_kind(&self, type_id: TypeId, key: Option<&str>) -> bool {
        self.type_id == type_id && self.key.as_deref() == key
    }

    pub(crate) fn instantiate(&self) -> Box<dyn AnyComponent> {
        (self.factory)()
    }
}

impl fmt::Debug for ComponentElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentElement")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("props", &self.props)
            .field("children", &self.children)
            .field("payload", &self.payload.is_some())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// PortalTarget
// =============================================================================

/// Children rendered into `container` instead of the surrounding parent
#[derive(Debug, Clone)]
pub struct PortalTarget {
    /// Existing node receiving the children
    pub container: NodeId,
    /// Children to render there
    pub children: Children,
}

impl PortalTarget {
    /// Create a portal target
    pub fn new(container: NodeId, children: Children) -> Self {
        Self { container, children }
    }
}
