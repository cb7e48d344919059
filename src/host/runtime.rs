//! Component runtime and reconciler
//!
//! Mounts a `VNode` tree into the document of a [`Dom`] and keeps it in
//! sync across renders. Reconciliation is positional:
//!
//! | old            | new                         | result            |
//! |----------------|-----------------------------|-------------------|
//! | element `t`    | element `t`                 | patch in place    |
//! | component `C`  | component `C`, same key     | update instance   |
//! | text / null    | text / null                 | patch in place    |
//! | portal into X  | portal into X               | patch children    |
//! | external N     | external N                  | keep              |
//! | anything else  |                             | mount new, unmount old |
//!
//! Every mounted node contributes at least one DOM node to its parent;
//! null and portal leave an empty text anchor so self-triggered component
//! re-renders can splice their output back at the same position.
//!
//! A replacement is mounted before the node it replaces is unmounted, and
//! siblings are processed in order. When an `out_portal` moves to an
//! earlier position the new attachment point therefore claims the node
//! while the old one still holds it; the conflict is logged and the old
//! point's release becomes a no-op.
//!
//! A failed `render` or `flush` unmounts every live instance, so no
//! subscription or ownership outlives the broken tree.

use std::any::TypeId;

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::error::{PortalError, PortalResult};
use crate::node::{Children, ComponentElement, Element, PortalTarget, VNode};
use crate::props::Props;

use super::component::{AnyComponent, Component, Context, InstanceId, Payload, Scheduler};
use super::dom::{Dom, NodeId};
use super::render::inner_html;

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Configuration for a [`Runtime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Flush passes allowed before giving up with `RenderLoop`.
    pub max_flush_passes: usize,
}

impl RuntimeConfig {
    /// Default pass limit.
    pub const DEFAULT_MAX_FLUSH_PASSES: usize = 32;

    /// Create the default config.
    pub fn new() -> Self {
        Self {
            max_flush_passes: Self::DEFAULT_MAX_FLUSH_PASSES,
        }
    }

    /// Set the pass limit.
    pub fn with_max_flush_passes(mut self, passes: usize) -> Self {
        self.max_flush_passes = passes;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Mounted tree
// =============================================================================

#[derive(Debug)]
enum Mounted {
    Null {
        anchor: NodeId,
    },
    Text {
        dom: NodeId,
        content: String,
    },
    Element {
        dom: NodeId,
        tag: CompactString,
        children: Vec<Mounted>,
    },
    Component {
        id: InstanceId,
    },
    Portal {
        anchor: NodeId,
        container: NodeId,
        children: Vec<Mounted>,
    },
    External {
        dom: NodeId,
        host_parent: NodeId,
    },
}

struct Instance {
    component: Box<dyn AnyComponent>,
    name: &'static str,
    type_id: TypeId,
    key: Option<CompactString>,
    props: Props,
    children: Children,
    payload: Option<Payload>,
    // None only while the instance is being re-rendered
    rendered: Option<Mounted>,
    host_parent: NodeId,
}

// =============================================================================
// Runtime
// =============================================================================

/// Retained component runtime over an in-memory DOM
pub struct Runtime {
    dom: Dom,
    instances: FxHashMap<InstanceId, Instance>,
    root: Option<Mounted>,
    scheduler: Scheduler,
    next_instance: u64,
    config: RuntimeConfig,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Create a runtime with an empty document
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Create a runtime with custom configuration
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            dom: Dom::new(),
            instances: FxHashMap::default(),
            root: None,
            scheduler: Scheduler::new(),
            next_instance: 0,
            config,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The DOM being rendered into
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Mutable DOM access (e.g. to create portal containers)
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// Inner HTML of the document root
    pub fn html(&self) -> String {
        inner_html(&self.dom, self.dom.document())
    }

    /// Number of live component instances
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Whether `id` is still mounted
    pub fn contains_instance(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Oldest live instance of component type `C`
    pub fn find_component<C: Component>(&self) -> Option<InstanceId> {
        self.find_components::<C>().into_iter().next()
    }

    /// All live instances of component type `C`, in mount order
    pub fn find_components<C: Component>(&self) -> Vec<InstanceId> {
        let wanted = TypeId::of::<C>();
        let mut ids: Vec<_> = self
            .instances
            .iter()
            .filter(|(_, instance)| instance.type_id == wanted)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Borrow the component object of instance `id`
    pub fn component<C: Component>(&self, id: InstanceId) -> Option<&C> {
        self.instances
            .get(&id)
            .and_then(|instance| instance.component.as_any().downcast_ref())
    }

    /// Mutably borrow the component object of instance `id`
    ///
    /// Changes are not rendered until the instance is invalidated and
    /// flushed.
    pub fn component_mut<C: Component>(&mut self, id: InstanceId) -> Option<&mut C> {
        self.instances
            .get_mut(&id)
            .and_then(|instance| instance.component.as_any_mut().downcast_mut())
    }

    /// Schedule instance `id` for re-rendering
    pub fn invalidate(&self, id: InstanceId) {
        self.scheduler.schedule(id);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Render `vnode` as the document content, then flush
    pub fn render(&mut self, vnode: impl Into<VNode>) -> PortalResult<()> {
        if let Err(err) = self.render_root(vnode.into()) {
            self.teardown();
            return Err(err);
        }
        self.flush()?;
        Ok(())
    }

    fn render_root(&mut self, vnode: VNode) -> PortalResult<()> {
        let document = self.dom.document();
        let root = match self.root.take() {
            Some(old) => self.reconcile(old, vnode, document)?,
            None => self.mount(vnode, document)?,
        };
        let mut nodes = Vec::new();
        self.contribute(&root, &mut nodes);
        self.root = Some(root);
        self.dom.set_children(document, nodes)
    }

    /// Unmount everything rendered into the document
    pub fn unmount_root(&mut self) -> PortalResult<()> {
        if let Some(root) = self.root.take() {
            self.unmount(root)?;
        }
        Ok(())
    }

    /// Re-render invalidated instances until none are left
    ///
    /// Returns the number of instance renders performed.
    pub fn flush(&mut self) -> PortalResult<usize> {
        let mut renders = 0;
        for pass in 1..=self.config.max_flush_passes {
            let dirty = self.scheduler.take();
            if dirty.is_empty() {
                return Ok(renders);
            }
            tracing::trace!(pass, count = dirty.len(), "flush pass");
            for id in dirty {
                if !self.instances.contains_key(&id) {
                    continue;
                }
                if let Err(err) = self.rerender(id) {
                    self.teardown();
                    return Err(err);
                }
                renders += 1;
            }
        }
        if self.scheduler.is_idle() {
            Ok(renders)
        } else {
            Err(PortalError::RenderLoop {
                passes: self.config.max_flush_passes,
            })
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mount
    // ─────────────────────────────────────────────────────────────────────────

    fn mount(&mut self, vnode: VNode, host_parent: NodeId) -> PortalResult<Mounted> {
        let mounted = match vnode {
            VNode::Null => Mounted::Null {
                anchor: self.dom.create_text(""),
            },
            VNode::Text(text) => Mounted::Text {
                dom: self.dom.create_text(text.content.as_str()),
                content: text.content,
            },
            VNode::Element(elem) => {
                let Element {
                    tag,
                    props,
                    children,
                } = *elem;
                let dom = self.dom.create_element(&tag);
                self.dom.set_attrs(dom, &props)?;
                let children = self.mount_children(children, dom)?;
                self.attach_children(dom, &children)?;
                Mounted::Element { dom, tag, children }
            }
            VNode::Component(elem) => self.mount_component(*elem, host_parent)?,
            VNode::Portal(target) => {
                let PortalTarget {
                    container,
                    children,
                } = *target;
                let anchor = self.dom.create_text("");
                let children = self.mount_children(children, container)?;
                self.attach_children(container, &children)?;
                Mounted::Portal {
                    anchor,
                    container,
                    children,
                }
            }
            VNode::External(dom) => {
                if !self.dom.contains(dom) {
                    return Err(PortalError::NodeNotFound(dom));
                }
                Mounted::External { dom, host_parent }
            }
        };
        Ok(mounted)
    }

    fn mount_children(&mut self, children: Children, host_parent: NodeId) -> PortalResult<Vec<Mounted>> {
        children
            .into_iter()
            .map(|child| self.mount(child, host_parent))
            .collect()
    }

    fn mount_component(&mut self, elem: ComponentElement, host_parent: NodeId) -> PortalResult<Mounted> {
        let id = InstanceId::from_raw(self.next_instance);
        self.next_instance += 1;

        let type_id = elem.type_id();
        let payload = elem.payload().cloned();
        let mut component = elem.instantiate();
        let cx = self.context(id, &payload);
        let output = component.render(&elem.props, &elem.children, &cx);
        let rendered = self.mount(output, host_parent)?;
        component.mounted(&elem.props, &cx);
        tracing::debug!(instance = %id, component = elem.name, "component mounted");

        self.instances.insert(
            id,
            Instance {
                component,
                name: elem.name,
                type_id,
                key: elem.key,
                props: elem.props,
                children: elem.children,
                payload,
                rendered: Some(rendered),
                host_parent,
            },
        );
        Ok(Mounted::Component { id })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reconcile
    // ─────────────────────────────────────────────────────────────────────────

    fn reconcile(&mut self, old: Mounted, vnode: VNode, host_parent: NodeId) -> PortalResult<Mounted> {
        match (old, vnode) {
            (Mounted::Null { anchor }, VNode::Null) => Ok(Mounted::Null { anchor }),
            (Mounted::Text { dom, content }, VNode::Text(text)) => {
                if content != text.content {
                    self.dom.set_text(dom, text.content.as_str())?;
                }
                Ok(Mounted::Text {
                    dom,
                    content: text.content,
                })
            }
            (Mounted::Element { dom, tag, children }, VNode::Element(elem)) if tag == elem.tag => {
                let Element {
                    props,
                    children: next,
                    ..
                } = *elem;
                self.dom.set_attrs(dom, &props)?;
                let children = self.reconcile_children(children, next, dom)?;
                self.attach_children(dom, &children)?;
                Ok(Mounted::Element { dom, tag, children })
            }
            (Mounted::Component { id }, VNode::Component(elem)) if self.is_reusable(id, &elem) => {
                self.update_component(id, *elem, host_parent)?;
                Ok(Mounted::Component { id })
            }
            (
                Mounted::Portal {
                    anchor,
                    container,
                    children,
                },
                VNode::Portal(target),
            ) if container == target.container => {
                let PortalTarget { children: next, .. } = *target;
                let children = self.reconcile_children(children, next, container)?;
                self.attach_children(container, &children)?;
                Ok(Mounted::Portal {
                    anchor,
                    container,
                    children,
                })
            }
            (Mounted::External { dom, .. }, VNode::External(node)) if dom == node => {
                Ok(Mounted::External { dom, host_parent })
            }
            (old, vnode) => {
                let mounted = self.mount(vnode, host_parent)?;
                self.unmount(old)?;
                Ok(mounted)
            }
        }
    }

    fn reconcile_children(
        &mut self,
        old: Vec<Mounted>,
        next: Children,
        host_parent: NodeId,
    ) -> PortalResult<Vec<Mounted>> {
        let mut out = Vec::with_capacity(next.len());
        let mut old = old.into_iter();
        for vnode in next {
            let mounted = match old.next() {
                Some(prev) => self.reconcile(prev, vnode, host_parent)?,
                None => self.mount(vnode, host_parent)?,
            };
            out.push(mounted);
        }
        for leftover in old {
            self.unmount(leftover)?;
        }
        Ok(out)
    }

    fn is_reusable(&self, id: InstanceId, elem: &ComponentElement) -> bool {
        self.instances
            .get(&id)
            .is_some_and(|instance| elem.is_same_kind(instance.type_id, instance.key.as_deref()))
    }

    fn update_component(
        &mut self,
        id: InstanceId,
        elem: ComponentElement,
        host_parent: NodeId,
    ) -> PortalResult<()> {
        let mut instance = self
            .instances
            .remove(&id)
            .ok_or(PortalError::UnknownInstance(id))?;
        let Some(previous) = instance.rendered.take() else {
            self.instances.insert(id, instance);
            return Err(PortalError::UnknownInstance(id));
        };

        instance.payload = elem.payload().cloned();
        instance.props = elem.props;
        instance.children = elem.children;
        instance.host_parent = host_parent;

        let cx = self.context(id, &instance.payload);
        let output = instance
            .component
            .render(&instance.props, &instance.children, &cx);
        let reconciled = self.reconcile(previous, output, host_parent);
        let result = reconciled.map(|rendered| {
            instance.rendered = Some(rendered);
            instance.component.updated(&instance.props, &cx);
        });

        // Registered even on failure, so teardown still reaches it
        self.instances.insert(id, instance);
        result
    }

    fn rerender(&mut self, id: InstanceId) -> PortalResult<()> {
        let Some(mut instance) = self.instances.remove(&id) else {
            return Ok(());
        };
        let Some(previous) = instance.rendered.take() else {
            self.instances.insert(id, instance);
            return Err(PortalError::UnknownInstance(id));
        };
        let host_parent = instance.host_parent;

        let mut old_nodes = Vec::new();
        self.contribute(&previous, &mut old_nodes);
        let index = old_nodes
            .first()
            .and_then(|first| self.dom.position(host_parent, *first));

        let cx = self.context(id, &instance.payload);
        let output = instance
            .component
            .render(&instance.props, &instance.children, &cx);
        let rendered = match self.reconcile(previous, output, host_parent) {
            Ok(rendered) => rendered,
            Err(err) => {
                self.instances.insert(id, instance);
                return Err(err);
            }
        };

        let mut new_nodes = Vec::new();
        self.contribute(&rendered, &mut new_nodes);
        instance.rendered = Some(rendered);
        tracing::trace!(instance = %id, component = instance.name, "component re-rendered");
        self.instances.insert(id, instance);

        if old_nodes != new_nodes
            && let Some(index) = index
        {
            self.dom
                .splice_children(host_parent, index, &old_nodes, &new_nodes)?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Unmount
    // ─────────────────────────────────────────────────────────────────────────

    fn unmount(&mut self, mounted: Mounted) -> PortalResult<()> {
        match mounted {
            Mounted::Null { anchor } => self.dom.destroy(anchor),
            Mounted::Text { dom, .. } => self.dom.destroy(dom),
            Mounted::Element { dom, children, .. } => {
                for child in children {
                    self.unmount(child)?;
                }
                self.dom.destroy(dom)
            }
            Mounted::Component { id } => {
                let Some(mut instance) = self.instances.remove(&id) else {
                    return Ok(());
                };
                let cx = self.context(id, &instance.payload);
                instance.component.unmounting(&cx);
                tracing::debug!(instance = %id, component = instance.name, "component unmounted");
                match instance.rendered.take() {
                    Some(rendered) => self.unmount(rendered),
                    None => Ok(()),
                }
            }
            Mounted::Portal {
                anchor, children, ..
            } => {
                for child in children {
                    self.unmount(child)?;
                }
                self.dom.destroy(anchor)
            }
            // Externally owned: detach only if still where we put it
            Mounted::External { dom, host_parent } => {
                if self.dom.parent(dom) == Some(host_parent) {
                    self.dom.detach(dom)?;
                }
                Ok(())
            }
        }
    }

    /// Unmount every live instance and clear the document
    ///
    /// Used after a failed render: the partially reconciled tree cannot be
    /// trusted, but each instance still gets `unmounting`.
    fn teardown(&mut self) {
        let mut ids: Vec<_> = self.instances.keys().copied().collect();
        ids.sort_unstable();
        tracing::debug!(instances = ids.len(), "tearing down after failed render");

        // Parents first; their unmount already covers reachable children
        for id in ids {
            if !self.instances.contains_key(&id) {
                continue;
            }
            if let Err(err) = self.unmount(Mounted::Component { id }) {
                tracing::warn!(instance = %id, error = %err, "teardown left stale nodes");
            }
        }

        self.root = None;
        self.scheduler.take();
        let document = self.dom.document();
        if let Err(err) = self.dom.set_children(document, Vec::new()) {
            tracing::warn!(error = %err, "failed to clear document");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // DOM contribution
    // ─────────────────────────────────────────────────────────────────────────

    fn contribute(&self, mounted: &Mounted, out: &mut Vec<NodeId>) {
        match mounted {
            Mounted::Null { anchor } | Mounted::Portal { anchor, .. } => out.push(*anchor),
            Mounted::Text { dom, .. }
            | Mounted::Element { dom, .. }
            | Mounted::External { dom, .. } => out.push(*dom),
            Mounted::Component { id } => {
                if let Some(rendered) = self
                    .instances
                    .get(id)
                    .and_then(|instance| instance.rendered.as_ref())
                {
                    self.contribute(rendered, out);
                }
            }
        }
    }

    fn context(&self, id: InstanceId, payload: &Option<Payload>) -> Context {
        Context::new(id, self.scheduler.clone(), payload.clone())
    }

    fn attach_children(&mut self, parent: NodeId, children: &[Mounted]) -> PortalResult<()> {
        let mut nodes = Vec::with_capacity(children.len());
        for child in children {
            self.contribute(child, &mut nodes);
        }
        self.dom.set_children(parent, nodes)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;

    /// Counter with internal state, rendering `<span label=..>{count}</span>`.
    struct Counter {
        count: u32,
    }

    impl Component for Counter {
        fn render(&mut self, props: &Props, _children: &[VNode], _cx: &Context) -> VNode {
            Element::new("span")
                .with_props(props)
                .text(self.count.to_string())
                .into()
        }
    }

    fn counter() -> VNode {
        ComponentElement::new(|| Counter { count: 0 }).into()
    }

    /// Renders its children when `open`, nothing otherwise.
    struct Toggle {
        open: bool,
    }

    impl Component for Toggle {
        fn render(&mut self, _props: &Props, children: &[VNode], _cx: &Context) -> VNode {
            if self.open {
                Element::new("div").children(children.iter().cloned()).into()
            } else {
                VNode::Null
            }
        }
    }

    /// Invalidates itself on every render.
    struct Restless;

    impl Component for Restless {
        fn render(&mut self, _props: &Props, _children: &[VNode], cx: &Context) -> VNode {
            cx.invalidator().invalidate();
            VNode::Null
        }
    }

    #[test]
    fn test_render_elements_and_text() {
        let mut rt = Runtime::new();
        rt.render(Element::new("div").with_id("app").text("hello"))
            .unwrap();
        assert_eq!(rt.html(), "<div id=\"app\">hello</div>");

        rt.render(Element::new("div").with_id("app").text("bye"))
            .unwrap();
        assert_eq!(rt.html(), "<div id=\"app\">bye</div>");
    }

    #[test]
    fn test_same_tag_patches_in_place() {
        let mut rt = Runtime::new();
        rt.render(Element::new("div").child(Element::new("p"))).unwrap();
        let p = rt.dom().find_by_tag(rt.dom().document(), "p").unwrap();

        rt.render(Element::new("div").child(Element::new("p").prop("k", "v")))
            .unwrap();
        assert_eq!(rt.dom().find_by_tag(rt.dom().document(), "p"), Some(p));
        assert_eq!(rt.html(), "<div><p k=\"v\"></p></div>");
    }

    #[test]
    fn test_tag_change_replaces_node() {
        let mut rt = Runtime::new();
        rt.render(Element::new("div").child(Element::new("p"))).unwrap();
        let p = rt.dom().find_by_tag(rt.dom().document(), "p").unwrap();

        rt.render(Element::new("div").child(Element::new("h1"))).unwrap();
        assert!(!rt.dom().contains(p));
        assert_eq!(rt.html(), "<div><h1></h1></div>");
    }

    #[test]
    fn test_component_state_survives_rerender() {
        let mut rt = Runtime::new();
        rt.render(Element::new("div").child(counter())).unwrap();
        let id = rt.find_component::<Counter>().unwrap();

        rt.component_mut::<Counter>(id).unwrap().count = 5;
        rt.invalidate(id);
        assert_eq!(rt.flush().unwrap(), 1);
        assert_eq!(rt.html(), "<div><span>5</span></div>");

        // Parent re-render with new props keeps the instance
        let updated = ComponentElement::new(|| Counter { count: 0 }).prop("label", "x");
        rt.render(Element::new("div").child(updated)).unwrap();
        assert_eq!(rt.find_component::<Counter>(), Some(id));
        assert_eq!(rt.html(), "<div><span label=\"x\">5</span></div>");
    }

    #[test]
    fn test_keyed_component_remounts_on_key_change() {
        let mut rt = Runtime::new();
        let keyed = |key: &str| ComponentElement::new(|| Counter { count: 0 }).key(key);

        rt.render(Element::new("div").child(keyed("a"))).unwrap();
        let first = rt.find_component::<Counter>().unwrap();
        rt.render(Element::new("div").child(keyed("b"))).unwrap();
        let second = rt.find_component::<Counter>().unwrap();

        assert_ne!(first, second);
        assert!(!rt.contains_instance(first));
        assert_eq!(rt.instance_count(), 1);
    }

    #[test]
    fn test_self_rerender_splices_output_in_place() {
        let mut rt = Runtime::new();
        let toggle = ComponentElement::new(|| Toggle { open: false }).child("inside");
        rt.render(Element::new("main").text("a").child(toggle).text("b"))
            .unwrap();
        assert_eq!(rt.html(), "<main>ab</main>");

        let id = rt.find_component::<Toggle>().unwrap();
        rt.component_mut::<Toggle>(id).unwrap().open = true;
        rt.invalidate(id);
        rt.flush().unwrap();
        assert_eq!(rt.html(), "<main>a<div>inside</div>b</main>");

        rt.component_mut::<Toggle>(id).unwrap().open = false;
        rt.invalidate(id);
        rt.flush().unwrap();
        assert_eq!(rt.html(), "<main>ab</main>");
    }

    #[test]
    fn test_portal_renders_into_container() {
        let mut rt = Runtime::new();
        let container = rt.dom_mut().create_element("div");
        rt.render(Element::new("main").child(VNode::portal(container, [counter()])))
            .unwrap();

        assert_eq!(rt.html(), "<main></main>");
        assert_eq!(inner_html(rt.dom(), container), "<span>0</span>");
        assert!(!rt.dom().is_connected(container));
    }

    #[test]
    fn test_external_node_is_placed_and_detached_not_destroyed() {
        let mut rt = Runtime::new();
        let external = rt.dom_mut().create_element("video");
        rt.render(Element::new("main").child(VNode::External(external)))
            .unwrap();
        assert!(rt.dom().is_connected(external));
        assert_eq!(rt.html(), "<main><video></video></main>");

        rt.render(Element::new("main").child(VNode::Null)).unwrap();
        assert!(rt.dom().contains(external));
        assert!(!rt.dom().is_connected(external));
    }

    #[test]
    fn test_unmount_root_tears_down_instances() {
        let mut rt = Runtime::new();
        rt.render(Element::new("div").children([counter(), counter()]))
            .unwrap();
        assert_eq!(rt.find_components::<Counter>().len(), 2);

        rt.unmount_root().unwrap();
        assert_eq!(rt.instance_count(), 0);
        assert_eq!(rt.html(), "");
        assert_eq!(rt.dom().len(), 1);
    }

    #[test]
    fn test_render_loop_detected() {
        let mut rt = Runtime::with_config(RuntimeConfig::new().with_max_flush_passes(4));
        let err = rt
            .render(ComponentElement::new(|| Restless))
            .unwrap_err();
        assert_eq!(err, PortalError::RenderLoop { passes: 4 });
    }

    #[test]
    fn test_failed_render_unmounts_instances() {
        let mut rt = Runtime::new();
        rt.render(Element::new("div").child(counter())).unwrap();
        assert_eq!(rt.instance_count(), 1);

        let ghost = NodeId::from_raw(999);
        let broken = Element::new("div")
            .child(counter())
            .child(VNode::External(ghost));
        assert_eq!(rt.render(broken), Err(PortalError::NodeNotFound(ghost)));
        assert_eq!(rt.instance_count(), 0);
        assert_eq!(rt.html(), "");

        rt.render(Element::new("div").child(counter())).unwrap();
        assert_eq!(rt.instance_count(), 1);
        assert_eq!(rt.html(), "<div><span>0</span></div>");
    }

    #[test]
    fn test_missing_external_node_is_an_error() {
        let mut rt = Runtime::new();
        let ghost = NodeId::from_raw(999);
        let err = rt.render(VNode::External(ghost)).unwrap_err();
        assert_eq!(err, PortalError::NodeNotFound(ghost));
    }

    #[test]
    fn test_props_macro_on_component() {
        let mut rt = Runtime::new();
        let labelled =
            ComponentElement::new(|| Counter { count: 1 }).with_props(&props! { "label" => "n" });
        rt.render(labelled).unwrap();
        assert_eq!(rt.html(), "<span label=\"n\">1</span>");
    }
}
