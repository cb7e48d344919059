//! Retained DOM arena
//!
//! A minimal document model: elements with attributes and ordered
//! children, plus text leaves, addressed by `NodeId`. Nodes may exist
//! detached from the document; reparenting moves a node, so a node is never
//! listed under two parents.

use std::fmt;

use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{PortalError, PortalResult};
use crate::portal::ElementFactory;
use crate::props::{PropValue, Props};

// =============================================================================
// NodeId
// =============================================================================

/// Handle to a node in a [`Dom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Create from a raw value
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw value
    pub const fn as_raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// DomKind / DomNode
// =============================================================================

/// Payload of a DOM node
#[derive(Debug, Clone, PartialEq)]
pub enum DomKind {
    Element { tag: CompactString, attrs: Props },
    Text(String),
}

#[derive(Debug, Clone)]
struct DomNode {
    kind: DomKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl DomNode {
    fn is_element(&self) -> bool {
        matches!(self.kind, DomKind::Element { .. })
    }
}

// =============================================================================
// Dom
// =============================================================================

/// Arena of DOM nodes with a document root
#[derive(Debug)]
pub struct Dom {
    nodes: FxHashMap<NodeId, DomNode>,
    next: u32,
    document: NodeId,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Tag of the document root element.
    pub const DOCUMENT_TAG: &'static str = "body";

    /// Create a DOM containing only the document root
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: FxHashMap::default(),
            next: 0,
            document: NodeId(0),
        };
        dom.document = dom.create_element(Self::DOCUMENT_TAG);
        dom
    }

    /// Root of the visible document
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Number of live nodes (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document root exists for the arena's lifetime
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn node(&self, id: NodeId) -> PortalResult<&DomNode> {
        self.nodes.get(&id).ok_or(PortalError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> PortalResult<&mut DomNode> {
        self.nodes.get_mut(&id).ok_or(PortalError::NodeNotFound(id))
    }

    fn alloc(&mut self, kind: DomKind) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        self.nodes.insert(
            id,
            DomNode {
                kind,
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(DomKind::Element {
            tag: tag.into(),
            attrs: Props::new(),
        })
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(DomKind::Text(text.into()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read access
    // ─────────────────────────────────────────────────────────────────────────

    /// Node payload
    pub fn kind(&self, id: NodeId) -> Option<&DomKind> {
        self.nodes.get(&id).map(|n| &n.kind)
    }

    /// Element tag (None for text or missing nodes)
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            DomKind::Element { tag, .. } => Some(tag.as_str()),
            DomKind::Text(_) => None,
        }
    }

    /// Text content of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            DomKind::Text(t) => Some(t.as_str()),
            DomKind::Element { .. } => None,
        }
    }

    /// Element attributes
    pub fn attrs(&self, id: NodeId) -> Option<&Props> {
        match self.kind(id)? {
            DomKind::Element { attrs, .. } => Some(attrs),
            DomKind::Text(_) => None,
        }
    }

    /// Single attribute value
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&PropValue> {
        self.attrs(id)?.get(name)
    }

    /// Parent node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Ordered children (empty for text or missing nodes)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Index of `child` under `parent`
    pub fn position(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|c| *c == child)
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether `id` is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(id) && self.is_ancestor(self.document, id)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.text(id) {
            out.push_str(text);
            return;
        }
        for child in self.children(id) {
            self.collect_text(*child, out);
        }
    }

    /// First element under `root` (inclusive, depth-first) matching `predicate`
    pub fn find_element<F>(&self, root: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&str, &Props) -> bool,
    {
        self.find_in(root, &predicate)
    }

    fn find_in<F>(&self, id: NodeId, predicate: &F) -> Option<NodeId>
    where
        F: Fn(&str, &Props) -> bool,
    {
        if let Some(DomKind::Element { tag, attrs }) = self.kind(id)
            && predicate(tag.as_str(), attrs)
        {
            return Some(id);
        }
        self.children(id)
            .iter()
            .find_map(|child| self.find_in(*child, predicate))
    }

    /// All elements under `root` (inclusive, depth-first) matching `predicate`
    pub fn find_all<F>(&self, root: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&str, &Props) -> bool,
    {
        let mut results = Vec::new();
        self.collect_matching(root, &predicate, &mut results);
        results
    }

    fn collect_matching<F>(&self, id: NodeId, predicate: &F, results: &mut Vec<NodeId>)
    where
        F: Fn(&str, &Props) -> bool,
    {
        if let Some(DomKind::Element { tag, attrs }) = self.kind(id)
            && predicate(tag.as_str(), attrs)
        {
            results.push(id);
        }
        for child in self.children(id) {
            self.collect_matching(*child, predicate, results);
        }
    }

    /// First element with `tag` under `root`
    pub fn find_by_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.find_element(root, |t, _| t == tag)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Set one attribute
    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: impl Into<CompactString>,
        value: impl Into<PropValue>,
    ) -> PortalResult<()> {
        match &mut self.node_mut(id)?.kind {
            DomKind::Element { attrs, .. } => {
                attrs.set(name, value);
                Ok(())
            }
            DomKind::Text(_) => Err(PortalError::NotAnElement(id)),
        }
    }

    /// Remove one attribute, returning its old value
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> PortalResult<Option<PropValue>> {
        match &mut self.node_mut(id)?.kind {
            DomKind::Element { attrs, .. } => Ok(attrs.remove(name)),
            DomKind::Text(_) => Err(PortalError::NotAnElement(id)),
        }
    }

    /// Replace the whole attribute set
    pub fn set_attrs(&mut self, id: NodeId, props: &Props) -> PortalResult<()> {
        match &mut self.node_mut(id)?.kind {
            DomKind::Element { attrs, .. } => {
                *attrs = props.clone();
                Ok(())
            }
            DomKind::Text(_) => Err(PortalError::NotAnElement(id)),
        }
    }

    /// Replace the content of a text node
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> PortalResult<()> {
        match &mut self.node_mut(id)?.kind {
            DomKind::Text(t) => {
                *t = text.into();
                Ok(())
            }
            DomKind::Element { .. } => Err(PortalError::NotText(id)),
        }
    }

    /// Append `child` as last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> PortalResult<()> {
        let mut children = self.children(parent).to_vec();
        children.retain(|c| *c != child);
        children.push(child);
        self.set_children(parent, children)
    }

    /// Make `children` the exact child list of `parent`
    ///
    /// Nodes dropped from the list become detached; nodes attached elsewhere
    /// are moved. Duplicate entries keep their first position.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) -> PortalResult<()> {
        if !self.node(parent)?.is_element() {
            return Err(PortalError::NotAnElement(parent));
        }

        let mut seen = FxHashSet::default();
        let mut unique = Vec::with_capacity(children.len());
        for child in children {
            self.node(child)?;
            if self.is_ancestor(child, parent) {
                return Err(PortalError::cycle(parent, child));
            }
            if seen.insert(child) {
                unique.push(child);
            }
        }

        let old = std::mem::take(&mut self.node_mut(parent)?.children);
        for id in old {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.parent = None;
            }
        }

        for &child in &unique {
            let previous = self.nodes.get(&child).and_then(|n| n.parent);
            if let Some(prev) = previous
                && let Some(prev_node) = self.nodes.get_mut(&prev)
            {
                prev_node.children.retain(|c| *c != child);
            }
            self.node_mut(child)?.parent = Some(parent);
        }

        self.node_mut(parent)?.children = unique;
        Ok(())
    }

    /// Replace `old` with `new` under `parent`, inserting at `index`
    ///
    /// `index` is the position `old` started at before any of it was
    /// detached; it is clamped to the remaining child count.
    pub fn splice_children(
        &mut self,
        parent: NodeId,
        index: usize,
        old: &[NodeId],
        new: &[NodeId],
    ) -> PortalResult<()> {
        let mut children = self.children(parent).to_vec();
        children.retain(|c| !old.contains(c) && !new.contains(c));
        let at = index.min(children.len());
        children.splice(at..at, new.iter().copied());
        self.set_children(parent, children)
    }

    /// Detach `id` from its parent, keeping the node alive
    pub fn detach(&mut self, id: NodeId) -> PortalResult<()> {
        let parent = self.node_mut(id)?.parent.take();
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|c| *c != id);
        }
        Ok(())
    }

    /// Detach and free `id`; its remaining children become detached
    pub fn destroy(&mut self, id: NodeId) -> PortalResult<()> {
        self.detach(id)?;
        let node = self
            .nodes
            .remove(&id)
            .ok_or(PortalError::NodeNotFound(id))?;
        for child in node.children {
            if let Some(child) = self.nodes.get_mut(&child) {
                child.parent = None;
            }
        }
        Ok(())
    }
}

impl ElementFactory for Dom {
    type Node = NodeId;

    fn create_element(&mut self, tag: &str) -> NodeId {
        Dom::create_element(self, tag)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_attach() {
        let mut dom = Dom::new();
        let div = dom.create_element("div");
        let text = dom.create_text("hello");
        assert!(!dom.is_connected(div));

        dom.append_child(div, text).unwrap();
        dom.append_child(dom.document(), div).unwrap();

        assert!(dom.is_connected(text));
        assert_eq!(dom.parent(text), Some(div));
        assert_eq!(dom.text_content(dom.document()), "hello");
        assert_eq!(dom.tag(div), Some("div"));
        assert_eq!(dom.text(text), Some("hello"));
    }

    #[test]
    fn test_reparent_moves_node() {
        let mut dom = Dom::new();
        let a = dom.create_element("a");
        let b = dom.create_element("b");
        let leaf = dom.create_element("i");

        dom.append_child(a, leaf).unwrap();
        dom.append_child(b, leaf).unwrap();

        assert!(dom.children(a).is_empty());
        assert_eq!(dom.children(b), &[leaf]);
        assert_eq!(dom.parent(leaf), Some(b));
    }

    #[test]
    fn test_cycle_detected() {
        let mut dom = Dom::new();
        let outer = dom.create_element("div");
        let inner = dom.create_element("div");
        dom.append_child(outer, inner).unwrap();

        let err = dom.append_child(inner, outer).unwrap_err();
        assert_eq!(err, PortalError::cycle(inner, outer));
        let err = dom.append_child(outer, outer).unwrap_err();
        assert_eq!(err, PortalError::cycle(outer, outer));
    }

    #[test]
    fn test_text_node_cannot_have_children() {
        let mut dom = Dom::new();
        let text = dom.create_text("x");
        let div = dom.create_element("div");
        assert_eq!(dom.append_child(text, div), Err(PortalError::NotAnElement(text)));
        assert_eq!(dom.set_text(div, "y"), Err(PortalError::NotText(div)));
    }

    #[test]
    fn test_set_children_detaches_dropped() {
        let mut dom = Dom::new();
        let parent = dom.create_element("ul");
        let items: Vec<_> = (0..3).map(|_| dom.create_element("li")).collect();
        dom.set_children(parent, items.clone()).unwrap();

        dom.set_children(parent, vec![items[2], items[0]]).unwrap();
        assert_eq!(dom.children(parent), &[items[2], items[0]]);
        assert_eq!(dom.parent(items[1]), None);
        assert!(dom.contains(items[1]));
    }

    #[test]
    fn test_splice_children() {
        let mut dom = Dom::new();
        let parent = dom.create_element("div");
        let a = dom.create_text("a");
        let b = dom.create_text("b");
        let c = dom.create_text("c");
        let d = dom.create_text("d");
        dom.set_children(parent, vec![a, b, c]).unwrap();

        dom.splice_children(parent, 1, &[b], &[d]).unwrap();
        assert_eq!(dom.children(parent), &[a, d, c]);
        assert_eq!(dom.parent(b), None);
    }

    #[test]
    fn test_destroy_orphans_children() {
        let mut dom = Dom::new();
        let outer = dom.create_element("div");
        let inner = dom.create_element("span");
        dom.append_child(dom.document(), outer).unwrap();
        dom.append_child(outer, inner).unwrap();

        dom.destroy(outer).unwrap();
        assert!(!dom.contains(outer));
        assert!(dom.contains(inner));
        assert_eq!(dom.parent(inner), None);
        assert!(dom.children(dom.document()).is_empty());
        assert_eq!(dom.destroy(outer), Err(PortalError::NodeNotFound(outer)));
    }

    #[test]
    fn test_attrs_and_find() {
        let mut dom = Dom::new();
        let root = dom.document();
        let p = dom.create_element("p");
        dom.append_child(root, p).unwrap();
        dom.set_attr(p, "label", "x").unwrap();

        assert_eq!(dom.attr(p, "label"), Some(&PropValue::from("x")));
        assert_eq!(dom.find_by_tag(root, "p"), Some(p));
        assert_eq!(
            dom.find_element(root, |_, attrs| attrs.get_str("label") == Some("x")),
            Some(p)
        );
        assert_eq!(dom.find_all(root, |tag, _| tag == "p"), vec![p]);

        assert_eq!(dom.remove_attr(p, "label"), Ok(Some(PropValue::from("x"))));
        assert_eq!(dom.attr(p, "label"), None);
    }
}
