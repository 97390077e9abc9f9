//! Native node tree for the Vellum renderer.
//!
//! This crate provides the arena-based tree that painters render into. It
//! follows the node model of the [DOM Living Standard](https://dom.spec.whatwg.org/)
//! closely enough that a host element, the painter's container, and every
//! shape node can live in one document.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Nodes are
//! never freed; a detached node simply has no parent.

use std::collections::HashMap;

mod style;

pub use style::StyleMap;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the native tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node in the native tree.
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// Next sibling in the parent's children list.
    pub next_sibling: Option<NodeId>,

    /// Previous sibling in the parent's children list.
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    const fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// The kind of a native node.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// The document root. Exactly one per tree, at [`NodeId::ROOT`].
    Document,
    /// An element carrying a tag, attributes and inline style.
    Element(ElementData),
    /// A text run.
    Text(String),
}

/// Live measured size of an element, as a host layout engine reports it.
///
/// A zero dimension means "not measured", the same way a DOM `clientWidth`
/// of `0` does for an element that has not been laid out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientMetrics {
    /// Measured inner width (content + padding).
    pub client_width: f64,
    /// Measured inner height (content + padding).
    pub client_height: f64,
}

/// Element-specific data.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// The element's tag name.
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
    /// Inline style declarations, in declaration order.
    pub style: StyleMap,
    /// Measured size, if the host has laid this element out.
    pub client: Option<ClientMetrics>,
}

impl ElementData {
    /// Create element data with the given tag and no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }
}

/// Arena-based native tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// All nodes are stored in a contiguous vector, using indices for all
/// relationships. The Document node is always at index 0 (`NodeId::ROOT`).
#[derive(Debug, Clone)]
pub struct NativeTree {
    nodes: Vec<Node>,
}

impl NativeTree {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeType::Document)],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Whether `id` refers to an allocated node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Get the number of nodes ever allocated in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(node_type));
        id
    }

    /// Allocate a detached element with the given tag.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(tag_name)))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeType::Text(text.to_string()))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`. A child that already has
    /// a parent is removed from it first, so a node never has two parents.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        let prev_last_child = self.nodes[parent.0].children.last().copied();
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// [§ 4.2.4 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Removes `child` from `parent`. Does nothing if `child` is not a child
    /// of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) != Some(parent) {
            return;
        }

        self.nodes[parent.0].children.retain(|&id| id != child);

        let prev = self.nodes[child.0].prev_sibling.take();
        let next = self.nodes[child.0].next_sibling.take();
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = next;
        }
        if let Some(next_id) = next {
            self.nodes[next_id.0].prev_sibling = prev;
        }
        self.nodes[child.0].parent = None;
    }

    /// Removes `id` from whatever parent it has. Detached nodes are left alone.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id);
        }
    }

    /// Detaches every child of `id` (the `innerHTML = ''` operation).
    pub fn clear_children(&mut self, id: NodeId) {
        let removed = std::mem::take(&mut self.nodes[id.0].children);
        for child in removed {
            let node = &mut self.nodes[child.0];
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// [§ 4.2.1 Connected](https://dom.spec.whatwg.org/#connected)
    ///
    /// Whether `id` is the document or one of its descendants.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.is_descendant_of(id, NodeId::ROOT)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Replace the content of a text node. Other nodes are left alone.
    /// Returns whether `id` was a text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        match self.nodes.get_mut(id.0).map(|n| &mut n.node_type) {
            Some(NodeType::Text(content)) => {
                text.clone_into(content);
                true
            }
            _ => false,
        }
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Set one inline style property on an element. Non-elements are ignored.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        if let Some(el) = self.as_element_mut(id) {
            el.style.set(property, value);
        }
    }

    /// Read one inline style property of an element.
    #[must_use]
    pub fn style_value(&self, id: NodeId, property: &str) -> Option<&str> {
        self.as_element(id).and_then(|el| el.style.get(property))
    }

    /// Replace an element's inline style with the declarations in `css_text`.
    pub fn set_css_text(&mut self, id: NodeId, css_text: &str) {
        if let Some(el) = self.as_element_mut(id) {
            el.style = StyleMap::parse(css_text);
        }
    }

    /// Serialize an element's inline style. Empty for non-elements.
    #[must_use]
    pub fn css_text(&self, id: NodeId) -> String {
        self.as_element(id)
            .map(|el| el.style.to_css_text())
            .unwrap_or_default()
    }

    /// Set an attribute on an element. Non-elements are ignored.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.as_element_mut(id) {
            let _ = el.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Record the host-measured size of an element.
    pub fn set_client_metrics(&mut self, id: NodeId, metrics: ClientMetrics) {
        if let Some(el) = self.as_element_mut(id) {
            el.client = Some(metrics);
        }
    }
}

impl Default for NativeTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
#[derive(Debug)]
pub struct AncestorIterator<'a> {
    tree: &'a NativeTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Print a tree in indented form, one node per line.
pub fn print_tree(tree: &NativeTree, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    match tree.get(id).map(|n| &n.node_type) {
        Some(NodeType::Document) => println!("{indent}#document"),
        Some(NodeType::Element(el)) => {
            let style = el.style.to_css_text();
            if style.is_empty() {
                println!("{indent}<{}>", el.tag_name);
            } else {
                println!("{indent}<{} style=\"{style}\">", el.tag_name);
            }
        }
        Some(NodeType::Text(text)) => println!("{indent}\"{text}\""),
        None => return,
    }
    for &child in tree.children(id) {
        print_tree(tree, child, depth + 1);
    }
}
