//! DOM Tree (arena-based allocation)

use crate::{ElementData, Node, NodeData, NodeId, ShadowRootData, ShadowRootMode, TextData};

/// Arena-based DOM tree
///
/// Node 0 is always the document root. Shadow roots live in the same arena
/// but are not reachable through child links from the document; they hang off
/// their host element's `shadow_root` field.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// The document root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::new(NodeData::Element(ElementData::new(tag))))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Text(TextData {
            content: content.to_string(),
        })))
    }

    /// Append a child to a parent, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Detach a node from its parent, leaving its subtree intact
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get(id).map(|n| n.parent) else {
            return;
        };
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.retain(|&c| c != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
        }
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE)
    }

    /// Parent of a node, crossing shadow boundaries
    ///
    /// A shadow root has no parent; the walk continues from its host element.
    pub fn parent_crossing_shadow(&self, id: NodeId) -> NodeId {
        let Some(node) = self.get(id) else {
            return NodeId::NONE;
        };
        if node.parent.is_valid() {
            return node.parent;
        }
        node.as_shadow_root().map(|s| s.host).unwrap_or(NodeId::NONE)
    }

    /// Tag name of an element node
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Attach a shadow root to an element, or return the existing one
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> NodeId {
        if let Some(existing) = self.get(host).and_then(|n| n.as_element()).map(|e| e.shadow_root)
        {
            if existing.is_valid() {
                return existing;
            }
        }
        let root = self.push(Node::new(NodeData::ShadowRoot(ShadowRootData {
            host,
            mode,
        })));
        if let Some(elem) = self.get_mut(host).and_then(|n| n.as_element_mut()) {
            elem.shadow_root = root;
        }
        root
    }

    /// Get an attribute value of an element
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.attributes.get(name)
    }

    /// Set an attribute on an element, returning the previous value
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Option<String> {
        self.get_mut(id)?.as_element_mut()?.attributes.set(name, value)
    }

    /// Remove an attribute from an element, returning the previous value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.get_mut(id)?.as_element_mut()?.attributes.remove(name)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
