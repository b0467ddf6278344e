//! Document - High-level document API
//!
//! Owns the tree plus per-form data-collection listeners. The formdata
//! listener list is keyed by form node; providers run in registration order
//! when the form gathers its submission data.

use std::collections::HashMap;
use std::rc::Rc;

use crate::{DomTree, FormData, NodeId};

/// Contributes entries to a form's submission data
pub type FormDataProvider = Rc<dyn Fn(&Document, &mut FormData)>;

/// A hosting document
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Per-form data-collection listeners
    form_listeners: HashMap<NodeId, Vec<FormDataProvider>>,
}

impl Document {
    /// Create a document holding only the root
    pub fn new() -> Self {
        Self {
            tree: DomTree::new(),
            form_listeners: HashMap::new(),
        }
    }

    /// Find an element by its `id` attribute
    ///
    /// Searches the light tree only; shadow subtrees are encapsulated and
    /// not reachable by document-level id lookup.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_with_id(self.tree.root(), id)
    }

    fn find_with_id(&self, start: NodeId, id: &str) -> Option<NodeId> {
        let node = self.tree.get(start)?;
        for &child in &node.children {
            if self.tree.attribute(child, "id") == Some(id) {
                return Some(child);
            }
            if let Some(found) = self.find_with_id(child, id) {
                return Some(found);
            }
        }
        None
    }

    /// Ancestors of a node, crossing shadow boundaries
    pub fn ancestors_crossing_shadow(&self, from: NodeId) -> AncestorsCrossingShadow<'_> {
        AncestorsCrossingShadow {
            document: self,
            current: from,
        }
    }

    /// Register a formdata listener on a form element
    pub fn add_formdata_listener(&mut self, form: NodeId, provider: FormDataProvider) {
        self.form_listeners.entry(form).or_default().push(provider);
    }

    /// Remove a formdata listener by identity
    pub fn remove_formdata_listener(&mut self, form: NodeId, provider: &FormDataProvider) {
        if let Some(listeners) = self.form_listeners.get_mut(&form) {
            listeners.retain(|l| !Rc::ptr_eq(l, provider));
        }
    }

    /// Collect a form's submission data by dispatching its listeners
    pub fn gather_form_data(&self, form: NodeId) -> FormData {
        let listeners = self.form_listeners.get(&form).cloned().unwrap_or_default();
        let mut data = FormData::new();
        for listener in &listeners {
            listener(self, &mut data);
        }
        data
    }

    /// Number of listeners registered on a form
    pub fn formdata_listener_count(&self, form: NodeId) -> usize {
        self.form_listeners.get(&form).map(|l| l.len()).unwrap_or(0)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator walking parent links, continuing from shadow hosts
pub struct AncestorsCrossingShadow<'a> {
    document: &'a Document,
    current: NodeId,
}

impl Iterator for AncestorsCrossingShadow<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.document.tree.parent_crossing_shadow(self.current);
        if !next.is_valid() {
            return None;
        }
        self.current = next;
        Some(next)
    }
}
