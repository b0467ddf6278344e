//! Host Binding
//!
//! Reference forwarding shim between a hosting document and a controller:
//! applies attribute mutations to the tree, diffs them through an
//! `AttributeWatcher` built from the element's registered definition, and
//! forwards each change record to the lifecycle interface in order. Any real
//! host binding does exactly this with its own mutation source.

use std::cell::RefCell;
use std::rc::Rc;

use ink_dom::{AttributeWatcher, Document, ElementDefinition, NodeId};

use crate::controller::ElementLifecycle;

/// Drives one element's lifecycle hooks from document mutations
pub struct HostBinding<L: ElementLifecycle> {
    document: Rc<RefCell<Document>>,
    element: NodeId,
    watcher: AttributeWatcher,
    controller: L,
}

impl<L: ElementLifecycle> HostBinding<L> {
    /// Bind a controller to its element
    ///
    /// Attributes already present on the element are delivered immediately,
    /// the way upgrade-time attribute callbacks fire for markup-declared
    /// attributes.
    pub fn new(
        document: Rc<RefCell<Document>>,
        element: NodeId,
        definition: &ElementDefinition,
        controller: L,
    ) -> Self {
        let mut binding = Self {
            document,
            element,
            watcher: AttributeWatcher::new(definition.observed_attributes.clone()),
            controller,
        };
        binding.deliver();
        binding
    }

    pub fn controller(&self) -> &L {
        &self.controller
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    /// Set an attribute and deliver the resulting change records
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.document
            .borrow_mut()
            .tree
            .set_attribute(self.element, name, value);
        self.deliver();
    }

    /// Remove an attribute and deliver the resulting change records
    pub fn remove_attribute(&mut self, name: &str) {
        self.document
            .borrow_mut()
            .tree
            .remove_attribute(self.element, name);
        self.deliver();
    }

    /// Insert the element under a parent and fire the connected hook
    pub fn connect(&mut self, parent: NodeId) {
        self.document
            .borrow_mut()
            .tree
            .append_child(parent, self.element);
        self.controller.connected();
    }

    /// Detach the element and fire the disconnected hook
    pub fn disconnect(&mut self) {
        self.document.borrow_mut().tree.detach(self.element);
        self.controller.disconnected();
    }

    fn deliver(&mut self) {
        let changes = {
            let doc = self.document.borrow();
            let Some(attrs) = doc
                .tree
                .get(self.element)
                .and_then(|n| n.as_element())
                .map(|e| &e.attributes)
            else {
                return;
            };
            self.watcher.diff(attrs)
        };
        for change in &changes {
            self.controller.attribute_changed(change);
        }
    }
}
