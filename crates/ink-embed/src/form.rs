//! Form Participation Adapter
//!
//! Finds the owning form and keeps exactly one formdata listener registered
//! on it. The owner is re-resolved on every attach and relevant attribute
//! change; detach always unregisters.

use ink_dom::{Document, FormDataProvider, NodeId};

/// Resolve the form owning an element
///
/// An explicit `form` attribute resolves by id lookup in the hosting
/// document; otherwise the nearest `form` ancestor wins, with the walk
/// continuing from the host element at every shadow boundary.
pub fn resolve_owner(doc: &Document, element: NodeId) -> Option<NodeId> {
    if let Some(id) = doc.tree.attribute(element, "form") {
        return doc
            .element_by_id(id)
            .filter(|&candidate| doc.tree.tag(candidate) == Some("form"));
    }
    doc.ancestors_crossing_shadow(element)
        .find(|&ancestor| doc.tree.tag(ancestor) == Some("form"))
}

/// The controller's registration against its owning form
pub struct FormBinding {
    form: NodeId,
    provider: FormDataProvider,
}

impl FormBinding {
    /// Create an unbound binding around the controller's provider
    pub fn new(provider: FormDataProvider) -> Self {
        Self {
            form: NodeId::NONE,
            provider,
        }
    }

    /// Currently registered form, if any
    pub fn form(&self) -> Option<NodeId> {
        self.form.is_valid().then_some(self.form)
    }

    /// Re-resolve the owner and move the registration if it changed
    pub fn rebind(&mut self, doc: &mut Document, element: NodeId) {
        let next = resolve_owner(doc, element).unwrap_or(NodeId::NONE);
        if next == self.form {
            return;
        }
        if self.form.is_valid() {
            doc.remove_formdata_listener(self.form, &self.provider);
        }
        if next.is_valid() {
            doc.add_formdata_listener(next, self.provider.clone());
            tracing::debug!("form participation rebound");
        }
        self.form = next;
    }

    /// Drop any registration, leaving the binding unowned
    pub fn unbind(&mut self, doc: &mut Document) {
        if self.form.is_valid() {
            doc.remove_formdata_listener(self.form, &self.provider);
        }
        self.form = NodeId::NONE;
    }
}
