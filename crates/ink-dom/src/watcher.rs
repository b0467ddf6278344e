//! Attribute Watching
//!
//! Snapshot diffing over an element's observed attributes. The host applies
//! attribute mutations to the tree, then asks the watcher for the per-key
//! change records to deliver to the element's attribute-changed callback, in
//! occurrence order.

use crate::AttributeMap;

/// The set of attribute names an element observes
///
/// Exact names plus open-ended prefix families (an element observing `on-`
/// sees `on-click`, `on-init`, and so on).
#[derive(Debug, Clone, Default)]
pub struct ObservedAttributes {
    pub exact: Vec<String>,
    pub prefixes: Vec<String>,
}

impl ObservedAttributes {
    pub fn new(exact: Vec<String>, prefixes: Vec<String>) -> Self {
        Self { exact, prefixes }
    }

    /// Check whether an attribute name is observed
    pub fn matches(&self, name: &str) -> bool {
        self.exact.iter().any(|e| e == name)
            || self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}

/// One observed attribute change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Diffs an attribute collection against its previous snapshot
///
/// Changes for names outside the observed set are never emitted. Ordering is
/// deterministic: additions and value changes in current attribute order,
/// removals after, in former attribute order.
#[derive(Debug)]
pub struct AttributeWatcher {
    observed: ObservedAttributes,
    snapshot: Vec<(String, String)>,
}

impl AttributeWatcher {
    pub fn new(observed: ObservedAttributes) -> Self {
        Self {
            observed,
            snapshot: Vec::new(),
        }
    }

    /// The observed set this watcher filters on
    pub fn observed(&self) -> &ObservedAttributes {
        &self.observed
    }

    /// Diff against the previous snapshot and advance it
    pub fn diff(&mut self, attrs: &AttributeMap) -> Vec<AttributeChange> {
        let mut changes = Vec::new();
        let mut current = Vec::new();

        for (name, value) in attrs.iter() {
            if !self.observed.matches(name) {
                continue;
            }
            current.push((name.to_string(), value.to_string()));
            let old = self
                .snapshot
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone());
            if old.as_deref() != Some(value) {
                changes.push(AttributeChange {
                    name: name.to_string(),
                    old_value: old,
                    new_value: Some(value.to_string()),
                });
            }
        }

        for (name, old_value) in &self.snapshot {
            if !attrs.has(name) {
                changes.push(AttributeChange {
                    name: name.clone(),
                    old_value: Some(old_value.clone()),
                    new_value: None,
                });
            }
        }

        self.snapshot = current;
        changes
    }
}
