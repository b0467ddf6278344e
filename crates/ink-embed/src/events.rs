//! Event Attribute Binder
//!
//! Keeps the `on-<EventName>` attribute set and the live widget
//! subscriptions in agreement. Before the widget exists, resolved handlers
//! accumulate in the binding table; they are subscribed in one pass right
//! after readiness. After that, every attribute mutation rebinds
//! incrementally.

use std::collections::HashMap;
use std::rc::Rc;

use crate::globals::{GlobalRegistry, GlobalValue};
use crate::widget::{EditorHandle, Handler};

/// Attribute prefix for event handlers
pub const EVENT_PREFIX: &str = "on-";

/// Every event the element exposes as an `on-*` attribute: native DOM events
/// plus widget lifecycle and content events.
pub const EVENT_NAMES: &[&str] = &[
    "activate",
    "addundo",
    "beforeaddundo",
    "beforeexeccommand",
    "beforegetcontent",
    "beforepaste",
    "beforerenderui",
    "beforesetcontent",
    "blur",
    "change",
    "clearundos",
    "click",
    "contextmenu",
    "copy",
    "cut",
    "dblclick",
    "deactivate",
    "dirty",
    "drag",
    "dragdrop",
    "dragend",
    "draggesture",
    "dragover",
    "drop",
    "execcommand",
    "focus",
    "focusin",
    "focusout",
    "getcontent",
    "hide",
    "init",
    "input",
    "keydown",
    "keypress",
    "keyup",
    "loadcontent",
    "mousedown",
    "mouseenter",
    "mouseleave",
    "mousemove",
    "mouseout",
    "mouseover",
    "mouseup",
    "nodechange",
    "objectresizestart",
    "objectresized",
    "objectselected",
    "paste",
    "postprocess",
    "postrender",
    "preprocess",
    "progressstate",
    "redo",
    "remove",
    "reset",
    "savecontent",
    "selectionchange",
    "setattrib",
    "setcontent",
    "show",
    "submit",
    "undo",
    "visualaid",
];

/// Normalize an `on-*` attribute to its event name
///
/// Strips the prefix and lowercases; names outside the fixed list are not
/// event attributes.
pub fn event_name(attribute: &str) -> Option<String> {
    let rest = attribute.strip_prefix(EVENT_PREFIX)?;
    let name = rest.to_lowercase();
    EVENT_NAMES.contains(&name.as_str()).then_some(name)
}

/// Check whether an attribute name is a recognized event attribute
pub fn is_event_attribute(attribute: &str) -> bool {
    event_name(attribute).is_some()
}

/// The live binding table
#[derive(Default)]
pub struct EventBinder {
    bindings: HashMap<String, Handler>,
}

impl EventBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Check whether an event currently has a bound handler
    pub fn is_bound(&self, event: &str) -> bool {
        self.bindings.contains_key(event)
    }

    /// Apply one attribute mutation
    ///
    /// `value` is the new attribute value (None when removed). A value that
    /// does not resolve to a handler counts as "no handler", never an error.
    pub fn apply(
        &mut self,
        attribute: &str,
        value: Option<&str>,
        globals: &GlobalRegistry,
        widget: Option<&EditorHandle>,
    ) {
        let Some(event) = event_name(attribute) else {
            return;
        };

        let next: Option<Handler> = value.and_then(|path| match globals.resolve(path) {
            Some(GlobalValue::Handler(handler)) => Some(handler),
            _ => None,
        });

        let current = self.bindings.get(&event);
        let unchanged = match (current, &next) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        if let (Some(old), Some(w)) = (current, widget) {
            w.off(&event, old);
        }

        match next {
            Some(handler) => {
                if let Some(w) = widget {
                    w.on(&event, handler.clone());
                }
                self.bindings.insert(event, handler);
            }
            None => {
                self.bindings.remove(&event);
            }
        }
    }

    /// Subscribe every accumulated binding to a freshly ready widget
    pub fn flush(&self, widget: &EditorHandle) {
        for (event, handler) in &self.bindings {
            widget.on(event, handler.clone());
        }
    }

    /// Drop all bindings without touching any widget
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}
