//! Editor Collaborator Interfaces
//!
//! The editing engine is an external collaborator: this crate only talks to
//! it through the traits here. A host registers an `EditorRuntime` in the
//! global namespace (directly, or as the result of a script load); the
//! runtime hands back `Editor` widget handles.

use std::rc::Rc;

use ink_dom::NodeId;

use crate::config::ConfigMap;

/// A subscribed event callback
///
/// Handlers always receive the widget reference through the event, as an
/// explicit bound reference rather than an ambient closure capture.
pub type Handler = Rc<dyn Fn(&EditorEvent)>;

/// Shared handle to a live widget
pub type EditorHandle = Rc<dyn Editor>;

/// An event delivered to a subscribed handler
#[derive(Clone)]
pub struct EditorEvent {
    /// Normalized (lowercase) event name
    pub name: String,
    /// The widget the event originated from
    pub editor: EditorHandle,
}

impl EditorEvent {
    pub fn new(name: &str, editor: EditorHandle) -> Self {
        Self {
            name: name.to_lowercase(),
            editor,
        }
    }
}

/// Editing mode of a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Design,
    Readonly,
}

/// The live widget handle
///
/// Owned by exactly one controller instance; released through `destroy`.
pub trait Editor {
    /// Subscribe a handler to an event
    fn on(&self, event: &str, handler: Handler);

    /// Unsubscribe a handler by identity
    fn off(&self, event: &str, handler: &Handler);

    /// Current content
    fn get_content(&self) -> String;

    /// Replace the content
    fn set_content(&self, content: &str);

    fn mode(&self) -> EditorMode;

    fn set_mode(&self, mode: EditorMode);

    /// Dedicated disabled flag (only meaningful on runtimes that support it;
    /// the controller decides via a version-capability check)
    fn disabled(&self) -> bool;

    fn set_disabled(&self, disabled: bool);

    /// Update a single configuration option on the running widget
    fn set_option(&self, key: &str, value: &crate::config::ConfigValue);

    /// Widget version, for capability checks
    fn version(&self) -> semver::Version;

    /// Tear the widget down and release its resources
    fn destroy(&self);
}

/// Initialization request handed to the runtime
///
/// The runtime contract, in order: construct the widget, invoke `setup`
/// (with a synthetic `setup` event carrying the handle), invoke `on_ready`
/// with the handle, then emit the widget's `init` event. Readiness is a
/// separate signal from the `init` event so the controller can deliver its
/// queued subscriptions before `init` reaches them.
pub struct EditorInit {
    /// Mount node inside the controller's isolated subtree
    pub target: NodeId,
    /// Merged configuration
    pub config: ConfigMap,
    /// Caller-supplied setup hook, already resolved from configuration
    pub setup: Option<Handler>,
    /// Readiness signal back to the controller
    pub on_ready: Box<dyn FnOnce(EditorHandle)>,
}

/// The editing engine namespace object
pub trait EditorRuntime {
    /// Engine version (widgets report the same version)
    fn version(&self) -> semver::Version;

    /// Construct a widget asynchronously; resume via the callbacks in `init`
    fn init(&self, init: EditorInit);
}
