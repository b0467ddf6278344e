//! ink-embed - Custom element embedding controller
//!
//! Wraps the external ink editing engine as a form-participating custom
//! element: attributes configure the widget, `on-*` attributes subscribe
//! handlers resolved from a global symbol namespace, and the element
//! contributes its content to native form submission. The editing engine,
//! the script fetch mechanism, and the mutation source are collaborators
//! behind traits; the hosting document model comes from `ink-dom`.

mod codec;
mod config;
mod controller;
mod events;
mod form;
mod globals;
mod host;
mod lifecycle;
mod loader;
mod widget;

pub use codec::Decoder;
pub use config::{
    ADVANCED_PREFIX, ConfigBuilder, ConfigMap, ConfigValue, Reflected, decoder_for,
    table_attributes,
};
pub use controller::{
    EditorElement, ElementLifecycle, EmbedEnv, EmbedError, EmbedOptions, TAG, definition,
    observed_attributes,
};
pub use events::{EVENT_NAMES, EVENT_PREFIX, EventBinder, event_name, is_event_attribute};
pub use form::{FormBinding, resolve_owner};
pub use globals::{GlobalRegistry, GlobalValue};
pub use host::HostBinding;
pub use lifecycle::{LifecycleError, Status};
pub use loader::{DEFAULT_CHANNEL, FALLBACK_API_KEY, ScriptLoader, script_url};
pub use widget::{
    Editor, EditorEvent, EditorHandle, EditorInit, EditorMode, EditorRuntime, Handler,
};
