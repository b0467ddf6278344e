//! Embedding Controller
//!
//! The `<ink-editor>` custom element: composes the codec, configuration
//! builder, event binder, lifecycle state machine, loader gate, and form
//! adapter behind the four lifecycle hooks a host invokes. One controller
//! owns one widget; instances are independent.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use ink_dom::{
    AttributeChange, Document, ElementDefinition, FormDataProvider, NodeId, ObservedAttributes,
    ShadowRootMode,
};

use crate::config::{self, ConfigBuilder, ConfigMap, ConfigValue, Reflected};
use crate::events::{self, EventBinder};
use crate::form::FormBinding;
use crate::globals::{GlobalRegistry, GlobalValue};
use crate::lifecycle::Status;
use crate::loader::{self, ScriptLoader};
use crate::widget::{EditorHandle, EditorInit, EditorMode, EditorRuntime};

/// The element tag name
pub const TAG: &str = "ink-editor";

/// Controller error
///
/// The only hard failure this component defines; everything else degrades to
/// an omitted key or an absent handler.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmbedError {
    #[error("already initialized")]
    AlreadyInitialized,
}

/// Tunables a host fixes per installation rather than per element
#[derive(Debug, Clone)]
pub struct EmbedOptions {
    /// Namespace path the runtime is registered under
    pub runtime_path: String,
    /// Honor `config-<key>` attributes
    pub advanced_config: bool,
    /// Engines at or above this version carry a dedicated disabled flag;
    /// older ones are shimmed through read-only mode. A property of the
    /// engine's release history, so configurable rather than baked in.
    pub disabled_capability_min: semver::Version,
    /// Attribute-name to configuration-key rewrites
    pub config_renames: HashMap<String, String>,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            runtime_path: "ink".to_string(),
            advanced_config: false,
            disabled_capability_min: semver::Version::new(6, 4, 0),
            config_renames: HashMap::new(),
        }
    }
}

/// Collaborators handed to every controller
#[derive(Clone)]
pub struct EmbedEnv {
    pub globals: Rc<GlobalRegistry>,
    pub loader: Rc<dyn ScriptLoader>,
    pub options: EmbedOptions,
}

/// The four lifecycle hooks a host forwards
///
/// Construction is the type's own constructor; the hosting runtime calls the
/// rest as its callback entry points fire.
pub trait ElementLifecycle {
    fn connected(&self);
    fn disconnected(&self);
    fn attribute_changed(&self, change: &AttributeChange);
}

struct Inner {
    document: Weak<RefCell<Document>>,
    element: NodeId,
    /// Isolated rendering root, created once, never replaced
    shadow: NodeId,
    /// Mount node for the widget inside the shadow subtree
    target: NodeId,
    status: Status,
    /// Present iff status is Ready
    widget: Option<EditorHandle>,
    binder: EventBinder,
    form: FormBinding,
    env: EmbedEnv,
    /// Loader gate: at most one load attempt per instance
    load_requested: bool,
    attached: bool,
}

/// The custom element controller
#[derive(Clone)]
pub struct EditorElement {
    inner: Rc<RefCell<Inner>>,
}

impl EditorElement {
    /// Construct the controller for an element in a document
    ///
    /// Attaches the shadow root and mount target immediately; nothing else
    /// happens until the element is connected or explicitly initialized.
    pub fn new(document: &Rc<RefCell<Document>>, element: NodeId, env: EmbedEnv) -> Self {
        let (shadow, target) = {
            let mut doc = document.borrow_mut();
            let shadow = doc.tree.attach_shadow(element, ShadowRootMode::Open);
            let target = doc.tree.create_element("textarea");
            doc.tree.append_child(shadow, target);
            (shadow, target)
        };

        let doc_weak = Rc::downgrade(document);
        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<Inner>>| {
            let provider_weak = weak.clone();
            let provider: FormDataProvider = Rc::new(move |doc, data| {
                let Some(inner) = provider_weak.upgrade() else {
                    return;
                };
                let inner = inner.borrow();
                let name = doc.tree.attribute(inner.element, "name");
                let value = inner.widget.as_ref().map(|w| w.get_content());
                // Contribute only a complete pair; no placeholder entries.
                if let (Some(name), Some(value)) = (name, value) {
                    data.append(name, value);
                }
            });

            RefCell::new(Inner {
                document: doc_weak,
                element,
                shadow,
                target,
                status: Status::default(),
                widget: None,
                binder: EventBinder::new(),
                form: FormBinding::new(provider),
                env,
                load_requested: false,
                attached: false,
            })
        });

        Self { inner }
    }

    /// Explicitly initialize, merging `extra` under the attribute-derived
    /// configuration
    ///
    /// Fails loudly when the controller has already left Raw.
    pub fn init(&self, extra: Option<ConfigMap>) -> Result<(), EmbedError> {
        {
            let mut inner = self.inner.borrow_mut();
            inner
                .status
                .begin_init()
                .map_err(|_| EmbedError::AlreadyInitialized)?;
        }
        tracing::info!("initializing editor element");
        self.proceed_when_loaded(extra);
        Ok(())
    }

    /// Current lifecycle status
    pub fn status(&self) -> Status {
        self.inner.borrow().status
    }

    /// Host element node
    pub fn node(&self) -> NodeId {
        self.inner.borrow().element
    }

    /// Root of the isolated rendering subtree
    pub fn shadow_root(&self) -> NodeId {
        self.inner.borrow().shadow
    }

    /// Mount node inside the isolated subtree
    pub fn target(&self) -> NodeId {
        self.inner.borrow().target
    }

    /// Current content, unavailable before Ready
    pub fn value(&self) -> Option<String> {
        self.widget().map(|w| w.get_content())
    }

    /// Replace the content; ignored before Ready
    pub fn set_value(&self, content: &str) {
        if let Some(widget) = self.widget() {
            widget.set_content(content);
        }
    }

    pub fn readonly(&self) -> bool {
        match self.widget() {
            Some(widget) => widget.mode() == EditorMode::Readonly,
            None => self.has_attribute("readonly"),
        }
    }

    pub fn set_readonly(&self, readonly: bool) {
        self.reflect_flag("readonly", readonly);
        self.apply_readonly(readonly);
    }

    pub fn disabled(&self) -> bool {
        let (widget, min) = {
            let inner = self.inner.borrow();
            (
                inner.widget.clone(),
                inner.env.options.disabled_capability_min.clone(),
            )
        };
        match widget {
            Some(widget) => {
                if widget.version() >= min {
                    widget.disabled()
                } else {
                    widget.mode() == EditorMode::Readonly
                }
            }
            None => self.has_attribute("disabled"),
        }
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.reflect_flag("disabled", disabled);
        self.apply_disabled(disabled);
    }

    pub fn placeholder(&self) -> Option<String> {
        self.attribute("placeholder")
    }

    pub fn set_placeholder(&self, placeholder: Option<&str>) {
        self.reflect_value("placeholder", placeholder);
        self.apply_placeholder(placeholder);
    }

    pub fn autofocus(&self) -> bool {
        self.has_attribute("autofocus")
    }

    pub fn set_autofocus(&self, autofocus: bool) {
        self.reflect_flag("autofocus", autofocus);
    }

    /// The `name` attribute, as contributed to form data
    pub fn name(&self) -> Option<String> {
        self.attribute("name")
    }

    /// Currently owning form
    pub fn form(&self) -> Option<NodeId> {
        self.inner.borrow().form.form()
    }

    /// Check whether an event currently has an attribute-bound handler
    pub fn is_event_bound(&self, event: &str) -> bool {
        self.inner.borrow().binder.is_bound(event)
    }

    /// The element's tag name
    pub fn element_type(&self) -> String {
        let Some(doc_rc) = self.document() else {
            return String::new();
        };
        let doc = doc_rc.borrow();
        let element = self.inner.borrow().element;
        doc.tree.tag(element).unwrap_or_default().to_string()
    }

    /// Release the widget and tear down all external registrations
    pub fn destroy(&self) {
        if let Some(doc_rc) = self.document() {
            let mut doc = doc_rc.borrow_mut();
            let mut inner = self.inner.borrow_mut();
            inner.form.unbind(&mut doc);
            inner.attached = false;
        }
        let widget = {
            let mut inner = self.inner.borrow_mut();
            inner.binder.clear();
            inner.widget.take()
        };
        if let Some(widget) = widget {
            widget.destroy();
        }
    }

    fn document(&self) -> Option<Rc<RefCell<Document>>> {
        self.inner.borrow().document.upgrade()
    }

    fn widget(&self) -> Option<EditorHandle> {
        self.inner.borrow().widget.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        let doc_rc = self.document()?;
        let doc = doc_rc.borrow();
        let element = self.inner.borrow().element;
        doc.tree.attribute(element, name).map(str::to_string)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    fn reflect_flag(&self, name: &str, on: bool) {
        let Some(doc_rc) = self.document() else {
            return;
        };
        let mut doc = doc_rc.borrow_mut();
        let element = self.inner.borrow().element;
        if on {
            doc.tree.set_attribute(element, name, "");
        } else {
            doc.tree.remove_attribute(element, name);
        }
    }

    fn reflect_value(&self, name: &str, value: Option<&str>) {
        let Some(doc_rc) = self.document() else {
            return;
        };
        let mut doc = doc_rc.borrow_mut();
        let element = self.inner.borrow().element;
        match value {
            Some(value) => {
                doc.tree.set_attribute(element, name, value);
            }
            None => {
                doc.tree.remove_attribute(element, name);
            }
        }
    }

    /// Run the loader gate, then construct the widget
    fn proceed_when_loaded(&self, extra: Option<ConfigMap>) {
        let (globals, script_loader, runtime_path) = {
            let inner = self.inner.borrow();
            (
                inner.env.globals.clone(),
                inner.env.loader.clone(),
                inner.env.options.runtime_path.clone(),
            )
        };

        if let Some(GlobalValue::Runtime(runtime)) = globals.resolve(&runtime_path) {
            self.construct_widget(runtime, extra);
            return;
        }

        {
            let mut inner = self.inner.borrow_mut();
            if inner.load_requested {
                return;
            }
            inner.load_requested = true;
        }

        let url = {
            let Some(doc_rc) = self.document() else {
                return;
            };
            let doc = doc_rc.borrow();
            let element = self.inner.borrow().element;
            loader::script_url(
                doc.tree.attribute(element, "src"),
                doc.tree.attribute(element, "api-key"),
                doc.tree.attribute(element, "channel"),
            )
        };

        match url {
            Ok(url) => {
                tracing::info!("loading editor runtime from {}", url);
                let weak = Rc::downgrade(&self.inner);
                script_loader.load(
                    url.as_str(),
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            EditorElement { inner }.resume_after_load(extra);
                        }
                    }),
                );
            }
            Err(err) => tracing::warn!("invalid editor script source: {}", err),
        }
    }

    /// Loader completion callback
    fn resume_after_load(&self, extra: Option<ConfigMap>) {
        let (globals, runtime_path) = {
            let inner = self.inner.borrow();
            (
                inner.env.globals.clone(),
                inner.env.options.runtime_path.clone(),
            )
        };
        match globals.resolve(&runtime_path) {
            Some(GlobalValue::Runtime(runtime)) => self.construct_widget(runtime, extra),
            _ => tracing::warn!("editor runtime absent after script load"),
        }
    }

    fn construct_widget(&self, runtime: Rc<dyn EditorRuntime>, extra: Option<ConfigMap>) {
        let Some(doc_rc) = self.document() else {
            return;
        };
        let (target, config, setup) = {
            let doc = doc_rc.borrow();
            let inner = self.inner.borrow();
            let Some(attrs) = doc
                .tree
                .get(inner.element)
                .and_then(|n| n.as_element())
                .map(|e| &e.attributes)
            else {
                return;
            };

            let reflected = Reflected::from_attributes(attrs);
            let builder = ConfigBuilder::new(&inner.env.globals)
                .with_renames(inner.env.options.config_renames.clone())
                .with_advanced(inner.env.options.advanced_config);
            let mut config = builder.build(attrs, &reflected);

            // Attribute-derived keys win over the explicit-call extras.
            if let Some(extra) = extra {
                for (key, value) in extra {
                    config.entry(key).or_insert(value);
                }
            }

            let setup = match config.remove("setup") {
                Some(ConfigValue::Func(setup)) => Some(setup),
                _ => None,
            };
            (inner.target, config, setup)
        };

        let weak = Rc::downgrade(&self.inner);
        let on_ready = Box::new(move |handle: EditorHandle| {
            if let Some(inner) = weak.upgrade() {
                EditorElement { inner }.finish_init(handle);
            }
        });

        tracing::debug!("constructing editor widget");
        runtime.init(EditorInit {
            target,
            config,
            setup,
            on_ready,
        });
    }

    /// Runtime readiness callback: advance to Ready, then deliver queued
    /// event bindings before the widget's own `init` event fires
    fn finish_init(&self, handle: EditorHandle) {
        let mut inner = self.inner.borrow_mut();
        if let Err(err) = inner.status.finish_init() {
            tracing::warn!("ignoring ready signal: {}", err);
            return;
        }
        inner.widget = Some(handle.clone());
        inner.binder.flush(&handle);
        tracing::info!("editor widget ready");
    }

    fn apply_readonly(&self, readonly: bool) {
        if let Some(widget) = self.widget() {
            widget.set_mode(if readonly {
                EditorMode::Readonly
            } else {
                EditorMode::Design
            });
        }
    }

    fn apply_disabled(&self, disabled: bool) {
        let (widget, min) = {
            let inner = self.inner.borrow();
            (
                inner.widget.clone(),
                inner.env.options.disabled_capability_min.clone(),
            )
        };
        let Some(widget) = widget else {
            return;
        };
        if widget.version() >= min {
            widget.set_disabled(disabled);
        } else {
            // Engines without the disabled flag fall back to read-only mode.
            widget.set_mode(if disabled {
                EditorMode::Readonly
            } else {
                EditorMode::Design
            });
        }
    }

    fn apply_placeholder(&self, placeholder: Option<&str>) {
        if let Some(widget) = self.widget() {
            let value = match placeholder {
                Some(text) => ConfigValue::Str(text.to_string()),
                None => ConfigValue::Null,
            };
            widget.set_option("placeholder", &value);
        }
    }
}

impl ElementLifecycle for EditorElement {
    fn connected(&self) {
        let Some(doc_rc) = self.document() else {
            return;
        };
        {
            let mut doc = doc_rc.borrow_mut();
            let mut inner = self.inner.borrow_mut();
            inner.attached = true;
            let element = inner.element;
            inner.form.rebind(&mut doc, element);
        }

        let suppressed = {
            let doc = doc_rc.borrow();
            let element = self.inner.borrow().element;
            doc.tree.attribute(element, "init") == Some("false")
        };
        if suppressed {
            tracing::debug!("initialization suppressed by attribute");
            return;
        }

        if self.inner.borrow().status.is_raw() {
            if let Err(err) = self.init(None) {
                tracing::warn!("attach-time initialization refused: {}", err);
            }
        }
    }

    fn disconnected(&self) {
        let Some(doc_rc) = self.document() else {
            return;
        };
        let mut doc = doc_rc.borrow_mut();
        let mut inner = self.inner.borrow_mut();
        inner.attached = false;
        inner.form.unbind(&mut doc);
    }

    fn attribute_changed(&self, change: &AttributeChange) {
        if events::is_event_attribute(&change.name) {
            let (globals, widget) = {
                let inner = self.inner.borrow();
                (inner.env.globals.clone(), inner.widget.clone())
            };
            self.inner.borrow_mut().binder.apply(
                &change.name,
                change.new_value.as_deref(),
                &globals,
                widget.as_ref(),
            );
            return;
        }

        match change.name.as_str() {
            "form" => {
                let Some(doc_rc) = self.document() else {
                    return;
                };
                let mut doc = doc_rc.borrow_mut();
                let mut inner = self.inner.borrow_mut();
                if inner.attached {
                    let element = inner.element;
                    inner.form.rebind(&mut doc, element);
                }
            }
            "readonly" => self.apply_readonly(change.new_value.is_some()),
            "disabled" => self.apply_disabled(change.new_value.is_some()),
            "placeholder" => self.apply_placeholder(change.new_value.as_deref()),
            _ => {}
        }
    }
}

/// Attributes the element observes
pub fn observed_attributes() -> ObservedAttributes {
    let mut exact: Vec<String> = [
        "form",
        "name",
        "readonly",
        "disabled",
        "autofocus",
        "placeholder",
        "src",
        "channel",
        "api-key",
        "config",
        "init",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    exact.extend(config::table_attributes().into_iter().map(String::from));

    ObservedAttributes::new(
        exact,
        vec![
            events::EVENT_PREFIX.to_string(),
            config::ADVANCED_PREFIX.to_string(),
        ],
    )
}

/// Registry definition for the element
pub fn definition() -> ElementDefinition {
    ElementDefinition::new(TAG, observed_attributes()).form_associated()
}
