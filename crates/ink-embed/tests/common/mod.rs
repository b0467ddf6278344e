//! Test doubles for the external collaborators: the script loader, the
//! editing runtime, and the widget it constructs.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use ink_dom::{Document, ElementRegistry, NodeId};
use ink_embed::{
    ConfigMap, ConfigValue, Editor, EditorElement, EditorEvent, EditorHandle, EditorInit,
    EditorMode, EditorRuntime, EmbedEnv, EmbedOptions, GlobalRegistry, Handler, HostBinding,
    ScriptLoader, TAG, definition,
};

/// Scripted widget handle
pub struct FakeEditor {
    self_ref: Weak<FakeEditor>,
    version: semver::Version,
    content: RefCell<String>,
    mode: Cell<EditorMode>,
    disabled: Cell<bool>,
    options: RefCell<HashMap<String, ConfigValue>>,
    subscriptions: RefCell<Vec<(String, Handler)>>,
    destroyed: Cell<bool>,
    /// Configuration the runtime constructed this widget with
    pub config: ConfigMap,
}

impl FakeEditor {
    pub fn new(version: semver::Version, config: ConfigMap) -> Rc<Self> {
        Rc::new_cyclic(|weak| Self {
            self_ref: weak.clone(),
            version,
            content: RefCell::new(String::new()),
            mode: Cell::new(EditorMode::Design),
            disabled: Cell::new(false),
            options: RefCell::new(HashMap::new()),
            subscriptions: RefCell::new(Vec::new()),
            destroyed: Cell::new(false),
            config,
        })
    }

    /// Fire an event to the handlers subscribed right now
    pub fn emit(&self, name: &str) {
        let Some(handle) = self.self_ref.upgrade() else {
            return;
        };
        let handle: EditorHandle = handle;
        let handlers: Vec<Handler> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|(event, _)| event == name)
            .map(|(_, handler)| handler.clone())
            .collect();
        let event = EditorEvent::new(name, handle);
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn subscription_count(&self, event: &str) -> usize {
        self.subscriptions
            .borrow()
            .iter()
            .filter(|(name, _)| name == event)
            .count()
    }

    pub fn was_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub fn option(&self, key: &str) -> Option<ConfigValue> {
        self.options.borrow().get(key).cloned()
    }
}

impl Editor for FakeEditor {
    fn on(&self, event: &str, handler: Handler) {
        self.subscriptions
            .borrow_mut()
            .push((event.to_string(), handler));
    }

    fn off(&self, event: &str, handler: &Handler) {
        self.subscriptions
            .borrow_mut()
            .retain(|(name, bound)| !(name == event && Rc::ptr_eq(bound, handler)));
    }

    fn get_content(&self) -> String {
        self.content.borrow().clone()
    }

    fn set_content(&self, content: &str) {
        *self.content.borrow_mut() = content.to_string();
    }

    fn mode(&self) -> EditorMode {
        self.mode.get()
    }

    fn set_mode(&self, mode: EditorMode) {
        self.mode.set(mode);
    }

    fn disabled(&self) -> bool {
        self.disabled.get()
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    fn set_option(&self, key: &str, value: &ConfigValue) {
        self.options
            .borrow_mut()
            .insert(key.to_string(), value.clone());
    }

    fn version(&self) -> semver::Version {
        self.version.clone()
    }

    fn destroy(&self) {
        self.destroyed.set(true);
    }
}

/// Scripted runtime: init requests queue until the test drives completion
pub struct FakeRuntime {
    version: semver::Version,
    pending: RefCell<Vec<EditorInit>>,
    pub editors: RefCell<Vec<Rc<FakeEditor>>>,
}

impl FakeRuntime {
    pub fn new(version: semver::Version) -> Self {
        Self {
            version,
            pending: RefCell::new(Vec::new()),
            editors: RefCell::new(Vec::new()),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Drive one queued construction through the full ready sequence:
    /// setup, readiness signal, then the widget's `init` event.
    pub fn complete_next(&self) -> Option<Rc<FakeEditor>> {
        let init = {
            let mut pending = self.pending.borrow_mut();
            if pending.is_empty() {
                return None;
            }
            pending.remove(0)
        };
        let editor = FakeEditor::new(self.version.clone(), init.config);
        let handle: EditorHandle = editor.clone();
        if let Some(setup) = &init.setup {
            setup(&EditorEvent::new("setup", handle.clone()));
        }
        (init.on_ready)(handle);
        editor.emit("init");
        self.editors.borrow_mut().push(editor.clone());
        Some(editor)
    }
}

impl EditorRuntime for FakeRuntime {
    fn version(&self) -> semver::Version {
        self.version.clone()
    }

    fn init(&self, init: EditorInit) {
        self.pending.borrow_mut().push(init);
    }
}

/// Scripted loader: records requests, completes on demand
#[derive(Default)]
pub struct FakeLoader {
    requests: RefCell<Vec<String>>,
    pending: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Invoke the oldest pending completion callback
    pub fn complete_next(&self) -> bool {
        let callback = {
            let mut pending = self.pending.borrow_mut();
            if pending.is_empty() {
                return false;
            }
            pending.remove(0)
        };
        callback();
        true
    }
}

impl ScriptLoader for FakeLoader {
    fn load(&self, url: &str, on_load: Box<dyn FnOnce()>) {
        self.requests.borrow_mut().push(url.to_string());
        self.pending.borrow_mut().push(on_load);
    }
}

/// Everything a controller test needs, wired together
pub struct Fixture {
    pub document: Rc<RefCell<Document>>,
    pub globals: Rc<GlobalRegistry>,
    pub loader: Rc<FakeLoader>,
    pub runtime: Rc<FakeRuntime>,
    pub registry: ElementRegistry,
}

impl Fixture {
    /// Fixture with no runtime registered (the loader gate engages)
    pub fn new() -> Self {
        Self::with_runtime_version(semver::Version::new(7, 0, 0), false)
    }

    /// Fixture with the runtime already present in the namespace
    pub fn with_runtime() -> Self {
        Self::with_runtime_version(semver::Version::new(7, 0, 0), true)
    }

    pub fn with_runtime_version(version: semver::Version, registered: bool) -> Self {
        let mut registry = ElementRegistry::new();
        registry.define(definition()).unwrap();
        let fixture = Self {
            document: Rc::new(RefCell::new(Document::new())),
            globals: Rc::new(GlobalRegistry::new()),
            loader: Rc::new(FakeLoader::new()),
            runtime: Rc::new(FakeRuntime::new(version)),
            registry,
        };
        if registered {
            fixture.register_runtime();
        }
        fixture
    }

    /// Register the runtime under the default namespace path
    pub fn register_runtime(&self) {
        self.globals.register_runtime("ink", self.runtime.clone());
    }

    pub fn env(&self) -> EmbedEnv {
        self.env_with(EmbedOptions::default())
    }

    pub fn env_with(&self, options: EmbedOptions) -> EmbedEnv {
        EmbedEnv {
            globals: self.globals.clone(),
            loader: self.loader.clone(),
            options,
        }
    }

    pub fn root(&self) -> NodeId {
        self.document.borrow().tree.root()
    }

    pub fn create_element(&self) -> NodeId {
        self.document.borrow_mut().tree.create_element(TAG)
    }

    /// Build a controller plus its host binding for an element
    pub fn bind(&self, element: NodeId) -> HostBinding<EditorElement> {
        self.bind_with(element, EmbedOptions::default())
    }

    pub fn bind_with(
        &self,
        element: NodeId,
        options: EmbedOptions,
    ) -> HostBinding<EditorElement> {
        let definition = self.registry.get(TAG).expect("element is defined");
        let controller = EditorElement::new(&self.document, element, self.env_with(options));
        HostBinding::new(self.document.clone(), element, definition, controller)
    }
}
