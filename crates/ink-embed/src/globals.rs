//! Global Symbol Resolver
//!
//! A process-wide namespace of dotted-path symbols: event handlers, setup
//! hooks, bulk configuration objects, and the editing runtime itself. The
//! host populates it (including asynchronously, when a script load finishes);
//! the controller only ever reads.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::widget::{EditorEvent, EditorRuntime, Handler};

/// A value registered in the namespace
#[derive(Clone)]
pub enum GlobalValue {
    /// Intermediate namespace segment
    Namespace(HashMap<String, GlobalValue>),
    /// A callable handler
    Handler(Handler),
    /// The editing runtime
    Runtime(Rc<dyn EditorRuntime>),
    /// Plain data
    Json(serde_json::Value),
}

impl std::fmt::Debug for GlobalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Namespace(map) => f.debug_set().entries(map.keys()).finish(),
            Self::Handler(_) => f.write_str("<handler>"),
            Self::Runtime(_) => f.write_str("<runtime>"),
            Self::Json(value) => write!(f, "{:?}", value),
        }
    }
}

/// The shared namespace
///
/// Interior-mutable so the host can register symbols at any point in the
/// process lifetime; resolution never mutates.
#[derive(Default)]
pub struct GlobalRegistry {
    root: RefCell<HashMap<String, GlobalValue>>,
}

impl GlobalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value at a dotted path, creating namespaces as needed
    ///
    /// A non-namespace value sitting on an intermediate segment is replaced.
    pub fn register(&self, path: &str, value: GlobalValue) {
        let segments: Vec<&str> = path.split('.').collect();
        let mut root = self.root.borrow_mut();
        Self::insert_path(&mut root, &segments, value);
    }

    fn insert_path(map: &mut HashMap<String, GlobalValue>, segments: &[&str], value: GlobalValue) {
        let Some((head, rest)) = segments.split_first() else {
            return;
        };
        if rest.is_empty() {
            map.insert((*head).to_string(), value);
            return;
        }
        let entry = map
            .entry((*head).to_string())
            .or_insert_with(|| GlobalValue::Namespace(HashMap::new()));
        if !matches!(entry, GlobalValue::Namespace(_)) {
            *entry = GlobalValue::Namespace(HashMap::new());
        }
        if let GlobalValue::Namespace(next) = entry {
            Self::insert_path(next, rest, value);
        }
    }

    /// Register a handler function at a dotted path
    pub fn register_handler(&self, path: &str, handler: impl Fn(&EditorEvent) + 'static) {
        self.register(path, GlobalValue::Handler(Rc::new(handler)));
    }

    /// Register the editing runtime at a dotted path
    pub fn register_runtime(&self, path: &str, runtime: Rc<dyn EditorRuntime>) {
        self.register(path, GlobalValue::Runtime(runtime));
    }

    /// Resolve a dotted path, short-circuiting to None on any missing segment
    pub fn resolve(&self, path: &str) -> Option<GlobalValue> {
        let root = self.root.borrow();
        let mut segments = path.split('.');
        let first = segments.next().filter(|s| !s.is_empty())?;
        let mut current = root.get(first)?;
        for segment in segments {
            if segment.is_empty() {
                return None;
            }
            current = match current {
                GlobalValue::Namespace(map) => map.get(segment)?,
                _ => return None,
            };
        }
        Some(current.clone())
    }

    /// Check whether a path resolves
    pub fn has(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }
}
