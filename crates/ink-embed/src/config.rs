//! Configuration Builder
//!
//! Assembles the configuration mapping handed to the editing runtime at
//! initialization time: bulk `config` attribute first, then the per-attribute
//! decoder table, then the advanced `config-*` escape hatch, then the
//! reflected form-control properties. Pure and side-effect free; rebuilt
//! fresh every time initialization runs.

use std::collections::HashMap;
use std::rc::Rc;

use ink_dom::AttributeMap;

use crate::codec::Decoder;
use crate::globals::{GlobalRegistry, GlobalValue};
use crate::widget::Handler;

/// A typed configuration value
#[derive(Clone)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ConfigValue>),
    Map(HashMap<String, ConfigValue>),
    Func(Handler),
}

/// Configuration mapping passed to the runtime
pub type ConfigMap = HashMap<String, ConfigValue>;

impl ConfigValue {
    /// Convert a resolved global into a configuration value
    ///
    /// The runtime object itself has no configuration form and converts to
    /// nothing.
    pub fn from_global(value: GlobalValue) -> Option<ConfigValue> {
        match value {
            GlobalValue::Json(json) => Some(json.into()),
            GlobalValue::Handler(handler) => Some(ConfigValue::Func(handler)),
            GlobalValue::Namespace(map) => Some(ConfigValue::Map(
                map.into_iter()
                    .filter_map(|(k, v)| ConfigValue::from_global(v).map(|v| (k, v)))
                    .collect(),
            )),
            GlobalValue::Runtime(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Func(a), Self::Func(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => write!(f, "{:?}", b),
            Self::Int(i) => write!(f, "{:?}", i),
            Self::Float(x) => write!(f, "{:?}", x),
            Self::Str(s) => write!(f, "{:?}", s),
            Self::List(items) => write!(f, "{:?}", items),
            Self::Map(map) => write!(f, "{:?}", map),
            Self::Func(_) => f.write_str("<function>"),
        }
    }
}

/// Decoder registered for an attribute name, if any
///
/// The attribute name doubles as the configuration key; divergent external
/// keys go through the builder's rename table.
pub fn decoder_for(attribute: &str) -> Option<Decoder> {
    let decoder = match attribute {
        "plugins" | "toolbar_mode" | "content_css" | "content_style" | "skin" | "skin_url"
        | "icons" | "icons_url" | "language" | "language_url" | "images_upload_url"
        | "images_upload_base_path" => Decoder::Identity,
        "toolbar" | "menubar" | "contextmenu" | "statusbar" => Decoder::FalseOrString,
        "resize" | "images_upload_credentials" | "images_reuse_filename" => {
            Decoder::BooleanOrString
        }
        "width" | "height" => Decoder::NumberOrString,
        "setup" | "images_upload_handler" => Decoder::GlobalSymbol,
        _ => return None,
    };
    Some(decoder)
}

/// Attribute names carrying per-key configuration (the decoder table)
pub fn table_attributes() -> Vec<&'static str> {
    vec![
        "plugins",
        "toolbar_mode",
        "content_css",
        "content_style",
        "skin",
        "skin_url",
        "icons",
        "icons_url",
        "language",
        "language_url",
        "images_upload_url",
        "images_upload_base_path",
        "toolbar",
        "menubar",
        "contextmenu",
        "statusbar",
        "resize",
        "images_upload_credentials",
        "images_reuse_filename",
        "width",
        "height",
        "setup",
        "images_upload_handler",
    ]
}

/// Prefix of the advanced per-key escape hatch
pub const ADVANCED_PREFIX: &str = "config-";

/// Reflected form-control state folded into the configuration
#[derive(Debug, Clone, Default)]
pub struct Reflected {
    pub readonly: bool,
    pub disabled: bool,
    pub autofocus: bool,
    pub placeholder: Option<String>,
}

impl Reflected {
    /// Read the reflected state off an attribute collection
    pub fn from_attributes(attrs: &AttributeMap) -> Self {
        Self {
            readonly: attrs.has("readonly"),
            disabled: attrs.has("disabled"),
            autofocus: attrs.has("autofocus"),
            placeholder: attrs.get("placeholder").map(str::to_string),
        }
    }
}

/// Builds the merged configuration for one initialization
pub struct ConfigBuilder<'a> {
    globals: &'a GlobalRegistry,
    renames: HashMap<String, String>,
    advanced: bool,
}

impl<'a> ConfigBuilder<'a> {
    pub fn new(globals: &'a GlobalRegistry) -> Self {
        Self {
            globals,
            renames: HashMap::new(),
            advanced: false,
        }
    }

    /// Extension point for attributes whose external key differs from the
    /// attribute name. Empty by default.
    pub fn with_renames(mut self, renames: HashMap<String, String>) -> Self {
        self.renames = renames;
        self
    }

    /// Honor `config-<key>` attributes (off by default)
    pub fn with_advanced(mut self, advanced: bool) -> Self {
        self.advanced = advanced;
        self
    }

    /// Decode the bulk `config` attribute: JSON first, symbol path second,
    /// empty mapping last.
    fn bulk_config(&self, raw: Option<&str>) -> ConfigMap {
        let Some(raw) = raw else {
            return ConfigMap::new();
        };
        let decoded = serde_json::from_str::<serde_json::Value>(raw)
            .ok()
            .map(ConfigValue::from)
            .or_else(|| self.globals.resolve(raw).and_then(ConfigValue::from_global));
        match decoded {
            Some(ConfigValue::Map(map)) => map,
            _ => ConfigMap::new(),
        }
    }

    /// Assemble the full configuration mapping
    pub fn build(&self, attrs: &AttributeMap, reflected: &Reflected) -> ConfigMap {
        let mut config = self.bulk_config(attrs.get("config"));

        for (name, value) in attrs.iter() {
            if let Some(decoder) = decoder_for(name) {
                if let Some(decoded) = decoder.decode(value, self.globals) {
                    let key = self.renames.get(name).cloned().unwrap_or_else(|| name.to_string());
                    config.insert(key, decoded);
                }
            } else if self.advanced {
                if let Some(key) = name.strip_prefix(ADVANCED_PREFIX) {
                    config.insert(key.to_string(), ConfigValue::Str(value.to_string()));
                }
            }
        }

        if reflected.readonly {
            config.insert("readonly".to_string(), ConfigValue::Bool(true));
        }
        if reflected.disabled {
            config.insert("disabled".to_string(), ConfigValue::Bool(true));
        }
        if reflected.autofocus {
            config.insert("auto_focus".to_string(), ConfigValue::Bool(true));
        }
        if let Some(placeholder) = &reflected.placeholder {
            config.insert(
                "placeholder".to_string(),
                ConfigValue::Str(placeholder.clone()),
            );
        }

        // The controller owns the mount point; caller-supplied targets are
        // discarded unconditionally.
        config.remove("target");
        config.remove("selector");

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
        let mut map = AttributeMap::new();
        for (name, value) in pairs {
            map.set(name, value);
        }
        map
    }

    #[test]
    fn test_unregistered_attributes_omitted() {
        let globals = GlobalRegistry::new();
        let builder = ConfigBuilder::new(&globals);
        let config = builder.build(
            &attrs(&[("class", "wide"), ("data-test", "1"), ("height", "500")]),
            &Reflected::default(),
        );

        assert_eq!(config.get("height"), Some(&ConfigValue::Int(500)));
        assert!(!config.contains_key("class"));
        assert!(!config.contains_key("data-test"));
    }

    #[test]
    fn test_table_decoding() {
        let globals = GlobalRegistry::new();
        let builder = ConfigBuilder::new(&globals);
        let config = builder.build(
            &attrs(&[
                ("toolbar", "false"),
                ("menubar", "file edit"),
                ("width", "42px"),
                ("resize", "true"),
            ]),
            &Reflected::default(),
        );

        assert_eq!(config.get("toolbar"), Some(&ConfigValue::Bool(false)));
        assert_eq!(
            config.get("menubar"),
            Some(&ConfigValue::Str("file edit".to_string()))
        );
        assert_eq!(
            config.get("width"),
            Some(&ConfigValue::Str("42px".to_string()))
        );
        assert_eq!(config.get("resize"), Some(&ConfigValue::Bool(true)));
    }

    #[test]
    fn test_bulk_config_json() {
        let globals = GlobalRegistry::new();
        let builder = ConfigBuilder::new(&globals);
        let config = builder.build(
            &attrs(&[("config", r#"{"menubar": false, "height": 300}"#)]),
            &Reflected::default(),
        );

        assert_eq!(config.get("menubar"), Some(&ConfigValue::Bool(false)));
        assert_eq!(config.get("height"), Some(&ConfigValue::Int(300)));
    }

    #[test]
    fn test_bulk_config_symbol_fallback() {
        let globals = GlobalRegistry::new();
        globals.register(
            "app.editor_config",
            GlobalValue::Json(serde_json::json!({"skin": "oxide-dark"})),
        );
        let builder = ConfigBuilder::new(&globals);
        let config = builder.build(
            &attrs(&[("config", "app.editor_config")]),
            &Reflected::default(),
        );

        assert_eq!(
            config.get("skin"),
            Some(&ConfigValue::Str("oxide-dark".to_string()))
        );
    }

    #[test]
    fn test_bulk_config_unresolvable_is_empty() {
        let globals = GlobalRegistry::new();
        let builder = ConfigBuilder::new(&globals);
        let config = builder.build(&attrs(&[("config", "no.such.path")]), &Reflected::default());
        assert!(config.is_empty());
    }

    #[test]
    fn test_attribute_overrides_bulk_config() {
        let globals = GlobalRegistry::new();
        let builder = ConfigBuilder::new(&globals);
        let config = builder.build(
            &attrs(&[("config", r#"{"height": 300}"#), ("height", "500")]),
            &Reflected::default(),
        );
        assert_eq!(config.get("height"), Some(&ConfigValue::Int(500)));
    }

    #[test]
    fn test_advanced_attributes_gated() {
        let globals = GlobalRegistry::new();
        let pairs = attrs(&[("config-custom_option", "7")]);

        let off = ConfigBuilder::new(&globals).build(&pairs, &Reflected::default());
        assert!(!off.contains_key("custom_option"));

        let on = ConfigBuilder::new(&globals)
            .with_advanced(true)
            .build(&pairs, &Reflected::default());
        assert_eq!(
            on.get("custom_option"),
            Some(&ConfigValue::Str("7".to_string()))
        );
    }

    #[test]
    fn test_reflected_properties_forced() {
        let globals = GlobalRegistry::new();
        let builder = ConfigBuilder::new(&globals);
        let reflected = Reflected {
            readonly: true,
            disabled: false,
            autofocus: true,
            placeholder: Some("Write here".to_string()),
        };
        let config = builder.build(&attrs(&[]), &reflected);

        assert_eq!(config.get("readonly"), Some(&ConfigValue::Bool(true)));
        assert_eq!(config.get("auto_focus"), Some(&ConfigValue::Bool(true)));
        assert!(!config.contains_key("disabled"));
        assert_eq!(
            config.get("placeholder"),
            Some(&ConfigValue::Str("Write here".to_string()))
        );
    }

    #[test]
    fn test_target_and_selector_stripped() {
        let globals = GlobalRegistry::new();
        let builder = ConfigBuilder::new(&globals);
        let config = builder.build(
            &attrs(&[("config", r##"{"target": "#other", "selector": "div", "skin": "oxide"}"##)]),
            &Reflected::default(),
        );

        assert!(!config.contains_key("target"));
        assert!(!config.contains_key("selector"));
        assert_eq!(config.get("skin"), Some(&ConfigValue::Str("oxide".to_string())));
    }

    #[test]
    fn test_rename_table() {
        let globals = GlobalRegistry::new();
        let mut renames = HashMap::new();
        renames.insert("skin".to_string(), "theme_skin".to_string());
        let builder = ConfigBuilder::new(&globals).with_renames(renames);
        let config = builder.build(&attrs(&[("skin", "oxide")]), &Reflected::default());

        assert!(!config.contains_key("skin"));
        assert_eq!(
            config.get("theme_skin"),
            Some(&ConfigValue::Str("oxide".to_string()))
        );
    }
}
