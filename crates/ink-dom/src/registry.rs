//! Element Registry
//!
//! Custom element definitions and name validation.

use std::collections::HashMap;

use crate::ObservedAttributes;

/// Custom element definition
#[derive(Debug, Clone)]
pub struct ElementDefinition {
    pub name: String,
    pub observed_attributes: ObservedAttributes,
    pub form_associated: bool,
}

impl ElementDefinition {
    pub fn new(name: &str, observed_attributes: ObservedAttributes) -> Self {
        Self {
            name: name.to_string(),
            observed_attributes,
            form_associated: false,
        }
    }

    pub fn form_associated(mut self) -> Self {
        self.form_associated = true;
        self
    }
}

/// Registry error
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid custom element name: {0}")]
    InvalidName(String),

    #[error("Element already defined: {0}")]
    AlreadyDefined(String),
}

/// Custom element registry
#[derive(Debug, Default)]
pub struct ElementRegistry {
    definitions: HashMap<String, ElementDefinition>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a custom element
    pub fn define(&mut self, definition: ElementDefinition) -> Result<(), RegistryError> {
        Self::validate_name(&definition.name)?;
        if self.definitions.contains_key(&definition.name) {
            return Err(RegistryError::AlreadyDefined(definition.name.clone()));
        }
        tracing::debug!("defining custom element <{}>", definition.name);
        self.definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Get a definition by element name
    pub fn get(&self, name: &str) -> Option<&ElementDefinition> {
        self.definitions.get(name)
    }

    /// Check if an element name is defined
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    fn validate_name(name: &str) -> Result<(), RegistryError> {
        if !name.contains('-') {
            return Err(RegistryError::InvalidName(format!(
                "'{}' must contain a hyphen",
                name
            )));
        }
        if !name
            .chars()
            .next()
            .map(|c| c.is_ascii_lowercase())
            .unwrap_or(false)
        {
            return Err(RegistryError::InvalidName(format!(
                "'{}' must start with a lowercase letter",
                name
            )));
        }

        let reserved = [
            "annotation-xml",
            "color-profile",
            "font-face",
            "font-face-src",
            "font-face-uri",
            "font-face-format",
            "font-face-name",
            "missing-glyph",
        ];
        if reserved.contains(&name) {
            return Err(RegistryError::InvalidName(format!(
                "'{}' is a reserved element name",
                name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_lookup() {
        let mut registry = ElementRegistry::new();
        let def = ElementDefinition::new("ink-editor", ObservedAttributes::default())
            .form_associated();

        registry.define(def).unwrap();
        assert!(registry.is_defined("ink-editor"));
        assert!(registry.get("ink-editor").map(|d| d.form_associated).unwrap());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = ElementRegistry::new();
        let def = ElementDefinition::new("ink-editor", ObservedAttributes::default());
        registry.define(def.clone()).unwrap();

        assert!(matches!(
            registry.define(def),
            Err(RegistryError::AlreadyDefined(_))
        ));
    }

    #[test]
    fn test_invalid_names() {
        let mut registry = ElementRegistry::new();
        for bad in ["editor", "Ink-editor", "font-face"] {
            let def = ElementDefinition::new(bad, ObservedAttributes::default());
            assert!(matches!(
                registry.define(def),
                Err(RegistryError::InvalidName(_))
            ));
        }
    }
}
