//! Flat catalog of the settings the picker can edit

use super::types::{PropertySchema, SchemaNode};
use indexmap::IndexMap;

/// Mapping from setting name to its schema, in registration order
///
/// Only string, number and boolean settings are registered. Updating with a
/// new document overwrites entries it mentions and leaves the rest alone.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    settings: IndexMap<String, PropertySchema>,
}

impl SchemaCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every primitive-typed property of the document
    ///
    /// Properties of a node are registered before its `allOf` children, and
    /// children in array order, so the last declaration of a name wins. Names
    /// missing from the new document are kept.
    pub fn update(&mut self, document: &SchemaNode) {
        let before = self.settings.len();
        document.walk(&mut |name, property| {
            if property.ty.is_primitive() {
                self.register(name, property.clone());
            }
        });
        log::debug!(
            "Catalog updated: {} settings ({} new)",
            self.settings.len(),
            self.settings.len() - before
        );
    }

    fn register(&mut self, name: &str, property: PropertySchema) {
        if self.settings.insert(name.to_string(), property).is_some() {
            log::debug!("Overwrote setting schema: {}", name);
        }
    }

    /// Get setting schema by name
    pub fn get(&self, name: &str) -> Option<&PropertySchema> {
        self.settings.get(name)
    }

    /// Check if a setting is catalogued
    pub fn contains(&self, name: &str) -> bool {
        self.settings.contains_key(name)
    }

    /// All entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &PropertySchema)> {
        self.settings.iter().map(|(name, property)| (name.as_str(), property))
    }

    /// Get total number of catalogued settings
    pub fn count(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}
