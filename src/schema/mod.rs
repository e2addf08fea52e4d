//! Settings schema: document model, flat catalog and document sources
//!
//! A schema document is a JSON-Schema-like object whose `properties` map
//! setting names to their declared type, and whose `allOf` composes further
//! documents. The catalog flattens it into the settings the picker can edit.

pub mod catalog;
pub mod source;
pub mod types;

pub use catalog::SchemaCatalog;
pub use source::{
    FileSchemaSource, SchemaChange, SchemaChanges, SchemaNotifier, SchemaSource, change_channel,
};
pub use types::{PropertySchema, SchemaNode, SettingType};
