//! Core types for the settings schema document

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Declared type of a setting, as far as the picker cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingType {
    String,
    Number,
    Boolean,
    /// Anything else: objects, arrays, `integer`, union types, missing `type`
    #[default]
    Other,
}

impl SettingType {
    /// Map a raw JSON `type` member onto the closed set of types
    pub fn from_json(raw: Option<&Value>) -> Self {
        match raw.and_then(Value::as_str) {
            Some("string") => SettingType::String,
            Some("number") => SettingType::Number,
            Some("boolean") => SettingType::Boolean,
            _ => SettingType::Other,
        }
    }

    /// Whether settings of this type are catalogued for the picker
    pub fn is_primitive(&self) -> bool {
        !matches!(self, SettingType::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingType::String => "string",
            SettingType::Number => "number",
            SettingType::Boolean => "boolean",
            SettingType::Other => "other",
        }
    }
}

/// Schema of a single setting
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertySchema {
    pub ty: SettingType,
    pub description: Option<String>,
    /// Allowed values; only takes effect when non-empty
    pub enum_values: Vec<String>,
    /// Default value declared by the schema
    pub default: Option<Value>,
}

impl PropertySchema {
    pub fn new(ty: SettingType) -> Self {
        Self {
            ty,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Description text, empty when the schema has none
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Enum values if the setting is constrained to a non-empty list
    pub fn choices(&self) -> Option<&[String]> {
        if self.enum_values.is_empty() {
            None
        } else {
            Some(&self.enum_values)
        }
    }

    fn from_json(raw: &Value) -> Self {
        let Some(object) = raw.as_object() else {
            return Self::default();
        };

        let enum_values = object
            .get("enum")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            ty: SettingType::from_json(object.get("type")),
            description: object
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            enum_values,
            default: object.get("default").cloned(),
        }
    }
}

/// A (possibly composed) schema document
///
/// Built leniently from any JSON value: shapes that don't match simply
/// contribute nothing.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub struct SchemaNode {
    /// Settings declared directly on this node, in document order
    pub properties: IndexMap<String, PropertySchema>,
    /// Composed child nodes, visited after `properties`
    pub all_of: Vec<SchemaNode>,
}

impl SchemaNode {
    /// Parse a schema document from JSON text
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from(value))
    }

    /// Visit this node and every descendant, properties before children
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a str, &'a PropertySchema)) {
        for (name, property) in &self.properties {
            visit(name, property);
        }
        for child in &self.all_of {
            child.walk(visit);
        }
    }

    /// Default value of every property in the document, later nodes winning
    pub fn defaults(&self) -> IndexMap<String, Value> {
        let mut defaults = IndexMap::new();
        self.walk(&mut |name, property| {
            if let Some(default) = &property.default {
                defaults.insert(name.to_string(), default.clone());
            }
        });
        defaults
    }
}

impl From<&Value> for SchemaNode {
    fn from(raw: &Value) -> Self {
        let Some(object) = raw.as_object() else {
            return Self::default();
        };

        let properties = object
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, prop)| (name.clone(), PropertySchema::from_json(prop)))
                    .collect()
            })
            .unwrap_or_default();

        let all_of = object
            .get("allOf")
            .and_then(Value::as_array)
            .map(|nodes| nodes.iter().map(SchemaNode::from).collect())
            .unwrap_or_default();

        Self { properties, all_of }
    }
}

impl From<Value> for SchemaNode {
    fn from(raw: Value) -> Self {
        Self::from(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_mapping() {
        assert_eq!(SettingType::from_json(Some(&json!("string"))), SettingType::String);
        assert_eq!(SettingType::from_json(Some(&json!("number"))), SettingType::Number);
        assert_eq!(SettingType::from_json(Some(&json!("boolean"))), SettingType::Boolean);
        assert_eq!(SettingType::from_json(Some(&json!("integer"))), SettingType::Other);
        assert_eq!(SettingType::from_json(Some(&json!(["string", "null"]))), SettingType::Other);
        assert_eq!(SettingType::from_json(None), SettingType::Other);
    }

    #[test]
    fn test_property_fields() {
        let node = SchemaNode::from(json!({
            "properties": {
                "editor.mode": {
                    "type": "string",
                    "description": "Editing mode",
                    "enum": ["insert", 3, "normal"],
                    "default": "normal"
                }
            }
        }));

        let property = &node.properties["editor.mode"];
        assert_eq!(property.ty, SettingType::String);
        assert_eq!(property.description(), "Editing mode");
        assert_eq!(property.enum_values, vec!["insert", "normal"]);
        assert_eq!(property.default, Some(json!("normal")));
    }

    #[test]
    fn test_malformed_shapes_are_tolerated() {
        let node = SchemaNode::from(json!({
            "properties": {
                "a": "not an object",
                "b": { "type": "boolean", "description": 42 }
            },
            "allOf": [17, { "properties": [] }]
        }));

        assert_eq!(node.properties["a"].ty, SettingType::Other);
        assert_eq!(node.properties["b"].description, None);
        assert_eq!(node.all_of.len(), 2);
        assert!(node.all_of[0].properties.is_empty());
        assert!(node.all_of[1].properties.is_empty());

        assert_eq!(SchemaNode::from(json!([1, 2])), SchemaNode::default());
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let node: SchemaNode = serde_json::from_str(
            r#"{"properties": {"z": {"type": "string"}, "a": {"type": "string"}, "m": {"type": "number"}}}"#,
        )
        .unwrap();

        let names: Vec<&str> = node.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_defaults_later_nodes_win() {
        let node = SchemaNode::from(json!({
            "properties": {
                "x": { "type": "boolean", "default": false },
                "obj": { "type": "object", "default": {} }
            },
            "allOf": [
                { "properties": { "x": { "type": "boolean", "default": true } } }
            ]
        }));

        let defaults = node.defaults();
        assert_eq!(defaults["x"], json!(true));
        assert_eq!(defaults["obj"], json!({}));
    }
}
