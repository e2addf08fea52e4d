//! Settings controller: menus, typed edits and the shared write path
//!
//! Owns the schema catalog and the most-recently-updated list. Menus list
//! recently updated settings first, then the rest of the catalog in schema
//! order. Every write goes through [`SettingsController::write_setting`],
//! which clears overrides instead of writing a value equal to the default.

pub mod recency;
pub mod write;

pub use recency::{RECENTLY_UPDATED_KEY, RecencyList};
pub use write::{WriteAction, override_targets, resolve_write};

use crate::config::StateStore;
use crate::schema::{PropertySchema, SchemaCatalog, SchemaNode, SettingType};
use crate::settings::value::{
    display_value, is_truthy, parse_bool, parse_integer, same_value, validate_integer,
};
use crate::settings::{ConfigTarget, ConfigurationStore};
use crate::ui::{PickItem, Picker, TextInputRequest};
use anyhow::Result;
use log::{debug, info};
use serde_json::Value;
use std::sync::Arc;

const TOGGLE_PLACEHOLDER: &str = "Select the setting to toggle";
const UPDATE_PLACEHOLDER: &str = "Select the setting to update";
const RESET_PLACEHOLDER: &str = "Select the setting to reset";

/// Result of a controller operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The user dismissed a menu or prompt
    Cancelled,
    /// The chosen value is already in effect
    Unchanged { name: String },
    /// The setting's schema offers no editor
    Skipped { name: String },
    /// A value was stored at a scope
    Written {
        name: String,
        value: Value,
        target: ConfigTarget,
    },
    /// Overrides were removed so the default applies
    Cleared {
        name: String,
        targets: Vec<ConfigTarget>,
    },
}

pub struct SettingsController {
    catalog: SchemaCatalog,
    recent: RecencyList,
    store: Arc<dyn ConfigurationStore>,
    state: Arc<dyn StateStore>,
    picker: Arc<dyn Picker>,
}

impl SettingsController {
    /// Create a controller with an empty catalog, loading the recency list
    pub async fn new(
        store: Arc<dyn ConfigurationStore>,
        state: Arc<dyn StateStore>,
        picker: Arc<dyn Picker>,
    ) -> Result<Self> {
        let recent = RecencyList::load(state.as_ref()).await?;
        debug!("Loaded {} recently updated settings", recent.len());

        Ok(Self {
            catalog: SchemaCatalog::new(),
            recent,
            store,
            state,
            picker,
        })
    }

    /// Feed a new schema document into the catalog
    pub fn update_schema(&mut self, document: &SchemaNode) {
        self.catalog.update(document);
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    pub fn recent(&self) -> &RecencyList {
        &self.recent
    }

    pub fn store(&self) -> &dyn ConfigurationStore {
        self.store.as_ref()
    }

    /// Catalogued settings matching `filter`: recent ones first, then the
    /// rest in catalog order
    fn ordered_entries(
        &self,
        filter: impl Fn(&PropertySchema) -> bool,
    ) -> Vec<(&str, &PropertySchema)> {
        let mut entries: Vec<(&str, &PropertySchema)> = self
            .recent
            .iter()
            .filter_map(|name| self.catalog.get(name).map(|schema| (name, schema)))
            .filter(|(_, schema)| filter(schema))
            .collect();

        entries.extend(
            self.catalog
                .entries()
                .filter(|(name, schema)| !self.recent.contains(name) && filter(schema)),
        );
        entries
    }

    /// Every catalogued setting in menu order
    pub fn ordered_settings(&self) -> Vec<(&str, &PropertySchema)> {
        self.ordered_entries(|_| true)
    }

    /// Boolean settings with their current and flipped value
    pub async fn list_for_toggle(&self) -> Result<Vec<PickItem>> {
        let mut items = Vec::new();
        for (name, schema) in self.ordered_entries(|schema| schema.ty == SettingType::Boolean) {
            let current = self.store.get(name).await?;
            let flipped = !is_truthy(current.as_ref());
            items.push(PickItem::new(
                name,
                format!(
                    "{}≫{}  {}",
                    display_value(current.as_ref()),
                    flipped,
                    schema.description()
                ),
            ));
        }
        Ok(items)
    }

    /// All catalogued settings with their descriptions
    pub fn list_for_update(&self) -> Vec<PickItem> {
        self.ordered_entries(|_| true)
            .into_iter()
            .map(|(name, schema)| PickItem::new(name, schema.description()))
            .collect()
    }

    /// Flip a boolean setting chosen from a menu
    pub async fn toggle(&mut self) -> Result<Outcome> {
        let items = self.list_for_toggle().await?;
        let Some(name) = self.picker.show_choice(TOGGLE_PLACEHOLDER, &items)? else {
            return Ok(Outcome::Cancelled);
        };

        let current = self.store.get(&name).await?;
        let flipped = Value::Bool(!is_truthy(current.as_ref()));
        self.write_setting(&name, flipped, None).await
    }

    /// Edit a setting chosen from a menu with an editor fitting its schema
    pub async fn pick_and_update(&mut self) -> Result<Outcome> {
        let items = self.list_for_update();
        let Some(name) = self.picker.show_choice(UPDATE_PLACEHOLDER, &items)? else {
            return Ok(Outcome::Cancelled);
        };
        let Some(schema) = self.catalog.get(&name).cloned() else {
            return Ok(Outcome::Skipped { name });
        };

        if let Some(choices) = schema.choices() {
            let values: Vec<Value> = choices.iter().cloned().map(Value::String).collect();
            return self.pick_value(&name, &values).await;
        }

        match schema.ty {
            SettingType::Boolean => {
                self.pick_value(&name, &[Value::Bool(true), Value::Bool(false)])
                    .await
            }
            SettingType::String => self.prompt_string(&name).await,
            SettingType::Number => self.prompt_number(&name).await,
            SettingType::Other => {
                debug!("No editor for {} ({})", name, schema.ty.as_str());
                Ok(Outcome::Skipped { name })
            }
        }
    }

    /// Restore a setting chosen from a menu to its default
    pub async fn reset(&mut self) -> Result<Outcome> {
        let items = self.list_for_update();
        let Some(name) = self.picker.show_choice(RESET_PLACEHOLDER, &items)? else {
            return Ok(Outcome::Cancelled);
        };

        let inspection = self.store.inspect(&name).await?;
        match inspection.default_value.clone() {
            Some(default) => self.write_setting(&name, default, None).await,
            None => {
                let targets = override_targets(&inspection);
                self.clear_overrides(&name, targets).await
            }
        }
    }

    /// Set a setting from text, parsed according to its schema
    pub async fn set_from_text(
        &mut self,
        name: &str,
        text: &str,
        target: Option<ConfigTarget>,
    ) -> Result<Outcome> {
        let Some(schema) = self.catalog.get(name) else {
            anyhow::bail!("Unknown setting: {}", name);
        };

        let value = if let Some(choices) = schema.choices() {
            if !choices.iter().any(|choice| choice == text) {
                anyhow::bail!(
                    "Invalid value for {}: '{}'. Valid values: {}",
                    name,
                    text,
                    choices.join(", ")
                );
            }
            Value::String(text.to_string())
        } else {
            match schema.ty {
                SettingType::Boolean => Value::Bool(parse_bool(text)?),
                SettingType::Number => Value::from(parse_integer(text)?),
                SettingType::String => Value::String(text.to_string()),
                SettingType::Other => anyhow::bail!("Setting {} cannot be edited", name),
            }
        };

        self.write_setting(name, value, target).await
    }

    /// Shared write path
    ///
    /// Writing the default clears the overrides instead and leaves the
    /// recency list alone. Any other value is stored and the setting moves to
    /// the front of the recency list.
    pub async fn write_setting(
        &mut self,
        name: &str,
        value: Value,
        explicit_target: Option<ConfigTarget>,
    ) -> Result<Outcome> {
        let inspection = self.store.inspect(name).await?;

        match resolve_write(&inspection, value, explicit_target) {
            WriteAction::Clear(targets) => self.clear_overrides(name, targets).await,
            WriteAction::Write { target, value } => {
                self.store.update(name, Some(value.clone()), target).await?;
                info!("Set {} to {} ({})", name, value, target);

                self.recent.promote(name);
                self.recent.save(self.state.as_ref()).await?;

                Ok(Outcome::Written {
                    name: name.to_string(),
                    value,
                    target,
                })
            }
        }
    }

    async fn clear_overrides(&self, name: &str, targets: Vec<ConfigTarget>) -> Result<Outcome> {
        for target in &targets {
            self.store.update(name, None, *target).await?;
            info!("Cleared {} override of {}", target, name);
        }

        Ok(Outcome::Cleared {
            name: name.to_string(),
            targets,
        })
    }

    /// Offer a fixed set of values, annotating the current and default one
    async fn pick_value(&mut self, name: &str, values: &[Value]) -> Result<Outcome> {
        let inspection = self.store.inspect(name).await?;
        let current = inspection.effective_value().cloned();

        let items: Vec<PickItem> = values
            .iter()
            .map(|value| {
                let mut notes = Vec::new();
                if same_value(Some(value), current.as_ref()) {
                    notes.push("(Current)");
                }
                if same_value(Some(value), inspection.default_value.as_ref()) {
                    notes.push("(Default)");
                }
                PickItem::new(display_value(Some(value)), notes.join(" "))
            })
            .collect();

        let Some(label) = self.picker.show_choice(name, &items)? else {
            return Ok(Outcome::Cancelled);
        };
        let Some(value) = values
            .iter()
            .find(|value| display_value(Some(*value)) == label)
            .cloned()
        else {
            return Ok(Outcome::Cancelled);
        };

        self.commit_if_changed(name, current.as_ref(), value).await
    }

    async fn prompt_string(&mut self, name: &str) -> Result<Outcome> {
        let current = self.store.get(name).await?;
        let Some(text) = self.prompt_text(name, current.as_ref(), None)? else {
            return Ok(Outcome::Cancelled);
        };
        if text.is_empty() {
            return Ok(Outcome::Cancelled);
        }

        self.commit_if_changed(name, current.as_ref(), Value::String(text))
            .await
    }

    async fn prompt_number(&mut self, name: &str) -> Result<Outcome> {
        let current = self.store.get(name).await?;
        let Some(text) = self.prompt_text(name, current.as_ref(), Some(validate_integer))? else {
            return Ok(Outcome::Cancelled);
        };

        let number = parse_integer(&text)?;
        self.commit_if_changed(name, current.as_ref(), Value::from(number))
            .await
    }

    fn prompt_text(
        &self,
        name: &str,
        current: Option<&Value>,
        validator: Option<crate::ui::Validator>,
    ) -> Result<Option<String>> {
        self.picker.show_text_input(&TextInputRequest {
            placeholder: name.to_string(),
            prompt: format!("Current value: {}", display_value(current)),
            validator,
        })
    }

    async fn commit_if_changed(
        &mut self,
        name: &str,
        current: Option<&Value>,
        value: Value,
    ) -> Result<Outcome> {
        if same_value(Some(&value), current) {
            debug!("{} already set to {}", name, value);
            return Ok(Outcome::Unchanged {
                name: name.to_string(),
            });
        }
        self.write_setting(name, value, None).await
    }
}
