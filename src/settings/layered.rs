//! File-backed configuration store with global and workspace scopes

use super::{ConfigTarget, ConfigurationStore, Inspection};
use crate::schema::SchemaNode;
use anyhow::{Context, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Name of the per-workspace settings directory
pub const WORKSPACE_DIR_NAME: &str = ".settings-picker";

/// Settings stored as flat JSON objects, one file per scope
///
/// Keys are full dotted setting names. Defaults come from the schema.
pub struct LayeredStore {
    global_path: PathBuf,
    workspace_path: Option<PathBuf>,
    defaults: RwLock<IndexMap<String, Value>>,
}

impl LayeredStore {
    /// Create a store; `workspace_dir` is the workspace root, if one is open
    pub fn new(global_path: &Path, workspace_dir: Option<&Path>) -> Self {
        Self {
            global_path: global_path.to_path_buf(),
            workspace_path: workspace_dir
                .map(|dir| dir.join(WORKSPACE_DIR_NAME).join("settings.json")),
            defaults: RwLock::new(IndexMap::new()),
        }
    }

    /// Take defaults from a schema document, overwriting known names
    pub fn register_defaults(&self, document: &SchemaNode) {
        let mut defaults = self.defaults.write().unwrap_or_else(|e| e.into_inner());
        let incoming = document.defaults();
        log::debug!("Registering {} setting defaults", incoming.len());
        defaults.extend(incoming);
    }

    pub fn has_workspace(&self) -> bool {
        self.workspace_path.is_some()
    }

    fn default_value(&self, name: &str) -> Option<Value> {
        self.defaults
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    fn path_for(&self, target: ConfigTarget) -> Result<&Path> {
        match target {
            ConfigTarget::Global => Ok(self.global_path.as_path()),
            ConfigTarget::Workspace => self
                .workspace_path
                .as_deref()
                .context("No workspace is open; cannot use the workspace scope"),
        }
    }

    async fn read_scope(&self, target: ConfigTarget) -> Result<Map<String, Value>> {
        let path = match target {
            ConfigTarget::Global => &self.global_path,
            ConfigTarget::Workspace => match &self.workspace_path {
                Some(path) => path,
                None => return Ok(Map::new()),
            },
        };
        read_settings_file(path).await
    }
}

async fn read_settings_file(path: &Path) -> Result<Map<String, Value>> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(Map::new());
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read settings file: {:?}", path))?;
    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {:?}", path))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("Settings file {:?} does not contain a JSON object", path),
    }
}

async fn write_settings_file(path: &Path, settings: &Map<String, Value>) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create settings directory: {:?}", parent))?;
    }

    let content =
        serde_json::to_string_pretty(settings).context("Failed to serialize settings to JSON")?;
    tokio::fs::write(path, content + "\n")
        .await
        .with_context(|| format!("Failed to write settings file: {:?}", path))
}

#[async_trait]
impl ConfigurationStore for LayeredStore {
    async fn get(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.inspect(name).await?.effective_value().cloned())
    }

    async fn inspect(&self, name: &str) -> Result<Inspection> {
        let global = self.read_scope(ConfigTarget::Global).await?;
        let workspace = self.read_scope(ConfigTarget::Workspace).await?;

        Ok(Inspection {
            key: name.to_string(),
            default_value: self.default_value(name),
            global_value: global.get(name).cloned(),
            workspace_value: workspace.get(name).cloned(),
        })
    }

    async fn update(&self, name: &str, value: Option<Value>, target: ConfigTarget) -> Result<()> {
        let path = self.path_for(target)?;
        let mut settings = read_settings_file(path).await?;

        match value {
            Some(value) => {
                log::debug!("Writing {} = {} ({})", name, value, target);
                settings.insert(name.to_string(), value);
            }
            None => {
                if settings.remove(name).is_none() {
                    log::debug!("{} was not set at {} scope", name, target);
                    return Ok(());
                }
                log::debug!("Removed {} ({})", name, target);
            }
        }

        write_settings_file(path, &settings).await
    }
}
