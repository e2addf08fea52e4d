//! Most-recently-updated settings, persisted across runs

use crate::config::StateStore;
use anyhow::{Context, Result};

/// State key the list is stored under
pub const RECENTLY_UPDATED_KEY: &str = "settings.picker.recentlyUpdated";

/// Setting names, most recently updated first, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecencyList {
    names: Vec<String>,
}

impl RecencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored names, keeping the first occurrence of each
    pub fn from_names(names: Vec<String>) -> Self {
        let mut list = Self::new();
        for name in names {
            if !list.contains(&name) {
                list.names.push(name);
            }
        }
        list
    }

    /// Load the list from the state store
    ///
    /// A stored value that isn't a JSON string array is ignored.
    pub async fn load(state: &dyn StateStore) -> Result<Self> {
        let raw = state.get(RECENTLY_UPDATED_KEY, "[]").await?;
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(names) => Ok(Self::from_names(names)),
            Err(e) => {
                log::warn!("Ignoring unreadable recently updated list: {}", e);
                Ok(Self::new())
            }
        }
    }

    /// Write the list to the state store
    pub async fn save(&self, state: &dyn StateStore) -> Result<()> {
        let json = serde_json::to_string(&self.names)
            .context("Failed to serialize recently updated list")?;
        state.update(RECENTLY_UPDATED_KEY, &json).await
    }

    /// Move `name` to the front, removing any earlier occurrence
    pub fn promote(&mut self, name: &str) {
        self.names.retain(|existing| existing != name);
        self.names.insert(0, name.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
