//! Live configuration store: scopes, inspection and writes
//!
//! A setting can be set at the global (user) scope and overridden at the
//! workspace scope; the schema supplies the default underneath both.

pub mod layered;
pub mod value;

pub use layered::LayeredStore;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Writable configuration scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigTarget {
    Global,
    Workspace,
}

impl ConfigTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigTarget::Global => "global",
            ConfigTarget::Workspace => "workspace",
        }
    }
}

impl fmt::Display for ConfigTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConfigTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "global" | "user" => Ok(ConfigTarget::Global),
            "workspace" => Ok(ConfigTarget::Workspace),
            _ => anyhow::bail!("Unknown target '{}'. Valid targets: global, workspace", s),
        }
    }
}

/// Value of a setting at every scope
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Inspection {
    pub key: String,
    pub default_value: Option<Value>,
    pub global_value: Option<Value>,
    pub workspace_value: Option<Value>,
}

impl Inspection {
    /// Value that is in effect: workspace, then global, then default
    pub fn effective_value(&self) -> Option<&Value> {
        self.workspace_value
            .as_ref()
            .or(self.global_value.as_ref())
            .or(self.default_value.as_ref())
    }

    /// Scope the effective value comes from, `None` for the default
    pub fn effective_target(&self) -> Option<ConfigTarget> {
        if self.workspace_value.is_some() {
            Some(ConfigTarget::Workspace)
        } else if self.global_value.is_some() {
            Some(ConfigTarget::Global)
        } else {
            None
        }
    }

    /// Value set at a specific scope
    pub fn value_at(&self, target: ConfigTarget) -> Option<&Value> {
        match target {
            ConfigTarget::Global => self.global_value.as_ref(),
            ConfigTarget::Workspace => self.workspace_value.as_ref(),
        }
    }
}

/// Reads and writes the live configuration
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Effective value of a setting
    async fn get(&self, name: &str) -> Result<Option<Value>>;

    /// Value of a setting at every scope
    async fn inspect(&self, name: &str) -> Result<Inspection>;

    /// Write a value at a scope; `None` removes the setting from that scope
    async fn update(&self, name: &str, value: Option<Value>, target: ConfigTarget) -> Result<()>;
}
