//! Where schema documents come from and how changes are announced

use super::types::SchemaNode;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// A new version of a schema document
#[derive(Debug, Clone)]
pub struct SchemaChange {
    /// Identity of the document that changed
    pub uri: String,
    pub document: SchemaNode,
}

/// Sending half of the schema change stream
#[derive(Debug, Clone)]
pub struct SchemaNotifier {
    tx: mpsc::UnboundedSender<SchemaChange>,
}

impl SchemaNotifier {
    pub fn notify(&self, uri: &str, document: SchemaNode) {
        // A closed stream just means nobody listens any more
        if self
            .tx
            .send(SchemaChange {
                uri: uri.to_string(),
                document,
            })
            .is_err()
        {
            log::debug!("Schema change for {} dropped, no listener", uri);
        }
    }
}

/// Receiving half of the schema change stream
#[derive(Debug)]
pub struct SchemaChanges {
    rx: mpsc::UnboundedReceiver<SchemaChange>,
}

impl SchemaChanges {
    /// Wait for the next change; `None` once every notifier is gone
    pub async fn next(&mut self) -> Option<SchemaChange> {
        self.rx.recv().await
    }

    /// Take every change that is already queued
    pub fn drain(&mut self) -> Vec<SchemaChange> {
        let mut changes = Vec::new();
        while let Ok(change) = self.rx.try_recv() {
            changes.push(change);
        }
        changes
    }
}

/// Create a connected notifier / change stream pair
pub fn change_channel() -> (SchemaNotifier, SchemaChanges) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SchemaNotifier { tx }, SchemaChanges { rx })
}

/// Supplies the settings schema document
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Identity used to match change notifications to this document
    fn uri(&self) -> &str;

    /// Load the current document
    async fn load(&self) -> Result<SchemaNode>;

    /// Check for a new version and announce it; returns whether it changed
    async fn poll(&self) -> Result<bool>;
}

/// Schema document stored as a JSON file
pub struct FileSchemaSource {
    path: PathBuf,
    uri: String,
    last_text: Mutex<Option<String>>,
    notifier: SchemaNotifier,
}

impl FileSchemaSource {
    pub fn new(path: &Path, notifier: SchemaNotifier) -> Self {
        Self {
            path: path.to_path_buf(),
            uri: format!("file://{}", path.display()),
            last_text: Mutex::new(None),
            notifier,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<(String, SchemaNode)> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read schema file: {:?}", self.path))?;
        let document = SchemaNode::from_json_str(&text)
            .with_context(|| format!("Failed to parse schema file: {:?}", self.path))?;
        Ok((text, document))
    }

    fn remember(&self, text: String) -> bool {
        let mut last = self.last_text.lock().unwrap_or_else(|e| e.into_inner());
        if last.as_deref() == Some(text.as_str()) {
            return false;
        }
        *last = Some(text);
        true
    }
}

#[async_trait]
impl SchemaSource for FileSchemaSource {
    fn uri(&self) -> &str {
        &self.uri
    }

    async fn load(&self) -> Result<SchemaNode> {
        let (text, document) = self.read().await?;
        self.remember(text);
        log::debug!("Loaded schema from {:?}", self.path);
        Ok(document)
    }

    async fn poll(&self) -> Result<bool> {
        let (text, document) = self.read().await?;
        if !self.remember(text) {
            return Ok(false);
        }
        log::info!("Schema changed: {}", self.uri);
        self.notifier.notify(&self.uri, document);
        Ok(true)
    }
}
