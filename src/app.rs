//! Wiring of schema source, configuration store, state and controller

use crate::config::{ResolvedPaths, SqliteStateStore, StateStore, db};
use crate::controller::SettingsController;
use crate::schema::{FileSchemaSource, SchemaChange, SchemaChanges, SchemaNode, SchemaSource, change_channel};
use crate::settings::LayeredStore;
use crate::ui::Picker;
use anyhow::Result;
use std::sync::Arc;

/// A running settings picker session
pub struct App {
    controller: SettingsController,
    store: Arc<LayeredStore>,
    source: Box<dyn SchemaSource>,
    changes: SchemaChanges,
}

impl App {
    /// Open the session described by `paths` and load the schema
    pub async fn open(paths: &ResolvedPaths, picker: Arc<dyn Picker>) -> Result<Self> {
        let pool = db::connect(&paths.state_db_path).await?;
        db::run_migrations(&pool).await?;
        let state: Arc<dyn StateStore> = Arc::new(SqliteStateStore::new(pool));

        let store = Arc::new(LayeredStore::new(
            &paths.user_settings_path,
            paths.workspace_dir.as_deref(),
        ));

        let (notifier, changes) = change_channel();
        let source = Box::new(FileSchemaSource::new(&paths.schema_path, notifier));

        Self::with_parts(store, state, picker, source, changes).await
    }

    /// Build a session from already constructed parts
    pub async fn with_parts(
        store: Arc<LayeredStore>,
        state: Arc<dyn StateStore>,
        picker: Arc<dyn Picker>,
        source: Box<dyn SchemaSource>,
        changes: SchemaChanges,
    ) -> Result<Self> {
        let controller = SettingsController::new(store.clone(), state, picker).await?;
        let mut app = Self {
            controller,
            store,
            source,
            changes,
        };

        let document = app.source.load().await?;
        app.apply_schema(&document);
        log::info!(
            "Loaded {} settings from {}",
            app.controller.catalog().count(),
            app.source.uri()
        );
        Ok(app)
    }

    pub fn controller(&mut self) -> &mut SettingsController {
        &mut self.controller
    }

    fn apply_schema(&mut self, document: &SchemaNode) {
        self.controller.update_schema(document);
        self.store.register_defaults(document);
    }

    /// Apply a change notification if it concerns our schema document
    pub fn apply_change(&mut self, change: &SchemaChange) -> bool {
        if change.uri != self.source.uri() {
            log::debug!("Ignoring change of unrelated document {}", change.uri);
            return false;
        }
        self.apply_schema(&change.document);
        true
    }

    /// Re-read the schema source and apply any queued changes
    pub async fn sync_schema(&mut self) -> Result<usize> {
        self.source.poll().await?;

        let mut applied = 0;
        for change in self.changes.drain() {
            if self.apply_change(&change) {
                applied += 1;
            }
        }
        Ok(applied)
    }
}
