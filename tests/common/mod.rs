//! In-memory test doubles for driving the settings controller

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use settings_picker::config::StateStore;
use settings_picker::controller::SettingsController;
use settings_picker::schema::SchemaNode;
use settings_picker::settings::{ConfigTarget, ConfigurationStore, Inspection};
use settings_picker::ui::{PickItem, Picker, TextInputRequest};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Scripted user answer
#[derive(Debug, Clone)]
pub enum Answer {
    Choose(String),
    Type(String),
    Dismiss,
}

pub fn choose(label: &str) -> Answer {
    Answer::Choose(label.to_string())
}

pub fn type_text(text: &str) -> Answer {
    Answer::Type(text.to_string())
}

/// Something the picker showed to the user
#[derive(Debug, Clone)]
pub enum Shown {
    Choice {
        placeholder: String,
        items: Vec<PickItem>,
    },
    Text {
        placeholder: String,
        prompt: String,
    },
    Rejected {
        text: String,
        message: String,
    },
}

/// Picker answering from a script; dismisses once the script runs out
#[derive(Default)]
pub struct ScriptedPicker {
    answers: Mutex<VecDeque<Answer>>,
    shown: Mutex<Vec<Shown>>,
}

impl ScriptedPicker {
    pub fn script(&self, answers: Vec<Answer>) {
        self.answers.lock().unwrap().extend(answers);
    }

    pub fn shown(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().clone()
    }

    /// Items of the n-th menu shown
    pub fn menu(&self, index: usize) -> Vec<PickItem> {
        self.shown()
            .into_iter()
            .filter_map(|shown| match shown {
                Shown::Choice { items, .. } => Some(items),
                _ => None,
            })
            .nth(index)
            .expect("menu was not shown")
    }

    pub fn rejections(&self) -> Vec<String> {
        self.shown()
            .into_iter()
            .filter_map(|shown| match shown {
                Shown::Rejected { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn next_answer(&self) -> Answer {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Answer::Dismiss)
    }
}

impl Picker for ScriptedPicker {
    fn show_choice(&self, placeholder: &str, items: &[PickItem]) -> Result<Option<String>> {
        self.shown.lock().unwrap().push(Shown::Choice {
            placeholder: placeholder.to_string(),
            items: items.to_vec(),
        });

        match self.next_answer() {
            Answer::Choose(label) => {
                assert!(
                    items.iter().any(|item| item.label == label),
                    "'{}' is not one of the offered items",
                    label
                );
                Ok(Some(label))
            }
            Answer::Type(text) => panic!("expected a choice, script typed '{}'", text),
            Answer::Dismiss => Ok(None),
        }
    }

    fn show_text_input(&self, request: &TextInputRequest) -> Result<Option<String>> {
        self.shown.lock().unwrap().push(Shown::Text {
            placeholder: request.placeholder.clone(),
            prompt: request.prompt.clone(),
        });

        loop {
            match self.next_answer() {
                Answer::Type(text) => {
                    if let Some(validator) = request.validator {
                        if let Err(message) = validator(&text) {
                            self.shown
                                .lock()
                                .unwrap()
                                .push(Shown::Rejected { text, message });
                            continue;
                        }
                    }
                    return Ok(Some(text));
                }
                Answer::Choose(label) => panic!("expected text, script chose '{}'", label),
                Answer::Dismiss => return Ok(None),
            }
        }
    }
}

/// Configuration store keeping every scope in memory
#[derive(Default)]
pub struct MemoryStore {
    defaults: Mutex<HashMap<String, Value>>,
    global: Mutex<HashMap<String, Value>>,
    workspace: Mutex<HashMap<String, Value>>,
    writes: Mutex<Vec<(String, Option<Value>, ConfigTarget)>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn set_default(&self, name: &str, value: Value) {
        self.defaults.lock().unwrap().insert(name.to_string(), value);
    }

    pub fn set_global(&self, name: &str, value: Value) {
        self.global.lock().unwrap().insert(name.to_string(), value);
    }

    pub fn set_workspace(&self, name: &str, value: Value) {
        self.workspace.lock().unwrap().insert(name.to_string(), value);
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    /// Every update call, in order
    pub fn writes(&self) -> Vec<(String, Option<Value>, ConfigTarget)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn global_value(&self, name: &str) -> Option<Value> {
        self.global.lock().unwrap().get(name).cloned()
    }

    pub fn workspace_value(&self, name: &str) -> Option<Value> {
        self.workspace.lock().unwrap().get(name).cloned()
    }

    fn scope(&self, target: ConfigTarget) -> &Mutex<HashMap<String, Value>> {
        match target {
            ConfigTarget::Global => &self.global,
            ConfigTarget::Workspace => &self.workspace,
        }
    }
}

#[async_trait]
impl ConfigurationStore for MemoryStore {
    async fn get(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.inspect(name).await?.effective_value().cloned())
    }

    async fn inspect(&self, name: &str) -> Result<Inspection> {
        Ok(Inspection {
            key: name.to_string(),
            default_value: self.defaults.lock().unwrap().get(name).cloned(),
            global_value: self.global_value(name),
            workspace_value: self.workspace_value(name),
        })
    }

    async fn update(&self, name: &str, value: Option<Value>, target: ConfigTarget) -> Result<()> {
        if *self.fail_writes.lock().unwrap() {
            anyhow::bail!("settings file is read-only");
        }

        self.writes
            .lock()
            .unwrap()
            .push((name.to_string(), value.clone(), target));

        let mut scope = self.scope(target).lock().unwrap();
        match value {
            Some(value) => {
                scope.insert(name.to_string(), value);
            }
            None => {
                scope.remove(name);
            }
        }
        Ok(())
    }
}

/// State store keeping values in memory
#[derive(Default)]
pub struct MemoryState {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryState {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl StateStore for MemoryState {
    async fn get(&self, key: &str, default_json: &str) -> Result<String> {
        Ok(self
            .raw(key)
            .unwrap_or_else(|| default_json.to_string()))
    }

    async fn update(&self, key: &str, json: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), json.to_string());
        Ok(())
    }
}

/// A controller wired to in-memory doubles
pub struct Harness {
    pub controller: SettingsController,
    pub store: Arc<MemoryStore>,
    pub state: Arc<MemoryState>,
    pub picker: Arc<ScriptedPicker>,
}

impl Harness {
    /// Build a controller for `schema`, registering its defaults in the store
    pub async fn new(schema: Value) -> Self {
        Self::with_state(schema, Arc::new(MemoryState::default())).await
    }

    pub async fn with_state(schema: Value, state: Arc<MemoryState>) -> Self {
        let document = SchemaNode::from(schema);
        let store = Arc::new(MemoryStore::default());
        for (name, default) in document.defaults() {
            store.set_default(&name, default);
        }
        let picker = Arc::new(ScriptedPicker::default());

        let mut controller =
            SettingsController::new(store.clone(), state.clone(), picker.clone())
                .await
                .unwrap();
        controller.update_schema(&document);

        Self {
            controller,
            store,
            state,
            picker,
        }
    }

    pub fn recent(&self) -> Vec<String> {
        self.controller.recent().iter().map(str::to_string).collect()
    }

    pub fn labels(items: &[PickItem]) -> Vec<&str> {
        items.iter().map(|item| item.label.as_str()).collect()
    }
}
