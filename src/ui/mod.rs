//! Interactive picker and text prompt
//!
//! The controller only talks to the [`Picker`] trait; [`TerminalPicker`]
//! is the dialoguer-backed implementation used by the binary.

pub mod prompts;

pub use prompts::TerminalPicker;

use anyhow::Result;

/// One entry of a choice menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub description: String,
}

impl PickItem {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Checks typed text; `Err` carries the message shown before re-prompting
pub type Validator = fn(&str) -> std::result::Result<(), String>;

/// Free text prompt
#[derive(Debug, Clone)]
pub struct TextInputRequest {
    /// Hint naming what is being edited
    pub placeholder: String,
    /// Prompt text, usually showing the current value
    pub prompt: String,
    pub validator: Option<Validator>,
}

/// Presents choices and text prompts to the user
///
/// `Ok(None)` means the user dismissed the prompt without answering.
pub trait Picker: Send + Sync {
    /// Let the user pick one item; returns its label
    fn show_choice(&self, placeholder: &str, items: &[PickItem]) -> Result<Option<String>>;

    /// Ask for text, re-prompting until the validator accepts it
    fn show_text_input(&self, request: &TextInputRequest) -> Result<Option<String>>;
}
