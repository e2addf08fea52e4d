use anyhow::Result;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{FuzzySelect, Input};

use super::{PickItem, Picker, TextInputRequest};

/// Terminal picker built on dialoguer
///
/// Menus are fuzzy-searchable over label and description; `Esc` or `q`
/// dismisses them. An empty answer dismisses a text prompt.
#[derive(Default)]
pub struct TerminalPicker {
    theme: ColorfulTheme,
}

impl TerminalPicker {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Render menu lines with labels padded to a common width
fn format_items(items: &[PickItem]) -> Vec<String> {
    let width = items
        .iter()
        .map(|item| item.label.chars().count())
        .max()
        .unwrap_or(0);

    items
        .iter()
        .map(|item| {
            if item.description.is_empty() {
                item.label.clone()
            } else {
                format!("{:<width$}  {}", item.label, item.description, width = width)
            }
        })
        .collect()
}

impl Picker for TerminalPicker {
    fn show_choice(&self, placeholder: &str, items: &[PickItem]) -> Result<Option<String>> {
        if items.is_empty() {
            println!("{}", "Nothing to choose from.".yellow());
            return Ok(None);
        }

        let lines = format_items(items);
        let selection = FuzzySelect::with_theme(&self.theme)
            .with_prompt(placeholder)
            .items(&lines)
            .default(0)
            .interact_opt()?;

        Ok(selection.map(|index| items[index].label.clone()))
    }

    fn show_text_input(&self, request: &TextInputRequest) -> Result<Option<String>> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("{} ({})", request.placeholder, request.prompt))
            .allow_empty(true);

        if let Some(validator) = request.validator {
            // Empty input dismisses the prompt, so it is never rejected
            input = input.validate_with(move |text: &String| -> std::result::Result<(), String> {
                if text.is_empty() {
                    Ok(())
                } else {
                    validator(text)
                }
            });
        }

        let text = input.interact_text()?;
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_items_aligns_descriptions() {
        let items = vec![
            PickItem::new("a", "first"),
            PickItem::new("longer", "second"),
            PickItem::new("bare", ""),
        ];

        let lines = format_items(&items);
        assert_eq!(lines[0], "a       first");
        assert_eq!(lines[1], "longer  second");
        assert_eq!(lines[2], "bare");
    }
}
