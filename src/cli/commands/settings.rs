use anyhow::Result;
use clap::Args;
use colored::Colorize;
use log::info;

use crate::app::App;
use crate::controller::{Outcome, SettingsController};
use crate::settings::value::display_value;
use crate::settings::ConfigTarget;
use crate::ui::{PickItem, Picker};

#[derive(Args)]
pub struct SettingName {
    /// Setting name
    pub name: String,
}

#[derive(Args)]
pub struct SetArgs {
    /// Setting name
    pub name: String,
    /// Setting value
    pub value: String,
    /// Scope to write to (global or workspace)
    #[arg(long)]
    pub target: Option<ConfigTarget>,
}

/// Print what an operation did
pub fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Cancelled => println!("{}", "Cancelled.".dimmed()),
        Outcome::Unchanged { name } => {
            println!("{} {}", name.cyan(), "already has that value".dimmed())
        }
        Outcome::Skipped { name } => {
            println!("{} {}", name.cyan(), "cannot be edited here".yellow())
        }
        Outcome::Written {
            name,
            value,
            target,
        } => println!(
            "{} Set {} to {} ({})",
            "✓".green(),
            name.cyan(),
            display_value(Some(value)).bold(),
            target
        ),
        Outcome::Cleared { name, targets } if targets.is_empty() => {
            println!("{} {} is already at its default", "✓".green(), name.cyan())
        }
        Outcome::Cleared { name, targets } => {
            let scopes: Vec<&str> = targets.iter().map(ConfigTarget::as_str).collect();
            println!(
                "{} Reset {} to its default (cleared {})",
                "✓".green(),
                name.cyan(),
                scopes.join(", ")
            )
        }
    }
}

pub async fn toggle_command(app: &mut App) -> Result<()> {
    info!("Running toggle");
    let outcome = app.controller().toggle().await?;
    report(&outcome);
    Ok(())
}

pub async fn update_command(app: &mut App) -> Result<()> {
    info!("Running pick and update");
    let outcome = app.controller().pick_and_update().await?;
    report(&outcome);
    Ok(())
}

pub async fn reset_command(app: &mut App) -> Result<()> {
    info!("Running reset");
    let outcome = app.controller().reset().await?;
    report(&outcome);
    Ok(())
}

/// Offer the three actions until the user quits
///
/// The schema is re-read before every round so edits to it show up.
pub async fn menu_command(app: &mut App, picker: &dyn Picker) -> Result<()> {
    let actions = vec![
        PickItem::new("toggle", "Flip a boolean setting"),
        PickItem::new("update", "Change the value of a setting"),
        PickItem::new("reset", "Restore a setting to its default"),
        PickItem::new("quit", ""),
    ];

    loop {
        let applied = app.sync_schema().await?;
        if applied > 0 {
            println!("{}", "Schema changed, settings reloaded.".dimmed());
        }

        let outcome = match picker.show_choice("Settings", &actions)?.as_deref() {
            Some("toggle") => app.controller().toggle().await?,
            Some("update") => app.controller().pick_and_update().await?,
            Some("reset") => app.controller().reset().await?,
            _ => return Ok(()),
        };
        report(&outcome);
    }
}

/// Show all settings with their current values
pub async fn show_command(controller: &SettingsController) -> Result<()> {
    let settings = controller.ordered_settings();
    if settings.is_empty() {
        println!("No settings found in the schema.");
        return Ok(());
    }

    println!("{}", "Settings".bold());
    println!("========");

    for (name, schema) in &settings {
        let inspection = controller.store().inspect(name).await?;
        let source = inspection
            .effective_target()
            .map(|target| target.as_str())
            .unwrap_or("default");

        let marker = if controller.recent().contains(name) {
            "*".yellow().to_string()
        } else {
            " ".to_string()
        };

        println!(
            "{} {} = {} {}",
            marker,
            name.cyan(),
            display_value(inspection.effective_value()),
            format!("[{}, {}]", schema.ty.as_str(), source).dimmed()
        );
    }

    println!("\nTotal settings: {}", settings.len());
    Ok(())
}

/// Print the effective value of a setting
pub async fn get_command(controller: &SettingsController, args: SettingName) -> Result<()> {
    info!("Getting setting: {}", args.name);

    if !controller.catalog().contains(&args.name) {
        anyhow::bail!("Unknown setting: {}", args.name);
    }

    let value = controller.store().get(&args.name).await?;
    println!("{}", display_value(value.as_ref()));
    Ok(())
}

/// Set a setting without prompting
pub async fn set_command(controller: &mut SettingsController, args: SetArgs) -> Result<()> {
    info!("Setting {} to {}", args.name, args.value);

    let outcome = controller
        .set_from_text(&args.name, &args.value, args.target)
        .await?;
    report(&outcome);
    Ok(())
}
