use super::commands::settings::{SetArgs, SettingName};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "settings-picker")]
#[command(about = "Browse and change settings from a quick-pick menu")]
pub struct Cli {
    /// Schema document describing the available settings
    #[arg(long, global = true)]
    pub schema: Option<PathBuf>,

    /// Global (user) settings file
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Workspace root whose settings override the global ones
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick a boolean setting and flip it
    Toggle,
    /// Pick a setting and change its value
    Update,
    /// Pick a setting and restore its default
    Reset,
    /// Keep offering toggle, update and reset until dismissed
    Menu,
    /// Show all settings with their current values
    Show,
    /// Get the value of a specific setting
    Get(SettingName),
    /// Set the value of a specific setting
    Set(SetArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ConfigTarget;

    #[test]
    fn test_parse_set_with_target() {
        let cli = Cli::try_parse_from([
            "settings-picker",
            "set",
            "editor.wrap",
            "true",
            "--target",
            "workspace",
            "--schema",
            "/tmp/schema.json",
        ])
        .unwrap();

        assert_eq!(cli.schema, Some(PathBuf::from("/tmp/schema.json")));
        match cli.command {
            Commands::Set(args) => {
                assert_eq!(args.name, "editor.wrap");
                assert_eq!(args.value, "true");
                assert_eq!(args.target, Some(ConfigTarget::Workspace));
            }
            _ => panic!("Expected set command"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_target() {
        let result = Cli::try_parse_from([
            "settings-picker",
            "set",
            "editor.wrap",
            "true",
            "--target",
            "folder",
        ]);
        assert!(result.is_err());
    }
}
