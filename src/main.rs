use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::sync::Arc;

use settings_picker::app::App;
use settings_picker::cli::{Cli, Commands, commands};
use settings_picker::config::{AppConfig, PathOverrides};
use settings_picker::ui::{Picker, TerminalPicker};

#[tokio::main]
async fn main() -> Result<()> {
    let config_dir = AppConfig::get_config_dir()?;

    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(config_dir.join("settings-picker.log"))
        .context("Failed to open log file")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting settings-picker");

    let config = AppConfig::load()?;
    let overrides = PathOverrides {
        schema_path: cli.schema,
        user_settings_path: cli.settings,
        workspace_dir: cli.workspace,
    };
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let paths = config.resolve(&overrides, &config_dir, &current_dir);
    debug!("Resolved paths: {:?}", paths);

    let picker = Arc::new(TerminalPicker::new());
    let mut app = App::open(&paths, picker.clone() as Arc<dyn Picker>).await?;

    match cli.command {
        Commands::Toggle => commands::toggle_command(&mut app).await?,
        Commands::Update => commands::update_command(&mut app).await?,
        Commands::Reset => commands::reset_command(&mut app).await?,
        Commands::Menu => commands::menu_command(&mut app, picker.as_ref()).await?,
        Commands::Show => commands::show_command(app.controller()).await?,
        Commands::Get(args) => commands::get_command(app.controller(), args).await?,
        Commands::Set(args) => commands::set_command(app.controller(), args).await?,
    }

    Ok(())
}
