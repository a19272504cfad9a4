//! Tamis - Command-line entry point
//!
//! Loads configuration, wires the adapters into the pages and runs one
//! command.

mod cli;
mod commands;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tamis_application::Session;
use tamis_infrastructure::{FileSessionStore, ReqwestAuthApi, SettingsRepository, SystemNavigator};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::commands::Context;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.default_log_level())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings_repo = match cli.config.clone() {
        Some(path) => SettingsRepository::with_path(path),
        None => SettingsRepository::new(),
    };
    let mut settings = settings_repo.load_with_env().await?;
    if let Some(api_url) = cli.api_url.clone() {
        settings.api_url = api_url;
    }
    tracing::debug!(api_url = %settings.api_url, "configuration loaded");

    let store = match cli.session_file.clone() {
        Some(path) => FileSessionStore::new(path),
        None => FileSessionStore::default_location()?,
    };

    let ctx = Context {
        api: Arc::new(ReqwestAuthApi::from_settings(&settings)?),
        session: Session::new(Arc::new(store)),
        navigator: Arc::new(SystemNavigator::new()),
        settings,
    };

    commands::run(cli.command, &ctx).await
}
