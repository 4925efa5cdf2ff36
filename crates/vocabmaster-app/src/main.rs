use std::sync::Arc;

use clap::Parser;
use vocabmaster_claude::ClaudeCliEnricher;
use vocabmaster_config::Config;

mod cli;
mod commands;
mod controller;
mod events;
mod logging;
mod profile;
mod state;
mod status;
mod ui;


use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(path) = std::env::var("VOCABMASTER_ENV_PATH") {
        dotenvy::from_path(path).ok();
    } else {
        dotenvy::dotenv().ok();
    }

    let cli = Cli::parse();

    let profiles_dir = profile::profiles_dir();
    let loaded = profiles_dir.as_ref().map_err(|e| anyhow::anyhow!("{e:#}")).and_then(|dir| {
        profile::init_user_config(dir)?;
        profile::load_user_profile(dir, &cli.profile)
    });
    let (mut config, profile_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::new(), Some(e)),
    };

    logging::init(
        cli.log_level.as_deref().unwrap_or(&config.log_level),
        cli.log_format,
    );
    if let Some(e) = profile_error {
        tracing::warn!("Profile unavailable, using environment defaults: {e:#}");
    }

    if let Some(overrides) = cli.command.overrides() {
        overrides.apply(&mut config);
    }

    if commands::execute_local(&cli.command, profiles_dir.as_deref().ok())? {
        return Ok(());
    }

    let batch_size = config.batch.effective_size();
    let enricher = Arc::new(ClaudeCliEnricher::from_config(&config.enricher));
    let state = Arc::new(AppState::new(config, enricher));

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();
    let mut session = controller.session();
    session.wait_ready().await?;

    let result = commands::execute(&mut session, cli.command, batch_size).await;

    if let Err(e) = session.shutdown().await {
        tracing::warn!("Backend already gone: {e}");
        controller.shutdown();
    }
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("backend task exited: {e:#}"),
            Err(e) => tracing::error!("backend task panicked: {e}"),
        }
    }

    result
}
