mod args;
mod batch;
mod interactive;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whatsurname_core::{
    create_analyzer, load_config, validate_config, Analyzer, Config, SanitizedConfig,
};

use args::{Cli, Command};
use batch::{OutputMode, EXIT_FAILURE, EXIT_SUCCESS};

/// Config file override when `--config` is not given.
const CONFIG_ENV: &str = "WHATSURNAME_CONFIG";

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            EXIT_FAILURE
        }
    };
    // The stdin reader thread may still be blocked on a read.
    std::process::exit(code);
}

async fn run() -> Result<i32> {
    // Logs go to stderr; stdout carries results only.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "error".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // A project-local .env may carry OLLAMA_API; real environment wins.
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    // No arguments at all means the interactive session.
    if std::env::args_os().len() <= 1 {
        let analyzer = build_analyzer(None, None)?;
        interactive::run(analyzer)
            .await
            .context("Interactive session failed")?;
        return Ok(EXIT_SUCCESS);
    }

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze {
            name,
            json,
            timeout,
        } => {
            let mode = if json {
                OutputMode::Json
            } else {
                OutputMode::Plain
            };
            let mut out = std::io::stdout().lock();

            let analyzer = match build_analyzer(cli.config.as_deref(), timeout) {
                Ok(analyzer) => analyzer,
                Err(e) => {
                    error!("Fatal error: {:#}", e);
                    batch::report_startup_failure(&format!("{:#}", e), mode, &mut out)
                        .context("Failed to write result")?;
                    return Ok(EXIT_FAILURE);
                }
            };

            let code = batch::run(analyzer.as_ref(), &name, mode, &mut out)
                .await
                .context("Failed to write result")?;
            Ok(code)
        }
    }
}

fn build_analyzer(config_path: Option<&Path>, timeout: Option<u64>) -> Result<Arc<dyn Analyzer>> {
    let env_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
    let config_path = config_path.or(env_path.as_deref());

    let mut config: Config = load_config(config_path).with_context(|| match config_path {
        Some(path) => format!("Failed to load config from {:?}", path),
        None => "Failed to load config".to_string(),
    })?;
    if timeout.is_some() {
        config.engine.timeout_secs = timeout;
    }

    validate_config(&config).context("Configuration validation failed")?;
    debug!(config = ?SanitizedConfig::from(&config), "configuration loaded");

    let analyzer = create_analyzer(&config.engine).context("Failed to create analyzer")?;
    debug!("Using engine: {}", analyzer.describe());
    Ok(analyzer)
}
