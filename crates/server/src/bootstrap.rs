//! Startup helpers shared by the binaries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use filmdex_core::{load_config, load_config_from_env, validate_config, Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "FILMDEX_CONFIG";

/// Configuration file used when `FILMDEX_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "filmdex.toml";

/// Install the global tracing subscriber.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load and validate the configuration.
///
/// A file named by `FILMDEX_CONFIG` must exist. Otherwise `filmdex.toml` is
/// read when present, and defaults plus `FILMDEX_*` variables apply when not.
pub fn load_runtime_config() -> Result<Config> {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if path.exists() {
                info!("Loading configuration from {:?}", path);
                load_config(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))?
            } else {
                info!("No configuration file, using defaults and environment");
                load_config_from_env().context("Failed to load config from environment")?
            }
        }
    };

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}
