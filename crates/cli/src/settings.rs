//! Configuration loading
//!
//! Layers, lowest to highest precedence:
//!
//! 1. built-in defaults
//! 2. TOML file (`--config`, or `config.toml` in the user config directory)
//! 3. `PAIJOB_*` environment variables
//! 4. command-line flags

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use paijob_core::PortalConfig;
use paijob_infra_store::default_session_path;
use std::path::{Path, PathBuf};
use tracing::debug;

const ENV_PREFIX: &str = "PAIJOB";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Values given on the command line
#[derive(Debug, Default)]
pub struct Overrides {
    pub rest_server_uri: Option<String>,
    pub launcher_scheduler: Option<String>,
}

/// Load from `config_path`, or from the default location if it exists
pub fn load(config_path: Option<&Path>, overrides: Overrides) -> Result<PortalConfig> {
    load_with_env(config_path, process_env(), overrides)
}

fn process_env() -> Environment {
    Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}

fn load_with_env(
    config_path: Option<&Path>,
    env: Environment,
    overrides: Overrides,
) -> Result<PortalConfig> {
    let mut builder = Config::builder()
        .set_default("launcher_scheduler", "k8s")?
        .set_default("request_timeout_secs", 30)?;

    match config_path {
        Some(path) => {
            debug!(path = %path.display(), "Loading config file");
            builder = builder.add_source(File::from(path).required(true));
        }
        None => {
            if let Some(path) = default_config_path() {
                debug!(path = %path.display(), "Loading default config file if present");
                builder = builder.add_source(File::from(path).required(false));
            }
        }
    }

    builder = builder.add_source(env);

    if let Some(uri) = overrides.rest_server_uri {
        builder = builder.set_override("rest_server_uri", uri)?;
    }
    if let Some(scheduler) = overrides.launcher_scheduler {
        builder = builder.set_override("launcher_scheduler", scheduler)?;
    }

    builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")
}

/// Session file location: configured path (tilde-expanded) or the default
pub fn session_path(config: &PortalConfig) -> Result<PathBuf> {
    match &config.session_file {
        Some(path) => Ok(PathBuf::from(shellexpand::tilde(path).into_owned())),
        None => default_session_path().context("Cannot determine home directory for session file"),
    }
}

fn default_config_path() -> Option<PathBuf> {
    default_session_path().and_then(|p| p.parent().map(|dir| dir.join(DEFAULT_CONFIG_FILE)))
}
