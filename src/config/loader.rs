//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::BridgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Optional TOML config file.
pub const CONFIG_PATH_ENV_VAR: &str = "BRIDGE_CONFIG";
/// Listener port; the bridge binds every interface on it.
pub const PORT_ENV_VAR: &str = "PORT";
/// Raw service account JSON document.
pub const SERVICE_ACCOUNT_ENV_VAR: &str = "GOOGLE_SERVICE_ACCOUNT_JSON";
/// Realtime Database base URL.
pub const DB_URL_ENV_VAR: &str = "FIREBASE_DB_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}: {message}")]
    Env { name: &'static str, message: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_config_file(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Build the runtime configuration: defaults, then the optional file named by
/// `BRIDGE_CONFIG`, then environment overrides, then validation.
pub fn load_from_env() -> Result<BridgeConfig, ConfigError> {
    let mut config = match std::env::var(CONFIG_PATH_ENV_VAR) {
        Ok(path) => read_config_file(Path::new(&path))?,
        Err(_) => BridgeConfig::default(),
    };

    apply_env(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// `lookup` abstracts `std::env::var` so tests don't touch process state.
/// Empty values are treated as unset.
pub fn apply_env<F>(config: &mut BridgeConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = get(PORT_ENV_VAR) {
        let port: u16 = port.trim().parse().map_err(|_| ConfigError::Env {
            name: PORT_ENV_VAR,
            message: format!("'{}' is not a valid port", port),
        })?;
        config.listener.bind_address = format!("0.0.0.0:{}", port);
    }

    if let Some(url) = get(DB_URL_ENV_VAR) {
        config.firebase.db_url = Some(url.trim().to_string());
    }

    if let Some(json) = get(SERVICE_ACCOUNT_ENV_VAR) {
        config.firebase.service_account_json = Some(json);
    }

    Ok(())
}
