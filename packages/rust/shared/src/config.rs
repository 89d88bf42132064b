//! Application configuration for termsync.
//!
//! User config lives at `~/.termsync/termsync.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, TermSyncError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "termsync.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".termsync";

// ---------------------------------------------------------------------------
// Config structs (matching termsync.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote content-store connection settings.
    #[serde(default)]
    pub store: StoreConfig,
}

/// `[store]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the content store API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Dataset name within the store.
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Name of the env var holding the API token (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            dataset: default_dataset(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:3333".into()
}
fn default_dataset() -> String {
    "production".into()
}
fn default_token_env() -> String {
    "TERMSYNC_STORE_TOKEN".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl StoreConfig {
    /// Parse the configured endpoint into a [`Url`].
    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.endpoint).map_err(|e| {
            TermSyncError::config(format!("invalid store endpoint '{}': {e}", self.endpoint))
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.termsync/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TermSyncError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.termsync/termsync.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TermSyncError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| TermSyncError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| TermSyncError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| TermSyncError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| TermSyncError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the store API token env var is set and non-empty.
///
/// Called before Phase 1 begins so a misconfigured run fails fast with
/// zero work performed.
pub fn validate_store_token(config: &AppConfig) -> Result<String> {
    let var_name = &config.store.token_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(TermSyncError::config(format!(
            "content store token not found. Set the {var_name} environment variable."
        ))),
    }
}
