//! # Configuration
//!
//! Settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.huddle/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HuddleConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub check_health: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub copy_feedback_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 2000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend_url: String,
    pub session_id: String,
    pub request_timeout: Duration,
    /// How long the "copied" indicator stays on a code block.
    pub copy_feedback: Duration,
    pub check_health: bool,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub backend_url: Option<String>,
    pub session_id: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.huddle/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".huddle").join("config.toml"))
}

/// Load config from `~/.huddle/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HuddleConfig::default()`. A malformed file is a `ConfigError::Parse`.
pub fn load_config() -> Result<HuddleConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HuddleConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<HuddleConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(HuddleConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HuddleConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Huddle Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# url = "http://localhost:8000"      # Or set HUDDLE_BACKEND_URL / --backend-url
# request_timeout_secs = 30
# check_health = true                # Probe /health at start-up

# [ui]
# copy_feedback_ms = 2000            # How long "copied" shows on a code block
"#;

fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HuddleConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &HuddleConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Backend URL: CLI → env → config → default
    let backend_url = cli
        .backend_url
        .clone()
        .or_else(|| env("HUDDLE_BACKEND_URL"))
        .or_else(|| config.backend.url.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

    // Session: CLI → env → fresh id per run
    let session_id = cli
        .session_id
        .clone()
        .or_else(|| env("HUDDLE_SESSION_ID"))
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    ResolvedConfig {
        backend_url,
        session_id,
        request_timeout: Duration::from_secs(
            config
                .backend
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        copy_feedback: Duration::from_millis(
            config.ui.copy_feedback_ms.unwrap_or(DEFAULT_COPY_FEEDBACK_MS),
        ),
        check_health: config.backend.check_health.unwrap_or(true),
    }
}
