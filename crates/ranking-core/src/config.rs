// Configuration loading and parsing (config/ranking.toml).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file inside `config/` (and `defaults/`).
pub const CONFIG_FILE: &str = "ranking.toml";

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "RANKING_API_URL";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix, e.g. `http://127.0.0.1:5000/api`.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Seconds a toast notification stays visible.
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
    /// Render tick interval in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            toast_secs: default_toast_secs(),
            tick_ms: default_tick_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log file directory. `None` means the platform data directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            directory: None,
            filter: default_log_filter(),
        }
    }
}

impl LoggingConfig {
    /// Resolve the log directory: the configured one, else
    /// `<data-local-dir>/product-ranking/logs`, else `./logs`.
    pub fn log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.directory {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "product-ranking")
            .map(|dirs| dirs.data_local_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_toast_secs() -> u64 {
    4
}

fn default_tick_ms() -> u64 {
    33
}

fn default_log_filter() -> String {
    "ranking_tui=info,ranking_core=info,warn".to_string()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/ranking.toml` relative to `base_dir`.
///
/// Does not copy defaults or read the environment; see `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Replace the API base URL when an override is given (normally the value
/// of `RANKING_API_URL`). Blank overrides are ignored. Returns whether the
/// URL was replaced.
pub fn apply_api_url_override(config: &mut Config, url: Option<String>) -> bool {
    match url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        Some(url) => {
            config.api.base_url = url;
            true
        }
        None => false,
    }
}

/// Non-blank value of `RANKING_API_URL`, if set.
pub fn api_url_override() -> Option<String> {
    std::env::var(API_URL_ENV)
        .ok()
        .filter(|u| !u.trim().is_empty())
}

/// Copy each file in `defaults/` that is missing from `config/`, leaving
/// existing files alone. `*.example` files are never copied.
///
/// Returns the paths written. A tree with `config/` but no `defaults/` is
/// fine; one with neither is an error.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(Vec::new());
        }
        return Err(copy_error(format!(
            "no defaults/ or config/ directory under {}",
            base_dir.display()
        )));
    }

    fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("cannot create {}: {e}", config_dir.display())))?;

    let mut sources: Vec<PathBuf> = fs::read_dir(&defaults_dir)
        .map_err(|e| copy_error(format!("cannot list {}: {e}", defaults_dir.display())))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) != Some("example"))
        .collect();
    sources.sort();

    let mut copied = Vec::new();
    for source in sources {
        let Some(file_name) = source.file_name() else {
            continue;
        };
        let target = config_dir.join(file_name);
        if target.exists() {
            continue;
        }
        fs::copy(&source, &target).map_err(|e| {
            copy_error(format!(
                "cannot copy {} to {}: {e}",
                source.display(),
                target.display()
            ))
        })?;
        copied.push(target);
    }

    Ok(copied)
}

fn copy_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

/// Load config relative to the current working directory: copy defaults,
/// read `config/ranking.toml`, apply `RANKING_API_URL`, validate.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    let mut config = load_config_from(&cwd)?;
    apply_api_url_override(&mut config, api_url_override());
    validate(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = config.api.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: format!("must start with http:// or https://, got {url:?}"),
        });
    }

    let positive_fields: &[(&str, u64)] = &[
        ("api.timeout_secs", config.api.timeout_secs),
        ("ui.toast_secs", config.ui.toast_secs),
        ("ui.tick_ms", config.ui.tick_ms),
    ];
    for (name, val) in positive_fields {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
