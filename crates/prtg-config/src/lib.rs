//! Settings for PRTG tools.
//!
//! A single TOML file, environment overrides (`PRTG_*`), API token
//! resolution, and translation to `prtg_core::ClientConfig`. The CLI layers
//! its own flag overrides on top of the loaded [`Settings`].

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use prtg_core::{ClientConfig, CoreError, TlsVerification};

/// Accepted range for the aggregate summary TTL, in seconds.
pub const AGGREGATE_TTL_RANGE: RangeInclusive<u64> = 60..=3600;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PRTG not configured: missing {field}")]
    NotConfigured { field: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Contents of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// PRTG web root, e.g. `https://prtg.example.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// API token (plaintext; prefer `api_token_env` or `PRTG_API_TOKEN`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Name of an environment variable holding the API token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token_env: Option<String>,

    pub verify_tls: bool,

    /// Extra CA certificate (PEM) to trust.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// Device and sensor cache TTL in seconds.
    pub cache_ttl: u64,

    /// System-wide summary cache TTL in seconds.
    pub aggregate_cache_ttl: u64,

    /// Where lookups are cached between runs (defaults to the platform
    /// cache dir).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: None,
            api_token: None,
            api_token_env: None,
            verify_tls: true,
            ca_cert: None,
            timeout: 30,
            cache_ttl: 60,
            aggregate_cache_ttl: 300,
            cache_dir: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if !AGGREGATE_TTL_RANGE.contains(&self.aggregate_cache_ttl) {
            return Err(ConfigError::Validation {
                field: "aggregate_cache_ttl".into(),
                reason: format!(
                    "must be between {} and {} seconds, got {}",
                    AGGREGATE_TTL_RANGE.start(),
                    AGGREGATE_TTL_RANGE.end(),
                    self.aggregate_cache_ttl
                ),
            });
        }
        Ok(())
    }

    /// Copy with the plaintext token masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            api_token: self.api_token.as_ref().map(|_| "****".into()),
            ..self.clone()
        }
    }
}

/// Clamp a requested aggregate TTL into [`AGGREGATE_TTL_RANGE`].
pub fn clamp_aggregate_ttl(secs: u64) -> u64 {
    secs.clamp(*AGGREGATE_TTL_RANGE.start(), *AGGREGATE_TTL_RANGE.end())
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "prtg", "prtg").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("prtg");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Root of the on-disk lookup cache: `cache_dir` if set, else the platform
/// cache dir.
pub fn cache_dir(settings: &Settings) -> PathBuf {
    if let Some(ref dir) = settings.cache_dir {
        return dir.clone();
    }
    ProjectDirs::from("com", "prtg", "prtg").map_or_else(
        || std::env::temp_dir().join("prtg-cache"),
        |dirs| dirs.cache_dir().to_path_buf(),
    )
}

// ── Loading & saving ────────────────────────────────────────────────

/// Defaults, then the TOML file at `path`, then `PRTG_*` variables.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PRTG_"))
}

/// Load settings from `path`, or from [`config_path`] when `None`.
///
/// An explicit path must exist; the default path may be absent.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = match path {
        Some(p) if !p.exists() => {
            return Err(ConfigError::Missing {
                path: p.to_path_buf(),
            });
        }
        Some(p) => p.to_path_buf(),
        None => config_path(),
    };

    let settings: Settings = figment(&path).extract()?;
    Ok(settings)
}

/// Serialize settings to TOML and write them to `path`.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_toml(settings)?)?;
    Ok(())
}

pub fn render_toml(settings: &Settings) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(settings)?)
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve the API token.
///
/// `api_token_env` names a variable to read first; otherwise the `api_token`
/// value is used, which `PRTG_API_TOKEN` already overrides at load time.
pub fn resolve_api_token(settings: &Settings) -> Option<SecretString> {
    if let Some(ref env_name) = settings.api_token_env {
        if let Ok(val) = std::env::var(env_name) {
            if !val.trim().is_empty() {
                return Some(SecretString::from(val));
            }
        }
    }

    settings
        .api_token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(|t| SecretString::from(t.to_owned()))
}

/// Build a `ClientConfig` from validated settings.
pub fn client_config(settings: &Settings) -> Result<ClientConfig, ConfigError> {
    settings.validate()?;

    let url = settings
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ConfigError::NotConfigured { field: "url".into() })?;
    let token = resolve_api_token(settings).ok_or_else(|| ConfigError::NotConfigured {
        field: "api_token".into(),
    })?;

    let mut config = ClientConfig::new(url, token).map_err(|e| match e {
        CoreError::NotConfigured { field } => ConfigError::NotConfigured { field },
        CoreError::Config { message } => ConfigError::Validation {
            field: "url".into(),
            reason: message,
        },
        other => ConfigError::Validation {
            field: "url".into(),
            reason: other.to_string(),
        },
    })?;

    config.tls = match (settings.verify_tls, &settings.ca_cert) {
        (false, _) => TlsVerification::DangerAcceptInvalid,
        (true, Some(ca)) => TlsVerification::CustomCa(ca.clone()),
        (true, None) => TlsVerification::SystemDefaults,
    };
    config.timeout = Duration::from_secs(settings.timeout);
    config.cache_ttl = Duration::from_secs(settings.cache_ttl);
    config.aggregate_cache_ttl = Duration::from_secs(settings.aggregate_cache_ttl);
    Ok(config)
}
