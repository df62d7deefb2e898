//! CLI-specific config glue: layers `GlobalOpts` flags over `prtg-config`.

use std::path::PathBuf;
use std::sync::Arc;

use prtg_config::Settings;
use prtg_core::{FileCache, Monitor};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The file `--config` points at, or the platform default.
pub fn settings_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(prtg_config::config_path)
}

/// Settings from file and environment, with command-line flags applied.
pub fn effective_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let mut settings = prtg_config::load_settings(global.config.as_deref())?;

    if let Some(ref url) = global.url {
        settings.url = Some(url.clone());
    }
    if let Some(ref token) = global.api_token {
        settings.api_token = Some(token.clone());
        settings.api_token_env = None;
    }
    if global.insecure {
        settings.verify_tls = false;
    }
    if let Some(timeout) = global.timeout {
        settings.timeout = timeout;
    }
    Ok(settings)
}

/// Monitor for the configured server. Lookups are cached on disk between
/// runs unless `--no-cache` is given.
pub fn monitor(global: &GlobalOpts) -> Result<Monitor, CliError> {
    let settings = effective_settings(global)?;
    let client_config = prtg_config::client_config(&settings)?;
    if global.no_cache {
        return Ok(Monitor::new(&client_config)?);
    }

    let cache = FileCache::for_server(&prtg_config::cache_dir(&settings), &client_config.url);
    tracing::debug!(dir = %cache.dir().display(), "using lookup cache");
    Ok(Monitor::with_cache(&client_config, Arc::new(cache))?)
}
