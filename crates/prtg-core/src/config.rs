// ── Runtime connection configuration ──
//
// These types describe *how* to talk to a PRTG core server. They carry the
// API token and connection tuning, but never touch disk: `prtg-config`
// (or any embedding application) builds a `ClientConfig` and hands it in.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use prtg_api::{TlsMode, TransportConfig};

use crate::error::CoreError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);
pub const DEFAULT_AGGREGATE_CACHE_TTL: Duration = Duration::from_secs(300);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

impl TlsVerification {
    /// Map the plain `verify_tls` switch used in settings files.
    pub fn from_verify_flag(verify: bool) -> Self {
        if verify {
            Self::SystemDefaults
        } else {
            Self::DangerAcceptInvalid
        }
    }
}

/// Configuration for one PRTG server.
///
/// Immutable once handed to a `Monitor`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// PRTG web root (e.g., `https://prtg.example.com`).
    pub url: Url,
    pub api_token: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// TTL for resolved devices and per-device sensor lists.
    pub cache_ttl: Duration,
    /// TTL for the system-wide status summary.
    pub aggregate_cache_ttl: Duration,
}

impl ClientConfig {
    /// Build a config with default tuning.
    ///
    /// A blank URL or token yields `CoreError::NotConfigured`: the client
    /// would be unusable, so none is built.
    pub fn new(url: &str, api_token: SecretString) -> Result<Self, CoreError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(CoreError::NotConfigured { field: "url".into() });
        }
        if api_token.expose_secret().trim().is_empty() {
            return Err(CoreError::NotConfigured {
                field: "api_token".into(),
            });
        }
        let url = Url::parse(url).map_err(|e| CoreError::Config {
            message: format!("invalid PRTG URL '{url}': {e}"),
        })?;

        Ok(Self {
            url,
            api_token,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            aggregate_cache_ttl: DEFAULT_AGGREGATE_CACHE_TTL,
        })
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn token(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn defaults_match_plugin_settings() {
        let config = ClientConfig::new("https://prtg.example.com", token("abc")).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.aggregate_cache_ttl, Duration::from_secs(300));
        assert_eq!(config.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn blank_url_is_not_configured() {
        let err = ClientConfig::new("  ", token("abc")).unwrap_err();
        assert!(matches!(err, CoreError::NotConfigured { ref field } if field == "url"));
    }

    #[test]
    fn blank_token_is_not_configured() {
        let err = ClientConfig::new("https://prtg.example.com", token("")).unwrap_err();
        assert!(err.is_not_configured());
    }

    #[test]
    fn garbage_url_is_config_error() {
        let err = ClientConfig::new("not a url", token("abc")).unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }));
    }

    #[test]
    fn verify_flag_maps_to_tls_mode() {
        assert_eq!(TlsVerification::from_verify_flag(true), TlsVerification::SystemDefaults);
        assert_eq!(
            TlsVerification::from_verify_flag(false),
            TlsVerification::DangerAcceptInvalid
        );
    }
}
