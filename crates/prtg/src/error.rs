//! CLI error types with miette diagnostics.
//!
//! Maps library errors into user-facing errors with actionable help text
//! and a process exit code.

use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

use prtg_config::ConfigError;
use prtg_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const CONFIG: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to PRTG ({endpoint})")]
    #[diagnostic(
        code(prtg::connection_failed),
        help(
            "Check that the PRTG core server is running and reachable.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { endpoint: String, reason: String },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(prtg::tls_error),
        help(
            "Use --insecure (-k) to accept a self-signed certificate, \
             or point ca_cert at the issuing CA."
        )
    )]
    TlsError { reason: String },

    #[error("Request to {endpoint} timed out after {timeout:?}")]
    #[diagnostic(
        code(prtg::timeout),
        help("Increase the timeout with --timeout or check server load.")
    )]
    Timeout { endpoint: String, timeout: Duration },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(prtg::auth_failed),
        help(
            "PRTG rejected the API token. Create one under Setup > Account \
             Settings > API Keys and set PRTG_API_TOKEN."
        )
    )]
    AuthFailed,

    // ── Resources ────────────────────────────────────────────────────

    #[error("Device '{name}' not found in PRTG")]
    #[diagnostic(
        code(prtg::not_found),
        help("Add it with: prtg export {name} <host>")
    )]
    NotFound { name: String },

    #[error("Device '{name}' already exists in PRTG (id {device_id})")]
    #[diagnostic(code(prtg::conflict), help("View it at {device_url}"))]
    Conflict {
        name: String,
        device_id: i64,
        device_url: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(prtg::bad_request))]
    BadRequest { message: String },

    #[error("API error (HTTP {status}) from {endpoint}")]
    #[diagnostic(code(prtg::api_error))]
    ApiError { endpoint: String, status: u16 },

    #[error("Unexpected response from {endpoint}: {message}")]
    #[diagnostic(code(prtg::invalid_response))]
    InvalidResponse { endpoint: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(prtg::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("PRTG not configured: missing {field}")]
    #[diagnostic(
        code(prtg::not_configured),
        help(
            "Set it in {path}, pass --url / --api-token,\n\
             or export PRTG_URL and PRTG_API_TOKEN."
        )
    )]
    NotConfigured { field: String, path: String },

    #[error(transparent)]
    #[diagnostic(code(prtg::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(prtg::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } => exit_code::USAGE,
            Self::NotConfigured { .. } | Self::Config(_) => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<prtg_api::Error> for CliError {
    fn from(err: prtg_api::Error) -> Self {
        match err {
            prtg_api::Error::Authentication { .. } => Self::AuthFailed,
            prtg_api::Error::Timeout { endpoint, timeout } => Self::Timeout { endpoint, timeout },
            prtg_api::Error::Connection { endpoint, reason }
            | prtg_api::Error::Request { endpoint, reason } => {
                Self::ConnectionFailed { endpoint, reason }
            }
            prtg_api::Error::Http { endpoint, status } => Self::ApiError { endpoint, status },
            prtg_api::Error::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            prtg_api::Error::Tls(reason) => Self::TlsError { reason },
            prtg_api::Error::InvalidResponse { endpoint, message } => {
                Self::InvalidResponse { endpoint, message }
            }
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotConfigured { field } => Self::NotConfigured {
                field,
                path: prtg_config::config_path().display().to_string(),
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Transport(e) => e.into(),
            CoreError::AlreadyExists {
                name,
                device_id,
                device_url,
            } => Self::Conflict {
                name,
                device_id,
                device_url,
            },
            e @ CoreError::BadRequest { .. } => Self::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotConfigured { field } => Self::NotConfigured {
                field,
                path: prtg_config::config_path().display().to_string(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_keep_their_exit_codes() {
        let auth: CliError = prtg_api::Error::Authentication {
            endpoint: "/api/status.json".into(),
        }
        .into();
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let timeout: CliError = prtg_api::Error::Timeout {
            endpoint: "/api/table.json".into(),
            timeout: Duration::from_secs(30),
        }
        .into();
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let refused: CliError = CoreError::Transport(prtg_api::Error::Connection {
            endpoint: "/api/table.json".into(),
            reason: "refused".into(),
        })
        .into();
        assert_eq!(refused.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn provisioning_refusals() {
        let conflict: CliError = CoreError::AlreadyExists {
            name: "sw1".into(),
            device_id: 40,
            device_url: "https://prtg/device.htm?id=40".into(),
        }
        .into();
        assert_eq!(conflict.exit_code(), exit_code::CONFLICT);

        let bad: CliError = CoreError::BadRequest { name: "sw1".into() }.into();
        assert_eq!(bad.exit_code(), exit_code::GENERAL);
        assert_eq!(
            bad.to_string(),
            "Bad request - device may already exist or invalid parameters"
        );
    }

    #[test]
    fn missing_settings_are_config_errors() {
        let err: CliError = ConfigError::NotConfigured {
            field: "url".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::CONFIG);

        let err: CliError = ConfigError::Validation {
            field: "aggregate_cache_ttl".into(),
            reason: "out of range".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
