// ── Core error types ──
//
// "Not found" is not an error here: lookups return `Option`. What remains
// is configuration trouble, transport failures the caller must see, and
// the two provisioning refusals.

use thiserror::Error;

use crate::model::ObjectId;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("PRTG not configured: missing {field}")]
    NotConfigured { field: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Transport errors (tag preserved) ─────────────────────────────
    #[error(transparent)]
    Transport(#[from] prtg_api::Error),

    // ── Provisioning errors ──────────────────────────────────────────
    #[error("Device '{name}' already exists in PRTG")]
    AlreadyExists {
        name: String,
        device_id: ObjectId,
        device_url: String,
    },

    #[error("Bad request - device may already exist or invalid parameters")]
    BadRequest { name: String },
}

impl CoreError {
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }

    /// The underlying transport error, if this is one.
    pub fn transport(&self) -> Option<&prtg_api::Error> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}
