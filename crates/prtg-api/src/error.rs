use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the `prtg-api` crate.
///
/// Every failure of a PRTG HTTP call is classified into one of these
/// variants at the point the request is made. `prtg-core` decides which
/// of them degrade to "not found" and which reach the caller.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The server rejected the API token (HTTP 401).
    #[error("Authentication failed - check API token")]
    Authentication { endpoint: String },

    // ── Transport ───────────────────────────────────────────────────
    /// Request did not complete within the configured timeout.
    #[error("Request timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },

    /// DNS failure, refused connection, TLS handshake failure, etc.
    #[error("Connection failed: {reason}")]
    Connection { endpoint: String, reason: String },

    /// Any other failure raised by the HTTP stack.
    #[error("Request failed: {reason}")]
    Request { endpoint: String, reason: String },

    /// Non-success HTTP status other than 401.
    #[error("HTTP error {status} from {endpoint}")]
    Http { endpoint: String, status: u16 },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to build the underlying HTTP client (CA file, TLS backend).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// Body was not valid JSON, or not the shape we expected.
    #[error("Invalid response from PRTG: {message}")]
    InvalidResponse { endpoint: String, message: String },
}

impl Error {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for HTTP 400. PRTG answers creation calls with 400
    /// when the object already exists or a parameter is rejected.
    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }
}
