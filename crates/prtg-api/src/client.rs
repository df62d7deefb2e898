// PRTG HTTP client
//
// Wraps `reqwest::Client` with PRTG URL construction, token injection and
// failure classification. Endpoint modules (table, system, objects) are
// implemented as inherent methods in separate files so this module stays
// focused on transport mechanics.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Query parameter carrying the API token on every request.
const TOKEN_PARAM: &str = "apitoken";

/// Raw answer to a fire-and-confirm call (`addgroup.htm`, `adddevice2.htm`).
///
/// These endpoints answer with HTML or a redirect rather than JSON, so the
/// only structured signal is the HTTP status.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP client for a single PRTG core server.
///
/// Every request is a GET authenticated by the `apitoken` query parameter.
/// Failures never escape as panics: they come back as a tagged [`Error`]
/// which has already been logged.
pub struct PrtgClient {
    http: reqwest::Client,
    base_url: Url,
    api_token: SecretString,
    timeout: Duration,
}

impl PrtgClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the PRTG web root, e.g. `https://prtg.example.com`.
    /// A path prefix (reverse proxy) is preserved.
    pub fn new(
        base_url: Url,
        api_token: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            api_token,
            timeout: transport.timeout,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// `timeout` should match the one the client was built with; it is only
    /// used for error reporting.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        api_token: SecretString,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url,
            api_token,
            timeout,
        }
    }

    /// Base URL as a string with no trailing slash.
    pub fn base_url_str(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Link to a device page in the PRTG web interface.
    pub fn device_url(&self, device_id: i64) -> String {
        format!("{}/device.htm?id={device_id}", self.base_url_str())
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the full URL for an API path such as `/api/table.json`.
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url, Error> {
        let path = endpoint.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{path}", self.base_url_str()))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET an endpoint and parse the JSON body into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, Error> {
        let resp = self.send(endpoint, params).await?;
        let body = resp
            .text()
            .await
            .map_err(|e| self.request_error(endpoint, &e))
            .map_err(|e| log_failure(e, endpoint))?;

        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..preview_len(&body)];
            log_failure(
                Error::InvalidResponse {
                    endpoint: endpoint.to_owned(),
                    message: format!("{e} (body preview: {preview:?})"),
                },
                endpoint,
            )
        })
    }

    /// GET an endpoint and return the loosely-typed JSON body.
    pub async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, Error> {
        self.get(endpoint, params).await
    }

    /// GET a command endpoint whose answer is not JSON.
    ///
    /// Success is only the HTTP status; the caller confirms the effect with
    /// a follow-up query.
    pub async fn get_command(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<CommandResponse, Error> {
        let resp = self.send(endpoint, params).await?;
        let status = resp.status().as_u16();
        // The body is informational only; an unreadable one is not a failure.
        let body = resp.text().await.unwrap_or_default();
        Ok(CommandResponse { status, body })
    }

    /// Issue the request and reject non-success statuses.
    async fn send(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<reqwest::Response, Error> {
        let url = self
            .endpoint_url(endpoint)
            .map_err(|e| log_failure(e, endpoint))?;
        debug!(%url, ?params, "GET");

        let resp = self
            .http
            .get(url)
            .query(params)
            .query(&[(TOKEN_PARAM, self.api_token.expose_secret())])
            .send()
            .await
            .map_err(|e| self.request_error(endpoint, &e))
            .map_err(|e| log_failure(e, endpoint))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(log_failure(
                Error::Authentication {
                    endpoint: endpoint.to_owned(),
                },
                endpoint,
            ));
        }
        if !status.is_success() {
            return Err(log_failure(
                Error::Http {
                    endpoint: endpoint.to_owned(),
                    status: status.as_u16(),
                },
                endpoint,
            ));
        }

        Ok(resp)
    }

    /// Classify a `reqwest` failure into our tagged variants.
    fn request_error(&self, endpoint: &str, err: &reqwest::Error) -> Error {
        let endpoint = endpoint.to_owned();
        if err.is_timeout() {
            Error::Timeout {
                endpoint,
                timeout: self.timeout,
            }
        } else if err.is_connect() {
            Error::Connection {
                endpoint,
                reason: err.to_string(),
            }
        } else if err.is_decode() {
            Error::InvalidResponse {
                endpoint,
                message: err.to_string(),
            }
        } else {
            Error::Request {
                endpoint,
                reason: err.to_string(),
            }
        }
    }
}

/// Log a classified failure once, where it happened, and hand it back.
fn log_failure(err: Error, endpoint: &str) -> Error {
    match &err {
        Error::Timeout { timeout, .. } => {
            error!(endpoint, ?timeout, "PRTG API request timed out");
        }
        Error::Authentication { .. } => {
            error!(endpoint, "PRTG API authentication failed - check API token");
        }
        Error::Connection { reason, .. } => {
            error!(endpoint, %reason, "PRTG API connection error");
        }
        Error::Http { status, .. } => error!(endpoint, status, "PRTG API HTTP error"),
        Error::InvalidResponse { message, .. } => {
            error!(endpoint, %message, "PRTG API invalid JSON response");
        }
        other => error!(endpoint, error = %other, "PRTG API request failed"),
    }
    err
}

/// Byte length of at most 200 chars of `body`, on a char boundary.
fn preview_len(body: &str) -> usize {
    body.char_indices().nth(200).map_or(body.len(), |(i, _)| i)
}
