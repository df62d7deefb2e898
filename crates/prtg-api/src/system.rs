// Server status endpoint

use tracing::debug;

use crate::client::PrtgClient;
use crate::error::Error;

pub const STATUS_ENDPOINT: &str = "/api/status.json";

impl PrtgClient {
    /// Get server status.
    ///
    /// `GET /api/status.json`
    ///
    /// Returns loosely-typed JSON because the field set (and even the case
    /// of `Version`) varies between PRTG releases.
    pub async fn get_status(&self) -> Result<serde_json::Value, Error> {
        debug!("fetching server status");
        self.get_json(STATUS_ENDPOINT, &[]).await
    }
}
