// ── Monitor facade ──
//
// One `Monitor` per PRTG server. Wires the transport, cache and components
// together and exposes the operations a page, widget or CLI renders.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use prtg_api::PrtgClient;

use crate::aggregate::Aggregator;
use crate::cache::{Cache, MemoryCache};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{AggregateSummary, ObjectId, ResolvedDevice, Sensor, StatusSummary};
use crate::provision::{ExportOutcome, Provisioner};
use crate::resolver::Resolver;
use crate::sensors::SensorReader;

/// Result of a connection test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerStatus {
    pub version: String,
    pub message: String,
}

pub struct Monitor {
    client: Arc<PrtgClient>,
    resolver: Resolver,
    sensors: SensorReader,
    aggregator: Aggregator,
    provisioner: Provisioner,
    aggregate_ttl: Duration,
}

impl Monitor {
    /// Build a monitor with a private in-memory cache.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        Self::with_cache(config, Arc::new(MemoryCache::new()))
    }

    /// Build a monitor on a shared cache.
    pub fn with_cache(config: &ClientConfig, cache: Arc<dyn Cache>) -> Result<Self, CoreError> {
        let client = PrtgClient::new(
            config.url.clone(),
            config.api_token.clone(),
            &config.transport(),
        )?;
        debug!(url = %config.url, "PRTG monitor ready");
        Ok(Self::from_parts(
            Arc::new(client),
            cache,
            config.cache_ttl,
            config.aggregate_cache_ttl,
        ))
    }

    /// Assemble from an existing client.
    pub fn from_parts(
        client: Arc<PrtgClient>,
        cache: Arc<dyn Cache>,
        cache_ttl: Duration,
        aggregate_ttl: Duration,
    ) -> Self {
        let resolver = Resolver::new(Arc::clone(&client), Arc::clone(&cache), cache_ttl);
        let sensors = SensorReader::new(Arc::clone(&client), Arc::clone(&cache), cache_ttl);
        let aggregator = Aggregator::new(sensors.clone(), Arc::clone(&client), cache);
        let provisioner = Provisioner::new(Arc::clone(&client), resolver.clone());
        Self {
            client,
            resolver,
            sensors,
            aggregator,
            provisioner,
            aggregate_ttl,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn base_url(&self) -> &str {
        self.client.base_url_str()
    }

    pub fn device_url(&self, device_id: ObjectId) -> String {
        self.client.device_url(device_id)
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Check the server answers and report its version.
    pub async fn test_connection(&self) -> Result<ServerStatus, CoreError> {
        let status = self.client.get_status().await?;
        let version = status
            .get("Version")
            .or_else(|| status.get("version"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("Unknown")
            .to_owned();
        Ok(ServerStatus {
            message: format!("Connected to PRTG {version}"),
            version,
        })
    }

    /// Resolve a device by name (or IP/hostname).
    pub async fn find_device(&self, name: &str) -> Option<ResolvedDevice> {
        self.resolver.find_device_by_name(name).await
    }

    /// Use a PRTG device id known from elsewhere; no lookup, no caching.
    pub fn device_by_id(&self, device_id: ObjectId, name: &str) -> ResolvedDevice {
        ResolvedDevice::direct(device_id, name)
    }

    pub async fn sensors(&self, device_id: ObjectId) -> Vec<Sensor> {
        self.sensors.get_sensors(device_id).await
    }

    pub async fn device_summary(&self, device_id: ObjectId) -> StatusSummary {
        self.aggregator.summarize(device_id).await
    }

    /// System-wide summary with the configured aggregate TTL.
    pub async fn aggregate_summary(&self) -> Result<AggregateSummary, CoreError> {
        self.aggregator.summarize_all(self.aggregate_ttl).await
    }

    /// System-wide summary with a caller-chosen TTL.
    pub async fn aggregate_summary_with_ttl(
        &self,
        ttl: Duration,
    ) -> Result<AggregateSummary, CoreError> {
        self.aggregator.summarize_all(ttl).await
    }

    pub async fn export_device(&self, name: &str, host: &str) -> Result<ExportOutcome, CoreError> {
        self.provisioner.export_device(name, host).await
    }
}
