// ── Status summaries ──
//
// Per-device summaries ride on the sensor reader's cache and never fail.
// The system-wide summary is one unfiltered sensor listing, expensive on
// large installs, so it has its own cache entry and TTL, and it reports
// transport failures instead of pretending the server has no sensors.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use prtg_api::PrtgClient;

use crate::cache::{self, Cache, keys};
use crate::error::CoreError;
use crate::model::{AggregateSummary, ObjectId, Sensor, StatusSummary};
use crate::sensors::SensorReader;

#[derive(Clone)]
pub struct Aggregator {
    sensors: SensorReader,
    client: Arc<PrtgClient>,
    cache: Arc<dyn Cache>,
}

impl Aggregator {
    pub fn new(sensors: SensorReader, client: Arc<PrtgClient>, cache: Arc<dyn Cache>) -> Self {
        Self {
            sensors,
            client,
            cache,
        }
    }

    /// Bucket counts for one device. An unreachable server reads as a
    /// device with no sensors.
    pub async fn summarize(&self, device_id: ObjectId) -> StatusSummary {
        let sensors = self.sensors.get_sensors(device_id).await;
        StatusSummary::from_sensors(&sensors)
    }

    /// Bucket counts across every sensor on the server, cached for `ttl`.
    pub async fn summarize_all(&self, ttl: Duration) -> Result<AggregateSummary, CoreError> {
        if let Some(summary) =
            cache::get_as::<StatusSummary>(self.cache.as_ref(), keys::AGGREGATE_SUMMARY)
        {
            debug!(total = summary.total, "aggregate summary served from cache");
            return Ok(AggregateSummary {
                summary,
                from_cache: true,
            });
        }

        let sensors: Vec<Sensor> = self
            .client
            .list_sensors(None)
            .await?
            .into_iter()
            .map(Sensor::from)
            .collect();
        let summary = StatusSummary::from_sensors(&sensors);
        debug!(total = summary.total, "computed aggregate summary");

        cache::set_as(self.cache.as_ref(), keys::AGGREGATE_SUMMARY, &summary, ttl);
        Ok(AggregateSummary {
            summary,
            from_cache: false,
        })
    }
}
