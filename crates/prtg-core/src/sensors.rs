// ── Per-device sensor listing ──

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use prtg_api::PrtgClient;

use crate::cache::{self, Cache, keys};
use crate::model::{ObjectId, Sensor};

/// Fetches the sensors of one device with a read-through cache.
#[derive(Clone)]
pub struct SensorReader {
    client: Arc<PrtgClient>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl SensorReader {
    pub fn new(client: Arc<PrtgClient>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { client, cache, ttl }
    }

    /// All sensors under `device_id`.
    ///
    /// A failed fetch is logged and yields an empty list, which is not
    /// cached.
    pub async fn get_sensors(&self, device_id: ObjectId) -> Vec<Sensor> {
        let key = keys::sensors(device_id);
        if let Some(sensors) = cache::get_as::<Vec<Sensor>>(self.cache.as_ref(), &key) {
            debug!(device_id, count = sensors.len(), "sensors served from cache");
            return sensors;
        }

        match self.client.list_sensors(Some(device_id)).await {
            Ok(rows) => {
                let sensors: Vec<Sensor> = rows.into_iter().map(Sensor::from).collect();
                cache::set_as(self.cache.as_ref(), &key, &sensors, self.ttl);
                sensors
            }
            Err(e) => {
                warn!(device_id, error = %e, "failed to get sensors for device");
                Vec::new()
            }
        }
    }
}
