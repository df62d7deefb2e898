// ── Device resolution by name ──
//
// Inventory systems and PRTG rarely agree on naming: a device may be
// registered in PRTG under its hostname or its IP. The resolver searches
// by name, falls back to the host column, then picks the best candidate.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use prtg_api::{DeviceFilter, DeviceRow, PrtgClient};

use crate::cache::{self, Cache, keys};
use crate::model::{Device, ResolvedDevice};

/// Maximum rows requested per device search.
const SEARCH_LIMIT: u32 = 50;

/// Looks up PRTG devices by name with a read-through cache.
#[derive(Clone)]
pub struct Resolver {
    client: Arc<PrtgClient>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl Resolver {
    pub fn new(client: Arc<PrtgClient>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { client, cache, ttl }
    }

    /// Find the PRTG device for `name`.
    ///
    /// Returns `None` when nothing matches, and also when the server could
    /// not be queried (the failure is logged). A fresh result is cached
    /// under the lowercased name.
    pub async fn find_device_by_name(&self, name: &str) -> Option<ResolvedDevice> {
        let key = keys::device(name);
        if let Some(device) = cache::get_as::<Device>(self.cache.as_ref(), &key) {
            debug!(name, device_id = device.id, "device served from cache");
            return Some(ResolvedDevice {
                device,
                from_cache: true,
            });
        }

        let candidates = match self.search(name).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(name, error = %e, "PRTG device search failed");
                return None;
            }
        };

        let Some(device) = select_candidate(candidates, name) else {
            debug!(name, "device not found in PRTG");
            return None;
        };

        cache::set_as(self.cache.as_ref(), &key, &device, self.ttl);
        Some(ResolvedDevice {
            device,
            from_cache: false,
        })
    }

    /// Drop the cached entry for `name` so the next lookup hits the server.
    pub fn invalidate(&self, name: &str) {
        debug!(name, "invalidating cached device");
        self.cache.delete(&keys::device(name));
    }

    /// Name-substring search, then host-substring if that found nothing.
    async fn search(&self, name: &str) -> Result<Vec<DeviceRow>, prtg_api::Error> {
        let by_name = self
            .client
            .list_devices(DeviceFilter::NameContains(name), Some(SEARCH_LIMIT))
            .await?;
        if !by_name.is_empty() {
            return Ok(by_name);
        }

        debug!(name, "no name match, searching host field");
        self.client
            .list_devices(DeviceFilter::HostContains(name), Some(SEARCH_LIMIT))
            .await
    }
}

/// Pick one device out of the search results.
///
/// Precedence: exact name (case-insensitive), then exact host, then the
/// first row in server order. The last step is only as stable as PRTG's
/// own ordering.
fn select_candidate(candidates: Vec<DeviceRow>, name: &str) -> Option<Device> {
    let wanted = name.to_lowercase();
    let position = candidates
        .iter()
        .position(|d| d.name.to_lowercase() == wanted)
        .or_else(|| {
            candidates
                .iter()
                .position(|d| d.host.to_lowercase() == wanted)
        })
        .unwrap_or(0);

    candidates.into_iter().nth(position).map(Device::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(objid: i64, name: &str, host: &str) -> DeviceRow {
        serde_json::from_value(json!({ "objid": objid, "name": name, "host": host })).unwrap()
    }

    #[test]
    fn exact_name_beats_substring() {
        let rows = vec![row(1, "sw1-backup", "10.0.0.2"), row(2, "SW1", "10.0.0.1")];
        let picked = select_candidate(rows, "sw1").unwrap();
        assert_eq!(picked.name, "SW1");
    }

    #[test]
    fn exact_name_beats_earlier_exact_host() {
        let rows = vec![row(1, "other", "sw1"), row(2, "SW1", "10.0.0.1")];
        assert_eq!(select_candidate(rows, "SW1").unwrap().id, 2);
    }

    #[test]
    fn exact_host_when_no_name_matches() {
        let rows = vec![row(1, "edge-a", "10.0.0.10"), row(2, "edge-b", "10.0.0.1")];
        assert_eq!(select_candidate(rows, "10.0.0.1").unwrap().id, 2);
    }

    #[test]
    fn falls_back_to_first_row() {
        let rows = vec![row(7, "core-sw1-a", "x"), row(8, "core-sw1-b", "y")];
        assert_eq!(select_candidate(rows, "core-sw1").unwrap().id, 7);
    }

    #[test]
    fn empty_results_select_nothing() {
        assert!(select_candidate(Vec::new(), "anything").is_none());
    }
}
