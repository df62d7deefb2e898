use serde::{Deserialize, Serialize};

use super::sensor::{Sensor, StatusBucket};

/// Sensor counts per status bucket at one point in time.
///
/// The six buckets partition the counted sensors, so their sum is `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub up: u32,
    pub warning: u32,
    pub down: u32,
    pub paused: u32,
    pub unusual: u32,
    pub unknown: u32,
    pub total: u32,
}

impl StatusSummary {
    /// Tally a set of sensors.
    pub fn from_sensors<'a>(sensors: impl IntoIterator<Item = &'a Sensor>) -> Self {
        sensors
            .into_iter()
            .map(Sensor::bucket)
            .fold(Self::default(), |mut summary, bucket| {
                summary.record(bucket);
                summary
            })
    }

    /// Count one sensor in `bucket`.
    pub fn record(&mut self, bucket: StatusBucket) {
        *self.slot(bucket) += 1;
        self.total += 1;
    }

    pub fn count(&self, bucket: StatusBucket) -> u32 {
        match bucket {
            StatusBucket::Up => self.up,
            StatusBucket::Warning => self.warning,
            StatusBucket::Down => self.down,
            StatusBucket::Paused => self.paused,
            StatusBucket::Unusual => self.unusual,
            StatusBucket::Unknown => self.unknown,
        }
    }

    fn slot(&mut self, bucket: StatusBucket) -> &mut u32 {
        match bucket {
            StatusBucket::Up => &mut self.up,
            StatusBucket::Warning => &mut self.warning,
            StatusBucket::Down => &mut self.down,
            StatusBucket::Paused => &mut self.paused,
            StatusBucket::Unusual => &mut self.unusual,
            StatusBucket::Unknown => &mut self.unknown,
        }
    }
}

/// System-wide summary plus where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    #[serde(flatten)]
    pub summary: StatusSummary,
    /// `true` when served from the cache without a network call.
    pub from_cache: bool,
}
