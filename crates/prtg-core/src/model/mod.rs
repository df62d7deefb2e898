// ── Domain model ──
//
// Wire rows from `prtg-api` are converted into these types at the
// component boundary. Everything here is serde-serializable so it can sit
// in the cache and be rendered as JSON by presentation layers.

mod device;
mod sensor;
mod summary;

pub use device::{Device, Group, ResolvedDevice};
pub use prtg_api::ObjectId;
pub use sensor::{Sensor, StatusBucket, classify};
pub use summary::{AggregateSummary, StatusSummary};
