// prtg-core: PRTG device resolution, sensor aggregation and provisioning.
//
// Builds on `prtg-api`'s transport with a pluggable TTL cache. `Monitor`
// is the entry point for presentation layers; the individual components
// are public for callers that need only one of them.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod monitor;
pub mod provision;
pub mod resolver;
pub mod sensors;

pub use aggregate::Aggregator;
pub use cache::{Cache, FileCache, MemoryCache};
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use model::{
    AggregateSummary, Device, Group, ObjectId, ResolvedDevice, Sensor, StatusBucket,
    StatusSummary, classify,
};
pub use monitor::{Monitor, ServerStatus};
pub use provision::{ExportOutcome, GroupResolution, IMPORT_GROUP_NAME, Provisioner, ROOT_GROUP_ID};
pub use resolver::Resolver;
pub use sensors::SensorReader;
