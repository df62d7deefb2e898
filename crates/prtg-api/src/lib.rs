// prtg-api: Async Rust client for the PRTG Network Monitor HTTP API

pub mod client;
pub mod error;
pub mod models;
pub mod objects;
pub mod system;
pub mod table;
pub mod transport;

pub use client::{CommandResponse, PrtgClient};
pub use error::Error;
pub use models::{DeviceRow, GroupRow, ObjectId, SensorRow};
pub use objects::NewDevice;
pub use table::DeviceFilter;
pub use transport::{TlsMode, TransportConfig};
