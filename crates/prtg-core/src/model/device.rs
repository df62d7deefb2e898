use serde::{Deserialize, Serialize};

use prtg_api::{DeviceRow, GroupRow};

use super::ObjectId;

/// A device as PRTG knows it.
///
/// Identity is `id`. `name` is only a lookup handle and PRTG does not
/// enforce uniqueness on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: ObjectId,
    pub name: String,
    /// IP address or DNS name PRTG probes.
    pub host: String,
    pub status: String,
    pub message: String,
    /// Name of the parent group.
    pub group: String,
}

impl From<DeviceRow> for Device {
    fn from(row: DeviceRow) -> Self {
        Self {
            id: row.objid,
            name: row.name,
            host: row.host,
            status: row.status,
            message: row.message,
            group: row.group,
        }
    }
}

/// A device plus where the answer came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDevice {
    #[serde(flatten)]
    pub device: Device,
    /// `true` when served from the cache without a network call.
    pub from_cache: bool,
}

impl ResolvedDevice {
    /// A device whose id was supplied directly by the caller (e.g. an
    /// inventory field), so no lookup ran. Never cached.
    pub fn direct(id: ObjectId, name: &str) -> Self {
        Self {
            device: Device {
                id,
                name: name.to_owned(),
                host: String::new(),
                status: String::new(),
                message: String::new(),
                group: String::new(),
            },
            from_cache: false,
        }
    }
}

/// A PRTG group (folder of devices).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: ObjectId,
    pub name: String,
    /// Name of the parent group.
    pub parent: String,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Self {
            id: row.objid,
            name: row.name,
            parent: row.group,
        }
    }
}
