// Object creation endpoints
//
// `addgroup.htm` and `adddevice2.htm` are fire-and-confirm: they answer with
// an HTML page (or a redirect to one), never with the new object id. The
// caller re-queries table.json to learn whether the object exists.

use tracing::debug;

use crate::client::{CommandResponse, PrtgClient};
use crate::error::Error;
use crate::models::ObjectId;

pub const ADD_GROUP_ENDPOINT: &str = "/api/addgroup.htm";
pub const ADD_DEVICE_ENDPOINT: &str = "/api/adddevice2.htm";

/// Device template that enables sensor auto-discovery.
const AUTO_DISCOVERY_TEMPLATE: &str = "1";
/// Discovery schedule "once, immediately".
const DISCOVER_NOW: &str = "0";

/// Parameters for a new device entry.
#[derive(Debug, Clone)]
pub struct NewDevice<'a> {
    pub name: &'a str,
    /// IP address or DNS name PRTG will probe.
    pub host: &'a str,
    pub group_id: ObjectId,
    pub auto_discover: bool,
}

impl PrtgClient {
    /// Create a group under `parent_id`.
    ///
    /// `GET /api/addgroup.htm?name_={name}&id={parent}`
    pub async fn add_group(
        &self,
        name: &str,
        parent_id: ObjectId,
    ) -> Result<CommandResponse, Error> {
        let parent = parent_id.to_string();
        debug!(name, parent_id, "creating group");
        self.get_command(ADD_GROUP_ENDPOINT, &[("name_", name), ("id", &parent)])
            .await
    }

    /// Create a device under `device.group_id`.
    ///
    /// `GET /api/adddevice2.htm?name_=..&host_=..&id=..&devicetemplate_=1&discoverytype_=..&discoveryschedule_=0`
    pub async fn add_device(&self, device: &NewDevice<'_>) -> Result<CommandResponse, Error> {
        let group = device.group_id.to_string();
        let discovery = if device.auto_discover { "1" } else { "0" };
        debug!(
            name = device.name,
            host = device.host,
            group_id = device.group_id,
            "creating device"
        );
        self.get_command(
            ADD_DEVICE_ENDPOINT,
            &[
                ("name_", device.name),
                ("host_", device.host),
                ("id", &group),
                ("devicetemplate_", AUTO_DISCOVERY_TEMPLATE),
                ("discoverytype_", discovery),
                ("discoveryschedule_", DISCOVER_NOW),
            ],
        )
        .await
    }
}
