// table.json queries
//
// Devices, sensors and groups are all read through the same tabular
// endpoint, selected by `content=` and narrowed with `filter_*` parameters.

use tracing::debug;

use crate::client::PrtgClient;
use crate::error::Error;
use crate::models::{DeviceRow, DeviceTable, GroupRow, GroupTable, ObjectId, SensorRow, SensorTable};

pub const TABLE_ENDPOINT: &str = "/api/table.json";

const DEVICE_COLUMNS: &str = "objid,name,host,status,message,group";
const SENSOR_COLUMNS: &str = "objid,name,status,lastvalue,message,priority,type";
const GROUP_COLUMNS: &str = "objid,name,group";

/// Which device column to narrow a listing on.
#[derive(Debug, Clone, Copy)]
pub enum DeviceFilter<'a> {
    /// Substring match on the device name.
    NameContains(&'a str),
    /// Substring match on the host (IP or DNS name) field.
    HostContains(&'a str),
}

/// PRTG's substring filter syntax.
fn substring(term: &str) -> String {
    format!("@sub({term})")
}

/// `count` parameter: a row limit, or `*` for everything.
fn count_param(limit: Option<u32>) -> String {
    limit.map_or_else(|| "*".to_owned(), |n| n.to_string())
}

impl PrtgClient {
    /// List devices.
    ///
    /// `GET /api/table.json?content=devices&filter_name=@sub(...)`
    ///
    /// Rows come back in server order; callers must not assume more.
    pub async fn list_devices(
        &self,
        filter: DeviceFilter<'_>,
        limit: Option<u32>,
    ) -> Result<Vec<DeviceRow>, Error> {
        let count = count_param(limit);
        let mut params = vec![
            ("content", "devices".to_owned()),
            ("columns", DEVICE_COLUMNS.to_owned()),
            ("count", count),
        ];
        match filter {
            DeviceFilter::NameContains(term) => params.push(("filter_name", substring(term))),
            DeviceFilter::HostContains(term) => params.push(("filter_host", substring(term))),
        }
        debug!(?filter, "listing devices");

        let table: DeviceTable = self.get(TABLE_ENDPOINT, &borrowed(&params)).await?;
        Ok(table.devices)
    }

    /// List sensors, either for one parent device or across the whole server.
    ///
    /// `GET /api/table.json?content=sensors&filter_parentid={id}&count=*`
    pub async fn list_sensors(&self, parent: Option<ObjectId>) -> Result<Vec<SensorRow>, Error> {
        let mut params = vec![
            ("content", "sensors".to_owned()),
            ("columns", SENSOR_COLUMNS.to_owned()),
            ("count", count_param(None)),
        ];
        if let Some(id) = parent {
            params.push(("filter_parentid", id.to_string()));
        }
        debug!(?parent, "listing sensors");

        let table: SensorTable = self.get(TABLE_ENDPOINT, &borrowed(&params)).await?;
        Ok(table.sensors)
    }

    /// List groups whose name matches `name`.
    ///
    /// `GET /api/table.json?content=groups&filter_name={name}&count=50`
    ///
    /// PRTG's name filter is not case-sensitive on every version, so the
    /// caller still has to pick the exact match.
    pub async fn find_groups(&self, name: &str) -> Result<Vec<GroupRow>, Error> {
        let params = [
            ("content", "groups"),
            ("columns", GROUP_COLUMNS),
            ("filter_name", name),
            ("count", "50"),
        ];
        debug!(name, "searching groups");

        let table: GroupTable = self.get(TABLE_ENDPOINT, &params).await?;
        Ok(table.groups)
    }
}

fn borrowed<'a>(params: &'a [(&'a str, String)]) -> Vec<(&'a str, &'a str)> {
    params.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_filter_syntax() {
        assert_eq!(substring("core-sw1"), "@sub(core-sw1)");
    }

    #[test]
    fn count_defaults_to_unbounded() {
        assert_eq!(count_param(None), "*");
        assert_eq!(count_param(Some(50)), "50");
    }
}
