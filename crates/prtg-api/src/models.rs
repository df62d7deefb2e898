// PRTG table.json response types
//
// `table.json` returns `{ "prtg-version": "...", "treesize": N, "<content>": [...] }`
// where `<content>` is the requested object kind. Column values are not
// consistently typed across PRTG versions (numbers arrive as strings and
// vice versa), so every column goes through a lenient deserializer.

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned PRTG object id (`objid`).
pub type ObjectId = i64;

// ── Table envelopes ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DeviceTable {
    #[serde(default)]
    pub devices: Vec<DeviceRow>,
}

#[derive(Debug, Deserialize)]
pub struct SensorTable {
    #[serde(default)]
    pub sensors: Vec<SensorRow>,
}

#[derive(Debug, Deserialize)]
pub struct GroupTable {
    #[serde(default)]
    pub groups: Vec<GroupRow>,
}

// ── Rows ─────────────────────────────────────────────────────────────

/// One row of `content=devices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRow {
    #[serde(deserialize_with = "lenient::object_id")]
    pub objid: ObjectId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub host: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub group: String,
    /// Catch-all for `*_raw` companions and any extra columns.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One row of `content=sensors`.
///
/// Requesting the `status` column makes PRTG add `status_raw`, the numeric
/// status code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorRow {
    #[serde(deserialize_with = "lenient::object_id")]
    pub objid: ObjectId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::optional_int")]
    pub status_raw: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub lastvalue: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub priority: String,
    #[serde(default, rename = "type", deserialize_with = "lenient::string")]
    pub sensor_type: String,
}

/// One row of `content=groups`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRow {
    #[serde(deserialize_with = "lenient::object_id")]
    pub objid: ObjectId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// Name of the parent group.
    #[serde(default, deserialize_with = "lenient::string")]
    pub group: String,
}

// ── Lenient column decoding ──────────────────────────────────────────

mod lenient {
    use super::{Deserialize, Deserializer, ObjectId};
    use serde::de::Error as _;
    use serde_json::Value;

    /// Any scalar as a string; `null` becomes empty.
    pub(super) fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Integer from a number or a numeric string; anything else is `None`.
    pub(super) fn optional_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(as_int(&Value::deserialize(d)?))
    }

    pub(super) fn object_id<'de, D: Deserializer<'de>>(d: D) -> Result<ObjectId, D::Error> {
        let value = Value::deserialize(d)?;
        as_int(&value).ok_or_else(|| D::Error::custom(format!("invalid objid: {value}")))
    }

    fn as_int(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
