use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use prtg_api::SensorRow;

use super::ObjectId;

/// Status bucket used for aggregate counts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatusBucket {
    Up,
    Warning,
    Down,
    Paused,
    Unusual,
    Unknown,
}

impl StatusBucket {
    /// Human label, e.g. `"Warning"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Warning => "Warning",
            Self::Down => "Down",
            Self::Paused => "Paused",
            Self::Unusual => "Unusual",
            Self::Unknown => "Unknown",
        }
    }
}

/// Map a sensor's display status and numeric status code to a bucket.
///
/// First match wins, checking the lowercased string for a keyword or the
/// code against its set:
///
/// | bucket  | keyword   | codes           |
/// |---------|-----------|-----------------|
/// | up      | "up"      | 3               |
/// | warning | "warning" | 4               |
/// | down    | "down"    | 5               |
/// | paused  | "paused"  | 7, 8, 9, 11, 12 |
/// | unusual | "unusual" | 10              |
///
/// Anything else is `Unknown`.
pub fn classify(status: &str, status_code: Option<i64>) -> StatusBucket {
    let status = status.to_lowercase();
    let code = status_code.unwrap_or(0);

    if status.contains("up") || code == 3 {
        StatusBucket::Up
    } else if status.contains("warning") || code == 4 {
        StatusBucket::Warning
    } else if status.contains("down") || code == 5 {
        StatusBucket::Down
    } else if status.contains("paused") || matches!(code, 7..=9 | 11 | 12) {
        StatusBucket::Paused
    } else if status.contains("unusual") || code == 10 {
        StatusBucket::Unusual
    } else {
        StatusBucket::Unknown
    }
}

/// A single monitored check attached to a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: ObjectId,
    pub name: String,
    /// Display status, e.g. `"Down (Acknowledged)"`.
    pub status: String,
    /// PRTG's numeric status (`status_raw`).
    pub status_code: Option<i64>,
    pub last_value: String,
    pub message: String,
    pub priority: String,
    pub sensor_type: String,
}

impl Sensor {
    pub fn bucket(&self) -> StatusBucket {
        classify(&self.status, self.status_code)
    }
}

impl From<SensorRow> for Sensor {
    fn from(row: SensorRow) -> Self {
        Self {
            id: row.objid,
            name: row.name,
            status: row.status,
            status_code: row.status_raw,
            last_value: row.lastvalue,
            message: row.message,
            priority: row.priority,
            sensor_type: row.sensor_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn display_strings_classify() {
        assert_eq!(classify("Up", None), StatusBucket::Up);
        assert_eq!(classify("Warning", None), StatusBucket::Warning);
        assert_eq!(classify("Down (Acknowledged)", None), StatusBucket::Down);
        assert_eq!(classify("Paused (paused by parent)", None), StatusBucket::Paused);
        assert_eq!(classify("Unusual", None), StatusBucket::Unusual);
        assert_eq!(classify("Unknown", None), StatusBucket::Unknown);
    }

    #[test]
    fn numeric_codes_classify() {
        let cases = [
            (3, StatusBucket::Up),
            (4, StatusBucket::Warning),
            (5, StatusBucket::Down),
            (7, StatusBucket::Paused),
            (8, StatusBucket::Paused),
            (9, StatusBucket::Paused),
            (10, StatusBucket::Unusual),
            (11, StatusBucket::Paused),
            (12, StatusBucket::Paused),
            (1, StatusBucket::Unknown),
            (6, StatusBucket::Unknown),
            (13, StatusBucket::Unknown),
        ];
        for (code, expected) in cases {
            assert_eq!(classify("", Some(code)), expected, "code {code}");
        }
    }

    #[test]
    fn string_wins_over_later_code() {
        // "down" is checked before the paused code set.
        assert_eq!(classify("Down", Some(7)), StatusBucket::Down);
        // but an earlier code beats a later keyword
        assert_eq!(classify("Paused", Some(3)), StatusBucket::Up);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("WARNING", None), StatusBucket::Warning);
        assert_eq!(classify("dOwN", None), StatusBucket::Down);
    }

    #[test]
    fn bucket_names_are_lowercase() {
        let names: Vec<String> = StatusBucket::iter().map(|b| b.to_string()).collect();
        assert_eq!(names, ["up", "warning", "down", "paused", "unusual", "unknown"]);
        assert_eq!(StatusBucket::Unusual.as_ref(), "unusual");
        assert_eq!(StatusBucket::Unusual.label(), "Unusual");
    }
}
