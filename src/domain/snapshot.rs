// Telemetry snapshot domain model
use super::device::DeviceReading;
use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer};

/// One complete telemetry pull covering all devices at one instant.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    /// Epoch seconds as reported by the endpoint.
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub devices: Vec<DeviceReading>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DeviceReading>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DeviceReading>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Snapshot {
    pub fn new(timestamp: Option<f64>, devices: Vec<DeviceReading>) -> Self {
        Self { timestamp, devices }
    }

    /// The device that feeds the rolling charts.
    pub fn representative(&self) -> Option<&DeviceReading> {
        self.devices.first()
    }

    /// Local wall-clock time of the snapshot, formatted for "last updated".
    pub fn last_updated_label(&self) -> Option<String> {
        let timestamp = self.timestamp.filter(|t| t.is_finite())?;
        let secs = timestamp.floor() as i64;
        let nanos = ((timestamp - timestamp.floor()) * 1e9) as u32;
        let utc = DateTime::from_timestamp(secs, nanos)?;
        Some(utc.with_timezone(&Local).format("%H:%M:%S").to_string())
    }
}
