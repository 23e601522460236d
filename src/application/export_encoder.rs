// CSV export of the latest snapshot
use crate::domain::device::{DeviceReading, export_value};
use thiserror::Error;

pub const EXPORT_HEADER: [&str; 9] = [
    "id",
    "type",
    "cpu",
    "ram",
    "temp",
    "network_sent",
    "network_received",
    "status",
    "anomaly",
];

/// Export was requested before any device data was available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no snapshot data to export")]
pub struct NoData;

/// Flat, unquoted CSV of every device. Commas inside values are dropped.
pub fn encode(devices: &[DeviceReading]) -> Result<String, NoData> {
    if devices.is_empty() {
        return Err(NoData);
    }

    let mut lines = Vec::with_capacity(devices.len() + 1);
    lines.push(EXPORT_HEADER.join(","));

    for device in devices {
        let cells: Vec<String> = EXPORT_HEADER
            .iter()
            .map(|name| export_value(device.field(name)))
            .collect();
        lines.push(cells.join(","));
    }

    Ok(lines.join("\n"))
}
