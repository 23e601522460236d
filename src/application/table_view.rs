// Table projection - Snapshot devices to display rows
use crate::domain::device::{DeviceReading, display_value};
use crate::domain::status::{Badge, StatusFilter};

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: String,
    pub device_type: String,
    pub cpu: String,
    pub ram: String,
    pub temp: String,
    pub network_sent: String,
    pub network_received: String,
    pub status: Badge,
    pub anomaly: Badge,
}

impl TableRow {
    pub fn from_device(device: &DeviceReading) -> Self {
        Self {
            id: display_value(device.id.as_ref()),
            device_type: display_value(device.device_type.as_ref()),
            cpu: display_value(device.cpu.as_ref()),
            ram: display_value(device.ram.as_ref()),
            temp: display_value(device.temp.as_ref()),
            network_sent: display_value(device.network_sent.as_ref()),
            network_received: display_value(device.network_received.as_ref()),
            status: Badge::status(device),
            anomaly: Badge::anomaly(device),
        }
    }
}

/// Rows to draw for the current filter, in snapshot order.
pub fn render(devices: &[DeviceReading], filter: &StatusFilter) -> Vec<TableRow> {
    devices
        .iter()
        .filter(|d| filter.matches(d))
        .map(TableRow::from_device)
        .collect()
}
