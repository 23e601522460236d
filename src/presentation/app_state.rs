// Application state for exporter HTTP handlers
use crate::infrastructure::device_simulator::DeviceSimulator;
use crate::infrastructure::telemetry_metrics::TelemetryMetrics;

#[derive(Clone)]
pub struct AppState {
    pub simulator: DeviceSimulator,
    pub metrics: TelemetryMetrics,
}

impl AppState {
    pub fn new(device_count: usize) -> anyhow::Result<Self> {
        Ok(Self {
            simulator: DeviceSimulator::new(device_count),
            metrics: TelemetryMetrics::new()?,
        })
    }
}
