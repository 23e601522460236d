// Prometheus gauges for the simulated fleet
use crate::infrastructure::device_simulator::FleetSnapshot;
use anyhow::Result;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

const DEVICE_LABELS: [&str; 2] = ["device_id", "type"];

#[derive(Clone)]
pub struct TelemetryMetrics {
    cpu: GaugeVec,
    ram: GaugeVec,
    temp: GaugeVec,
    network_sent: GaugeVec,
    network_received: GaugeVec,
    anomaly: GaugeVec,
    registry: Arc<Registry>,
}

impl TelemetryMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let cpu = device_gauge(
            &registry,
            "edge_device_cpu_usage_percent",
            "CPU usage of edge device",
        )?;
        let ram = device_gauge(
            &registry,
            "edge_device_ram_usage_percent",
            "RAM usage of edge device",
        )?;
        let temp = device_gauge(
            &registry,
            "edge_device_temperature_celsius",
            "Temperature of edge device",
        )?;
        let network_sent = device_gauge(
            &registry,
            "edge_device_network_sent_bytes",
            "Network bytes sent",
        )?;
        let network_received = device_gauge(
            &registry,
            "edge_device_network_received_bytes",
            "Network bytes received",
        )?;
        let anomaly = device_gauge(
            &registry,
            "edge_device_anomaly_flag",
            "1 if anomaly, 0 otherwise",
        )?;

        Ok(Self {
            cpu,
            ram,
            temp,
            network_sent,
            network_received,
            anomaly,
            registry: Arc::new(registry),
        })
    }

    pub fn observe(&self, fleet: &FleetSnapshot) {
        for device in &fleet.devices {
            let labels = [device.id.as_str(), device.device_type.as_str()];
            self.cpu.with_label_values(&labels).set(device.cpu);
            self.ram.with_label_values(&labels).set(device.ram);
            self.temp.with_label_values(&labels).set(device.temp);
            self.network_sent
                .with_label_values(&labels)
                .set(device.network_sent);
            self.network_received
                .with_label_values(&labels)
                .set(device.network_received);
            self.anomaly
                .with_label_values(&labels)
                .set(if device.is_anomaly() { 1.0 } else { 0.0 });
        }
    }

    /// Prometheus text exposition of every registered gauge.
    pub fn encode(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

fn device_gauge(registry: &Registry, name: &str, help: &str) -> prometheus::Result<GaugeVec> {
    let gauge = GaugeVec::new(Opts::new(name, help), &DEVICE_LABELS)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}
