// Simulated edge device fleet served by the exporter
use crate::domain::status::{ANOMALY_FLAGGED, ANOMALY_NORMAL, STATUS_HIGH_LOAD, STATUS_ONLINE};
use rand::Rng;
use serde::Serialize;

const DEVICE_TYPES: [&str; 4] = ["gateway", "sensor", "camera", "controller"];
const BASE_NETWORK_SENT: f64 = 3_440_000.0;
const BASE_NETWORK_RECEIVED: f64 = 29_800_000.0;
const NETWORK_JITTER: f64 = 300_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedDevice {
    pub id: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub cpu: f64,
    pub ram: f64,
    pub temp: f64,
    pub network_sent: f64,
    pub network_received: f64,
    pub status: String,
    pub anomaly: String,
}

impl SimulatedDevice {
    pub fn is_anomaly(&self) -> bool {
        self.anomaly == ANOMALY_FLAGGED
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FleetSnapshot {
    pub devices: Vec<SimulatedDevice>,
    pub timestamp: i64,
}

#[derive(Debug, Clone)]
pub struct DeviceSimulator {
    device_count: usize,
}

impl DeviceSimulator {
    pub fn new(device_count: usize) -> Self {
        Self { device_count }
    }

    pub fn generate(&self) -> FleetSnapshot {
        self.generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> FleetSnapshot {
        let devices = (1..=self.device_count)
            .map(|i| simulate_device(i, &mut *rng))
            .collect();

        FleetSnapshot {
            devices,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

fn simulate_device<R: Rng + ?Sized>(index: usize, rng: &mut R) -> SimulatedDevice {
    let cpu = round2(rng.gen_range(5.0..=95.0));
    let ram = round2(rng.gen_range(5.0..=95.0));
    let temp = round2(rng.gen_range(30.0..=85.0));
    let network_sent = round2(BASE_NETWORK_SENT + rng.gen_range(-NETWORK_JITTER..=NETWORK_JITTER));
    let network_received =
        round2(BASE_NETWORK_RECEIVED + rng.gen_range(-NETWORK_JITTER..=NETWORK_JITTER));

    let high_load = is_high_load(cpu, ram, temp);

    SimulatedDevice {
        id: format!("edge-device-{}", index),
        device_type: DEVICE_TYPES[index % DEVICE_TYPES.len()].to_string(),
        cpu,
        ram,
        temp,
        network_sent,
        network_received,
        status: (if high_load { STATUS_HIGH_LOAD } else { STATUS_ONLINE }).to_string(),
        anomaly: (if high_load { ANOMALY_FLAGGED } else { ANOMALY_NORMAL }).to_string(),
    }
}

pub fn is_high_load(cpu: f64, ram: f64, temp: f64) -> bool {
    cpu > 80.0 || ram > 85.0 || temp > 75.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::Snapshot;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fleet_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let fleet = DeviceSimulator::new(5).generate_with(&mut rng);

        assert_eq!(fleet.devices.len(), 5);
        assert_eq!(fleet.devices[0].id, "edge-device-1");
        assert_eq!(fleet.devices[0].device_type, "sensor");
        assert_eq!(fleet.devices[3].device_type, "gateway");
        assert!(fleet.timestamp > 0);
    }

    #[test]
    fn test_values_stay_in_range_and_status_follows_load() {
        let mut rng = StdRng::seed_from_u64(42);
        let simulator = DeviceSimulator::new(20);

        for _ in 0..50 {
            for device in simulator.generate_with(&mut rng).devices {
                assert!((5.0..=95.0).contains(&device.cpu));
                assert!((5.0..=95.0).contains(&device.ram));
                assert!((30.0..=85.0).contains(&device.temp));
                assert!((3_140_000.0..=3_740_000.0).contains(&device.network_sent));
                assert!((29_500_000.0..=30_100_000.0).contains(&device.network_received));

                let high = is_high_load(device.cpu, device.ram, device.temp);
                assert_eq!(device.status == "High Load", high);
                assert_eq!(device.is_anomaly(), high);
            }
        }
    }

    #[test]
    fn test_payload_round_trips_into_dashboard_snapshot() {
        let mut rng = StdRng::seed_from_u64(1);
        let fleet = DeviceSimulator::new(3).generate_with(&mut rng);
        let body = serde_json::to_string(&fleet).unwrap();

        let snapshot: Snapshot = serde_json::from_str(&body).unwrap();
        assert_eq!(snapshot.devices.len(), 3);
        assert_eq!(snapshot.timestamp, Some(fleet.timestamp as f64));
        assert_eq!(snapshot.devices[1].field("type").unwrap(), "camera");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345_678), 12.35);
        assert_eq!(round2(80.0), 80.0);
    }
}
