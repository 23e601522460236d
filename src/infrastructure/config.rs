use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_FILE: &str = "config/dashboard";
const ENV_PREFIX: &str = "EDGE";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub dashboard: DashboardSettings,
    pub exporter: ExporterSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    /// Telemetry endpoint returning `{ timestamp, devices }`.
    pub endpoint: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub export_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExporterSettings {
    /// Serve the simulated fleet from this process.
    pub enabled: bool,
    pub bind: SocketAddr,
    pub device_count: usize,
}

impl DashboardSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(CONFIG_FILE)
}

/// Defaults, then the optional config file, then `EDGE_<SECTION>__<KEY>` variables.
pub fn load_settings_from(path: &str) -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .set_default("dashboard.endpoint", "http://127.0.0.1:5000/api/devices")?
        .set_default("dashboard.poll_interval_secs", 4)?
        .set_default("dashboard.request_timeout_secs", 3)?
        .set_default("dashboard.export_path", "edge_metrics.csv")?
        .set_default("exporter.enabled", true)?
        .set_default("exporter.bind", "127.0.0.1:5000")?
        .set_default("exporter.device_count", 5)?
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment is process-wide; every test that loads settings holds this.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults_without_file() {
        let _env = ENV_LOCK.lock().unwrap();
        let settings = load_settings_from("does/not/exist/dashboard").unwrap();

        assert_eq!(settings.dashboard.endpoint, "http://127.0.0.1:5000/api/devices");
        assert_eq!(settings.dashboard.poll_interval(), Duration::from_secs(4));
        assert_eq!(settings.dashboard.request_timeout(), Duration::from_secs(3));
        assert_eq!(settings.dashboard.export_path, PathBuf::from("edge_metrics.csv"));
        assert!(settings.exporter.enabled);
        assert_eq!(settings.exporter.bind, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.exporter.device_count, 5);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let _env = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("dashboard.toml"),
            r#"
[dashboard]
endpoint = "http://telemetry.local/api/devices"
poll_interval_secs = 10

[exporter]
enabled = false
"#,
        )
        .unwrap();

        let base = dir.path().join("dashboard");
        let settings = load_settings_from(base.to_str().unwrap()).unwrap();

        assert_eq!(settings.dashboard.endpoint, "http://telemetry.local/api/devices");
        assert_eq!(settings.dashboard.poll_interval_secs, 10);
        assert_eq!(settings.dashboard.request_timeout_secs, 3);
        assert!(!settings.exporter.enabled);
        assert_eq!(settings.exporter.device_count, 5);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let _env = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("EDGE_DASHBOARD__ENDPOINT", "http://edge.example/api/devices");
            std::env::set_var("EDGE_EXPORTER__DEVICE_COUNT", "9");
        }

        let settings = load_settings_from("does/not/exist/dashboard");

        unsafe {
            std::env::remove_var("EDGE_DASHBOARD__ENDPOINT");
            std::env::remove_var("EDGE_EXPORTER__DEVICE_COUNT");
        }

        let settings = settings.unwrap();
        assert_eq!(settings.dashboard.endpoint, "http://edge.example/api/devices");
        assert_eq!(settings.exporter.device_count, 9);
        assert_eq!(settings.dashboard.poll_interval_secs, 4);
    }
}
