// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod device_simulator;
pub mod http_snapshot_fetcher;
pub mod telemetry_metrics;
