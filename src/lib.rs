// Edge device telemetry dashboard: polling client, view reconciliation and
// a simulated telemetry exporter.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
