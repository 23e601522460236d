// Domain layer - Telemetry models with no I/O
pub mod device;
pub mod series;
pub mod snapshot;
pub mod status;
