// HTTP request handlers for the simulated telemetry exporter
use crate::infrastructure::device_simulator::FleetSnapshot;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Fresh simulated snapshot of every device
pub async fn api_devices(State(state): State<Arc<AppState>>) -> Json<FleetSnapshot> {
    Json(state.simulator.generate())
}

/// Prometheus scrape endpoint; every scrape samples a new snapshot
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    let fleet = state.simulator.generate();
    state.metrics.observe(&fleet);

    match state.metrics.encode() {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
