// Main entry point - Dependency injection, exporter and dashboard loop
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use edge_dashboard::application::refresh_controller::{DashboardEvent, RefreshController};
use edge_dashboard::infrastructure::config::load_settings;
use edge_dashboard::infrastructure::http_snapshot_fetcher::HttpSnapshotFetcher;
use edge_dashboard::presentation::app_state::AppState;
use edge_dashboard::presentation::commands::{self, HELP};
use edge_dashboard::presentation::console_view::ConsoleView;
use edge_dashboard::presentation::exporter;

const EVENT_BUFFER: usize = 32;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let settings = load_settings().context("Failed to load dashboard settings")?;

    // Simulated telemetry backend (presentation + infrastructure layers)
    if settings.exporter.enabled {
        let state = Arc::new(AppState::new(settings.exporter.device_count)?);
        let listener = TcpListener::bind(settings.exporter.bind)
            .await
            .with_context(|| format!("Failed to bind exporter on {}", settings.exporter.bind))?;
        tracing::info!(
            addr = %settings.exporter.bind,
            devices = settings.exporter.device_count,
            "Serving simulated edge telemetry"
        );

        tokio::spawn(async move {
            if let Err(e) = exporter::serve(listener, state).await {
                tracing::error!("Exporter stopped: {}", e);
            }
        });
    }

    // Dashboard client (application layer)
    let fetcher = HttpSnapshotFetcher::new(
        settings.dashboard.endpoint.clone(),
        settings.dashboard.request_timeout(),
    )?;
    tracing::info!(endpoint = fetcher.endpoint(), "Polling telemetry endpoint");

    let controller = RefreshController::new(
        Arc::new(fetcher),
        Box::new(ConsoleView::new(std::io::stdout())),
        settings.dashboard.export_path.clone(),
    );

    // View events: console commands and Ctrl-C
    let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
    tokio::spawn(commands::forward_stdin(events_tx.clone()));

    let shutdown_tx = events_tx;
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(DashboardEvent::Shutdown).await;
        }
    });

    println!("{}", HELP);
    controller
        .run(events_rx, settings.dashboard.poll_interval())
        .await;

    Ok(())
}
