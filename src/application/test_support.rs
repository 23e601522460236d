// Test doubles for the fetcher and view seams
use crate::application::chart_set::ChartSet;
use crate::application::dashboard_view::DashboardView;
use crate::application::refresh_controller::ExportOutcome;
use crate::application::snapshot_fetcher::{FetchError, SnapshotFetcher};
use crate::application::table_view::TableRow;
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

pub fn snapshot(value: serde_json::Value) -> Snapshot {
    serde_json::from_value(value).unwrap()
}

/// Replays canned results in order. An optional gate parks each fetch
/// until the test releases it.
pub struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<Snapshot, FetchError>>>,
    gate: Option<Arc<Notify>>,
    pub calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new(responses: Vec<Result<Snapshot, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl SnapshotFetcher for ScriptedFetcher {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".to_string())))
    }
}

#[derive(Debug, Default)]
pub struct ViewLog {
    pub rows: Vec<TableRow>,
    pub replace_calls: usize,
    pub last_updated: Option<String>,
    pub chart_redraws: usize,
    pub failures: Vec<FetchError>,
    pub exports: Vec<ExportOutcome>,
}

/// Records every call; clones share one log.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    log: Arc<Mutex<ViewLog>>,
}

impl RecordingView {
    pub fn log(&self) -> MutexGuard<'_, ViewLog> {
        self.log.lock().unwrap()
    }
}

impl DashboardView for RecordingView {
    fn replace_rows(&mut self, rows: &[TableRow]) {
        let mut log = self.log();
        log.rows = rows.to_vec();
        log.replace_calls += 1;
    }

    fn set_last_updated(&mut self, label: &str) {
        self.log().last_updated = Some(label.to_string());
    }

    fn redraw_charts(&mut self, _charts: &ChartSet) {
        self.log().chart_redraws += 1;
    }

    fn show_fetch_failure(&mut self, error: &FetchError) {
        self.log().failures.push(error.clone());
    }

    fn show_export_result(&mut self, outcome: &ExportOutcome) {
        self.log().exports.push(outcome.clone());
    }
}
