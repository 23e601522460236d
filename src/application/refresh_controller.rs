// Refresh controller - Poll, reconcile table and charts, export
use crate::application::chart_set::ChartSet;
use crate::application::dashboard_view::DashboardView;
use crate::application::export_encoder::{self, NoData};
use crate::application::snapshot_fetcher::{FetchError, SnapshotFetcher};
use crate::application::table_view;
use crate::domain::snapshot::Snapshot;
use crate::domain::status::StatusFilter;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

type FetchResult = Result<Snapshot, FetchError>;

/// Inputs from the view and the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    Tick,
    ManualRefreshRequested,
    FilterChanged(StatusFilter),
    ExportRequested,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Fetching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    Failed,
    /// A fetch was already in flight; the trigger was collapsed into it.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    NoData,
    Failed(String),
}

/// Owns the latest snapshot, the status filter and the chart buffers.
///
/// All mutation happens through `&mut self`, so when the controller runs as a
/// task via [`RefreshController::run`] it is the single writer of that state.
/// Fetches run in their own task and report back, which keeps filter changes
/// responsive while a poll is in flight.
pub struct RefreshController {
    fetcher: Arc<dyn SnapshotFetcher>,
    view: Box<dyn DashboardView>,
    state: RefreshState,
    latest: Option<Arc<Snapshot>>,
    filter: StatusFilter,
    charts: ChartSet,
    export_path: PathBuf,
    collapsed_triggers: u64,
}

impl RefreshController {
    pub fn new(
        fetcher: Arc<dyn SnapshotFetcher>,
        view: Box<dyn DashboardView>,
        export_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            view,
            state: RefreshState::Idle,
            latest: None,
            filter: StatusFilter::All,
            charts: ChartSet::default(),
            export_path: export_path.into(),
            collapsed_triggers: 0,
        }
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn latest(&self) -> Option<&Arc<Snapshot>> {
        self.latest.as_ref()
    }

    pub fn filter(&self) -> &StatusFilter {
        &self.filter
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    /// Refresh triggers ignored because a fetch was already running.
    pub fn collapsed_triggers(&self) -> u64 {
        self.collapsed_triggers
    }

    /// Fetch once and apply the result, unless a fetch is already in flight.
    pub async fn refresh_all(&mut self) -> RefreshOutcome {
        if !self.try_begin_refresh() {
            return RefreshOutcome::Skipped;
        }
        let result = self.fetcher.fetch().await;
        self.complete_refresh(result)
    }

    /// Re-render the table from the latest snapshot. No network call.
    pub fn on_filter_changed(&mut self, filter: StatusFilter) {
        tracing::debug!(filter = %filter, "Status filter changed");
        self.filter = filter;
        self.render_table();
    }

    /// Write the latest snapshot, unfiltered, to the export file.
    pub async fn export(&mut self) -> ExportOutcome {
        let latest = self.latest.clone();
        let devices = latest.as_deref().map(|s| s.devices.as_slice()).unwrap_or(&[]);

        let outcome = match export_encoder::encode(devices) {
            Err(NoData) => {
                tracing::warn!("Export requested before any device data was received");
                ExportOutcome::NoData
            }
            Ok(csv) => match tokio::fs::write(&self.export_path, csv).await {
                Ok(()) => {
                    tracing::info!(
                        path = %self.export_path.display(),
                        rows = devices.len(),
                        "Exported snapshot"
                    );
                    ExportOutcome::Written {
                        path: self.export_path.clone(),
                        rows: devices.len(),
                    }
                }
                Err(e) => {
                    tracing::error!(
                        path = %self.export_path.display(),
                        "Failed to write export: {}",
                        e
                    );
                    ExportOutcome::Failed(e.to_string())
                }
            },
        };

        self.view.show_export_result(&outcome);
        outcome
    }

    /// Drive the dashboard until `Shutdown` arrives or every sender is gone.
    ///
    /// The first tick fires immediately, so the dashboard is populated on start.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<DashboardEvent>,
        poll_interval: Duration,
    ) -> Self {
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let (done_tx, mut done_rx) = mpsc::channel::<FetchResult>(1);

        tracing::info!(
            poll_interval_ms = poll_interval.as_millis() as u64,
            "Dashboard refresh loop started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => self.start_refresh(&done_tx),
                Some(result) = done_rx.recv() => {
                    self.complete_refresh(result);
                }
                event = events.recv() => match event {
                    Some(DashboardEvent::Shutdown) | None => break,
                    Some(event) => self.handle_event(event, &done_tx).await,
                },
            }
        }

        tracing::info!("Dashboard refresh loop stopped");
        self
    }

    async fn handle_event(&mut self, event: DashboardEvent, done: &mpsc::Sender<FetchResult>) {
        match event {
            DashboardEvent::Tick | DashboardEvent::ManualRefreshRequested => {
                self.start_refresh(done)
            }
            DashboardEvent::FilterChanged(filter) => self.on_filter_changed(filter),
            DashboardEvent::ExportRequested => {
                self.export().await;
            }
            DashboardEvent::Shutdown => {}
        }
    }

    fn start_refresh(&mut self, done: &mpsc::Sender<FetchResult>) {
        if !self.try_begin_refresh() {
            return;
        }

        let fetcher = Arc::clone(&self.fetcher);
        let done = done.clone();
        tokio::spawn(async move {
            // A panicking fetcher must still hand control back, or the guard never resets.
            let result = match AssertUnwindSafe(fetcher.fetch()).catch_unwind().await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Aborted("fetcher panicked".to_string())),
            };
            let _ = done.send(result).await;
        });
    }

    fn try_begin_refresh(&mut self) -> bool {
        if self.state == RefreshState::Fetching {
            self.collapsed_triggers += 1;
            tracing::debug!(
                collapsed = self.collapsed_triggers,
                "Refresh already in flight, collapsing trigger"
            );
            return false;
        }
        self.state = RefreshState::Fetching;
        true
    }

    fn complete_refresh(&mut self, result: FetchResult) -> RefreshOutcome {
        let outcome = match result {
            Ok(snapshot) => {
                self.apply_snapshot(snapshot);
                RefreshOutcome::Updated
            }
            Err(e) => {
                tracing::warn!("Telemetry poll failed, keeping previous snapshot: {}", e);
                self.view.show_fetch_failure(&e);
                RefreshOutcome::Failed
            }
        };
        self.state = RefreshState::Idle;
        outcome
    }

    // Table before charts, both before returning to Idle.
    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        self.latest = Some(Arc::clone(&snapshot));

        tracing::debug!(
            devices = snapshot.devices.len(),
            timestamp = snapshot.timestamp,
            representative = ?snapshot.representative().and_then(|d| d.id.as_ref()),
            "Applying telemetry snapshot"
        );

        if let Some(label) = snapshot.last_updated_label() {
            self.view.set_last_updated(&label);
        }
        self.render_table();

        if self.charts.update(&snapshot.devices, &wall_clock_label()) {
            self.view.redraw_charts(&self.charts);
        }
    }

    fn render_table(&mut self) {
        let devices = self
            .latest
            .as_deref()
            .map(|s| s.devices.as_slice())
            .unwrap_or(&[]);
        let rows = table_view::render(devices, &self.filter);
        self.view.replace_rows(&rows);
    }
}

fn wall_clock_label() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
