// View surface driven by the refresh controller
use crate::application::chart_set::ChartSet;
use crate::application::refresh_controller::ExportOutcome;
use crate::application::snapshot_fetcher::FetchError;
use crate::application::table_view::TableRow;

pub trait DashboardView: Send {
    /// Replace every row of the table body.
    fn replace_rows(&mut self, rows: &[TableRow]);

    fn set_last_updated(&mut self, label: &str);

    /// Redraw all chart surfaces from the current buffers.
    fn redraw_charts(&mut self, charts: &ChartSet);

    /// A poll failed; the table and charts still show the previous snapshot.
    fn show_fetch_failure(&mut self, error: &FetchError);

    fn show_export_result(&mut self, outcome: &ExportOutcome);
}
