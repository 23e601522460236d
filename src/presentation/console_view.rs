// Terminal rendition of the dashboard view surface
use crate::application::chart_set::{ChartSet, ChartSurface};
use crate::application::dashboard_view::DashboardView;
use crate::application::refresh_controller::ExportOutcome;
use crate::application::snapshot_fetcher::FetchError;
use crate::application::table_view::TableRow;
use crate::domain::status::Badge;
use std::io::Write;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const COLUMNS: [&str; 9] = [
    "ID", "Type", "CPU", "RAM", "Temp", "Net Sent", "Net Recv", "Status", "Anomaly",
];

/// Writes each view update as a block of plain text.
pub struct ConsoleView<W: Write + Send> {
    out: W,
    last_updated: Option<String>,
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_updated: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::debug!("Console write failed: {}", e);
        }
    }
}

impl<W: Write + Send> DashboardView for ConsoleView<W> {
    fn replace_rows(&mut self, rows: &[TableRow]) {
        let table = render_table(rows);
        self.emit(&table);
    }

    fn set_last_updated(&mut self, label: &str) {
        self.last_updated = Some(label.to_string());
        self.emit(&format!("Last updated: {}", label));
    }

    fn redraw_charts(&mut self, charts: &ChartSet) {
        let text = render_charts(charts);
        self.emit(&text);
    }

    fn show_fetch_failure(&mut self, error: &FetchError) {
        let since = self.last_updated.clone().unwrap_or_else(|| "never".to_string());
        self.emit(&format!("Refresh failed ({}); showing data from {}", error, since));
    }

    fn show_export_result(&mut self, outcome: &ExportOutcome) {
        let message = match outcome {
            ExportOutcome::Written { path, rows } => {
                format!("Exported {} devices to {}", rows, path.display())
            }
            ExportOutcome::NoData => "Nothing to export yet".to_string(),
            ExportOutcome::Failed(reason) => format!("Export failed: {}", reason),
        };
        self.emit(&message);
    }
}

fn badge_cell(badge: &Badge) -> String {
    if badge.is_alert() {
        format!("! {}", badge.label)
    } else {
        badge.label.clone()
    }
}

pub fn render_table(rows: &[TableRow]) -> String {
    let cells: Vec<[String; 9]> = rows
        .iter()
        .map(|row| {
            [
                row.id.clone(),
                row.device_type.clone(),
                row.cpu.clone(),
                row.ram.clone(),
                row.temp.clone(),
                row.network_sent.clone(),
                row.network_received.clone(),
                badge_cell(&row.status),
                badge_cell(&row.anomaly),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![format_line(COLUMNS.iter().copied(), &widths)];
    if cells.is_empty() {
        lines.push("(no devices)".to_string());
    }
    for row in &cells {
        lines.push(format_line(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn format_line<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    values
        .zip(widths)
        .map(|(value, width)| format!("{:<width$}", value, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn render_charts(charts: &ChartSet) -> String {
    ChartSurface::ALL
        .iter()
        .map(|surface| {
            let series: Vec<String> = surface
                .channels()
                .iter()
                .map(|channel| {
                    let buffer = charts.channel(*channel);
                    let points = buffer.points();
                    let latest = points.back().map(|p| p.value).unwrap_or(0.0);
                    let line = sparkline(points.iter().map(|p| p.value));
                    format!("{} {} {}", channel.name(), line, latest)
                })
                .collect();
            format!("{:<8} {}", surface.title(), series.join(" | "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One glyph per value, scaled between the series minimum and maximum.
pub fn sparkline(values: impl Iterator<Item = f64>) -> String {
    let values: Vec<f64> = values.collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    values
        .iter()
        .map(|v| {
            if span <= 0.0 {
                SPARK_LEVELS[0]
            } else {
                SPARK_LEVELS[(((v - min) / span) * top).round() as usize]
            }
        })
        .collect()
}
