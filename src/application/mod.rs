// Application layer - Polling pipeline and view reconciliation
pub mod chart_set;
pub mod dashboard_view;
pub mod export_encoder;
pub mod refresh_controller;
pub mod snapshot_fetcher;
pub mod table_view;

#[cfg(test)]
pub mod test_support;
