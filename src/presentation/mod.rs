// Presentation layer - Exporter HTTP surface and console view
pub mod app_state;
pub mod commands;
pub mod console_view;
pub mod exporter;
pub mod handlers;
