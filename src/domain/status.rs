// Status filter and row badges
use super::device::{DeviceReading, is_truthy, value_text};
use std::fmt;

pub const STATUS_ONLINE: &str = "Online";
pub const STATUS_HIGH_LOAD: &str = "High Load";
pub const ANOMALY_NORMAL: &str = "Normal";
pub const ANOMALY_FLAGGED: &str = "Anomaly";
pub const FILTER_ALL: &str = "All";

/// Status filter selected in the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Status(String),
}

impl StatusFilter {
    /// Exactly "All" selects everything; any other text is a concrete status.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value == FILTER_ALL {
            StatusFilter::All
        } else {
            StatusFilter::Status(value.to_string())
        }
    }

    /// Equality against the raw status, not the defaulted badge.
    pub fn matches(&self, device: &DeviceReading) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(status) => device.status_str() == Some(status.as_str()),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(FILTER_ALL),
            StatusFilter::Status(status) => f.write_str(status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeClass {
    Normal,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub class: BadgeClass,
}

impl Badge {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let class = badge_class(&label);
        Self { label, class }
    }

    pub fn status(device: &DeviceReading) -> Self {
        Self::with_default(device.status.as_ref(), STATUS_ONLINE)
    }

    pub fn anomaly(device: &DeviceReading) -> Self {
        Self::with_default(device.anomaly.as_ref(), ANOMALY_NORMAL)
    }

    fn with_default(value: Option<&serde_json::Value>, fallback: &str) -> Self {
        match value {
            Some(value) if is_truthy(Some(value)) => Self::new(value_text(value)),
            _ => Self::new(fallback),
        }
    }

    pub fn is_alert(&self) -> bool {
        self.class == BadgeClass::Alert
    }
}

pub fn badge_class(label: &str) -> BadgeClass {
    match label {
        STATUS_HIGH_LOAD | ANOMALY_FLAGGED => BadgeClass::Alert,
        _ => BadgeClass::Normal,
    }
}
