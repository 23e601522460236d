// Device reading domain model
use serde::Deserialize;
use serde_json::{Number, Value};

/// Token shown in the table for any field the payload did not carry.
pub const PLACEHOLDER: &str = "--";

/// One device as reported by the telemetry endpoint.
///
/// Every attribute is kept as the raw JSON value so the table can show exactly
/// what was sent, while charting coerces it separately. `null` deserializes to
/// `None`, so null and absent are indistinguishable downstream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceReading {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "type")]
    pub device_type: Option<Value>,
    #[serde(default)]
    pub cpu: Option<Value>,
    #[serde(default)]
    pub ram: Option<Value>,
    #[serde(default)]
    pub temp: Option<Value>,
    #[serde(default)]
    pub network_sent: Option<Value>,
    #[serde(default)]
    pub network_received: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub anomaly: Option<Value>,
}

/// The five numeric channels a device reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cpu,
    Ram,
    Temp,
    NetworkSent,
    NetworkReceived,
}

impl Metric {
    /// Attribute name in the telemetry payload.
    pub fn field_name(self) -> &'static str {
        match self {
            Metric::Cpu => "cpu",
            Metric::Ram => "ram",
            Metric::Temp => "temp",
            Metric::NetworkSent => "network_sent",
            Metric::NetworkReceived => "network_received",
        }
    }
}

impl DeviceReading {
    /// Look up an attribute by its payload name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "id" => self.id.as_ref(),
            "type" => self.device_type.as_ref(),
            "cpu" => self.cpu.as_ref(),
            "ram" => self.ram.as_ref(),
            "temp" => self.temp.as_ref(),
            "network_sent" => self.network_sent.as_ref(),
            "network_received" => self.network_received.as_ref(),
            "status" => self.status.as_ref(),
            "anomaly" => self.anomaly.as_ref(),
            _ => None,
        }
    }

    pub fn metric(&self, metric: Metric) -> Option<&Value> {
        self.field(metric.field_name())
    }

    /// Numeric value of a channel for charting; anything unusable becomes 0.
    pub fn metric_value(&self, metric: Metric) -> f64 {
        numeric_value(self.metric(metric))
    }

    /// Status as sent, only when it is a string.
    pub fn status_str(&self) -> Option<&str> {
        self.status.as_ref().and_then(Value::as_str)
    }
}

/// Table cell text: the raw value, or the placeholder when absent.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::Null) | None => PLACEHOLDER.to_string(),
        Some(value) => value_text(value),
    }
}

/// Export cell text: the raw value with commas and line breaks removed, empty when absent.
pub fn export_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::Null) | None => String::new(),
        Some(value) => value_text(value).replace([',', '\r', '\n'], ""),
    }
}

/// Chart value: numbers pass through, numeric strings are parsed,
/// booleans count as 1/0, everything else is 0.
pub fn numeric_value(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };

    if parsed.is_finite() { parsed } else { 0.0 }
}

/// Whether a value counts as "present" for badge defaulting.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// Whole floats print without a trailing ".0" so 50.0 and 50 look the same.
fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reading(value: Value) -> DeviceReading {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_and_null_fields_are_absent() {
        let device = reading(json!({ "id": "d1", "cpu": null }));
        assert_eq!(device.id, Some(json!("d1")));
        assert_eq!(device.cpu, None);
        assert_eq!(device.ram, None);
    }

    #[test]
    fn test_display_value_uses_placeholder() {
        assert_eq!(display_value(None), "--");
        assert_eq!(display_value(Some(&Value::Null)), "--");
        assert_eq!(display_value(Some(&json!("abc"))), "abc");
        assert_eq!(display_value(Some(&json!(50))), "50");
        assert_eq!(display_value(Some(&json!(50.0))), "50");
        assert_eq!(display_value(Some(&json!(12.34))), "12.34");
    }

    #[test]
    fn test_export_value_strips_commas() {
        assert_eq!(export_value(None), "");
        assert_eq!(export_value(Some(&json!("a,b,,c"))), "abc");
        assert_eq!(export_value(Some(&json!("line\r\nbreak\n"))), "linebreak");
        assert_eq!(export_value(Some(&json!(3440000.5))), "3440000.5");
    }

    #[test]
    fn test_numeric_value_coercion() {
        assert_eq!(numeric_value(Some(&json!(91))), 91.0);
        assert_eq!(numeric_value(Some(&json!("91"))), 91.0);
        assert_eq!(numeric_value(Some(&json!(" 7.5 "))), 7.5);
        assert_eq!(numeric_value(Some(&json!(""))), 0.0);
        assert_eq!(numeric_value(Some(&json!("hot"))), 0.0);
        assert_eq!(numeric_value(Some(&json!("NaN"))), 0.0);
        assert_eq!(numeric_value(Some(&json!(true))), 1.0);
        assert_eq!(numeric_value(Some(&json!([1, 2]))), 0.0);
        assert_eq!(numeric_value(None), 0.0);
    }

    #[test]
    fn test_type_field_is_renamed() {
        let device = reading(json!({ "type": "gateway" }));
        assert_eq!(device.field("type"), Some(&json!("gateway")));
        assert_eq!(device.field("unknown"), None);
    }
}
