// Telemetry data domain models
use super::feed::FieldName;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

/// Physical quantity a deployment assigns to a channel field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    pub field: FieldName,
    pub title: String,
    pub unit: String,
    pub color: Option<String>,
}

impl FieldBinding {
    pub fn new(field: FieldName, title: &str, unit: &str, color: Option<&str>) -> Self {
        Self {
            field,
            title: title.to_string(),
            unit: unit.to_string(),
            color: color.map(str::to_string),
        }
    }

    /// Temperature, humidity and the power-meter quantities on their usual slots.
    pub fn defaults() -> Vec<FieldBinding> {
        vec![
            FieldBinding::new(FieldName::Field1, "Temperature", "°C", Some("red")),
            FieldBinding::new(FieldName::Field2, "Humidity", "%", Some("blue")),
            FieldBinding::new(FieldName::Field4, "Voltage", "V", Some("orange")),
            FieldBinding::new(FieldName::Field5, "Current", "A", Some("red")),
            FieldBinding::new(FieldName::Field6, "Power", "W", Some("purple")),
            FieldBinding::new(FieldName::Field7, "Energy", "kWh", Some("green")),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub time_ms: i64,
    pub value: f64,
    pub precision: usize,
}

impl Reading {
    pub fn new(time_ms: i64, value: f64, precision: usize) -> Self {
        Self {
            time_ms,
            value,
            precision,
        }
    }

    pub fn display(&self, unit: &str) -> String {
        format!("{:.*} {}", self.precision, self.value, unit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub field: FieldName,
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(
        field: FieldName,
        name: String,
        color: Option<String>,
        points: Vec<TimeSeriesPoint>,
    ) -> Self {
        Self {
            field,
            name,
            color,
            points,
        }
    }
}
