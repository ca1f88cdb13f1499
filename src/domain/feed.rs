// Feed domain models - normalized channel readings
use super::telemetry::TimeSeriesPoint;
use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const FIELD_COUNT: usize = 8;

/// One of the numeric slots a channel exposes (`field1`..`field8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Field1,
    Field2,
    Field3,
    Field4,
    Field5,
    Field6,
    Field7,
    Field8,
}

impl FieldName {
    pub const ALL: [FieldName; FIELD_COUNT] = [
        FieldName::Field1,
        FieldName::Field2,
        FieldName::Field3,
        FieldName::Field4,
        FieldName::Field5,
        FieldName::Field6,
        FieldName::Field7,
        FieldName::Field8,
    ];

    /// Key used for this field in the feed payload.
    pub fn key(self) -> &'static str {
        match self {
            FieldName::Field1 => "field1",
            FieldName::Field2 => "field2",
            FieldName::Field3 => "field3",
            FieldName::Field4 => "field4",
            FieldName::Field5 => "field5",
            FieldName::Field6 => "field6",
            FieldName::Field7 => "field7",
            FieldName::Field8 => "field8",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}', expected field1..field8")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A single coerced sample. Anything that is not a finite number is `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Cell {
    Numeric(f64),
    #[default]
    Absent,
}

impl Cell {
    pub fn value(self) -> Option<f64> {
        match self {
            Cell::Numeric(v) => Some(v),
            Cell::Absent => None,
        }
    }

    pub fn is_absent(self) -> bool {
        matches!(self, Cell::Absent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedRecord {
    pub created_at: DateTime<FixedOffset>,
    pub entry_id: Option<u64>,
    pub cells: [Cell; FIELD_COUNT],
}

impl FeedRecord {
    pub fn cell(&self, field: FieldName) -> Cell {
        self.cells[field.index()]
    }
}

/// Channel metadata the provider sends alongside the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelInfo {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub field_labels: [Option<String>; FIELD_COUNT],
}

impl ChannelInfo {
    pub fn field_label(&self, field: FieldName) -> Option<&str> {
        self.field_labels[field.index()].as_deref()
    }
}

/// Normalized result of one fetch, in source order (oldest first).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelemetryDataset {
    records: Vec<FeedRecord>,
    reported: [bool; FIELD_COUNT],
    channel: Option<ChannelInfo>,
}

impl TelemetryDataset {
    /// `reported[i]` is whether field `i` appeared as a key in at least one record.
    pub fn new(
        records: Vec<FeedRecord>,
        reported: [bool; FIELD_COUNT],
        channel: Option<ChannelInfo>,
    ) -> Self {
        Self {
            records,
            reported,
            channel,
        }
    }

    pub fn empty(channel: Option<ChannelInfo>) -> Self {
        Self::new(Vec::new(), [false; FIELD_COUNT], channel)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FeedRecord] {
        &self.records
    }

    pub fn channel(&self) -> Option<&ChannelInfo> {
        self.channel.as_ref()
    }

    /// False means no record carried the key at all, so the column is entirely absent.
    pub fn is_reported(&self, field: FieldName) -> bool {
        self.reported[field.index()]
    }

    pub fn reported_fields(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|f| self.is_reported(*f))
            .collect()
    }

    pub fn column(&self, field: FieldName) -> impl Iterator<Item = Cell> + '_ {
        self.records.iter().map(move |r| r.cell(field))
    }

    /// Most recent numeric sample of a column, skipping absent cells.
    pub fn latest(&self, field: FieldName) -> Option<(DateTime<FixedOffset>, f64)> {
        self.records
            .iter()
            .rev()
            .find_map(|r| r.cell(field).value().map(|v| (r.created_at, v)))
    }

    pub fn series(&self, field: FieldName) -> Vec<TimeSeriesPoint> {
        self.records
            .iter()
            .filter_map(|r| {
                r.cell(field)
                    .value()
                    .map(|v| TimeSeriesPoint::new(r.created_at.timestamp_millis(), v))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: &str, field1: Cell, field2: Cell) -> FeedRecord {
        let mut cells = [Cell::Absent; FIELD_COUNT];
        cells[0] = field1;
        cells[1] = field2;
        FeedRecord {
            created_at: DateTime::parse_from_rfc3339(ts).unwrap(),
            entry_id: None,
            cells,
        }
    }

    #[test]
    fn test_field_name_parse() {
        assert_eq!("field1".parse::<FieldName>().unwrap(), FieldName::Field1);
        assert_eq!("FIELD8".parse::<FieldName>().unwrap(), FieldName::Field8);
        assert!("field9".parse::<FieldName>().is_err());
        assert!("temperature".parse::<FieldName>().is_err());

        let err = "field9".parse::<FieldName>().unwrap_err();
        assert_eq!(err, UnknownField("field9".to_string()));
        assert_eq!(
            err.to_string(),
            "unknown field 'field9', expected field1..field8"
        );
    }

    #[test]
    fn test_latest_skips_absent_tail() {
        let mut reported = [false; FIELD_COUNT];
        reported[0] = true;
        reported[1] = true;
        let dataset = TelemetryDataset::new(
            vec![
                record("2025-01-01T00:00:00Z", Cell::Numeric(20.0), Cell::Numeric(55.0)),
                record("2025-01-01T00:01:00Z", Cell::Numeric(21.5), Cell::Absent),
                record("2025-01-01T00:02:00Z", Cell::Absent, Cell::Absent),
            ],
            reported,
            None,
        );

        let (ts, value) = dataset.latest(FieldName::Field1).unwrap();
        assert_eq!(value, 21.5);
        assert_eq!(ts.to_rfc3339(), "2025-01-01T00:01:00+00:00");
        assert_eq!(dataset.latest(FieldName::Field2).unwrap().1, 55.0);
        assert!(dataset.latest(FieldName::Field3).is_none());
    }

    #[test]
    fn test_series_only_numeric_points() {
        let dataset = TelemetryDataset::new(
            vec![
                record("2025-01-01T00:00:00Z", Cell::Numeric(1.0), Cell::Absent),
                record("2025-01-01T00:00:15Z", Cell::Absent, Cell::Absent),
                record("2025-01-01T00:00:30Z", Cell::Numeric(3.0), Cell::Absent),
            ],
            [true, true, false, false, false, false, false, false],
            None,
        );

        let points = dataset.series(FieldName::Field1);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].time_ms, 1_735_689_600_000);
        assert_eq!(points[1].value, 3.0);
        assert!(dataset.series(FieldName::Field2).is_empty());
        assert!(dataset.column(FieldName::Field2).all(Cell::is_absent));
        assert!(dataset.is_reported(FieldName::Field2));
        assert_eq!(
            dataset.reported_fields(),
            vec![FieldName::Field1, FieldName::Field2]
        );
    }
}
