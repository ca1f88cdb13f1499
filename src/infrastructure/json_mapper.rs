// Mapper to convert domain models to JSON response types
use crate::domain::dashboard::{Dashboard, Panel};
use crate::domain::feed::{ChannelInfo, FeedRecord, FieldName, TelemetryDataset};
use crate::domain::telemetry::TimeSeriesPoint;
use chrono::SecondsFormat;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct DatasetJson {
    pub channel: Option<ChannelJson>,
    pub record_count: usize,
    pub reported_fields: Vec<&'static str>,
    pub records: Vec<RecordJson>,
}

#[derive(Debug, Serialize)]
pub struct ChannelJson {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub field_labels: BTreeMap<&'static str, String>,
}

/// `fields` holds every reported field; `null` marks an absent cell.
#[derive(Debug, Serialize)]
pub struct RecordJson {
    pub created_at: String,
    pub entry_id: Option<u64>,
    pub fields: BTreeMap<&'static str, Option<f64>>,
}

#[derive(Debug, Serialize)]
pub struct DashboardJson {
    pub title: String,
    pub record_count: usize,
    pub panels: Vec<PanelJson>,
}

#[derive(Debug, Serialize)]
pub struct PanelJson {
    pub field: &'static str,
    pub title: String,
    pub unit: String,
    pub color: Option<String>,
    pub available: bool,
    pub reading: Option<ReadingJson>,
    pub points: Vec<PointJson>,
}

#[derive(Debug, Serialize)]
pub struct ReadingJson {
    pub time_ms: i64,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct PointJson {
    pub time_ms: i64,
    pub value: f64,
}

pub fn dataset_to_json(dataset: &TelemetryDataset) -> DatasetJson {
    let fields = dataset.reported_fields();

    DatasetJson {
        channel: dataset.channel().map(channel_to_json),
        record_count: dataset.len(),
        reported_fields: fields.iter().map(|f| f.key()).collect(),
        records: dataset
            .records()
            .iter()
            .map(|r| record_to_json(r, &fields))
            .collect(),
    }
}

fn channel_to_json(channel: &ChannelInfo) -> ChannelJson {
    let field_labels = FieldName::ALL
        .into_iter()
        .filter_map(|f| channel.field_label(f).map(|label| (f.key(), label.to_string())))
        .collect();

    ChannelJson {
        id: channel.id,
        name: channel.name.clone(),
        description: channel.description.clone(),
        field_labels,
    }
}

fn record_to_json(record: &FeedRecord, fields: &[FieldName]) -> RecordJson {
    RecordJson {
        created_at: record.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        entry_id: record.entry_id,
        fields: fields
            .iter()
            .map(|f| (f.key(), record.cell(*f).value()))
            .collect(),
    }
}

pub fn dashboard_to_json(dashboard: Dashboard) -> DashboardJson {
    DashboardJson {
        title: dashboard.title,
        record_count: dashboard.record_count,
        panels: dashboard.panels.into_iter().map(panel_to_json).collect(),
    }
}

fn panel_to_json(panel: Panel) -> PanelJson {
    let available = panel.available();
    let unit = panel.binding.unit;

    let reading = panel.reading.map(|r| ReadingJson {
        time_ms: r.time_ms,
        value: r.value,
        display: r.display(&unit),
    });

    let points = panel
        .series
        .map(|s| s.points.into_iter().map(point_to_json).collect())
        .unwrap_or_default();

    PanelJson {
        field: panel.binding.field.key(),
        title: panel.binding.title,
        unit,
        color: panel.binding.color,
        available,
        reading,
        points,
    }
}

fn point_to_json(point: TimeSeriesPoint) -> PointJson {
    PointJson {
        time_ms: point.time_ms,
        value: point.value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::normalizer::parse_feed_body;
    use crate::domain::telemetry::FieldBinding;
    use serde_json::json;

    const BODY: &str = r#"{
        "channel": {"id": 9, "name": "Tank A", "field1": "Temperature"},
        "feeds": [
            {"created_at": "2025-01-01T00:00:00Z", "entry_id": 1, "field1": "23.5", "field2": "bad"}
        ]
    }"#;

    #[test]
    fn test_dataset_json_shape() {
        let dataset = parse_feed_body(BODY, 100).unwrap();
        let value = serde_json::to_value(dataset_to_json(&dataset)).unwrap();

        assert_eq!(
            value,
            json!({
                "channel": {
                    "id": 9,
                    "name": "Tank A",
                    "description": null,
                    "field_labels": {"field1": "Temperature"}
                },
                "record_count": 1,
                "reported_fields": ["field1", "field2"],
                "records": [{
                    "created_at": "2025-01-01T00:00:00Z",
                    "entry_id": 1,
                    "fields": {"field1": 23.5, "field2": null}
                }]
            })
        );
    }

    #[test]
    fn test_dashboard_json_shape() {
        let dataset = parse_feed_body(BODY, 100).unwrap();
        let bindings = vec![
            FieldBinding::new(FieldName::Field1, "Temperature", "°C", Some("red")),
            FieldBinding::new(FieldName::Field2, "Humidity", "%", None),
        ];
        let dashboard = DashboardService::new(bindings).build(&dataset);
        let json = dashboard_to_json(dashboard);

        assert_eq!(json.title, "Tank A");
        assert_eq!(json.panels.len(), 2);
        assert!(json.panels[0].available);
        assert_eq!(json.panels[0].reading.as_ref().unwrap().display, "23.50 °C");
        assert_eq!(json.panels[0].points.len(), 1);
        assert!(!json.panels[1].available);
        assert!(json.panels[1].reading.is_none());
        assert!(json.panels[1].points.is_empty());
    }
}
