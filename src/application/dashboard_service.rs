// Dashboard service - Use case for summarizing a dataset per configured quantity
use crate::domain::dashboard::{Dashboard, Panel};
use crate::domain::feed::TelemetryDataset;
use crate::domain::telemetry::{FieldBinding, Reading, SeriesData};

const READING_PRECISION: usize = 2;
const DEFAULT_TITLE: &str = "Channel telemetry";

#[derive(Clone)]
pub struct DashboardService {
    bindings: Vec<FieldBinding>,
}

impl DashboardService {
    pub fn new(bindings: Vec<FieldBinding>) -> Self {
        Self { bindings }
    }

    pub fn build(&self, dataset: &TelemetryDataset) -> Dashboard {
        let title = dataset
            .channel()
            .and_then(|c| c.name.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let panels = self
            .bindings
            .iter()
            .map(|binding| self.build_panel(binding, dataset))
            .collect();

        Dashboard::new(title, dataset.len(), panels)
    }

    fn build_panel(&self, binding: &FieldBinding, dataset: &TelemetryDataset) -> Panel {
        let Some((time, value)) = dataset.latest(binding.field) else {
            tracing::debug!(
                field = %binding.field,
                reported = dataset.is_reported(binding.field),
                "No numeric samples for {}",
                binding.title
            );
            return Panel::unavailable(binding.clone());
        };

        let series = SeriesData::new(
            binding.field,
            binding.title.clone(),
            binding.color.clone(),
            dataset.series(binding.field),
        );

        Panel {
            binding: binding.clone(),
            reading: Some(Reading::new(
                time.timestamp_millis(),
                value,
                READING_PRECISION,
            )),
            series: Some(series),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::normalizer::parse_feed_body;
    use crate::domain::feed::FieldName;

    #[test]
    fn test_panels_follow_bindings() {
        let dataset = parse_feed_body(
            r#"{
                "channel": {"name": "Tank A"},
                "feeds": [
                    {"created_at": "2025-01-01T00:00:00Z", "field1": "24.1", "field2": "61", "field4": "N/A"},
                    {"created_at": "2025-01-01T00:00:30Z", "field1": "24.3", "field2": null, "field4": "N/A"}
                ]
            }"#,
            100,
        )
        .unwrap();

        let dashboard = DashboardService::new(FieldBinding::defaults()).build(&dataset);

        assert_eq!(dashboard.title, "Tank A");
        assert_eq!(dashboard.record_count, 2);
        assert_eq!(dashboard.panels.len(), 6);

        let temperature = &dashboard.panels[0];
        assert_eq!(temperature.binding.field, FieldName::Field1);
        let reading = temperature.reading.as_ref().unwrap();
        assert_eq!(reading.display("°C"), "24.30 °C");
        assert_eq!(temperature.series.as_ref().unwrap().points.len(), 2);

        let humidity = &dashboard.panels[1];
        assert_eq!(humidity.reading.as_ref().unwrap().value, 61.0);
        assert_eq!(humidity.series.as_ref().unwrap().points.len(), 1);

        // reported but never numeric
        assert!(!dashboard.panels[2].available());
        // never reported
        assert!(!dashboard.panels[5].available());
    }

    #[test]
    fn test_default_title_without_channel_metadata() {
        let dataset = TelemetryDataset::empty(None);
        let dashboard = DashboardService::new(FieldBinding::defaults()).build(&dataset);

        assert_eq!(dashboard.title, DEFAULT_TITLE);
        assert!(dashboard.panels.iter().all(|p| !p.available()));
    }
}
