// Dashboard domain model
use super::telemetry::{FieldBinding, Reading, SeriesData};

#[derive(Debug, Clone)]
pub struct Panel {
    pub binding: FieldBinding,
    pub reading: Option<Reading>,
    pub series: Option<SeriesData>,
}

impl Panel {
    pub fn unavailable(binding: FieldBinding) -> Self {
        Self {
            binding,
            reading: None,
            series: None,
        }
    }

    pub fn available(&self) -> bool {
        self.reading.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub record_count: usize,
    pub panels: Vec<Panel>,
}

impl Dashboard {
    pub fn new(title: String, record_count: usize, panels: Vec<Panel>) -> Self {
        Self {
            title,
            record_count,
            panels,
        }
    }
}
