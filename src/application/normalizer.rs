// Feed normalizer - raw JSON payload to typed dataset
use crate::domain::feed::{Cell, ChannelInfo, FIELD_COUNT, FeedRecord, FieldName, TelemetryDataset};
use crate::error::{FetchError, FetchResult};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde_json::{Map, Value};

const FEEDS_KEY: &str = "feeds";
const CHANNEL_KEY: &str = "channel";
const CREATED_AT_KEY: &str = "created_at";
const ENTRY_ID_KEY: &str = "entry_id";

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Decode a feed response body, keeping at most the newest `limit` records.
pub fn parse_feed_body(body: &str, limit: usize) -> FetchResult<TelemetryDataset> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("body is not valid JSON: {e}")))?;

    let object = payload
        .as_object()
        .ok_or_else(|| FetchError::MalformedResponse("expected a JSON object".to_string()))?;

    let feeds = object
        .get(FEEDS_KEY)
        .ok_or_else(|| FetchError::MalformedResponse("missing 'feeds' array".to_string()))?
        .as_array()
        .ok_or_else(|| FetchError::MalformedResponse("'feeds' is not an array".to_string()))?;

    let channel = object.get(CHANNEL_KEY).and_then(parse_channel_info);

    let start = feeds.len().saturating_sub(limit);
    if start > 0 {
        tracing::warn!(
            received = feeds.len(),
            limit,
            "Source returned more records than requested, keeping the newest"
        );
    }

    normalize_feeds(&feeds[start..], channel)
}

pub fn normalize_feeds(
    feeds: &[Value],
    channel: Option<ChannelInfo>,
) -> FetchResult<TelemetryDataset> {
    if feeds.is_empty() {
        return Ok(TelemetryDataset::empty(channel));
    }

    let mut reported = [false; FIELD_COUNT];
    let mut records = Vec::with_capacity(feeds.len());

    for (idx, entry) in feeds.iter().enumerate() {
        let object = entry.as_object().ok_or_else(|| {
            FetchError::MalformedResponse(format!("record {idx} is not an object"))
        })?;
        records.push(normalize_record(idx, object, &mut reported)?);
    }

    Ok(TelemetryDataset::new(records, reported, channel))
}

fn normalize_record(
    idx: usize,
    object: &Map<String, Value>,
    reported: &mut [bool; FIELD_COUNT],
) -> FetchResult<FeedRecord> {
    let raw_ts = object
        .get(CREATED_AT_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            FetchError::MalformedResponse(format!("record {idx} has no created_at timestamp"))
        })?;

    let created_at = parse_timestamp(raw_ts).ok_or_else(|| {
        FetchError::MalformedResponse(format!(
            "record {idx} has unparseable created_at '{raw_ts}'"
        ))
    })?;

    let mut cells = [Cell::Absent; FIELD_COUNT];
    for field in FieldName::ALL {
        let raw = object.get(field.key());
        if raw.is_some() {
            reported[field.index()] = true;
        }
        cells[field.index()] = coerce_cell(raw);
    }

    Ok(FeedRecord {
        created_at,
        entry_id: object.get(ENTRY_ID_KEY).and_then(Value::as_u64),
        cells,
    })
}

/// ISO-8601 timestamp, keeping the offset as sent. A time without an offset is UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }

    if let Some(ts) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(ts);
    }

    let naive = raw
        .strip_suffix('Z')
        .or_else(|| raw.strip_suffix('z'))
        .unwrap_or(raw);
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|ts| ts.and_utc().fixed_offset())
}

/// Numbers and numeric-looking strings become `Numeric`; everything else is `Absent`.
pub fn coerce_cell(raw: Option<&Value>) -> Cell {
    let value = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match value {
        Some(v) if v.is_finite() => Cell::Numeric(v),
        _ => Cell::Absent,
    }
}

fn parse_channel_info(value: &Value) -> Option<ChannelInfo> {
    let object = value.as_object()?;
    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let mut field_labels: [Option<String>; FIELD_COUNT] = Default::default();
    for field in FieldName::ALL {
        field_labels[field.index()] = text(field.key());
    }

    Some(ChannelInfo {
        id: object.get("id").and_then(Value::as_u64),
        name: text("name"),
        description: text("description"),
        field_labels,
    })
}
