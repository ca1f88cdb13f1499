// CSV export of a normalized dataset
use crate::domain::feed::TelemetryDataset;
use chrono::SecondsFormat;
use std::io::Write;

pub const TIMESTAMP_COLUMN: &str = "created_at";
pub const ENTRY_ID_COLUMN: &str = "entry_id";

/// Header is the timestamp, the entry id and every field reported by the feed.
/// Absent cells are written as empty strings.
pub fn write_csv<W: Write>(dataset: &TelemetryDataset, writer: W) -> csv::Result<()> {
    let fields = dataset.reported_fields();
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![TIMESTAMP_COLUMN, ENTRY_ID_COLUMN];
    header.extend(fields.iter().map(|f| f.key()));
    wtr.write_record(&header)?;

    for record in dataset.records() {
        let mut row = Vec::with_capacity(fields.len() + 2);
        row.push(record.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true));
        row.push(record.entry_id.map(|id| id.to_string()).unwrap_or_default());
        for field in &fields {
            row.push(
                record
                    .cell(*field)
                    .value()
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_bytes(dataset: &TelemetryDataset) -> csv::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(dataset, &mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::normalizer::parse_feed_body;
    use crate::domain::feed::{Cell, FieldName};
    use chrono::DateTime;

    const BODY: &str = r#"{"feeds": [
        {"created_at": "2025-01-01T00:00:00Z", "entry_id": 41, "field1": "23.5", "field2": "bad", "field7": "0.125"},
        {"created_at": "2025-01-01T00:00:30+02:00", "entry_id": 42, "field1": 24, "field2": "60.25"},
        {"created_at": "2025-01-01T00:01:00Z", "field1": null}
    ]}"#;

    #[test]
    fn test_header_lists_reported_fields() {
        let dataset = parse_feed_body(BODY, 100).unwrap();
        let csv = String::from_utf8(to_csv_bytes(&dataset).unwrap()).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "created_at,entry_id,field1,field2,field7");
    }

    #[test]
    fn test_round_trip_through_csv_reader() {
        let dataset = parse_feed_body(BODY, 100).unwrap();
        let bytes = to_csv_bytes(&dataset).unwrap();

        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
        let fields: Vec<FieldName> = headers[2..].iter().map(|h| h.parse().unwrap()).collect();
        assert_eq!(fields, dataset.reported_fields());

        let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), dataset.len());

        for (row, record) in rows.iter().zip(dataset.records()) {
            let ts = DateTime::parse_from_rfc3339(&row[0]).unwrap();
            assert_eq!(ts, record.created_at);
            assert_eq!(ts.offset(), record.created_at.offset());

            let entry_id = (!row[1].is_empty()).then(|| row[1].parse::<u64>().unwrap());
            assert_eq!(entry_id, record.entry_id);

            for (idx, field) in fields.iter().enumerate() {
                let raw = &row[idx + 2];
                let cell = if raw.is_empty() {
                    Cell::Absent
                } else {
                    Cell::Numeric(raw.parse().unwrap())
                };
                assert_eq!(cell, record.cell(*field));
            }
        }
    }

    #[test]
    fn test_empty_dataset_writes_header_only() {
        let dataset = TelemetryDataset::empty(None);
        let csv = String::from_utf8(to_csv_bytes(&dataset).unwrap()).unwrap();
        assert_eq!(csv, "created_at,entry_id\n");
    }
}
