use crate::dashboard::{DashboardPayload, TableData};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Save the dashboard table as CSV: the headers, then one record per row.
/// Short rows are padded with empty cells.
pub fn save_table_csv<P: AsRef<Path>>(table: &TableData, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    let width = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.headers.len()))
        .max()
        .unwrap_or(0);
    if !table.headers.is_empty() {
        wtr.write_record(&table.headers)?;
    }
    for row in &table.rows {
        let mut record: Vec<String> = row.iter().map(|c| c.label()).collect();
        record.resize(width, String::new());
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a payload as pretty JSON.
pub fn save_payload_json<P: AsRef<Path>>(payload: &DashboardPayload, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(payload)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Read a payload from a JSON file.
pub fn load_payload_json<P: AsRef<Path>>(path: P) -> Result<DashboardPayload> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse dashboard payload {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::fallback_payload;
    use crate::models::Scalar;
    use tempfile::tempdir;

    #[test]
    fn table_csv_has_header_and_rows() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("table.csv");
        let table = TableData {
            title: "T".into(),
            headers: vec!["Product".into(), "Units".into(), "Growth".into()],
            rows: vec![
                vec![Scalar::from("iPad, Air"), Scalar::from(150), Scalar::from("+12%")],
                vec![Scalar::from("Watch")],
            ],
        };
        save_table_csv(&table, &p).unwrap();
        let text = std::fs::read_to_string(&p).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Product,Units,Growth");
        assert_eq!(lines[1], "\"iPad, Air\",150,+12%");
        assert_eq!(lines[2], "Watch,,");
    }

    #[test]
    fn payload_json_round_trip() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("payload.json");
        let payload = fallback_payload().unwrap();
        save_payload_json(&payload, &p).unwrap();
        let back = load_payload_json(&p).unwrap();
        assert_eq!(back.title(), payload.title());
        assert_eq!(back.charts.len(), payload.charts.len());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_payload_json("/definitely/not/here.json").unwrap_err();
        assert!(format!("{:#}", err).contains("not/here.json"));
    }
}
