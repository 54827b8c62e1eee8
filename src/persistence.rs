// File: src/persistence.rs
use crate::core::types::FieldRecord;
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Reads a candidate pool from a JSON array of objects.
///
/// Strings are kept as they are, numbers and booleans are stringified, and
/// anything else (null, arrays, nested objects) is dropped: the engine only
/// ever sees named string fields.
pub fn load_pool_json(path: &Path) -> Result<Vec<FieldRecord>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let rows: Vec<serde_json::Map<String, Value>> = serde_json::from_reader(BufReader::new(file))?;
    let records: Vec<FieldRecord> = rows.into_iter().map(record_from_json).collect();
    debug!(path = %path.display(), records = records.len(), "loaded pool");
    Ok(records)
}

fn record_from_json(row: serde_json::Map<String, Value>) -> FieldRecord {
    let mut record = FieldRecord::new();
    for (name, value) in row {
        match value {
            Value::String(s) => record.insert(&name, &s),
            Value::Number(n) => record.insert(&name, &n.to_string()),
            Value::Bool(b) => record.insert(&name, if b { "true" } else { "false" }),
            Value::Null | Value::Array(_) | Value::Object(_) => {}
        }
    }
    record
}

/// Writes a bincode snapshot of the pool, atomically replacing `path`.
pub fn save_snapshot(records: &[FieldRecord], path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| Error::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| Error::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        bincode::serialize_into(&mut writer, records)?;
        writer.flush().map_err(|e| Error::io(temp_file.path(), e))?;
    }

    temp_file.persist(path)?;
    debug!(path = %path.display(), records = records.len(), "saved pool snapshot");
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<Vec<FieldRecord>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let records: Vec<FieldRecord> = bincode::deserialize_from(BufReader::new(file))?;
    debug!(path = %path.display(), records = records.len(), "loaded pool snapshot");
    Ok(records)
}

/// Loads a pool by extension: `.json` is parsed as JSON, anything else is
/// read as a snapshot.
pub fn load_pool(path: &Path) -> Result<Vec<FieldRecord>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_pool_json(path),
        _ => load_snapshot(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Record;

    #[test]
    fn json_values_become_string_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        fs::write(
            &path,
            r#"[{"name": "Murugan", "billNo": 42, "paid": true, "city": null, "items": ["rice"]},
                {"city": null}]"#,
        )
        .unwrap();
        let records = load_pool_json(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].len(), 3);
        assert_eq!(records[0].field("name"), Some("Murugan"));
        assert_eq!(records[0].field("billNo"), Some("42"));
        assert_eq!(records[0].field("paid"), Some("true"));
        assert_eq!(records[0].field("city"), None);
        assert_eq!(records[0].field("items"), None);
        assert!(records[1].is_empty());
    }

    #[test]
    fn snapshot_round_trip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pool.bin");
        let records = vec![FieldRecord::new().with("name", "முருகன்").with("city", "Madurai")];
        save_snapshot(&records, &path).unwrap();
        assert_eq!(load_pool(&path).unwrap(), records);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_pool_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_pool_json(&path), Err(Error::Json(_))));
    }
}
