use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::TimelineError;
use crate::timeline_types::Record;

type Result<T> = std::result::Result<T, TimelineError>;

/// Append `.csv` unless the path already ends in `.csv` or `.CSV`.
pub fn normalize_csv_path(path: &Path) -> PathBuf {
    let text = path.as_os_str().to_string_lossy();
    if text.ends_with(".csv") || text.ends_with(".CSV") {
        path.to_path_buf()
    } else {
        PathBuf::from(format!("{text}.csv"))
    }
}

/// Write a `time,lat,lng` header followed by one row per record.
pub fn write_csv<W: Write>(records: &[Record], writer: W) -> Result<()> {
    if records.is_empty() {
        return Err(TimelineError::EmptyResult);
    }

    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the CSV into memory.
pub fn to_csv_string(records: &[Record]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    // The csv writer only emits the UTF-8 it was given.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the CSV to `path` (extension normalized), replacing any existing
/// file. Returns the path actually written.
pub fn write_csv_file(records: &[Record], path: &Path) -> Result<PathBuf> {
    if records.is_empty() {
        return Err(TimelineError::EmptyResult);
    }

    let path = normalize_csv_path(path);
    let file = File::create(&path)?;
    write_csv(records, file)?;

    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("2024-01-01T00:00:00Z", "10.0", "20.0"),
            Record::new("2024-01-01T00:01:00Z", "10.5", "20.5"),
            Record::new("2024-01-01T00:02:00Z", "-11.0", "-21.0"),
        ]
    }

    #[test]
    fn test_header_and_rows() {
        let csv = to_csv_string(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "time,lat,lng",
                "2024-01-01T00:00:00Z,10.0,20.0",
                "2024-01-01T00:01:00Z,10.5,20.5",
                "2024-01-01T00:02:00Z,-11.0,-21.0",
            ]
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(to_csv_string(&[]), Err(TimelineError::EmptyResult)));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(to_csv_string(&sample()).unwrap(), to_csv_string(&sample()).unwrap());
    }

    #[test]
    fn test_normalize_csv_path() {
        assert_eq!(normalize_csv_path(Path::new("out")), PathBuf::from("out.csv"));
        assert_eq!(normalize_csv_path(Path::new("out.csv")), PathBuf::from("out.csv"));
        assert_eq!(normalize_csv_path(Path::new("OUT.CSV")), PathBuf::from("OUT.CSV"));
        assert_eq!(
            normalize_csv_path(Path::new("dir/out.txt")),
            PathBuf::from("dir/out.txt.csv")
        );
    }
}
