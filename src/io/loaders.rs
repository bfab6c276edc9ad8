//! CSV loaders for layout and SKU data.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{PickError, Result};
use crate::models::LocationRecord;

/// Reads location records from a CSV file with a header row and
/// `name, x, y` columns.
pub fn read_locations<P: AsRef<Path>>(path: P) -> Result<Vec<LocationRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line() as usize);
        let name = field(&row, 0, line)?;
        let x = parse_coord(&row, 1, line)?;
        let y = parse_coord(&row, 2, line)?;
        records.push(LocationRecord::new(name, x, y));
    }
    Ok(records)
}

/// Reads a SKU → location map from a CSV file with a header row and
/// `location, sku` columns. Location names are normalized.
pub fn read_sku_locations<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut map = HashMap::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line() as usize);
        let location = field(&row, 0, line)?;
        let sku = field(&row, 1, line)?;
        map.insert(sku.to_string(), normalize_name(location));
    }
    Ok(map)
}

/// Expands a bare rack number to the site's canonical slot name:
///
/// - `"1"` → `"801-01-A-01"`
/// - `"14"` → `"801-14-A-01"`
/// - `"114"` → `"801-114-A-01"`
///
/// Longer names pass through unchanged.
pub fn normalize_name(name: &str) -> String {
    match name.len() {
        1 => format!("801-0{name}-A-01"),
        2 | 3 => format!("801-{name}-A-01"),
        _ => name.to_string(),
    }
}

fn field<'a>(row: &'a csv::StringRecord, index: usize, line: usize) -> Result<&'a str> {
    row.get(index).ok_or_else(|| PickError::MalformedRecord {
        line,
        reason: format!("missing column {index}"),
    })
}

fn parse_coord(row: &csv::StringRecord, index: usize, line: usize) -> Result<f64> {
    let raw = field(row, index, line)?;
    raw.trim()
        .parse()
        .map_err(|_| PickError::MalformedRecord {
            line,
            reason: format!("invalid coordinate `{raw}`"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn test_read_locations() {
        let file = write_temp("name,x,y\n801-01-A-01,5.0,0.0\n801-02-A-01,15.5,18.75\n");
        let records = read_locations(file.path()).expect("reads");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "801-01-A-01");
        assert_eq!(records[1].x, 15.5);
        assert_eq!(records[1].y, 18.75);
    }

    #[test]
    fn test_read_locations_bad_coordinate() {
        let file = write_temp("name,x,y\n801-01-A-01,oops,0.0\n");
        let err = read_locations(file.path());
        assert!(matches!(
            err,
            Err(PickError::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_read_locations_missing_column() {
        let file = write_temp("name,x,y\n801-01-A-01,5.0\n");
        let err = read_locations(file.path());
        assert!(matches!(err, Err(PickError::MalformedRecord { .. })));
    }

    #[test]
    fn test_read_sku_locations_normalizes() {
        let file = write_temp("location,sku\n14,36241-77617-03\n801-20-B-02,36241-77617-04\n");
        let map = read_sku_locations(file.path()).expect("reads");
        assert_eq!(map["36241-77617-03"], "801-14-A-01");
        assert_eq!(map["36241-77617-04"], "801-20-B-02");
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("1"), "801-01-A-01");
        assert_eq!(normalize_name("14"), "801-14-A-01");
        assert_eq!(normalize_name("114"), "801-114-A-01");
        assert_eq!(normalize_name("801-01-A-01"), "801-01-A-01");
    }
}
