//! Reading the tool catalog from CSV
//!
//! The first row is the header. Every column is kept on the record under its
//! header text; rows shorter than the header leave the trailing columns
//! absent. Cell text, including `;`-separated lists, is stored verbatim.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ToolgraphError};
use crate::record::{columns, Record};

/// Parse a header-first CSV catalog, skipping blank rows
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ToolgraphError::invalid_catalog("missing header row"));
    }
    if !headers.iter().any(|h| h == columns::TOOL_NAME) {
        debug!("catalog has no '{}' column", columns::TOOL_NAME);
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in rdr.records() {
        let row = row?;
        let record = Record::from_pairs(
            headers
                .iter()
                .zip(row.iter())
                .filter(|(header, _)| !header.is_empty()),
        );

        if record.is_blank() {
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    debug!(records = records.len(), skipped, "read_catalog");
    Ok(records)
}

/// Parse a catalog file
pub fn read_catalog_path(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ToolgraphError::not_found("catalog", path.display())
        } else {
            ToolgraphError::Io(e)
        }
    })?;
    read_catalog(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = "\
Tool Name,Primary Function,Data Sources,Target User/Client,Environment Type,Description
ENCORE,Dependency mapping,Satellite; Field surveys,Financial institutions,Multiple,Explore natural capital
,,,,,
IBAT,Species screening,IUCN Red List,Corporates,Terrestrial,
";

    #[test]
    fn test_reads_records_and_skips_blank_rows() {
        let records = read_catalog(CATALOG.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), Some("ENCORE"));
        assert_eq!(records[1].get(columns::ENVIRONMENT_TYPE), "Terrestrial");
        assert_eq!(records[1].get(columns::DESCRIPTION), "");
    }

    #[test]
    fn test_semicolons_are_preserved() {
        let records = read_catalog(CATALOG.as_bytes()).unwrap();
        assert_eq!(
            records[0].get(columns::DATA_SOURCES),
            "Satellite; Field surveys"
        );
    }

    #[test]
    fn test_quoted_commas_stay_in_cell() {
        let csv = "Tool Name,Target User/Client\nLEAP,\"Corporates, Investors\"\n";
        let records = read_catalog(csv.as_bytes()).unwrap();
        assert_eq!(records[0].get(columns::TARGET_USER), "Corporates, Investors");
    }

    #[test]
    fn test_short_rows_and_extra_columns() {
        let csv = "Tool Name,Primary Function,TNFD Link\nA\nB,mapping,https://tnfd.global\n";
        let records = read_catalog(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(columns::PRIMARY_FUNCTION), "");
        assert_eq!(records[1].get("TNFD Link"), "https://tnfd.global");
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let err = read_catalog("".as_bytes()).unwrap_err();
        assert!(matches!(err, ToolgraphError::InvalidCatalog { .. }));
    }

    #[test]
    fn test_header_only_is_empty_catalog() {
        let records = read_catalog("Tool Name,Description\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();
        let records = read_catalog_path(file.path()).unwrap();
        assert_eq!(records.len(), 2);

        let missing = read_catalog_path(Path::new("/nonexistent/catalog.csv")).unwrap_err();
        assert!(matches!(missing, ToolgraphError::NotFound { .. }));
    }
}
