//! CSV fallback source for the center directory.
//!
//! The spreadsheet carries human-edited headers; matching is case- and
//! space-insensitive so `"Ctr Name"`, `"ctr name"` and `" CTR  NAME "`
//! all resolve to the same column.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::directory::models::{Center, CenterImportRow};
use crate::error::{AppError, Result};

const COL_DISTRICT_MANAGER: &str = "district manager";
const COL_CTR_NAME: &str = "ctr name";
const COL_FULL_ADDRESS: &str = "full address";

/// Normalise a header for lookup: lowercase, trimmed, inner runs of
/// whitespace collapsed to a single space.
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Map normalised header name to column index.
fn header_index(headers: &csv::StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (normalize_header(h), i))
        .collect()
}

fn column<'r>(
    record: &'r csv::StringRecord,
    index: &HashMap<String, usize>,
    name: &str,
) -> Option<&'r str> {
    index.get(name).and_then(|&i| record.get(i))
}

/// Read selector-level center rows (manager, name, address) from a CSV file.
pub fn load_centers(path: &Path) -> Result<Vec<Center>> {
    let mut reader = csv::Reader::from_path(path)?;
    parse_centers(&mut reader)
}

/// Parse selector-level center rows from any CSV reader.
///
/// Rows missing the district manager or center name are skipped, matching
/// how blank spreadsheet rows are treated by the importer.
pub fn parse_centers<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<Center>> {
    let index = header_index(reader.headers()?);
    for required in [COL_DISTRICT_MANAGER, COL_CTR_NAME, COL_FULL_ADDRESS] {
        if !index.contains_key(required) {
            return Err(AppError::DirectoryUnavailable(format!(
                "spreadsheet is missing required column '{}'",
                required
            )));
        }
    }

    let mut centers = Vec::new();
    for record in reader.records() {
        let record = record?;
        let district_manager = column(&record, &index, COL_DISTRICT_MANAGER)
            .unwrap_or("")
            .trim();
        let ctr_name = column(&record, &index, COL_CTR_NAME).unwrap_or("").trim();
        if district_manager.is_empty() || ctr_name.is_empty() {
            continue;
        }
        let full_address = column(&record, &index, COL_FULL_ADDRESS)
            .unwrap_or("")
            .trim();
        centers.push(Center {
            district_manager: district_manager.to_string(),
            ctr_name: ctr_name.to_string(),
            full_address: full_address.to_string(),
        });
    }
    Ok(centers)
}

/// Interpret the spreadsheet's open/acquisition flags as booleans.
pub fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "yes" | "true" | "1" | "t" | "y"
    )
}

/// Read full import rows, including the operational metadata columns.
///
/// Only the manager and center-name columns are required; every other
/// column imports as an empty string when absent.
pub fn load_import_rows(path: &Path) -> Result<Vec<CenterImportRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    parse_import_rows(&mut reader)
}

/// Parse full import rows from any CSV reader.
pub fn parse_import_rows<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<CenterImportRow>> {
    let index = header_index(reader.headers()?);
    for required in [COL_DISTRICT_MANAGER, COL_CTR_NAME] {
        if !index.contains_key(required) {
            return Err(AppError::DirectoryUnavailable(format!(
                "spreadsheet is missing required column '{}'",
                required
            )));
        }
    }

    let text = |record: &csv::StringRecord, name: &str| -> String {
        column(record, &index, name).unwrap_or("").trim().to_string()
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(CenterImportRow {
            ctr_cd: text(&record, "ctr_cd"),
            ctr_name: text(&record, COL_CTR_NAME),
            is_open: truthy(&text(&record, "is_open")),
            is_acquisition: truthy(&text(&record, "is_acquisition")),
            full_address: text(&record, COL_FULL_ADDRESS),
            state: text(&record, "state"),
            zipcode: text(&record, "zipcode"),
            nelson_dma: text(&record, "nelson dma"),
            dma_code: text(&record, "dma code"),
            district_manager: text(&record, COL_DISTRICT_MANAGER),
            market_manager: text(&record, "market manager"),
            center_manager: text(&record, "center manager"),
            crm_email: text(&record, "crm email"),
            services: text(&record, "services"),
            system: text(&record, "system"),
            website: text(&record, "website"),
            google_ads_account: text(&record, "google ads account"),
            google_ads_reports_links: text(&record, "google ads reports links"),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(csv_text: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(csv_text.as_bytes())
    }

    #[test]
    fn normalize_header_is_case_and_space_insensitive() {
        assert_eq!(normalize_header("District Manager"), "district manager");
        assert_eq!(normalize_header("  CTR   NAME "), "ctr name");
        assert_eq!(normalize_header("full address"), "full address");
    }

    #[test]
    fn parses_centers_with_mixed_case_headers() {
        let mut r = reader(
            "District Manager,CTR Name,Full Address\n\
             Pat Jones,Boston,123 Main St\n\
             Pat Jones,Dallas,500 Elm St\n",
        );
        let centers = parse_centers(&mut r).unwrap();
        assert_eq!(centers.len(), 2);
        assert_eq!(centers[0].district_manager, "Pat Jones");
        assert_eq!(centers[1].ctr_name, "Dallas");
        assert_eq!(centers[1].full_address, "500 Elm St");
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let mut r = reader("District Manager,Full Address\nPat,123 Main St\n");
        let err = parse_centers(&mut r).unwrap_err();
        assert!(err.to_string().contains("ctr name"));
    }

    #[test]
    fn rows_without_manager_or_center_are_skipped() {
        let mut r = reader(
            "district manager,ctr name,full address\n\
             ,Boston,123 Main St\n\
             Pat Jones,,456 Oak Ave\n\
             Pat Jones,Chicago,789 Lake Dr\n",
        );
        let centers = parse_centers(&mut r).unwrap();
        assert_eq!(centers.len(), 1);
        assert_eq!(centers[0].ctr_name, "Chicago");
    }

    #[test]
    fn truthy_accepts_common_spellings() {
        for v in ["yes", "Yes", "TRUE", "1", "t", "Y"] {
            assert!(truthy(v), "{v} should be truthy");
        }
        for v in ["no", "0", "false", "", "maybe"] {
            assert!(!truthy(v), "{v} should be falsy");
        }
    }

    #[test]
    fn import_rows_carry_optional_metadata() {
        let mut r = reader(
            "ctr_cd,Ctr Name,is_open,District Manager,Website\n\
             BF001,Boston,1,Pat Jones,https://example.com/boston\n",
        );
        let rows = parse_import_rows(&mut r).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ctr_cd, "BF001");
        assert!(rows[0].is_open);
        assert!(!rows[0].is_acquisition);
        assert_eq!(rows[0].website, "https://example.com/boston");
        // Columns absent from the sheet import as empty.
        assert_eq!(rows[0].crm_email, "");
        assert!(rows[0].has_required_fields());
    }
}
