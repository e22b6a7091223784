//! JSON export of a full intake submission.
//!
//! The artifact is human-named by center and date, e.g.
//! `pricing_intake_Boston_North_20260826.json`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::pricing::models::{DayCampDaily, DayCampPackage, KennelSuite};
use crate::session::Selection;

/// A full intake submission for one center.
#[derive(Debug, Serialize)]
pub struct IntakeExport {
    pub ctr_name: String,
    pub district_manager: String,
    pub full_address: String,
    pub submitted_at: DateTime<Utc>,
    pub kennel_suites: Vec<KennelSuite>,
    pub daycamp_daily: Vec<DayCampDaily>,
    pub daycamp_packages: Vec<DayCampPackage>,
}

impl IntakeExport {
    pub fn assemble(
        selection: &Selection,
        full_address: &str,
        kennel_suites: Vec<KennelSuite>,
        daycamp_daily: Vec<DayCampDaily>,
        daycamp_packages: Vec<DayCampPackage>,
    ) -> Self {
        Self {
            ctr_name: selection.ctr_name.clone(),
            district_manager: selection.district_manager.clone(),
            full_address: full_address.to_string(),
            submitted_at: Utc::now(),
            kennel_suites,
            daycamp_daily,
            daycamp_packages,
        }
    }

    pub fn filename(&self) -> String {
        export_filename(&self.ctr_name, self.submitted_at.date_naive())
    }
}

/// Download name for the export artifact. Spaces in the center name become
/// underscores so the filename survives Content-Disposition handling.
pub fn export_filename(ctr_name: &str, date: NaiveDate) -> String {
    format!(
        "pricing_intake_{}_{}.json",
        ctr_name.replace(' ', "_"),
        date.format("%Y%m%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_replaces_spaces_and_stamps_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        assert_eq!(
            export_filename("Boston North", date),
            "pricing_intake_Boston_North_20260826.json"
        );
        assert_eq!(
            export_filename("Dallas", date),
            "pricing_intake_Dallas_20260826.json"
        );
    }

    #[test]
    fn assemble_copies_center_identity() {
        let selection = Selection {
            district_manager: "Pat Jones".to_string(),
            ctr_name: "Boston".to_string(),
        };
        let export = IntakeExport::assemble(&selection, "123 Main St", vec![], vec![], vec![]);
        assert_eq!(export.ctr_name, "Boston");
        assert_eq!(export.district_manager, "Pat Jones");
        assert_eq!(export.full_address, "123 Main St");
        assert!(export.kennel_suites.is_empty());
    }
}
