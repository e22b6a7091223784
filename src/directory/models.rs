//! Center directory models

use serde::Serialize;
use sqlx::FromRow;

/// A single physical pet-care location, as used by the page selectors.
///
/// Identity is `(district_manager, ctr_name)`. Read-only reference data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Center {
    pub district_manager: String,
    pub ctr_name: String,
    pub full_address: String,
}

/// Full directory row consumed by the one-time import.
///
/// Carries the operational metadata columns from the location spreadsheet in
/// addition to the three fields the selectors use. Optional columns import as
/// empty strings when absent.
#[derive(Debug, Clone, Default)]
pub struct CenterImportRow {
    pub ctr_cd: String,
    pub ctr_name: String,
    pub is_open: bool,
    pub is_acquisition: bool,
    pub full_address: String,
    pub state: String,
    pub zipcode: String,
    pub nelson_dma: String,
    pub dma_code: String,
    pub district_manager: String,
    pub market_manager: String,
    pub center_manager: String,
    pub crm_email: String,
    pub services: String,
    pub system: String,
    pub website: String,
    pub google_ads_account: String,
    pub google_ads_reports_links: String,
}

impl CenterImportRow {
    /// Rows without a center name or district manager cannot be keyed and
    /// are skipped by the importer.
    pub fn has_required_fields(&self) -> bool {
        !self.ctr_name.trim().is_empty() && !self.district_manager.trim().is_empty()
    }
}
