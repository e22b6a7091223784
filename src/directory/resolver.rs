//! Two-tier directory resolution: hosted table first, spreadsheet second.
//!
//! The tier that actually served the data is surfaced to the caller, along
//! with a warning when the fallback was taken or the result is empty, so
//! pages can show it rather than silently degrading.

use std::path::Path;

use sqlx::PgPool;

use crate::directory::models::Center;
use crate::directory::spreadsheet;
use crate::error::Result;

/// Which tier supplied the directory data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorySource {
    Hosted,
    Spreadsheet,
}

/// Resolved center directory for one page load.
#[derive(Debug, Clone)]
pub struct Directory {
    centers: Vec<Center>,
    pub source: DirectorySource,
    /// Set when the fallback was taken or the directory came back empty.
    pub warning: Option<String>,
}

async fn fetch_hosted(pool: &PgPool) -> std::result::Result<Vec<Center>, sqlx::Error> {
    sqlx::query_as::<_, Center>(
        r#"
        SELECT district_manager, ctr_name, full_address
        FROM centers
        WHERE active = true
        ORDER BY district_manager, ctr_name
        "#,
    )
    .fetch_all(pool)
    .await
}

impl Directory {
    /// Resolve the directory: hosted table first, spreadsheet when the
    /// hosted source errors or is empty.
    pub async fn load(pool: &PgPool, spreadsheet_path: &Path) -> Result<Self> {
        match fetch_hosted(pool).await {
            Ok(centers) if !centers.is_empty() => Ok(Self {
                centers,
                source: DirectorySource::Hosted,
                warning: None,
            }),
            Ok(_) => {
                tracing::warn!("hosted centers table is empty, using spreadsheet fallback");
                Self::load_spreadsheet(
                    spreadsheet_path,
                    "The hosted center directory is empty; showing spreadsheet data.",
                )
            }
            Err(e) => {
                tracing::warn!("hosted centers table unreachable ({}), using spreadsheet", e);
                Self::load_spreadsheet(
                    spreadsheet_path,
                    "The hosted center directory is unreachable; showing spreadsheet data.",
                )
            }
        }
    }

    fn load_spreadsheet(path: &Path, warning: &str) -> Result<Self> {
        let centers = spreadsheet::load_centers(path)?;
        let warning = if centers.is_empty() {
            format!("{} No center rows were found.", warning)
        } else {
            warning.to_string()
        };
        Ok(Self {
            centers,
            source: DirectorySource::Spreadsheet,
            warning: Some(warning),
        })
    }

    /// Build a directory from in-memory rows.
    pub fn from_centers(centers: Vec<Center>, source: DirectorySource) -> Self {
        Self {
            centers,
            source,
            warning: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Sorted, de-duplicated district manager names.
    pub fn managers(&self) -> Vec<String> {
        let mut managers: Vec<String> = self
            .centers
            .iter()
            .map(|c| c.district_manager.clone())
            .collect();
        managers.sort();
        managers.dedup();
        managers
    }

    /// Center names under a manager, in directory order.
    pub fn centers_for(&self, manager: &str) -> Vec<String> {
        self.centers
            .iter()
            .filter(|c| c.district_manager == manager)
            .map(|c| c.ctr_name.clone())
            .collect()
    }

    /// First center under a manager, used when a manager change resets the
    /// center selection.
    pub fn first_center_for(&self, manager: &str) -> Option<String> {
        self.centers
            .iter()
            .find(|c| c.district_manager == manager)
            .map(|c| c.ctr_name.clone())
    }

    /// Address of a center under a manager, if known. Center identity is
    /// the (manager, name) pair, so same-named centers under different
    /// managers resolve to their own addresses.
    pub fn address_of(&self, manager: &str, ctr_name: &str) -> Option<&str> {
        self.centers
            .iter()
            .find(|c| c.district_manager == manager && c.ctr_name == ctr_name)
            .map(|c| c.full_address.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Directory {
        Directory::from_centers(
            vec![
                Center {
                    district_manager: "Pat Jones".to_string(),
                    ctr_name: "Boston".to_string(),
                    full_address: "123 Main St".to_string(),
                },
                Center {
                    district_manager: "Pat Jones".to_string(),
                    ctr_name: "Chicago".to_string(),
                    full_address: "789 Lake Dr".to_string(),
                },
                Center {
                    district_manager: "Alex Smith".to_string(),
                    ctr_name: "Dallas".to_string(),
                    full_address: "500 Elm St".to_string(),
                },
            ],
            DirectorySource::Spreadsheet,
        )
    }

    #[test]
    fn managers_are_sorted_and_deduplicated() {
        assert_eq!(sample().managers(), vec!["Alex Smith", "Pat Jones"]);
    }

    #[test]
    fn centers_are_scoped_to_their_manager() {
        let dir = sample();
        assert_eq!(dir.centers_for("Pat Jones"), vec!["Boston", "Chicago"]);
        assert_eq!(dir.centers_for("Alex Smith"), vec!["Dallas"]);
        assert!(dir.centers_for("Nobody").is_empty());
    }

    #[test]
    fn first_center_and_address_lookup() {
        let dir = sample();
        assert_eq!(dir.first_center_for("Pat Jones").as_deref(), Some("Boston"));
        assert_eq!(dir.address_of("Alex Smith", "Dallas"), Some("500 Elm St"));
        assert_eq!(dir.address_of("Alex Smith", "Nowhere"), None);
        // The name alone is not enough; the center must belong to the manager.
        assert_eq!(dir.address_of("Pat Jones", "Dallas"), None);
    }

    #[test]
    fn same_center_name_under_two_managers_keeps_addresses_apart() {
        let dir = Directory::from_centers(
            vec![
                Center {
                    district_manager: "Alex Smith".to_string(),
                    ctr_name: "Springfield".to_string(),
                    full_address: "1 Alpha Rd".to_string(),
                },
                Center {
                    district_manager: "Pat Jones".to_string(),
                    ctr_name: "Springfield".to_string(),
                    full_address: "2 Beta Ave".to_string(),
                },
            ],
            DirectorySource::Hosted,
        );
        assert_eq!(dir.address_of("Alex Smith", "Springfield"), Some("1 Alpha Rd"));
        assert_eq!(dir.address_of("Pat Jones", "Springfield"), Some("2 Beta Ave"));
    }
}
