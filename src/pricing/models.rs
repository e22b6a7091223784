//! Database models for pricing entities.
//!
//! These models use sqlx's FromRow derive for direct database
//! deserialization. Prices are `Decimal` and serialize as strings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Dog size categories a kennel suite can accommodate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DogSize {
    Small,
    Medium,
    Big,
    ExtraBig,
}

impl DogSize {
    pub const ALL: [DogSize; 4] = [
        DogSize::Small,
        DogSize::Medium,
        DogSize::Big,
        DogSize::ExtraBig,
    ];

    /// Canonical label stored in the database and shown on forms.
    pub fn as_str(self) -> &'static str {
        match self {
            DogSize::Small => "small",
            DogSize::Medium => "medium",
            DogSize::Big => "big",
            DogSize::ExtraBig => "extra big",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "small" => Some(DogSize::Small),
            "medium" => Some(DogSize::Medium),
            "big" => Some(DogSize::Big),
            "extra big" => Some(DogSize::ExtraBig),
            _ => None,
        }
    }
}

impl std::fmt::Display for DogSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A priced boarding-unit offering, one row per suite type per center.
///
/// `suite_name` is unique per center, case-insensitively.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct KennelSuite {
    pub id: Uuid,
    pub ctr_name: String,
    pub district_manager: String,
    pub full_address: String,
    pub suite_name: String,
    /// Canonical dog-size labels, see [`DogSize::as_str`].
    pub dog_sizes: Vec<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_night: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_additional_dog: Decimal,
    pub num_kennels: i32,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl KennelSuite {
    /// Whether the suite accommodates the given canonical size label.
    pub fn has_size(&self, label: &str) -> bool {
        self.dog_sizes.iter().any(|s| s == label)
    }

    /// Sizes joined for card display, e.g. "small, medium".
    pub fn sizes_label(&self) -> String {
        self.dog_sizes.join(", ")
    }

    /// Features joined one per line for the edit textarea.
    pub fn features_text(&self) -> String {
        self.features.join("\n")
    }
}

/// Per-center day-camp daily rates.
///
/// Rows accumulate; the logically current record for a center is the most
/// recently created one.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DayCampDaily {
    pub id: Uuid,
    pub ctr_name: String,
    pub district_manager: String,
    pub full_address: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub dropin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub halfday: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub weekend: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A bundled multi-visit day-camp offer. Multiple per center allowed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DayCampPackage {
    pub id: Uuid,
    pub ctr_name: String,
    pub district_manager: String,
    pub full_address: String,
    pub days: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Free-text expiration policy, e.g. "30-day expiration".
    pub expiration: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated insert payload for a kennel suite.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSuite {
    pub ctr_name: String,
    pub district_manager: String,
    pub full_address: String,
    pub suite_name: String,
    pub dog_sizes: Vec<DogSize>,
    pub price_per_night: Decimal,
    pub price_additional_dog: Decimal,
    pub num_kennels: i32,
    pub features: Vec<String>,
}

/// Validated insert payload for daily rates.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDaily {
    pub ctr_name: String,
    pub district_manager: String,
    pub full_address: String,
    pub dropin: Decimal,
    pub halfday: Decimal,
    pub weekend: Decimal,
}

/// Validated insert payload for a day-camp package.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPackage {
    pub ctr_name: String,
    pub district_manager: String,
    pub full_address: String,
    pub days: i32,
    pub price: Decimal,
    pub expiration: String,
}

/// Full replace of a suite's mutable fields.
#[derive(Debug, Clone)]
pub struct SuitePatch {
    pub suite_name: String,
    pub dog_sizes: Vec<DogSize>,
    pub price_per_night: Decimal,
    pub price_additional_dog: Decimal,
    pub num_kennels: i32,
    pub features: Vec<String>,
}

/// Full replace of daily rates.
#[derive(Debug, Clone)]
pub struct DailyPatch {
    pub dropin: Decimal,
    pub halfday: Decimal,
    pub weekend: Decimal,
}

/// Full replace of a package's mutable fields.
#[derive(Debug, Clone)]
pub struct PackagePatch {
    pub days: i32,
    pub price: Decimal,
    pub expiration: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dog_size_labels_round_trip() {
        for size in DogSize::ALL {
            assert_eq!(DogSize::parse(size.as_str()), Some(size));
        }
        assert_eq!(DogSize::parse("giant"), None);
    }

    #[test]
    fn features_text_matches_the_one_per_line_entry_format() {
        let suite = KennelSuite {
            id: Uuid::new_v4(),
            ctr_name: "Boston".to_string(),
            district_manager: "Pat Jones".to_string(),
            full_address: "123 Main St".to_string(),
            suite_name: "Standard".to_string(),
            dog_sizes: vec!["small".to_string(), "medium".to_string()],
            price_per_night: Decimal::ZERO,
            price_additional_dog: Decimal::ZERO,
            num_kennels: 0,
            features: vec!["climate controlled".to_string(), "food, water included".to_string()],
            created_at: Utc::now(),
            updated_at: None,
        };
        assert_eq!(suite.features_text(), "climate controlled\nfood, water included");
        assert_eq!(suite.sizes_label(), "small, medium");
    }
}
