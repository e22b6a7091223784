//! Form DTOs and field-level validation for the pricing entry pages.
//!
//! All numeric fields must be zero or greater; violations render an inline
//! error and block submission. The suite form additionally enforces the
//! custom-name requirement for "Other" and name-only, case-insensitive
//! uniqueness per center.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::pricing::models::{
    DailyPatch, DogSize, KennelSuite, NewDaily, NewPackage, NewSuite, PackagePatch, SuitePatch,
};
use crate::session::Selection;

/// Preset suite names shown in the boarding form dropdown.
pub const SUITE_NAME_OPTIONS: [&str; 6] = ["Standard", "Large", "Luxury", "Cat", "Cat Luxury", "Other"];

/// Validation failure surfaced inline on the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please enter a custom suite name.")]
    MissingCustomName,

    #[error("A suite named '{0}' already exists for this center.")]
    DuplicateSuite(String),

    #[error("Select at least one dog size.")]
    NoDogSizes,

    #[error("{0} must be zero or greater.")]
    NegativeAmount(&'static str),

    #[error("Number of days must be at least 1.")]
    TooFewDays,

    #[error("Select a center before adding pricing.")]
    NoCenterSelected,
}

fn require_non_negative(value: Decimal, field: &'static str) -> Result<Decimal, FormError> {
    if value < Decimal::ZERO {
        Err(FormError::NegativeAmount(field))
    } else {
        Ok(value)
    }
}

fn require_center(selection: &Selection) -> Result<(), FormError> {
    if selection.ctr_name.is_empty() {
        Err(FormError::NoCenterSelected)
    } else {
        Ok(())
    }
}

/// One feature per non-blank line, in entry order. Commas are ordinary
/// text, so "food, water included" stays a single feature.
fn parse_features(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Dog-size checkboxes arrive as presence-only fields.
fn collect_sizes(
    small: &Option<String>,
    medium: &Option<String>,
    big: &Option<String>,
    extra_big: &Option<String>,
) -> Vec<DogSize> {
    [
        (small, DogSize::Small),
        (medium, DogSize::Medium),
        (big, DogSize::Big),
        (extra_big, DogSize::ExtraBig),
    ]
    .into_iter()
    .filter_map(|(flag, size)| flag.as_ref().map(|_| size))
    .collect()
}

/// Boarding suite entry form.
#[derive(Debug, Deserialize)]
pub struct SuiteForm {
    pub suite_name: String,
    #[serde(default)]
    pub suite_name_custom: String,
    #[serde(default)]
    pub size_small: Option<String>,
    #[serde(default)]
    pub size_medium: Option<String>,
    #[serde(default)]
    pub size_big: Option<String>,
    #[serde(default)]
    pub size_extra_big: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_night: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_additional_dog: Decimal,
    pub num_kennels: i32,
    #[serde(default)]
    pub features: String,
}

impl SuiteForm {
    /// Resolve the final suite name: the preset, or the custom text when
    /// "Other" was chosen.
    fn final_suite_name(&self) -> Result<String, FormError> {
        if self.suite_name == "Other" {
            let custom = self.suite_name_custom.trim();
            if custom.is_empty() {
                return Err(FormError::MissingCustomName);
            }
            Ok(custom.to_string())
        } else {
            Ok(self.suite_name.trim().to_string())
        }
    }

    /// Validate against the current selection and the center's existing
    /// suites. Duplicate check is on name only, case-insensitive.
    pub fn validate(
        &self,
        selection: &Selection,
        full_address: &str,
        existing: &[KennelSuite],
    ) -> Result<NewSuite, FormError> {
        require_center(selection)?;
        let suite_name = self.final_suite_name()?;

        let duplicate = existing
            .iter()
            .any(|s| s.suite_name.to_lowercase() == suite_name.to_lowercase());
        if duplicate {
            return Err(FormError::DuplicateSuite(suite_name));
        }

        let dog_sizes = collect_sizes(
            &self.size_small,
            &self.size_medium,
            &self.size_big,
            &self.size_extra_big,
        );
        if dog_sizes.is_empty() {
            return Err(FormError::NoDogSizes);
        }

        if self.num_kennels < 0 {
            return Err(FormError::NegativeAmount("Number of kennels"));
        }

        Ok(NewSuite {
            ctr_name: selection.ctr_name.clone(),
            district_manager: selection.district_manager.clone(),
            full_address: full_address.to_string(),
            suite_name,
            dog_sizes,
            price_per_night: require_non_negative(self.price_per_night, "Price per night")?,
            price_additional_dog: require_non_negative(
                self.price_additional_dog,
                "Additional dog price",
            )?,
            num_kennels: self.num_kennels,
            features: parse_features(&self.features),
        })
    }
}

/// Inline edit form for an existing suite (full replace of mutable fields).
#[derive(Debug, Deserialize)]
pub struct SuiteEditForm {
    pub suite_name: String,
    #[serde(default)]
    pub size_small: Option<String>,
    #[serde(default)]
    pub size_medium: Option<String>,
    #[serde(default)]
    pub size_big: Option<String>,
    #[serde(default)]
    pub size_extra_big: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_night: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_additional_dog: Decimal,
    pub num_kennels: i32,
    #[serde(default)]
    pub features: String,
}

impl SuiteEditForm {
    pub fn validate(&self) -> Result<SuitePatch, FormError> {
        let suite_name = self.suite_name.trim();
        if suite_name.is_empty() {
            return Err(FormError::MissingCustomName);
        }
        let dog_sizes = collect_sizes(
            &self.size_small,
            &self.size_medium,
            &self.size_big,
            &self.size_extra_big,
        );
        if dog_sizes.is_empty() {
            return Err(FormError::NoDogSizes);
        }
        if self.num_kennels < 0 {
            return Err(FormError::NegativeAmount("Number of kennels"));
        }
        Ok(SuitePatch {
            suite_name: suite_name.to_string(),
            dog_sizes,
            price_per_night: require_non_negative(self.price_per_night, "Price per night")?,
            price_additional_dog: require_non_negative(
                self.price_additional_dog,
                "Additional dog price",
            )?,
            num_kennels: self.num_kennels,
            features: parse_features(&self.features),
        })
    }
}

/// Day-camp daily rates form.
#[derive(Debug, Deserialize)]
pub struct DailyForm {
    #[serde(with = "rust_decimal::serde::str")]
    pub dropin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub halfday: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub weekend: Decimal,
}

impl DailyForm {
    pub fn validate(
        &self,
        selection: &Selection,
        full_address: &str,
    ) -> Result<NewDaily, FormError> {
        require_center(selection)?;
        Ok(NewDaily {
            ctr_name: selection.ctr_name.clone(),
            district_manager: selection.district_manager.clone(),
            full_address: full_address.to_string(),
            dropin: require_non_negative(self.dropin, "Daily drop-in price")?,
            halfday: require_non_negative(self.halfday, "Half-day price")?,
            weekend: require_non_negative(self.weekend, "Weekend price")?,
        })
    }

    pub fn validate_patch(&self) -> Result<DailyPatch, FormError> {
        Ok(DailyPatch {
            dropin: require_non_negative(self.dropin, "Daily drop-in price")?,
            halfday: require_non_negative(self.halfday, "Half-day price")?,
            weekend: require_non_negative(self.weekend, "Weekend price")?,
        })
    }
}

/// Day-camp package form.
#[derive(Debug, Deserialize)]
pub struct PackageForm {
    pub days: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(default)]
    pub expiration: String,
}

impl PackageForm {
    pub fn validate(
        &self,
        selection: &Selection,
        full_address: &str,
    ) -> Result<NewPackage, FormError> {
        require_center(selection)?;
        let patch = self.validate_patch()?;
        Ok(NewPackage {
            ctr_name: selection.ctr_name.clone(),
            district_manager: selection.district_manager.clone(),
            full_address: full_address.to_string(),
            days: patch.days,
            price: patch.price,
            expiration: patch.expiration,
        })
    }

    pub fn validate_patch(&self) -> Result<PackagePatch, FormError> {
        if self.days < 1 {
            return Err(FormError::TooFewDays);
        }
        Ok(PackagePatch {
            days: self.days,
            price: require_non_negative(self.price, "Package price")?,
            expiration: self.expiration.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn selection() -> Selection {
        Selection {
            district_manager: "Pat Jones".to_string(),
            ctr_name: "Boston".to_string(),
        }
    }

    fn suite_form(name: &str, custom: &str) -> SuiteForm {
        SuiteForm {
            suite_name: name.to_string(),
            suite_name_custom: custom.to_string(),
            size_small: Some("on".to_string()),
            size_medium: None,
            size_big: None,
            size_extra_big: None,
            price_per_night: dec!(45.00),
            price_additional_dog: dec!(20.00),
            num_kennels: 10,
            features: "climate controlled\n\nfood, water included\n".to_string(),
        }
    }

    fn existing_suite(name: &str) -> KennelSuite {
        KennelSuite {
            id: Uuid::new_v4(),
            ctr_name: "Boston".to_string(),
            district_manager: "Pat Jones".to_string(),
            full_address: "123 Main St".to_string(),
            suite_name: name.to_string(),
            dog_sizes: vec!["small".to_string()],
            price_per_night: dec!(45.00),
            price_additional_dog: dec!(20.00),
            num_kennels: 10,
            features: vec![],
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn valid_suite_passes_and_parses_features() {
        let new = suite_form("Standard", "")
            .validate(&selection(), "123 Main St", &[])
            .unwrap();
        assert_eq!(new.suite_name, "Standard");
        // Lines delimit features; a comma inside a line is ordinary text.
        assert_eq!(new.features, vec!["climate controlled", "food, water included"]);
        assert_eq!(new.dog_sizes, vec![DogSize::Small]);
        assert_eq!(new.ctr_name, "Boston");
        assert_eq!(new.full_address, "123 Main St");
    }

    #[test]
    fn duplicate_suite_name_is_rejected_case_insensitively() {
        let existing = vec![existing_suite("Standard")];
        let err = suite_form("Standard", "")
            .validate(&selection(), "123 Main St", &existing)
            .unwrap_err();
        assert!(matches!(err, FormError::DuplicateSuite(_)));

        // Same name, different case, via the custom-name path.
        let err = suite_form("Other", "sTaNdArD")
            .validate(&selection(), "123 Main St", &existing)
            .unwrap_err();
        assert!(matches!(err, FormError::DuplicateSuite(_)));
    }

    #[test]
    fn other_requires_a_custom_name() {
        let err = suite_form("Other", "   ")
            .validate(&selection(), "123 Main St", &[])
            .unwrap_err();
        assert_eq!(err, FormError::MissingCustomName);
    }

    #[test]
    fn at_least_one_dog_size_is_required() {
        let mut form = suite_form("Standard", "");
        form.size_small = None;
        let err = form.validate(&selection(), "123 Main St", &[]).unwrap_err();
        assert_eq!(err, FormError::NoDogSizes);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut form = suite_form("Standard", "");
        form.price_per_night = dec!(-1);
        let err = form.validate(&selection(), "123 Main St", &[]).unwrap_err();
        assert!(matches!(err, FormError::NegativeAmount("Price per night")));

        let mut form = suite_form("Standard", "");
        form.num_kennels = -2;
        let err = form.validate(&selection(), "123 Main St", &[]).unwrap_err();
        assert!(matches!(err, FormError::NegativeAmount("Number of kennels")));

        let daily = DailyForm {
            dropin: dec!(28.00),
            halfday: dec!(-14.00),
            weekend: dec!(14.00),
        };
        let err = daily.validate(&selection(), "123 Main St").unwrap_err();
        assert!(matches!(err, FormError::NegativeAmount("Half-day price")));
    }

    #[test]
    fn empty_center_selection_blocks_submission() {
        let err = suite_form("Standard", "")
            .validate(&Selection::sentinel(), "", &[])
            .unwrap_err();
        assert_eq!(err, FormError::NoCenterSelected);
    }

    #[test]
    fn package_round_trips_through_validation() {
        let form = PackageForm {
            days: 5,
            price: dec!(200.00),
            expiration: " 30-day expiration ".to_string(),
        };
        let new = form.validate(&selection(), "123 Main St").unwrap();
        assert_eq!(new.days, 5);
        assert_eq!(new.price, dec!(200.00));
        assert_eq!(new.expiration, "30-day expiration");
    }

    #[test]
    fn package_needs_at_least_one_day() {
        let form = PackageForm {
            days: 0,
            price: dec!(100.00),
            expiration: String::new(),
        };
        assert_eq!(
            form.validate(&selection(), "x").unwrap_err(),
            FormError::TooFewDays
        );
    }
}
