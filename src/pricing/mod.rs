//! Pricing domain: entities, form validation, and per-entity stores.

pub mod forms;
pub mod models;
pub mod store;

pub use forms::{DailyForm, FormError, PackageForm, SuiteEditForm, SuiteForm};
pub use models::{DayCampDaily, DayCampPackage, DogSize, KennelSuite};
pub use store::{DailyStore, PackageStore, SuiteStore};
