//! Center directory: district managers, centers, and addresses.
//!
//! The directory is reference data resolved from the hosted `centers` table
//! with a spreadsheet fallback. It is re-read on every page load.

pub mod models;
pub mod resolver;
pub mod spreadsheet;

pub use models::{Center, CenterImportRow};
pub use resolver::{Directory, DirectorySource};
