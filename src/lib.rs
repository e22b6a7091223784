//! Pet-care center pricing portal.
//!
//! A server-rendered Axum application for collecting boarding and day-camp
//! pricing per center, backed by PostgreSQL with a spreadsheet fallback for
//! the center directory.

use std::sync::Arc;

use sqlx::PgPool;

pub mod config;
pub mod directory;
pub mod error;
pub mod export;
pub mod pricing;
pub mod routes;
pub mod session;

pub use config::Config;
pub use error::{AppError, Result};

use pricing::{DailyStore, PackageStore, SuiteStore};
use session::Sessions;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub sessions: Sessions,
    pub suites: SuiteStore,
    pub daily: DailyStore,
    pub packages: PackageStore,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            suites: SuiteStore::new(db.clone()),
            daily: DailyStore::new(db.clone()),
            packages: PackageStore::new(db.clone()),
            sessions: Sessions::new(),
            config: Arc::new(config),
            db,
        }
    }
}
