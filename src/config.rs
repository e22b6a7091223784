//! Environment-based configuration.
//!
//! Values are read once at startup. A `.env` file is honoured via dotenvy.

use std::env;
use std::path::PathBuf;

use crate::error::{AppError, Result};

/// Runtime configuration for the portal
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// CSV fallback for the center directory when the hosted table is
    /// unreachable or empty
    pub center_spreadsheet: PathBuf,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL is not set".to_string()))?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let center_spreadsheet = env::var("CENTER_SPREADSHEET")
            .unwrap_or_else(|_| "data/center_locations.csv".to_string())
            .into();

        Ok(Self {
            database_url,
            bind_addr,
            center_spreadsheet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so DATABASE_URL manipulation cannot race a parallel test.
    #[test]
    fn config_from_env() {
        let prev = env::var("DATABASE_URL").ok();

        env::remove_var("DATABASE_URL");
        assert!(matches!(Config::from_env(), Err(AppError::Config(_))));

        env::set_var("DATABASE_URL", "postgres://localhost/portal");
        env::remove_var("BIND_ADDR");
        env::remove_var("CENTER_SPREADSHEET");
        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(
            config.center_spreadsheet,
            PathBuf::from("data/center_locations.csv")
        );

        match prev {
            Some(v) => env::set_var("DATABASE_URL", v),
            None => env::remove_var("DATABASE_URL"),
        }
    }
}
