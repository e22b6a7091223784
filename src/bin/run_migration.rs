//! Run a SQL migration file against the hosted database.
//!
//! Usage: `run_migration [file.sql]`
//! Exits 0 on success, 1 on the first failed statement.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use petcare_pricing_portal::Config;

#[derive(Parser)]
#[command(about = "Run a SQL migration file")]
struct Args {
    /// Path to the migration SQL file
    #[arg(default_value = "sql/migrations/0001_init.sql")]
    migration_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    println!(
        "Running migration from file: {}",
        args.migration_file.display()
    );
    let migration_sql = std::fs::read_to_string(&args.migration_file)
        .with_context(|| format!("migration file {} not found", args.migration_file.display()))?;

    // Naive split on ';' is fine for our DDL files, which contain no
    // procedural bodies or string literals with semicolons.
    let statements: Vec<&str> = migration_sql
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let config = Config::from_env().context("configuration")?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    for (i, stmt) in statements.iter().enumerate() {
        println!("Executing statement {}/{}...", i + 1, statements.len());
        if let Err(e) = sqlx::query(stmt).execute(&pool).await {
            bail!("error executing statement {}: {}", i + 1, e);
        }
        println!("Statement {} executed successfully.", i + 1);
    }

    println!("Migration completed successfully!");
    Ok(())
}
