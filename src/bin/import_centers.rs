//! One-time import of the center location spreadsheet into the hosted
//! `centers` table.
//!
//! Usage: `import_centers <spreadsheet.csv> [--clear]`
//! Exits 0 when at least one center imported, 1 otherwise.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use petcare_pricing_portal::directory::spreadsheet;
use petcare_pricing_portal::directory::CenterImportRow;
use petcare_pricing_portal::Config;

#[derive(Parser)]
#[command(about = "Import center location data from a CSV spreadsheet")]
struct Args {
    /// Path to the location spreadsheet (CSV)
    #[arg(default_value = "data/center_locations.csv")]
    spreadsheet: PathBuf,

    /// Delete all existing rows from the centers table first
    #[arg(long)]
    clear: bool,
}

async fn insert_center(pool: &PgPool, row: &CenterImportRow) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO centers (
            ctr_cd, ctr_name, is_open, is_acquisition, full_address,
            state, zipcode, nelson_dma, dma_code, district_manager,
            market_manager, center_manager, crm_email, services, system,
            website, google_ads_account, google_ads_reports_links, active
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
            $11, $12, $13, $14, $15, $16, $17, $18, true
        )
        "#,
    )
    .bind(&row.ctr_cd)
    .bind(&row.ctr_name)
    .bind(row.is_open)
    .bind(row.is_acquisition)
    .bind(&row.full_address)
    .bind(&row.state)
    .bind(&row.zipcode)
    .bind(&row.nelson_dma)
    .bind(&row.dma_code)
    .bind(&row.district_manager)
    .bind(&row.market_manager)
    .bind(&row.center_manager)
    .bind(&row.crm_email)
    .bind(&row.services)
    .bind(&row.system)
    .bind(&row.website)
    .bind(&row.google_ads_account)
    .bind(&row.google_ads_reports_links)
    .execute(pool)
    .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    println!("Reading data from {}...", args.spreadsheet.display());
    let rows = spreadsheet::load_import_rows(&args.spreadsheet)
        .with_context(|| format!("failed to read {}", args.spreadsheet.display()))?;

    let config = Config::from_env().context("configuration")?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if args.clear {
        println!("Clearing existing centers table...");
        sqlx::query("DELETE FROM centers").execute(&pool).await?;
        println!("Existing data cleared.");
    }

    println!("Found {} centers to import.", rows.len());
    let mut success_count = 0usize;
    let mut error_count = 0usize;

    for row in &rows {
        if !row.has_required_fields() {
            println!("Skipping row with missing required data");
            error_count += 1;
            continue;
        }
        match insert_center(&pool, row).await {
            Ok(()) => success_count += 1,
            Err(e) => {
                println!("Error importing {}: {}", row.ctr_name, e);
                error_count += 1;
            }
        }
    }

    println!(
        "Import completed: {} centers imported successfully, {} errors.",
        success_count, error_count
    );
    if success_count == 0 {
        bail!("no centers were imported");
    }
    Ok(())
}
