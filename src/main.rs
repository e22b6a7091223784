//! Portal server entry point.

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use petcare_pricing_portal::{routes, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "petcare_pricing_portal=debug,tower_http=info".into()
        }))
        .init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    tracing::info!("connected to database");

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(pool, config);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("pricing portal listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
