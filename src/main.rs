//! Serves the Fyyur booking directory.

use anyhow::{Context, Result};

use fyyur::config::Config;
use fyyur::routes::router;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    fyyur::init_tracing();

    let config = Config::from_env()?;
    let pool = fyyur::db::connect(&config).await?;
    fyyur::db::migrate(&pool).await?;

    let addr = config.addr();
    tracing::info!(%addr, "listening");

    axum::Server::bind(&addr)
        .serve(router(pool).into_make_service())
        .await
        .context("Server stopped unexpectedly")
}
