use anyhow::Context;
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use todo_items_api::{SharedData, app_env, app_router, db, logging, persistence};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let dotenv_loaded = dotenv().is_ok();

    let env_filter = logging::init_env_filter()?;
    let otel_exporters = logging::exporters_from_env()?;
    logging::setup_logging_and_tracing(env_filter, otel_exporters);
    if !dotenv_loaded {
        info!("No .env file found, using the process environment only");
    }

    let db_url = env::var(app_env::DB_URL)
        .with_context(|| format!("the {} environment variable must be set", app_env::DB_URL))?;
    let pool = db::connect_sqlx(&db_url)
        .await
        .context("connecting to the database")?;
    db::run_migrations(&pool).await?;

    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(pool),
    });

    let listen_addr =
        env::var(app_env::LISTEN_ADDR).unwrap_or_else(|_| app_env::DEFAULT_LISTEN_ADDR.to_owned());
    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("binding to {listen_addr}"))?;

    info!("Starting server on {listen_addr}");
    axum::serve(listener, app_router(shared_data))
        .await
        .context("running the HTTP server")?;

    Ok(())
}
