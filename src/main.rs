use calhub_api::config::ApiConfig;
use calhub_db::{create_pool, schema::initialize_database};
use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool(&config.database_url)
        .await
        .wrap_err("Failed to connect to DATABASE_URL")?;

    // Create missing tables and indexes
    initialize_database(&db_pool).await?;

    calhub_api::start_server(config, db_pool).await?;

    Ok(())
}
