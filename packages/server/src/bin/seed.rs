use anyhow::Context;

use mergington_server::config::AppConfig;
use mergington_server::{database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;

    println!("Initializing database and seeding sample data...");
    let db = database::init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    database::ensure_indexes(&db)
        .await
        .context("Failed to create indexes")?;
    seed::seed_sample_data(&db)
        .await
        .context("Failed to seed sample data")?;
    println!("Done.");

    Ok(())
}
