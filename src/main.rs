use migration::{Migrator, MigratorTrait};

use round_store::config::Config;
use round_store::services::RoundRepository;
use round_store::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize structured logging
    telemetry::init_tracing(&config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        sqlite = config.is_sqlite(),
        "Starting round store"
    );

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = round_store::db::connect(&config).await?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    Migrator::up(&db, None).await?;
    tracing::info!("Migrations applied");

    let rounds = RoundRepository::new(db, telemetry::repository_span());

    let active = rounds.list_active_rounds().await?;
    tracing::info!(count = active.len(), "Active rounds loaded");
    for round in &active {
        tracing::info!(
            round_id = round.id,
            name = %round.name,
            status = %round.status,
            joined = round.joined,
            min = round.min,
            max = round.max,
            "Active round"
        );
    }

    Ok(())
}
