use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

use crate::config::Config;

/// Open the round store pool.
///
/// Postgres pools grow up to `DATABASE_MAX_CONNECTIONS`. SQLite stores are held to a single
/// connection so an in-memory database is not split across connections.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &Config) -> anyhow::Result<DatabaseConnection> {
    let max_connections = if config.is_sqlite() {
        1
    } else {
        config.database_max_connections
    };

    let mut opts = ConnectOptions::new(config.database_url.as_str());
    opts.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;
    tracing::debug!(max_connections, "Round store pool ready");
    Ok(db)
}
