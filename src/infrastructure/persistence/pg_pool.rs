use std::str::FromStr;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::{info, instrument, warn};

use crate::application::ports::StoreError;
use crate::presentation::config::DatabaseSettings;

/// Builds a lazily connecting pool; no connection is opened until the first query.
#[instrument(skip(url, settings), fields(database = %settings.database_name))]
pub fn create_pool(url: &str, settings: &DatabaseSettings) -> Result<PgPool, StoreError> {
    let options = PgConnectOptions::from_str(url)
        .map_err(|e| StoreError::Configuration(e.to_string()))?
        .database(&settings.database_name);

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_seconds))
        .connect_lazy_with(options);

    info!("PostgreSQL connection pool configured");
    Ok(pool)
}

#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    let mut retries = 5;
    let mut delay = Duration::from_millis(500);

    loop {
        match sqlx::migrate!().run(pool).await {
            Ok(()) => {
                info!("Database migrations applied");
                return Ok(());
            }
            Err(e) if retries > 0 => {
                retries -= 1;
                warn!(
                    error = %e,
                    retries_left = retries,
                    delay_ms = delay.as_millis(),
                    "Database migration failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => {
                return Err(StoreError::Unavailable(e.to_string()));
            }
        }
    }
}
