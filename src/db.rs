use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseSettings;
use crate::errors::{AppError, ResultExt};

/// Connection pool for the persistence collaborator.
///
/// Opened once at startup and handed to whoever needs it; call [`Database::close`]
/// at shutdown.
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(settings: &DatabaseSettings) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(settings.connect_options()?)
            .await
            .context("connecting to database")?;

        // Check connection
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .context("pinging database")?;
        tracing::info!("Database connection established");

        Ok(Self { pool })
    }

    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("Database connection closed");
    }
}
