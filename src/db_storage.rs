use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{AppError, ResultExt};
use crate::models::{ProfileRecord, StoreSummary};

/// Database storage service for harvested fighter profiles
pub struct FighterStorage {
    pool: PgPool,
}

impl FighterStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `fighters` table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS fighters (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                nickname TEXT NOT NULL,
                status TEXT NOT NULL,
                country TEXT NOT NULL,
                style TEXT NOT NULL,
                record TEXT NOT NULL,
                division TEXT NOT NULL,
                age INTEGER NOT NULL,
                knockout_wins INTEGER NOT NULL,
                submission_wins INTEGER NOT NULL,
                height DOUBLE PRECISION NOT NULL,
                weight DOUBLE PRECISION NOT NULL,
                reach DOUBLE PRECISION NOT NULL,
                striking_accuracy DOUBLE PRECISION NOT NULL,
                takedown_accuracy DOUBLE PRECISION NOT NULL,
                harvested_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("creating fighters table")?;

        Ok(())
    }

    /// Insert a profile, or refresh the existing row with the same name.
    /// Returns the row id.
    pub async fn store(&self, record: &ProfileRecord) -> Result<Uuid, AppError> {
        if record.is_sentinel() {
            return Err(AppError::InternalError(
                "refusing to store an empty profile record".to_string(),
            ));
        }

        let row: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO fighters (
                id, name, nickname, status, country, style, record, division,
                age, knockout_wins, submission_wins, height, weight, reach,
                striking_accuracy, takedown_accuracy, harvested_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (name) DO UPDATE
            SET nickname = EXCLUDED.nickname,
                status = EXCLUDED.status,
                country = EXCLUDED.country,
                style = EXCLUDED.style,
                record = EXCLUDED.record,
                division = EXCLUDED.division,
                age = EXCLUDED.age,
                knockout_wins = EXCLUDED.knockout_wins,
                submission_wins = EXCLUDED.submission_wins,
                height = EXCLUDED.height,
                weight = EXCLUDED.weight,
                reach = EXCLUDED.reach,
                striking_accuracy = EXCLUDED.striking_accuracy,
                takedown_accuracy = EXCLUDED.takedown_accuracy,
                harvested_at = EXCLUDED.harvested_at
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.name)
        .bind(&record.nickname)
        .bind(&record.status)
        .bind(&record.country)
        .bind(&record.style)
        .bind(&record.record)
        .bind(&record.division)
        .bind(record.age)
        .bind(record.knockout_wins)
        .bind(record.submission_wins)
        .bind(record.height)
        .bind(record.weight)
        .bind(record.reach)
        .bind(record.striking_accuracy)
        .bind(record.takedown_accuracy)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("storing fighter '{}'", record.name))?;

        Ok(row.0)
    }

    /// Store each record independently; one failure does not stop the rest.
    pub async fn store_all(&self, records: &[ProfileRecord]) -> StoreSummary {
        let mut summary = StoreSummary::default();

        for record in records {
            match self.store(record).await {
                Ok(id) => {
                    tracing::debug!("Stored {} as {}", record.name, id);
                    summary.stored += 1;
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            "Stored {} fighters ({} failed)",
            summary.stored,
            summary.failed
        );
        summary
    }
}
