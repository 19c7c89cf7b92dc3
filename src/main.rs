use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fighter_harvest::config::Config;
use fighter_harvest::db::Database;
use fighter_harvest::db_storage::FighterStorage;
use fighter_harvest::pipeline::Harvester;

/// Main entry point for the harvester.
///
/// Initializes logging, loads configuration, runs discovery and enrichment,
/// then stores the records (or prints them as JSON when no database is configured).
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fighter_harvest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    let harvester = Harvester::new(config.harvest.clone())?;
    let report = harvester.run().await;
    tracing::info!(
        "Harvest: {} shards, {} candidates, {} records, {} missing, {} malformed, {} rejected",
        report.shards,
        report.candidates,
        report.enrichment.succeeded(),
        report.enrichment.missing,
        report.enrichment.malformed,
        report.enrichment.rejected
    );

    match config.database {
        Some(settings) => {
            let db = Database::new(&settings).await?;
            let storage = FighterStorage::new(db.pool.clone());
            let stored = match storage.ensure_schema().await {
                Ok(()) => Ok(storage.store_all(&report.enrichment.records).await),
                Err(e) => Err(e),
            };
            db.close().await;

            let summary = stored?;
            if summary.failed > 0 {
                anyhow::bail!(
                    "{} of {} records failed to store",
                    summary.failed,
                    summary.stored + summary.failed
                );
            }
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&report.enrichment.records)?);
        }
    }

    Ok(())
}
