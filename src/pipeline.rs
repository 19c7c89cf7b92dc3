use crate::config::HarvestSettings;
use crate::discovery::discover_all;
use crate::enrichment::enrich_all;
use crate::errors::AppError;
use crate::fetcher::DocumentFetcher;
use crate::models::{keyspace, CandidateName, EnrichmentReport, HarvestReport};

/// Runs discovery followed by enrichment. The stages never overlap.
pub struct Harvester {
    fetcher: DocumentFetcher,
    settings: HarvestSettings,
}

impl Harvester {
    pub fn new(settings: HarvestSettings) -> Result<Self, AppError> {
        let fetcher = DocumentFetcher::new(settings.request_timeout)?;
        Ok(Self { fetcher, settings })
    }

    pub async fn discover(&self) -> Vec<CandidateName> {
        discover_all(
            &self.fetcher,
            &self.settings.discovery_url,
            self.settings.max_in_flight,
        )
        .await
    }

    pub async fn enrich(&self, candidates: Vec<CandidateName>) -> EnrichmentReport {
        enrich_all(
            &self.fetcher,
            &self.settings.profile_url,
            candidates,
            self.settings.max_in_flight,
        )
        .await
    }

    pub async fn run(&self) -> HarvestReport {
        let candidates = self.discover().await;
        let candidate_count = candidates.len();
        let enrichment = self.enrich(candidates).await;

        HarvestReport {
            shards: keyspace().count(),
            candidates: candidate_count,
            enrichment,
        }
    }
}
