//! Stage two: enrich each discovered name with its profile page.
//!
//! One worker runs per candidate (bounded by `max_in_flight`); records come
//! back in candidate order. Missing pages and malformed names or pages are
//! counted and dropped, never aborting the rest of the stage.
use url::Url;

use crate::fetcher::DocumentFetcher;
use crate::models::{CandidateName, EnrichmentReport};
use crate::profile::fetch_profile;
use crate::workers::run_ordered;

pub async fn enrich_all(
    fetcher: &DocumentFetcher,
    base: &Url,
    candidates: Vec<CandidateName>,
    max_in_flight: usize,
) -> EnrichmentReport {
    let attempted = candidates.len();
    tracing::info!(
        "Enriching {} candidates ({} in flight)",
        attempted,
        max_in_flight
    );

    let outcomes = run_ordered(candidates, max_in_flight, |candidate| {
        let fetcher = fetcher.clone();
        let base = base.clone();
        async move {
            let outcome = fetch_profile(&fetcher, &base, &candidate).await;
            (candidate, outcome)
        }
    })
    .await;

    let mut report = EnrichmentReport {
        attempted,
        ..Default::default()
    };

    for outcome in outcomes {
        match outcome {
            Some((_, Ok(Some(record)))) if !record.is_sentinel() => report.records.push(record),
            Some((candidate, Ok(_))) => {
                tracing::debug!("No profile for {}", candidate);
                report.missing += 1;
            }
            Some((candidate, Err(e))) if e.is_malformed_profile() => {
                tracing::warn!("Skipping {}, malformed profile: {}", candidate, e);
                report.malformed += 1;
            }
            Some((candidate, Err(e))) => {
                tracing::warn!("Skipping {}: {}", candidate, e);
                report.rejected += 1;
            }
            None => report.rejected += 1,
        }
    }

    tracing::info!(
        "Enrichment finished: {}/{} succeeded, {} missing, {} malformed, {} rejected",
        report.succeeded(),
        report.attempted,
        report.missing,
        report.malformed,
        report.rejected
    );
    report
}
