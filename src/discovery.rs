//! Stage one: discover candidate names, one discovery page per letter.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::errors::AppError;
use crate::fetcher::DocumentFetcher;
use crate::models::{keyspace, CandidateName, Partition};
use crate::workers::run_ordered;

/// Row styles of the discovery table, read in this order.
const ROW_SELECTORS: [&str; 2] = [".evenrow", ".oddrow"];

/// Builds `<base>?search=<letter>`.
pub fn discovery_url(base: &Url, partition: Partition) -> Result<Url, AppError> {
    let letter = partition.to_string();
    Url::parse_with_params(base.as_str(), &[("search", letter.as_str())])
        .map_err(|e| AppError::InternalError(format!("Failed to build discovery URL: {}", e)))
}

/// Extracts the distinct names listed in a discovery page.
///
/// Even rows are read before odd rows; a name seen twice keeps its first position.
pub fn parse_roster(html: &str) -> Result<Vec<CandidateName>, AppError> {
    let document = Html::parse_document(html);
    let anchor = parse_selector("a")?;

    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for row_selector in ROW_SELECTORS {
        let rows = parse_selector(row_selector)?;
        for row in document.select(&rows) {
            let name: String = row
                .select(&anchor)
                .flat_map(|a| a.text())
                .collect::<String>()
                .trim()
                .to_string();
            if name.is_empty() {
                continue;
            }
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }

    Ok(names)
}

/// Fetches and parses one partition. Any failure yields an empty list.
pub async fn discover_shard(
    fetcher: &DocumentFetcher,
    base: &Url,
    partition: Partition,
) -> Vec<CandidateName> {
    let url = match discovery_url(base, partition) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Skipping partition '{}': {}", partition, e);
            return Vec::new();
        }
    };

    let Some(body) = fetcher.fetch(url.as_str()).await else {
        tracing::debug!("No discovery page for partition '{}'", partition);
        return Vec::new();
    };

    match parse_roster(&body) {
        Ok(names) => {
            tracing::debug!("Partition '{}' listed {} names", partition, names.len());
            names
        }
        Err(e) => {
            tracing::warn!("Partition '{}' could not be parsed: {}", partition, e);
            Vec::new()
        }
    }
}

/// Queries every partition `a..=z` and concatenates their names in partition order.
///
/// Deduplication is per partition only.
pub async fn discover_all(
    fetcher: &DocumentFetcher,
    base: &Url,
    max_in_flight: usize,
) -> Vec<CandidateName> {
    let partitions: Vec<Partition> = keyspace().collect();
    tracing::info!(
        "Discovering candidates across {} partitions ({} in flight)",
        partitions.len(),
        max_in_flight
    );

    let shards = run_ordered(partitions, max_in_flight, |partition| {
        let fetcher = fetcher.clone();
        let base = base.clone();
        async move { discover_shard(&fetcher, &base, partition).await }
    })
    .await;

    let names: Vec<CandidateName> = shards.into_iter().flatten().flatten().collect();
    tracing::info!("Discovered {} candidate names", names.len());
    names
}

fn parse_selector(selector: &str) -> Result<Selector, AppError> {
    Selector::parse(selector).map_err(|e| {
        AppError::InternalError(format!("Invalid selector '{}': {}", selector, e))
    })
}
