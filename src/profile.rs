use url::Url;

use crate::errors::{AppError, ResultExt};
use crate::extractor::extract_profile;
use crate::fetcher::DocumentFetcher;
use crate::models::ProfileRecord;

/// Turns `"Family, Given"` into the profile slug `given-family`.
///
/// Both halves are trimmed and lowercased; runs of inner whitespace become `-`.
pub fn profile_slug(candidate: &str) -> Result<String, AppError> {
    let mut parts = candidate.split(',');
    let (Some(family), Some(given), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AppError::MalformedName(candidate.to_string()));
    };

    let family = slug_part(family);
    let given = slug_part(given);
    if family.is_empty() || given.is_empty() {
        return Err(AppError::MalformedName(candidate.to_string()));
    }

    Ok(format!("{}-{}", given, family))
}

/// `<base>/<slug>`, tolerating a trailing slash on the base.
pub fn profile_url(base: &Url, slug: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), slug)
}

/// Looks up one candidate's profile.
///
/// `Ok(None)` is the "no profile" outcome (page missing or unreachable); a
/// malformed name or page is an error the caller is expected to drop.
pub async fn fetch_profile(
    fetcher: &DocumentFetcher,
    base: &Url,
    candidate: &str,
) -> Result<Option<ProfileRecord>, AppError> {
    let slug = profile_slug(candidate)?;
    let url = profile_url(base, &slug);

    let Some(body) = fetcher.fetch(&url).await else {
        return Ok(None);
    };

    extract_profile(&body)
        .with_context(|| format!("profile {}", slug))
        .map(Some)
}

fn slug_part(part: &str) -> String {
    part.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
