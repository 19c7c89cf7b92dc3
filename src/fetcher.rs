use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::errors::AppError;

/// Plain HTTP GET client shared by every worker of a run.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    /// Creates a fetcher. Without a timeout the transport defaults apply.
    pub fn new(timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AppError::TransportError(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Fetches `url` and returns the body only for a 200 response.
    pub async fn try_fetch(&self, url: &str) -> Result<String, AppError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            AppError::TransportError(format!("Reading body from {} failed: {}", url, e))
        })
    }

    /// Like [`try_fetch`](Self::try_fetch), but logs the failure and yields `None`.
    ///
    /// A non-200 status is expected (empty shards, unknown slugs) and logged at debug;
    /// connection failures are logged as warnings.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        match self.try_fetch(url).await {
            Ok(body) => Some(body),
            Err(AppError::UnexpectedStatus { url, status }) => {
                tracing::debug!("{} returned status {}", url, status);
                None
            }
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }
}
