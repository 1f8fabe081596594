//! `reqwest` implementation of the backend repositories.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{instrument, warn};
use url::Url;

use crate::domain::entities::{HealthSnapshot, Link, LinkStats, NewLink};
use crate::domain::repositories::{HealthRepository, LinkRepository};
use crate::error::{
    CONFLICT_FALLBACK_MESSAGE, CREATE_FAILED_MESSAGE, ClientError, LOAD_FAILED_MESSAGE,
};

/// Fallback text when the stats call fails below HTTP (network, bad body).
pub const STATS_FAILED_MESSAGE: &str = "Failed to load link statistics.";

/// Fallback text when the health call fails below HTTP.
pub const HEALTH_FAILED_MESSAGE: &str = "Health check failed due to network or server error.";

/// Body of a 409 response on create.
#[derive(Debug, Deserialize)]
struct ConflictBody {
    message: Option<String>,
}

/// HTTP client for the TinyLink backend.
///
/// One instance serves both [`LinkRepository`] and [`HealthRepository`];
/// it is cheap to share behind an `Arc` since `reqwest::Client` pools
/// connections internally.
pub struct HttpLinkRepository {
    client: Client,
    base_url: Url,
}

impl HttpLinkRepository {
    /// Creates a client for the backend rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the TLS backend cannot be
    /// initialized.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Counts one backend call by operation and outcome.
fn record<T>(op: &'static str, result: &Result<T, ClientError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::counter!("dashboard_api_requests_total", "op" => op, "outcome" => outcome)
        .increment(1);
}

#[async_trait]
impl LinkRepository for HttpLinkRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Link>, ClientError> {
        let url = self.endpoint(&["api", "links"]);

        let result: Result<Vec<Link>, ClientError> = async {
            let response = self.client.get(url).send().await.map_err(|e| {
                warn!(error = %e, "List request failed");
                ClientError::transport(LOAD_FAILED_MESSAGE)
            })?;

            if !response.status().is_success() {
                warn!(status = %response.status(), "List request rejected");
                return Err(ClientError::transport(LOAD_FAILED_MESSAGE));
            }

            response.json::<Vec<Link>>().await.map_err(|e| {
                warn!(error = %e, "Malformed list response");
                ClientError::transport(LOAD_FAILED_MESSAGE)
            })
        }
        .await;

        record("list", &result);
        result
    }

    #[instrument(skip(self), fields(target_url = %new_link.target_url))]
    async fn create(&self, new_link: NewLink) -> Result<Link, ClientError> {
        let url = self.endpoint(&["api", "links"]);

        let result: Result<Link, ClientError> = async {
            let response = self
                .client
                .post(url)
                .json(&new_link)
                .send()
                .await
                .map_err(|e| {
                    warn!(error = %e, "Create request failed");
                    ClientError::transport(CREATE_FAILED_MESSAGE)
                })?;

            let status = response.status();
            if status == StatusCode::CONFLICT {
                let message = response
                    .json::<ConflictBody>()
                    .await
                    .ok()
                    .and_then(|body| body.message)
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| CONFLICT_FALLBACK_MESSAGE.to_string());
                return Err(ClientError::conflict(message));
            }

            if !status.is_success() {
                warn!(status = %status, "Create request rejected");
                return Err(ClientError::transport(CREATE_FAILED_MESSAGE));
            }

            response.json::<Link>().await.map_err(|e| {
                warn!(error = %e, "Malformed create response");
                ClientError::transport(CREATE_FAILED_MESSAGE)
            })
        }
        .await;

        record("create", &result);
        result
    }

    #[instrument(skip(self))]
    async fn delete(&self, code: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "links", code]);
        let failed = || ClientError::transport(format!("Failed to delete link with code: {code}"));

        let result: Result<(), ClientError> = async {
            let response = self.client.delete(url).send().await.map_err(|e| {
                warn!(error = %e, "Delete request failed");
                failed()
            })?;

            if !response.status().is_success() {
                warn!(status = %response.status(), "Delete request rejected");
                return Err(failed());
            }
            Ok(())
        }
        .await;

        record("delete", &result);
        result
    }

    #[instrument(skip(self))]
    async fn stats(&self, code: &str) -> Result<LinkStats, ClientError> {
        let url = self.endpoint(&["api", "links", code]);

        let result: Result<LinkStats, ClientError> = async {
            let response = self.client.get(url).send().await.map_err(|e| {
                warn!(error = %e, "Stats request failed");
                ClientError::transport(STATS_FAILED_MESSAGE)
            })?;

            if !response.status().is_success() {
                return Err(ClientError::not_found(code));
            }

            response.json::<LinkStats>().await.map_err(|e| {
                warn!(error = %e, "Malformed stats response");
                ClientError::transport(STATS_FAILED_MESSAGE)
            })
        }
        .await;

        record("stats", &result);
        result
    }
}

#[async_trait]
impl HealthRepository for HttpLinkRepository {
    #[instrument(skip(self))]
    async fn health(&self) -> Result<HealthSnapshot, ClientError> {
        let url = self.endpoint(&["healthz"]);

        let result: Result<HealthSnapshot, ClientError> = async {
            let response = self.client.get(url).send().await.map_err(|e| {
                warn!(error = %e, "Health request failed");
                ClientError::transport(HEALTH_FAILED_MESSAGE)
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::transport(format!(
                    "Health check failed with status: {}",
                    status.as_u16()
                )));
            }

            response.json::<HealthSnapshot>().await.map_err(|e| {
                warn!(error = %e, "Malformed health response");
                ClientError::transport(HEALTH_FAILED_MESSAGE)
            })
        }
        .await;

        record("health", &result);
        result
    }
}
