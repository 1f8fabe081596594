//! Shared dashboard state.

use std::sync::Arc;
use std::time::Duration;

use crate::application::{HealthPoller, LinkCollectionStore, NotificationChannel, StatsCoordinator};
use crate::config::Config;
use crate::domain::repositories::{HealthRepository, LinkRepository};
use crate::error::ClientError;
use crate::infrastructure::http::HttpLinkRepository;

/// Composition root: one notification channel shared by every store.
///
/// Cloning is cheap; clones observe the same stores.
#[derive(Clone)]
pub struct AppState {
    pub links: Arc<LinkCollectionStore>,
    pub stats: Arc<StatsCoordinator>,
    pub notifications: NotificationChannel,
    pub public_base_url: String,
    health_repository: Arc<dyn HealthRepository>,
    health_interval: Duration,
}

impl AppState {
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        health_repository: Arc<dyn HealthRepository>,
        config: &Config,
    ) -> Self {
        let notifications = NotificationChannel::new(config.notification_ttl());

        Self {
            links: Arc::new(LinkCollectionStore::new(
                Arc::clone(&link_repository),
                notifications.clone(),
            )),
            stats: Arc::new(StatsCoordinator::new(link_repository)),
            notifications,
            public_base_url: config.public_base_url.clone(),
            health_repository,
            health_interval: config.health_poll_interval(),
        }
    }

    /// Wires the stores to the HTTP backend at `config.api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an unusable base URL and
    /// [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let base_url = config
            .api_url()
            .map_err(|e| ClientError::validation(e.to_string()))?;
        let repository = Arc::new(HttpLinkRepository::new(base_url, config.request_timeout())?);

        Ok(Self::new(repository.clone(), repository, config))
    }

    /// Starts polling backend health with the configured interval.
    pub fn mount_health_poller(&self) -> HealthPoller {
        HealthPoller::mount(Arc::clone(&self.health_repository), self.health_interval)
    }

    /// Short URL for `code` under the public origin.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), code)
    }
}
