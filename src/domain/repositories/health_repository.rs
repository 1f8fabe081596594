//! Repository trait for the backend health endpoint.

use crate::domain::entities::HealthSnapshot;
use crate::error::ClientError;
use async_trait::async_trait;

/// Remote interface for `GET /healthz`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthRepository: Send + Sync {
    /// Fetches one health snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] carrying the numeric status on a
    /// non-2xx response, or the network error otherwise.
    async fn health(&self) -> Result<HealthSnapshot, ClientError>;
}
