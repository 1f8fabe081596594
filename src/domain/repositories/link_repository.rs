//! Repository trait for the backend's link endpoints.

use crate::domain::entities::{Link, LinkStats, NewLink};
use crate::error::ClientError;
use async_trait::async_trait;

/// Remote interface for managing short links.
///
/// Every method is a single scoped HTTP call; implementations convert any
/// failure into a [`ClientError`] and never panic.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpLinkRepository`] - `reqwest` client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Lists every link in server order (`GET /api/links`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] on any non-2xx status or network error.
    async fn list(&self) -> Result<Vec<Link>, ClientError>;

    /// Creates a link (`POST /api/links`) and returns the server's entity.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Conflict`] on HTTP 409 with the backend message.
    /// Returns [`ClientError::Transport`] on any other failure.
    async fn create(&self, new_link: NewLink) -> Result<Link, ClientError>;

    /// Deletes a link by code (`DELETE /api/links/{code}`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] naming the code on any failure.
    async fn delete(&self, code: &str) -> Result<(), ClientError>;

    /// Fetches details and analytics for one code (`GET /api/links/{code}`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] naming the code on any non-2xx status.
    /// Returns [`ClientError::Transport`] on network errors.
    async fn stats(&self, code: &str) -> Result<LinkStats, ClientError>;
}
