//! Per-code statistics with stale-response dropping.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::resource::{AsyncResource, ResourceStatus};
use crate::domain::entities::LinkStats;
use crate::domain::repositories::LinkRepository;
use crate::error::ClientError;

/// Handle for one stats request, returned by [`StatsCoordinator::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsTicket {
    code: String,
}

impl StatsTicket {
    pub fn code(&self) -> &str {
        &self.code
    }
}

#[derive(Default)]
struct StatsState {
    resource: AsyncResource<LinkStats>,
    /// Code whose response is currently wanted, `None` after teardown.
    interest: Option<String>,
}

/// Owns the statistics of the currently inspected code.
///
/// A response is applied only if its code is still the current interest
/// when it arrives. Switching from code A to code B therefore never lets a
/// slow A response overwrite B, and a response landing after
/// [`teardown`](Self::teardown) is ignored.
///
/// Requests are not aborted on the wire; late arrivals are dropped instead.
pub struct StatsCoordinator {
    repository: Arc<dyn LinkRepository>,
    state: Mutex<StatsState>,
}

impl StatsCoordinator {
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self {
            repository,
            state: Mutex::new(StatsState::default()),
        }
    }

    /// Marks `code` as the current interest and the resource as loading.
    pub fn begin(&self, code: impl Into<String>) -> StatsTicket {
        let code = code.into();
        let mut state = self.state.lock();
        state.resource.begin();
        state.interest = Some(code.clone());
        debug!(code = %code, "Stats requested");
        StatsTicket { code }
    }

    /// Applies a response for `ticket`.
    ///
    /// Returns `false` (and changes nothing) if the ticket's code is no
    /// longer the current interest.
    pub fn resolve(&self, ticket: &StatsTicket, result: Result<LinkStats, ClientError>) -> bool {
        let mut state = self.state.lock();
        if state.interest.as_deref() != Some(ticket.code.as_str()) {
            debug!(
                code = %ticket.code,
                current = ?state.interest,
                "Dropping stale stats response"
            );
            return false;
        }

        match result {
            Ok(stats) => state.resource.succeed(stats),
            Err(e) => {
                warn!(code = %ticket.code, error = %e, "Failed to load stats");
                state.resource.fail(e.to_string());
            }
        }
        true
    }

    /// Requests stats for `code` and applies the response unless stale.
    ///
    /// Returns whether the response was applied.
    pub async fn load(&self, code: &str) -> bool {
        let ticket = self.begin(code);
        let result = self.repository.stats(code).await;
        self.resolve(&ticket, result)
    }

    /// Leaves the stats view: resets to `Idle` and clears the interest.
    pub fn teardown(&self) {
        let mut state = self.state.lock();
        state.resource.reset();
        state.interest = None;
    }

    /// Code currently being inspected, if any.
    pub fn current_code(&self) -> Option<String> {
        self.state.lock().interest.clone()
    }

    pub fn status(&self) -> ResourceStatus {
        self.state.lock().resource.status()
    }

    pub fn stats(&self) -> Option<LinkStats> {
        self.state.lock().resource.data().cloned()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().resource.error().map(str::to_string)
    }

    /// Clone of the whole resource taken under one lock.
    pub fn snapshot(&self) -> AsyncResource<LinkStats> {
        self.state.lock().resource.clone()
    }
}
