//! Periodic backend health polling.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::resource::AsyncResource;
use crate::domain::entities::HealthSnapshot;
use crate::domain::repositories::HealthRepository;

/// Default re-fetch period.
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);

pub type HealthResource = AsyncResource<HealthSnapshot>;

/// Polls `/healthz` on a fixed period while mounted.
///
/// Mounting issues one fetch immediately and then one per interval. Each
/// fetch runs independently: a slow response does not delay or cancel the
/// next scheduled one, and whichever arrives last overwrites the state.
///
/// [`teardown`](Self::teardown) (or dropping the poller) stops the schedule,
/// resets the resource to `Idle` and makes responses still in flight land
/// nowhere.
pub struct HealthPoller {
    repository: Arc<dyn HealthRepository>,
    state: Arc<watch::Sender<HealthResource>>,
    cancel: CancellationToken,
}

impl HealthPoller {
    /// Starts polling. Must be called from within a Tokio runtime.
    pub fn mount(repository: Arc<dyn HealthRepository>, interval: Duration) -> Self {
        let (state, _) = watch::channel(HealthResource::new());
        let poller = Self {
            repository,
            state: Arc::new(state),
            cancel: CancellationToken::new(),
        };
        poller.spawn_schedule(interval);
        info!(interval_secs = interval.as_secs(), "Health poller mounted");
        poller
    }

    fn spawn_schedule(&self, interval: Duration) {
        let repository = Arc::clone(&self.repository);
        let state = Arc::clone(&self.state);
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        tokio::spawn(fetch_once(
                            Arc::clone(&repository),
                            Arc::clone(&state),
                            cancel.clone(),
                        ));
                    }
                }
            }
            debug!("Health schedule stopped");
        });
    }

    /// Issues one fetch outside the schedule and waits for it.
    pub async fn refresh(&self) {
        fetch_once(
            Arc::clone(&self.repository),
            Arc::clone(&self.state),
            self.cancel.clone(),
        )
        .await;
    }

    /// Stops the schedule and resets the resource to `Idle`.
    pub fn teardown(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        self.state.send_modify(HealthResource::reset);
        info!("Health poller torn down");
    }

    pub fn is_mounted(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn snapshot(&self) -> HealthResource {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change, for re-rendering.
    pub fn subscribe(&self) -> watch::Receiver<HealthResource> {
        self.state.subscribe()
    }
}

impl Drop for HealthPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn fetch_once(
    repository: Arc<dyn HealthRepository>,
    state: Arc<watch::Sender<HealthResource>>,
    cancel: CancellationToken,
) {
    let started = state.send_if_modified(|resource| {
        if cancel.is_cancelled() {
            return false;
        }
        resource.begin();
        true
    });
    if !started {
        return;
    }

    let result = repository.health().await;

    // Checked under the watch lock so teardown cannot interleave with the write.
    let applied = state.send_if_modified(|resource| {
        if cancel.is_cancelled() {
            return false;
        }
        match result {
            Ok(snapshot) => resource.succeed(snapshot),
            Err(e) => {
                warn!(error = %e, "Health check failed");
                resource.fail(e.to_string());
            }
        }
        true
    });
    if !applied {
        debug!("Poller torn down, dropping health response");
    }
}
