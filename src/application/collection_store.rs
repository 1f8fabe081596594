//! Link collection store with server-confirmed optimistic updates.

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::notification::NotificationChannel;
use crate::application::resource::{AsyncResource, ResourceStatus};
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{ClientError, LOAD_FAILED_MESSAGE};
use crate::utils::validation::validate_new_link;

/// Success text published after a create.
pub const CREATED_MESSAGE: &str = "Link created successfully!";

/// Links keyed by code, in display order.
pub type LinkMap = IndexMap<String, Link>;

/// Consistent copy of the collection taken under a single read lock.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot {
    pub status: ResourceStatus,
    pub error: Option<String>,
    pub links: Vec<Link>,
    /// Bumped on every change to status or links; used as a cache key.
    pub revision: u64,
}

#[derive(Default)]
struct CollectionState {
    resource: AsyncResource<LinkMap>,
    revision: u64,
    /// Bumped on teardown so that loads started before it are dropped.
    epoch: u64,
}

impl CollectionState {
    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Owns the link collection and its load state.
///
/// # Update Rules
///
/// - `load` fetches only from `Idle`; `reload` forces a new fetch
/// - `create` prepends exactly the server's returned entity
/// - `delete` removes exactly the addressed code
/// - create/delete outcomes never touch the collection's status or error;
///   they are reported through the [`NotificationChannel`] only
///
/// Each mutation replaces or removes one whole entity under the write lock,
/// so concurrent operations on different codes never interfere and a reader
/// never sees a half-applied change.
pub struct LinkCollectionStore {
    repository: Arc<dyn LinkRepository>,
    notifications: NotificationChannel,
    state: RwLock<CollectionState>,
}

impl LinkCollectionStore {
    pub fn new(repository: Arc<dyn LinkRepository>, notifications: NotificationChannel) -> Self {
        Self {
            repository,
            notifications,
            state: RwLock::new(CollectionState::default()),
        }
    }

    /// Fetches the collection if it has never been requested since mount.
    ///
    /// Returns `false` without contacting the backend when the collection is
    /// already loading or resolved.
    pub async fn load(&self) -> bool {
        let epoch = {
            let mut state = self.state.write();
            if !state.resource.is_idle() {
                debug!(
                    status = %state.resource.status(),
                    "Collection already requested, skipping load"
                );
                return false;
            }
            state.resource.begin();
            state.touch();
            state.epoch
        };

        self.fetch(epoch).await;
        true
    }

    /// Forces a new fetch regardless of the current status.
    pub async fn reload(&self) {
        let epoch = {
            let mut state = self.state.write();
            state.resource.begin();
            state.touch();
            state.epoch
        };

        self.fetch(epoch).await;
    }

    async fn fetch(&self, epoch: u64) {
        let result = self.repository.list().await;

        let mut state = self.state.write();
        if state.epoch != epoch {
            debug!("Collection torn down during load, dropping response");
            return;
        }

        match result {
            Ok(links) => {
                let map: LinkMap = links
                    .into_iter()
                    .map(|link| (link.code.clone(), link))
                    .collect();
                info!(count = map.len(), "Links loaded");
                state.resource.succeed(map);
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Failed to load links");
                state.resource.fail(LOAD_FAILED_MESSAGE);
            }
        }
        state.touch();
    }

    /// Creates a link and prepends the server's entity to the collection.
    ///
    /// Validation runs first; an invalid request never reaches the backend.
    /// Every outcome is published to the notification channel.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a malformed URL or code,
    /// [`ClientError::Conflict`] when the code is taken, and
    /// [`ClientError::Transport`] otherwise. The collection is unchanged on
    /// every error.
    pub async fn create(&self, new_link: NewLink) -> Result<Link, ClientError> {
        if let Err(e) = validate_new_link(&new_link) {
            debug!(error = %e, "Create rejected by validation");
            self.notifications.error(e.to_string());
            return Err(e);
        }

        match self.repository.create(new_link).await {
            Ok(link) => {
                {
                    let mut state = self.state.write();
                    if let Some(links) = state.resource.data_mut() {
                        links.shift_insert(0, link.code.clone(), link.clone());
                    }
                    state.touch();
                }
                info!(code = %link.code, "Link created");
                self.notifications.success(CREATED_MESSAGE);
                Ok(link)
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Failed to create link");
                self.notifications.error(e.to_string());
                Err(e)
            }
        }
    }

    /// Deletes a link and removes it from the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] naming the code; the collection is
    /// left untouched.
    pub async fn delete(&self, code: &str) -> Result<(), ClientError> {
        match self.repository.delete(code).await {
            Ok(()) => {
                {
                    let mut state = self.state.write();
                    if let Some(links) = state.resource.data_mut() {
                        links.shift_remove(code);
                    }
                    state.touch();
                }
                info!(code, "Link deleted");
                self.notifications
                    .success(format!("Link {code} deleted successfully."));
                Ok(())
            }
            Err(e) => {
                warn!(code, error = %e, "Failed to delete link");
                self.notifications.error(e.to_string());
                Err(e)
            }
        }
    }

    /// Returns to `Idle` and drops the collection (teardown).
    ///
    /// A load still in flight is ignored when it resolves.
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.resource.reset();
        state.epoch += 1;
        state.touch();
    }

    pub fn snapshot(&self) -> CollectionSnapshot {
        let state = self.state.read();
        CollectionSnapshot {
            status: state.resource.status(),
            error: state.resource.error().map(str::to_string),
            links: state
                .resource
                .data()
                .map(|links| links.values().cloned().collect())
                .unwrap_or_default(),
            revision: state.revision,
        }
    }

    pub fn status(&self) -> ResourceStatus {
        self.state.read().resource.status()
    }

    pub fn get(&self, code: &str) -> Option<Link> {
        self.state
            .read()
            .resource
            .data()
            .and_then(|links| links.get(code).cloned())
    }

    pub fn len(&self) -> usize {
        self.state.read().resource.data().map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }
}
