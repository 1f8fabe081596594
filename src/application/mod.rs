//! Application layer: the asynchronous resource and derived-view engine.
//!
//! Stores consume the repository traits, track each remote resource with an
//! [`resource::AsyncResource`], and report mutation outcomes through the
//! shared [`notification::NotificationChannel`].
//!
//! # Components
//!
//! - [`resource::AsyncResource`] - idle → loading → succeeded | failed
//! - [`notification::NotificationChannel`] - one ephemeral message with expiry
//! - [`collection_store::LinkCollectionStore`] - link collection with confirmed updates
//! - [`stats_coordinator::StatsCoordinator`] - per-code stats with stale-drop
//! - [`health_poller::HealthPoller`] - periodic `/healthz` polling
//! - [`derived_view`] - pure search/sort over a collection snapshot

pub mod collection_store;
pub mod derived_view;
pub mod health_poller;
pub mod notification;
pub mod resource;
pub mod stats_coordinator;

pub use collection_store::{CollectionSnapshot, LinkCollectionStore};
pub use derived_view::{EmptyState, SortDirection, SortKey, SortSpec, ViewCache, derive_view};
pub use health_poller::HealthPoller;
pub use notification::{Notification, NotificationChannel, NotificationKind};
pub use resource::{AsyncResource, ResourceStatus};
pub use stats_coordinator::{StatsCoordinator, StatsTicket};
