//! # TinyLink Dashboard
//!
//! Client-side engine of the TinyLink dashboard: keeps a local view of the
//! backend's links, statistics and health consistent with the server while
//! requests overlap, fail or arrive out of order.
//!
//! ## Architecture
//!
//! The crate keeps the usual layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Wire entities and repository traits
//! - **Application Layer** ([`application`]) - Async resources, stores and derived views
//! - **Infrastructure Layer** ([`infrastructure`]) - `reqwest` client for the REST backend
//! - **State** ([`state`]) - Composition root shared by the CLI and tests
//!
//! ## Features
//!
//! - Link collection with server-confirmed optimistic create and delete
//! - Per-code statistics that drop stale responses
//! - Periodic health polling with clean teardown
//! - Search and sort over the collection, memoized on its inputs
//! - Ephemeral notifications with a fixed visibility window
//!
//! ## Quick Start
//!
//! ```bash
//! export API_BASE_URL="http://localhost:3000"
//!
//! tinylink list --sort clicks --desc
//! tinylink create https://www.rust-lang.org --code rustlg
//! tinylink health --watch
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::ClientError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::{
        AsyncResource, HealthPoller, LinkCollectionStore, NotificationChannel, ResourceStatus,
        SortKey, SortSpec, StatsCoordinator, derive_view,
    };
    pub use crate::domain::entities::{HealthSnapshot, Link, LinkStats, NewLink};
    pub use crate::error::ClientError;
    pub use crate::state::AppState;
}
