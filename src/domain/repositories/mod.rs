//! Repository trait definitions for the remote backend.
//!
//! The dashboard owns no persistence: its "repositories" are the REST
//! endpoints of the TinyLink backend. Traits define the contract; the
//! implementation lives in `crate::infrastructure::http`, and mocks are
//! generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link list, create, delete and per-code stats
//! - [`HealthRepository`] - Backend health snapshot

pub mod health_repository;
pub mod link_repository;

pub use health_repository::HealthRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use health_repository::MockHealthRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
