//! Domain layer: entities and the contract of the remote backend.
//!
//! # Architecture
//!
//! - [`entities`] - Data structures served and accepted by the backend
//! - [`repositories`] - Async traits for the backend's REST operations
//!
//! The domain layer has no dependency on HTTP; the `reqwest` implementation
//! lives in [`crate::infrastructure::http`].

pub mod entities;
pub mod repositories;
