//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer against the real
//! TinyLink backend.
//!
//! # Modules
//!
//! - [`http`] - `reqwest` repository implementations

pub mod http;
