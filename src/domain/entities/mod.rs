//! Core domain entities exchanged with the TinyLink backend.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code and its redirect target
//! - [`LinkStats`] - A link plus the analytics fields of the stats endpoint
//! - [`NewLink`] - Create payload, validated before submission
//! - [`HealthSnapshot`] - One `/healthz` response

pub mod health;
pub mod link;

pub use health::{HealthSnapshot, format_uptime};
pub use link::{Link, LinkStats, NewLink};
