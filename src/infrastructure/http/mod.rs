//! HTTP implementations of the domain repository traits.
//!
//! - [`HttpLinkRepository`] - `reqwest` client for `/api/links` and `/healthz`

pub mod http_link_repository;

pub use http_link_repository::HttpLinkRepository;
