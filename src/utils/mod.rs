//! Helper functions shared by the stores and the CLI.
//!
//! - [`validation`] - Pre-flight validation of create requests
//! - [`format`] - Display formatting for timestamps

pub mod format;
pub mod validation;
