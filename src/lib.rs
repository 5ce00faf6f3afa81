//! Infosweb — library crate for the `infosweb` CLI.
//!
//! Exposes the API client and its configuration so integration tests in
//! `tests/` (and other callers) can drive it directly.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod errors;
pub mod models;

pub use client::InfoswebClient;
pub use config::Config;
pub use errors::{InfoswebError, Result};
