//! Fauxbase - simulated backend: a connection-gated in-memory store with an
//! in-process request router

pub mod config;
pub mod error;
pub mod types;

pub mod store;
pub mod auth;
pub mod api;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
