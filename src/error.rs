//! Error types for Fauxbase

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not connected to database!")]
    NotConnected,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
