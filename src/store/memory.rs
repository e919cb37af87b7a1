//! In-memory record store gated on a simulated connection lifecycle

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::Record;

/// Connection flag and record collection behind one lock
#[derive(Debug, Default)]
struct StoreInner {
    connected: bool,
    records: Vec<Record>,
}

/// In-memory store with connection-lifecycle semantics.
///
/// Starts disconnected. `insert` and `query` fail with
/// [`Error::NotConnected`] until [`MemoryStore::connect`] has resolved;
/// [`MemoryStore::status`] always succeeds. Shared mutable state lives
/// behind a single lock so the store stays safe under a multi-threaded
/// runtime.
pub struct MemoryStore {
    config: Config,
    inner: RwLock<StoreInner>,
}

/// Snapshot returned by [`MemoryStore::status`]
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusReport {
    pub connected: bool,
    pub total_records: usize,
    pub config: ConfigSummary,
}

/// Non-sensitive subset of the connection config; credentials never
/// appear in status output.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConfigSummary {
    pub host: String,
    pub database: String,
}

impl MemoryStore {
    /// Create a disconnected store
    pub fn new(config: Config) -> Self {
        Self {
            config,
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// Connect to the simulated database.
    ///
    /// Always succeeds after the configured delay. Calling while already
    /// connected re-confirms the connection without error.
    pub async fn connect(&self) {
        tracing::info!("connecting to database...");
        tokio::time::sleep(self.config.connect_delay()).await;

        let mut inner = self.inner.write().await;
        inner.connected = true;
        tracing::info!(
            "connected to {} at {}",
            self.config.database,
            self.config.endpoint()
        );
    }

    /// Drop the connection.
    ///
    /// When not connected this is a no-op that logs a warning; disconnect
    /// never fails the caller.
    pub async fn disconnect(&self) {
        let mut inner = self.inner.write().await;
        if inner.connected {
            inner.connected = false;
            tracing::info!("disconnected from database");
        } else {
            tracing::warn!("cannot disconnect: not connected");
        }
    }

    /// Append a record to the collection, preserving insertion order
    pub async fn insert(&self, record: Record) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.connected {
            return Err(Error::NotConnected);
        }

        tracing::debug!(?record, "inserted record");
        inner.records.push(record);
        Ok(())
    }

    /// Query the collection.
    ///
    /// With no filter, returns every record in insertion order. With
    /// `Some((key, value))`, returns the ordered subsequence whose `key`
    /// field equals `value` under strict JSON equality; records lacking
    /// the field never match.
    pub async fn query(&self, filter: Option<(&str, &Value)>) -> Result<Vec<Record>> {
        let inner = self.inner.read().await;
        if !inner.connected {
            return Err(Error::NotConnected);
        }

        match filter {
            None => Ok(inner.records.clone()),
            Some((key, value)) => Ok(inner
                .records
                .iter()
                .filter(|record| record.get(key) == Some(value))
                .cloned()
                .collect()),
        }
    }

    /// Connection status snapshot; succeeds regardless of connection state
    pub async fn status(&self) -> StatusReport {
        let inner = self.inner.read().await;
        StatusReport {
            connected: inner.connected,
            total_records: inner.records.len(),
            config: ConfigSummary {
                host: self.config.host.clone(),
                database: self.config.database.clone(),
            },
        }
    }
}
