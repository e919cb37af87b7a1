//! Connection-gated in-memory storage

mod memory;

pub use memory::{ConfigSummary, MemoryStore, StatusReport};
