//! Core types for Fauxbase

use serde_json::{Map, Value};

/// A stored record: an open mapping from field name to JSON value.
///
/// By convention a record carries an `id` field unique within the
/// collection; the store does not enforce uniqueness. Records are
/// immutable once inserted.
pub type Record = Map<String, Value>;
