//! Repositories over the storage boundary.
//!
//! Collections are persisted as a versioned envelope, `{"version": 1,
//! "items": [...]}`. Reads also accept the historical bare-array layout
//! (treated as version 0) so data written before the envelope existed keeps
//! loading; every write re-wraps in the current envelope. Entries are decoded
//! one by one so a single bad record never takes down the whole collection.

pub mod applicants;
pub mod jobs;

pub use applicants::ApplicantRepository;
pub use jobs::{JobQuery, JobRepository, StatusFilter};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::TrackerError;
use crate::store::Storage;

/// Current on-disk schema version.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    items: Vec<Value>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    items: &'a [T],
}

/// Outcome of reading a persisted collection, before per-entry decoding.
pub(crate) enum Loaded {
    /// The key was never written.
    Missing,
    /// The key holds something that is neither an envelope nor a bare array.
    Malformed,
    /// Raw entries, not yet decoded into records.
    Items(Vec<Value>),
}

/// Read the raw entries stored under `key`.
pub(crate) fn read_entries<S: Storage>(store: &S, key: &str) -> Result<Loaded, TrackerError> {
    let Some(raw) = store.get(key)? else {
        return Ok(Loaded::Missing);
    };
    if let Ok(envelope) = serde_json::from_str::<Envelope>(&raw) {
        if envelope.version > SCHEMA_VERSION {
            warn!(
                "Collection '{}' has schema version {} (newer than {}), reading anyway",
                key, envelope.version, SCHEMA_VERSION
            );
        }
        return Ok(Loaded::Items(envelope.items));
    }
    // Version-0 layout: a bare array with no envelope.
    match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(items) => Ok(Loaded::Items(items)),
        Err(e) => {
            warn!("Collection '{}' is unreadable: {}", key, e);
            Ok(Loaded::Malformed)
        }
    }
}

/// Persist `items` under `key` in the current envelope.
pub(crate) fn write_entries<S: Storage, T: Serialize>(
    store: &S,
    key: &str,
    items: &[T],
) -> Result<(), TrackerError> {
    let envelope = EnvelopeRef {
        version: SCHEMA_VERSION,
        items,
    };
    let raw = serde_json::to_string(&envelope)
        .map_err(|e| TrackerError::Validation(format!("serialization failed: {}", e)))?;
    store.set(key, &raw)?;
    Ok(())
}

/// Allocate a collection-unique id from the current wall clock.
///
/// Ids are millisecond timestamps (matching every id already in persisted
/// data), bumped past any collision so back-to-back creations in the same
/// millisecond stay distinct.
pub(crate) fn next_id(existing: &[i64]) -> i64 {
    let mut id = Utc::now().timestamp_millis();
    while existing.contains(&id) {
        id += 1;
    }
    id
}

/// Format a date the way the forms do, e.g. "Apr 1, 2024".
pub(crate) fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
