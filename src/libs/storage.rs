//! JSON document persistence for the studyflow stores.
//!
//! Each logical store owns one JSON document under a fixed key
//! (`courses`, `assignments`, `study_sessions`, `settings`), stored as
//! `<key>.json` in the platform data directory. The on-disk format is a
//! compatibility surface: camelCase field names, lowercase enum strings
//! and ISO-8601 date strings.
//!
//! ## Date revival
//!
//! Date-typed fields are recognized by *name*, not by type: any field
//! called `createdAt`, `dueDate`, `completedDate`, `startTime`, `endTime`
//! or `date`, at any nesting depth, is normalized after parsing and
//! before typed deserialization. This keeps documents written by earlier
//! versions of the app readable (RFC 3339 timestamps with a `Z` suffix,
//! epoch-millisecond numbers) without any type reflection.
//!
//! ## Error taxonomy
//!
//! - [`StorageError::Read`] / [`StorageError::Corrupt`] on load: callers
//!   treat these as "no data" and continue with an empty collection,
//!   flagging the store as degraded. Never fatal.
//! - [`StorageError::Write`] on save: callers keep their in-memory state
//!   and surface a warning. Writes are never rolled back.

use super::data_storage::DataStorage;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::fs;

/// Storage key for the course collection document.
pub const COURSES_KEY: &str = "courses";
/// Storage key for the assignment collection document.
pub const ASSIGNMENTS_KEY: &str = "assignments";
/// Storage key for the study session collection document.
pub const STUDY_SESSIONS_KEY: &str = "study_sessions";
/// Storage key for the user settings document.
pub const SETTINGS_KEY: &str = "settings";

/// All known storage keys, used by `clear_all`.
pub const ALL_KEYS: [&str; 4] = [COURSES_KEY, ASSIGNMENTS_KEY, STUDY_SESSIONS_KEY, SETTINGS_KEY];

/// Field names coerced to date values during revival, at any depth.
const DATE_FIELDS: [&str; 6] = ["createdAt", "dueDate", "completedDate", "startTime", "endTime", "date"];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt data under '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone)]
pub struct Storage {
    data_storage: DataStorage,
}

impl Storage {
    pub fn new() -> Self {
        Storage {
            data_storage: DataStorage::new(),
        }
    }

    /// Serializes `value` and writes it under `key`.
    pub async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        // Serialization of the store models cannot fail; map it onto the
        // corrupt variant anyway rather than panicking.
        let json = serde_json::to_string(value).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            source: e,
        })?;
        self.save_raw(key, &json).await
    }

    /// Writes an already-serialized JSON document under `key`.
    pub async fn save_raw(&self, key: &str, json: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::write(&path, json).await.map_err(|e| StorageError::Write {
            key: key.to_string(),
            source: e,
        })
    }

    /// Loads and deserializes the document under `key`.
    ///
    /// Returns `Ok(None)` if no document has ever been saved. Date-named
    /// fields are revived before typed deserialization.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key)?;
        let json = match fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Read {
                    key: key.to_string(),
                    source: e,
                })
            }
        };

        let mut value: Value = serde_json::from_str(&json).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            source: e,
        })?;
        revive_dates(&mut value);

        let typed = serde_json::from_value(value).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            source: e,
        })?;
        Ok(Some(typed))
    }

    /// Deletes the document under `key`. Absence is not an error.
    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Write {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    /// Deletes every known store document. Used by "reset app data".
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        for key in ALL_KEYS {
            self.remove(key).await?;
        }
        Ok(())
    }

    fn path_for(&self, key: &str) -> Result<std::path::PathBuf, StorageError> {
        self.data_storage
            .get_path(&format!("{}.json", key))
            .map_err(|e| StorageError::Read {
                key: key.to_string(),
                source: e,
            })
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks a parsed document and normalizes every date-named field.
///
/// Only string and number values are touched; anything else is left for
/// typed deserialization to reject.
pub fn revive_dates(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, v) in map.iter_mut() {
                if DATE_FIELDS.contains(&key.as_str()) {
                    if let Some(revived) = normalize_date_value(v) {
                        *v = Value::String(revived);
                        continue;
                    }
                }
                revive_dates(v);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                revive_dates(item);
            }
        }
        _ => {}
    }
}

/// Normalizes one raw date value to the naive ISO-8601 form chrono
/// deserializes (`%Y-%m-%dT%H:%M:%S%.f`). Returns `None` when the value
/// is not recognizable as a date.
fn normalize_date_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => parse_date_string(s).map(|dt| format_naive(&dt)),
        // Numeric timestamps in legacy documents are epoch milliseconds.
        Value::Number(n) => {
            let millis = n.as_i64()?;
            DateTime::from_timestamp_millis(millis).map(|dt| format_naive(&dt.naive_utc()))
        }
        _ => None,
    }
}

fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    // Naive ISO with 'T', as chrono itself writes.
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    // RFC 3339 with offset or 'Z', as found in legacy documents.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(NaiveDateTime::new(d, NaiveTime::MIN));
    }
    None
}

fn format_naive(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}
