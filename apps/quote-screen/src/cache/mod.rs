//! Quote cache: a single-slot store for the last accepted content.
//!
//! The cache decouples "what to show" from "when to fetch". A record is reused
//! until it is `ttl` seconds old; loading never fails, anything unreadable is
//! simply "no record" and triggers a refresh.

pub mod file;

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Deserializer, Serialize};

use crate::content::FittedContent;
use crate::errors::CacheError;

pub use file::FileQuoteCache;

/// The persisted slot: `{"lines": [...], "footer": "...", "timestamp": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub lines: Vec<String>,
    pub footer: String,
    /// Acquisition time, Unix seconds.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: i64,
}

impl CacheRecord {
    pub fn new(content: &FittedContent, timestamp: i64) -> Self {
        Self {
            lines: content.lines().to_vec(),
            footer: content.footer().to_string(),
            timestamp,
        }
    }

    /// The cached content, or `None` when the record holds no lines.
    pub fn content(&self) -> Option<FittedContent> {
        FittedContent::new(self.lines.clone(), self.footer.clone())
    }
}

/// Accepts integer or fractional seconds; fractions are floored.
/// Fractions outside the `i64` range are rejected, so the record loads as absent.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;
    value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .map(f64::floor)
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {value}")))
}

/// Single-slot storage for the last accepted content.
pub trait QuoteCache: Send + Sync {
    /// The stored record, or `None` if absent or unreadable.
    fn load(&self) -> Option<CacheRecord>;

    /// Replaces the stored record wholesale.
    fn save(&self, content: &FittedContent, timestamp: i64) -> Result<(), CacheError>;
}

/// True when `record` must be refreshed: absent, empty, or at least `ttl` seconds old.
pub fn is_stale(record: Option<&CacheRecord>, now: i64, ttl: u64) -> bool {
    match record {
        None => true,
        Some(record) if record.lines.is_empty() => true,
        // An age that overflows i64 cannot be trusted: refresh.
        Some(record) => now
            .checked_sub(record.timestamp)
            .map_or(true, |age| age >= ttl as i64),
    }
}

/// Seconds until `record` goes stale; zero once it has.
pub fn seconds_until_stale(record: &CacheRecord, now: i64, ttl: u64) -> u64 {
    let age = now.saturating_sub(record.timestamp);
    (ttl as i64).saturating_sub(age).max(0) as u64
}

/// Process-local cache, for tests and embedding without a filesystem.
#[allow(dead_code)]
#[derive(Default)]
pub struct MemoryQuoteCache {
    slot: Mutex<Option<CacheRecord>>,
}

#[allow(dead_code)]
impl MemoryQuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: CacheRecord) -> Self {
        Self {
            slot: Mutex::new(Some(record)),
        }
    }
}

impl QuoteCache for MemoryQuoteCache {
    fn load(&self) -> Option<CacheRecord> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, content: &FittedContent, timestamp: i64) -> Result<(), CacheError> {
        // A panicked holder cannot leave the slot half-written; take it back.
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CacheRecord::new(content, timestamp));
        Ok(())
    }
}
