//! In-process memoization of generated audio.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use log::debug;

/// Every Nth store also sweeps expired entries out of storage.
const SWEEP_INTERVAL: usize = 10;

/// One memoized generation, keyed by exact source text.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Base64 of the combined PCM payload.
    pub audio_base64: String,
    pub created_at: DateTime<Utc>,
}

/// TTL-bounded cache of final audio payloads, keyed by the full,
/// untruncated input text (exact match, no normalization).
///
/// Expiry is checked lazily on read, so an expired entry is never served;
/// eviction from storage happens on an opportunistic sweep during stores
/// and may lag behind. Internally synchronized for concurrent callers.
pub struct AudioCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: TimeDelta,
    stores: AtomicUsize,
}

impl AudioCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            stores: AtomicUsize::new(0),
        }
    }

    /// Look up audio for `text`. Entries older than the TTL are misses.
    pub fn get(&self, text: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(text)?;
        if Utc::now().signed_duration_since(entry.created_at) >= self.ttl {
            debug!("cache entry expired for {}-char text", text.chars().count());
            return None;
        }
        Some(entry.audio_base64.clone())
    }

    /// Store audio for `text`, overwriting any prior entry.
    pub fn store(&self, text: &str, audio_base64: String) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            text.to_string(),
            CacheEntry {
                audio_base64,
                created_at: Utc::now(),
            },
        );

        if self.stores.fetch_add(1, Ordering::Relaxed) % SWEEP_INTERVAL == SWEEP_INTERVAL - 1 {
            let now = Utc::now();
            let before = entries.len();
            entries.retain(|_, e| now.signed_duration_since(e.created_at) < self.ttl);
            if before > entries.len() {
                debug!("cache sweep evicted {} entr(y/ies)", before - entries.len());
            }
        }
    }

    /// Number of stored entries, including any not yet swept.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
