//! Memoized possible-values tables.
//!
//! Two flavours:
//! - [`PossibleValuesCache`]: shared, bounded LRU keyed by a SHA-256 of the
//!   document's canonical JSON. A background refresh that re-reads the same
//!   file hits the cache; any edit produces a new key.
//! - [`LoadedTimetable`]: one document plus its table, computed on first
//!   use and dropped with the document.

use lru::LruCache;
use once_cell::sync::OnceCell;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use super::possible::{all_possible_values, PossibleValues};
use crate::error::EngineResult;
use crate::models::Timetable;

const DEFAULT_CAPACITY: usize = 8;

/// Content hash identifying a timetable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentKey([u8; 32]);

impl DocumentKey {
    /// Hashes the canonical serialization of `timetable`.
    pub fn of(timetable: &Timetable) -> EngineResult<Self> {
        let canonical = serde_json::to_vec(timetable)?;
        let digest = Sha256::digest(&canonical);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Ok(Self(bytes))
    }

    /// Lowercase hex form, for logs.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Bounded cache of possible-values tables keyed by document content.
#[derive(Debug)]
pub struct PossibleValuesCache {
    entries: Mutex<LruCache<DocumentKey, Arc<PossibleValues>>>,
}

impl Default for PossibleValuesCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

impl PossibleValuesCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the table for `timetable`, computing it on a miss.
    ///
    /// The computation runs outside the lock; two threads missing on the
    /// same document may both compute, and the later insert wins.
    pub fn get_or_compute(&self, timetable: &Timetable) -> EngineResult<Arc<PossibleValues>> {
        let key = DocumentKey::of(timetable)?;

        if let Some(hit) = self.lock().get(&key) {
            debug!(target: "timetable::analysis", key = %key.to_hex(), "possible values cache hit");
            return Ok(Arc::clone(hit));
        }

        let computed = Arc::new(all_possible_values(timetable));
        self.lock().put(key, Arc::clone(&computed));
        debug!(target: "timetable::analysis", key = %key.to_hex(), "possible values cache miss");
        Ok(computed)
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every cached table.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<DocumentKey, Arc<PossibleValues>>> {
        // tables are immutable once inserted, so a poisoned lock is still consistent
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A timetable document with its lazily computed possible values.
#[derive(Debug)]
pub struct LoadedTimetable {
    timetable: Timetable,
    possible: OnceCell<Arc<PossibleValues>>,
}

impl LoadedTimetable {
    pub fn new(timetable: Timetable) -> Self {
        Self {
            timetable,
            possible: OnceCell::new(),
        }
    }

    /// Parses and wraps a document.
    pub fn from_json(raw: &str) -> EngineResult<Self> {
        Ok(Self::new(Timetable::from_json(raw)?))
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Possible values of every slot, computed once per instance.
    pub fn possible_values(&self) -> Arc<PossibleValues> {
        Arc::clone(
            self.possible
                .get_or_init(|| Arc::new(all_possible_values(&self.timetable))),
        )
    }

    pub fn into_inner(self) -> Timetable {
        self.timetable
    }
}
