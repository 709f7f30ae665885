use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

/// Dashboard payloads that can be cached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardKind {
    /// `GET /model-info`
    ModelInfo,
    /// `GET /data-insight`
    DataInsight,
}

impl DashboardKind {
    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            DashboardKind::ModelInfo => "model-info",
            DashboardKind::DataInsight => "data-insight",
        }
    }
}

/// A cached payload and when it was fetched
#[derive(Debug, Clone)]
pub struct CachedPayload {
    pub value: Value,
    pub fetched_at: DateTime<Utc>,
}

/// In-memory time-limited cache for dashboard payloads
///
/// Clones share the same storage. Only successful fetches should be inserted.
#[derive(Debug, Clone)]
pub struct DashboardCache {
    entries: Arc<Mutex<HashMap<DashboardKind, CachedPayload>>>,
    ttl: Duration,
}

impl DashboardCache {
    /// Create an empty cache whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Get a fresh payload; expired entries are dropped
    pub fn get(&self, kind: DashboardKind) -> Option<Value> {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Dashboard cache lock poisoned: {}", e);
                return None;
            }
        };

        let fresh = entries
            .get(&kind)
            .map(|entry| self.is_fresh(entry.fetched_at, Utc::now()));

        match fresh {
            Some(true) => {
                debug!("Serving {} from cache", kind.name());
                entries.get(&kind).map(|entry| entry.value.clone())
            }
            Some(false) => {
                debug!("Cached {} expired", kind.name());
                entries.remove(&kind);
                None
            }
            None => None,
        }
    }

    /// Store a payload fetched now
    pub fn insert(&self, kind: DashboardKind, value: Value) {
        self.insert_at(kind, value, Utc::now());
    }

    /// Store a payload with an explicit fetch time
    pub fn insert_at(&self, kind: DashboardKind, value: Value, fetched_at: DateTime<Utc>) {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.insert(kind, CachedPayload { value, fetched_at });
            }
            Err(e) => warn!("Dashboard cache lock poisoned: {}", e),
        }
    }

    /// Drop one entry
    pub fn invalidate(&self, kind: DashboardKind) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(&kind);
        }
    }

    /// Drop all entries
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    fn is_fresh(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(self.ttl) {
            Ok(ttl) => now - fetched_at < ttl,
            // TTL too large to represent: never expires
            Err(_) => true,
        }
    }
}
