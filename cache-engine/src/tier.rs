use bytes::Bytes;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// TTL band of a cache store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    Short,
    Medium,
    Long,
}

impl TierKind {
    pub const ALL: [TierKind; 3] = [TierKind::Short, TierKind::Medium, TierKind::Long];

    const SHORT_MAX_SECS: u64 = 60;
    const MEDIUM_MAX_SECS: u64 = 300;
    const LONG_NOMINAL_SECS: u64 = 3600;

    /// Tier selection: ≤60s short, ≤300s medium, anything longer is long.
    pub fn for_ttl(ttl_secs: u64) -> Self {
        if ttl_secs <= Self::SHORT_MAX_SECS {
            TierKind::Short
        } else if ttl_secs <= Self::MEDIUM_MAX_SECS {
            TierKind::Medium
        } else {
            TierKind::Long
        }
    }

    pub fn nominal_ttl(self) -> Duration {
        Duration::from_secs(match self {
            TierKind::Short => Self::SHORT_MAX_SECS,
            TierKind::Medium => Self::MEDIUM_MAX_SECS,
            TierKind::Long => Self::LONG_NOMINAL_SECS,
        })
    }

    pub fn sweep_interval(self) -> Duration {
        self.nominal_ttl() * 2
    }

    pub fn index(self) -> usize {
        match self {
            TierKind::Short => 0,
            TierKind::Medium => 1,
            TierKind::Long => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TierKind::Short => "short",
            TierKind::Medium => "medium",
            TierKind::Long => "long",
        }
    }
}

/// A stored response body together with the content type it was served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub body: Bytes,
    pub content_type: Option<String>,
}

impl CachedResponse {
    pub fn new(body: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            body: body.into(),
            content_type,
        }
    }

    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::new(body, Some("application/json".to_string()))
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedResponse,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStats {
    pub hits: u64,
    pub misses: u64,
    pub keys: usize,
    pub ttl_seconds: u64,
}

/// One independent key → entry store.
///
/// `generation` moves forward on every invalidation or flush, so a response
/// computed before one of those can be recognised and dropped.
#[derive(Debug)]
pub struct CacheTier {
    kind: TierKind,
    entries: DashMap<String, CacheEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
    generation: AtomicU64,
}

impl CacheTier {
    pub fn new(kind: TierKind) -> Self {
        Self {
            kind,
            entries: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            generation: AtomicU64::new(0),
        }
    }

    pub fn kind(&self) -> TierKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub(crate) fn advance_generation(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Read-time expiry applies regardless of sweep cadence.
    pub fn get(&self, key: &str, now: Instant) -> Option<CachedResponse> {
        // Drop an expired entry before looking it up; the map guard must not
        // be held across the removal.
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);

        let found = self.entries.get(key).map(|entry| entry.value.clone());
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    pub fn insert(&self, key: String, value: CachedResponse, ttl: Duration, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: now + ttl,
            },
        );
    }

    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry past its expiry, returning how many were dropped.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let mut purged = 0;
        self.entries.retain(|_, entry| {
            let live = entry.expires_at > now;
            if !live {
                purged += 1;
            }
            live
        });
        purged
    }

    /// Remove every entry, returning how many were dropped.
    pub fn clear(&self) -> usize {
        self.advance_generation();

        let mut removed = 0;
        self.entries.retain(|_, _| {
            removed += 1;
            false
        });
        removed
    }

    pub fn stats(&self) -> TierStats {
        TierStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            keys: self.entries.len(),
            ttl_seconds: self.kind.nominal_ttl().as_secs(),
        }
    }
}
