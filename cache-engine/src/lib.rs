//! In-process, TTL-tiered response cache.
//!
//! Three independent stores (short / medium / long) hold response bodies
//! keyed by request identity. Read routes are wrapped with a [`CachePolicy`]
//! obtained from [`ResponseCache::wrap`]; write paths call
//! [`ResponseCache::invalidate`] with a wildcard pattern once their mutation
//! has committed.

pub mod key;
pub mod pattern;
pub mod sweeper;
pub mod tier;

pub use key::{KeyFn, RequestDescriptor, default_key, resolve_key};
pub use pattern::KeyPattern;
pub use sweeper::SweepHandle;
pub use tier::{CacheTier, CachedResponse, TierKind, TierStats};

use serde::Serialize;
use shared::Result;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Largest body stored unless configured otherwise.
pub const DEFAULT_MAX_ENTRY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub short: TierStats,
    pub medium: TierStats,
    pub long: TierStats,
}

impl CacheStats {
    pub fn total_keys(&self) -> usize {
        self.short.keys + self.medium.keys + self.long.keys
    }
}

#[derive(Debug)]
pub struct ResponseCache {
    tiers: [CacheTier; 3],
    max_entry_bytes: usize,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_max_entry_bytes(DEFAULT_MAX_ENTRY_BYTES)
    }

    pub fn with_max_entry_bytes(max_entry_bytes: usize) -> Self {
        Self {
            tiers: TierKind::ALL.map(CacheTier::new),
            max_entry_bytes,
        }
    }

    pub fn max_entry_bytes(&self) -> usize {
        self.max_entry_bytes
    }

    pub fn tier(&self, kind: TierKind) -> &CacheTier {
        &self.tiers[kind.index()]
    }

    /// Configure caching for one route. The tier is fixed here, once, from
    /// `ttl_secs`; every request through the returned policy shares it.
    pub fn wrap(self: &Arc<Self>, ttl_secs: u64, key_fn: Option<KeyFn>) -> CachePolicy {
        let ttl_secs = ttl_secs.max(1);
        CachePolicy {
            cache: Arc::clone(self),
            tier: TierKind::for_ttl(ttl_secs),
            ttl: Duration::from_secs(ttl_secs),
            key_fn,
        }
    }

    /// Drop every key matching `pattern` from all three tiers and return the
    /// number of distinct keys removed.
    ///
    /// Every tier's generation advances first, so a response computed before
    /// this call is never stored afterwards, even when nothing matched yet.
    pub fn invalidate(&self, pattern: &str) -> Result<usize> {
        let pattern = KeyPattern::compile(pattern)?;

        for tier in &self.tiers {
            tier.advance_generation();
        }

        let candidates: HashSet<String> = self
            .tiers
            .iter()
            .flat_map(|tier| tier.keys())
            .filter(|key| pattern.matches(key))
            .collect();

        let removed = candidates
            .iter()
            .filter(|key| {
                // Attempt every tier; a key absent from a tier is a no-op there.
                self.tiers
                    .iter()
                    .fold(false, |any, tier| tier.remove(key) || any)
            })
            .count();

        debug!(pattern = pattern.as_str(), removed, "Invalidated cached responses");
        Ok(removed)
    }

    /// Empty all tiers, returning how many entries they held.
    pub fn flush(&self) -> usize {
        let removed: usize = self.tiers.iter().map(CacheTier::clear).sum();
        debug!(removed, "Flushed response cache");
        removed
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            short: self.tier(TierKind::Short).stats(),
            medium: self.tier(TierKind::Medium).stats(),
            long: self.tier(TierKind::Long).stats(),
        }
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(CacheTier::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.iter().all(CacheTier::is_empty)
    }

    /// Start one expiry sweeper per tier on the current tokio runtime.
    pub fn start_sweepers(self: &Arc<Self>) -> SweepHandle {
        SweepHandle::spawn(Arc::clone(self))
    }
}

/// Per-route caching configuration produced by [`ResponseCache::wrap`].
#[derive(Clone)]
pub struct CachePolicy {
    cache: Arc<ResponseCache>,
    tier: TierKind,
    ttl: Duration,
    key_fn: Option<KeyFn>,
}

impl fmt::Debug for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachePolicy")
            .field("tier", &self.tier)
            .field("ttl", &self.ttl)
            .field("custom_key", &self.key_fn.is_some())
            .finish()
    }
}

impl CachePolicy {
    pub fn tier(&self) -> TierKind {
        self.tier
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entry_bytes(&self) -> usize {
        self.cache.max_entry_bytes
    }

    pub fn key_for(&self, descriptor: &RequestDescriptor) -> String {
        resolve_key(descriptor, self.key_fn.as_ref())
    }

    pub fn lookup(&self, key: &str) -> Option<CachedResponse> {
        self.cache.tier(self.tier).get(key, Instant::now())
    }

    /// Snapshot of the tier's generation. Take it before computing a
    /// response and hand it to [`CachePolicy::store_since`].
    pub fn generation(&self) -> u64 {
        self.cache.tier(self.tier).generation()
    }

    /// Record a successful response computed just now.
    pub fn store(&self, key: String, response: CachedResponse) -> bool {
        self.store_since(key, response, self.generation())
    }

    /// Record a successful response computed after `generation` was taken.
    /// It is dropped when an invalidation or flush ran in the meantime, and
    /// oversized bodies are skipped; the request they belong to is unaffected.
    pub fn store_since(&self, key: String, response: CachedResponse, generation: u64) -> bool {
        if response.body.len() > self.cache.max_entry_bytes {
            warn!(
                key = %key,
                size = response.body.len(),
                limit = self.cache.max_entry_bytes,
                "Response too large to cache"
            );
            return false;
        }

        let tier = self.cache.tier(self.tier);
        if tier.generation() != generation {
            debug!(key = %key, "Response made stale by invalidation, not caching");
            return false;
        }

        tier.insert(key.clone(), response, self.ttl, Instant::now());

        // An invalidation that advanced the generation before the insert
        // landed may have scanned past this key.
        if tier.generation() != generation {
            tier.remove(&key);
            debug!(key = %key, "Response made stale by invalidation, not caching");
            return false;
        }
        true
    }
}
