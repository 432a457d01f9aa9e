//! Catalog caching and refresh coordination.
//!
//! The coordinator owns the in-memory catalog record plus its on-disk mirror
//! and resolves every catalog request through a fixed fallback ladder:
//! fresh cache, live fetch, stale cache, builtin. Reads are lock-free apart
//! from a short `RwLock` read; only a refresh takes the write path, and at
//! most one refresh runs at a time.

mod store;

pub use store::{SnapshotStore, StoreError, CACHE_FILE_NAME};

use crate::catalog::{builtin_snapshot, dedupe_families, CatalogSnapshot, Font, SnapshotSource};
use crate::remote::{FetchError, RemoteCatalog};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

/// A validated catalog held in memory.
///
/// Age is tracked against a monotonic anchor: the wall-clock age at load time
/// plus elapsed monotonic time since. System clock jumps after load therefore
/// cannot flip freshness.
#[derive(Debug)]
pub struct CacheRecord {
    fonts: Arc<Vec<Font>>,
    fetched_at: DateTime<Utc>,
    base_age: Duration,
    anchored_at: Instant,
}

impl CacheRecord {
    /// A record for fonts fetched just now.
    pub fn fresh(fonts: Vec<Font>) -> Self {
        Self {
            fonts: Arc::new(fonts),
            fetched_at: Utc::now(),
            base_age: Duration::ZERO,
            anchored_at: Instant::now(),
        }
    }

    /// A record rebuilt from disk, aged by how long ago it was fetched.
    pub fn loaded(fonts: Vec<Font>, fetched_at: DateTime<Utc>) -> Self {
        let base_age = Utc::now()
            .signed_duration_since(fetched_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        Self {
            fonts: Arc::new(fonts),
            fetched_at,
            base_age,
            anchored_at: Instant::now(),
        }
    }

    pub fn fonts(&self) -> &Arc<Vec<Font>> {
        &self.fonts
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn age(&self) -> Duration {
        self.base_age + self.anchored_at.elapsed()
    }

    /// Freshness compares whole seconds, so a record exactly at the TTL is
    /// still fresh and one a second older is not.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        self.age().as_secs() <= max_age.as_secs()
    }

    /// View this record as a snapshot with the given source tag.
    pub fn snapshot(&self, source: SnapshotSource) -> CatalogSnapshot {
        CatalogSnapshot {
            fonts: self.fonts.clone(),
            fetched_at: self.fetched_at,
            source,
        }
    }
}

/// The fallback ladder, in the order tiers are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    FreshCache,
    Live,
    StaleCache,
    Builtin,
}

/// Which tiers apply for a request. Forcing a refresh skips the fresh-cache
/// tier; offline mode skips the live tier. The ladder always ends at builtin,
/// which cannot fail.
pub fn tier_plan(force_refresh: bool, network_enabled: bool) -> Vec<Tier> {
    let mut plan = Vec::with_capacity(4);
    if !force_refresh {
        plan.push(Tier::FreshCache);
    }
    if network_enabled {
        plan.push(Tier::Live);
    }
    plan.push(Tier::StaleCache);
    plan.push(Tier::Builtin);
    plan
}

/// Cache diagnostics for the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub path: String,
    pub present: bool,
    pub fonts: usize,
    pub age_secs: Option<u64>,
    pub fresh: bool,
}

enum RefreshOutcome {
    Fetched(Arc<CacheRecord>),
    InFlight,
    Failed(FetchError),
}

pub struct CacheCoordinator {
    store: Arc<SnapshotStore>,
    client: Arc<dyn RemoteCatalog>,
    network_enabled: bool,
    current: Arc<RwLock<Option<Arc<CacheRecord>>>>,
    refresh_gate: Arc<AsyncMutex<()>>,
}

impl CacheCoordinator {
    /// Build a coordinator, eagerly loading any persisted catalog so later
    /// reads never touch the disk. A corrupt cache file is discarded here and
    /// the coordinator starts empty.
    pub fn new(
        store: SnapshotStore,
        client: Arc<dyn RemoteCatalog>,
        network_enabled: bool,
    ) -> Self {
        let initial = match store.load() {
            Ok(Some(record)) => {
                debug!(
                    fonts = record.fonts().len(),
                    age_secs = record.age().as_secs(),
                    "Loaded persisted catalog cache"
                );
                Some(Arc::new(record))
            }
            Ok(None) => None,
            Err(StoreError::Corrupt(reason)) => {
                warn!(reason = %reason, "Discarding corrupt catalog cache");
                store.discard();
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to read catalog cache");
                None
            }
        };

        Self {
            store: Arc::new(store),
            client,
            network_enabled,
            current: Arc::new(RwLock::new(initial)),
            refresh_gate: Arc::new(AsyncMutex::new(())),
        }
    }

    /// Resolve a catalog snapshot through the fallback ladder. Never fails:
    /// the last tier is the builtin catalog.
    pub async fn snapshot(&self, max_age: Duration, force_refresh: bool) -> CatalogSnapshot {
        for tier in tier_plan(force_refresh, self.network_enabled) {
            match tier {
                Tier::FreshCache => {
                    if let Some(record) = self.cached_record() {
                        if record.is_fresh(max_age) {
                            return record.snapshot(SnapshotSource::Cached);
                        }
                    }
                }
                Tier::Live => match self.refresh().await {
                    RefreshOutcome::Fetched(record) => {
                        return record.snapshot(SnapshotSource::Live)
                    }
                    RefreshOutcome::InFlight => {
                        debug!("Catalog refresh already in flight; serving previous snapshot");
                    }
                    RefreshOutcome::Failed(e) => {
                        warn!(error = %e, "Catalog fetch failed; degrading to cached tiers");
                    }
                },
                Tier::StaleCache => {
                    if let Some(record) = self.cached_record() {
                        info!(
                            age_secs = record.age().as_secs(),
                            "Serving stale catalog cache"
                        );
                        return record.snapshot(SnapshotSource::CachedStale);
                    }
                }
                Tier::Builtin => return builtin_snapshot(),
            }
        }
        // The plan always ends with Builtin.
        builtin_snapshot()
    }

    /// The best snapshot answerable without any waiting. Used when a caller's
    /// time budget expires mid-resolution.
    pub fn best_available(&self, max_age: Duration) -> CatalogSnapshot {
        match self.cached_record() {
            Some(record) if record.is_fresh(max_age) => record.snapshot(SnapshotSource::Cached),
            Some(record) => record.snapshot(SnapshotSource::CachedStale),
            None => builtin_snapshot(),
        }
    }

    pub fn status(&self, max_age: Duration) -> CacheStatus {
        match self.cached_record() {
            Some(record) => CacheStatus {
                path: self.store.path().display().to_string(),
                present: true,
                fonts: record.fonts().len(),
                age_secs: Some(record.age().as_secs()),
                fresh: record.is_fresh(max_age),
            },
            None => CacheStatus {
                path: self.store.path().display().to_string(),
                present: false,
                fonts: 0,
                age_secs: None,
                fresh: false,
            },
        }
    }

    fn cached_record(&self) -> Option<Arc<CacheRecord>> {
        self.current.read().unwrap().clone()
    }

    /// Fetch the catalog and commit it to memory and disk.
    ///
    /// The fetch runs in a spawned task that owns the refresh guard, so a
    /// caller that stops waiting (budget expiry) does not cancel the refresh;
    /// it completes and commits for future callers. If another refresh holds
    /// the guard, this returns immediately instead of queueing.
    async fn refresh(&self) -> RefreshOutcome {
        let guard = match self.refresh_gate.clone().try_lock_owned() {
            Ok(guard) => guard,
            Err(_) => return RefreshOutcome::InFlight,
        };

        let client = self.client.clone();
        let store = self.store.clone();
        let current = self.current.clone();
        let task = tokio::spawn(async move {
            let _guard = guard;
            // Family names are the catalog identity; repeats from the remote
            // keep only their first (most popular) entry.
            let fonts = dedupe_families(client.fetch().await?);
            let record = Arc::new(CacheRecord::fresh(fonts));
            // A failed persist degrades durability, not this response.
            if let Err(e) = store.save(&record) {
                warn!(error = %e, "Failed to persist refreshed catalog");
            }
            *current.write().unwrap() = Some(record.clone());
            info!(fonts = record.fonts().len(), "Catalog refreshed from remote");
            Ok::<Arc<CacheRecord>, FetchError>(record)
        });

        match task.await {
            Ok(Ok(record)) => RefreshOutcome::Fetched(record),
            Ok(Err(e)) => RefreshOutcome::Failed(e),
            Err(e) => RefreshOutcome::Failed(FetchError::Connection(format!(
                "refresh task failed: {}",
                e
            ))),
        }
    }
}
