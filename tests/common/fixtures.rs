//! Test fixture creation for catalogs, fake remotes and engines
//!
//! The fakes here implement `RemoteCatalog` so tests can drive the engine
//! through every network outcome without touching the real webfonts API.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use fontmatch::cache::CACHE_FILE_NAME;
use fontmatch::catalog::{Font, FontCategory};
use fontmatch::config::EngineConfig;
use fontmatch::matcher::FontRecommendation;
use fontmatch::refine::{RefineError, RefinedCandidate, Refiner};
use fontmatch::remote::{FetchError, RemoteCatalog};
use fontmatch::selection::{EnhancementLevel, SelectionCriteria, SelectionEngine};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Builds a single font entry with latin subset coverage.
pub fn font(family: &str, category: FontCategory, variants: &[&str]) -> Font {
    Font {
        family: family.to_string(),
        category,
        variants: variants.iter().map(|v| v.to_string()).collect(),
        subsets: vec!["latin".to_string()],
    }
}

/// A small catalog covering every category, ordered by popularity.
pub fn sample_catalog() -> Vec<Font> {
    vec![
        font("Inter", FontCategory::SansSerif, &["regular", "500", "700"]),
        font("Karla", FontCategory::SansSerif, &["regular", "700"]),
        font("Mulish", FontCategory::SansSerif, &["regular", "600"]),
        font("Lora", FontCategory::Serif, &["regular", "500", "600"]),
        font("Spectral", FontCategory::Serif, &["regular", "500"]),
        font(
            "Playfair Display",
            FontCategory::Serif,
            &["regular", "700", "800"],
        ),
        font("Bangers", FontCategory::Display, &["regular"]),
        font("Abril Fatface", FontCategory::Display, &["regular"]),
        font("Space Mono", FontCategory::Monospace, &["regular", "700"]),
        font(
            "JetBrains Mono",
            FontCategory::Monospace,
            &["regular", "500", "700"],
        ),
        font("Caveat", FontCategory::Handwriting, &["regular", "600"]),
        font("Pacifico", FontCategory::Handwriting, &["regular"]),
    ]
}

/// Two-font catalog for the canonical trait-matching scenario: a modern
/// sans-serif and a playful handwriting font.
pub fn scenario_catalog() -> Vec<Font> {
    vec![
        font("Inter", FontCategory::SansSerif, &["regular", "500", "700"]),
        font("Pacifico", FontCategory::Handwriting, &["regular"]),
    ]
}

/// Selection criteria with the given traits and moderate enhancement.
pub fn criteria(traits: &[&str]) -> SelectionCriteria {
    SelectionCriteria::from_traits(traits.iter().copied())
}

/// Selection criteria with an explicit enhancement level.
pub fn criteria_at(traits: &[&str], level: EnhancementLevel) -> SelectionCriteria {
    let mut criteria = criteria(traits);
    criteria.enhancement_level = level;
    criteria
}

// ====== Fake remotes ======

/// Remote that always returns the same catalog and counts how often it is hit.
pub struct StaticRemote {
    fonts: Vec<Font>,
    calls: AtomicUsize,
}

impl StaticRemote {
    pub fn new(fonts: Vec<Font>) -> Arc<Self> {
        Arc::new(Self {
            fonts,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteCatalog for StaticRemote {
    async fn fetch(&self) -> Result<Vec<Font>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.fonts.clone())
    }
}

/// Remote that always fails with a connection error.
pub struct FailingRemote {
    calls: AtomicUsize,
}

impl FailingRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteCatalog for FailingRemote {
    async fn fetch(&self) -> Result<Vec<Font>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FetchError::Connection("connection refused".to_string()))
    }
}

/// Remote that responds with a well-formed but empty catalog.
pub struct EmptyRemote;

#[async_trait]
impl RemoteCatalog for EmptyRemote {
    async fn fetch(&self) -> Result<Vec<Font>, FetchError> {
        Err(FetchError::EmptyCatalog)
    }
}

/// Remote that never completes within any sane test budget.
pub struct HangingRemote;

#[async_trait]
impl RemoteCatalog for HangingRemote {
    async fn fetch(&self) -> Result<Vec<Font>, FetchError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(FetchError::Timeout)
    }
}

// ====== Fake refiners ======

/// Refiner that reverses the candidate head and pushes every confidence to
/// 0.9, counting invocations.
pub struct ReversingRefiner {
    calls: AtomicUsize,
}

impl ReversingRefiner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Refiner for ReversingRefiner {
    fn name(&self) -> &str {
        "reversing-fake"
    }

    async fn refine(
        &self,
        candidates: &[FontRecommendation],
        _criteria: &SelectionCriteria,
    ) -> Result<Vec<RefinedCandidate>, RefineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(candidates
            .iter()
            .rev()
            .map(|rec| RefinedCandidate {
                family: rec.font.family.clone(),
                confidence: Some(0.9),
                rationale: None,
            })
            .collect())
    }
}

/// Refiner that always times out.
pub struct FailingRefiner;

#[async_trait]
impl Refiner for FailingRefiner {
    fn name(&self) -> &str {
        "failing-fake"
    }

    async fn refine(
        &self,
        _candidates: &[FontRecommendation],
        _criteria: &SelectionCriteria,
    ) -> Result<Vec<RefinedCandidate>, RefineError> {
        Err(RefineError::Timeout)
    }
}

// ====== Engine builders ======

/// Engine config pointed at a test cache directory, with the minimum catalog
/// size lowered so two-font test catalogs validate.
pub fn engine_config(cache_dir: &Path) -> EngineConfig {
    let mut config = EngineConfig::for_cache_dir(cache_dir);
    config.min_catalog_fonts = 2;
    config
}

/// Builds an engine wired to the given fake remote.
pub fn engine_with(cache_dir: &Path, remote: Arc<dyn RemoteCatalog>) -> SelectionEngine {
    SelectionEngine::with_parts(engine_config(cache_dir), remote, None)
        .expect("test engine setup failed")
}

/// Builds an engine wired to a fake remote and a refiner.
pub fn engine_with_refiner(
    cache_dir: &Path,
    remote: Arc<dyn RemoteCatalog>,
    refiner: Arc<dyn Refiner>,
) -> SelectionEngine {
    SelectionEngine::with_parts(engine_config(cache_dir), remote, Some(refiner))
        .expect("test engine setup failed")
}

/// Builds an engine with network access disabled.
pub fn offline_engine(cache_dir: &Path, remote: Arc<dyn RemoteCatalog>) -> SelectionEngine {
    let mut config = engine_config(cache_dir);
    config.enabled = false;
    SelectionEngine::with_parts(config, remote, None).expect("test engine setup failed")
}

// ====== Cache file helpers ======

/// Writes a catalog file directly into the cache directory, bypassing the
/// store, so tests can control the persisted timestamp.
pub fn write_catalog_file(cache_dir: &Path, fonts: &[Font], fetched_at_unix: i64) {
    std::fs::create_dir_all(cache_dir).expect("create cache dir");
    let payload = serde_json::json!({
        "fetched_at_unix": fetched_at_unix,
        "fonts": fonts,
    });
    let bytes = serde_json::to_vec_pretty(&payload).expect("encode catalog file");
    std::fs::write(cache_dir.join(CACHE_FILE_NAME), bytes).expect("write catalog file");
}

/// Unix timestamp `hours` in the past.
pub fn hours_ago(hours: i64) -> i64 {
    chrono::Utc::now().timestamp() - hours * 3600
}
