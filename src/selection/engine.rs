//! The selection orchestrator.
//!
//! `select` is the crate's front door. Its contract: the only error a caller
//! can see is invalid criteria. Everything downstream (network, cache, disk,
//! refiner) degrades through fallbacks instead of failing, and the response
//! metadata reports which path actually served.

use super::criteria::{CriteriaError, SelectionCriteria};
use super::models::{SelectionMetadata, SelectionMethod, SelectionResponse};
use crate::cache::{CacheCoordinator, CacheStatus, SnapshotStore};
use crate::catalog::{builtin_fonts, builtin_snapshot, CatalogSnapshot, SnapshotSource};
use crate::config::EngineConfig;
use crate::hierarchy::{self, TypographyHierarchy};
use crate::matcher::{FontRecommendation, PersonalityMatcher};
use crate::refine::{LlmRefiner, Refiner};
use crate::remote::{RemoteCatalog, WebfontsClient};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct SelectionEngine {
    coordinator: CacheCoordinator,
    matcher: PersonalityMatcher,
    limiter: Arc<Semaphore>,
    max_age: Duration,
    call_budget: Duration,
}

impl SelectionEngine {
    /// Build an engine with the real webfonts client and, if configured, the
    /// LLM refiner.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let client: Arc<dyn RemoteCatalog> = Arc::new(
            WebfontsClient::new(
                &config.api_base_url,
                config.api_key.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )
            .context("Failed to build webfonts client")?,
        );
        let refiner: Option<Arc<dyn Refiner>> = match &config.refiner {
            Some(settings) => Some(Arc::new(
                LlmRefiner::new(settings).context("Failed to build LLM refiner")?,
            )),
            None => None,
        };
        Self::with_parts(config, client, refiner)
    }

    /// Build an engine around explicit catalog and refiner implementations.
    /// This is the seam tests use to inject fakes.
    pub fn with_parts(
        config: EngineConfig,
        client: Arc<dyn RemoteCatalog>,
        refiner: Option<Arc<dyn Refiner>>,
    ) -> Result<Self> {
        let store = SnapshotStore::open(
            &config.cache_dir,
            config.cache_size_cap,
            config.min_catalog_fonts,
        )
        .context("Failed to open catalog cache store")?;
        let coordinator = CacheCoordinator::new(store, client, config.enabled);

        Ok(Self {
            coordinator,
            matcher: PersonalityMatcher::new(refiner),
            limiter: Arc::new(Semaphore::new(config.max_concurrent_selections.max(1))),
            max_age: config.ttl(),
            call_budget: Duration::from_millis(config.call_budget_ms),
        })
    }

    /// Select typography for the given criteria.
    ///
    /// Fails only on invalid criteria. Callers that already have typography
    /// get it echoed back untouched. `time_budget` overrides the configured
    /// per-call budget; when it expires mid-resolution the best already
    /// available catalog tier serves instead.
    pub async fn select(
        &self,
        criteria: SelectionCriteria,
        existing_typography: Option<TypographyHierarchy>,
        time_budget: Option<Duration>,
    ) -> Result<SelectionResponse, CriteriaError> {
        criteria.validate()?;
        let started = Instant::now();
        let request_id = Uuid::new_v4();

        if let Some(existing) = existing_typography {
            debug!(request_id = %request_id, "Existing typography supplied; preserving it");
            return Ok(SelectionResponse {
                typography: existing,
                selection_metadata: SelectionMetadata {
                    selection_method: SelectionMethod::Preserved,
                    processing_time_ms: elapsed_ms(started),
                    total_fonts_considered: 0,
                    source: None,
                },
            });
        }

        // Bound how many selections resolve concurrently. The semaphore is
        // never closed, so acquire cannot fail.
        let _permit = self
            .limiter
            .acquire()
            .await
            .expect("selection limiter is never closed");

        let budget = time_budget.unwrap_or(self.call_budget);
        let snapshot = match tokio::time::timeout(
            budget,
            self.coordinator.snapshot(self.max_age, false),
        )
        .await
        {
            Ok(snapshot) => snapshot,
            Err(_) => {
                warn!(
                    request_id = %request_id,
                    budget_ms = budget.as_millis() as u64,
                    "Time budget expired while resolving the catalog; using best available tier"
                );
                self.coordinator.best_available(self.max_age)
            }
        };

        let (typography, method, considered, source) =
            self.assemble(&criteria, snapshot, request_id).await;

        info!(
            request_id = %request_id,
            method = ?method,
            source = %source,
            fonts_considered = considered,
            elapsed_ms = elapsed_ms(started),
            "Font selection complete"
        );

        Ok(SelectionResponse {
            typography,
            selection_metadata: SelectionMetadata {
                selection_method: method,
                processing_time_ms: elapsed_ms(started),
                total_fonts_considered: considered,
                source: Some(source),
            },
        })
    }

    /// Force a catalog refresh regardless of cache freshness.
    pub async fn refresh_catalog(&self) -> CatalogSnapshot {
        self.coordinator.snapshot(self.max_age, true).await
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.coordinator.status(self.max_age)
    }

    /// Match and build against the snapshot, retrying once against the
    /// builtin catalog and finally hardwired defaults. Cannot fail.
    async fn assemble(
        &self,
        criteria: &SelectionCriteria,
        snapshot: CatalogSnapshot,
        request_id: Uuid,
    ) -> (TypographyHierarchy, SelectionMethod, usize, SnapshotSource) {
        let considered = snapshot.len();
        let source = snapshot.source;

        match self.matcher.recommend(criteria, &snapshot).await {
            Ok(outcome) => {
                match hierarchy::build(&outcome.recommendations, criteria.enhancement_level) {
                    Ok(typography) => {
                        let method = if outcome.refined {
                            SelectionMethod::Refined
                        } else {
                            SelectionMethod::RuleBased
                        };
                        return (typography, method, considered, source);
                    }
                    Err(e) => {
                        warn!(request_id = %request_id, error = %e, "Hierarchy build failed; retrying with builtin catalog");
                    }
                }
            }
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "Matching failed; retrying with builtin catalog");
            }
        }

        let fallback = builtin_snapshot();
        let considered = fallback.len();
        if let Ok(outcome) = self.matcher.rank(criteria, &fallback) {
            if let Ok(typography) =
                hierarchy::build(&outcome.recommendations, criteria.enhancement_level)
            {
                return (
                    typography,
                    SelectionMethod::RuleBased,
                    considered,
                    SnapshotSource::Builtin,
                );
            }
        }

        warn!(request_id = %request_id, "Serving hardwired default typography");
        (
            default_typography(criteria),
            SelectionMethod::Fallback,
            considered,
            SnapshotSource::Builtin,
        )
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

/// Terminal guard: a hierarchy built from the first builtin font with a
/// fixed confidence. Reached only if matching against the builtin catalog
/// itself failed, which requires no code path today, but the orchestrator's
/// contract is unconditional.
fn default_typography(criteria: &SelectionCriteria) -> TypographyHierarchy {
    let font = builtin_fonts()
        .into_iter()
        .next()
        .expect("builtin catalog is never empty");
    let recommendation = FontRecommendation {
        confidence_score: 0.5,
        rationale: format!("{} is a safe default while no catalog is available", font.family),
        use_cases: vec!["headings".to_string(), "body".to_string()],
        recommended_weights: font.variants.clone(),
        font,
    };
    hierarchy::build(&[recommendation], criteria.enhancement_level)
        .expect("one recommendation always builds a hierarchy")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::HeadingLevel;
    use crate::selection::EnhancementLevel;

    #[test]
    fn test_default_typography_is_complete_per_level() {
        let mut criteria = SelectionCriteria::from_traits(["anything"]);
        for level in [
            EnhancementLevel::Minimal,
            EnhancementLevel::Moderate,
            EnhancementLevel::Comprehensive,
        ] {
            criteria.enhancement_level = level;
            let typography = default_typography(&criteria);
            assert!(typography.heading_styles.contains_key(&HeadingLevel::H1));
            assert!(!typography.primary_font.font.family.is_empty());
        }
    }
}
