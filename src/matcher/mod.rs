//! Personality-driven font matching.
//!
//! The core ranking is a pure function of the criteria and the snapshot:
//! trait keywords vote for a category through [`rules::TRAIT_RULES`], the
//! winning category's fonts become the candidate set, and candidates are
//! scored from fixed constants. Identical inputs always produce identical
//! output. An optional LLM refinement pass may reorder the head of the
//! ranking afterwards, but its failure never surfaces to the caller.

mod models;
mod rules;

pub use models::{FontRecommendation, MatchOutcome};
pub use rules::{
    category_for_trait, is_established, CATEGORY_PRIORITY, ESTABLISHED_FAMILIES, NEUTRAL_TRAIT,
    TRAIT_RULES,
};

use crate::catalog::{CatalogSnapshot, Font, FontCategory, SnapshotSource};
use crate::refine::{RefinedCandidate, Refiner};
use crate::selection::{EnhancementLevel, SelectionCriteria};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Scoring constants. Grouped in one place so tests can pin them down and
/// the defaults read as a single policy.
#[derive(Debug, Clone)]
pub struct MatcherTuning {
    /// Base confidence when at least one trait rule matched.
    pub rule_base: f64,
    /// Added per matched trait on top of `rule_base`.
    pub per_trait_step: f64,
    /// Upper bound for the rule-derived base, before the allow-list bonus.
    pub rule_base_cap: f64,
    /// Base confidence when no rule matched and the neutral fallback ran.
    pub neutral_base: f64,
    /// Bonus for families on the established allow-list.
    pub established_bonus: f64,
    /// Minimum confidence of the top recommendation after a rule match
    /// against a real (non-builtin) catalog.
    pub confidence_floor: f64,
    /// How many head candidates are offered to the refiner.
    pub refine_top_k: usize,
}

impl Default for MatcherTuning {
    fn default() -> Self {
        Self {
            rule_base: 0.55,
            per_trait_step: 0.08,
            rule_base_cap: 0.85,
            neutral_base: 0.4,
            established_bonus: 0.1,
            confidence_floor: 0.7,
            refine_top_k: 5,
        }
    }
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Cannot match against an empty catalog snapshot")]
    EmptySnapshot,
}

pub struct PersonalityMatcher {
    tuning: MatcherTuning,
    refiner: Option<Arc<dyn Refiner>>,
}

impl PersonalityMatcher {
    pub fn new(refiner: Option<Arc<dyn Refiner>>) -> Self {
        Self {
            tuning: MatcherTuning::default(),
            refiner,
        }
    }

    pub fn with_tuning(tuning: MatcherTuning, refiner: Option<Arc<dyn Refiner>>) -> Self {
        Self { tuning, refiner }
    }

    /// Deterministic ranking pass. Pure: no network, no clock, no randomness.
    pub fn rank(
        &self,
        criteria: &SelectionCriteria,
        snapshot: &CatalogSnapshot,
    ) -> Result<MatchOutcome, MatchError> {
        if snapshot.is_empty() {
            return Err(MatchError::EmptySnapshot);
        }

        let traits = criteria.normalized_traits();
        let mut hits: HashMap<FontCategory, Vec<String>> = HashMap::new();
        for canonical in &traits {
            if let Some(category) = category_for_trait(canonical) {
                hits.entry(category).or_default().push(canonical.clone());
            }
        }

        // Categories ordered by hit count, ties broken by the fixed priority
        // list. Vec::sort_by_key is stable, so equal counts keep that order.
        let mut ordered: Vec<FontCategory> = CATEGORY_PRIORITY.to_vec();
        ordered.sort_by_key(|c| Reverse(hits.get(c).map(|t| t.len()).unwrap_or(0)));

        // First category the snapshot can actually serve. The five categories
        // cover every font, so a non-empty snapshot always yields one.
        let chosen = ordered
            .into_iter()
            .find(|&category| snapshot.fonts.iter().any(|f| f.category == category))
            .expect("non-empty snapshot has at least one populated category");

        let matched_traits = hits.get(&chosen).cloned().unwrap_or_default();
        let rule_matched = !matched_traits.is_empty();

        debug!(
            category = %chosen,
            matched_traits = matched_traits.len(),
            total_traits = traits.len(),
            "Resolved personality traits to font category"
        );

        let base = if rule_matched {
            (self.tuning.rule_base + self.tuning.per_trait_step * matched_traits.len() as f64)
                .min(self.tuning.rule_base_cap)
        } else {
            self.tuning.neutral_base
        };

        // Candidates keep catalog order here; the stable sort below then
        // preserves it between equal scores.
        let mut recommendations: Vec<FontRecommendation> = snapshot
            .fonts
            .iter()
            .filter(|font| font.category == chosen)
            .map(|font| {
                let mut score = base;
                if is_established(&font.family) {
                    score += self.tuning.established_bonus;
                }
                FontRecommendation {
                    confidence_score: score.clamp(0.0, 1.0),
                    rationale: build_rationale(font, &matched_traits),
                    use_cases: use_cases_for(font.category),
                    recommended_weights: recommended_weights(&font.variants),
                    font: font.clone(),
                }
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.confidence_score
                .partial_cmp(&a.confidence_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        self.apply_floor(&mut recommendations, rule_matched, snapshot.source);

        Ok(MatchOutcome {
            recommendations,
            rule_matched,
            refined: false,
        })
    }

    /// Full matching pass: deterministic ranking, then optional refinement.
    ///
    /// Refinement is skipped at the minimal enhancement level and whenever no
    /// refiner is configured. A refiner failure, or an answer that names no
    /// catalog family, is logged and the rule-based ranking stands; the
    /// outcome counts as refined only when the answer changed it.
    pub async fn recommend(
        &self,
        criteria: &SelectionCriteria,
        snapshot: &CatalogSnapshot,
    ) -> Result<MatchOutcome, MatchError> {
        let mut outcome = self.rank(criteria, snapshot)?;

        if criteria.enhancement_level == EnhancementLevel::Minimal {
            return Ok(outcome);
        }
        let refiner = match &self.refiner {
            Some(refiner) => refiner,
            None => return Ok(outcome),
        };

        let k = self.tuning.refine_top_k.min(outcome.recommendations.len());
        match refiner.refine(&outcome.recommendations[..k], criteria).await {
            Ok(refined) => {
                let tail = outcome.recommendations.split_off(k);
                let head = std::mem::take(&mut outcome.recommendations);
                let (mut merged, consumed) = apply_refinement(head, refined);
                merged.extend(tail);
                if consumed == 0 {
                    warn!(refiner = refiner.name(), "Refiner answer named no catalog family; keeping rule-based ranking");
                    outcome.recommendations = merged;
                } else {
                    enforce_monotonic(&mut merged);
                    outcome.recommendations = merged;
                    outcome.refined = true;
                    self.apply_floor(
                        &mut outcome.recommendations,
                        outcome.rule_matched,
                        snapshot.source,
                    );
                }
            }
            Err(e) => {
                warn!(refiner = refiner.name(), error = %e, "Refinement failed; keeping rule-based ranking");
            }
        }

        Ok(outcome)
    }

    fn apply_floor(
        &self,
        recommendations: &mut [FontRecommendation],
        rule_matched: bool,
        source: SnapshotSource,
    ) {
        if !rule_matched || source == SnapshotSource::Builtin {
            return;
        }
        if let Some(top) = recommendations.first_mut() {
            if top.confidence_score < self.tuning.confidence_floor {
                top.confidence_score = self.tuning.confidence_floor;
            }
        }
    }
}

/// Overlay the refiner's answer on the head of the ranking. The refiner's
/// order wins; families it does not mention keep their original relative
/// order behind the ones it does. Unknown or duplicated families are dropped.
/// Also returns how many refined entries named a known family.
fn apply_refinement(
    head: Vec<FontRecommendation>,
    refined: Vec<RefinedCandidate>,
) -> (Vec<FontRecommendation>, usize) {
    let mut remaining: Vec<Option<FontRecommendation>> = head.into_iter().map(Some).collect();
    let mut merged = Vec::with_capacity(remaining.len());

    for candidate in refined {
        let slot = remaining.iter().position(|r| {
            r.as_ref()
                .map_or(false, |rec| rec.font.family.eq_ignore_ascii_case(&candidate.family))
        });
        let mut rec = match slot.and_then(|i| remaining[i].take()) {
            Some(rec) => rec,
            None => {
                warn!(family = %candidate.family, "Refiner returned an unknown or duplicate family; ignoring");
                continue;
            }
        };
        if let Some(confidence) = candidate.confidence {
            if confidence.is_finite() {
                rec.confidence_score = confidence.clamp(0.0, 1.0);
            }
        }
        if let Some(rationale) = candidate.rationale {
            let trimmed = rationale.trim();
            if !trimmed.is_empty() {
                rec.rationale = trimmed.to_string();
            }
        }
        merged.push(rec);
    }

    let consumed = merged.len();
    merged.extend(remaining.into_iter().flatten());
    (merged, consumed)
}

/// Clamp scores so the list stays non-increasing without reordering it.
fn enforce_monotonic(recommendations: &mut [FontRecommendation]) {
    let mut ceiling = f64::INFINITY;
    for rec in recommendations.iter_mut() {
        if rec.confidence_score > ceiling {
            rec.confidence_score = ceiling;
        }
        ceiling = rec.confidence_score;
    }
}

fn build_rationale(font: &Font, matched_traits: &[String]) -> String {
    if matched_traits.is_empty() {
        format!(
            "{} is a versatile {} family that reads well in most settings",
            font.family, font.category
        )
    } else if is_established(&font.family) {
        format!(
            "{} is a widely deployed {} family fitting the {} brief",
            font.family,
            font.category,
            matched_traits.join(", ")
        )
    } else {
        format!(
            "{} carries the {} voice suggested by {}",
            font.family,
            font.category,
            matched_traits.join(", ")
        )
    }
}

fn use_cases_for(category: FontCategory) -> Vec<String> {
    let cases: &[&str] = match category {
        FontCategory::SansSerif => &["headings", "body", "interface"],
        FontCategory::Serif => &["headings", "editorial", "long-form body"],
        FontCategory::Display => &["headings", "hero sections", "brand marks"],
        FontCategory::Monospace => &["code", "data", "captions"],
        FontCategory::Handwriting => &["accents", "signatures", "callouts"],
    };
    cases.iter().map(|c| c.to_string()).collect()
}

/// Pick the variants worth loading, keeping the order they appear in the
/// catalog entry. Falls back to the first variant for single-cut fonts.
fn recommended_weights(variants: &[String]) -> Vec<String> {
    let picks: Vec<String> = variants
        .iter()
        .filter(|v| {
            matches!(
                v.as_str(),
                "300" | "400" | "regular" | "500" | "600" | "700"
            )
        })
        .take(4)
        .cloned()
        .collect();
    if picks.is_empty() {
        variants.first().cloned().into_iter().collect()
    } else {
        picks
    }
}
