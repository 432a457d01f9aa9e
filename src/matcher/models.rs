//! Matcher output types.

use crate::catalog::Font;
use serde::{Deserialize, Serialize};

/// One ranked font with the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRecommendation {
    pub font: Font,
    /// Always within [0.0, 1.0].
    pub confidence_score: f64,
    /// Human-readable justification for this pick.
    pub rationale: String,
    /// Situations the font suits ("headings", "body", ...).
    pub use_cases: Vec<String>,
    /// Subset of `font.variants` worth actually loading, in preference order.
    pub recommended_weights: Vec<String>,
}

/// The full result of a matching pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Sorted by confidence, highest first, never empty.
    pub recommendations: Vec<FontRecommendation>,
    /// Whether the winning category came from a trait rule rather than the
    /// neutral fallback.
    pub rule_matched: bool,
    /// Whether an LLM refinement pass was applied on top of the rule ranking.
    pub refined: bool,
}
