//! Selection input and its validation.

use crate::matcher::NEUTRAL_TRAIT;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Hard limits on caller input, checked before any work starts.
pub const MAX_TRAITS: usize = 64;
pub const MAX_TRAIT_LEN: usize = 120;

/// How much of the typography system to populate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementLevel {
    /// Primary font, h1 and body only. Skips refinement.
    Minimal,
    /// Adds a secondary font and h1 through h3.
    #[default]
    Moderate,
    /// Full system: h1 through h6 plus caption and emphasis styles.
    Comprehensive,
}

impl EnhancementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnhancementLevel::Minimal => "minimal",
            EnhancementLevel::Moderate => "moderate",
            EnhancementLevel::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for EnhancementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only error a selection call can surface to its caller.
#[derive(Debug, Error)]
pub enum CriteriaError {
    #[error("Too many personality traits: {count} (limit {limit})")]
    TooManyTraits { count: usize, limit: usize },

    #[error("Personality trait exceeds {limit} characters: {trait_text:?}")]
    TraitTooLong { trait_text: String, limit: usize },
}

/// What the caller wants the typography to express.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionCriteria {
    pub personality_traits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    /// Reserved for palette-aware pairing; currently carried through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub existing_colors: Vec<String>,
    #[serde(default)]
    pub enhancement_level: EnhancementLevel,
}

impl SelectionCriteria {
    pub fn from_traits<I, S>(traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            personality_traits: traits.into_iter().map(Into::into).collect(),
            target_audience: None,
            existing_colors: vec![],
            enhancement_level: EnhancementLevel::default(),
        }
    }

    /// Reject oversized input before any matching work happens.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        if self.personality_traits.len() > MAX_TRAITS {
            return Err(CriteriaError::TooManyTraits {
                count: self.personality_traits.len(),
                limit: MAX_TRAITS,
            });
        }
        for raw in &self.personality_traits {
            if raw.chars().count() > MAX_TRAIT_LEN {
                return Err(CriteriaError::TraitTooLong {
                    trait_text: raw.clone(),
                    limit: MAX_TRAIT_LEN,
                });
            }
        }
        Ok(())
    }

    /// Canonical traits: lowercased, punctuation and spaces collapsed to a
    /// single '-', empties dropped, duplicates removed keeping first
    /// occurrence. An input with no usable traits yields the neutral trait.
    pub fn normalized_traits(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.personality_traits.len());
        for raw in &self.personality_traits {
            let lowered = raw.to_lowercase();
            let collapsed = trait_splitter().replace_all(&lowered, "-");
            let canonical = collapsed.trim_matches('-').to_string();
            if !canonical.is_empty() && !out.contains(&canonical) {
                out.push(canonical);
            }
        }
        if out.is_empty() {
            out.push(NEUTRAL_TRAIT.to_string());
        }
        out
    }
}

fn trait_splitter() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static trait pattern"))
}
