//! Optional LLM refinement of the rule-based ranking.
//!
//! A refiner sees the head of the deterministic ranking and may reorder it,
//! adjust confidences or rewrite rationales. It is advisory only: callers
//! treat every refiner error as "keep the rule-based result".

mod llm;

pub use llm::LlmRefiner;

use crate::matcher::FontRecommendation;
use crate::selection::SelectionCriteria;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// One entry of a refiner's answer. Families must come from the candidate
/// set; anything else is discarded by the matcher.
#[derive(Debug, Clone, Deserialize)]
pub struct RefinedCandidate {
    pub family: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub rationale: Option<String>,
}

#[derive(Debug, Error)]
pub enum RefineError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Refiner API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Refiner request timed out")]
    Timeout,

    #[error("Invalid refiner response: {0}")]
    InvalidResponse(String),

    #[error("Refiner rate limited")]
    RateLimited,
}

#[async_trait]
pub trait Refiner: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Re-rank the given candidates for the criteria. The returned list is
    /// best-first and may be shorter than the input.
    async fn refine(
        &self,
        candidates: &[FontRecommendation],
        criteria: &SelectionCriteria,
    ) -> Result<Vec<RefinedCandidate>, RefineError>;
}

#[cfg(feature = "mock")]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub Refiner {}

        #[async_trait]
        impl Refiner for Refiner {
            fn name(&self) -> &str;
            async fn refine(
                &self,
                candidates: &[FontRecommendation],
                criteria: &SelectionCriteria,
            ) -> Result<Vec<RefinedCandidate>, RefineError>;
        }
    }
}
