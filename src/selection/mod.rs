//! Selection orchestration: criteria in, typography plus metadata out.

mod criteria;
mod engine;
mod models;

pub use criteria::{
    CriteriaError, EnhancementLevel, SelectionCriteria, MAX_TRAITS, MAX_TRAIT_LEN,
};
pub use engine::SelectionEngine;
pub use models::{SelectionMetadata, SelectionMethod, SelectionResponse};
