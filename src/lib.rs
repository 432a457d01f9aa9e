//! Fontmatch: brand-personality-driven font selection.
//!
//! Keeps a locally cached mirror of a remote font catalog, matches brand
//! personality traits to font families through a deterministic rule table
//! (optionally refined by an LLM), and expands the winning fonts into a
//! complete typography hierarchy. Selection never fails its caller: when the
//! catalog is slow, stale or unreachable it degrades through explicit
//! fallback tiers and says so in the response metadata.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod hierarchy;
pub mod matcher;
pub mod refine;
pub mod remote;
pub mod selection;

// Re-export commonly used types for convenience
pub use cache::{CacheCoordinator, CacheStatus, SnapshotStore, Tier};
pub use catalog::{CatalogSnapshot, Font, FontCategory, SnapshotSource};
pub use config::{CliConfig, EngineConfig, FileConfig, RefinerSettings};
pub use hierarchy::{HeadingLevel, TextRole, TextStyle, TypographyHierarchy};
pub use matcher::{FontRecommendation, MatcherTuning, PersonalityMatcher};
pub use refine::{LlmRefiner, RefineError, RefinedCandidate, Refiner};
pub use remote::{FetchError, RemoteCatalog, WebfontsClient};
pub use selection::{
    CriteriaError, EnhancementLevel, SelectionCriteria, SelectionEngine, SelectionMetadata,
    SelectionMethod, SelectionResponse,
};
