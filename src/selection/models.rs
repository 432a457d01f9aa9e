//! Selection response types.

use crate::catalog::SnapshotSource;
use crate::hierarchy::TypographyHierarchy;
use serde::{Deserialize, Serialize};

/// How the served typography was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    /// Deterministic rule-table ranking.
    RuleBased,
    /// Rule ranking with an LLM refinement pass applied.
    Refined,
    /// Caller-supplied typography echoed back untouched.
    Preserved,
    /// Terminal defaults after every matching path failed.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionMetadata {
    pub selection_method: SelectionMethod,
    pub processing_time_ms: u64,
    /// Size of the snapshot the ranking ran against. Zero for preserved
    /// typography, which never consults a catalog.
    pub total_fonts_considered: usize,
    /// Which tier served the catalog. Absent for preserved typography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SnapshotSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub typography: TypographyHierarchy,
    pub selection_metadata: SelectionMetadata,
}
