//! Font catalog domain model.
//!
//! A catalog is an ordered list of font families as served by the remote
//! webfonts API. Consumers always see it through a [`CatalogSnapshot`], which
//! records where the data came from so downstream metadata can report
//! degradation honestly.

mod builtin;
mod validation;

pub use builtin::{builtin_fonts, builtin_snapshot};
pub use validation::{dedupe_families, validate_fonts, CatalogIssue};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The five design categories the remote catalog classifies families into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontCategory {
    Serif,
    SansSerif,
    Display,
    Monospace,
    Handwriting,
}

impl FontCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontCategory::Serif => "serif",
            FontCategory::SansSerif => "sans-serif",
            FontCategory::Display => "display",
            FontCategory::Monospace => "monospace",
            FontCategory::Handwriting => "handwriting",
        }
    }
}

impl fmt::Display for FontCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One font family from the catalog.
///
/// `variants` holds the weight/style tokens the remote API reports
/// ("regular", "700", "italic", ...) and is never empty for a valid font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub category: FontCategory,
    pub variants: Vec<String>,
    pub subsets: Vec<String>,
}

/// Where a served snapshot came from, in decreasing order of quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotSource {
    /// Fetched from the remote API during this call.
    Live,
    /// Served from a cache entry within its TTL.
    Cached,
    /// Served from a cache entry past its TTL because the fetch failed.
    CachedStale,
    /// The compiled-in emergency catalog.
    Builtin,
}

impl SnapshotSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotSource::Live => "live",
            SnapshotSource::Cached => "cached",
            SnapshotSource::CachedStale => "cached-stale",
            SnapshotSource::Builtin => "builtin",
        }
    }
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable view of the catalog handed to matching and ranking.
///
/// The font list is shared behind an `Arc` so concurrent selections serve the
/// same data without copying it.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub fonts: Arc<Vec<Font>>,
    pub fetched_at: DateTime<Utc>,
    pub source: SnapshotSource,
}

impl CatalogSnapshot {
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Case-insensitive lookup by family name.
    pub fn find_family(&self, family: &str) -> Option<&Font> {
        self.fonts
            .iter()
            .find(|f| f.family.eq_ignore_ascii_case(family))
    }
}
