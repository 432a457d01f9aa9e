//! Compiled-in emergency catalog.
//!
//! A small set of widely deployed families covering every category, used when
//! neither the network nor the persisted cache can produce a catalog. Kept
//! deliberately boring: everything here is a safe default.

use super::{CatalogSnapshot, Font, FontCategory, SnapshotSource};
use chrono::Utc;
use std::sync::Arc;

fn font(family: &str, category: FontCategory, variants: &[&str], subsets: &[&str]) -> Font {
    Font {
        family: family.to_string(),
        category,
        variants: variants.iter().map(|v| v.to_string()).collect(),
        subsets: subsets.iter().map(|s| s.to_string()).collect(),
    }
}

/// The emergency font list. Order matters: families earlier in the list win
/// ties during ranking, so the most broadly useful ones come first.
pub fn builtin_fonts() -> Vec<Font> {
    use FontCategory::*;
    let latin = &["latin", "latin-ext"];
    vec![
        font("Inter", SansSerif, &["regular", "500", "600", "700"], latin),
        font("Roboto", SansSerif, &["300", "regular", "500", "700"], latin),
        font("Open Sans", SansSerif, &["300", "regular", "600", "700"], latin),
        font("Lato", SansSerif, &["300", "regular", "700"], latin),
        font("Merriweather", Serif, &["300", "regular", "700"], latin),
        font("Playfair Display", Serif, &["regular", "500", "600", "700"], latin),
        font("Lora", Serif, &["regular", "500", "600", "700"], latin),
        font("Bebas Neue", Display, &["regular"], latin),
        font("Abril Fatface", Display, &["regular"], latin),
        font("Roboto Mono", Monospace, &["300", "regular", "500", "700"], latin),
        font("JetBrains Mono", Monospace, &["regular", "500", "700"], latin),
        font("Caveat", Handwriting, &["regular", "500", "600", "700"], latin),
        font("Pacifico", Handwriting, &["regular"], latin),
    ]
}

/// A ready-to-serve snapshot of the emergency catalog.
pub fn builtin_snapshot() -> CatalogSnapshot {
    CatalogSnapshot {
        fonts: Arc::new(builtin_fonts()),
        fetched_at: Utc::now(),
        source: SnapshotSource::Builtin,
    }
}
