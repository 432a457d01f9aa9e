//! Integrity checks applied to catalog data before it is served or persisted.

use super::Font;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Ways a catalog payload can be unusable.
#[derive(Debug)]
pub enum CatalogIssue {
    Empty,
    TooFew { count: usize, minimum: usize },
    BlankFamily { index: usize },
    NoVariants { family: String },
    DuplicateFamily { family: String },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::Empty => write!(f, "Catalog contains no fonts"),
            CatalogIssue::TooFew { count, minimum } => {
                write!(f, "Catalog has {} fonts, expected at least {}", count, minimum)
            }
            CatalogIssue::BlankFamily { index } => {
                write!(f, "Font at index {} has a blank family name", index)
            }
            CatalogIssue::NoVariants { family } => {
                write!(f, "Font '{}' lists no variants", family)
            }
            CatalogIssue::DuplicateFamily { family } => {
                write!(f, "Font family '{}' appears more than once", family)
            }
        }
    }
}

impl std::error::Error for CatalogIssue {}

/// Validate a font list against the structural invariants the matcher and
/// hierarchy builder rely on. Family names are the catalog's identity, so a
/// repeated family (compared case-insensitively) fails the check.
pub fn validate_fonts(fonts: &[Font], minimum: usize) -> Result<(), CatalogIssue> {
    if fonts.is_empty() {
        return Err(CatalogIssue::Empty);
    }
    if fonts.len() < minimum {
        return Err(CatalogIssue::TooFew {
            count: fonts.len(),
            minimum,
        });
    }
    let mut seen = HashSet::with_capacity(fonts.len());
    for (index, font) in fonts.iter().enumerate() {
        if font.family.trim().is_empty() {
            return Err(CatalogIssue::BlankFamily { index });
        }
        if font.variants.is_empty() {
            return Err(CatalogIssue::NoVariants {
                family: font.family.clone(),
            });
        }
        if !seen.insert(font.family.to_ascii_lowercase()) {
            return Err(CatalogIssue::DuplicateFamily {
                family: font.family.clone(),
            });
        }
    }
    Ok(())
}

/// Drop repeated families, keeping the first occurrence so the remote's
/// popularity order decides which entry survives.
pub fn dedupe_families(fonts: Vec<Font>) -> Vec<Font> {
    let total = fonts.len();
    let mut seen = HashSet::with_capacity(total);
    let deduped: Vec<Font> = fonts
        .into_iter()
        .filter(|font| seen.insert(font.family.to_ascii_lowercase()))
        .collect();
    if deduped.len() < total {
        debug!(
            dropped = total - deduped.len(),
            "Dropped duplicate catalog families"
        );
    }
    deduped
}
