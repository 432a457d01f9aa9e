//! Typography hierarchy types.

use crate::matcher::FontRecommendation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Heading slots, largest first. `Ord` follows declaration order so a
/// `BTreeMap` keyed by level iterates h1 to h6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 6] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
    ];
}

/// Non-heading text slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    Body,
    Caption,
    Emphasis,
}

/// Weight, size and leading for one text slot. Sizes are in rem relative to
/// a 1.0 rem body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub weight: String,
    pub size_rem: f64,
    pub line_height: f64,
}

/// A complete typography system: which fonts to use and how to set them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographyHierarchy {
    pub primary_font: FontRecommendation,
    /// A pairing for body text. Absent at the minimal enhancement level or
    /// when the catalog offers no distinct second family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_font: Option<FontRecommendation>,
    pub heading_styles: BTreeMap<HeadingLevel, TextStyle>,
    pub text_styles: BTreeMap<TextRole, TextStyle>,
}
