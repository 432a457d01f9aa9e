//! Wire types for the webfonts API.

use crate::catalog::{Font, FontCategory};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct WebfontList {
    #[serde(default)]
    pub items: Vec<WebfontItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WebfontItem {
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub subsets: Vec<String>,
}

impl WebfontItem {
    /// Convert to a domain font, dropping entries the matcher cannot use:
    /// blank families, unknown categories and fonts without variants.
    pub(crate) fn into_font(self) -> Option<Font> {
        if self.family.trim().is_empty() || self.variants.is_empty() {
            return None;
        }
        let category = parse_category(&self.category)?;
        Some(Font {
            family: self.family,
            category,
            variants: self.variants,
            subsets: self.subsets,
        })
    }
}

fn parse_category(raw: &str) -> Option<FontCategory> {
    match raw.trim().to_lowercase().as_str() {
        "serif" => Some(FontCategory::Serif),
        "sans-serif" => Some(FontCategory::SansSerif),
        "display" => Some(FontCategory::Display),
        "monospace" => Some(FontCategory::Monospace),
        "handwriting" => Some(FontCategory::Handwriting),
        _ => None,
    }
}
