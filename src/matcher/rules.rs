//! The personality-to-category rule table.
//!
//! Matching must be reproducible, so everything here is a compile-time
//! constant: trait keywords map to exactly one category, categories break
//! ties in a fixed priority order, and the allow-list of established
//! families is a plain sorted-by-hand list.

use crate::catalog::FontCategory;
use crate::catalog::FontCategory::{Display, Handwriting, Monospace, SansSerif, Serif};

/// Tie-break order when several categories collect the same number of trait
/// hits, most broadly useful first.
pub const CATEGORY_PRIORITY: [FontCategory; 5] =
    [SansSerif, Serif, Display, Monospace, Handwriting];

/// Trait keyword to category. Keywords are canonical form: lowercase, inner
/// punctuation collapsed to '-'.
pub const TRAIT_RULES: &[(&str, FontCategory)] = &[
    // sans-serif: contemporary, trustworthy, product-ish voices
    ("professional", SansSerif),
    ("corporate", SansSerif),
    ("modern", SansSerif),
    ("minimal", SansSerif),
    ("minimalist", SansSerif),
    ("clean", SansSerif),
    ("trustworthy", SansSerif),
    ("reliable", SansSerif),
    ("innovative", SansSerif),
    ("friendly", SansSerif),
    ("approachable", SansSerif),
    ("welcoming", SansSerif),
    ("efficient", SansSerif),
    // serif: heritage, editorial, upmarket voices
    ("elegant", Serif),
    ("sophisticated", Serif),
    ("luxurious", Serif),
    ("luxury", Serif),
    ("classic", Serif),
    ("traditional", Serif),
    ("refined", Serif),
    ("editorial", Serif),
    ("literary", Serif),
    ("timeless", Serif),
    ("premium", Serif),
    ("high-end", Serif),
    // display: loud, characterful voices
    ("creative", Display),
    ("artistic", Display),
    ("bold", Display),
    ("expressive", Display),
    ("playful", Display),
    ("energetic", Display),
    ("dramatic", Display),
    ("quirky", Display),
    ("striking", Display),
    // monospace: precision and engineering voices
    ("technical", Monospace),
    ("precise", Monospace),
    ("analytical", Monospace),
    ("engineering", Monospace),
    ("scientific", Monospace),
    ("data-driven", Monospace),
    // handwriting: personal, informal voices
    ("casual", Handwriting),
    ("personal", Handwriting),
    ("handcrafted", Handwriting),
    ("whimsical", Handwriting),
    ("intimate", Handwriting),
    ("organic", Handwriting),
];

/// Canonical trait used when the caller supplies no usable traits.
pub const NEUTRAL_TRAIT: &str = "versatile";

pub fn category_for_trait(canonical: &str) -> Option<FontCategory> {
    TRAIT_RULES
        .iter()
        .find(|(keyword, _)| *keyword == canonical)
        .map(|(_, category)| *category)
}

/// Families that have proven themselves across enough real deployments to
/// deserve a confidence bonus over an otherwise equal catalog neighbour.
pub const ESTABLISHED_FAMILIES: &[&str] = &[
    "Abril Fatface",
    "Bebas Neue",
    "Caveat",
    "Crimson Text",
    "Dancing Script",
    "EB Garamond",
    "Fira Code",
    "IBM Plex Mono",
    "IBM Plex Sans",
    "Inter",
    "JetBrains Mono",
    "Lato",
    "Libre Baskerville",
    "Lora",
    "Merriweather",
    "Montserrat",
    "Nunito",
    "Open Sans",
    "Oswald",
    "PT Serif",
    "Pacifico",
    "Playfair Display",
    "Poppins",
    "Raleway",
    "Roboto",
    "Roboto Mono",
    "Source Sans 3",
    "Source Sans Pro",
    "Space Grotesk",
    "Work Sans",
];

pub fn is_established(family: &str) -> bool {
    ESTABLISHED_FAMILIES
        .iter()
        .any(|f| f.eq_ignore_ascii_case(family))
}
