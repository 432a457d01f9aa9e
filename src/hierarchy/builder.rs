//! Derives a typography hierarchy from ranked recommendations.
//!
//! Sizes follow a modular scale anchored at a 1.0 rem body with ratio 1.25,
//! values rounded to three decimals. Line height eases down as size grows and
//! always stays within [`LINE_HEIGHT_MIN`, `LINE_HEIGHT_MAX`].

use super::models::{HeadingLevel, TextRole, TextStyle, TypographyHierarchy};
use crate::matcher::FontRecommendation;
use crate::selection::EnhancementLevel;
use std::collections::BTreeMap;
use thiserror::Error;

pub const LINE_HEIGHT_MIN: f64 = 1.1;
pub const LINE_HEIGHT_MAX: f64 = 1.7;

/// (level, size in rem, line height), largest first.
const HEADING_SCALE: [(HeadingLevel, f64, f64); 6] = [
    (HeadingLevel::H1, 3.052, 1.15),
    (HeadingLevel::H2, 2.441, 1.2),
    (HeadingLevel::H3, 1.953, 1.25),
    (HeadingLevel::H4, 1.563, 1.3),
    (HeadingLevel::H5, 1.25, 1.4),
    (HeadingLevel::H6, 1.0, 1.5),
];

const BODY_SIZE: (f64, f64) = (1.0, 1.6);
const CAPTION_SIZE: (f64, f64) = (0.8, 1.5);
const EMPHASIS_SIZE: (f64, f64) = (1.0, 1.6);

#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("Cannot build a typography hierarchy without recommendations")]
    NoRecommendations,
}

/// Build a hierarchy from a non-empty ranking.
///
/// The top recommendation becomes the primary font. Above the minimal level,
/// the next distinct family (if any) becomes the secondary font for body
/// text. How many slots get populated depends on the enhancement level.
pub fn build(
    recommendations: &[FontRecommendation],
    level: EnhancementLevel,
) -> Result<TypographyHierarchy, HierarchyError> {
    let primary = recommendations
        .first()
        .cloned()
        .ok_or(HierarchyError::NoRecommendations)?;

    let secondary = match level {
        EnhancementLevel::Minimal => None,
        _ => recommendations
            .iter()
            .skip(1)
            .find(|r| !r.font.family.eq_ignore_ascii_case(&primary.font.family))
            .cloned(),
    };

    let heading_count = match level {
        EnhancementLevel::Minimal => 1,
        EnhancementLevel::Moderate => 3,
        EnhancementLevel::Comprehensive => 6,
    };

    let heading_weight = pick_weight(&primary, &["700", "600", "500", "regular", "400"]);
    let body_source = secondary.as_ref().unwrap_or(&primary);
    let body_weight = pick_weight(body_source, &["regular", "400", "300", "500"]);
    let emphasis_weight = pick_weight(body_source, &["600", "500", "700", "regular"]);

    let mut heading_styles = BTreeMap::new();
    for (level, size_rem, line_height) in HEADING_SCALE.iter().take(heading_count) {
        heading_styles.insert(
            *level,
            TextStyle {
                weight: heading_weight.clone(),
                size_rem: *size_rem,
                line_height: line_height.clamp(LINE_HEIGHT_MIN, LINE_HEIGHT_MAX),
            },
        );
    }

    let mut text_styles = BTreeMap::new();
    text_styles.insert(TextRole::Body, text_style(&body_weight, BODY_SIZE));
    if level == EnhancementLevel::Comprehensive {
        text_styles.insert(TextRole::Caption, text_style(&body_weight, CAPTION_SIZE));
        text_styles.insert(TextRole::Emphasis, text_style(&emphasis_weight, EMPHASIS_SIZE));
    }

    Ok(TypographyHierarchy {
        primary_font: primary,
        secondary_font: secondary,
        heading_styles,
        text_styles,
    })
}

fn text_style(weight: &str, (size_rem, line_height): (f64, f64)) -> TextStyle {
    TextStyle {
        weight: weight.to_string(),
        size_rem,
        line_height: line_height.clamp(LINE_HEIGHT_MIN, LINE_HEIGHT_MAX),
    }
}

/// First preferred weight the recommendation actually offers, falling back
/// to whatever it lists first.
fn pick_weight(rec: &FontRecommendation, preferred: &[&str]) -> String {
    for want in preferred {
        if rec.recommended_weights.iter().any(|w| w == want) {
            return want.to_string();
        }
    }
    rec.recommended_weights
        .first()
        .or_else(|| rec.font.variants.first())
        .cloned()
        .unwrap_or_else(|| "regular".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Font, FontCategory};

    fn make_recommendation(family: &str, variants: &[&str]) -> FontRecommendation {
        FontRecommendation {
            font: Font {
                family: family.to_string(),
                category: FontCategory::SansSerif,
                variants: variants.iter().map(|v| v.to_string()).collect(),
                subsets: vec!["latin".to_string()],
            },
            confidence_score: 0.8,
            rationale: "test".to_string(),
            use_cases: vec!["headings".to_string()],
            recommended_weights: variants.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn standard_recs() -> Vec<FontRecommendation> {
        vec![
            make_recommendation("Inter", &["regular", "500", "700"]),
            make_recommendation("Lora", &["regular", "600"]),
        ]
    }

    #[test]
    fn test_no_recommendations_is_an_error() {
        assert!(matches!(
            build(&[], EnhancementLevel::Moderate),
            Err(HierarchyError::NoRecommendations)
        ));
    }

    #[test]
    fn test_minimal_level_populates_h1_and_body_only() {
        let hierarchy = build(&standard_recs(), EnhancementLevel::Minimal).unwrap();
        assert_eq!(hierarchy.primary_font.font.family, "Inter");
        assert!(hierarchy.secondary_font.is_none());
        assert_eq!(hierarchy.heading_styles.len(), 1);
        assert!(hierarchy.heading_styles.contains_key(&HeadingLevel::H1));
        assert_eq!(hierarchy.text_styles.len(), 1);
        assert!(hierarchy.text_styles.contains_key(&TextRole::Body));
    }

    #[test]
    fn test_moderate_level_adds_secondary_and_h1_to_h3() {
        let hierarchy = build(&standard_recs(), EnhancementLevel::Moderate).unwrap();
        assert_eq!(
            hierarchy.secondary_font.as_ref().map(|r| r.font.family.as_str()),
            Some("Lora")
        );
        let levels: Vec<HeadingLevel> = hierarchy.heading_styles.keys().copied().collect();
        assert_eq!(levels, vec![HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3]);
        assert!(!hierarchy.text_styles.contains_key(&TextRole::Caption));
    }

    #[test]
    fn test_comprehensive_level_populates_everything() {
        let hierarchy = build(&standard_recs(), EnhancementLevel::Comprehensive).unwrap();
        let levels: Vec<HeadingLevel> = hierarchy.heading_styles.keys().copied().collect();
        assert_eq!(levels, HeadingLevel::ALL.to_vec());
        assert!(hierarchy.text_styles.contains_key(&TextRole::Body));
        assert!(hierarchy.text_styles.contains_key(&TextRole::Caption));
        assert!(hierarchy.text_styles.contains_key(&TextRole::Emphasis));
    }

    #[test]
    fn test_heading_sizes_decrease_with_level() {
        let hierarchy = build(&standard_recs(), EnhancementLevel::Comprehensive).unwrap();
        let sizes: Vec<f64> = hierarchy
            .heading_styles
            .values()
            .map(|s| s.size_rem)
            .collect();
        for pair in sizes.windows(2) {
            assert!(pair[0] > pair[1], "sizes must shrink from h1 down");
        }
        assert_eq!(sizes.last().copied(), Some(1.0));
    }

    #[test]
    fn test_line_heights_grow_as_sizes_shrink_within_bounds() {
        let hierarchy = build(&standard_recs(), EnhancementLevel::Comprehensive).unwrap();
        let leadings: Vec<f64> = hierarchy
            .heading_styles
            .values()
            .map(|s| s.line_height)
            .collect();
        for pair in leadings.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        for style in hierarchy
            .heading_styles
            .values()
            .chain(hierarchy.text_styles.values())
        {
            assert!(style.line_height >= LINE_HEIGHT_MIN);
            assert!(style.line_height <= LINE_HEIGHT_MAX);
        }
    }

    #[test]
    fn test_heading_weight_prefers_bold_cuts() {
        let hierarchy = build(&standard_recs(), EnhancementLevel::Moderate).unwrap();
        let h1 = &hierarchy.heading_styles[&HeadingLevel::H1];
        assert_eq!(h1.weight, "700");
        // Body sets in the secondary font's regular cut.
        assert_eq!(hierarchy.text_styles[&TextRole::Body].weight, "regular");
    }

    #[test]
    fn test_single_cut_font_is_usable_everywhere() {
        let recs = vec![make_recommendation("Bebas Neue", &["regular"])];
        let hierarchy = build(&recs, EnhancementLevel::Comprehensive).unwrap();
        assert!(hierarchy.secondary_font.is_none());
        assert_eq!(hierarchy.heading_styles[&HeadingLevel::H1].weight, "regular");
        assert_eq!(hierarchy.text_styles[&TextRole::Body].weight, "regular");
    }

    #[test]
    fn test_duplicate_families_never_pair_with_themselves() {
        let recs = vec![
            make_recommendation("Inter", &["regular", "700"]),
            make_recommendation("inter", &["regular"]),
        ];
        let hierarchy = build(&recs, EnhancementLevel::Moderate).unwrap();
        assert!(hierarchy.secondary_font.is_none());
    }
}
