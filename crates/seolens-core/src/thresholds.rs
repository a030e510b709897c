//! Tunable thresholds for every scoring rule
//!
//! Densities are percentages, lengths are character counts. Any field may be
//! omitted from a JSON override and falls back to its default.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

pub const KEYWORD_STUFFING_DENSITY: f64 = 5.0;
pub const MINIMUM_KEYWORD_DENSITY: f64 = 0.46;
pub const MAXIMUM_KEYWORD_DENSITY: f64 = 1.1;
pub const MAXIMUM_SUB_KEYWORD_DENSITY: f64 = 0.9;
pub const MINIMUM_SUB_KEYWORD_DENSITY: f64 = 0.12;
pub const EXTREME_LOW_SUB_KEYWORD_DENSITY: f64 = 0.09;
pub const MINIMUM_TITLE_LENGTH: usize = 40;
pub const MAXIMUM_TITLE_LENGTH: usize = 70;
pub const MINIMUM_META_DESCRIPTION_LENGTH: usize = 100;
pub const MAXIMUM_META_DESCRIPTION_LENGTH: usize = 160;
pub const MINIMUM_META_DESCRIPTION_DENSITY: f64 = 2.0;
pub const MAXIMUM_META_DESCRIPTION_DENSITY: f64 = 5.0;
pub const MINIMUM_SUB_KEYWORD_IN_META_DESCRIPTION_DENSITY: f64 = 2.0;
pub const MAXIMUM_SUB_KEYWORD_IN_META_DESCRIPTION_DENSITY: f64 = 5.0;
pub const EXTREME_LOW_SUB_KEYWORD_IN_META_DESCRIPTION_DENSITY: f64 = 0.2;
pub const WORDS_PER_INTERNAL_LINK: f64 = 300.0;
pub const WORDS_PER_OUTBOUND_LINK: f64 = 400.0;
pub const MAXIMUM_DUPLICATE_LINKS: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Primary keyword density above which the text reads as stuffed
    pub keyword_stuffing_density: f64,
    pub min_keyword_density: f64,
    pub max_keyword_density: f64,

    pub max_sub_keyword_density: f64,
    pub min_sub_keyword_density: f64,
    /// Below this a low sub-keyword density is reported as extremely low
    pub extreme_low_sub_keyword_density: f64,

    pub min_title_length: usize,
    pub max_title_length: usize,

    pub min_meta_description_length: usize,
    pub max_meta_description_length: usize,
    pub min_meta_description_density: f64,
    pub max_meta_description_density: f64,
    pub min_sub_keyword_in_meta_description_density: f64,
    pub max_sub_keyword_in_meta_description_density: f64,
    pub extreme_low_sub_keyword_in_meta_description_density: f64,

    /// One internal link is expected per this many body words
    pub words_per_internal_link: f64,
    /// One outbound link is expected per this many body words
    pub words_per_outbound_link: f64,
    /// Duplicate link counts above this are reported
    pub max_duplicate_links: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            keyword_stuffing_density: KEYWORD_STUFFING_DENSITY,
            min_keyword_density: MINIMUM_KEYWORD_DENSITY,
            max_keyword_density: MAXIMUM_KEYWORD_DENSITY,
            max_sub_keyword_density: MAXIMUM_SUB_KEYWORD_DENSITY,
            min_sub_keyword_density: MINIMUM_SUB_KEYWORD_DENSITY,
            extreme_low_sub_keyword_density: EXTREME_LOW_SUB_KEYWORD_DENSITY,
            min_title_length: MINIMUM_TITLE_LENGTH,
            max_title_length: MAXIMUM_TITLE_LENGTH,
            min_meta_description_length: MINIMUM_META_DESCRIPTION_LENGTH,
            max_meta_description_length: MAXIMUM_META_DESCRIPTION_LENGTH,
            min_meta_description_density: MINIMUM_META_DESCRIPTION_DENSITY,
            max_meta_description_density: MAXIMUM_META_DESCRIPTION_DENSITY,
            min_sub_keyword_in_meta_description_density:
                MINIMUM_SUB_KEYWORD_IN_META_DESCRIPTION_DENSITY,
            max_sub_keyword_in_meta_description_density:
                MAXIMUM_SUB_KEYWORD_IN_META_DESCRIPTION_DENSITY,
            extreme_low_sub_keyword_in_meta_description_density:
                EXTREME_LOW_SUB_KEYWORD_IN_META_DESCRIPTION_DENSITY,
            words_per_internal_link: WORDS_PER_INTERNAL_LINK,
            words_per_outbound_link: WORDS_PER_OUTBOUND_LINK,
            max_duplicate_links: MAXIMUM_DUPLICATE_LINKS,
        }
    }
}

impl Thresholds {
    /// Parse (possibly partial) thresholds from JSON and validate them
    pub fn from_json_str(json: &str) -> Result<Self> {
        let thresholds: Self =
            serde_json::from_str(json).context("failed to parse scoring thresholds")?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read thresholds from {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Reject inverted ranges, misordered low-density bands and non-positive link ratios
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min_keyword_density <= self.max_keyword_density,
            "min_keyword_density ({}) exceeds max_keyword_density ({})",
            self.min_keyword_density,
            self.max_keyword_density
        );
        ensure!(
            self.min_sub_keyword_density <= self.max_sub_keyword_density,
            "min_sub_keyword_density ({}) exceeds max_sub_keyword_density ({})",
            self.min_sub_keyword_density,
            self.max_sub_keyword_density
        );
        ensure!(
            self.extreme_low_sub_keyword_density <= self.min_sub_keyword_density,
            "extreme_low_sub_keyword_density ({}) exceeds min_sub_keyword_density ({})",
            self.extreme_low_sub_keyword_density,
            self.min_sub_keyword_density
        );
        ensure!(
            self.min_title_length <= self.max_title_length,
            "min_title_length ({}) exceeds max_title_length ({})",
            self.min_title_length,
            self.max_title_length
        );
        ensure!(
            self.min_meta_description_length <= self.max_meta_description_length,
            "min_meta_description_length ({}) exceeds max_meta_description_length ({})",
            self.min_meta_description_length,
            self.max_meta_description_length
        );
        ensure!(
            self.min_meta_description_density <= self.max_meta_description_density,
            "min_meta_description_density ({}) exceeds max_meta_description_density ({})",
            self.min_meta_description_density,
            self.max_meta_description_density
        );
        ensure!(
            self.min_sub_keyword_in_meta_description_density
                <= self.max_sub_keyword_in_meta_description_density,
            "min_sub_keyword_in_meta_description_density ({}) exceeds max_sub_keyword_in_meta_description_density ({})",
            self.min_sub_keyword_in_meta_description_density,
            self.max_sub_keyword_in_meta_description_density
        );
        ensure!(
            self.extreme_low_sub_keyword_in_meta_description_density
                <= self.min_sub_keyword_in_meta_description_density,
            "extreme_low_sub_keyword_in_meta_description_density ({}) exceeds min_sub_keyword_in_meta_description_density ({})",
            self.extreme_low_sub_keyword_in_meta_description_density,
            self.min_sub_keyword_in_meta_description_density
        );
        ensure!(
            self.words_per_internal_link > 0.0 && self.words_per_outbound_link > 0.0,
            "words per link must be positive"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let thresholds = Thresholds::default();
        assert!(thresholds.validate().is_ok());
        assert_eq!(thresholds.min_meta_description_length, 100);
        assert_eq!(
            thresholds.extreme_low_sub_keyword_in_meta_description_density,
            0.2
        );
    }

    #[test]
    fn test_partial_override() {
        let thresholds =
            Thresholds::from_json_str(r#"{"min_title_length": 30, "max_keyword_density": 2.5}"#)
                .unwrap();
        assert_eq!(thresholds.min_title_length, 30);
        assert_eq!(thresholds.max_keyword_density, 2.5);
        assert_eq!(thresholds.max_title_length, MAXIMUM_TITLE_LENGTH);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = Thresholds::from_json_str(r#"{"min_title_length": 90}"#).unwrap_err();
        assert!(err.to_string().contains("min_title_length"));
    }

    #[test]
    fn test_non_positive_link_ratio_rejected() {
        assert!(Thresholds::from_json_str(r#"{"words_per_outbound_link": 0}"#).is_err());
    }

    #[test]
    fn test_extreme_low_band_above_low_band_rejected() {
        let err = Thresholds::from_json_str(r#"{"extreme_low_sub_keyword_density": 0.5}"#)
            .unwrap_err();
        assert!(err.to_string().contains("extreme_low_sub_keyword_density"));

        let err = Thresholds::from_json_str(
            r#"{"extreme_low_sub_keyword_in_meta_description_density": 3.0}"#,
        )
        .unwrap_err();
        assert!(
            err.to_string()
                .contains("extreme_low_sub_keyword_in_meta_description_density")
        );
    }

    #[test]
    fn test_extreme_low_band_equal_to_low_band_accepted() {
        let thresholds = Thresholds {
            extreme_low_sub_keyword_density: MINIMUM_SUB_KEYWORD_DENSITY,
            extreme_low_sub_keyword_in_meta_description_density:
                MINIMUM_SUB_KEYWORD_IN_META_DESCRIPTION_DENSITY,
            ..Thresholds::default()
        };
        assert!(thresholds.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = Thresholds::from_json_str("{").unwrap_err();
        assert!(err.to_string().contains("failed to parse scoring thresholds"));
    }
}
