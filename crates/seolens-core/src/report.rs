//! Serializable scoring report

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::messages::MessageSet;
use crate::rules::Outcome;
use crate::types::KeywordDensity;

/// Snapshot of everything a [`crate::ContentScorer`] computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// Good points as a percentage of warnings plus good points (0-100)
    pub overall_score: f64,

    /// Weighted keyword usage heuristic (0-100)
    pub keyword_score: f64,

    /// Primary keyword density in the body text
    pub keyword_density: f64,

    pub sub_keyword_densities: Vec<KeywordDensity>,
    pub keyword_in_title: KeywordDensity,
    pub keyword_in_meta_description: KeywordDensity,
    pub title_word_count: usize,
    pub unique_internal_links: usize,
    pub unique_outbound_links: usize,

    /// Structured rule results in evaluation order
    pub outcomes: Vec<Outcome>,

    /// Rendered advice
    pub messages: MessageSet,
}

impl ScoreReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize score report")
    }
}
