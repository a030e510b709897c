//! Text analysis facts consumed by the scorer
//!
//! The scorer never parses HTML itself. It asks a [`TextAnalyzer`] for word
//! counts, headings and link sets. [`ContentFacts`] is a ready-made analyzer
//! for facts that were extracted elsewhere (or written by hand in tests).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{Heading, LinkSet};

/// Source of raw text facts about a document
pub trait TextAnalyzer {
    /// Word count of `text`, or of the body text when `None`
    fn word_count(&self, text: Option<&str>) -> usize;

    /// Full extracted body text
    fn body_text(&self) -> &str;

    /// Headings in document order
    fn headings(&self) -> Vec<Heading>;

    fn internal_links(&self) -> LinkSet;

    fn outbound_links(&self) -> LinkSet;
}

/// Count whitespace-separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Precomputed document facts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentFacts {
    pub body_text: String,
    pub headings: Vec<Heading>,
    pub internal_links: LinkSet,
    pub outbound_links: LinkSet,
}

impl ContentFacts {
    pub fn new(body_text: impl Into<String>) -> Self {
        Self {
            body_text: body_text.into(),
            ..Default::default()
        }
    }

    pub fn with_headings(mut self, headings: Vec<Heading>) -> Self {
        self.headings = headings;
        self
    }

    pub fn with_internal_links(mut self, links: LinkSet) -> Self {
        self.internal_links = links;
        self
    }

    pub fn with_outbound_links(mut self, links: LinkSet) -> Self {
        self.outbound_links = links;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse content facts")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read content facts from {}", path.display()))?;
        Self::from_json_str(&raw)
    }
}

impl TextAnalyzer for ContentFacts {
    fn word_count(&self, text: Option<&str>) -> usize {
        count_words(text.unwrap_or(&self.body_text))
    }

    fn body_text(&self) -> &str {
        &self.body_text
    }

    fn headings(&self) -> Vec<Heading> {
        self.headings.clone()
    }

    fn internal_links(&self) -> LinkSet {
        self.internal_links.clone()
    }

    fn outbound_links(&self) -> LinkSet {
        self.outbound_links.clone()
    }
}
