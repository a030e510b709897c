//! Common types used across seolens

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The piece of content being scored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentDescriptor {
    pub title: String,
    pub meta_description: String,
    /// Primary keyword the content is optimized for
    pub keyword: Option<String>,
    /// Secondary keywords, evaluated with looser thresholds
    pub sub_keywords: Vec<String>,
}

impl ContentDescriptor {
    pub fn new(title: impl Into<String>, meta_description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            meta_description: meta_description.into(),
            ..Default::default()
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_sub_keywords<I, S>(mut self, sub_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_keywords = sub_keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a descriptor from JSON (`title`, `metaDescription`, `keyword`, `subKeywords`)
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse content descriptor")
    }

    /// The primary keyword, treating an empty string as absent
    pub fn primary_keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|keyword| !keyword.is_empty())
    }
}

/// A heading element (`h1`..`h6`) found in the content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub tag: String,
    pub text: String,
}

impl Heading {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
        }
    }

    /// Case-insensitive tag comparison (`H1` matches `h1`)
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

/// A hyperlink found in the content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default)]
    pub anchor: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            anchor: String::new(),
        }
    }
}

/// Links split into first occurrences and repeats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSet {
    pub unique: Vec<Link>,
    pub duplicate: Vec<Link>,
}

/// Density of a keyword inside some text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordDensity {
    pub keyword: String,
    /// Percentage of the text's word count taken by keyword occurrences
    pub density: f64,
    /// Word position of the first occurrence, `-1` when keyword or text is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl KeywordDensity {
    pub fn new(keyword: impl Into<String>, density: f64) -> Self {
        Self {
            keyword: keyword.into(),
            density,
            position: None,
        }
    }

    pub fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Whether the keyword occurs at all
    pub fn is_present(&self) -> bool {
        self.density > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_json() {
        let json = r#"{
            "title": "Rust SEO",
            "metaDescription": "Scoring content",
            "keyword": "seo",
            "subKeywords": ["rust", "scoring"]
        }"#;

        let content = ContentDescriptor::from_json_str(json).unwrap();
        assert_eq!(content.title, "Rust SEO");
        assert_eq!(content.meta_description, "Scoring content");
        assert_eq!(content.primary_keyword(), Some("seo"));
        assert_eq!(content.sub_keywords, vec!["rust", "scoring"]);
    }

    #[test]
    fn test_descriptor_missing_fields_default() {
        let content = ContentDescriptor::from_json_str(r#"{"title": "Only a title"}"#).unwrap();
        assert!(content.meta_description.is_empty());
        assert!(content.keyword.is_none());
        assert!(content.sub_keywords.is_empty());
    }

    #[test]
    fn test_descriptor_invalid_json() {
        assert!(ContentDescriptor::from_json_str("not json").is_err());
    }

    #[test]
    fn test_empty_keyword_is_absent() {
        let content = ContentDescriptor::new("t", "m").with_keyword("");
        assert_eq!(content.primary_keyword(), None);
    }

    #[test]
    fn test_heading_tag_case_insensitive() {
        let heading = Heading::new("H2", "Section");
        assert!(heading.is("h2"));
        assert!(!heading.is("h1"));
    }
}
