//! # seolens-core
//!
//! On-page SEO scoring for a single piece of content.
//!
//! This library provides:
//! - Keyword and sub-keyword density checks against the body, title and meta description
//! - Title and meta description length checks
//! - Heading structure checks (h1/h2/h3 counts, keywords in headings)
//! - Internal and outbound link counts relative to content length
//! - An overall score and a keyword usage score
//!
//! Text facts (word counts, headings, links) come from a [`TextAnalyzer`].
//! Rules produce structured [`Outcome`]s which a [`MessageFormatter`] renders
//! into a [`MessageSet`] of warnings, minor warnings and good points.
//!
//! ## Example
//!
//! ```no_run
//! use seolens_core::{ContentDescriptor, ContentFacts, ContentScorer};
//!
//! # fn example() -> anyhow::Result<()> {
//! let content = ContentDescriptor::new(
//!     "A practical guide to on-page seo for small teams",
//!     "Learn on-page seo step by step.",
//! )
//! .with_keyword("seo")
//! .with_sub_keywords(["on-page", "guide"]);
//!
//! let facts = ContentFacts::from_json_str(r#"{"bodyText": "seo basics for everyone"}"#)?;
//!
//! let scorer = ContentScorer::new(&content, &facts, false);
//! for warning in &scorer.messages().warnings {
//!     println!("{warning}");
//! }
//! println!("{}", scorer.report().to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod density;
pub mod messages;
pub mod report;
pub mod rules;
pub mod scorer;
pub mod thresholds;
pub mod types;

// Re-export commonly used types
pub use analyzer::{ContentFacts, TextAnalyzer, count_words};
pub use density::{density, keyword_density, keyword_position, occurrence_count};
pub use messages::{EnglishFormatter, MessageFormatter, MessageSet};
pub use report::ScoreReport;
pub use rules::{Category, Finding, Outcome};
pub use scorer::ContentScorer;
pub use thresholds::Thresholds;
pub use types::{ContentDescriptor, Heading, KeywordDensity, Link, LinkSet};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_creation() {
        let content = ContentDescriptor::new("Title", "Description")
            .with_keyword("seo")
            .with_sub_keywords(["rust"]);

        assert_eq!(content.title, "Title");
        assert_eq!(content.meta_description, "Description");
        assert_eq!(content.keyword.as_deref(), Some("seo"));
        assert_eq!(content.sub_keywords, vec!["rust"]);
    }

    #[test]
    fn test_link_set_creation() {
        let links = LinkSet {
            unique: vec![Link::new("/a"), Link::new("/b")],
            duplicate: vec![Link::new("/a")],
        };

        assert_eq!(links.unique.len(), 2);
        assert_eq!(links.duplicate[0].href, "/a");
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let content = ContentDescriptor::new("Title", "").with_keyword("seo");
        let facts = ContentFacts::new("seo text");
        let report = ContentScorer::new(&content, &facts, false).report();

        let json = report.to_json_pretty().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(parsed["overallScore"].is_number());
        assert_eq!(parsed["keywordDensity"], 50.0);
        assert_eq!(parsed["outcomes"][0]["category"], "good_point");
        assert_eq!(parsed["outcomes"][0]["finding"]["rule"], "keyword_present");
        assert!(parsed["messages"]["goodPoints"].is_array());
    }
}
