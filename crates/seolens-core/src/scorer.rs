//! Content scoring
//!
//! [`ContentScorer`] evaluates every rule once at construction and is
//! read-only afterwards. Rule groups run in this order: keyword, sub-keyword,
//! title, links, meta description, keyword in headings, sub-keyword in
//! headings, heading structure.

use anyhow::Result;
use tracing::{debug, trace};

use crate::analyzer::TextAnalyzer;
use crate::density::{density, keyword_density};
use crate::messages::{EnglishFormatter, MessageFormatter, MessageSet};
use crate::report::ScoreReport;
use crate::rules::{self, Category, Outcome};
use crate::thresholds::Thresholds;
use crate::types::{ContentDescriptor, Heading, KeywordDensity};

/// Scores a single piece of content against on-page SEO rules
pub struct ContentScorer<'a, A: TextAnalyzer + ?Sized> {
    content: &'a ContentDescriptor,
    analyzer: &'a A,
    thresholds: Thresholds,
    keyword_density: f64,
    headings: Vec<Heading>,
    outcomes: Vec<Outcome>,
    messages: MessageSet,
}

impl<'a, A: TextAnalyzer + ?Sized> ContentScorer<'a, A> {
    /// Score with default thresholds
    ///
    /// Unless `strict_mode` is set, the title counts as an `H1` heading even
    /// when the analyzer found no literal `<h1>`.
    pub fn new(content: &'a ContentDescriptor, analyzer: &'a A, strict_mode: bool) -> Self {
        Self::build(content, analyzer, strict_mode, Thresholds::default())
    }

    /// Score with custom thresholds, rejecting an invalid configuration
    pub fn with_thresholds(
        content: &'a ContentDescriptor,
        analyzer: &'a A,
        strict_mode: bool,
        thresholds: Thresholds,
    ) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self::build(content, analyzer, strict_mode, thresholds))
    }

    fn build(
        content: &'a ContentDescriptor,
        analyzer: &'a A,
        strict_mode: bool,
        thresholds: Thresholds,
    ) -> Self {
        let keyword_density = density(content.primary_keyword(), analyzer.body_text(), analyzer);
        let headings = merge_headings(analyzer.headings(), &content.title, strict_mode);

        let mut scorer = Self {
            content,
            analyzer,
            thresholds,
            keyword_density,
            headings,
            outcomes: Vec::new(),
            messages: MessageSet::default(),
        };
        scorer.outcomes = scorer.evaluate();
        scorer.messages = MessageSet::from_outcomes(&scorer.outcomes, &EnglishFormatter);

        debug!(
            keyword = content.primary_keyword().unwrap_or_default(),
            keyword_density = scorer.keyword_density,
            headings = scorer.headings.len(),
            strict_mode,
            warnings = scorer.messages.warnings.len(),
            minor_warnings = scorer.messages.minor_warnings.len(),
            good_points = scorer.messages.good_points.len(),
            "scored content"
        );

        scorer
    }

    fn evaluate(&self) -> Vec<Outcome> {
        let content = self.content;
        let keyword = content.primary_keyword();
        let thresholds = &self.thresholds;
        let mut out = Vec::new();

        rules::keyword_rules(keyword, self.keyword_density, thresholds, &mut out);
        trace!(outcomes = out.len(), "keyword rules evaluated");

        let sub_keyword_densities = self.sub_keyword_densities();
        rules::sub_keyword_rules(
            &content.sub_keywords,
            &sub_keyword_densities,
            thresholds,
            &mut out,
        );
        trace!(outcomes = out.len(), "sub keyword rules evaluated");

        rules::title_rules(
            &content.title,
            &self.keyword_in_title(),
            self.sub_keywords_in_title().len(),
            thresholds,
            &mut out,
        );
        trace!(outcomes = out.len(), "title rules evaluated");

        rules::link_rules(
            self.analyzer.word_count(None),
            &self.analyzer.internal_links(),
            &self.analyzer.outbound_links(),
            thresholds,
            &mut out,
        );
        trace!(outcomes = out.len(), "link rules evaluated");

        rules::meta_description_rules(
            &content.meta_description,
            &self.keyword_in_meta_description(),
            &self.sub_keywords_in_meta_description(),
            thresholds,
            &mut out,
        );
        trace!(outcomes = out.len(), "meta description rules evaluated");

        rules::keyword_in_heading_rules(keyword, &self.headings, &mut out);
        rules::sub_keyword_in_heading_rules(&content.sub_keywords, &self.headings, &mut out);
        rules::heading_structure_rules(&self.headings, &mut out);
        trace!(outcomes = out.len(), "heading rules evaluated");

        out
    }

    pub fn content(&self) -> &ContentDescriptor {
        self.content
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Primary keyword density in the body text
    pub fn keyword_density(&self) -> f64 {
        self.keyword_density
    }

    /// Working heading list, including the title `H1` outside strict mode
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Advice rendered in English
    pub fn messages(&self) -> &MessageSet {
        &self.messages
    }

    /// Re-render the outcomes with another formatter
    pub fn render_with<F: MessageFormatter + ?Sized>(&self, formatter: &F) -> MessageSet {
        MessageSet::from_outcomes(&self.outcomes, formatter)
    }

    /// Density of each sub-keyword in the body text
    pub fn sub_keyword_densities(&self) -> Vec<KeywordDensity> {
        let body = self.analyzer.body_text();
        self.content
            .sub_keywords
            .iter()
            .map(|sub_keyword| {
                KeywordDensity::new(
                    sub_keyword.as_str(),
                    density(Some(sub_keyword.as_str()), body, self.analyzer),
                )
            })
            .collect()
    }

    pub fn unique_internal_links_count(&self) -> usize {
        self.analyzer.internal_links().unique.len()
    }

    pub fn unique_outbound_links_count(&self) -> usize {
        self.analyzer.outbound_links().unique.len()
    }

    /// Primary keyword density in the title
    pub fn keyword_in_title(&self) -> KeywordDensity {
        keyword_density(
            self.content.primary_keyword(),
            &self.content.title,
            self.analyzer,
        )
    }

    /// Sub-keywords that occur in the title, with their title densities
    pub fn sub_keywords_in_title(&self) -> Vec<KeywordDensity> {
        let title = &self.content.title;
        self.content
            .sub_keywords
            .iter()
            .map(|sub_keyword| {
                KeywordDensity::new(
                    sub_keyword.as_str(),
                    density(Some(sub_keyword.as_str()), title, self.analyzer),
                )
            })
            .filter(KeywordDensity::is_present)
            .collect()
    }

    /// Primary keyword density and first position in the meta description
    pub fn keyword_in_meta_description(&self) -> KeywordDensity {
        keyword_density(
            self.content.primary_keyword(),
            &self.content.meta_description,
            self.analyzer,
        )
    }

    /// Density and first position of every sub-keyword in the meta description
    pub fn sub_keywords_in_meta_description(&self) -> Vec<KeywordDensity> {
        let meta_description = &self.content.meta_description;
        self.content
            .sub_keywords
            .iter()
            .map(|sub_keyword| {
                keyword_density(Some(sub_keyword.as_str()), meta_description, self.analyzer)
            })
            .collect()
    }

    pub fn title_word_count(&self) -> usize {
        self.analyzer.word_count(Some(&self.content.title))
    }

    /// Share of good points among warnings and good points, as a percentage
    ///
    /// Minor warnings do not count. Returns `0.0` when there is nothing to
    /// count.
    pub fn overall_score(&self) -> f64 {
        good_point_ratio(&self.outcomes)
    }

    /// Weighted keyword usage heuristic, capped at 100
    ///
    /// Sums ten times each of: title keyword density, number of sub-keywords
    /// in the title, every sub-keyword body density and the body keyword
    /// density. This saturates easily and is not a normalized metric.
    pub fn keyword_score(&self) -> f64 {
        let sub_keyword_total: f64 = self
            .sub_keyword_densities()
            .iter()
            .map(|kd| kd.density * 10.0)
            .sum();

        let score = self.keyword_in_title().density * 10.0
            + self.sub_keywords_in_title().len() as f64 * 10.0
            + sub_keyword_total
            + self.keyword_density * 10.0;

        score.clamp(0.0, 100.0)
    }

    /// Serializable snapshot of the scores, densities and advice
    pub fn report(&self) -> ScoreReport {
        ScoreReport {
            overall_score: self.overall_score(),
            keyword_score: self.keyword_score(),
            keyword_density: self.keyword_density,
            sub_keyword_densities: self.sub_keyword_densities(),
            keyword_in_title: self.keyword_in_title(),
            keyword_in_meta_description: self.keyword_in_meta_description(),
            title_word_count: self.title_word_count(),
            unique_internal_links: self.unique_internal_links_count(),
            unique_outbound_links: self.unique_outbound_links_count(),
            outcomes: self.outcomes.clone(),
            messages: self.messages.clone(),
        }
    }
}

/// Good points as a percentage of good points plus warnings, `0.0` if neither
fn good_point_ratio(outcomes: &[Outcome]) -> f64 {
    let count = |category: Category| {
        outcomes
            .iter()
            .filter(|outcome| outcome.category == category)
            .count()
    };
    let good_points = count(Category::GoodPoint);
    let total = count(Category::Warning) + good_points;
    if total == 0 {
        return 0.0;
    }
    (good_points as f64 / total as f64 * 100.0).min(100.0)
}

/// Analyzer headings plus a synthetic title `H1` unless `strict_mode`
fn merge_headings(found: Vec<Heading>, title: &str, strict_mode: bool) -> Vec<Heading> {
    let synthetic = (!strict_mode).then(|| Heading::new("H1", title));
    found.into_iter().chain(synthetic).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ContentFacts;
    use crate::rules::Finding;

    fn body(keyword: &str, occurrences: usize, words: usize) -> String {
        let mut tokens = vec![keyword; occurrences];
        tokens.extend(std::iter::repeat_n("word", words - occurrences));
        tokens.join(" ")
    }

    #[test]
    fn test_merge_headings() {
        let found = vec![Heading::new("h2", "Intro")];
        let merged = merge_headings(found.clone(), "Title", false);
        assert_eq!(merged, vec![Heading::new("h2", "Intro"), Heading::new("H1", "Title")]);

        assert_eq!(merge_headings(found.clone(), "Title", true), found);
    }

    #[test]
    fn test_analyzer_headings_untouched() {
        let facts = ContentFacts::new("text").with_headings(vec![Heading::new("h2", "Intro")]);
        let content = ContentDescriptor::new("Title", "");
        let scorer = ContentScorer::new(&content, &facts, false);

        assert_eq!(scorer.headings().len(), 2);
        assert_eq!(facts.headings().len(), 1);
    }

    #[test]
    fn test_keyword_density_from_body() {
        let facts = ContentFacts::new(body("seo", 3, 300));
        let content = ContentDescriptor::new("t", "m").with_keyword("seo");
        let scorer = ContentScorer::new(&content, &facts, false);

        assert_eq!(scorer.keyword_density(), 1.0);
    }

    #[test]
    fn test_sub_keywords_in_title_filters_absent() {
        let facts = ContentFacts::new("body");
        let content = ContentDescriptor::new("rust seo guide", "")
            .with_sub_keywords(["rust", "python", "guide"]);
        let scorer = ContentScorer::new(&content, &facts, false);

        let found: Vec<_> = scorer
            .sub_keywords_in_title()
            .into_iter()
            .map(|kd| kd.keyword)
            .collect();
        assert_eq!(found, vec!["rust", "guide"]);
        assert!(scorer.outcomes().contains(&Outcome::good_point(
            Finding::SubKeywordsInTitle { count: 2 }
        )));
    }

    #[test]
    fn test_overall_score_ratio() {
        let facts = ContentFacts::new("");
        let content = ContentDescriptor::default();
        let scorer = ContentScorer::new(&content, &facts, true);

        let warnings = scorer.messages().warnings.len() as f64;
        let good = scorer.messages().good_points.len() as f64;
        assert_eq!(scorer.overall_score(), good / (warnings + good) * 100.0);
    }

    #[test]
    fn test_good_point_ratio_without_outcomes() {
        assert_eq!(good_point_ratio(&[]), 0.0);
        assert_eq!(
            good_point_ratio(&[Outcome::minor_warning(Finding::MissingH3)]),
            0.0
        );
    }

    #[test]
    fn test_good_point_ratio() {
        let outcomes = vec![
            Outcome::good_point(Finding::SingleH1),
            Outcome::warning(Finding::MissingH2),
            Outcome::minor_warning(Finding::MissingH3),
            Outcome::good_point(Finding::NoDuplicateInternalLinks),
            Outcome::good_point(Finding::NoDuplicateOutboundLinks),
        ];
        assert_eq!(good_point_ratio(&outcomes), 75.0);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let facts = ContentFacts::new("text");
        let content = ContentDescriptor::new("Title", "");

        let inverted = Thresholds {
            min_title_length: 90,
            ..Thresholds::default()
        };
        let err = ContentScorer::with_thresholds(&content, &facts, false, inverted)
            .err()
            .unwrap();
        assert!(err.to_string().contains("min_title_length"));

        let zero_ratio = Thresholds {
            words_per_internal_link: 0.0,
            ..Thresholds::default()
        };
        assert!(ContentScorer::with_thresholds(&content, &facts, false, zero_ratio).is_err());
    }

    #[test]
    fn test_valid_custom_thresholds_accepted() {
        let facts = ContentFacts::new("text");
        let content = ContentDescriptor::new("Title", "");
        let thresholds = Thresholds {
            min_title_length: 3,
            ..Thresholds::default()
        };

        let scorer = ContentScorer::with_thresholds(&content, &facts, false, thresholds).unwrap();
        assert!(scorer.outcomes().contains(&Outcome::good_point(
            Finding::TitleLengthOk { length: 5 }
        )));
    }

    #[test]
    fn test_keyword_score_saturates() {
        let facts = ContentFacts::new(body("seo", 50, 60));
        let content = ContentDescriptor::new("seo", "").with_keyword("seo");
        let scorer = ContentScorer::new(&content, &facts, false);

        assert_eq!(scorer.keyword_score(), 100.0);
    }

    #[test]
    fn test_keyword_score_components() {
        // title: 1 of 20 words is the keyword (5%), one sub-keyword present
        let title = format!("seo rust {}", vec!["filler"; 18].join(" "));
        let facts = ContentFacts::new(body("seo", 1, 100));
        let content = ContentDescriptor::new(title, "")
            .with_keyword("seo")
            .with_sub_keywords(["rust"]);
        let scorer = ContentScorer::new(&content, &facts, false);

        assert_eq!(scorer.keyword_in_title().density, 5.0);
        assert_eq!(scorer.keyword_score(), 50.0 + 10.0 + 0.0 + 10.0);
    }
}
