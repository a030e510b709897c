//! Keyword occurrence, density and position calculations

use crate::analyzer::TextAnalyzer;
use crate::types::KeywordDensity;

/// Number of non-overlapping, case-sensitive substring matches of `keyword`
///
/// A keyword embedded in a longer word still counts. An empty keyword never
/// matches.
pub fn occurrence_count(keyword: &str, text: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    text.matches(keyword).count()
}

/// Percentage of `word_count` made up by `occurrences`; zero words yields `0.0`
pub fn density_percent(occurrences: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    (occurrences as f64 * 100.0) / word_count as f64
}

/// Density of `keyword` in `text`, using the analyzer's word count for `text`
pub fn density<A: TextAnalyzer + ?Sized>(keyword: Option<&str>, text: &str, analyzer: &A) -> f64 {
    let occurrences = keyword.map_or(0, |keyword| occurrence_count(keyword, text));
    density_percent(occurrences, analyzer.word_count(Some(text)))
}

/// Number of space-separated words before the first match of `keyword`
///
/// The prefix is split on single spaces, so a keyword at the very start
/// yields `1` and `"great seo"` yields `2` for `"seo"`. Without a match the
/// prefix is the whole text. Returns `-1` if either input is empty.
pub fn keyword_position(text: &str, keyword: &str) -> i64 {
    if text.is_empty() || keyword.is_empty() {
        return -1;
    }
    let prefix = text.split_once(keyword).map_or(text, |(before, _)| before);
    prefix.split(' ').count() as i64
}

/// Density of `keyword` in `text` along with the first-occurrence position
pub fn keyword_density<A: TextAnalyzer + ?Sized>(
    keyword: Option<&str>,
    text: &str,
    analyzer: &A,
) -> KeywordDensity {
    let position = keyword.map_or(-1, |keyword| keyword_position(text, keyword));
    KeywordDensity::new(keyword.unwrap_or_default(), density(keyword, text, analyzer))
        .with_position(position)
}
