//! Rendering rule outcomes as human-readable advice

use serde::{Deserialize, Serialize};

use crate::rules::{Category, Finding, Outcome};

/// Rendered advice, bucketed by severity in pipeline order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSet {
    pub warnings: Vec<String>,
    pub minor_warnings: Vec<String>,
    pub good_points: Vec<String>,
}

impl MessageSet {
    /// Render each outcome with `formatter` into its category bucket
    pub fn from_outcomes<F>(outcomes: &[Outcome], formatter: &F) -> Self
    where
        F: MessageFormatter + ?Sized,
    {
        let mut messages = Self::default();
        for outcome in outcomes {
            let text = formatter.render(&outcome.finding);
            match outcome.category {
                Category::Warning => messages.warnings.push(text),
                Category::MinorWarning => messages.minor_warnings.push(text),
                Category::GoodPoint => messages.good_points.push(text),
            }
        }
        messages
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.minor_warnings.is_empty() && self.good_points.is_empty()
    }
}

/// Turns a finding into display text for one locale
pub trait MessageFormatter {
    fn render(&self, finding: &Finding) -> String;
}

/// Stock English messages
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishFormatter;

impl MessageFormatter for EnglishFormatter {
    fn render(&self, finding: &Finding) -> String {
        match finding {
            Finding::MissingKeyword => {
                "No primary keyword set. Choose the main phrase this content should rank for."
                    .to_string()
            }
            Finding::KeywordPresent { keyword } => format!("Primary keyword set: \"{keyword}\"."),
            Finding::KeywordStuffing { density } => format!(
                "Keyword stuffing detected: the keyword makes up {density:.2}% of the text."
            ),
            Finding::KeywordDensityTooLow { density } => format!(
                "Keyword density is too low ({density:.2}%). Use the keyword more often."
            ),
            Finding::KeywordDensityTooHigh { density } => format!(
                "Keyword density is too high ({density:.2}%). Use the keyword less often."
            ),
            Finding::KeywordDensityOk { density } => {
                format!("Keyword density is {density:.2}%, which is a good level.")
            }

            Finding::NoSubKeywords => {
                "No sub keywords set. Secondary phrases help content rank for related searches."
                    .to_string()
            }
            Finding::SubKeywordsPresent { sub_keywords } => {
                format!("Sub keywords set: {}.", sub_keywords.join(", "))
            }
            Finding::SubKeywordDensityTooHigh { keyword, density } => format!(
                "Sub keyword \"{keyword}\" density is too high ({density:.2}%)."
            ),
            Finding::SubKeywordDensityTooLow { keyword, density } => format!(
                "Sub keyword \"{keyword}\" density is too low ({density:.2}%)."
            ),
            Finding::SubKeywordDensityExtremelyLow { keyword, density } => format!(
                "Sub keyword \"{keyword}\" density is extremely low ({density:.2}%)."
            ),
            Finding::SubKeywordDensityOk { keyword, density } => format!(
                "Sub keyword \"{keyword}\" density is {density:.2}%, which is a good level."
            ),

            Finding::MissingTitle => "The content has no title.".to_string(),
            Finding::TitleTooLong { length } => {
                format!("Title is too long ({length} characters). Search engines may cut it off.")
            }
            Finding::TitleTooShort { length } => {
                format!("Title is too short ({length} characters).")
            }
            Finding::TitleLengthOk { length } => {
                format!("Title length is {length} characters, which is a good length.")
            }
            Finding::KeywordInTitle { keyword } => {
                format!("Title contains the primary keyword \"{keyword}\".")
            }
            Finding::KeywordMissingFromTitle => {
                "Title does not contain the primary keyword.".to_string()
            }
            Finding::SubKeywordsInTitle { count } => {
                format!("Title contains {count} sub keyword(s).")
            }
            Finding::NoSubKeywordsInTitle => "Title does not contain any sub keywords.".to_string(),

            Finding::TooFewInternalLinks { count } => format!(
                "Only {count} internal link(s) found. Link to more related pages on your site."
            ),
            Finding::InternalLinksOk { count } => {
                format!("{count} internal link(s) found, enough for this content length.")
            }
            Finding::TooFewOutboundLinks { count } => format!(
                "Only {count} outbound link(s) found. Link to more authoritative external sources."
            ),
            Finding::DuplicateInternalLinks { count } => {
                format!("{count} duplicate internal link(s) found.")
            }
            Finding::NoDuplicateInternalLinks => "No duplicate internal links.".to_string(),
            Finding::DuplicateOutboundLinks { count } => {
                format!("{count} duplicate outbound link(s) found.")
            }
            Finding::NoDuplicateOutboundLinks => "No duplicate outbound links.".to_string(),

            Finding::MissingMetaDescription => "The content has no meta description.".to_string(),
            Finding::MetaDescriptionTooLong { length } => format!(
                "Meta description is too long ({length} characters). Search engines may cut it off."
            ),
            Finding::MetaDescriptionTooShort { length } => {
                format!("Meta description is too short ({length} characters).")
            }
            Finding::MetaDescriptionLengthOk { length } => {
                format!("Meta description length is {length} characters, which is a good length.")
            }
            Finding::MetaKeywordDensityTooHigh { density } => format!(
                "Keyword density in the meta description is too high ({density:.2}%)."
            ),
            Finding::MetaKeywordDensityTooLow { density } => format!(
                "Keyword density in the meta description is too low ({density:.2}%)."
            ),
            Finding::MetaKeywordDensityOk { density } => format!(
                "Keyword density in the meta description is {density:.2}%, which is a good level."
            ),
            Finding::MetaDescriptionNotStartingWithKeyword { excerpt } => format!(
                "Meta description \"{excerpt}...\" doesn't start with the primary keyword."
            ),
            Finding::MetaDescriptionStartsWithKeyword { excerpt } => {
                format!("Meta description \"{excerpt}...\" starts with the primary keyword.")
            }
            Finding::MetaSubKeywordDensityTooHigh { keyword, density } => format!(
                "Sub keyword \"{keyword}\" density in the meta description is too high ({density:.2}%)."
            ),
            Finding::MetaSubKeywordDensityTooLow { keyword, density } => format!(
                "Sub keyword \"{keyword}\" density in the meta description is too low ({density:.2}%)."
            ),
            Finding::MetaSubKeywordDensityExtremelyLow { keyword, density } => format!(
                "Sub keyword \"{keyword}\" density in the meta description is extremely low ({density:.2}%)."
            ),
            Finding::MetaSubKeywordDensityOk { keyword, density } => format!(
                "Sub keyword \"{keyword}\" density in the meta description is {density:.2}%, which is a good level."
            ),

            Finding::KeywordInHeading { tag, text } => {
                format!("Primary keyword found in {tag} \"{text}\".")
            }
            Finding::KeywordMissingFromHeading { tag, text } => {
                format!("Primary keyword not found in {tag} \"{text}\".")
            }
            Finding::SubKeywordInHeading { keyword, tag, text } => {
                format!("Sub keyword \"{keyword}\" found in {tag} \"{text}\".")
            }
            Finding::SubKeywordMissingFromHeading { keyword, tag, text } => {
                format!("Sub keyword \"{keyword}\" not found in {tag} \"{text}\".")
            }

            Finding::NoHeadings => {
                "No headings found. Structure the content with headings.".to_string()
            }
            Finding::HeadingsPresent { count } => format!("{count} heading(s) found."),
            Finding::SingleH1 => "Exactly one H1 heading found.".to_string(),
            Finding::MissingH1 => "No H1 heading found.".to_string(),
            Finding::MultipleH1 { count } => {
                format!("{count} H1 headings found. Use a single H1 per page.")
            }
            Finding::MissingH2 => "No H2 headings found. H2 headings are recommended.".to_string(),
            Finding::H2Present { count } => format!("{count} H2 heading(s) found."),
            Finding::MissingH3 => "No H3 headings found. H3 headings are optional.".to_string(),
            Finding::H3Present { count } => format!("{count} H3 heading(s) found."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct RuleIdFormatter;

    impl MessageFormatter for RuleIdFormatter {
        fn render(&self, finding: &Finding) -> String {
            serde_json::to_value(finding)
                .ok()
                .and_then(|value| value["rule"].as_str().map(str::to_string))
                .unwrap_or_default()
        }
    }

    fn sample_outcomes() -> Vec<Outcome> {
        vec![
            Outcome::warning(Finding::MissingKeyword),
            Outcome::good_point(Finding::SingleH1),
            Outcome::minor_warning(Finding::MissingH3),
            Outcome::warning(Finding::MissingH2),
        ]
    }

    #[test]
    fn test_buckets_preserve_order() {
        let messages = MessageSet::from_outcomes(&sample_outcomes(), &RuleIdFormatter);
        assert_eq!(
            messages,
            MessageSet {
                warnings: vec!["missing_keyword".to_string(), "missing_h2".to_string()],
                minor_warnings: vec!["missing_h3".to_string()],
                good_points: vec!["single_h1".to_string()],
            }
        );
    }

    #[test]
    fn test_empty_outcomes() {
        assert!(MessageSet::from_outcomes(&[], &EnglishFormatter).is_empty());
    }

    #[test]
    fn test_english_density_precision() {
        let text = EnglishFormatter.render(&Finding::KeywordDensityOk { density: 1.0 });
        assert!(text.contains("1.00%"));

        let text = EnglishFormatter.render(&Finding::SubKeywordDensityTooLow {
            keyword: "rust".to_string(),
            density: 0.104,
        });
        assert!(text.contains("\"rust\""));
        assert!(text.contains("0.10%"));
    }

    #[test]
    fn test_english_lists_sub_keywords() {
        let text = EnglishFormatter.render(&Finding::SubKeywordsPresent {
            sub_keywords: vec!["rust".to_string(), "cargo".to_string()],
        });
        assert_eq!(text, "Sub keywords set: rust, cargo.");
    }

    #[test]
    fn test_messages_serialize_camel_case() {
        let messages = MessageSet::from_outcomes(&sample_outcomes(), &EnglishFormatter);
        let json = serde_json::to_value(&messages).unwrap();
        assert_eq!(json["minorWarnings"].as_array().unwrap().len(), 1);
        assert_eq!(json["goodPoints"].as_array().unwrap().len(), 1);
    }
}
