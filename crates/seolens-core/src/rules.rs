//! Rule evaluation
//!
//! Every rule appends structured [`Outcome`]s; turning them into text is the
//! job of a [`crate::messages::MessageFormatter`]. Rules run in a fixed order
//! so that rendered message lists are reproducible.

use serde::{Deserialize, Serialize};

use crate::thresholds::Thresholds;
use crate::types::{Heading, KeywordDensity, LinkSet};

/// Severity bucket of an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Warning,
    MinorWarning,
    GoodPoint,
}

/// What a rule found, with the data needed to describe it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Finding {
    // Primary keyword
    MissingKeyword,
    KeywordPresent { keyword: String },
    KeywordStuffing { density: f64 },
    KeywordDensityTooLow { density: f64 },
    KeywordDensityTooHigh { density: f64 },
    KeywordDensityOk { density: f64 },

    // Sub-keywords
    NoSubKeywords,
    SubKeywordsPresent { sub_keywords: Vec<String> },
    SubKeywordDensityTooHigh { keyword: String, density: f64 },
    SubKeywordDensityTooLow { keyword: String, density: f64 },
    SubKeywordDensityExtremelyLow { keyword: String, density: f64 },
    SubKeywordDensityOk { keyword: String, density: f64 },

    // Title
    MissingTitle,
    TitleTooLong { length: usize },
    TitleTooShort { length: usize },
    TitleLengthOk { length: usize },
    KeywordInTitle { keyword: String },
    KeywordMissingFromTitle,
    SubKeywordsInTitle { count: usize },
    NoSubKeywordsInTitle,

    // Links
    TooFewInternalLinks { count: usize },
    InternalLinksOk { count: usize },
    TooFewOutboundLinks { count: usize },
    DuplicateInternalLinks { count: usize },
    NoDuplicateInternalLinks,
    DuplicateOutboundLinks { count: usize },
    NoDuplicateOutboundLinks,

    // Meta description
    MissingMetaDescription,
    MetaDescriptionTooLong { length: usize },
    MetaDescriptionTooShort { length: usize },
    MetaDescriptionLengthOk { length: usize },
    MetaKeywordDensityTooHigh { density: f64 },
    MetaKeywordDensityTooLow { density: f64 },
    MetaKeywordDensityOk { density: f64 },
    MetaDescriptionNotStartingWithKeyword { excerpt: String },
    MetaDescriptionStartsWithKeyword { excerpt: String },
    MetaSubKeywordDensityTooHigh { keyword: String, density: f64 },
    MetaSubKeywordDensityTooLow { keyword: String, density: f64 },
    MetaSubKeywordDensityExtremelyLow { keyword: String, density: f64 },
    MetaSubKeywordDensityOk { keyword: String, density: f64 },

    // Keywords in headings
    KeywordInHeading { tag: String, text: String },
    KeywordMissingFromHeading { tag: String, text: String },
    SubKeywordInHeading { keyword: String, tag: String, text: String },
    SubKeywordMissingFromHeading { keyword: String, tag: String, text: String },

    // Heading structure
    NoHeadings,
    HeadingsPresent { count: usize },
    SingleH1,
    MissingH1,
    MultipleH1 { count: usize },
    MissingH2,
    H2Present { count: usize },
    MissingH3,
    H3Present { count: usize },
}

/// A classified rule result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub category: Category,
    pub finding: Finding,
}

impl Outcome {
    pub fn warning(finding: Finding) -> Self {
        Self {
            category: Category::Warning,
            finding,
        }
    }

    pub fn minor_warning(finding: Finding) -> Self {
        Self {
            category: Category::MinorWarning,
            finding,
        }
    }

    pub fn good_point(finding: Finding) -> Self {
        Self {
            category: Category::GoodPoint,
            finding,
        }
    }
}

/// Primary keyword presence and body density
pub fn keyword_rules(
    keyword: Option<&str>,
    density: f64,
    thresholds: &Thresholds,
    out: &mut Vec<Outcome>,
) {
    let Some(keyword) = keyword else {
        out.push(Outcome::warning(Finding::MissingKeyword));
        return;
    };

    out.push(Outcome::good_point(Finding::KeywordPresent {
        keyword: keyword.to_string(),
    }));

    if density > thresholds.keyword_stuffing_density {
        out.push(Outcome::warning(Finding::KeywordStuffing { density }));
    }

    if density < thresholds.min_keyword_density {
        out.push(Outcome::warning(Finding::KeywordDensityTooLow { density }));
    } else if density > thresholds.max_keyword_density {
        out.push(Outcome::warning(Finding::KeywordDensityTooHigh { density }));
    } else {
        out.push(Outcome::good_point(Finding::KeywordDensityOk { density }));
    }
}

/// Sub-keyword presence and body densities
pub fn sub_keyword_rules(
    sub_keywords: &[String],
    densities: &[KeywordDensity],
    thresholds: &Thresholds,
    out: &mut Vec<Outcome>,
) {
    if sub_keywords.is_empty() {
        out.push(Outcome::minor_warning(Finding::NoSubKeywords));
        return;
    }

    out.push(Outcome::good_point(Finding::SubKeywordsPresent {
        sub_keywords: sub_keywords.to_vec(),
    }));

    for kd in densities {
        let keyword = kd.keyword.clone();
        let density = kd.density;
        let outcome = if density > thresholds.max_sub_keyword_density {
            Outcome::warning(Finding::SubKeywordDensityTooHigh { keyword, density })
        } else if density < thresholds.min_sub_keyword_density {
            if density < thresholds.extreme_low_sub_keyword_density {
                Outcome::minor_warning(Finding::SubKeywordDensityExtremelyLow { keyword, density })
            } else {
                Outcome::minor_warning(Finding::SubKeywordDensityTooLow { keyword, density })
            }
        } else {
            Outcome::good_point(Finding::SubKeywordDensityOk { keyword, density })
        };
        out.push(outcome);
    }
}

/// Title length and keyword usage
pub fn title_rules(
    title: &str,
    keyword_in_title: &KeywordDensity,
    sub_keywords_in_title: usize,
    thresholds: &Thresholds,
    out: &mut Vec<Outcome>,
) {
    if title.is_empty() {
        out.push(Outcome::warning(Finding::MissingTitle));
        return;
    }

    let length = title.chars().count();
    if length > thresholds.max_title_length {
        out.push(Outcome::warning(Finding::TitleTooLong { length }));
    } else if length < thresholds.min_title_length {
        out.push(Outcome::warning(Finding::TitleTooShort { length }));
    } else {
        out.push(Outcome::good_point(Finding::TitleLengthOk { length }));
    }

    if keyword_in_title.is_present() {
        out.push(Outcome::good_point(Finding::KeywordInTitle {
            keyword: keyword_in_title.keyword.clone(),
        }));
    } else {
        out.push(Outcome::warning(Finding::KeywordMissingFromTitle));
    }

    if sub_keywords_in_title > 0 {
        out.push(Outcome::good_point(Finding::SubKeywordsInTitle {
            count: sub_keywords_in_title,
        }));
    } else {
        out.push(Outcome::minor_warning(Finding::NoSubKeywordsInTitle));
    }
}

/// Link counts relative to document length, plus duplicate links
///
/// A sufficient outbound link count earns no good point, unlike internal
/// links.
pub fn link_rules(
    word_count: usize,
    internal: &LinkSet,
    outbound: &LinkSet,
    thresholds: &Thresholds,
    out: &mut Vec<Outcome>,
) {
    let words = word_count as f64;

    let internal_count = internal.unique.len();
    if (internal_count as f64) < words / thresholds.words_per_internal_link {
        out.push(Outcome::warning(Finding::TooFewInternalLinks {
            count: internal_count,
        }));
    } else {
        out.push(Outcome::good_point(Finding::InternalLinksOk {
            count: internal_count,
        }));
    }

    let outbound_count = outbound.unique.len();
    if (outbound_count as f64) < words / thresholds.words_per_outbound_link {
        out.push(Outcome::warning(Finding::TooFewOutboundLinks {
            count: outbound_count,
        }));
    }

    let internal_duplicates = internal.duplicate.len();
    if internal_duplicates > thresholds.max_duplicate_links {
        out.push(Outcome::minor_warning(Finding::DuplicateInternalLinks {
            count: internal_duplicates,
        }));
    } else {
        out.push(Outcome::good_point(Finding::NoDuplicateInternalLinks));
    }

    let outbound_duplicates = outbound.duplicate.len();
    if outbound_duplicates > thresholds.max_duplicate_links {
        out.push(Outcome::minor_warning(Finding::DuplicateOutboundLinks {
            count: outbound_duplicates,
        }));
    } else {
        out.push(Outcome::good_point(Finding::NoDuplicateOutboundLinks));
    }
}

/// Meta description length, keyword density and placement
///
/// The keyword density check only runs when the length is in range.
pub fn meta_description_rules(
    meta_description: &str,
    keyword_in_meta: &KeywordDensity,
    sub_keywords_in_meta: &[KeywordDensity],
    thresholds: &Thresholds,
    out: &mut Vec<Outcome>,
) {
    if meta_description.is_empty() {
        out.push(Outcome::warning(Finding::MissingMetaDescription));
        return;
    }

    let length = meta_description.chars().count();
    if length > thresholds.max_meta_description_length {
        out.push(Outcome::warning(Finding::MetaDescriptionTooLong { length }));
    } else if length < thresholds.min_meta_description_length {
        out.push(Outcome::warning(Finding::MetaDescriptionTooShort { length }));
    } else {
        out.push(Outcome::good_point(Finding::MetaDescriptionLengthOk {
            length,
        }));

        let density = keyword_in_meta.density;
        if density > thresholds.max_meta_description_density {
            out.push(Outcome::warning(Finding::MetaKeywordDensityTooHigh {
                density,
            }));
        } else if density < thresholds.min_meta_description_density {
            out.push(Outcome::warning(Finding::MetaKeywordDensityTooLow {
                density,
            }));
        } else {
            out.push(Outcome::good_point(Finding::MetaKeywordDensityOk {
                density,
            }));
        }
    }

    let excerpt: String = meta_description.chars().take(20).collect();
    if keyword_in_meta.position.unwrap_or(-1) > 1 {
        out.push(Outcome::minor_warning(
            Finding::MetaDescriptionNotStartingWithKeyword { excerpt },
        ));
    } else {
        out.push(Outcome::good_point(
            Finding::MetaDescriptionStartsWithKeyword { excerpt },
        ));
    }

    for kd in sub_keywords_in_meta {
        let keyword = kd.keyword.clone();
        let density = kd.density;
        let outcome = if density > thresholds.max_sub_keyword_in_meta_description_density {
            Outcome::warning(Finding::MetaSubKeywordDensityTooHigh { keyword, density })
        } else if density < thresholds.min_sub_keyword_in_meta_description_density {
            if density < thresholds.extreme_low_sub_keyword_in_meta_description_density {
                Outcome::minor_warning(Finding::MetaSubKeywordDensityExtremelyLow {
                    keyword,
                    density,
                })
            } else {
                Outcome::minor_warning(Finding::MetaSubKeywordDensityTooLow { keyword, density })
            }
        } else {
            Outcome::good_point(Finding::MetaSubKeywordDensityOk { keyword, density })
        };
        out.push(outcome);
    }
}

/// One outcome per heading for the primary keyword
pub fn keyword_in_heading_rules(
    keyword: Option<&str>,
    headings: &[Heading],
    out: &mut Vec<Outcome>,
) {
    for heading in headings {
        let tag = heading.tag.clone();
        let text = heading.text.clone();
        if count_in(keyword, &heading.text) > 0 {
            out.push(Outcome::good_point(Finding::KeywordInHeading { tag, text }));
        } else {
            out.push(Outcome::minor_warning(Finding::KeywordMissingFromHeading {
                tag,
                text,
            }));
        }
    }
}

/// One outcome per (heading, sub-keyword) pair
pub fn sub_keyword_in_heading_rules(
    sub_keywords: &[String],
    headings: &[Heading],
    out: &mut Vec<Outcome>,
) {
    for heading in headings {
        for sub_keyword in sub_keywords {
            let keyword = sub_keyword.clone();
            let tag = heading.tag.clone();
            let text = heading.text.clone();
            if count_in(Some(sub_keyword.as_str()), &heading.text) > 0 {
                out.push(Outcome::good_point(Finding::SubKeywordInHeading {
                    keyword,
                    tag,
                    text,
                }));
            } else {
                out.push(Outcome::minor_warning(
                    Finding::SubKeywordMissingFromHeading { keyword, tag, text },
                ));
            }
        }
    }
}

/// Heading counts per level
pub fn heading_structure_rules(headings: &[Heading], out: &mut Vec<Outcome>) {
    if headings.is_empty() {
        out.push(Outcome::warning(Finding::NoHeadings));
        return;
    }

    out.push(Outcome::good_point(Finding::HeadingsPresent {
        count: headings.len(),
    }));

    let count_tag = |tag: &str| headings.iter().filter(|heading| heading.is(tag)).count();

    match count_tag("h1") {
        0 => out.push(Outcome::warning(Finding::MissingH1)),
        1 => out.push(Outcome::good_point(Finding::SingleH1)),
        count => out.push(Outcome::warning(Finding::MultipleH1 { count })),
    }

    match count_tag("h2") {
        0 => out.push(Outcome::warning(Finding::MissingH2)),
        count => out.push(Outcome::good_point(Finding::H2Present { count })),
    }

    match count_tag("h3") {
        0 => out.push(Outcome::minor_warning(Finding::MissingH3)),
        count => out.push(Outcome::good_point(Finding::H3Present { count })),
    }
}

fn count_in(keyword: Option<&str>, text: &str) -> usize {
    keyword.map_or(0, |keyword| crate::density::occurrence_count(keyword, text))
}
