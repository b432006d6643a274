//! Keyword classification
//!
//! Matching is case-insensitive substring containment. The caller's keyword
//! order decides which keyword is reported when several match.

use crate::crawler::headlines::{HeadingRecord, HeadingSet};
use crate::output::ClassifiedArticle;

/// Lowercased, deduplicated keywords in caller order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Builds the set, dropping empty entries and case-insensitive duplicates
    ///
    /// Keywords are otherwise kept verbatim, surrounding spaces included.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().to_lowercase();
            if !keyword.is_empty() && !set.contains(&keyword) {
                set.push(keyword);
            }
        }
        Self { keywords: set }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// First keyword (in caller order) contained in `text`
    pub fn first_match(&self, text: &str) -> Option<&str> {
        if text.is_empty() {
            return None;
        }
        let text = text.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| text.contains(keyword.as_str()))
            .map(String::as_str)
    }

    /// Category for a record, or None if it must be excluded
    ///
    /// The headline is tested before the article text.
    pub fn categorize(&self, record: &HeadingRecord) -> Option<String> {
        if self.is_empty() {
            return Some(String::new());
        }

        self.first_match(&record.headline)
            .or_else(|| self.first_match(&record.article_text))
            .map(str::to_string)
    }
}

/// Filters and labels headings against `keywords`
///
/// With no keywords every heading passes with an empty category.
pub fn classify(headings: &HeadingSet, keywords: &KeywordSet) -> Vec<ClassifiedArticle> {
    headings
        .iter()
        .filter_map(|record| {
            let category = keywords.categorize(record)?;
            Some(ClassifiedArticle {
                headline: record.headline.clone(),
                text: record.article_text.clone(),
                text_link: record.link.clone(),
                category,
            })
        })
        .collect()
}
