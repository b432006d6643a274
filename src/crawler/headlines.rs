//! Heading extraction
//!
//! Walks a parsed document in order and collects heading elements into a
//! [`HeadingSet`] keyed by their normalized text.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

/// Quote characters stripped from both ends of a heading
const QUOTES: &[char] = &['"', '\u{201C}', '\u{201D}'];

/// Number of following sibling elements scanned for a snippet
const SNIPPET_SIBLINGS: usize = 2;

/// A heading found on a seed page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingRecord {
    /// Normalized heading text; the dedup key
    pub headline: String,

    /// Raw `href` of the first anchor inside the heading, empty if none
    pub link: String,

    /// Whitespace-normalized text of the next sibling elements
    pub snippet: String,

    /// Excerpt of the linked article; empty until enriched
    pub article_text: String,
}

impl HeadingRecord {
    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }
}

/// Headings of one page, at most one per normalized text
///
/// Iteration follows the document order of first occurrence.
#[derive(Debug, Clone, Default)]
pub struct HeadingSet {
    records: Vec<HeadingRecord>,
    index: HashMap<String, usize>,
}

impl HeadingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` unless its headline is already present
    ///
    /// Returns false (and drops `record`) for a duplicate.
    pub fn insert_if_absent(&mut self, record: HeadingRecord) -> bool {
        if self.index.contains_key(&record.headline) {
            return false;
        }
        self.index
            .insert(record.headline.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, headline: &str) -> Option<&HeadingRecord> {
        self.index.get(headline).map(|&i| &self.records[i])
    }

    /// Stores enrichment output for a heading; false if the heading is unknown
    pub fn set_article_text(&mut self, headline: &str, text: String) -> bool {
        match self.index.get(headline) {
            Some(&i) => {
                self.records[i].article_text = text;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeadingRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Returns true for `h` followed by exactly one character (h1..h6)
pub fn is_heading_tag(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('h') && chars.next().is_some() && chars.next().is_none()
}

/// Normalizes heading text into its dedup key
///
/// Trims whitespace, strips surrounding double quotes, removes every
/// backslash and slash, then trims again.
///
/// # Example
///
/// ```
/// use headline_harvester::crawler::clean_headline;
///
/// assert_eq!(clean_headline("  \"Breaking / News\"  "), "Breaking  News");
/// ```
pub fn clean_headline(raw: &str) -> String {
    raw.trim()
        .trim_matches(QUOTES)
        .chars()
        .filter(|c| *c != '\\' && *c != '/')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Collapses tabs, newlines and runs of spaces into single spaces
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts every heading of `document`, first occurrence wins
pub fn extract_headlines(document: &Html) -> HeadingSet {
    let anchor_selector = Selector::parse("a[href]").ok();
    let mut headings = HeadingSet::new();

    for element in document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
    {
        if !is_heading_tag(element.value().name()) {
            continue;
        }

        let headline = clean_headline(&element.text().collect::<String>());
        if headline.is_empty() {
            continue;
        }

        let link = anchor_selector
            .as_ref()
            .and_then(|selector| element.select(selector).next())
            .and_then(|anchor| anchor.value().attr("href"))
            .unwrap_or_default()
            .to_string();

        if link.is_empty() {
            tracing::trace!("No link inside heading '{}'", headline);
        }

        let record = HeadingRecord {
            snippet: sibling_snippet(element),
            headline,
            link,
            article_text: String::new(),
        };

        if !headings.insert_if_absent(record) {
            tracing::trace!("Skipping duplicate heading");
        }
    }

    headings
}

fn sibling_snippet(element: ElementRef<'_>) -> String {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take(SNIPPET_SIBLINGS)
        .map(|sibling| normalize_whitespace(&sibling.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
