//! Page document parser for the generated news listing.
//!
//! The upstream aggregation pipeline emits a JSON page document: the listing
//! title, navigation links, an optional call-to-action bar, an optional
//! filter-section marker, and the news cards themselves. This module loads
//! and validates that document; it never mutates it.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Failed to read page file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in page file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Page file exceeds the maximum allowed size.
    #[error("Page file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Document Structs
// ============================================================================

/// One news card in the listing.
///
/// Field names follow the upstream generator's card markup. `category` is
/// the filter attribute; cards without one exist in the listing but are
/// invisible to the filter.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Card {
    /// Display label for the published date, e.g. "Aug 07, 2026".
    pub fn published_label(&self) -> Option<String> {
        self.published.map(|dt| dt.format("%b %d, %Y").to_string())
    }
}

/// A navigation link in the page header.
#[derive(Debug, Clone, Deserialize)]
pub struct NavLink {
    pub label: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// The sticky call-to-action bar definition.
#[derive(Debug, Clone, Deserialize)]
pub struct CtaBar {
    pub text: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// Marker section enabling the category filter on this page.
///
/// Its presence in the document is what activates the filter feature;
/// pages without it (the contact page, the about page) share the same
/// viewer but stay unfiltered.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterSection {
    #[serde(default = "FilterSection::default_heading")]
    pub heading: String,
}

impl FilterSection {
    fn default_heading() -> String {
        "Filter by topic".to_string()
    }
}

/// The full page document.
///
/// All fields except `cards` are optional so any page type the generator
/// emits can be opened with the same viewer.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(default = "Page::default_title")]
    pub title: String,
    #[serde(default)]
    pub nav: Vec<NavLink>,
    #[serde(default)]
    pub cta: Option<CtaBar>,
    #[serde(default)]
    pub filter: Option<FilterSection>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Page {
    /// Maximum page file size (4 MB). The generator caps listings well
    /// below this; anything larger is a corrupted or hostile file.
    const MAX_FILE_SIZE: u64 = 4 * 1_048_576;

    fn default_title() -> String {
        "News".to_string()
    }

    /// Parse a page document from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load a page document from disk.
    ///
    /// - Missing file → `Err(PageError::Io)` (callers decide how to guide
    ///   the user; see `main`)
    /// - Oversized file → `Err(PageError::TooLarge)` without reading it
    /// - Invalid JSON → `Err(PageError::Parse)` with position info
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(PageError::TooLarge(format!(
                "Page file is {} bytes (max {} bytes)",
                meta.len(),
                Self::MAX_FILE_SIZE
            )));
        }

        let raw = std::fs::read_to_string(path)?;
        let page = Self::from_json(&raw)?;
        tracing::debug!(
            path = %path.display(),
            cards = page.cards.len(),
            filterable = page.filter.is_some(),
            "Loaded page document"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let raw = r#"{
            "title": "Sustain74 ESG News Feed",
            "nav": [
                {"label": "Home", "link": "https://example.com"},
                {"label": "About"}
            ],
            "cta": {"text": "Subscribe to the newsletter", "link": "https://example.com/subscribe"},
            "filter": {"heading": "Filter by topic"},
            "cards": [
                {
                    "title": "Carbon markets rally",
                    "source": "Google Alert: ESG",
                    "website": "reuters.com",
                    "link": "https://reuters.com/a",
                    "published": "2026-08-01T12:00:00Z",
                    "category": "Climate"
                }
            ]
        }"#;

        let page = Page::from_json(raw).unwrap();
        assert_eq!(page.title, "Sustain74 ESG News Feed");
        assert_eq!(page.nav.len(), 2);
        assert_eq!(page.nav[1].link, None);
        assert!(page.cta.is_some());
        assert!(page.filter.is_some());
        assert_eq!(page.cards.len(), 1);
        assert_eq!(page.cards[0].category.as_deref(), Some("Climate"));
    }

    #[test]
    fn test_parse_minimal_document() {
        let page = Page::from_json("{}").unwrap();
        assert_eq!(page.title, "News");
        assert!(page.nav.is_empty());
        assert!(page.cta.is_none());
        assert!(page.filter.is_none());
        assert!(page.cards.is_empty());
    }

    #[test]
    fn test_card_without_category() {
        let raw = r#"{"cards": [{"title": "Untagged item"}]}"#;
        let page = Page::from_json(raw).unwrap();
        assert_eq!(page.cards[0].category, None);
        assert_eq!(page.cards[0].link, None);
    }

    #[test]
    fn test_filter_heading_default() {
        let raw = r#"{"filter": {}}"#;
        let page = Page::from_json(raw).unwrap();
        assert_eq!(page.filter.unwrap().heading, "Filter by topic");
    }

    #[test]
    fn test_published_label() {
        let raw = r#"{"cards": [{"title": "x", "published": "2026-08-07T09:30:00Z"}]}"#;
        let page = Page::from_json(raw).unwrap();
        assert_eq!(page.cards[0].published_label().unwrap(), "Aug 07, 2026");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Page::from_json("{not json").unwrap_err();
        assert!(matches!(err, PageError::Parse(_)));
    }
}
