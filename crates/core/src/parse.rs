//! HTML parsing and element selection.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! a catalog page and querying product cards with CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use vestio_core::parse::Document;
//!
//! let html = r#"<div class="collection-card"><h3>T-Shirt A</h3></div>"#;
//! let doc = Document::parse(html);
//! let cards = doc.select(".collection-card").unwrap();
//! assert_eq!(cards.len(), 1);
//! ```

use scraper::{Html, Selector};

use crate::{Result, VestioError};

/// Represents a parsed HTML document.
///
/// A Document wraps one catalog listing page and provides CSS-selector
/// queries over it.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient and never fails; malformed markup simply yields
    /// a sparser tree, which the card extractor tolerates.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`VestioError::HtmlParse`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }
}

/// A wrapper around scraper's ElementRef scoped to one node.
///
/// Element supports nested selection, so per-card field recovery can stay
/// inside the card fragment.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the concatenated text content of this element.
    ///
    /// Text nodes are joined without a separator and without trimming;
    /// callers that want clean field values trim the result.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`VestioError::HtmlParse`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first descendant matching a CSS selector.
    pub fn select_first(&self, selector: &str) -> Option<Element<'a>> {
        self.select(selector).ok()?.into_iter().next()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| VestioError::HtmlParse(format!("Invalid selector: {}", e)))
}
