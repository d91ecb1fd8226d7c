//! Product-card extraction from catalog pages.
//!
//! One listing page holds a grid of `.collection-card` fragments. Each
//! card is parsed independently with a tolerant, priority-ordered search
//! per field: every rule list falls through to a sentinel value, so
//! extraction never fails. Unparseable cards yield sentinel-filled
//! records and validity is judged later by the transform step.

use crate::parse::{Document, Element};
use crate::record::{CardFields, NO_COLORS, NO_RATING, PRICE_UNAVAILABLE, UNKNOWN_GENDER, UNKNOWN_PRODUCT, UNKNOWN_SIZE};

/// Extracts every product card on a page.
///
/// Returns one [`CardFields`] per `.collection-card` fragment, in
/// document order. A page without cards yields an empty list.
pub fn extract_cards(doc: &Document) -> Vec<CardFields> {
    doc.select(".collection-card")
        .unwrap_or_default()
        .iter()
        .map(parse_card)
        .collect()
}

/// Parses one card fragment into its six raw string fields.
pub fn parse_card(card: &Element) -> CardFields {
    let title = card
        .select_first(".product-title")
        .or_else(|| card.select_first("h3"))
        .or_else(|| card.select_first("h2"))
        .and_then(|el| text_of(&el))
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());

    let price = card
        .select_first(".price-container .price")
        .or_else(|| card.select_first(".price"))
        .and_then(|el| text_of(&el))
        .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string());

    let paragraphs = card.select("p").unwrap_or_default();

    let rating = find_rating(&paragraphs).unwrap_or_else(|| NO_RATING.to_string());

    // Colors, size and gender share the remaining paragraphs. Fragments
    // already claimed by price or rating markers are skipped; each of the
    // rest classifies into at most one field, colors checked first.
    let mut colors = NO_COLORS.to_string();
    let mut size = UNKNOWN_SIZE.to_string();
    let mut gender = UNKNOWN_GENDER.to_string();

    for p in &paragraphs {
        let Some(txt) = text_of(p) else { continue };
        let lower = txt.to_lowercase();

        if txt.contains('$') || lower.contains("rating:") || txt.contains("/5") {
            continue;
        }

        if lower.contains("color") {
            colors = txt;
        } else if lower.contains("size:") {
            size = txt;
        } else if lower.contains("gender:") {
            gender = txt;
        }
    }

    CardFields { title, price, rating, colors, size, gender }
}

/// Finds the rating paragraph: first one carrying the `Rating:` marker
/// together with an embedded space, else the first paragraph containing
/// any space at all.
fn find_rating(paragraphs: &[Element<'_>]) -> Option<String> {
    for p in paragraphs {
        let raw = p.text();
        if raw.contains("Rating:") && raw.contains(' ') {
            return text_of(p);
        }
    }

    paragraphs.iter().find(|p| p.text().contains(' ')).and_then(text_of)
}

/// Trimmed element text, or `None` when the element is effectively empty.
fn text_of(el: &Element<'_>) -> Option<String> {
    let text = el.text();
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}
