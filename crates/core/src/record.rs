//! Record types flowing through the pipeline.
//!
//! This module defines [`CardFields`] (one parsed product card, no
//! timestamp yet), [`RawRecord`] (a card stamped with the run timestamp)
//! and [`Product`] (the typed, validated record handed to sinks).

use chrono::NaiveDateTime;
use serde::Serialize;

/// Sentinel title for a card with no recognizable title element.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Sentinel price text for a card with no price element.
pub const PRICE_UNAVAILABLE: &str = "Price Unavailable";

/// Sentinel rating text for a card with no rating paragraph.
pub const NO_RATING: &str = "No Rating";

/// Sentinel colors text for a card with no colors paragraph.
pub const NO_COLORS: &str = "0 Colors";

/// Sentinel size text for a card with no size paragraph.
pub const UNKNOWN_SIZE: &str = "Unknown Size";

/// Sentinel gender text for a card with no gender paragraph.
pub const UNKNOWN_GENDER: &str = "Unknown Gender";

/// The six string fields recovered from one product card.
///
/// Every field is populated: extraction never fails, it falls through to
/// the per-field sentinel instead. Validity is judged later, by
/// [`finalize`](crate::transform::finalize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFields {
    pub title: String,
    pub price: String,
    pub rating: String,
    pub colors: String,
    pub size: String,
    pub gender: String,
}

impl Default for CardFields {
    fn default() -> Self {
        Self {
            title: UNKNOWN_PRODUCT.to_string(),
            price: PRICE_UNAVAILABLE.to_string(),
            rating: NO_RATING.to_string(),
            colors: NO_COLORS.to_string(),
            size: UNKNOWN_SIZE.to_string(),
            gender: UNKNOWN_GENDER.to_string(),
        }
    }
}

/// One scraped product before normalization.
///
/// The timestamp is the shared run stamp in ISO-8601 text form; every
/// record collected in one run carries the same value. Immutable once
/// created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub title: String,
    pub price: String,
    pub rating: String,
    pub colors: String,
    pub size: String,
    pub gender: String,
    pub timestamp: String,
}

impl RawRecord {
    /// Stamps extracted card fields with the run timestamp.
    pub fn stamped(fields: CardFields, timestamp: &str) -> Self {
        Self {
            title: fields.title,
            price: fields.price,
            rating: fields.rating,
            colors: fields.colors,
            size: fields.size,
            gender: fields.gender,
            timestamp: timestamp.to_string(),
        }
    }
}

/// One validated, typed product ready for persistence.
///
/// `price` and `rating` stay optional: past the extraction boundary the
/// "no data" sentinels become absent values rather than magic strings.
/// After [`finalize`](crate::transform::finalize) both are guaranteed
/// present for every surviving record.
///
/// Serializes in sink column order: title, price, rating, colors, size,
/// gender, timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub title: String,
    pub price: Option<i64>,
    pub rating: Option<f64>,
    pub colors: u32,
    pub size: String,
    pub gender: String,
    pub timestamp: NaiveDateTime,
}

/// Hashable identity over every field, used for exact-duplicate removal.
///
/// `f64` is not `Eq`; the rating participates by bit pattern, which is
/// exact equality on the value a sink would serialize.
pub(crate) type DedupKey = (String, Option<i64>, Option<u64>, u32, String, String, NaiveDateTime);

impl Product {
    pub(crate) fn dedup_key(&self) -> DedupKey {
        (
            self.title.clone(),
            self.price,
            self.rating.map(f64::to_bits),
            self.colors,
            self.size.clone(),
            self.gender.clone(),
            self.timestamp,
        )
    }
}
