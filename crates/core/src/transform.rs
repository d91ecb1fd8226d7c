//! Field normalization, validity filtering and deduplication.
//!
//! Normalization turns the raw string fields into typed values. Every
//! per-field function is total: malformed input flows forward as a
//! default or an absent value and is judged centrally by [`finalize`],
//! the only function here that fails on data grounds.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::record::{Product, RawRecord, UNKNOWN_PRODUCT};
use crate::{Result, VestioError};

/// Format accepted for the raw-record run timestamp; the fractional part
/// is optional.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\s*([\d,]+(?:\.\d+)?)").unwrap());
static RATING_OVER_FIVE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+\.\d+)\s*/\s*5").unwrap());
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)").unwrap());
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").unwrap());

/// Settings for field normalization.
///
/// The exchange rate is explicit configuration rather than a hidden
/// constant so the conversion stays testable and swappable.
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Source-currency to target-currency multiplier.
    pub exchange_rate: f64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self { exchange_rate: 16_000.0 }
    }
}

/// Parses a `$`-formatted price into a target-currency integer amount.
///
/// Thousands separators are tolerated; the number is multiplied by the
/// exchange rate and rounded to the nearest integer. Empty text, an
/// "Unavailable" marker, or the absence of any price pattern all yield
/// `None`.
pub fn parse_price(text: &str, exchange_rate: f64) -> Option<i64> {
    if text.is_empty() || text.contains("Unavailable") {
        return None;
    }

    let caps = PRICE_RE.captures(text)?;
    let amount: f64 = caps[1].replace(',', "").parse().ok()?;
    Some((amount * exchange_rate).round() as i64)
}

/// Parses a rating out of loosely formatted text.
///
/// `None` only for the explicit "Invalid Rating" marker, which signals
/// deliberately malformed source data. Everything else resolves to a
/// value: the `D.D/5` pattern wins, then any bare number within `[0, 5]`,
/// and all remaining shapes (including the "No Rating" sentinel and empty
/// text) collapse to 0.0.
pub fn parse_rating(text: &str) -> Option<f64> {
    if text.is_empty() {
        return Some(0.0);
    }
    if text.contains("Invalid Rating") {
        return None;
    }
    if text.contains("No Rating") {
        return Some(0.0);
    }

    if let Some(caps) = RATING_OVER_FIVE_RE.captures(text) {
        return caps[1].parse().ok();
    }

    if let Some(caps) = NUMBER_RE.captures(text) {
        if let Ok(value) = caps[1].parse::<f64>() {
            if 0.0 <= value && value <= 5.0 {
                return Some(value);
            }
        }
    }

    Some(0.0)
}

/// Parses a color count: the first digit run, defaulting to 1 when the
/// text is empty or carries no digits.
pub fn parse_colors(text: &str) -> u32 {
    DIGITS_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(1)
}

/// Strips a leading `Size:` label (with or without a following space) and
/// surrounding whitespace. Empty input defaults to "M".
pub fn clean_size(text: &str) -> String {
    clean_labeled(text, "Size:", "M")
}

/// Strips a leading `Gender:` label and surrounding whitespace. Empty
/// input defaults to "Unisex".
pub fn clean_gender(text: &str) -> String {
    clean_labeled(text, "Gender:", "Unisex")
}

fn clean_labeled(text: &str, label: &str, default: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return default.to_string();
    }
    let stripped = trimmed.strip_prefix(label).unwrap_or(trimmed);
    stripped.trim().to_string()
}

/// Normalizes a batch of raw records into typed products.
///
/// Applied field-wise per record; the shared run timestamp is parsed into
/// a structured date-time here, and a malformed stamp is the only way
/// this function fails.
pub fn normalize_records(records: &[RawRecord], config: &NormalizeConfig) -> Result<Vec<Product>> {
    records.iter().map(|record| normalize(record, config)).collect()
}

fn normalize(record: &RawRecord, config: &NormalizeConfig) -> Result<Product> {
    let timestamp = NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT).map_err(|source| {
        VestioError::Timestamp { value: record.timestamp.clone(), source }
    })?;

    Ok(Product {
        title: record.title.clone(),
        price: parse_price(&record.price, config.exchange_rate),
        rating: parse_rating(&record.rating),
        colors: parse_colors(&record.colors),
        size: clean_size(&record.size),
        gender: clean_gender(&record.gender),
        timestamp,
    })
}

/// Filters, defaults and deduplicates a normalized batch.
///
/// Steps, in order: reject records whose title is the unknown sentinel or
/// whose price/rating is absent; fill remaining gaps with defaults;
/// remove rows that are exact duplicates across every field, keeping the
/// first occurrence. Fails with [`VestioError::EmptyBatch`] on empty
/// input and [`VestioError::NoValidRecords`] when nothing survives.
/// Idempotent on its own output.
pub fn finalize(products: Vec<Product>) -> Result<Vec<Product>> {
    if products.is_empty() {
        return Err(VestioError::EmptyBatch);
    }

    let mut retained: Vec<Product> = products
        .into_iter()
        .filter(|p| p.title != UNKNOWN_PRODUCT && p.price.is_some() && p.rating.is_some())
        .collect();

    for product in &mut retained {
        // The rating arm is unreachable under the filter above; it stays
        // so a relaxed filter cannot leak a gap downstream.
        product.rating.get_or_insert(0.0);
        if product.colors == 0 {
            product.colors = 1;
        }
        if product.size.trim().is_empty() {
            product.size = "M".to_string();
        }
        if product.gender.trim().is_empty() {
            product.gender = "Unisex".to_string();
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(retained.len());
    for product in retained {
        if seen.insert(product.dedup_key()) {
            out.push(product);
        }
    }

    if out.is_empty() {
        return Err(VestioError::NoValidRecords);
    }

    Ok(out)
}

/// Normalizes then finalizes a raw batch: the whole transform stage.
pub fn transform_records(records: &[RawRecord], config: &NormalizeConfig) -> Result<Vec<Product>> {
    finalize(normalize_records(records, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RATE: f64 = 16_000.0;

    fn raw(title: &str, price: &str, rating: &str) -> RawRecord {
        RawRecord {
            title: title.to_string(),
            price: price.to_string(),
            rating: rating.to_string(),
            colors: "3 Colors".to_string(),
            size: "Size: M".to_string(),
            gender: "Gender: Men".to_string(),
            timestamp: "2025-01-01T00:00:00".to_string(),
        }
    }

    #[rstest]
    #[case("$100.00", Some(1_600_000))]
    #[case("$50.50", Some(808_000))]
    #[case("$1,250.00", Some(20_000_000))]
    #[case("$ 10", Some(160_000))]
    #[case("Price Unavailable", None)]
    #[case("", None)]
    #[case("ten dollars", None)]
    fn test_parse_price(#[case] text: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_price(text, RATE), expected);
    }

    #[test]
    fn test_parse_price_rounds_with_custom_rate() {
        assert_eq!(parse_price("$0.99", 3.0), Some(3));
    }

    #[rstest]
    #[case("Rating: 4.5/5", Some(4.5))]
    #[case("Rating:  4.5 / 5", Some(4.5))]
    #[case("4.8/5", Some(4.8))]
    #[case("No Rating", Some(0.0))]
    #[case("Invalid Rating", None)]
    #[case("", Some(0.0))]
    #[case("Rating: 3", Some(3.0))]
    #[case("Rating: 7", Some(0.0))]
    #[case("stars galore", Some(0.0))]
    fn test_parse_rating(#[case] text: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_rating(text), expected);
    }

    #[rstest]
    #[case("3 Colors", 3)]
    #[case("1 Color", 1)]
    #[case("No Colors", 1)]
    #[case("", 1)]
    fn test_parse_colors(#[case] text: &str, #[case] expected: u32) {
        assert_eq!(parse_colors(text), expected);
    }

    #[rstest]
    #[case("Size: M", "M")]
    #[case("Size:L", "L")]
    #[case("", "M")]
    #[case("XL", "XL")]
    fn test_clean_size(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(clean_size(text), expected);
    }

    #[rstest]
    #[case("Gender: Men", "Men")]
    #[case("Gender:Women", "Women")]
    #[case("", "Unisex")]
    fn test_clean_gender(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(clean_gender(text), expected);
    }

    #[test]
    fn test_normalize_record_types_every_field() {
        let products = normalize_records(&[raw("Test Product", "$100.00", "Rating:  4.5 / 5")], &NormalizeConfig::default())
            .unwrap();
        let got = &products[0];
        assert_eq!(got.price, Some(1_600_000));
        assert_eq!(got.rating, Some(4.5));
        assert_eq!(got.colors, 3);
        assert_eq!(got.size, "M");
        assert_eq!(got.gender, "Men");
        assert_eq!(got.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(), "2025-01-01T00:00:00");
    }

    #[test]
    fn test_normalize_rejects_malformed_timestamp() {
        let mut record = raw("Test Product", "$100.00", "Rating: 4.5/5");
        record.timestamp = "yesterday".to_string();
        let err = normalize_records(&[record], &NormalizeConfig::default()).unwrap_err();
        assert!(matches!(err, VestioError::Timestamp { .. }));
    }

    #[test]
    fn test_transform_keeps_only_valid_titles() {
        let records = [
            raw(UNKNOWN_PRODUCT, "$100.00", "Rating:  4.5 / 5"),
            raw("Valid Product", "$50.00", "Rating:  3.8 / 5"),
        ];
        let out = transform_records(&records, &NormalizeConfig::default()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Valid Product");
    }

    #[test]
    fn test_transform_drops_unavailable_price_and_invalid_rating() {
        let records = [
            raw("No Price", "Price Unavailable", "Rating: 4.0/5"),
            raw("Bad Rating", "$10.00", "Invalid Rating"),
            raw("Keeper", "$10.00", "Rating: 4.0/5"),
        ];
        let out = transform_records(&records, &NormalizeConfig::default()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Keeper");
    }

    #[test]
    fn test_finalize_dedups_exact_rows_preserving_order() {
        let records = [
            raw("First", "$10.00", "Rating: 4.0/5"),
            raw("Second", "$20.00", "Rating: 3.0/5"),
            raw("First", "$10.00", "Rating: 4.0/5"),
        ];
        let out = transform_records(&records, &NormalizeConfig::default()).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "First");
        assert_eq!(out[1].title, "Second");
    }

    #[test]
    fn test_finalize_keeps_near_duplicates() {
        let mut a = raw("Same", "$10.00", "Rating: 4.0/5");
        a.size = "Size: L".to_string();
        let records = [raw("Same", "$10.00", "Rating: 4.0/5"), a];
        let out = transform_records(&records, &NormalizeConfig::default()).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let records = [
            raw("First", "$10.00", "Rating: 4.0/5"),
            raw("First", "$10.00", "Rating: 4.0/5"),
            raw("Second", "$20.00", "No Rating"),
        ];
        let once = transform_records(&records, &NormalizeConfig::default()).unwrap();
        let twice = finalize(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_finalize_empty_input() {
        assert!(matches!(finalize(Vec::new()), Err(VestioError::EmptyBatch)));
    }

    #[test]
    fn test_finalize_nothing_survives() {
        let records = [raw(UNKNOWN_PRODUCT, "$100.00", "Rating: 4.5/5")];
        let products = normalize_records(&records, &NormalizeConfig::default()).unwrap();
        assert!(matches!(finalize(products), Err(VestioError::NoValidRecords)));
    }

    #[test]
    fn test_finalize_defaults_zero_colors() {
        let mut record = raw("Zero Colors", "$10.00", "Rating: 4.0/5");
        record.colors = "0 Colors".to_string();
        let out = transform_records(&[record], &NormalizeConfig::default()).unwrap();
        assert_eq!(out[0].colors, 1);
    }
}
