//! Google Sheets sink, via the Sheets v4 REST API.
//!
//! The worksheet is cleared and rewritten wholesale on each run: one
//! `values:clear` call, then one `values` update with the header row and
//! every record. Authentication is a pre-acquired OAuth bearer token.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::record::Product;
use crate::sinks::COLUMNS;
use crate::{Result, VestioError};

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Settings for the spreadsheet sink.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// OAuth bearer token with spreadsheet scope.
    pub token: String,
    /// Target spreadsheet key.
    pub spreadsheet_id: String,
    /// Worksheet (tab) receiving the rows.
    pub worksheet: String,
    /// API endpoint root, overridable for tests.
    pub api_base: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl SheetsConfig {
    pub fn new(token: impl Into<String>, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: "products".to_string(),
            api_base: API_BASE.to_string(),
            timeout: 30,
        }
    }

    fn values_url(&self, suffix: &str) -> String {
        format!(
            "{}/{}/values/{}{}",
            self.api_base.trim_end_matches('/'),
            self.spreadsheet_id,
            self.worksheet,
            suffix
        )
    }
}

/// Replaces the worksheet contents with the record set.
///
/// Returns the spreadsheet URL for reporting.
pub fn write_sheet(products: &[Product], config: &SheetsConfig) -> Result<String> {
    let client = Client::builder().timeout(Duration::from_secs(config.timeout)).build()?;

    let response = client
        .post(config.values_url(":clear"))
        .bearer_auth(&config.token)
        .json(&serde_json::json!({}))
        .send()?;
    ensure_success(response)?;

    let body = serde_json::json!({ "values": sheet_rows(products) });
    let response = client
        .put(config.values_url("?valueInputOption=RAW"))
        .bearer_auth(&config.token)
        .json(&body)
        .send()?;
    ensure_success(response)?;

    Ok(format!("https://docs.google.com/spreadsheets/d/{}", config.spreadsheet_id))
}

/// Header row plus one row of cell values per record.
fn sheet_rows(products: &[Product]) -> Vec<Vec<serde_json::Value>> {
    let mut rows = Vec::with_capacity(products.len() + 1);
    rows.push(COLUMNS.iter().map(|c| serde_json::Value::from(*c)).collect());

    for p in products {
        rows.push(vec![
            serde_json::Value::from(p.title.as_str()),
            p.price.map_or(serde_json::Value::Null, serde_json::Value::from),
            p.rating.map_or(serde_json::Value::Null, serde_json::Value::from),
            serde_json::Value::from(p.colors),
            serde_json::Value::from(p.size.as_str()),
            serde_json::Value::from(p.gender.as_str()),
            serde_json::Value::from(p.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()),
        ]);
    }

    rows
}

fn ensure_success(response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let message = response.text().unwrap_or_default();
    Err(VestioError::Sheets { status: status.as_u16(), message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn product() -> Product {
        Product {
            title: "T-Shirt A".to_string(),
            price: Some(1_600_000),
            rating: Some(4.5),
            colors: 3,
            size: "M".to_string(),
            gender: "Men".to_string(),
            timestamp: NaiveDateTime::parse_from_str("2025-01-01T00:00:00", "%Y-%m-%dT%H:%M:%S").unwrap(),
        }
    }

    #[test]
    fn test_values_urls() {
        let config = SheetsConfig::new("tok", "abc123");
        assert_eq!(
            config.values_url(":clear"),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/products:clear"
        );
        assert_eq!(
            config.values_url("?valueInputOption=RAW"),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/products?valueInputOption=RAW"
        );
    }

    #[test]
    fn test_sheet_rows_header_then_cells() {
        let rows = sheet_rows(&[product()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "title");
        assert_eq!(rows[0][6], "timestamp");
        assert_eq!(rows[1][0], "T-Shirt A");
        assert_eq!(rows[1][1], 1_600_000);
        assert_eq!(rows[1][2], 4.5);
        assert_eq!(rows[1][6], "2025-01-01T00:00:00.000000");
    }

    #[test]
    fn test_sheet_rows_empty_set_is_header_only() {
        let rows = sheet_rows(&[]);
        assert_eq!(rows.len(), 1);
    }
}
