#[cfg(feature = "fetch")]
pub mod collect;
pub mod error;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod parse;
pub mod record;
pub mod sinks;
pub mod transform;

#[cfg(feature = "fetch")]
pub use collect::{CollectConfig, Harvest, PageFailure, collect_catalog};
pub use error::{Result, VestioError};
pub use extract::{extract_cards, parse_card};
#[cfg(feature = "fetch")]
pub use fetch::{BASE_URL, FetchConfig, PageFetcher};
pub use parse::{Document, Element};
pub use record::{CardFields, Product, RawRecord};
#[cfg(feature = "csv")]
pub use sinks::csv::write_csv;
#[cfg(feature = "postgres")]
pub use sinks::postgres::{PostgresConfig, write_postgres};
#[cfg(feature = "sheets")]
pub use sinks::sheets::{SheetsConfig, write_sheet};
pub use transform::{
    NormalizeConfig, clean_gender, clean_size, finalize, normalize_records, parse_colors, parse_price, parse_rating,
    transform_records,
};
