//! Flat-file CSV sink.

use std::path::{Path, PathBuf};

use crate::record::Product;
use crate::Result;

/// Writes the record set to a CSV file at `path`, header first.
///
/// Columns come from the serde field order of [`Product`]. Returns the
/// path written, mirroring what a caller wants to report.
pub fn write_csv(products: &[Product], path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;

    for product in products {
        writer.serialize(product)?;
    }
    writer.flush()?;

    Ok(path.to_path_buf())
}
