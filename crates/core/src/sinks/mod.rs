//! Persistence sinks for the final record set.
//!
//! Every sink writes the same columns in the same order: title, price,
//! rating, colors, size, gender, timestamp. Sinks are independent; the
//! caller decides which to run and a failure in one must not abort the
//! others.

#[cfg(feature = "csv")]
pub mod csv;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sheets")]
pub mod sheets;

/// Sink column names, in write order.
pub const COLUMNS: [&str; 7] = ["title", "price", "rating", "colors", "size", "gender", "timestamp"];
