//! Required listing columns and their resolved positions.
//!
//! Listings carry arbitrary passthrough columns; only the four below drive
//! the cleaning rules. Their positions are resolved once from the header so
//! a missing column surfaces before any row is processed.

use crate::error::{ModelError, Result};

pub const PRICE: &str = "price";
pub const LAST_REVIEW: &str = "last_review";
pub const LONGITUDE: &str = "longitude";
pub const LATITUDE: &str = "latitude";

/// Columns that must be present in every input file, in check order.
pub const REQUIRED_COLUMNS: [&str; 4] = [PRICE, LAST_REVIEW, LONGITUDE, LATITUDE];

/// Zero-based header positions of the required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingColumns {
    pub price: usize,
    pub last_review: usize,
    pub longitude: usize,
    pub latitude: usize,
}

impl ListingColumns {
    /// Resolve required column positions from a header row.
    ///
    /// Matching is exact after trimming whitespace and a leading BOM. The
    /// first missing column in [`REQUIRED_COLUMNS`] order is reported.
    pub fn locate<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| normalize_header(header.as_ref()) == name)
                .ok_or_else(|| ModelError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            price: find(PRICE)?,
            last_review: find(LAST_REVIEW)?,
            longitude: find(LONGITUDE)?,
            latitude: find(LATITUDE)?,
        })
    }
}

fn normalize_header(raw: &str) -> &str {
    raw.trim().trim_start_matches('\u{feff}')
}
