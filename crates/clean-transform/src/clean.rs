//! The cleaning stage.
//!
//! Rules run in a fixed order so the logged intermediate counts are stable:
//!
//! 1. price within the requested window (inclusive)
//! 2. `last_review` parsed to a date, unparseable values become missing
//! 3. longitude/latitude within the NYC box (inclusive)
//!
//! Row order is preserved and no column is added, removed, or renamed.

use clean_ingest::ListingTable;
use clean_model::{CleaningStats, GeoBounds, ListingColumns, PriceRange};
use polars::prelude::{DataFrame, DataType, NamedFrom, Series};
use tracing::{debug, info, warn};

use crate::dates::{epoch_days, parse_review_date};
use crate::error::{Result, TransformError};
use crate::filters::{geo_mask, price_mask};

/// Cleaned listings ready to be written.
#[derive(Debug, Clone)]
pub struct CleanedListings {
    pub data: DataFrame,
    pub stats: CleaningStats,
}

/// Apply every cleaning rule to a loaded listing table.
pub fn clean_listings(table: ListingTable, price: PriceRange) -> Result<CleanedListings> {
    let ListingTable { data, columns, .. } = table;
    clean_frame(data, columns, price)
}

/// Apply every cleaning rule to a text-typed frame with known column positions.
pub fn clean_frame(
    mut df: DataFrame,
    columns: ListingColumns,
    price: PriceRange,
) -> Result<CleanedListings> {
    let input_rows = df.height();
    if price.is_inverted() {
        warn!(
            min_price = price.min,
            max_price = price.max,
            "min_price exceeds max_price; no rows can pass the price filter"
        );
    }

    info!(min_price = price.min, max_price = price.max, "drop outliers in column price");
    let mask = price_mask(&df, columns.price, price)?;
    df = df.filter(&mask)?;
    let after_price_filter = df.height();
    debug!(
        before = input_rows,
        after = after_price_filter,
        "price filter applied"
    );

    normalize_last_review(&mut df, columns.last_review)?;

    let bounds = GeoBounds::NYC;
    info!(?bounds, "restrict longitude and latitude");
    let mask = geo_mask(&df, columns.longitude, columns.latitude, bounds)?;
    df = df.filter(&mask)?;
    let after_geo_filter = df.height();
    debug!(
        before = after_price_filter,
        after = after_geo_filter,
        "location filter applied"
    );

    let missing_last_review = df
        .select_at_idx(columns.last_review)
        .ok_or(TransformError::ColumnIndex {
            index: columns.last_review,
        })?
        .null_count();

    let stats = CleaningStats {
        input_rows,
        after_price_filter,
        after_geo_filter,
        missing_last_review,
    };
    info!(
        input_rows,
        output_rows = after_geo_filter,
        missing_last_review,
        "cleaning complete"
    );
    Ok(CleanedListings { data: df, stats })
}

/// Replace the text `last_review` column, in place, with a date column.
fn normalize_last_review(df: &mut DataFrame, index: usize) -> Result<()> {
    let column = df
        .select_at_idx(index)
        .ok_or(TransformError::ColumnIndex { index })?;
    let name = column.name().clone();
    let ca = column.str()?;
    let mut unparseable = 0usize;
    let days: Vec<Option<i32>> = ca
        .into_iter()
        .map(|cell| {
            let cell = cell?;
            let parsed = parse_review_date(cell);
            if parsed.is_none() && !cell.trim().is_empty() {
                unparseable += 1;
            }
            parsed.map(epoch_days)
        })
        .collect();
    if unparseable > 0 {
        debug!(unparseable, "last_review values could not be parsed and are now missing");
    }

    let dates = Series::new(name, days).cast(&DataType::Date)?;
    df.with_column(dates)?;
    Ok(())
}
