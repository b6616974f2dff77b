//! Row masks for the price and location rules.
//!
//! Columns hold raw text. A cell that does not parse as a finite number
//! never satisfies a range predicate, so such rows are dropped by the rule
//! that inspects that column.

use clean_model::{GeoBounds, PriceRange};
use polars::prelude::{BooleanChunked, Column, DataFrame, NewChunkedArray};

use crate::error::{Result, TransformError};

/// Parse a numeric cell; blank, non-numeric, and non-finite text is `None`.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn column_at(df: &DataFrame, index: usize) -> Result<&Column> {
    df.select_at_idx(index)
        .ok_or(TransformError::ColumnIndex { index })
}

/// Numeric view of a text column, one entry per row.
pub fn numeric_values(df: &DataFrame, index: usize) -> Result<Vec<Option<f64>>> {
    let column = column_at(df, index)?;
    let values = column
        .str()?
        .into_iter()
        .map(|cell| cell.and_then(parse_number))
        .collect();
    Ok(values)
}

/// Mask of rows whose price lies inside `range`.
pub fn price_mask(df: &DataFrame, price_index: usize, range: PriceRange) -> Result<BooleanChunked> {
    let keep: Vec<bool> = numeric_values(df, price_index)?
        .into_iter()
        .map(|price| price.is_some_and(|p| range.contains(p)))
        .collect();
    Ok(BooleanChunked::from_slice("price_mask".into(), &keep))
}

/// Mask of rows whose coordinates lie inside `bounds`.
pub fn geo_mask(
    df: &DataFrame,
    longitude_index: usize,
    latitude_index: usize,
    bounds: GeoBounds,
) -> Result<BooleanChunked> {
    let longitudes = numeric_values(df, longitude_index)?;
    let latitudes = numeric_values(df, latitude_index)?;
    let keep: Vec<bool> = longitudes
        .into_iter()
        .zip(latitudes)
        .map(|pair| match pair {
            (Some(lon), Some(lat)) => bounds.contains(lon, lat),
            _ => false,
        })
        .collect();
    Ok(BooleanChunked::from_slice("geo_mask".into(), &keep))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn text_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    fn mask_values(mask: &BooleanChunked) -> Vec<bool> {
        mask.into_iter().map(|v| v.unwrap_or(false)).collect()
    }

    #[test]
    fn parse_number_handles_text() {
        assert_eq!(parse_number("149"), Some(149.0));
        assert_eq!(parse_number(" -73.95 "), Some(-73.95));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("$149"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn price_mask_is_inclusive_and_drops_unparseable() {
        let df = text_df(vec![(
            "price",
            vec![Some("10"), Some("20"), Some("500"), Some("501"), None, Some("n/a")],
        )]);
        let mask = price_mask(&df, 0, PriceRange::new(20, 500)).unwrap();
        assert_eq!(
            mask_values(&mask),
            vec![false, true, true, false, false, false]
        );
    }

    #[test]
    fn geo_mask_requires_both_coordinates() {
        let df = text_df(vec![
            (
                "longitude",
                vec![Some("-73.95"), Some("-75.0"), None, Some("-73.50")],
            ),
            (
                "latitude",
                vec![Some("40.7"), Some("40.7"), Some("40.7"), Some("41.2")],
            ),
        ]);
        let mask = geo_mask(&df, 0, 1, GeoBounds::NYC).unwrap();
        assert_eq!(mask_values(&mask), vec![true, false, false, true]);
    }

    #[test]
    fn bad_index_is_reported() {
        let df = text_df(vec![("price", vec![Some("1")])]);
        let err = price_mask(&df, 3, PriceRange::new(0, 10)).unwrap_err();
        assert!(matches!(err, TransformError::ColumnIndex { index: 3 }));
    }
}
