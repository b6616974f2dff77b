use std::fs;

use clean_ingest::read_listings;
use clean_model::PriceRange;
use clean_transform::clean_listings;
use tempfile::TempDir;

fn load(contents: &str) -> (TempDir, clean_ingest::ListingTable) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("sample.csv");
    fs::write(&path, contents).expect("write csv");
    let table = read_listings(&path).expect("read listings");
    (dir, table)
}

fn prices(data: &polars::prelude::DataFrame) -> Vec<String> {
    data.column("price")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect()
}

#[test]
fn price_outliers_are_dropped() {
    let (_dir, table) = load(
        "id,price,last_review,longitude,latitude\n\
         1,10,2019-01-01,-73.9,40.7\n\
         2,50,2019-01-01,-73.9,40.7\n\
         3,200,2019-01-01,-73.9,40.7\n\
         4,999,2019-01-01,-73.9,40.7\n\
         5,5,2019-01-01,-73.9,40.7\n",
    );
    let cleaned = clean_listings(table, PriceRange::new(20, 500)).unwrap();
    assert_eq!(prices(&cleaned.data), vec!["50", "200"]);
}

#[test]
fn row_outside_box_is_dropped_even_with_good_price() {
    let (_dir, table) = load(
        "id,price,last_review,longitude,latitude\n\
         1,100,2019-01-01,-75.0,40.7\n\
         2,100,2019-01-01,-73.9,40.7\n",
    );
    let cleaned = clean_listings(table, PriceRange::new(20, 500)).unwrap();
    assert_eq!(cleaned.data.height(), 1);
    let ids: Vec<Option<&str>> = cleaned
        .data
        .column("id")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(ids, vec![Some("2")]);
}

#[test]
fn empty_review_is_kept_as_missing() {
    let (_dir, table) = load(
        "id,price,last_review,longitude,latitude\n\
         1,100,,-73.9,40.7\n",
    );
    let cleaned = clean_listings(table, PriceRange::new(20, 500)).unwrap();
    assert_eq!(cleaned.data.height(), 1);
    assert_eq!(cleaned.stats.missing_last_review, 1);
    assert_eq!(cleaned.data.column("last_review").unwrap().null_count(), 1);
}
