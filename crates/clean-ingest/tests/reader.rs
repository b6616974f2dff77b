use std::fs;

use clean_ingest::{IngestError, read_listings};
use polars::prelude::DataType;
use tempfile::TempDir;

const LISTINGS: &str = "\
id,name,price,last_review,longitude,latitude
2539,Clean & quiet apt,149,2018-10-19,-73.97237,40.64749
2595,Skylit Midtown Castle,225,2019-05-21,-73.98377,40.75362
3647,THE VILLAGE OF HARLEM,150,,-73.9419,40.80902
";

#[test]
fn loads_every_column_as_text() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("sample.csv");
    fs::write(&path, LISTINGS).expect("write csv");

    let table = read_listings(&path).expect("read listings");
    assert_eq!(table.height(), 3);
    assert_eq!(table.columns.price, 2);
    for column in table.data.get_columns() {
        assert_eq!(column.dtype(), &DataType::String, "{}", column.name());
    }

    let longitude: Vec<Option<&str>> = table
        .data
        .column("longitude")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(
        longitude,
        vec![Some("-73.97237"), Some("-73.98377"), Some("-73.9419")]
    );

    let reviews = table.data.column("last_review").unwrap();
    assert_eq!(reviews.null_count(), 1);
}

#[test]
fn header_only_file_loads_empty() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("empty.csv");
    fs::write(&path, "price,last_review,longitude,latitude\n").expect("write csv");

    let table = read_listings(&path).expect("read listings");
    assert_eq!(table.height(), 0);
    assert_eq!(table.data.width(), 4);
}

#[test]
fn missing_column_is_reported_by_name() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("no_price.csv");
    fs::write(&path, "id,last_review,longitude,latitude\n1,,-73.9,40.7\n").expect("write csv");

    let err = read_listings(&path).unwrap_err();
    assert!(err.is_schema_error());
    assert!(
        matches!(&err, IngestError::MissingColumn { column, .. } if column == "price"),
        "{err}"
    );
}
