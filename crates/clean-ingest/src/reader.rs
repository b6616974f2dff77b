//! Listing CSV loading.
//!
//! The header is read and validated on its own before the body is parsed,
//! so a file lacking a required column fails fast without materializing
//! any rows. The body is loaded with every column typed as text: numeric
//! interpretation belongs to the cleaning rules, and passthrough values are
//! written back exactly as they were read.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use clean_model::ListingColumns;
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// A loaded listing file together with its validated column layout.
#[derive(Debug, Clone)]
pub struct ListingTable {
    pub path: PathBuf,
    pub columns: ListingColumns,
    pub data: DataFrame,
}

impl ListingTable {
    pub fn height(&self) -> usize {
        self.data.height()
    }
}

fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Reject UTF-16 input; a UTF-8 BOM is fine.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Read only the header row.
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader.headers().map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(headers.iter().map(str::to_string).collect())
}

/// Validate that the header carries every required listing column.
pub fn validate_schema(path: &Path) -> Result<ListingColumns> {
    let headers = read_header(path)?;
    ListingColumns::locate(&headers).map_err(|err| match err {
        clean_model::ModelError::MissingColumn(column) => IngestError::MissingColumn {
            column,
            path: path.to_path_buf(),
        },
        other => IngestError::CsvParse {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })
}

/// Load a listing CSV fully into memory.
pub fn read_listings(path: &Path) -> Result<ListingTable> {
    validate_encoding(path)?;
    let columns = validate_schema(path)?;
    debug!(path = %path.display(), ?columns, "header validated");

    let data = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    info!(
        path = %path.display(),
        rows = data.height(),
        columns = data.width(),
        "listings loaded"
    );

    Ok(ListingTable {
        path: path.to_path_buf(),
        columns,
        data,
    })
}
