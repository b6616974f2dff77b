use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("column at position {index} is missing from the frame")]
    ColumnIndex { index: usize },
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
