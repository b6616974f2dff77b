pub mod csv;
pub mod error;

pub use csv::{render_csv, write_atomic, write_listings};
pub use error::{OutputError, Result};
