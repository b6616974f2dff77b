pub mod error;
pub mod reader;

pub use error::{IngestError, Result};
pub use reader::{ListingTable, read_header, read_listings, validate_encoding, validate_schema};
