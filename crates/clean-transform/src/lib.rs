pub mod clean;
pub mod dates;
pub mod error;
pub mod filters;

pub use clean::{CleanedListings, clean_frame, clean_listings};
pub use dates::{epoch_days, parse_review_date};
pub use error::{Result, TransformError};
pub use filters::{geo_mask, numeric_values, parse_number, price_mask};
