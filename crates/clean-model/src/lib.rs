pub mod artifact;
pub mod bounds;
pub mod columns;
pub mod error;
pub mod stats;

pub use artifact::{ArtifactName, ArtifactRef, ArtifactSpec, ArtifactVersion};
pub use bounds::{GeoBounds, PriceRange};
pub use columns::{LAST_REVIEW, LATITUDE, LONGITUDE, ListingColumns, PRICE, REQUIRED_COLUMNS};
pub use error::{ModelError, Result};
pub use stats::CleaningStats;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_report_dropped_rows() {
        let stats = CleaningStats {
            input_rows: 5,
            after_price_filter: 3,
            after_geo_filter: 2,
            missing_last_review: 1,
        };
        assert_eq!(stats.output_rows(), 2);
        assert_eq!(stats.dropped_rows(), 3);
    }

    #[test]
    fn stats_serialize() {
        let stats = CleaningStats::default();
        let json = serde_json::to_string(&stats).expect("serialize stats");
        let round: CleaningStats = serde_json::from_str(&json).expect("deserialize stats");
        assert_eq!(round, stats);
    }
}
