use serde::{Deserialize, Serialize};

/// Row counts observed at each cleaning stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningStats {
    pub input_rows: usize,
    pub after_price_filter: usize,
    pub after_geo_filter: usize,
    /// Retained rows whose `last_review` ended up missing.
    pub missing_last_review: usize,
}

impl CleaningStats {
    #[must_use]
    pub const fn output_rows(&self) -> usize {
        self.after_geo_filter
    }

    #[must_use]
    pub const fn dropped_rows(&self) -> usize {
        self.input_rows.saturating_sub(self.after_geo_filter)
    }
}
