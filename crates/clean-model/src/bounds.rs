//! Filter bounds for price and location.

use serde::{Deserialize, Serialize};

/// Inclusive price window.
///
/// An inverted window (`min > max`) is accepted and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min as f64 && price <= self.max as f64
    }

    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// Inclusive longitude/latitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
}

impl GeoBounds {
    /// New York City service area.
    pub const NYC: Self = Self {
        min_longitude: -74.25,
        max_longitude: -73.50,
        min_latitude: 40.5,
        max_latitude: 41.2,
    };

    #[must_use]
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        (self.min_longitude..=self.max_longitude).contains(&longitude)
            && (self.min_latitude..=self.max_latitude).contains(&latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_range_is_inclusive() {
        let range = PriceRange::new(10, 350);
        assert!(range.contains(10.0));
        assert!(range.contains(350.0));
        assert!(range.contains(99.5));
        assert!(!range.contains(9.99));
        assert!(!range.contains(350.01));
        assert!(!range.contains(f64::NAN));
    }

    #[test]
    fn inverted_price_range_matches_nothing() {
        let range = PriceRange::new(500, 20);
        assert!(range.is_inverted());
        for price in [0.0, 20.0, 100.0, 500.0, 1000.0] {
            assert!(!range.contains(price));
        }
    }

    #[test]
    fn nyc_box_edges() {
        let nyc = GeoBounds::NYC;
        assert!(nyc.contains(-74.25, 40.5));
        assert!(nyc.contains(-73.50, 41.2));
        assert!(nyc.contains(-73.95, 40.73));
        assert!(!nyc.contains(-75.0, 40.73));
        assert!(!nyc.contains(-73.95, 41.3));
        assert!(!nyc.contains(f64::NAN, 40.73));
    }
}
