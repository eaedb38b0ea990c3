// crates/geoborders-core/src/common.rs
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Simple aggregate statistics for a dataset.
///
/// Returned by [`BoundaryDataset::stats`](crate::model::BoundaryDataset::stats);
/// counts reflect the dataset after any clipping applied to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub units: usize,
    pub parts: usize,
    /// Exterior ring points only.
    pub points: usize,
}

/// Everything the pipeline left out, by reason.
///
/// None of these abort a batch. They are returned next to the assembled
/// output so callers and tests can tell a quiet overlay from lost data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipStats {
    /// Units whose geometry was null, or became empty after clipping.
    pub empty_geometry: usize,
    /// Units with a shape kind that is not an area feature.
    pub unsupported_geometry: usize,
    /// Rings that were open or had fewer than three distinct points.
    pub invalid_ring: usize,
    /// Rings dropped by the pole rule.
    pub polar: usize,
    /// Rings dropped by the wraparound rule.
    pub wraparound: usize,
}

impl SkipStats {
    /// Rings rejected by the degeneracy filter (pole + wraparound).
    pub fn degenerate(&self) -> usize {
        self.polar + self.wraparound
    }

    pub fn total(&self) -> usize {
        self.empty_geometry + self.unsupported_geometry + self.invalid_ring + self.degenerate()
    }
}

impl AddAssign for SkipStats {
    fn add_assign(&mut self, rhs: Self) {
        self.empty_geometry += rhs.empty_geometry;
        self.unsupported_geometry += rhs.unsupported_geometry;
        self.invalid_ring += rhs.invalid_ring;
        self.polar += rhs.polar;
        self.wraparound += rhs.wraparound;
    }
}
