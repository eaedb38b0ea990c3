// crates/geoborders-core/src/degeneracy.rs
use crate::common::SkipStats;
use crate::config::DegeneracyThresholds;
use crate::model::Ring;

/// Why a ring was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// Entirely beyond the polar latitude, north or south.
    Polar,
    /// Longitude span wider than the wraparound threshold.
    Wraparound,
}

/// Ring-level accept/reject. Run after normalization; no trimming.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DegeneracyFilter {
    thresholds: DegeneracyThresholds,
}

impl DegeneracyFilter {
    pub fn new(thresholds: DegeneracyThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> DegeneracyThresholds {
        self.thresholds
    }

    pub fn keep(&self, ring: &Ring) -> bool {
        self.classify(ring).is_none()
    }

    /// Like [`keep`](Self::keep) but records the rejection in `stats`.
    pub fn keep_counted(&self, ring: &Ring, stats: &mut SkipStats) -> bool {
        match self.classify(ring) {
            None => true,
            Some(Degeneracy::Polar) => {
                stats.polar += 1;
                false
            }
            Some(Degeneracy::Wraparound) => {
                stats.wraparound += 1;
                false
            }
        }
    }

    /// The pole rule is checked first; a ring failing both counts as polar.
    pub fn classify(&self, ring: &Ring) -> Option<Degeneracy> {
        if self.is_polar(ring) {
            return Some(Degeneracy::Polar);
        }
        if self.is_wraparound(ring) {
            return Some(Degeneracy::Wraparound);
        }
        None
    }

    fn is_polar(&self, ring: &Ring) -> bool {
        let cut = self.thresholds.polar_latitude;
        match ring.lat_range() {
            Some((lo, hi)) => lo > cut || hi < -cut,
            None => false,
        }
    }

    fn is_wraparound(&self, ring: &Ring) -> bool {
        match ring.lon_range() {
            Some((lo, hi)) => hi - lo > self.thresholds.max_longitude_span,
            None => false,
        }
    }
}
