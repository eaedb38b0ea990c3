// crates/geoborders-core/src/config.rs

//! # Pipeline Configuration
//!
//! All heuristics live here. The defaults are calibrated for a ~0.25°
//! global forecast grid; finer regional grids may want tighter cutoffs.

use crate::error::{BorderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Latitude above which (in absolute value) a ring counts as polar.
pub const DEFAULT_POLAR_LATITUDE: f64 = 85.0;
/// Longitude span above which a normalized ring counts as a wraparound artifact.
pub const DEFAULT_MAX_LONGITUDE_SPAN: f64 = 350.0;

/// Cutoffs for the degeneracy filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegeneracyThresholds {
    /// A ring is dropped when every latitude is above `+polar_latitude`,
    /// or every latitude is below `-polar_latitude`.
    pub polar_latitude: f64,
    /// A ring is dropped when `max(lon) - min(lon)` exceeds this.
    pub max_longitude_span: f64,
}

impl Default for DegeneracyThresholds {
    fn default() -> Self {
        Self {
            polar_latitude: DEFAULT_POLAR_LATITUDE,
            max_longitude_span: DEFAULT_MAX_LONGITUDE_SPAN,
        }
    }
}

/// Order in which surviving rings are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingOrder {
    /// Dataset iteration order, part order within a unit.
    #[default]
    Dataset,
    /// Stable sort by each ring's minimum longitude.
    MinLongitude,
}

/// Line appearance handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            width: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub thresholds: DegeneracyThresholds,
    /// Rewrite longitudes above 180° into `[-180, 180]` before the
    /// wraparound check.
    pub shift_longitudes: bool,
    pub ring_order: RingOrder,
    pub style: LineStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            thresholds: DegeneracyThresholds::default(),
            shift_longitudes: true,
            ring_order: RingOrder::Dataset,
            style: LineStyle::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads a JSON config file. Missing fields fall back to defaults.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            BorderError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        if !(t.polar_latitude > 0.0 && t.polar_latitude <= 90.0) {
            return Err(BorderError::Config(format!(
                "polar_latitude must be in (0, 90], got {}",
                t.polar_latitude
            )));
        }
        if !(t.max_longitude_span > 0.0 && t.max_longitude_span <= 360.0) {
            return Err(BorderError::Config(format!(
                "max_longitude_span must be in (0, 360], got {}",
                t.max_longitude_span
            )));
        }
        if !(self.style.width.is_finite() && self.style.width >= 0.0) {
            return Err(BorderError::Config(format!(
                "line width must be a non-negative number, got {}",
                self.style.width
            )));
        }
        Ok(())
    }
}
