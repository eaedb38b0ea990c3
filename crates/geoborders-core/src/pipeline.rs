// crates/geoborders-core/src/pipeline.rs

//! # Border Pipeline
//!
//! `BoundaryDataset` → extract → normalize → degeneracy filter → assemble.
//!
//! Per-unit work is independent. With the `parallel` feature it runs on
//! rayon; results are always gathered back in dataset order, so output is
//! identical either way.

use crate::assemble::{self, ConcatenatedPolyline, SubplotCell, Trace};
use crate::common::SkipStats;
use crate::config::{PipelineConfig, RingOrder};
use crate::degeneracy::DegeneracyFilter;
use crate::error::Result;
use crate::model::{AdminUnit, BoundaryDataset, Ring};
use crate::normalize::{normalize, sort_by_min_longitude};
use crate::rings::extract;
use crate::traits::TraceSink;
use serde::Serialize;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An assembled value plus everything that was left out of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assembled<T> {
    pub output: T,
    pub skipped: SkipStats,
}

/// Which output shape to hand to a [`TraceSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// One break-delimited trace, cheap to push every frame.
    Concatenated,
    /// One trace per ring, optionally routed to a subplot cell.
    Discrete { target: Option<SubplotCell> },
}

#[derive(Debug, Clone, Default)]
pub struct BorderPipeline {
    config: PipelineConfig,
    filter: DegeneracyFilter,
}

impl BorderPipeline {
    /// Validates `config` and builds a pipeline from it.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let filter = DegeneracyFilter::new(config.thresholds);
        Ok(Self { config, filter })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The surviving rings, normalized, in emission order.
    pub fn rings(&self, dataset: &BoundaryDataset) -> Assembled<Vec<Ring>> {
        let per_unit = self.map_units(dataset.units());

        let mut skipped = SkipStats {
            empty_geometry: dataset.dropped_empty(),
            ..SkipStats::default()
        };
        let mut rings = Vec::new();
        for (unit_rings, unit_skipped) in per_unit {
            rings.extend(unit_rings);
            skipped += unit_skipped;
        }

        if self.config.ring_order == RingOrder::MinLongitude {
            sort_by_min_longitude(&mut rings);
        }

        debug!(
            units = dataset.len(),
            rings = rings.len(),
            empty = skipped.empty_geometry,
            unsupported = skipped.unsupported_geometry,
            invalid = skipped.invalid_ring,
            polar = skipped.polar,
            wraparound = skipped.wraparound,
            "extracted border rings"
        );

        Assembled {
            output: rings,
            skipped,
        }
    }

    /// All surviving rings as one break-delimited polyline.
    pub fn concatenated(&self, dataset: &BoundaryDataset) -> Assembled<ConcatenatedPolyline> {
        let Assembled { output, skipped } = self.rings(dataset);
        Assembled {
            output: assemble::concatenate(&output, &self.config.style),
            skipped,
        }
    }

    /// One trace per surviving ring, each tagged with `target`.
    pub fn discrete(&self, dataset: &BoundaryDataset, target: Option<SubplotCell>) -> Assembled<Vec<Trace>> {
        let Assembled { output, skipped } = self.rings(dataset);
        Assembled {
            output: assemble::discrete(&output, target, &self.config.style),
            skipped,
        }
    }

    /// Builds the full result for `mode`, then hands it to `sink`.
    pub fn draw<S: TraceSink>(&self, dataset: &BoundaryDataset, mode: RenderMode, mut sink: S) -> SkipStats {
        match mode {
            RenderMode::Concatenated => {
                let Assembled { output, skipped } = self.concatenated(dataset);
                sink.add_polyline(output);
                skipped
            }
            RenderMode::Discrete { target } => {
                let Assembled { output, skipped } = self.discrete(dataset, target);
                for trace in output {
                    sink.add_trace(trace);
                }
                skipped
            }
        }
    }

    fn unit_rings(&self, unit: &AdminUnit) -> (Vec<Ring>, SkipStats) {
        let mut skipped = SkipStats::default();
        let extracted = extract(unit, &mut skipped);
        let rings: Vec<Ring> = extracted
            .into_iter()
            .map(|ring| {
                if self.config.shift_longitudes {
                    normalize(&ring)
                } else {
                    ring
                }
            })
            .filter(|ring| self.filter.keep_counted(ring, &mut skipped))
            .collect();
        (rings, skipped)
    }

    #[cfg(feature = "parallel")]
    fn map_units(&self, units: &[AdminUnit]) -> Vec<(Vec<Ring>, SkipStats)> {
        units.par_iter().map(|u| self.unit_rings(u)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn map_units(&self, units: &[AdminUnit]) -> Vec<(Vec<Ring>, SkipStats)> {
        units.iter().map(|u| self.unit_rings(u)).collect()
    }
}
