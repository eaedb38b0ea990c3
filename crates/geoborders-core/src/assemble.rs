// crates/geoborders-core/src/assemble.rs

//! # Polyline Assembly
//!
//! Two output shapes for the same surviving rings:
//!
//! - **Concatenated**: one point stream with a [`PointOrBreak::Break`] after
//!   every ring. One trace to update per animation frame.
//! - **Discrete**: one [`Trace`] per ring, optionally routed to a subplot
//!   cell. For overlays drawn once per chart.
//!
//! Break markers only become `NaN`/`null` when converted for a consumer.

use crate::config::LineStyle;
use crate::model::{Point, Ring};
use serde::{Deserialize, Serialize};

/// A coordinate or a pen-up marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointOrBreak {
    Point(Point),
    Break,
}

impl PointOrBreak {
    pub fn is_break(&self) -> bool {
        matches!(self, PointOrBreak::Break)
    }
}

/// All rings as one break-delimited stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConcatenatedPolyline {
    items: Vec<PointOrBreak>,
    pub style: LineStyle,
}

impl ConcatenatedPolyline {
    pub fn items(&self) -> &[PointOrBreak] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of rings, i.e. number of break markers.
    pub fn ring_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_break()).count()
    }

    /// Parallel `xs`/`ys` with `NaN` at each break.
    pub fn to_xy_nan(&self) -> (Vec<f64>, Vec<f64>) {
        self.items
            .iter()
            .map(|item| match item {
                PointOrBreak::Point(p) => (p.lon, p.lat),
                PointOrBreak::Break => (f64::NAN, f64::NAN),
            })
            .unzip()
    }

    /// Parallel `xs`/`ys` with `None` at each break; serializes to JSON `null`.
    pub fn to_xy_nullable(&self) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
        self.items
            .iter()
            .map(|item| match item {
                PointOrBreak::Point(p) => (Some(p.lon), Some(p.lat)),
                PointOrBreak::Break => (None, None),
            })
            .unzip()
    }
}

/// A subplot grid position, 1-based like the charting surfaces use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubplotCell {
    pub row: u32,
    pub col: u32,
}

impl SubplotCell {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// One ring as an independent line trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target: Option<SubplotCell>,
    pub style: LineStyle,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Appends each ring's points followed by one break, last ring included.
///
/// Output length is `sum(ring lengths) + rings.len()`.
pub fn concatenate(rings: &[Ring], style: &LineStyle) -> ConcatenatedPolyline {
    let capacity = rings.iter().map(Ring::len).sum::<usize>() + rings.len();
    let mut items = Vec::with_capacity(capacity);
    for ring in rings {
        items.extend(ring.points().iter().copied().map(PointOrBreak::Point));
        items.push(PointOrBreak::Break);
    }
    ConcatenatedPolyline {
        items,
        style: style.clone(),
    }
}

/// One trace per ring, in ring order, all tagged with `target`.
pub fn discrete(rings: &[Ring], target: Option<SubplotCell>, style: &LineStyle) -> Vec<Trace> {
    rings
        .iter()
        .map(|ring| Trace {
            xs: ring.xs(),
            ys: ring.ys(),
            target,
            style: style.clone(),
        })
        .collect()
}
