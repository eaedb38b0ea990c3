// crates/geoborders-core/src/rings.rs
use crate::common::SkipStats;
use crate::model::{AdminUnit, Geometry, Ring};
use tracing::warn;

/// Exterior rings of one unit, in part order.
///
/// - `SinglePart` yields its outer boundary; holes are never drawn.
/// - `MultiPart` yields one ring per part.
/// - `Null`, empty and unsupported geometry yield nothing and are counted
///   in `stats`. Rings that are open or have fewer than three distinct
///   points are dropped and counted as `invalid_ring`.
pub fn extract(unit: &AdminUnit, stats: &mut SkipStats) -> Vec<Ring> {
    match &unit.geometry {
        Geometry::Unsupported(kind) => {
            warn!(kind = %kind, "skipping unsupported geometry kind");
            stats.unsupported_geometry += 1;
            Vec::new()
        }
        geometry if geometry.is_empty() => {
            stats.empty_geometry += 1;
            Vec::new()
        }
        geometry => geometry
            .parts()
            .iter()
            .filter_map(|part| {
                if part.exterior.is_valid() {
                    Some(part.exterior.clone())
                } else {
                    stats.invalid_ring += 1;
                    None
                }
            })
            .collect(),
    }
}
