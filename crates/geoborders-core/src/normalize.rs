// crates/geoborders-core/src/normalize.rs
use crate::model::{Point, Ring};
use std::cmp::Ordering;

/// Moves longitudes above 180° into `[-180, 180]` by subtracting 360.
///
/// Point order and count are preserved. Applying it twice changes nothing.
pub fn normalize(ring: &Ring) -> Ring {
    ring.points().iter().map(|&p| shift(p)).collect()
}

#[inline]
fn shift(p: Point) -> Point {
    if p.lon > 180.0 {
        Point::new(p.lon - 360.0, p.lat)
    } else {
        p
    }
}

/// Stable sort of rings by their minimum longitude. Presentation only; the
/// rings themselves are not touched.
pub fn sort_by_min_longitude(rings: &mut [Ring]) {
    rings.sort_by(|a, b| {
        let ka = a.lon_range().map_or(f64::INFINITY, |(lo, _)| lo);
        let kb = b.lon_range().map_or(f64::INFINITY, |(lo, _)| lo);
        ka.partial_cmp(&kb).unwrap_or(Ordering::Equal)
    });
}
