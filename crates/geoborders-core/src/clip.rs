// crates/geoborders-core/src/clip.rs

//! Bounding-box restriction of a dataset.
//!
//! Every area geometry is replaced by its intersection with the box. Units
//! that end up empty are dropped and counted; they never stay behind as
//! null placeholders.

use crate::model::{AdminUnit, BoundaryDataset, BoundingBox, Geometry, Point, Polygon, Ring};
use geo::{BooleanOps, Coord, LineString, MultiPolygon, Rect};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl BoundaryDataset {
    /// Returns a new dataset restricted to `bbox`. `self` is left untouched.
    ///
    /// Geometry kinds that are not areas pass through unchanged so the ring
    /// extractor can count them.
    pub fn filter(&self, bbox: &BoundingBox) -> BoundaryDataset {
        let window = window_polygon(bbox);
        let clipped = clip_units(self.units(), bbox, &window);

        let before = self.len();
        let units: Vec<AdminUnit> = clipped.into_iter().flatten().collect();
        let dropped = before - units.len();

        debug!(
            kept = units.len(),
            dropped,
            min_lon = bbox.min_lon(),
            min_lat = bbox.min_lat(),
            max_lon = bbox.max_lon(),
            max_lat = bbox.max_lat(),
            "clipped dataset to bounding box"
        );

        BoundaryDataset::with_dropped(units, self.dropped_empty() + dropped)
    }
}

#[cfg(feature = "parallel")]
fn clip_units(units: &[AdminUnit], bbox: &BoundingBox, window: &MultiPolygon<f64>) -> Vec<Option<AdminUnit>> {
    units.par_iter().map(|u| clip_unit(u, bbox, window)).collect()
}

#[cfg(not(feature = "parallel"))]
fn clip_units(units: &[AdminUnit], bbox: &BoundingBox, window: &MultiPolygon<f64>) -> Vec<Option<AdminUnit>> {
    units.iter().map(|u| clip_unit(u, bbox, window)).collect()
}

fn window_polygon(bbox: &BoundingBox) -> MultiPolygon<f64> {
    let rect = Rect::new(
        Coord { x: bbox.min_lon(), y: bbox.min_lat() },
        Coord { x: bbox.max_lon(), y: bbox.max_lat() },
    );
    MultiPolygon::new(vec![rect.to_polygon()])
}

fn clip_unit(unit: &AdminUnit, bbox: &BoundingBox, window: &MultiPolygon<f64>) -> Option<AdminUnit> {
    let geometry = match &unit.geometry {
        Geometry::Null => return None,
        Geometry::Unsupported(_) => return Some(unit.clone()),
        g @ (Geometry::SinglePart(_) | Geometry::MultiPart(_)) => clip_geometry(g, bbox, window),
    };
    if geometry.is_empty() {
        return None;
    }
    Some(AdminUnit::with_attributes(geometry, unit.attributes.clone()))
}

fn clip_geometry(geometry: &Geometry, bbox: &BoundingBox, window: &MultiPolygon<f64>) -> Geometry {
    let Some((lo, hi)) = extent(geometry.parts()) else {
        return Geometry::Null;
    };
    if lo.x >= bbox.min_lon() && hi.x <= bbox.max_lon() && lo.y >= bbox.min_lat() && hi.y <= bbox.max_lat() {
        // Fully inside: keep the original vertex order.
        return geometry.clone();
    }
    if !overlaps(lo, hi, bbox) {
        return Geometry::Null;
    }

    // Invalid exteriors are never handed to the boolean op, which would
    // close and repair them. They stay as-is for the extractor to count.
    let (valid, invalid): (Vec<&Polygon>, Vec<&Polygon>) =
        geometry.parts().iter().partition(|p| p.exterior.is_valid());

    let mut parts = from_geo(to_geo(valid).intersection(window));
    parts.extend(
        invalid
            .into_iter()
            .filter(|p| extent(std::slice::from_ref(*p)).is_some_and(|(lo, hi)| overlaps(lo, hi, bbox)))
            .cloned(),
    );
    Geometry::from_parts(parts)
}

/// Lower-left and upper-right corner over every exterior point.
fn extent(parts: &[Polygon]) -> Option<(Coord<f64>, Coord<f64>)> {
    let mut points = parts.iter().flat_map(|p| p.exterior.points().iter());
    let first = points.next()?;
    let init = (Coord { x: first.lon, y: first.lat }, Coord { x: first.lon, y: first.lat });
    Some(points.fold(init, |(lo, hi), p| {
        (
            Coord { x: lo.x.min(p.lon), y: lo.y.min(p.lat) },
            Coord { x: hi.x.max(p.lon), y: hi.y.max(p.lat) },
        )
    }))
}

fn overlaps(lo: Coord<f64>, hi: Coord<f64>, bbox: &BoundingBox) -> bool {
    hi.x >= bbox.min_lon() && lo.x <= bbox.max_lon() && hi.y >= bbox.min_lat() && lo.y <= bbox.max_lat()
}

fn ring_to_geo(ring: &Ring) -> LineString<f64> {
    ring.points()
        .iter()
        .map(|p| Coord { x: p.lon, y: p.lat })
        .collect::<Vec<_>>()
        .into()
}

fn ring_from_geo(line: &LineString<f64>) -> Ring {
    line.coords().map(|c| Point::new(c.x, c.y)).collect()
}

fn to_geo(parts: Vec<&Polygon>) -> MultiPolygon<f64> {
    MultiPolygon::new(
        parts
            .into_iter()
            .map(|p| {
                geo::Polygon::new(
                    ring_to_geo(&p.exterior),
                    p.interiors.iter().map(ring_to_geo).collect(),
                )
            })
            .collect(),
    )
}

/// Degenerate slivers in the result are kept; the extractor counts them as
/// invalid rings.
fn from_geo(shape: MultiPolygon<f64>) -> Vec<Polygon> {
    shape
        .0
        .iter()
        .map(|p| {
            Polygon::new(
                ring_from_geo(p.exterior()),
                p.interiors().iter().map(ring_from_geo).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SkipStats;
    use crate::rings::extract;

    fn rect_unit(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> AdminUnit {
        let ring: Ring = [
            (min_lon, min_lat),
            (min_lon, max_lat),
            (max_lon, max_lat),
            (max_lon, min_lat),
            (min_lon, min_lat),
        ]
        .into_iter()
        .collect();
        AdminUnit::new(Geometry::SinglePart(Polygon::new(ring, vec![])))
    }

    fn all_points(ds: &BoundaryDataset) -> Vec<Point> {
        ds.units()
            .iter()
            .flat_map(|u| u.geometry.parts().iter())
            .flat_map(|p| p.exterior.points().iter().copied())
            .collect()
    }

    #[test]
    fn western_half_of_a_globe_spanning_unit() {
        let ds = BoundaryDataset::new(vec![rect_unit(-180.0, -60.0, 180.0, 60.0)]);
        let west = BoundingBox::new(-180.0, -90.0, 0.0, 90.0).unwrap();

        let clipped = ds.filter(&west);
        assert_eq!(clipped.len(), 1);
        let pts = all_points(&clipped);
        assert!(!pts.is_empty());
        assert!(pts.iter().all(|p| p.lon <= 1e-9 && p.lon >= -180.0 - 1e-9));
        assert!(pts.iter().any(|p| (p.lon - 0.0).abs() < 1e-9));
        assert!(pts.iter().any(|p| (p.lon + 180.0).abs() < 1e-9));

        // The source dataset is untouched.
        assert_eq!(all_points(&ds).len(), 5);
    }

    #[test]
    fn units_outside_the_box_are_absent() {
        let ds = BoundaryDataset::new(vec![
            rect_unit(10.0, 50.0, 20.0, 60.0),
            rect_unit(100.0, -10.0, 110.0, 0.0),
        ]);
        let europe = BoundingBox::new(-10.0, 35.0, 40.0, 72.0).unwrap();
        let clipped = ds.filter(&europe);
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped.dropped_empty(), 1);
        assert!(all_points(&clipped).iter().all(|p| europe.contains(*p)));
    }

    #[test]
    fn contained_unit_keeps_vertex_order() {
        let unit = rect_unit(10.0, 50.0, 20.0, 60.0);
        let ds = BoundaryDataset::new(vec![unit.clone()]);
        let clipped = ds.filter(&BoundingBox::new(0.0, 40.0, 30.0, 70.0).unwrap());
        assert_eq!(clipped.units()[0], unit);
    }

    #[test]
    fn null_geometry_is_dropped_and_unsupported_passes_through() {
        let ds = BoundaryDataset::new(vec![
            AdminUnit::new(Geometry::Null),
            AdminUnit::new(Geometry::Unsupported("Polyline".into())),
        ]);
        let clipped = ds.filter(&BoundingBox::new(-1.0, -1.0, 1.0, 1.0).unwrap());
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped.dropped_empty(), 1);
        assert!(matches!(clipped.units()[0].geometry, Geometry::Unsupported(_)));
    }

    #[test]
    fn partially_covered_multi_part_keeps_only_overlapping_parts() {
        let a = rect_unit(0.0, 0.0, 10.0, 10.0);
        let b = rect_unit(50.0, 0.0, 60.0, 10.0);
        let parts = [a, b]
            .into_iter()
            .flat_map(|u| u.geometry.parts().to_vec())
            .collect();
        let ds = BoundaryDataset::new(vec![AdminUnit::new(Geometry::MultiPart(parts))]);

        let clipped = ds.filter(&BoundingBox::new(-5.0, -5.0, 5.0, 5.0).unwrap());
        assert_eq!(clipped.len(), 1);
        assert!(matches!(clipped.units()[0].geometry, Geometry::SinglePart(_)));
        assert!(all_points(&clipped).iter().all(|p| p.lon <= 5.0 + 1e-9 && p.lat <= 5.0 + 1e-9));
    }

    fn open_square() -> AdminUnit {
        let ring: Ring = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)].into_iter().collect();
        AdminUnit::new(Geometry::SinglePart(Polygon::new(ring, vec![])))
    }

    #[test]
    fn open_ring_is_skipped_wherever_the_box_falls() {
        let ds = BoundaryDataset::new(vec![open_square()]);
        let inside = ds.filter(&BoundingBox::new(-20.0, -20.0, 20.0, 20.0).unwrap());
        let partial = ds.filter(&BoundingBox::new(5.0, -20.0, 20.0, 20.0).unwrap());
        assert_eq!(partial.units(), ds.units());

        for clipped in [inside, partial] {
            let mut stats = SkipStats::default();
            let rings: Vec<Ring> = clipped.units().iter().flat_map(|u| extract(u, &mut stats)).collect();
            assert!(rings.is_empty());
            assert_eq!(stats.invalid_ring, 1);
        }
    }

    #[test]
    fn open_part_outside_the_box_is_dropped_with_its_neighbours_clipped() {
        let far: Ring = [(50.0, 50.0), (50.0, 60.0), (60.0, 60.0)].into_iter().collect();
        let mut parts = rect_unit(0.0, 0.0, 10.0, 10.0).geometry.parts().to_vec();
        parts.push(Polygon::new(far, vec![]));
        let ds = BoundaryDataset::new(vec![AdminUnit::new(Geometry::MultiPart(parts))]);

        let clipped = ds.filter(&BoundingBox::new(5.0, -20.0, 20.0, 20.0).unwrap());
        assert!(matches!(clipped.units()[0].geometry, Geometry::SinglePart(_)));
        assert!(all_points(&clipped).iter().all(|p| p.lon >= 5.0 - 1e-9));
    }

    #[test]
    fn degenerate_intersection_parts_reach_the_extractor() {
        let sliver = geo::Polygon::new(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]), vec![]);
        let parts = from_geo(MultiPolygon::new(vec![sliver]));
        assert_eq!(parts.len(), 1);

        let mut stats = SkipStats::default();
        let unit = AdminUnit::new(Geometry::from_parts(parts));
        assert!(extract(&unit, &mut stats).is_empty());
        assert_eq!(stats.invalid_ring, 1);
    }
}
