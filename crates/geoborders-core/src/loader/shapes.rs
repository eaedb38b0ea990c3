// crates/geoborders-core/src/loader/shapes.rs

//! Shapefile records -> [`AdminUnit`]s.
//!
//! Shapefiles do not separate polygons from multipolygons: a record is a
//! list of rings, clockwise rings are exteriors and counter-clockwise rings
//! are holes of the exterior before them. One exterior gives a
//! `SinglePart`, several give a `MultiPart` in record order.

use crate::error::{BorderError, Result};
use crate::model::{AdminUnit, Geometry, Point, Polygon, Ring};
use dbase::FieldValue;
use shapefile::{PolygonRing, Shape, ShapeReader};
use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use tracing::warn;

pub(crate) fn decode_shapes(shp: Vec<u8>) -> Result<Vec<Geometry>> {
    let reader = ShapeReader::new(Cursor::new(shp))
        .map_err(|e| BorderError::decode("shapefile header", e))?;
    let shapes = reader
        .read()
        .map_err(|e| BorderError::decode("shapefile records", e))?;
    Ok(shapes.into_iter().map(shape_to_geometry).collect())
}

pub(crate) fn shape_to_geometry(shape: Shape) -> Geometry {
    match shape {
        Shape::NullShape => Geometry::Null,
        Shape::Polygon(p) => Geometry::from_parts(group_rings(p.rings(), |pt| Point::new(pt.x, pt.y))),
        Shape::PolygonM(p) => Geometry::from_parts(group_rings(p.rings(), |pt| Point::new(pt.x, pt.y))),
        Shape::PolygonZ(p) => Geometry::from_parts(group_rings(p.rings(), |pt| Point::new(pt.x, pt.y))),
        other => Geometry::Unsupported(format!("{:?}", other.shapetype())),
    }
}

fn group_rings<P>(rings: &[PolygonRing<P>], xy: impl Fn(&P) -> Point) -> Vec<Polygon> {
    let mut parts: Vec<Polygon> = Vec::new();
    for ring in rings {
        let points: Ring = ring.points().iter().map(&xy).collect();
        match ring {
            PolygonRing::Outer(_) => parts.push(Polygon::new(points, Vec::new())),
            PolygonRing::Inner(_) => match parts.last_mut() {
                Some(current) => current.interiors.push(points),
                // Hole before any exterior: wrong winding in the source. Keep
                // the outline rather than losing it.
                None => parts.push(Polygon::new(points, Vec::new())),
            },
        }
    }
    parts
}

/// Reads `.dbf` records as string maps. Attributes are pass-through only,
/// so a broken table is logged and yields no attributes instead of failing.
pub(crate) fn decode_attributes(dbf: Vec<u8>) -> Vec<BTreeMap<String, String>> {
    let records = dbase::Reader::new(Cursor::new(dbf)).and_then(|mut reader| reader.read());
    match records {
        Ok(records) => records
            .into_iter()
            .map(|record| {
                HashMap::<String, FieldValue>::from(record)
                    .into_iter()
                    .map(|(name, value)| (name, field_text(value)))
                    .collect()
            })
            .collect(),
        Err(e) => {
            warn!(error = %e, "attribute table unreadable, continuing without attributes");
            Vec::new()
        }
    }
}

fn field_text(value: FieldValue) -> String {
    match value {
        FieldValue::Character(Some(s)) => s,
        FieldValue::Numeric(Some(n)) => n.to_string(),
        FieldValue::Character(None) | FieldValue::Numeric(None) => String::new(),
        other => format!("{other:?}"),
    }
}

/// Pairs geometries with attribute rows by record index.
pub(crate) fn build_units(
    geometries: Vec<Geometry>,
    attributes: Vec<BTreeMap<String, String>>,
) -> Vec<AdminUnit> {
    if !attributes.is_empty() && attributes.len() != geometries.len() {
        warn!(
            shapes = geometries.len(),
            records = attributes.len(),
            "attribute rows do not line up with shapes"
        );
    }
    let mut rows = attributes.into_iter();
    geometries
        .into_iter()
        .map(|geometry| AdminUnit::with_attributes(geometry, rows.next().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<shapefile::Point> {
        coords.iter().map(|&(x, y)| shapefile::Point::new(x, y)).collect()
    }

    #[test]
    fn outer_then_inner_forms_one_part_with_a_hole() {
        let rings = vec![
            PolygonRing::Outer(pts(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)])),
            PolygonRing::Inner(pts(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)])),
        ];
        let parts = group_rings(&rings, |p| Point::new(p.x, p.y));
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].interiors.len(), 1);
        assert_eq!(parts[0].exterior.points()[1], Point::new(0.0, 10.0));
    }

    #[test]
    fn each_outer_starts_a_new_part() {
        let rings = vec![
            PolygonRing::Outer(pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)])),
            PolygonRing::Outer(pts(&[(5.0, 5.0), (5.0, 6.0), (6.0, 6.0), (5.0, 5.0)])),
        ];
        let geometry = Geometry::from_parts(group_rings(&rings, |p| Point::new(p.x, p.y)));
        assert_eq!(geometry.kind(), "MultiPolygon");
        assert_eq!(geometry.parts()[1].exterior.points()[0], Point::new(5.0, 5.0));
    }

    #[test]
    fn null_and_non_area_shapes() {
        assert_eq!(shape_to_geometry(Shape::NullShape), Geometry::Null);
        let g = shape_to_geometry(Shape::Point(shapefile::Point::new(1.0, 2.0)));
        assert!(matches!(g, Geometry::Unsupported(_)));
    }

    #[test]
    fn units_without_attribute_rows_get_empty_maps() {
        let units = build_units(vec![Geometry::Null, Geometry::Null], Vec::new());
        assert_eq!(units.len(), 2);
        assert!(units[0].attributes.is_empty());
    }
}
