// crates/geoborders-core/src/model.rs
use crate::error::{BorderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A `(longitude, latitude)` pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for Point {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

/// One simple boundary loop.
///
/// A ring is only rendered when it is closed (first point equals last point)
/// and has at least three distinct points, see [`Ring::is_valid`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Closed with at least three distinct points.
    pub fn is_valid(&self) -> bool {
        if self.points.len() < 4 || !self.is_closed() {
            return false;
        }
        let mut seen = HashSet::with_capacity(3);
        for p in &self.points {
            seen.insert((p.lon.to_bits(), p.lat.to_bits()));
            if seen.len() >= 3 {
                return true;
            }
        }
        false
    }

    /// `(min, max)` longitude, `None` for an empty ring.
    pub fn lon_range(&self) -> Option<(f64, f64)> {
        axis_range(self.points.iter().map(|p| p.lon))
    }

    /// `(min, max)` latitude, `None` for an empty ring.
    pub fn lat_range(&self) -> Option<(f64, f64)> {
        axis_range(self.points.iter().map(|p| p.lat))
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.lon).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.lat).collect()
    }
}

impl FromIterator<Point> for Ring {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromIterator<(f64, f64)> for Ring {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        iter.into_iter().map(Point::from).collect()
    }
}

fn axis_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// An area with one exterior ring and any number of holes.
///
/// Holes are kept so bounding-box intersection stays correct; they are
/// never drawn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Ring,
    #[serde(default)]
    pub interiors: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }
}

/// Geometry of one administrative unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Null shape record, or an intersection that came out empty.
    Null,
    SinglePart(Polygon),
    MultiPart(Vec<Polygon>),
    /// Any non-area shape kind (points, lines, patches). Carries the kind name.
    Unsupported(String),
}

impl Geometry {
    /// Builds `SinglePart`/`MultiPart`/`Null` from a list of parts.
    pub fn from_parts(mut parts: Vec<Polygon>) -> Self {
        parts.retain(|p| !p.is_empty());
        match parts.len() {
            0 => Geometry::Null,
            1 => Geometry::SinglePart(parts.remove(0)),
            _ => Geometry::MultiPart(parts),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Null => true,
            Geometry::SinglePart(p) => p.is_empty(),
            Geometry::MultiPart(parts) => parts.iter().all(Polygon::is_empty),
            Geometry::Unsupported(_) => false,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Geometry::Null => "Null",
            Geometry::SinglePart(_) => "Polygon",
            Geometry::MultiPart(_) => "MultiPolygon",
            Geometry::Unsupported(kind) => kind,
        }
    }

    /// Area parts in order; empty for null and unsupported geometry.
    pub fn parts(&self) -> &[Polygon] {
        match self {
            Geometry::SinglePart(p) => std::slice::from_ref(p),
            Geometry::MultiPart(parts) => parts,
            Geometry::Null | Geometry::Unsupported(_) => &[],
        }
    }
}

/// One administrative area: a geometry and its pass-through attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdminUnit {
    pub geometry: Geometry,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl AdminUnit {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attributes(geometry: Geometry, attributes: BTreeMap<String, String>) -> Self {
        Self {
            geometry,
            attributes,
        }
    }

    /// Attribute lookup, e.g. `unit.attribute("NAME")`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// An ordered, immutable collection of administrative units.
///
/// Clipping produces a new dataset; the source is never touched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryDataset {
    units: Vec<AdminUnit>,
    /// Units dropped because their geometry was null or clipped away while
    /// this dataset was produced.
    #[serde(default)]
    dropped_empty: usize,
}

impl BoundaryDataset {
    pub fn new(units: Vec<AdminUnit>) -> Self {
        Self {
            units,
            dropped_empty: 0,
        }
    }

    pub(crate) fn with_dropped(units: Vec<AdminUnit>, dropped_empty: usize) -> Self {
        Self {
            units,
            dropped_empty,
        }
    }

    pub fn units(&self) -> &[AdminUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn dropped_empty(&self) -> usize {
        self.dropped_empty
    }

    pub fn stats(&self) -> crate::common::DatasetStats {
        let mut stats = crate::common::DatasetStats {
            units: self.units.len(),
            parts: 0,
            points: 0,
        };
        for unit in &self.units {
            for part in unit.geometry.parts() {
                stats.parts += 1;
                stats.points += part.exterior.len();
            }
        }
        stats
    }
}

/// `(min_lon, min_lat, max_lon, max_lat)` in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl BoundingBox {
    /// Fails with [`BorderError::InvalidBoundingBox`] unless `min < max` on
    /// both axes. NaN bounds fail too.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self> {
        if !(min_lon < max_lon && min_lat < max_lat) {
            return Err(BorderError::InvalidBoundingBox {
                min_lon,
                min_lat,
                max_lon,
                max_lat,
            });
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// The extent of a lon/lat grid, as handed over by a gridded data source.
    pub fn from_grid(lons: &[f64], lats: &[f64]) -> Result<Self> {
        let (min_lon, max_lon) = axis_range(lons.iter().copied()).unwrap_or((f64::NAN, f64::NAN));
        let (min_lat, max_lat) = axis_range(lats.iter().copied()).unwrap_or((f64::NAN, f64::NAN));
        Self::new(min_lon, min_lat, max_lon, max_lat)
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn contains(&self, p: Point) -> bool {
        p.lon >= self.min_lon && p.lon <= self.max_lon && p.lat >= self.min_lat && p.lat <= self.max_lat
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let [min_lon, min_lat, max_lon, max_lat] = <[f64; 4]>::deserialize(deserializer)?;
        BoundingBox::new(min_lon, min_lat, max_lon, max_lat).map_err(serde::de::Error::custom)
    }
}
