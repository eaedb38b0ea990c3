// crates/geoborders-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (zip archive, loose shapefile, binary cache)
//! and delegates record decoding to `shapes`.

use crate::error::Result;
use crate::model::BoundaryDataset;
use std::path::Path;
use tracing::debug;

mod archive;
pub(crate) mod common_io;
mod shapes;
#[cfg(feature = "cache")]
mod standard;

#[cfg(feature = "cache")]
pub use standard::{cache_path_for, CACHE_SUFFIX};

impl BoundaryDataset {
    /// **Standard Loader:** reads a boundary layer.
    ///
    /// `path` may be a `.zip` archive holding a shapefile, a bare `.shp`
    /// (with an optional sibling `.dbf`), or a directory containing one.
    ///
    /// With the `cache` feature a binary copy is written next to the source
    /// after the first parse and reused while it is at least as new as every
    /// file the layer is read from (the archive, or the `.shp` and `.dbf`).
    /// Cache write failures are ignored.
    ///
    /// Fails with [`BorderError::SourceNotFound`](crate::BorderError::SourceNotFound)
    /// when the source or its `.shp` member is missing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = archive::resolve(path)?;

        #[cfg(feature = "cache")]
        if let Some(dataset) = standard::read_cache(path, &source.members()) {
            return Ok(dataset);
        }

        let dataset = Self::from_source(path, &source)?;

        #[cfg(feature = "cache")]
        if let Err(e) = standard::write_cache(path, &dataset) {
            debug!(source = %path.display(), error = %e, "could not write binary cache");
        }

        Ok(dataset)
    }

    /// Parses the source every time, never touching the binary cache.
    pub fn load_uncached(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::from_source(path, &archive::resolve(path)?)
    }

    fn from_source(path: &Path, source: &archive::LayerSource) -> Result<Self> {
        let layer = source.read()?;

        let geometries = shapes::decode_shapes(layer.shp)?;
        let attributes = layer.dbf.map(shapes::decode_attributes).unwrap_or_default();
        let units = shapes::build_units(geometries, attributes);

        debug!(source = %path.display(), units = units.len(), "loaded boundary dataset");
        Ok(BoundaryDataset::new(units))
    }
}
