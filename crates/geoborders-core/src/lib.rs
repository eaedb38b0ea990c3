// crates/geoborders-core/src/lib.rs

//! # geoborders-core
//!
//! Prepares country boundary outlines for plotting on an unprojected
//! longitude/latitude grid.
//!
//! ```no_run
//! use geoborders_core::prelude::*;
//!
//! let world = BoundaryDataset::load("data/ne_110m_admin_0_countries.zip")?;
//! let europe = world.filter(&BoundingBox::new(-25.0, 34.0, 45.0, 72.0)?);
//!
//! let pipeline = BorderPipeline::default();
//! let Assembled { output, skipped } = pipeline.concatenated(&europe);
//! let (xs, ys) = output.to_xy_nan();
//! println!("{} points, {} rings skipped", xs.len(), skipped.total());
//! # let _ = ys;
//! # Ok::<(), geoborders_core::BorderError>(())
//! ```

pub mod assemble;
pub mod cache;
pub mod clip;
pub mod common;
pub mod config;
pub mod degeneracy;
pub mod error;
pub mod loader; // The public loader
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod prelude;
pub mod rings;
pub mod traits;

// Re-exports
pub use crate::error::{BorderError, Result};
pub use model::{AdminUnit, BoundaryDataset, BoundingBox, Geometry, Point, Polygon, Ring};
pub use crate::common::{DatasetStats, SkipStats};
pub use crate::pipeline::{Assembled, BorderPipeline, RenderMode};
