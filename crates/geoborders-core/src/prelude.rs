// crates/geoborders-core/src/prelude.rs
pub use crate::assemble::{ConcatenatedPolyline, PointOrBreak, SubplotCell, Trace};
pub use crate::cache::DatasetCache;
pub use crate::common::{DatasetStats, SkipStats};
pub use crate::config::{DegeneracyThresholds, LineStyle, PipelineConfig, RingOrder};
pub use crate::degeneracy::DegeneracyFilter;
pub use crate::error::{BorderError, Result};
pub use crate::model::{AdminUnit, BoundaryDataset, BoundingBox, Geometry, Point, Polygon, Ring};
pub use crate::pipeline::{Assembled, BorderPipeline, RenderMode};
pub use crate::traits::TraceSink;
