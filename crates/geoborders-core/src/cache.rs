// crates/geoborders-core/src/cache.rs
use crate::error::Result;
use crate::model::{BoundaryDataset, BoundingBox};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Application-owned holder for a loaded dataset.
///
/// The dataset is loaded on first use and then shared as an immutable
/// `Arc`; readers never lock. Invalidation needs `&mut self`, so the owner
/// decides when a reload may happen.
#[derive(Debug)]
pub struct DatasetCache {
    source: PathBuf,
    bbox: Option<BoundingBox>,
    slot: OnceCell<Arc<BoundaryDataset>>,
}

impl DatasetCache {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            bbox: None,
            slot: OnceCell::new(),
        }
    }

    /// Cache the dataset already clipped to `bbox`.
    pub fn with_bbox(source: impl Into<PathBuf>, bbox: BoundingBox) -> Self {
        Self {
            bbox: Some(bbox),
            ..Self::new(source)
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Returns the cached dataset, loading it on first call.
    pub fn get(&self) -> Result<Arc<BoundaryDataset>> {
        self.slot
            .get_or_try_init(|| self.load_fresh().map(Arc::new))
            .cloned()
    }

    /// Drops the cached dataset. Outstanding `Arc`s stay valid.
    pub fn invalidate(&mut self) {
        self.slot.take();
    }

    /// Invalidates and loads again right away.
    pub fn reload(&mut self) -> Result<Arc<BoundaryDataset>> {
        self.invalidate();
        self.get()
    }

    fn load_fresh(&self) -> Result<BoundaryDataset> {
        let dataset = BoundaryDataset::load(&self.source)?;
        let dataset = match &self.bbox {
            Some(bbox) => dataset.filter(bbox),
            None => dataset,
        };
        info!(
            source = %self.source.display(),
            units = dataset.len(),
            clipped = self.bbox.is_some(),
            "boundary dataset cached"
        );
        Ok(dataset)
    }
}
