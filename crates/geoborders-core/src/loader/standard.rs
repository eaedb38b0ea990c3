// crates/geoborders-core/src/loader/standard.rs

//! Binary dataset cache: a bincode dump of the parsed dataset, written next
//! to the source so later loads skip shapefile decoding.
#![cfg(feature = "cache")]

use super::common_io::{create_stream, get_cache_path, open_stream};
use crate::error::Result;
use crate::model::BoundaryDataset;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = "bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = "bin.gz";

pub fn cache_path_for(source: &Path) -> PathBuf {
    get_cache_path(source, CACHE_SUFFIX)
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Returns the cached dataset when the cache exists, is at least as new as
/// every member file, and decodes cleanly. Anything else is a miss.
pub fn read_cache(source: &Path, members: &[&Path]) -> Option<BoundaryDataset> {
    let cache = cache_path_for(source);
    let written = modified(&cache)?;
    if !members.iter().all(|m| modified(m).is_some_and(|t| written >= t)) {
        debug!(cache = %cache.display(), "binary cache is stale");
        return None;
    }
    let reader = open_stream(&cache).ok()?;
    match bincode::deserialize_from::<_, BoundaryDataset>(reader) {
        Ok(dataset) => {
            debug!(cache = %cache.display(), units = dataset.len(), "loaded dataset from binary cache");
            Some(dataset)
        }
        Err(e) => {
            debug!(cache = %cache.display(), error = %e, "binary cache unreadable, reparsing source");
            None
        }
    }
}

pub fn write_cache(source: &Path, dataset: &BoundaryDataset) -> Result<PathBuf> {
    let cache = cache_path_for(source);
    let mut writer = create_stream(&cache)?;
    bincode::serialize_into(&mut writer, dataset)?;
    writer.flush()?;
    drop(writer);
    Ok(cache)
}
