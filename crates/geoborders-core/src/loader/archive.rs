// crates/geoborders-core/src/loader/archive.rs

//! Locates the `.shp` payload (and its optional `.dbf` sibling) inside a
//! zip archive, a directory, or next to a bare `.shp` path.

use super::common_io::{open_file, read_all};
use crate::error::{BorderError, Result};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// Raw bytes of one shapefile layer.
pub(crate) struct LayerFiles {
    pub shp: Vec<u8>,
    pub dbf: Option<Vec<u8>>,
}

/// Where a layer's bytes live on disk, resolved before anything is read.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LayerSource {
    Archive(PathBuf),
    Loose { shp: PathBuf, dbf: Option<PathBuf> },
}

impl LayerSource {
    /// Every file the layer is read from.
    #[cfg_attr(not(feature = "cache"), allow(dead_code))]
    pub fn members(&self) -> Vec<&Path> {
        match self {
            LayerSource::Archive(zip) => vec![zip.as_path()],
            LayerSource::Loose { shp, dbf } => std::iter::once(shp.as_path()).chain(dbf.as_deref()).collect(),
        }
    }

    pub fn read(&self) -> Result<LayerFiles> {
        match self {
            LayerSource::Archive(zip) => read_zip(zip),
            LayerSource::Loose { shp, dbf } => read_loose(shp, dbf.as_deref()),
        }
    }
}

pub(crate) fn resolve(path: &Path) -> Result<LayerSource> {
    if !path.exists() {
        return Err(BorderError::SourceNotFound(path.display().to_string()));
    }
    let shp = if path.is_dir() {
        first_shp_in(path)?
    } else if has_extension(path, "zip") {
        return Ok(LayerSource::Archive(path.to_path_buf()));
    } else {
        path.to_path_buf()
    };
    let dbf = sibling(&shp, "dbf");
    Ok(LayerSource::Loose { shp, dbf })
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
}

fn read_loose(shp_path: &Path, dbf_path: Option<&Path>) -> Result<LayerFiles> {
    let shp = read_all(shp_path)?;
    let dbf = match dbf_path {
        Some(p) => Some(read_all(p)?),
        None => None,
    };
    debug!(path = %shp_path.display(), has_dbf = dbf.is_some(), "read shapefile layer");
    Ok(LayerFiles { shp, dbf })
}

/// Case-insensitive sibling lookup, `.DBF` next to `.SHP` is common.
fn sibling(path: &Path, ext: &str) -> Option<PathBuf> {
    [ext.to_ascii_lowercase(), ext.to_ascii_uppercase()]
        .into_iter()
        .map(|e| path.with_extension(e))
        .find(|p| p.is_file())
}

fn first_shp_in(dir: &Path) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && has_extension(p, "shp"))
        .collect();
    candidates.sort();
    candidates.into_iter().next().ok_or_else(|| {
        BorderError::SourceNotFound(format!("no .shp file in {}", dir.display()))
    })
}

fn read_zip(path: &Path) -> Result<LayerFiles> {
    let file = open_file(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let names: Vec<String> = archive
        .file_names()
        .filter(|n| !n.ends_with('/') && !n.starts_with("__MACOSX"))
        .map(str::to_string)
        .collect();

    let mut shp_names: Vec<&String> = names
        .iter()
        .filter(|n| n.to_ascii_lowercase().ends_with(".shp"))
        .collect();
    shp_names.sort();

    let Some(shp_name) = shp_names.first().copied() else {
        return Err(BorderError::SourceNotFound(format!(
            "no .shp member in archive {}",
            path.display()
        )));
    };

    let stem = &shp_name[..shp_name.len() - ".shp".len()];
    let dbf_name = names
        .iter()
        .find(|n| n.len() == stem.len() + 4 && n.starts_with(stem) && n.to_ascii_lowercase().ends_with(".dbf"))
        .cloned();

    let shp = read_member(&mut archive, shp_name)?;
    let dbf = match dbf_name {
        Some(name) => Some(read_member(&mut archive, &name)?),
        None => None,
    };

    debug!(
        archive = %path.display(),
        member = %shp_name,
        has_dbf = dbf.is_some(),
        "read shapefile layer from archive"
    );

    Ok(LayerFiles { shp, dbf })
}

fn read_member<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut entry = archive.by_name(name)?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}
