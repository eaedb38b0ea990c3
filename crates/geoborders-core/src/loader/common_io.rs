// crates/geoborders-core/src/loader/common_io.rs
#![cfg_attr(not(feature = "cache"), allow(dead_code))]
use crate::error::{BorderError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

pub fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        BorderError::SourceNotFound(format!("{}: {}", path.display(), e))
    })
}

pub fn read_all(path: &Path) -> Result<Vec<u8>> {
    let mut reader = BufReader::new(open_file(path)?);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Opens a cache file, transparently un-gzipping it when `compact` is on.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let reader = BufReader::new(File::open(path)?);

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Ok(Box::new(reader))
    }
}

/// Counterpart of [`open_stream`]. The caller must drop the writer to flush.
pub fn create_stream(path: &Path) -> Result<Box<dyn Write>> {
    let writer = BufWriter::new(File::create(path)?);

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzEncoder::new(writer, Compression::default())))
    }

    #[cfg(not(feature = "compact"))]
    {
        Ok(Box::new(writer))
    }
}

/// `world.zip` -> `world.zip.<suffix>`, next to the source.
pub fn get_cache_path(source: &Path, suffix: &str) -> PathBuf {
    let filename = source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "boundaries".to_string());
    source.with_file_name(format!("{filename}.{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_sits_next_to_source() {
        let p = get_cache_path(Path::new("/data/ne_110m_admin_0_countries.zip"), "bin");
        assert_eq!(p, PathBuf::from("/data/ne_110m_admin_0_countries.zip.bin"));
    }

    #[test]
    fn missing_file_maps_to_source_not_found() {
        let err = read_all(Path::new("/no/such/file.shp")).unwrap_err();
        assert!(matches!(err, BorderError::SourceNotFound(_)));
    }
}
