// crates/geoborders-core/src/error.rs
use thiserror::Error;

/// Errors that abort a load, clip or configuration step.
///
/// Per-unit problems (null shapes, unsupported kinds, invalid or degenerate
/// rings) are never reported here; they are counted in
/// [`SkipStats`](crate::common::SkipStats) and the batch carries on.
#[derive(Debug, Error)]
pub enum BorderError {
    /// The archive, or the `.shp` member inside it, does not exist.
    #[error("boundary source not found: {0}")]
    SourceNotFound(String),

    #[error("invalid bounding box ({min_lon}, {min_lat}, {max_lon}, {max_lat}): min must be below max on both axes")]
    InvalidBoundingBox {
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    },

    #[error("zip archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The shapefile or dbase payload could not be decoded.
    #[error("failed to decode {what}: {message}")]
    Decode { what: &'static str, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cache")]
    #[error("binary cache error: {0}")]
    Cache(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BorderError {
    pub(crate) fn decode(what: &'static str, err: impl std::fmt::Display) -> Self {
        BorderError::Decode {
            what,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BorderError>;
