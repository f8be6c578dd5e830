use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = MaskError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON or a document missing required keys.
    #[error("invalid annotation file {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("tag '{tag}' has unrecognized color '{color}'")]
    InvalidColor { tag: String, color: String },

    #[error("{count} tags declared, at most 255 fit an 8-bit mask")]
    TooManyLabels { count: usize },

    #[error("asset '{asset}': label '{label}' is not a declared tag")]
    UnknownLabel { asset: String, label: String },

    #[error("asset '{asset}': region {index} has no tags")]
    MissingTag { asset: String, index: usize },

    #[error("asset '{asset}': region {index} has type {kind}, which is not supported")]
    UnsupportedRegion {
        asset: String,
        index: usize,
        kind: String,
    },

    #[error("asset '{asset}': polygon region {index} has {count} points, at least 3 are required")]
    InsufficientPoints {
        asset: String,
        index: usize,
        count: usize,
    },

    #[error("failed to decode mask {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: png::DecodingError,
    },

    #[error("{path:?} is not an 8-bit palettized mask ({found})")]
    NotAMask { path: PathBuf, found: String },

    #[error("failed to encode mask {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },
}

impl MaskError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
