use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("reference image {name} not found in {}", dir.display())]
    ReferenceNotFound { name: String, dir: PathBuf },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl NormalizeError {
    /// Only a missing reference stops a run; everything else is per file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, NormalizeError::ReferenceNotFound { .. })
    }
}
