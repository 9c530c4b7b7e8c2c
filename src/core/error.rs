//! Error type for the core layer (tag I/O, art, renaming, batch jobs).

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using the core `Error`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported audio format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("ID3 error: {0}")]
    Id3(#[from] id3::Error),

    #[error("tag error: {0}")]
    Lofty(#[from] lofty::error::LoftyError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Track mismatch: {files} file(s) selected, but the release has {tracks} track(s)")]
    TrackMismatch { files: usize, tracks: usize },

    #[error("release has no media")]
    EmptyRelease,

    #[error("cannot rename {} -> {}: {reason}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error("settings: {0}")]
    Settings(String),
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
