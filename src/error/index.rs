use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("none of the supplied search paths is a directory")]
    NoSearchDirectories,

    #[error("failed to open archive '{path}': {source}")]
    ArchiveOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read archive '{path}': {source}")]
    ArchiveRead {
        path: PathBuf,
        source: zip::result::ZipError,
    },
}

impl IndexError {
    pub fn archive_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ArchiveOpen {
            path: path.into(),
            source,
        }
    }

    pub fn archive_read(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::ArchiveRead {
            path: path.into(),
            source,
        }
    }
}
