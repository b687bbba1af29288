use std::io;
use std::path::PathBuf;

/// Why a txtar file could not be turned into an [`Archive`](crate::Archive).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("cannot read archive: {0}")]
    Read(#[source] io::Error),

    #[error("no file markers found")]
    NoFiles,
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to parse archive '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("{kind} {path} exists already, aborting")]
    Collision { path: PathBuf, kind: OccupiedBy },

    #[error("archive entries conflict at '{path}'")]
    EntryConflict { path: PathBuf },

    #[error("entry '{name}' does not resolve inside the destination")]
    UnsafePath { name: String },

    #[error("filesystem error at '{path}': {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{path}' after {written} entries: {source}")]
    Write {
        path: PathBuf,
        written: usize,
        #[source]
        source: io::Error,
    },
}

/// What already occupies a path during the pre-flight check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccupiedBy {
    File,
    Directory,
}

impl std::fmt::Display for OccupiedBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OccupiedBy::File => write!(f, "file"),
            OccupiedBy::Directory => write!(f, "directory"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
