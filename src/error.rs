use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("Separator {name} has an invalid pattern: {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("Separator {0} matches the empty string")]
    EmptyMatch(String),
}

#[derive(Error, Debug)]
pub enum TagError {
    #[error("Failed to read tags from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },
    #[error("Failed to write tags to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },
    #[error("{path} has no tag to write to")]
    NoTag { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Tag(#[from] TagError),
    #[error("Refusing to overwrite existing file {0}")]
    DestinationExists(PathBuf),
    #[error("Fixture directory {0} does not exist")]
    MissingFixtures(PathBuf),
    #[error("Input directory {0} does not exist")]
    MissingInput(PathBuf),
}

pub type Result<T> = std::result::Result<T, RunError>;

/// Attach a path to an `io::Error`.
pub(crate) trait IoContext<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|source| RunError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
