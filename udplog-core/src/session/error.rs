use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LiveLogError {
    #[error("failed to create logs directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create live logfile {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write live logfile {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LiveLogError {
    /// The underlying I/O error, without the path prefix.
    pub fn io(&self) -> &std::io::Error {
        match self {
            Self::CreateDir { source, .. } | Self::Create { source, .. } | Self::Write { source, .. } => {
                source
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not copy logfile {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not save file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
