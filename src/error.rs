use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source file {path} does not exist")]
    MissingSource { path: PathBuf },

    #[error("failed to read table {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write table {path}: {source}")]
    WriteTable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
