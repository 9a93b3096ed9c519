//! Error types for document I/O

use std::io;
use std::path::PathBuf;

/// Error type for loading and saving documents
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("could not open file `{}`: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read source: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write sink: {0}")]
    Write(#[source] io::Error),

    #[error("can only load into an empty document (it has {rows} rows)")]
    NotEmpty { rows: usize },
}

/// Result type for document I/O
pub type BufferResult<T> = Result<T, BufferError>;
