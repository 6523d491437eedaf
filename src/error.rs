//! Fatal errors. Anything recoverable (a bad bookmark, an empty section)
//! is reported as a notice instead and never becomes one of these.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Input file '{}' not found.", path.display())]
    InputNotFound { path: PathBuf },

    #[error("'{}' is not a readable PDF: {source}", path.display())]
    UnreadableDocument {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to create output directory '{}': {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
