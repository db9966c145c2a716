use std::io;

use thiserror::Error;

/// Batch-level failure of a stage or clear request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StagingError {
    #[error("path has no file name: {path}")]
    NoFileName { path: String },
    #[error("staging directory unavailable: {0}")]
    StagingDir(String),
    #[error("failed to copy {path}: {message}")]
    Copy { path: String, message: String },
    #[error("failed to remove {failed} staged file(s): {message}")]
    Clear { failed: usize, message: String },
}

/// Entry-level failure of a size lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("failed to read metadata for {path}: {message}")]
    Io { path: String, message: String },
    #[error("not a regular file: {path}")]
    NotAFile { path: String },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
}
