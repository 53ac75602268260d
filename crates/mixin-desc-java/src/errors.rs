use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning Java sources
#[derive(Error, Debug)]
pub enum ScanError {
    /// Failed to read file
    #[error("IO error reading {0}: {1}")]
    IoError(PathBuf, #[source] std::io::Error),

    /// Syntax error in source code (1-indexed line and column)
    #[error("Syntax error in {0}:{1}:{2}: {3}")]
    SyntaxError(PathBuf, usize, usize, String),

    /// File too large
    #[error("File {0} exceeds maximum size ({1} bytes)")]
    FileTooLarge(PathBuf, usize),

    /// tree-sitter could not produce a tree
    #[error("Parse error in {0}: {1}")]
    ParseError(PathBuf, String),

    /// Worker pool could not be created
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),
}

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;
