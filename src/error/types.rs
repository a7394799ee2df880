//! Error types
//!
//! Defines domain-specific error types for the image asset store.

use std::fmt;
use std::io;

/// Path resolution and name sanitizing errors
#[derive(Debug)]
pub enum PathError {
    /// Entity name reduced to nothing after sanitizing
    EmptyName(String),
    /// File extension empty or unusable after normalizing
    InvalidExtension(String),
    /// URL or path resolves outside the asset root
    Traversal(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::EmptyName(n) => write!(f, "Name sanitizes to an empty segment: {:?}", n),
            PathError::InvalidExtension(e) => write!(f, "Invalid file extension: {:?}", e),
            PathError::Traversal(t) => write!(f, "Path escapes the asset root: {}", t),
        }
    }
}

impl std::error::Error for PathError {}

/// General image store error covering write, delete and rename operations
#[derive(Debug)]
pub enum ImageStoreError {
    /// Caller input rejected (empty name, empty payload)
    Validation(String),
    /// Rename destination already occupied; existing assets are never
    /// merged into or overwritten
    Conflict(String),
    /// URL or path resolves outside the asset root
    Traversal(String),
    /// Filesystem failure other than "not found"
    Io(io::Error),
}

impl fmt::Display for ImageStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageStoreError::Validation(m) => write!(f, "Validation error: {}", m),
            ImageStoreError::Conflict(m) => write!(f, "Conflict: {}", m),
            ImageStoreError::Traversal(t) => write!(f, "Path escapes the asset root: {}", t),
            ImageStoreError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ImageStoreError {}

impl From<io::Error> for ImageStoreError {
    fn from(error: io::Error) -> Self {
        ImageStoreError::Io(error)
    }
}

impl From<PathError> for ImageStoreError {
    fn from(error: PathError) -> Self {
        match error {
            PathError::EmptyName(_) | PathError::InvalidExtension(_) => {
                ImageStoreError::Validation(error.to_string())
            }
            PathError::Traversal(target) => ImageStoreError::Traversal(target),
        }
    }
}
