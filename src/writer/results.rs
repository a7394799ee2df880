//! Writer result types
//!
//! Defines result structures returned by write operations.

use std::path::PathBuf;

/// Result of saving a main or option image
#[derive(Debug, Clone)]
pub struct SavedImage {
    /// Public URL the caller stores in its own records
    pub url: String,
    /// Final path of the written file
    pub path: PathBuf,
    /// Payload size
    pub bytes_written: u64,
    /// Predecessor for the same logical asset, removed because its
    /// extension differed from the new upload
    pub replaced: Option<PathBuf>,
}
