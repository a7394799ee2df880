//! Error handlers
//!
//! Maps store errors to the HTTP-equivalent status codes the calling
//! backend reports.

use crate::error::types::ImageStoreError;
use log::error;

/// Log a store error before surfacing it to the caller
pub fn handle_error(err: &ImageStoreError) {
    error!("Image store error: {}", err);
}

/// Convert an error to its HTTP-equivalent status code
pub fn error_to_status_code(err: &ImageStoreError) -> u16 {
    match err {
        ImageStoreError::Validation(_) => 400,
        ImageStoreError::Conflict(_) => 409,
        ImageStoreError::Traversal(_) => 403,
        ImageStoreError::Io(_) => 500,
    }
}
