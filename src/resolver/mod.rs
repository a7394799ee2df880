//! Name and path resolution
//!
//! Pure functions and the [`PathResolver`] that map entity names to
//! filesystem paths and public URLs, with a traversal guard on the way
//! back in.

pub mod paths;
pub mod sanitize;

pub use paths::{PathResolver, MAIN_IMAGE_STEM};
pub use sanitize::{sanitize, sanitize_extension, MAX_SEGMENT_CHARS};
