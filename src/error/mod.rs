//! Error handling
//!
//! Defines error types and handling for the image asset store.

pub mod handlers;
pub mod types;

pub use types::*;
