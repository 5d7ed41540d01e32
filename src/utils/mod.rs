//! Shared utility functions.
//!
//! # Overview
//!
//! The utils module currently contains:
//!
//! - [`content_length`] - Declared size extraction from HTTP response headers

pub mod content_length;

pub use content_length::parse_content_length;
