//! momentum-export
//!
//! Summary export envelope and plain-text rendering of comparison results.

pub mod envelope;
pub mod error;
pub mod render;
