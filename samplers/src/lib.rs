//! Samplers

#[macro_use]
extern crate log;

mod multi_jitter;

// Re-export.
pub use multi_jitter::*;
