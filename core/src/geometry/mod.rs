//! Geometry

mod bounds2;
mod point2;

// Re-export
pub use bounds2::*;
pub use point2::*;
