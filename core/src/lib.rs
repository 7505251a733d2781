//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod camera;
pub mod geometry;
pub mod paramset;
pub mod pbrt;
pub mod rng;
pub mod sampler;
pub mod sampling;
