//! Camera Samples

use crate::geometry::*;
use crate::pbrt::*;

/// Holds all the sample values needed to generate a camera ray.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CameraSample {
    /// Point on the film to which the generated ray carries radiance.
    pub p_film: Point2f,

    /// The point on the lens the ray passes through (for cameras that
    /// support lenses).
    pub p_lens: Point2f,

    /// Time at which the ray should sample the scene. This should be linearly
    /// interpolated between shutter open and close time range.
    pub time: Float,
}

impl CameraSample {
    /// Create a new `CameraSample`.
    ///
    /// * `p_film` - Point on the film to which the generated ray carries radiance.
    /// * `p_lens` - The point on the lens the ray passes through (for cameras
    ///              that support lenses).
    /// * `time`   - Time at which the ray should sample the scene. This should
    ///              be linearly interpolated between shutter open and close
    ///              time range.
    pub fn new(p_film: Point2f, p_lens: Point2f, time: Float) -> Self {
        Self {
            p_film,
            p_lens,
            time,
        }
    }
}
