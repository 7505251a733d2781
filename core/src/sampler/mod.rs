//! Sampler

mod common;
mod pixel_sampler;

use crate::camera::*;
use crate::geometry::*;
use crate::pbrt::*;

// Re-export
pub use common::*;
pub use pixel_sampler::*;

/// Generates the sample vectors of a pixel. Implementations produce the
/// values for a whole pixel in `start_pixel()` and hand them out one
/// dimension at a time; the array and sample index bookkeeping lives in the
/// `SamplerData` they own.
pub trait Sampler {
    /// Returns a shared reference underlying `SamplerData`.
    fn get_data(&self) -> &SamplerData;

    /// Returns a mutable reference to underlying `SamplerData`.
    fn get_data_mut(&mut self) -> &mut SamplerData;

    /// Returns a sampler with the same configuration and requested arrays,
    /// drawing from the random sequence `seed`.
    ///
    /// * `seed` - The sequence index for the random number generator.
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler>;

    /// Generate every sample value of pixel `p` and rewind to its first
    /// sample.
    ///
    /// * `p` - The pixel.
    fn start_pixel(&mut self, p: &Point2i);

    /// Returns the value of the next dimension of the current sample.
    fn get_1d(&mut self) -> Float;

    /// Returns the values of the next two dimensions of the current sample.
    fn get_2d(&mut self) -> Point2f;

    /// Advance to the next sample of the pixel. Returns `false` once all
    /// `samples_per_pixel` samples were used.
    fn start_next_sample(&mut self) -> bool;

    /// Jump to sample `sample_num` of the pixel. Returns `false` if it is out
    /// of range.
    ///
    /// * `sample_num` - The sample number.
    fn set_sample_number(&mut self, sample_num: usize) -> bool;

    /// Returns the film, time and lens values of the current sample, drawn in
    /// that order. The film position is offset by the pixel.
    ///
    /// * `p_raster` - The pixel.
    fn get_camera_sample(&mut self, p_raster: &Point2i) -> CameraSample {
        let p_film = Point2f::from(*p_raster) + self.get_2d();
        let time = self.get_1d();
        let p_lens = self.get_2d();
        CameraSample::new(p_film, p_lens, time)
    }

    /// Request an array of `n` 1D values per sample. Must be called before
    /// the first `start_pixel()`.
    ///
    /// * `n` - The number of values; must be a valid `round_count()`.
    fn request_1d_array(&mut self, n: usize) {
        assert!(self.round_count(n) == n, "unsupported array size {n}");
        self.get_data_mut().request_1d_array(n);
    }

    /// Request an array of `n` 2D values per sample. Must be called before
    /// the first `start_pixel()`.
    ///
    /// * `n` - The number of values; must be a valid `round_count()`.
    fn request_2d_array(&mut self, n: usize) {
        assert!(self.round_count(n) == n, "unsupported array size {n}");
        self.get_data_mut().request_2d_array(n);
    }

    /// Returns the array size closest to `n` this sampler can generate well.
    /// Any size works for stratified grids.
    ///
    /// * `n` - The requested size.
    fn round_count(&self, n: usize) -> usize {
        n
    }

    /// Returns the next requested 1D array of the current sample, or an empty
    /// vector once all were used.
    ///
    /// * `n` - The size it was requested with.
    fn get_1d_array(&mut self, n: usize) -> Vec<Float> {
        self.get_data_mut().get_1d_array(n)
    }

    /// Returns the next requested 2D array of the current sample, or an empty
    /// vector once all were used.
    ///
    /// * `n` - The size it was requested with.
    fn get_2d_array(&mut self, n: usize) -> Vec<Point2f> {
        self.get_data_mut().get_2d_array(n)
    }
}
