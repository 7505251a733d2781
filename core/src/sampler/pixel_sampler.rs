//! Pixel Sampler.

use super::*;
use crate::rng::*;

/// All sample values generated for one pixel. Scalar dimensions hold one
/// value per pixel sample; arrays hold `samples_per_pixel` sub-arrays of the
/// requested size back to back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelSamples {
    /// Vector of 1D sample values.
    pub samples_1d: Vec<Vec<Float>>,

    /// Vector of 2D sample values.
    pub samples_2d: Vec<Vec<Point2f>>,

    /// Requested arrays of 1D samples.
    pub sample_array_1d: Vec<Vec<Float>>,

    /// Requested arrays of 2D samples.
    pub sample_array_2d: Vec<Vec<Point2f>>,
}

impl PixelSamples {
    /// Allocate zeroed buffers sized for a `SampleRequest`.
    ///
    /// * `request` - The requested dimensions and array sizes.
    pub fn new(request: &SampleRequest) -> Self {
        let spp = request.samples_per_pixel;
        Self {
            samples_1d: vec![vec![0.0; spp]; request.n_sampled_dimensions],
            samples_2d: vec![vec![Point2f::ZERO; spp]; request.n_sampled_dimensions],
            sample_array_1d: request
                .samples_1d_array_sizes
                .iter()
                .map(|&n| vec![0.0; n * spp])
                .collect(),
            sample_array_2d: request
                .samples_2d_array_sizes
                .iter()
                .map(|&n| vec![Point2f::ZERO; n * spp])
                .collect(),
        }
    }
}

/// Implementation for generating all sample values for all sample vectors of
/// a pixel at a time.
///
/// Samplers that generate whole pixels embed this and forward the `Sampler`
/// calls they do not implement themselves to it.
#[derive(Clone, Debug)]
pub struct PixelSampler {
    /// The common sampler data.
    pub data: SamplerData,

    /// Vector of 1D sample values.
    pub samples_1d: Vec<Vec<Float>>,

    /// Vector of 2D sample values.
    pub samples_2d: Vec<Vec<Point2f>>,

    /// Offset into the `samples_1d` array for the current pixel sample. It must
    /// be reset to 0 at the start of each new sample.
    pub current_1d_dimension: usize,

    /// Offset into the `samples_2d` array for the current pixel sample. It must
    /// be reset to 0 at the start of each new sample.
    pub current_2d_dimension: usize,

    /// The random number generator.
    pub rng: RNG,
}

impl PixelSampler {
    /// Create a new `PixelSampler`.
    ///
    /// * `samples_per_pixel`    - Number of samples per pixel.
    /// * `n_sampled_dimensions` - Number of dimensions for sampling.
    /// * `seed`                 - Optional seed for the random number generator.
    pub fn new(samples_per_pixel: usize, n_sampled_dimensions: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => RNG::new(s),
            None => RNG::default(),
        };

        Self {
            data: SamplerData::new(samples_per_pixel),
            samples_1d: vec![vec![0.0; samples_per_pixel]; n_sampled_dimensions],
            samples_2d: vec![vec![Point2f::ZERO; samples_per_pixel]; n_sampled_dimensions],
            current_1d_dimension: 0,
            current_2d_dimension: 0,
            rng,
        }
    }

    /// Returns the description of what has to be generated for each pixel.
    pub fn request(&self) -> SampleRequest {
        SampleRequest {
            samples_per_pixel: self.data.samples_per_pixel,
            n_sampled_dimensions: self.samples_1d.len(),
            samples_1d_array_sizes: self.data.samples_1d_array_sizes.clone(),
            samples_2d_array_sizes: self.data.samples_2d_array_sizes.clone(),
        }
    }

    /// Install the sample values generated for pixel `p` and reset the sample
    /// index and dimension counters.
    ///
    /// * `p`       - The pixel.
    /// * `samples` - Sample values matching `request()`.
    pub fn start_pixel(&mut self, p: &Point2i, samples: PixelSamples) {
        assert!(samples.samples_1d.len() == self.samples_1d.len());
        assert!(samples.samples_2d.len() == self.samples_2d.len());
        assert!(samples.sample_array_1d.len() == self.data.sample_array_1d.len());
        assert!(samples.sample_array_2d.len() == self.data.sample_array_2d.len());

        self.samples_1d = samples.samples_1d;
        self.samples_2d = samples.samples_2d;
        self.data.sample_array_1d = samples.sample_array_1d;
        self.data.sample_array_2d = samples.sample_array_2d;

        self.current_1d_dimension = 0;
        self.current_2d_dimension = 0;
        self.data.start_pixel(p);
    }

    /// Returns the sample value for the next dimension of the current sample
    /// vector.
    pub fn get_1d(&mut self) -> Float {
        assert!(self.data.current_pixel_sample_index < self.data.samples_per_pixel);
        if self.current_1d_dimension < self.samples_1d.len() {
            let r =
                self.samples_1d[self.current_1d_dimension][self.data.current_pixel_sample_index];
            self.current_1d_dimension += 1;
            r
        } else {
            self.rng.uniform_float()
        }
    }

    /// Returns the sample value for the next two dimensions of the current
    /// sample vector.
    pub fn get_2d(&mut self) -> Point2f {
        assert!(self.data.current_pixel_sample_index < self.data.samples_per_pixel);
        if self.current_2d_dimension < self.samples_2d.len() {
            let r =
                self.samples_2d[self.current_2d_dimension][self.data.current_pixel_sample_index];
            self.current_2d_dimension += 1;
            r
        } else {
            let x = self.rng.uniform_float();
            let y = self.rng.uniform_float();
            Point2f::new(x, y)
        }
    }

    /// Reset the current sample dimension counter. Returns `true` if
    /// `current_pixel_sample_index` < `samples_per_pixel`; otherwise `false`.
    pub fn start_next_sample(&mut self) -> bool {
        self.current_1d_dimension = 0;
        self.current_2d_dimension = 0;
        self.data.start_next_sample()
    }

    /// Set the index of the sample in the current pixel to generate next.
    /// Returns `true` if `current_pixel_sample_index` < `samples_per_pixel`;
    /// otherwise `false`.
    ///
    /// * `sample_num` - The sample number.
    pub fn set_sample_number(&mut self, sample_num: usize) -> bool {
        self.current_1d_dimension = 0;
        self.current_2d_dimension = 0;
        self.data.set_sample_number(sample_num)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
