//! Common

use super::*;

/// Stores the sampler data and implements common functionality for all samplers.
#[derive(Clone, Debug, Default)]
pub struct SamplerData {
    /// Number of samples generated for each pixel.
    pub samples_per_pixel: usize,

    /// Coordinates of current pixel being generated.
    pub current_pixel: Point2i,

    /// Sample number of the pixel currently being generated.
    pub current_pixel_sample_index: usize,

    /// Stores sizes of requested 1D sample arrays.
    pub samples_1d_array_sizes: Vec<usize>,

    /// Stores sizes of requested 2D sample arrays.
    pub samples_2d_array_sizes: Vec<usize>,

    /// Stores the `n` requested 1D samples for each pixel sample, back to back.
    pub sample_array_1d: Vec<Vec<Float>>,

    /// Stores the `n` requested 2D samples for each pixel sample, back to back.
    pub sample_array_2d: Vec<Vec<Point2f>>,

    /// Tracks index of the next element in 1D array. This is reset to 0 when
    /// a new pixel starts or the sample number in current pixel changes.
    pub array_1d_offset: usize,

    /// Tracks index of the next element in 2D array. This is reset to 0 when
    /// a new pixel starts or the sample number in current pixel changes.
    pub array_2d_offset: usize,
}

impl SamplerData {
    /// Create a new `SamplerData` instance.
    ///
    /// * `samples_per_pixel` - Number of samples to generate for each pixel.
    pub fn new(samples_per_pixel: usize) -> Self {
        Self {
            samples_per_pixel,
            current_pixel: Point2i::default(),
            current_pixel_sample_index: 0,
            samples_1d_array_sizes: vec![],
            samples_2d_array_sizes: vec![],
            sample_array_1d: vec![],
            sample_array_2d: vec![],
            array_1d_offset: 0,
            array_2d_offset: 0,
        }
    }

    /// This should be called when the rendering algorithm is ready to start
    /// working on a given pixel.
    ///
    /// * `p` - The pixel.
    pub fn start_pixel(&mut self, p: &Point2i) {
        self.current_pixel = *p;
        self.current_pixel_sample_index = 0;

        // Reset array offsets for next pixel sample.
        self.array_1d_offset = 0;
        self.array_2d_offset = 0;
    }

    /// This should be called before rendering begins when an array of 1D
    /// samples is required.
    ///
    /// * `n` - The number of samples; must be positive.
    pub fn request_1d_array(&mut self, n: usize) {
        assert!(n > 0, "cannot request an empty 1D array");
        self.samples_1d_array_sizes.push(n);
        self.sample_array_1d
            .push(vec![0.0; n * self.samples_per_pixel]);
    }

    /// This should be called before rendering begins when an array of 2D
    /// samples is required.
    ///
    /// * `n` - The number of samples; must be positive.
    pub fn request_2d_array(&mut self, n: usize) {
        assert!(n > 0, "cannot request an empty 2D array");
        self.samples_2d_array_sizes.push(n);
        self.sample_array_2d
            .push(vec![Point2f::ZERO; n * self.samples_per_pixel]);
    }

    /// Get an array of 1D samples.
    ///
    /// * `n` - The number of samples.
    pub fn get_1d_array(&mut self, n: usize) -> Vec<Float> {
        if self.array_1d_offset == self.sample_array_1d.len() {
            vec![]
        } else {
            assert!(self.samples_1d_array_sizes[self.array_1d_offset] == n);
            assert!(self.current_pixel_sample_index < self.samples_per_pixel);

            let array = &self.sample_array_1d[self.array_1d_offset];
            self.array_1d_offset += 1;

            let i = self.current_pixel_sample_index * n;
            let m = i + n;
            array[i..m].to_vec()
        }
    }

    /// Get an array of 2D samples.
    ///
    /// * `n` - The number of samples.
    pub fn get_2d_array(&mut self, n: usize) -> Vec<Point2f> {
        if self.array_2d_offset == self.sample_array_2d.len() {
            vec![]
        } else {
            assert!(self.samples_2d_array_sizes[self.array_2d_offset] == n);
            assert!(self.current_pixel_sample_index < self.samples_per_pixel);

            let array = &self.sample_array_2d[self.array_2d_offset];
            self.array_2d_offset += 1;

            let i = self.current_pixel_sample_index * n;
            let m = i + n;
            array[i..m].to_vec()
        }
    }

    /// Reset the current sample dimension counter. Returns `true` if
    /// `current_pixel_sample_index` < `samples_per_pixel`; otherwise `false`.
    pub fn start_next_sample(&mut self) -> bool {
        // Reset array offsets for next pixel sample.
        self.array_1d_offset = 0;
        self.array_2d_offset = 0;
        self.current_pixel_sample_index += 1;
        self.current_pixel_sample_index < self.samples_per_pixel
    }

    /// Set the index of the sample in the current pixel to generate next.
    /// Returns `true` if `current_pixel_sample_index` < `samples_per_pixel`;
    /// otherwise `false`.
    ///
    /// * `sample_num` - The sample number.
    pub fn set_sample_number(&mut self, sample_num: usize) -> bool {
        // Reset array offsets for next pixel sample.
        self.array_1d_offset = 0;
        self.array_2d_offset = 0;
        self.current_pixel_sample_index = sample_num;
        self.current_pixel_sample_index < self.samples_per_pixel
    }

    /// Returns the index of the sample in the current pixel.
    pub fn current_sample_number(&self) -> usize {
        self.current_pixel_sample_index
    }
}

/// Describes everything a pixel sampler has to generate for one pixel: the
/// number of pixel samples, how many scalar 1D and 2D dimensions are
/// pre-generated, and the sizes of the requested sample arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleRequest {
    /// Number of samples generated for each pixel.
    pub samples_per_pixel: usize,

    /// Number of pre-generated 1D and 2D scalar dimensions.
    pub n_sampled_dimensions: usize,

    /// Sizes of requested 1D sample arrays.
    pub samples_1d_array_sizes: Vec<usize>,

    /// Sizes of requested 2D sample arrays.
    pub samples_2d_array_sizes: Vec<usize>,
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_arrays_hold_one_slot_per_pixel_sample() {
        let mut data = SamplerData::new(4);
        data.request_1d_array(3);
        data.request_2d_array(5);
        assert_eq!(data.sample_array_1d[0].len(), 12);
        assert_eq!(data.sample_array_2d[0].len(), 20);
    }

    #[test]
    fn get_array_returns_current_sample_slice() {
        let mut data = SamplerData::new(2);
        data.request_1d_array(2);
        data.sample_array_1d[0] = vec![0.1, 0.2, 0.3, 0.4];
        data.start_pixel(&Point2i::new(0, 0));

        assert_eq!(data.get_1d_array(2), vec![0.1, 0.2]);
        assert!(data.get_1d_array(2).is_empty());

        assert!(data.start_next_sample());
        assert_eq!(data.get_1d_array(2), vec![0.3, 0.4]);
        assert!(!data.start_next_sample());
    }

    #[test]
    #[should_panic]
    fn get_array_with_wrong_size_panics() {
        let mut data = SamplerData::new(2);
        data.request_2d_array(2);
        data.get_2d_array(3);
    }

    #[test]
    #[should_panic(expected = "empty 1D array")]
    fn empty_1d_array_request_panics() {
        SamplerData::new(4).request_1d_array(0);
    }

    #[test]
    #[should_panic(expected = "empty 2D array")]
    fn empty_2d_array_request_panics() {
        SamplerData::new(4).request_2d_array(0);
    }

    #[test]
    fn set_sample_number_resets_offsets() {
        let mut data = SamplerData::new(4);
        data.request_1d_array(1);
        data.get_1d_array(1);
        assert!(data.set_sample_number(3));
        assert_eq!(data.array_1d_offset, 0);
        assert_eq!(data.current_sample_number(), 3);
        assert!(!data.set_sample_number(4));
    }
}
