//! Correlated Multi-Jittered Sampler.
//!
//! See Kensler, "Correlated Multi-Jittered Sampling", Pixar Technical Memo
//! 13-01 (2013).

use core::app::options;
use core::geometry::*;
use core::paramset::*;
use core::pbrt::*;
use core::rng::*;
use core::sampler::*;
use core::sampling::*;

/// Returns the grid dimensions `(m, n)` with `m >= n` of the smallest
/// near-square grid that holds at least `count` cells.
///
/// * `count` - Number of samples; must be positive.
pub fn decompose_count(count: usize) -> (usize, usize) {
    assert!(count > 0, "cannot decompose a sample count of 0");

    // r = floor(sqrt(count)), corrected for rounding of large counts.
    let mut r = (count as f64).sqrt() as usize;
    while r.checked_mul(r).map_or(true, |sq| sq > count) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= count) {
        r += 1;
    }

    if r * r >= count {
        (r, r)
    } else if (r + 1) * r >= count {
        (r + 1, r)
    } else {
        (r + 1, r + 1)
    }
}

/// An `m x n` grid of jittered points, stored row by row. The y-coordinates
/// are stretched by `m * n / count` so that exactly `count` points end up in
/// the unit square.
#[derive(Clone, Debug, PartialEq)]
pub struct JitteredGrid {
    /// Number of columns.
    m: usize,

    /// Number of rows.
    n: usize,

    /// Number of points that will be selected.
    count: usize,

    /// The grid points. Kept in double precision so the stretched coordinate
    /// of the last selected stratum cannot round past 1.
    points: Vec<Point2<f64>>,
}

impl JitteredGrid {
    /// Build the canonical arrangement. Each cell draws an x-jitter then a
    /// y-jitter, rows outer and columns inner.
    ///
    /// * `m`     - Number of columns.
    /// * `n`     - Number of rows.
    /// * `count` - Number of points to select later; `1 <= count <= m * n`.
    /// * `rng`   - Random number generator.
    pub fn canonical<R: RandomSource + ?Sized>(m: usize, n: usize, count: usize, rng: &mut R) -> Self {
        assert!(count > 0, "sample count must be positive");
        assert!(
            m * n >= count,
            "{m}x{n} grid cannot hold {count} samples"
        );

        let (mf, nf) = (m as f64, n as f64);
        let stretch = (m * n) as f64 / count as f64;

        let mut points = Vec::with_capacity(m * n);
        for j in 0..n {
            for i in 0..m {
                let u = rng.uniform_float() as f64;
                let v = rng.uniform_float() as f64;

                let x = (i as f64 + (j as f64 + u) / nf) / mf;
                let y = ((j as f64 + (i as f64 + v) / mf) / nf) * stretch;
                points.push(Point2::new(x, y));
            }
        }

        Self { m, n, count, points }
    }

    /// Returns the grid dimensions `(m, n)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// Returns the point of column `i` and row `j`.
    ///
    /// * `i` - Column index.
    /// * `j` - Row index.
    pub fn point(&self, i: usize, j: usize) -> Point2<f64> {
        self.points[j * self.m + i]
    }

    /// Returns the number of cells that fall outside the unit square and will
    /// be rejected by `select()`.
    pub fn rejected(&self) -> usize {
        self.points.iter().filter(|p| p.y > 1.0).count()
    }

    /// Swap the x-coordinates of whole rows. Row `j` trades with a random row
    /// in `[j, n)`, so every column keeps its set of x-strata.
    ///
    /// * `rng` - Random number generator.
    pub fn shuffle_rows<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let (m, n) = (self.m, self.n);
        for j in 0..n {
            let other_row = j + rng.uniform_u32_bounded((n - j) as u32) as usize;
            for i in 0..m {
                let x = self.points[j * m + i].x;
                self.points[j * m + i].x = self.points[other_row * m + i].x;
                self.points[other_row * m + i].x = x;
            }
        }
    }

    /// Swap the y-coordinates of whole columns. Column `i` trades with a random
    /// column in `[i, m)`, so every row keeps its set of y-strata.
    ///
    /// * `rng` - Random number generator.
    pub fn shuffle_columns<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let (m, n) = (self.m, self.n);
        for i in 0..m {
            let other_col = i + rng.uniform_u32_bounded((m - i) as u32) as usize;
            for j in 0..n {
                let y = self.points[j * m + i].y;
                self.points[j * m + i].y = self.points[j * m + other_col].y;
                self.points[j * m + other_col].y = y;
            }
        }
    }

    /// Write the points inside the unit square to `samples` column by column,
    /// clamped below 1. Exactly `count` slots are written.
    ///
    /// * `samples` - The output buffer; must hold at least `count` points.
    pub fn select(&self, samples: &mut [Point2f]) {
        assert!(
            samples.len() >= self.count,
            "sample buffer of {} cannot hold {} samples",
            samples.len(),
            self.count
        );

        let mut sample_index = 0;
        'columns: for i in 0..self.m {
            for j in 0..self.n {
                let p = self.point(i, j);
                if p.y <= 1.0 {
                    let p = Point2f::from(p);
                    samples[sample_index] =
                        Point2f::new(min(p.x, ONE_MINUS_EPSILON), min(p.y, ONE_MINUS_EPSILON));
                    sample_index += 1;
                    if sample_index == self.count {
                        break 'columns;
                    }
                }
            }
        }

        assert!(
            sample_index == self.count,
            "selected {} of {} samples",
            sample_index,
            self.count
        );
    }
}

/// Generate `count` correlated multi-jittered samples on an `m x n` grid into
/// the first `count` slots of `samples`.
///
/// * `samples` - The output buffer; must hold at least `count` points.
/// * `m`       - Number of columns.
/// * `n`       - Number of rows.
/// * `count`   - Number of samples; `1 <= count <= m * n`.
/// * `rng`     - Random number generator.
pub fn correlated_multi_jitter<R: RandomSource + ?Sized>(
    samples: &mut [Point2f],
    m: usize,
    n: usize,
    count: usize,
    rng: &mut R,
) {
    let mut grid = JitteredGrid::canonical(m, n, count, rng);
    grid.shuffle_rows(rng);
    grid.shuffle_columns(rng);
    grid.select(samples);
}

/// Generate every sample value of one pixel.
///
/// 1D dimensions and arrays are stratified then shuffled. 2D dimensions use
/// correlated multi-jittering on the `x_pixel_samples x y_pixel_samples`
/// pixel grid and 2D arrays on a grid from `decompose_count()`. The `jitter`
/// flag only applies to the 1D values.
///
/// * `request`         - What to generate.
/// * `x_pixel_samples` - Number of samples in horizontal direction.
/// * `y_pixel_samples` - Number of samples in vertical direction.
/// * `jitter`          - Jitter 1D samples inside their strata.
/// * `rng`             - Random number generator.
pub fn generate_pixel_samples<R: RandomSource + ?Sized>(
    request: &SampleRequest,
    x_pixel_samples: usize,
    y_pixel_samples: usize,
    jitter: bool,
    rng: &mut R,
) -> PixelSamples {
    let spp = request.samples_per_pixel;
    assert!(spp == x_pixel_samples * y_pixel_samples);

    let mut samples = PixelSamples::new(request);

    for samples_1d in samples.samples_1d.iter_mut() {
        stratified_sample_1d(samples_1d, rng, jitter);
        shuffle(samples_1d, spp, 1, rng);
    }

    for (array, &count) in samples
        .sample_array_1d
        .iter_mut()
        .zip(request.samples_1d_array_sizes.iter())
    {
        for sub_array in array.chunks_exact_mut(count) {
            stratified_sample_1d(sub_array, rng, jitter);
            shuffle(sub_array, count, 1, rng);
        }
    }

    for samples_2d in samples.samples_2d.iter_mut() {
        correlated_multi_jitter(samples_2d, x_pixel_samples, y_pixel_samples, spp, rng);
    }

    for (array, &count) in samples
        .sample_array_2d
        .iter_mut()
        .zip(request.samples_2d_array_sizes.iter())
    {
        let (m, n) = decompose_count(count);
        for sub_array in array.chunks_exact_mut(count) {
            correlated_multi_jitter(sub_array, m, n, count, rng);
        }
    }

    samples
}

/// Implements a sampler that generates correlated multi-jittered 2D samples
/// and stratified, shuffled 1D samples for each pixel.
#[derive(Clone, Debug)]
pub struct MultiJitterSampler {
    /// Use a pixel sampler.
    sampler: PixelSampler,

    /// Number of samples in horizontal direction.
    x_pixel_samples: usize,

    /// Number of samples in vertical direction.
    y_pixel_samples: usize,

    /// Indicates whether or not to jitter 1D samples inside their strata.
    /// 2D samples are always jittered.
    jitter_samples: bool,
}

impl MultiJitterSampler {
    /// Create a new `MultiJitterSampler`.
    ///
    /// * `x_pixel_samples`      - Number of samples in horizontal direction.
    /// * `y_pixel_samples`      - Number of samples in vertical direction.
    /// * `jitter_samples`       - Indicates whether or not to jitter 1D samples.
    /// * `n_sampled_dimensions` - Number of dimensions for sampling.
    /// * `seed`                 - Optional seed for the random number generator.
    pub fn new(
        x_pixel_samples: usize,
        y_pixel_samples: usize,
        jitter_samples: bool,
        n_sampled_dimensions: usize,
        seed: Option<u64>,
    ) -> Self {
        assert!(x_pixel_samples > 0 && y_pixel_samples > 0);

        let samples_per_pixel = x_pixel_samples * y_pixel_samples;
        Self {
            sampler: PixelSampler::new(samples_per_pixel, n_sampled_dimensions, seed),
            x_pixel_samples,
            y_pixel_samples,
            jitter_samples,
        }
    }

    /// Create a `MultiJitterSampler` from a parameter set.
    ///
    /// * `params`       - The parameter set.
    /// * `quick_render` - Use a single sample per pixel.
    pub fn from_params(params: &ParamSet, quick_render: bool) -> Self {
        let jitter = params.find_one_bool("jitter", true);
        let mut x_samples = params.find_one_int("xsamples", 4);
        let mut y_samples = params.find_one_int("ysamples", 4);
        let mut sd = params.find_one_int("dimensions", 4);

        if quick_render {
            x_samples = 1;
            y_samples = 1;
        }
        if x_samples < 1 {
            warn!("Invalid xsamples {}. Using 1.", x_samples);
            x_samples = 1;
        }
        if y_samples < 1 {
            warn!("Invalid ysamples {}. Using 1.", y_samples);
            y_samples = 1;
        }
        if sd < 0 {
            warn!("Invalid dimensions {}. Using 0.", sd);
            sd = 0;
        }

        Self::new(x_samples as usize, y_samples as usize, jitter, sd as usize, None)
    }

    /// Returns the pixel sample grid dimensions.
    pub fn pixel_samples(&self) -> (usize, usize) {
        (self.x_pixel_samples, self.y_pixel_samples)
    }

    /// Returns whether 1D samples are jittered.
    pub fn jitter_samples(&self) -> bool {
        self.jitter_samples
    }

    /// Returns the pre-generated 1D sample values of the current pixel.
    pub fn samples_1d(&self) -> &[Vec<Float>] {
        &self.sampler.samples_1d
    }

    /// Returns the pre-generated 2D sample values of the current pixel.
    pub fn samples_2d(&self) -> &[Vec<Point2f>] {
        &self.sampler.samples_2d
    }
}

impl Sampler for MultiJitterSampler {
    /// Returns a shared reference underlying `SamplerData`.
    fn get_data(&self) -> &SamplerData {
        &self.sampler.data
    }

    /// Returns a mutable reference to underlying `SamplerData`.
    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.sampler.data
    }

    /// Generates a new instance of an initial `Sampler` for use by a rendering
    /// thread. The configuration and requested arrays are copied; the random
    /// number generator is restarted on the sequence `seed`.
    ///
    /// * `seed` - The seed for the random number generator.
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler> {
        let mut sampler = self.clone();
        sampler.sampler.rng.set_sequence(seed);
        Box::new(sampler)
    }

    /// This should be called when the rendering algorithm is ready to start
    /// working on a given pixel.
    ///
    /// * `p` - The pixel.
    fn start_pixel(&mut self, p: &Point2i) {
        let request = self.sampler.request();
        let samples = generate_pixel_samples(
            &request,
            self.x_pixel_samples,
            self.y_pixel_samples,
            self.jitter_samples,
            &mut self.sampler.rng,
        );
        self.sampler.start_pixel(p, samples);

        debug!(
            "Generated {} samples x {} dimensions for pixel {}",
            request.samples_per_pixel, request.n_sampled_dimensions, p
        );
    }

    /// Returns the sample value for the next dimension of the current sample
    /// vector.
    fn get_1d(&mut self) -> Float {
        self.sampler.get_1d()
    }

    /// Returns the sample value for the next two dimensions of the current
    /// sample vector.
    fn get_2d(&mut self) -> Point2f {
        self.sampler.get_2d()
    }

    /// Reset the current sample dimension counter. Returns `true` if
    /// `current_pixel_sample_index` < `samples_per_pixel`; otherwise `false`.
    fn start_next_sample(&mut self) -> bool {
        self.sampler.start_next_sample()
    }

    /// Set the index of the sample in the current pixel to generate next.
    /// Returns `true` if `current_pixel_sample_index` < `samples_per_pixel`;
    /// otherwise `false`.
    ///
    /// * `sample_num` - The sample number.
    fn set_sample_number(&mut self, sample_num: usize) -> bool {
        self.sampler.set_sample_number(sample_num)
    }
}

impl From<&ParamSet> for MultiJitterSampler {
    /// Create a `MultiJitterSampler` from a parameter set, honoring the
    /// global quick render option.
    ///
    /// * `params` - The parameter set.
    fn from(params: &ParamSet) -> Self {
        Self::from_params(params, options().quick_render)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;
    use proptest::test_runner::TestRunner;

    /// Tolerance for stratum boundaries after narrowing to `Float`.
    const TOLERANCE: f64 = 1e-5;

    /// Records the draws made through it.
    struct RecordingSource {
        rng: RNG,
        floats: usize,
        bounds: Vec<u32>,
    }

    impl RecordingSource {
        fn new(seed: u64) -> Self {
            Self {
                rng: RNG::new(seed),
                floats: 0,
                bounds: vec![],
            }
        }
    }

    impl RandomSource for RecordingSource {
        fn uniform_float(&mut self) -> Float {
            assert!(self.bounds.is_empty(), "float drawn after a bounded draw");
            self.floats += 1;
            self.rng.uniform_float()
        }

        fn uniform_u32_bounded(&mut self, bound: u32) -> u32 {
            self.bounds.push(bound);
            self.rng.uniform_u32_bounded(bound)
        }

        fn set_sequence(&mut self, seed: u64) {
            self.rng.set_sequence(seed);
        }
    }

    fn generate(m: usize, n: usize, count: usize, seed: u64) -> Vec<Point2f> {
        let mut rng = RNG::new(seed);
        let mut samples = vec![Point2f::ZERO; count];
        correlated_multi_jitter(&mut samples, m, n, count, &mut rng);
        samples
    }

    /// Sorted `values[k]` must lie in stratum `k` of `strata` equal strata.
    fn assert_one_per_stratum(mut values: Vec<f64>, strata: usize) {
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for (k, v) in values.iter().enumerate() {
            let lo = k as f64 / strata as f64 - TOLERANCE;
            let hi = (k + 1) as f64 / strata as f64 + TOLERANCE;
            assert!(*v >= lo && *v <= hi, "value {v} not in stratum {k} of {strata}");
        }
    }

    /// Every column of the `m x n` grid holds one point in each row.
    fn assert_one_per_cell(samples: &[Point2f], m: usize, n: usize) {
        let mut by_x: Vec<Point2f> = samples.to_vec();
        by_x.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
        assert_one_per_stratum(by_x.iter().map(|p| p.x as f64).collect(), m * n);

        for column in by_x.chunks(n) {
            assert_one_per_stratum(column.iter().map(|p| p.y as f64).collect(), n);
        }
    }

    /// Run `test` on values drawn from `strategy`. The `proptest!` macro
    /// cannot be used here since its expansion names `::core`, which is the
    /// workspace crate in this package.
    fn check<S: Strategy>(strategy: S, test: impl Fn(S::Value)) {
        let mut runner = TestRunner::default();
        if let Err(e) = runner.run(&strategy, |value| {
            test(value);
            Ok(())
        }) {
            panic!("{e}");
        }
    }

    fn grid_strategy() -> impl Strategy<Value = (usize, usize, usize)> {
        (1..12usize, 1..12usize).prop_flat_map(|(m, n)| (Just(m), Just(n), 1..=m * n))
    }

    #[test]
    fn decompose_count_examples() {
        assert_eq!(decompose_count(1), (1, 1));
        assert_eq!(decompose_count(2), (2, 1));
        assert_eq!(decompose_count(4), (2, 2));
        assert_eq!(decompose_count(5), (3, 2));
        assert_eq!(decompose_count(6), (3, 2));
        assert_eq!(decompose_count(7), (3, 3));
        assert_eq!(decompose_count(10), (4, 3));
        assert_eq!(decompose_count(16), (4, 4));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn decompose_count_handles_largest_counts() {
        let r = u32::MAX as usize;
        assert_eq!(decompose_count(r * r), (r, r));
        assert_eq!(decompose_count(r * r + 1), (r + 1, r));
        assert_eq!(decompose_count(usize::MAX), (r + 1, r + 1));
    }

    #[test]
    #[should_panic(expected = "empty 2D array")]
    fn requesting_an_empty_array_panics() {
        let mut sampler = MultiJitterSampler::new(2, 2, true, 1, None);
        sampler.request_2d_array(0);
    }

    #[test]
    #[should_panic]
    fn decompose_zero_panics() {
        decompose_count(0);
    }

    #[test]
    fn full_grid_accepts_every_cell() {
        let mut rng = RNG::new(1);
        let mut grid = JitteredGrid::canonical(4, 4, 16, &mut rng);
        grid.shuffle_rows(&mut rng);
        grid.shuffle_columns(&mut rng);
        assert_eq!(grid.rejected(), 0);

        let mut samples = vec![Point2f::ZERO; 16];
        grid.select(&mut samples);
        assert_one_per_cell(&samples, 4, 4);
    }

    #[test]
    fn clipped_grid_rejects_excess_cells() {
        let (m, n) = decompose_count(10);
        let mut rng = RNG::new(2);
        let mut grid = JitteredGrid::canonical(m, n, 10, &mut rng);
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.rejected(), 2);

        grid.shuffle_rows(&mut rng);
        grid.shuffle_columns(&mut rng);
        assert_eq!(grid.rejected(), 2);

        let mut samples = vec![Point2f::ZERO; 10];
        grid.select(&mut samples);
        assert_one_per_stratum(samples.iter().map(|p| p.y as f64).collect(), 10);
    }

    #[test]
    fn canonical_grid_is_stratified_in_both_axes() {
        let mut rng = RNG::new(3);
        let grid = JitteredGrid::canonical(3, 2, 6, &mut rng);
        for j in 0..2 {
            for i in 0..3 {
                let p = grid.point(i, j);
                let fine_x = (p.x * 6.0).floor() as usize;
                let fine_y = (p.y * 6.0).floor() as usize;
                assert_eq!(fine_x, i * 2 + j);
                assert_eq!(fine_y, j * 3 + i);
            }
        }
    }

    #[test]
    fn unit_grid_draws_before_the_shuffles() {
        let mut rng = RecordingSource::new(4);
        let mut samples = vec![Point2f::ZERO; 10];
        correlated_multi_jitter(&mut samples, 4, 3, 10, &mut rng);
        assert_eq!(rng.floats, 2 * 4 * 3);
        assert_eq!(rng.bounds, vec![3, 2, 1, 4, 3, 2, 1]);
    }

    #[test]
    fn only_first_count_slots_are_written() {
        let mut rng = RNG::new(5);
        let sentinel = Point2f::new(-1.0, -1.0);
        let mut samples = vec![sentinel; 8];
        correlated_multi_jitter(&mut samples, 3, 2, 5, &mut rng);
        assert!(samples[..5].iter().all(|p| *p != sentinel));
        assert!(samples[5..].iter().all(|p| *p == sentinel));
    }

    #[test]
    fn single_sample_lands_in_unit_square() {
        let samples = generate(1, 1, 1, 6);
        assert_eq!(samples.len(), 1);
        assert!((0.0..1.0).contains(&samples[0].x));
        assert!((0.0..1.0).contains(&samples[0].y));
    }

    #[test]
    #[should_panic]
    fn grid_too_small_panics() {
        generate(2, 2, 5, 0);
    }

    #[test]
    #[should_panic]
    fn zero_count_panics() {
        generate(2, 2, 0, 0);
    }

    #[test]
    #[should_panic]
    fn short_buffer_panics() {
        let mut rng = RNG::default();
        let mut samples = vec![Point2f::ZERO; 3];
        correlated_multi_jitter(&mut samples, 2, 2, 4, &mut rng);
    }

    #[test]
    fn different_seeds_differ_but_stay_stratified() {
        let a = generate(4, 4, 16, 10);
        let b = generate(4, 4, 16, 11);
        assert_ne!(a, b);
        assert_one_per_cell(&a, 4, 4);
        assert_one_per_cell(&b, 4, 4);
    }

    #[test]
    fn pixel_samples_follow_generation_order() {
        let request = SampleRequest {
            samples_per_pixel: 6,
            n_sampled_dimensions: 2,
            samples_1d_array_sizes: vec![3],
            samples_2d_array_sizes: vec![5],
        };
        let samples = generate_pixel_samples(&request, 3, 2, false, &mut RNG::new(7));

        let mut rng = RNG::new(7);
        let mut expected = PixelSamples::new(&request);
        for s in expected.samples_1d.iter_mut() {
            stratified_sample_1d(s, &mut rng, false);
            shuffle(s, 6, 1, &mut rng);
        }
        for sub in expected.sample_array_1d[0].chunks_exact_mut(3) {
            stratified_sample_1d(sub, &mut rng, false);
            shuffle(sub, 3, 1, &mut rng);
        }
        for s in expected.samples_2d.iter_mut() {
            correlated_multi_jitter(s, 3, 2, 6, &mut rng);
        }
        for sub in expected.sample_array_2d[0].chunks_exact_mut(5) {
            correlated_multi_jitter(sub, 3, 2, 5, &mut rng);
        }

        assert_eq!(samples, expected);
    }

    #[test]
    fn unjittered_1d_samples_sit_at_stratum_centers() {
        let request = SampleRequest {
            samples_per_pixel: 4,
            n_sampled_dimensions: 1,
            ..Default::default()
        };
        let samples = generate_pixel_samples(&request, 2, 2, false, &mut RNG::new(8));

        let mut values = samples.samples_1d[0].clone();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for (i, v) in values.iter().enumerate() {
            assert!(approx_eq!(f32, *v, (i as f32 + 0.5) / 4.0, ulps = 2));
        }
    }

    #[test]
    fn sampler_defaults_from_params() {
        let sampler = MultiJitterSampler::from_params(&ParamSet::new(), false);
        assert_eq!(sampler.pixel_samples(), (4, 4));
        assert!(sampler.jitter_samples());
        assert_eq!(sampler.samples_1d().len(), 4);
        assert_eq!(sampler.samples_2d().len(), 4);
        assert_eq!(sampler.get_data().samples_per_pixel, 16);
    }

    #[test]
    fn sampler_params_are_read_and_sanitized() {
        let mut params = ParamSet::new();
        params.add_int("xsamples", &[3]);
        params.add_int("ysamples", &[0]);
        params.add_int("dimensions", &[2]);
        params.add_bool("jitter", &[false]);

        let sampler = MultiJitterSampler::from_params(&params, false);
        assert_eq!(sampler.pixel_samples(), (3, 1));
        assert!(!sampler.jitter_samples());
        assert_eq!(sampler.samples_2d().len(), 2);
        assert!(params.unused().is_empty());
    }

    #[test]
    fn quick_render_uses_one_sample_per_pixel() {
        let mut params = ParamSet::new();
        params.add_int("xsamples", &[8]);
        params.add_int("ysamples", &[8]);

        let sampler = MultiJitterSampler::from_params(&params, true);
        assert_eq!(sampler.pixel_samples(), (1, 1));
        assert_eq!(sampler.get_data().samples_per_pixel, 1);
    }

    #[test]
    fn start_pixel_fills_requested_arrays() {
        let mut sampler = MultiJitterSampler::new(2, 2, true, 1, Some(9));
        sampler.request_1d_array(3);
        sampler.request_2d_array(10);
        sampler.start_pixel(&Point2i::new(1, 2));

        let mut count = 0;
        loop {
            assert_eq!(sampler.get_1d_array(3).len(), 3);
            let array = sampler.get_2d_array(10);
            assert_one_per_stratum(array.iter().map(|p| p.y as f64).collect(), 10);
            assert!(sampler.get_2d_array(10).is_empty());
            count += 1;
            if !sampler.start_next_sample() {
                break;
            }
        }
        assert_eq!(count, 4);
        assert_one_per_cell(&sampler.samples_2d()[0], 2, 2);
    }

    #[test]
    fn camera_sample_uses_film_time_then_lens() {
        let mut sampler = MultiJitterSampler::new(2, 2, true, 2, Some(12));
        sampler.start_pixel(&Point2i::new(3, 4));
        let film = sampler.samples_2d()[0][0];
        let lens = sampler.samples_2d()[1][0];
        let time = sampler.samples_1d()[0][0];

        let cs = sampler.get_camera_sample(&Point2i::new(3, 4));
        assert_eq!(cs.p_film, Point2f::new(3.0 + film.x, 4.0 + film.y));
        assert_eq!(cs.p_lens, lens);
        assert_eq!(cs.time, time);
    }

    #[test]
    fn cloned_samplers_are_independent_and_reproducible() {
        let mut sampler = MultiJitterSampler::new(3, 3, true, 2, None);
        sampler.request_2d_array(5);
        let pixel = Point2i::new(0, 0);

        let mut a = sampler.clone_sampler(42);
        let mut b = sampler.clone_sampler(42);
        let mut c = sampler.clone_sampler(43);
        assert_eq!(a.get_data().samples_2d_array_sizes, vec![5]);

        a.start_pixel(&pixel);
        b.start_pixel(&pixel);
        c.start_pixel(&pixel);

        let (va, vb, vc) = (a.get_2d_array(5), b.get_2d_array(5), c.get_2d_array(5));
        assert_eq!(va, vb);
        assert_ne!(va, vc);
        assert_eq!(a.get_2d(), b.get_2d());
    }

    #[test]
    fn decompose_count_is_minimal_near_square() {
        check(1..100_000usize, |count| {
            let (m, n) = decompose_count(count);
            assert!(m * n >= count);
            assert!(m >= n && n >= 1);
            assert!(m - n <= 1);

            // The next smaller near-square grid is too small.
            let previous_area = if m == n { m * (m - 1) } else { n * n };
            assert!(previous_area < count);
        });
    }

    #[test]
    fn generates_count_points_in_unit_square() {
        check((grid_strategy(), any::<u64>()), |((m, n, count), seed)| {
            let samples = generate(m, n, count, seed);
            assert_eq!(samples.len(), count);
            for p in samples.iter() {
                assert!(p.x >= 0.0 && p.x < 1.0);
                assert!(p.y >= 0.0 && p.y < 1.0);
            }
        });
    }

    #[test]
    fn full_grids_hold_one_point_per_cell() {
        check((1..12usize, 1..12usize, any::<u64>()), |(m, n, seed)| {
            let samples = generate(m, n, m * n, seed);
            assert_one_per_cell(&samples, m, n);
        });
    }

    #[test]
    fn clipped_grids_keep_y_strata_and_x_columns() {
        check((grid_strategy(), any::<u64>()), |((m, n, count), seed)| {
            let samples = generate(m, n, count, seed);
            assert_one_per_stratum(samples.iter().map(|p| p.y as f64).collect(), count);

            // Every column band holds at most one point per row.
            let mut per_column = vec![0; m];
            for p in samples.iter() {
                per_column[min((p.x * m as Float) as usize, m - 1)] += 1;
            }
            assert!(per_column.iter().all(|&c| c <= n), "{per_column:?}");

            if count == m * n {
                assert_one_per_cell(&samples, m, n);
            }
        });
    }

    #[test]
    fn clipped_grids_may_share_a_cell() {
        // The stretch moves accepted y values across row boundaries, so a
        // column can hold two points in one row once cells are rejected.
        let shared = (2..60usize).any(|count| {
            let (m, n) = decompose_count(count);
            (0..50u64).any(|seed| {
                let samples = generate(m, n, count, seed);
                let mut cells: Vec<(usize, usize)> = samples
                    .iter()
                    .map(|p| ((p.x * m as Float) as usize, (p.y * n as Float) as usize))
                    .collect();
                cells.sort_unstable();
                cells.dedup();
                cells.len() < count
            })
        });
        assert!(shared);
    }

    #[test]
    fn same_seed_reproduces_samples() {
        check((grid_strategy(), any::<u64>()), |((m, n, count), seed)| {
            assert_eq!(generate(m, n, count, seed), generate(m, n, count, seed));
        });
    }

    #[test]
    fn shuffles_keep_row_and_column_structure() {
        check((grid_strategy(), any::<u64>()), |((m, n, count), seed)| {
            let mut rng = RNG::new(seed);
            let canonical = JitteredGrid::canonical(m, n, count, &mut rng);

            let mut grid = canonical.clone();
            grid.shuffle_rows(&mut rng);
            for i in 0..m {
                let mut before: Vec<f64> = (0..n).map(|j| canonical.point(i, j).x).collect();
                let mut after: Vec<f64> = (0..n).map(|j| grid.point(i, j).x).collect();
                before.sort_by(|a, b| a.partial_cmp(b).unwrap());
                after.sort_by(|a, b| a.partial_cmp(b).unwrap());
                assert_eq!(before, after);
                for j in 0..n {
                    assert_eq!(grid.point(i, j).y, canonical.point(i, j).y);
                }
            }

            let rows_shuffled = grid.clone();
            grid.shuffle_columns(&mut rng);
            for j in 0..n {
                let mut before: Vec<f64> = (0..m).map(|i| rows_shuffled.point(i, j).y).collect();
                let mut after: Vec<f64> = (0..m).map(|i| grid.point(i, j).y).collect();
                before.sort_by(|a, b| a.partial_cmp(b).unwrap());
                after.sort_by(|a, b| a.partial_cmp(b).unwrap());
                assert_eq!(before, after);
                for i in 0..m {
                    assert_eq!(grid.point(i, j).x, rows_shuffled.point(i, j).x);
                }
            }
            assert_eq!(grid.rejected(), m * n - count);

            // Fine x-strata over `m * n` and y-strata over `count` stay distinct.
            let mut x_strata = vec![];
            let mut y_strata = vec![];
            for j in 0..n {
                for i in 0..m {
                    let p = grid.point(i, j);
                    x_strata.push((p.x * (m * n) as f64).floor() as usize);
                    y_strata.push((p.y * count as f64).floor() as usize);
                }
            }
            x_strata.sort_unstable();
            y_strata.sort_unstable();
            assert_eq!(x_strata, (0..m * n).collect::<Vec<usize>>());
            assert_eq!(y_strata, (0..m * n).collect::<Vec<usize>>());
        });
    }
}
