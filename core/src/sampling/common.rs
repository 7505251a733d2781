//! Common sampling functions.

use crate::pbrt::*;
use crate::rng::*;

/// Fill a slice with 1D samples, one per equal-width stratum of [0, 1).
///
/// * `samples` - The slice to fill; its length is the number of strata.
/// * `rng`     - Random number generator.
/// * `jitter`  - Jitter the samples inside their strata; otherwise use the
///               stratum centers.
pub fn stratified_sample_1d<R: RandomSource + ?Sized>(
    samples: &mut [Float],
    rng: &mut R,
    jitter: bool,
) {
    let inv_n_samples = 1.0 / samples.len() as Float;

    for (i, sample) in samples.iter_mut().enumerate() {
        let delta = if jitter { rng.uniform_float() } else { 0.5 };
        *sample = min((i as Float + delta) * inv_n_samples, ONE_MINUS_EPSILON);
    }
}

/// Randomly permute a slice containing n-dimensional values in a linear
/// structure.
///
/// * `v`            - The slice to shuffle.
/// * `count`        - Number n-dimensional values.
/// * `n_dimensions` - Number of total dimensions.
/// * `rng`          - Random number generator.
pub fn shuffle<T, R: RandomSource + ?Sized>(
    v: &mut [T],
    count: usize,
    n_dimensions: usize,
    rng: &mut R,
) {
    assert!(count * n_dimensions <= v.len());

    for i in 0..count {
        let other = i + rng.uniform_u32_bounded((count - i) as u32) as usize;
        for j in 0..n_dimensions {
            v.swap(n_dimensions * i + j, n_dimensions * other + j);
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
