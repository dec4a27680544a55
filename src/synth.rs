//! Synthetic frame source: Gaussian noise plus a pulsing circle.
//!
//! Produces the deterministic frame stream the FIR kernels are exercised
//! against: every frame is dense Gaussian noise with a filled circle in the
//! center whose intensity oscillates across the frame index. Only the
//! interface matters to the kernels: equal-dimension frames, enough of them
//! ahead of any requested offset.

use std::f32::consts::TAU;

use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

use crate::{Frame, KernelError};

/// Mean of the background noise.
const NOISE_MEAN: f32 = 100.0;

/// Standard deviation of the background noise.
const NOISE_SIGMA: f32 = 50.0;

/// Period, in frames, of the circle's intensity oscillation.
const PULSE_PERIOD: usize = 5;

/// A 20 tap band-pass filter with palindromic coefficients.
///
/// The kernels treat taps as opaque weights; the symmetry is a property of
/// this particular filter design, not a contract.
pub const BANDPASS_ORDER_20: [f32; 20] = [
    0.0101, -0.0053, -0.0306, -0.0160, 0.0641, 0.0891, -0.0436, -0.1685, -0.0584, 0.1616, 0.1616,
    -0.0584, -0.1685, -0.0436, 0.0891, 0.0641, -0.0160, -0.0306, -0.0053, 0.0101,
];

/// Generates `count` frames of `rows` × `cols` Gaussian noise with a pulsing
/// filled circle in the center.
///
/// Frame `i` carries a circle of intensity `20 · sin(i · 2π / 5) + 20` at the
/// frame center with radius `min(rows, cols) / 6`, added on top of the noise.
/// The stream is fully determined by `seed`, so two calls with identical
/// arguments produce bit-identical frames.
pub fn generate_frames(
    count: usize,
    rows: usize,
    cols: usize,
    seed: u64,
) -> Result<Vec<Frame>, KernelError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(NOISE_MEAN, NOISE_SIGMA).expect("invalid noise distribution");

    let center = (rows as isize / 2, cols as isize / 2);
    let radius = (rows.min(cols) / 6) as isize;
    let radius_sq = radius * radius;

    let mut frames = Vec::with_capacity(count);

    for i in 0..count {
        let intensity = 20.0 * (i as f32 * TAU / PULSE_PERIOD as f32).sin() + 20.0;

        let frame = Frame::from_fn(rows, cols, |row, col| {
            let noise = normal.sample(&mut rng);
            let dr = row as isize - center.0;
            let dc = col as isize - center.1;

            if dr * dr + dc * dc <= radius_sq {
                noise + intensity
            } else {
                noise
            }
        })?;

        frames.push(frame);
    }

    Ok(frames)
}
