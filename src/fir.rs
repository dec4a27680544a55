use rayon::prelude::*;

use crate::{AlignedBuffer, Frame, KernelError, kernel};

/// Pixels per parallel work unit of the vectorized path.
///
/// Must be a multiple of the widest supported lane width so every block starts
/// on an aligned lane boundary; only the final block of a frame can carry a
/// scalar tail.
const BLOCK_PIXELS: usize = 2048;

const _: () = assert!(BLOCK_PIXELS % 16 == 0);

/// Fixed-order FIR filter accumulating a sliding window of frames.
///
/// The filter owns its tap table in vector-aligned memory and carries no other
/// state, so one instance can be shared across threads and called repeatedly
/// with a sliding `offset` to emulate a streaming window. Tap values are
/// treated as opaque weights; no symmetry is assumed.
///
/// All three accumulation variants compute, for every output pixel,
///
/// ```text
/// out(row, col) = Σ  coeffs[i] * frames[offset + i](row, col),  i in 0..taps
/// ```
///
/// with tap order ascending, and produce numerically close (not bit-identical)
/// results.
pub struct FirFilter {
    coeffs: AlignedBuffer,
}

impl FirFilter {
    /// Creates a filter from an ordered tap table.
    ///
    /// # Panics
    ///
    /// Panics if `coeffs` is empty.
    pub fn new(coeffs: &[f32]) -> Result<Self, KernelError> {
        assert!(!coeffs.is_empty(), "FIR filter needs at least one tap");

        Ok(Self {
            coeffs: AlignedBuffer::from_vec(coeffs.to_vec())?,
        })
    }

    /// Number of filter taps (the window length).
    pub fn taps(&self) -> usize {
        self.coeffs.len()
    }

    /// The tap table, in ascending tap order.
    pub fn coefficients(&self) -> &[f32] {
        &self.coeffs
    }

    /// Validates the window bounds and frame shapes, returning the window's
    /// pixel slices.
    ///
    /// The shape invariant is checked against frame headers only (first versus
    /// last per the frame source contract, plus the frames in between so the
    /// vectorized loads stay in bounds); pixels are never scanned.
    fn window<'a>(
        &self,
        frames: &'a [Frame],
        offset: usize,
    ) -> Result<Vec<&'a [f32]>, KernelError> {
        let taps = self.taps();

        if offset.checked_add(taps).is_none_or(|end| end > frames.len()) {
            return Err(KernelError::IndexOutOfRange {
                offset,
                taps,
                frames: frames.len(),
            });
        }

        let window = &frames[offset..offset + taps];
        let first = &window[0];

        for frame in window.iter().rev() {
            if !first.same_shape(frame) {
                return Err(KernelError::ShapeMismatch {
                    expected: first.shape(),
                    got: frame.shape(),
                });
            }
        }

        Ok(window.iter().map(|frame| frame.as_slice()).collect())
    }

    /// Buffer-linear combination: tap-outer, pixel-inner.
    ///
    /// For each tap, scales the whole frame by its coefficient and adds it
    /// into the accumulator frame. Plain multiply-then-add, the baseline the
    /// fused variants are validated against.
    pub fn accumulate(&self, frames: &[Frame], offset: usize) -> Result<Frame, KernelError> {
        let window = self.window(frames, offset)?;
        let (rows, cols) = frames[offset].shape();
        let mut out = Frame::zeroed(rows, cols)?;

        let pixels = out.as_mut_slice();
        for (&c, frame) in self.coeffs.iter().zip(&window) {
            for (pixel, &input) in pixels.iter_mut().zip(*frame) {
                *pixel += c * input;
            }
        }

        Ok(out)
    }

    /// Pixel-major fused accumulation: pixel-outer, tap-inner.
    ///
    /// Every output pixel independently accumulates its weighted tap sum with
    /// scalar fused multiply-add.
    pub fn accumulate_pixelwise(
        &self,
        frames: &[Frame],
        offset: usize,
    ) -> Result<Frame, KernelError> {
        let window = self.window(frames, offset)?;
        let (rows, cols) = frames[offset].shape();
        let mut out = Frame::zeroed(rows, cols)?;

        kernel::fir_block_scalar(out.as_mut_slice(), &window, &self.coeffs, 0);

        Ok(out)
    }

    /// Vectorized pixel-major accumulation, parallel across pixel blocks.
    ///
    /// The output buffer is partitioned into disjoint contiguous blocks of
    /// [`BLOCK_PIXELS`]; each worker writes only its own block and reads only
    /// the shared immutable window and tap table, so no locking is involved.
    /// Within a block, [`crate::LANE_WIDTH`] contiguous pixels are processed per
    /// vector register with aligned loads, and the non-lane-multiple tail of
    /// the frame falls back to the scalar path.
    ///
    /// Each output pixel's full tap sum is computed by a single worker, so the
    /// result is bit-identical for any worker count. The degree of parallelism
    /// follows the ambient rayon thread pool (install a
    /// [`rayon::ThreadPool`] to tune it).
    pub fn accumulate_simd(&self, frames: &[Frame], offset: usize) -> Result<Frame, KernelError> {
        let window = self.window(frames, offset)?;
        let (rows, cols) = frames[offset].shape();
        let mut out = Frame::zeroed(rows, cols)?;

        out.as_mut_slice()
            .par_chunks_mut(BLOCK_PIXELS)
            .enumerate()
            .for_each(|(chunk, block)| {
                kernel::fir_block(block, &window, &self.coeffs, chunk * BLOCK_PIXELS);
            });

        Ok(out)
    }
}
