//! Lane-width abstraction and compile-time SIMD kernel selection.
//!
//! Exactly one kernel variant is compiled per target configuration:
//!
//! - **AVX-512**: 16 f32 per iteration, 64-byte aligned loads (x86_64, `avx512f`)
//! - **AVX+FMA**: 8 f32 per iteration, 32-byte aligned loads (x86_64, `avx` + `fma`)
//! - **Scalar**: auto-vectorized fallback for all other configurations
//!
//! The selection is made once at build time through `#[cfg]` attributes; the
//! algorithms above this module are written against [`LANE_WIDTH`] and
//! [`ALIGNMENT`] and never name an instruction set themselves.

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx",
    target_feature = "fma",
    not(target_feature = "avx512f")
))]
mod avx;

#[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))]
mod avx512;

/// Number of f32 elements one vector register of the selected kernel holds.
#[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))]
pub const LANE_WIDTH: usize = 16;

/// Number of f32 elements one vector register of the selected kernel holds.
#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx",
    target_feature = "fma",
    not(target_feature = "avx512f")
))]
pub const LANE_WIDTH: usize = 8;

/// Number of f32 elements one vector register of the selected kernel holds.
#[cfg(not(all(
    target_arch = "x86_64",
    any(
        target_feature = "avx512f",
        all(target_feature = "avx", target_feature = "fma")
    )
)))]
pub const LANE_WIDTH: usize = 1;

/// Byte alignment every vectorized buffer must satisfy for the selected kernel.
pub const ALIGNMENT: usize = if LANE_WIDTH == 1 {
    8
} else {
    LANE_WIDTH * size_of::<f32>()
};

/// Human-readable description of the kernel the crate was compiled for.
pub const fn description() -> &'static str {
    match LANE_WIDTH {
        16 => "AVX-512 (16 lanes, 64-byte alignment)",
        8 => "AVX+FMA (8 lanes, 32-byte alignment)",
        _ => "scalar (1 lane, auto-vectorized)",
    }
}

/// Dispatch function for the inner product with compile-time SIMD selection.
///
/// Computes the fused multiply-add sum of `a[i] * b[i]` for `i` in `[0, n)`.
/// The vectorized paths reduce the lane-multiple prefix with vector FMA and
/// fold the scalar remainder in index order on top of the partial sum.
#[inline(always)]
pub(crate) fn inner_product(a: &[f32], b: &[f32], n: usize) -> f32 {
    #[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))]
    {
        // Safety: We've checked that the avx512f feature is enabled at compile time.
        unsafe { avx512::inner_product_avx512(a, b, n) }
    }

    #[cfg(all(
        target_arch = "x86_64",
        target_feature = "avx",
        target_feature = "fma",
        not(target_feature = "avx512f")
    ))]
    {
        // Safety: We've checked that the avx and fma features are enabled at compile time.
        unsafe { avx::inner_product_avx_fma(a, b, n) }
    }

    #[cfg(not(all(
        target_arch = "x86_64",
        any(
            target_feature = "avx512f",
            all(target_feature = "avx", target_feature = "fma")
        )
    )))]
    crate::inner::inner_product_scalar(a, b, n)
}

/// Dispatch function for one block of the pixel-major FIR accumulation.
///
/// Writes into `out` the weighted tap sum of the pixels starting at global
/// pixel index `base`: `out[j] = Σ coeffs[i] * frames[i][base + j]`.
///
/// The vectorized paths require `base` to be a multiple of [`LANE_WIDTH`] so
/// that aligned loads stay valid at every block boundary; the trailing
/// non-lane-multiple elements of `out` are handled by the scalar fallback.
#[inline(always)]
pub(crate) fn fir_block(out: &mut [f32], frames: &[&[f32]], coeffs: &[f32], base: usize) {
    #[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))]
    {
        // Safety: We've checked that the avx512f feature is enabled at compile time.
        unsafe { avx512::fir_block_avx512(out, frames, coeffs, base) }
    }

    #[cfg(all(
        target_arch = "x86_64",
        target_feature = "avx",
        target_feature = "fma",
        not(target_feature = "avx512f")
    ))]
    {
        // Safety: We've checked that the avx and fma features are enabled at compile time.
        unsafe { avx::fir_block_avx_fma(out, frames, coeffs, base) }
    }

    #[cfg(not(all(
        target_arch = "x86_64",
        any(
            target_feature = "avx512f",
            all(target_feature = "avx", target_feature = "fma")
        )
    )))]
    fir_block_scalar(out, frames, coeffs, base)
}

/// Scalar implementation of one pixel-major FIR block.
///
/// Each output pixel accumulates its full tap sum independently with fused
/// multiply-add, tap order ascending. Also serves as the remainder path of the
/// vectorized kernels.
pub(crate) fn fir_block_scalar(out: &mut [f32], frames: &[&[f32]], coeffs: &[f32], base: usize) {
    for (j, pixel) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (&c, frame) in coeffs.iter().zip(frames) {
            acc = c.mul_add(frame[base + j], acc);
        }
        *pixel = acc;
    }
}
