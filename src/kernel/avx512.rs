//! AVX-512 optimized kernels processing 16 f32 lanes per iteration.

/// AVX-512 implementation of the inner product with tail handling.
#[target_feature(enable = "avx512f")]
pub(crate) unsafe fn inner_product_avx512(a: &[f32], b: &[f32], n: usize) -> f32 {
    use core::arch::x86_64::*;

    unsafe {
        const SIMD_WIDTH: usize = 16;
        let prefix = n - n % SIMD_WIDTH;

        // Initialize the lane accumulator to zero.
        let mut acc = _mm512_setzero_ps();

        for i in (0..prefix).step_by(SIMD_WIDTH) {
            let a_vec = _mm512_loadu_ps(a.as_ptr().add(i));
            let b_vec = _mm512_loadu_ps(b.as_ptr().add(i));

            // Fused multiply-add into the running accumulator.
            acc = _mm512_fmadd_ps(a_vec, b_vec, acc);
        }

        // Horizontal sum.
        let mut sum = _mm512_reduce_add_ps(acc);

        // Fold the scalar remainder in index order on top of the partial sum.
        for i in prefix..n {
            sum = a[i].mul_add(b[i], sum);
        }

        sum
    }
}

/// AVX-512 implementation of one pixel-major FIR block.
///
/// Processes 16 contiguous output pixels per vector register, accumulating the
/// weighted tap sum with fused multiply-add before a single contiguous store.
#[target_feature(enable = "avx512f")]
pub(crate) unsafe fn fir_block_avx512(
    out: &mut [f32],
    frames: &[&[f32]],
    coeffs: &[f32],
    base: usize,
) {
    use core::arch::x86_64::*;

    unsafe {
        const SIMD_WIDTH: usize = 16;
        let prefix = out.len() - out.len() % SIMD_WIDTH;

        assert_eq!(base % SIMD_WIDTH, 0);
        assert_eq!(out.as_ptr().addr() % 64, 0);

        for j in (0..prefix).step_by(SIMD_WIDTH) {
            let mut acc = _mm512_setzero_ps();

            for (&c, frame) in coeffs.iter().zip(frames) {
                debug_assert_eq!(frame.as_ptr().addr() % 64, 0);

                // Aligned load: frame bases are 64-byte aligned and base + j is
                // a lane multiple.
                let pixels = _mm512_load_ps(frame.as_ptr().add(base + j));
                acc = _mm512_fmadd_ps(pixels, _mm512_set1_ps(c), acc);
            }

            _mm512_store_ps(out.as_mut_ptr().add(j), acc);
        }

        if prefix < out.len() {
            super::fir_block_scalar(&mut out[prefix..], frames, coeffs, base + prefix);
        }
    }
}
