//! AVX+FMA optimized kernels processing 8 f32 lanes per iteration.

/// AVX+FMA implementation of the inner product with tail handling.
#[target_feature(enable = "avx,fma")]
pub(crate) unsafe fn inner_product_avx_fma(a: &[f32], b: &[f32], n: usize) -> f32 {
    use core::arch::x86_64::*;

    unsafe {
        const SIMD_WIDTH: usize = 8;
        let prefix = n - n % SIMD_WIDTH;

        // Initialize the lane accumulator to zero.
        let mut acc = _mm256_setzero_ps();

        for i in (0..prefix).step_by(SIMD_WIDTH) {
            let a_vec = _mm256_loadu_ps(a.as_ptr().add(i));
            let b_vec = _mm256_loadu_ps(b.as_ptr().add(i));

            // Fused multiply-add into the running accumulator.
            acc = _mm256_fmadd_ps(a_vec, b_vec, acc);
        }

        // Horizontal sum.

        // Step 1: Extract and add high/low 128-bit lanes to get a single 128-bit vector.
        let high = _mm256_extractf128_ps(acc, 1);
        let low = _mm256_castps256_ps128(acc);
        let sum128 = _mm_add_ps(high, low);

        // Step 2: Horizontal sum within the 128-bit vector using shuffle.
        let shuf = _mm_shuffle_ps(sum128, sum128, 0b01_00_11_10);
        let sum1 = _mm_add_ps(sum128, shuf);
        let shuf2 = _mm_shuffle_ps(sum1, sum1, 0b00_00_00_01);
        let sum2 = _mm_add_ps(sum1, shuf2);
        let mut sum = _mm_cvtss_f32(sum2);

        // Fold the scalar remainder in index order on top of the partial sum.
        for i in prefix..n {
            sum = a[i].mul_add(b[i], sum);
        }

        sum
    }
}

/// AVX+FMA implementation of one pixel-major FIR block.
///
/// Processes 8 contiguous output pixels per vector register, accumulating the
/// weighted tap sum with fused multiply-add before a single contiguous store.
#[target_feature(enable = "avx,fma")]
pub(crate) unsafe fn fir_block_avx_fma(
    out: &mut [f32],
    frames: &[&[f32]],
    coeffs: &[f32],
    base: usize,
) {
    use core::arch::x86_64::*;

    unsafe {
        const SIMD_WIDTH: usize = 8;
        let prefix = out.len() - out.len() % SIMD_WIDTH;

        assert_eq!(base % SIMD_WIDTH, 0);
        assert_eq!(out.as_ptr().addr() % 32, 0);

        for j in (0..prefix).step_by(SIMD_WIDTH) {
            let mut acc = _mm256_setzero_ps();

            for (&c, frame) in coeffs.iter().zip(frames) {
                debug_assert_eq!(frame.as_ptr().addr() % 32, 0);

                // Aligned load: frame bases are 32-byte aligned and base + j is
                // a lane multiple.
                let pixels = _mm256_load_ps(frame.as_ptr().add(base + j));
                acc = _mm256_fmadd_ps(pixels, _mm256_set1_ps(c), acc);
            }

            _mm256_store_ps(out.as_mut_ptr().add(j), acc);
        }

        if prefix < out.len() {
            super::fir_block_scalar(&mut out[prefix..], frames, coeffs, base + prefix);
        }
    }
}
