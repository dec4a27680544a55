use crate::kernel;

/// Scalar reference implementation of the inner product.
///
/// Computes Σ `a[i] * b[i]` for `i` in `[0, n)` with [`f32::mul_add`], so every
/// term is folded with a single rounding step, matching the hardware FMA
/// behavior of the vectorized paths.
pub fn inner_product_scalar(a: &[f32], b: &[f32], n: usize) -> f32 {
    let mut sum = 0.0f32;
    for i in 0..n {
        sum = a[i].mul_add(b[i], sum);
    }
    sum
}

/// Computes the inner product Σ `a[i] * b[i]` for `i` in `[0, n)` using the
/// kernel variant selected at build time.
///
/// The lane-multiple prefix is reduced with vector fused multiply-add and
/// horizontally summed; the remainder is folded in index order on top of the
/// vector partial sum, which fixes a deterministic summation order for a given
/// build. Vector and scalar results agree within floating-point reassociation
/// error, not bit-for-bit.
///
/// `n == 0` returns exactly 0.0. Slices shorter than `n` are a precondition
/// violation and panic. Pure function, no side effects.
pub fn inner_product(a: &[f32], b: &[f32], n: usize) -> f32 {
    // The vectorized paths read raw lanes over the prefix, so the length
    // precondition must hold before dispatch.
    assert!(
        a.len() >= n && b.len() >= n,
        "inner product over {n} elements needs {n} elements in both buffers \
         (got {} and {})",
        a.len(),
        b.len()
    );

    kernel::inner_product(a, b, n)
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{AlignedBuffer, kernel::LANE_WIDTH};

    fn noise_buffer(rng: &mut StdRng, n: usize) -> AlignedBuffer {
        AlignedBuffer::from_vec((0..n).map(|_| rng.random_range(-1.0..1.0)).collect())
            .expect("allocation failed")
    }

    #[test]
    fn test_known_value() {
        // a[i] = b[i] = i for 256 elements: Σ i² = 5_559_680, exactly
        // representable in f32, so every summation order agrees.
        let ramp = AlignedBuffer::from_vec((0..256).map(|i| i as f32).collect())
            .expect("allocation failed");

        assert_eq!(inner_product(&ramp, &ramp, 256), 5_559_680.0);
        assert_eq!(inner_product_scalar(&ramp, &ramp, 256), 5_559_680.0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(inner_product(&[], &[], 0), 0.0);
    }

    #[test]
    fn test_zero_buffer_is_exactly_zero() {
        let zeros = AlignedBuffer::zeroed(512).expect("allocation failed");
        let mut rng = StdRng::seed_from_u64(7);
        let noise = noise_buffer(&mut rng, 512);

        assert_eq!(inner_product(&zeros, &noise, 512), 0.0);
    }

    #[test]
    fn test_matches_scalar_on_random_input() {
        let mut rng = StdRng::seed_from_u64(0xf00d);

        for n in [64, 256, 1024, 4096] {
            let a = noise_buffer(&mut rng, n);
            let b = noise_buffer(&mut rng, n);

            let vectorized = inner_product(&a, &b, n);
            let scalar = inner_product_scalar(&a, &b, n);

            // Reassociation bound: ε · n.
            assert!(
                (vectorized - scalar).abs() <= 1e-4 * n as f32,
                "n = {n}: {vectorized} vs {scalar}"
            );
        }
    }

    #[test]
    fn test_tail_handling() {
        // Exercises the prefix/remainder partition boundary.
        let n = LANE_WIDTH * 3 + 5;
        let mut rng = StdRng::seed_from_u64(0xbeef);
        let a = noise_buffer(&mut rng, n);
        let b = noise_buffer(&mut rng, n);

        let vectorized = inner_product(&a, &b, n);
        let scalar = inner_product_scalar(&a, &b, n);

        assert!(
            (vectorized - scalar).abs() <= 1e-4 * n as f32,
            "{vectorized} vs {scalar}"
        );
    }

    #[test]
    #[should_panic(expected = "needs")]
    fn test_panics_on_short_buffers() {
        let short = AlignedBuffer::zeroed(8).expect("allocation failed");
        let _ = inner_product(&short, &short, 1 << 24);
    }

    #[test]
    fn test_shorter_n_than_buffer() {
        let ramp = AlignedBuffer::from_vec((0..64).map(|i| i as f32).collect())
            .expect("allocation failed");

        // Only the first 3 elements participate: 0 + 1 + 4.
        assert_eq!(inner_product(&ramp, &ramp, 3), 5.0);
    }
}
