use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use framefir::{AlignedBuffer, inner_product, inner_product_scalar};
use rand_aes::tls::rand_f32;

fn generate_white_noise(size: usize) -> AlignedBuffer {
    AlignedBuffer::from_vec((0..size).map(|_| rand_f32()).collect())
        .expect("failed to allocate aligned benchmark input")
}

fn bench_inner_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("inner_product");

    for n in [256usize, 4096, 65_536] {
        let a = generate_white_noise(n);
        let b = generate_white_noise(n);

        let bytes_per_iteration = 2 * n * size_of::<f32>();
        group.throughput(Throughput::Bytes(bytes_per_iteration as u64));

        group.bench_with_input(BenchmarkId::new("simd", n), &n, |bench, &n| {
            bench.iter(|| black_box(inner_product(black_box(&a), black_box(&b), n)));
        });

        group.bench_with_input(BenchmarkId::new("scalar", n), &n, |bench, &n| {
            bench.iter(|| black_box(inner_product_scalar(black_box(&a), black_box(&b), n)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_inner_product);
criterion_main!(benches);
