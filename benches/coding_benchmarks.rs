use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use huffman_coder::{encode, Coder, CoderConfig, DecodeStrategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sample(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len)
        .map(|_| {
            let x: f64 = rng.gen();
            (x * x * 64.0) as u8
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for len in [1_000, 10_000, 100_000] {
        let data = sample(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, data| {
            b.iter(|| encode(black_box(data)).unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let data = sample(10_000);
    let encoded = encode(&data).unwrap();
    let mut group = c.benchmark_group("decode");
    for strategy in [DecodeStrategy::LongestFirst, DecodeStrategy::PrefixLookup] {
        let coder = Coder::new(CoderConfig {
            decode_strategy: strategy,
            ..CoderConfig::default()
        });
        group.bench_function(format!("{:?}", strategy), |b| {
            b.iter(|| coder.decode(black_box(&encoded)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
