use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huffpack::frequency::FrequencyTable;
use huffpack::tree::HuffmanTree;
use huffpack::{decode, encode};
use rand::{Rng, SeedableRng};

fn skewed_input(len: usize) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    (0..len)
        .map(|_| {
            if rng.gen_bool(0.8) {
                rng.gen_range(b'a'..=b'z')
            } else {
                rng.gen()
            }
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for size in [4 * 1024, 64 * 1024, 1024 * 1024] {
        let data = skewed_input(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| encode(black_box(data)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for size in [4 * 1024, 64 * 1024, 1024 * 1024] {
        let container = match encode(&skewed_input(size)) {
            Ok(container) => container,
            Err(_) => continue,
        };
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &container, |b, container| {
            b.iter(|| decode(black_box(container)))
        });
    }
    group.finish();
}

fn bench_tree_build(c: &mut Criterion) {
    let all: Vec<u8> = (0..=255).cycle().take(64 * 1024).collect();
    let table = FrequencyTable::from_bytes(&all);
    c.bench_function("tree_build_257_symbols", |b| {
        b.iter(|| HuffmanTree::build(black_box(&table)))
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_tree_build);
criterion_main!(benches);
