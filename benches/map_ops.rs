//! Insert/lookup throughput for the bit-trie map.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hashkv::{Config, HashKv};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn generate_keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("user:{:08}", i)).collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [1_000, 10_000, 100_000].iter() {
        let keys = generate_keys(*size);

        group.bench_with_input(BenchmarkId::new("HashKv", size), size, |b, _| {
            b.iter(|| {
                let mut map: HashKv<u64> = HashKv::new(16).unwrap();
                for (i, key) in keys.iter().enumerate() {
                    map.set(key.as_bytes(), i as u64).unwrap();
                }
                black_box(map)
            });
        });

        // Shallow trie: same keys, but lookups mostly walk chains.
        group.bench_with_input(BenchmarkId::new("HashKv/depth4", size), size, |b, _| {
            b.iter(|| {
                let mut map: HashKv<u64> = HashKv::new(4).unwrap();
                for (i, key) in keys.iter().enumerate() {
                    map.set(key.as_bytes(), i as u64).unwrap();
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for size in [1_000, 10_000, 100_000].iter() {
        let keys = generate_keys(*size);

        let mut map: HashKv<u64> = HashKv::with_config(Config {
            max_level: 16,
            ..Config::default()
        })
        .unwrap();
        for (i, key) in keys.iter().enumerate() {
            map.set(key.as_bytes(), i as u64).unwrap();
        }

        let mut probe_order = keys.clone();
        probe_order.shuffle(&mut StdRng::seed_from_u64(42));

        group.bench_with_input(BenchmarkId::new("HashKv", size), size, |b, _| {
            b.iter(|| {
                let mut sum = 0u64;
                for key in &probe_order {
                    sum = sum.wrapping_add(*map.get(key.as_bytes()).unwrap().unwrap());
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("HashKv/miss", size), size, |b, _| {
            b.iter(|| {
                let mut misses = 0usize;
                for key in &probe_order {
                    // Absent keys: same prefix, different namespace.
                    let absent = format!("none:{key}");
                    if map.get(absent.as_bytes()).unwrap().is_none() {
                        misses += 1;
                    }
                }
                black_box(misses)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup);
criterion_main!(benches);
