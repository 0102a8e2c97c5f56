use std::hint::black_box;

use bench::{apply_runtime_config_for_size, default_rng, random_ranges, random_values};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::Rng;

use treap::{Aggregate, DualTreap, Operation, PriorityRng, RangeSum, SizeOnly, Treap};

const SIZES: [usize; 4] = [1_000, 10_000, 100_000, 200_000];
const OPS_PER_SIZE: usize = 1_000;
const SEED: u64 = 0x5EED_BB57;

fn bench(c: &mut Criterion) {
    bench_build(c);
    bench_split_merge::<SizeOnly>(c, "split_merge/size_only");
    bench_split_merge::<RangeSum>(c, "split_merge/range_sum");
    bench_dual(c);
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let mut rng = default_rng();
    for &size in &SIZES {
        apply_runtime_config_for_size(size, &mut group);
        let values = random_values(&mut rng, size);
        group.bench_with_input(BenchmarkId::new("dual", size), &values, |b, values| {
            b.iter(|| {
                let dual = DualTreap::with_seed(values.iter().copied(), SEED);
                black_box(dual.len())
            });
        });
    }
    group.finish();
}

fn bench_split_merge<P>(c: &mut Criterion, name: &str)
where
    P: Aggregate<Key = i64>,
{
    let mut group = c.benchmark_group(name);
    let mut rng = default_rng();
    for &size in &SIZES {
        apply_runtime_config_for_size(size, &mut group);
        let values = random_values(&mut rng, size);
        let cuts: Vec<usize> = (0..OPS_PER_SIZE)
            .map(|_| rng.random_range(0..=size))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &cuts, |b, cuts| {
            b.iter_batched(
                || {
                    let mut priorities = PriorityRng::with_seed(SEED);
                    Treap::<P>::from_values(values.iter().copied(), &mut priorities)
                },
                |mut tree| {
                    for &cut in cuts {
                        if let Ok(right) = tree.split_off(cut) {
                            tree = right.merge(tree);
                        }
                    }
                    black_box(tree.len())
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_dual(c: &mut Criterion) {
    let mut group = c.benchmark_group("dual_ops");
    let mut rng = default_rng();
    for &size in &SIZES {
        apply_runtime_config_for_size(size, &mut group);
        let values = random_values(&mut rng, size);
        let ops: Vec<Operation> = random_ranges(&mut rng, size, OPS_PER_SIZE)
            .into_iter()
            .map(|(l, r)| {
                if rng.random_bool(0.5) {
                    Operation::Swap { l, r }
                } else {
                    Operation::SwapAndReport { l, r }
                }
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &ops, |b, ops| {
            b.iter_batched(
                || DualTreap::with_seed(values.iter().copied(), SEED),
                |mut dual| {
                    let mut checksum = 0i64;
                    for &op in ops {
                        if let Ok(Some(sum)) = dual.apply(op) {
                            checksum = checksum.wrapping_add(sum);
                        }
                    }
                    black_box(checksum)
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
