use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const RNG_SEED: u64 = 0x5EED_2026;
const VALUE_RANGE: std::ops::RangeInclusive<i64> = -1_000_000_000..=1_000_000_000;

/// `(max input size, sample size, warm-up ms, measurement ms)`, smallest first.
const RUNTIME_TIERS: [(usize, usize, u64, u64); 3] = [
    (10_000, 15, 100, 200),
    (100_000, 15, 500, 1000),
    (usize::MAX, 10, 800, 1500),
];

/// Applies the first tier whose size bound covers `size`.
pub fn apply_runtime_config_for_size<M: Measurement>(
    size: usize,
    group: &mut BenchmarkGroup<'_, M>,
) {
    let Some(&(_, samples, warm_up_ms, measure_ms)) =
        RUNTIME_TIERS.iter().find(|&&(max_size, ..)| size <= max_size)
    else {
        return;
    };
    group.sample_size(samples);
    group.warm_up_time(Duration::from_millis(warm_up_ms));
    group.measurement_time(Duration::from_millis(measure_ms));
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

pub fn random_values<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<i64> {
    (0..len).map(|_| rng.random_range(VALUE_RANGE)).collect()
}

/// `count` 1-based inclusive ranges `(l, r)` with `1 <= l <= r <= len`.
pub fn random_ranges<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    count: usize,
) -> Vec<(usize, usize)> {
    if len == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|_| {
            let l = rng.random_range(1..=len);
            let r = rng.random_range(l..=len);
            (l, r)
        })
        .collect()
}
