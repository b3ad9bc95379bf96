//! Deterministic query-interval generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sigbench_core::models::QuerySet;

use crate::errors::BenchError;

/// Generate `count` fixed-width query intervals within `[0, max_index)`.
///
/// The generator owns its RNG, seeded from `seed` on every call, so the same
/// `(seed, count, interval_size, max_index)` always yields a bit-identical
/// [`QuerySet`]. Starts are drawn uniformly from
/// `[0, max_index - interval_size]`.
///
/// Misconfiguration fails here, before any timing begins: an interval wider
/// than the chromosome would silently corrupt every subsequent measurement.
pub fn generate(
    seed: u64,
    count: usize,
    interval_size: u32,
    max_index: u32,
) -> Result<QuerySet, BenchError> {
    if interval_size > max_index {
        return Err(BenchError::IntervalTooLarge {
            interval_size,
            max_index,
        });
    }
    if count == 0 {
        return Err(BenchError::NoTestCases);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let upper = max_index - interval_size;
    let starts = (0..count).map(|_| rng.gen_range(0..=upper)).collect();

    Ok(QuerySet::from_starts(starts, interval_size))
}
