//! Random sampling primitives shared by every problem family.

use rand::Rng;
use tracing::debug;

/// In-place Fisher-Yates shuffle: for `i` from the last index down to 1,
/// swap with a uniformly chosen index in `[0, i]`.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle a candidate pool and keep the first `amount` entries.
///
/// A pool smaller than `amount` is returned whole (shuffled).
pub fn take_random<T, R: Rng>(mut pool: Vec<T>, amount: usize, rng: &mut R) -> Vec<T> {
    shuffle(&mut pool, rng);
    if pool.len() < amount {
        debug!(
            target: "arith_drill_gen",
            available = pool.len(),
            requested = amount,
            "candidate pool under-filled"
        );
    }
    pool.truncate(amount);
    pool
}

/// Uniform `f64` in `[lo, hi)`, computed as `lo + U * (hi - lo)`.
pub trait RngF64Ext {
    fn gen_span(&mut self, lo: f64, hi: f64) -> f64;
}

impl<R: Rng> RngF64Ext for R {
    fn gen_span(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.gen::<f64>() * (hi - lo)
    }
}
