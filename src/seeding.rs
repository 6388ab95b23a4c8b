use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

/// A deterministic source of randomness that an environment can own and reseed
///
/// Every seedable [`rand`] generator implements this, so environments default to
/// [`StdRng`](rand::rngs::StdRng). Tests can inject a scripted source instead.
pub trait RandomSource: Sized {
    /// Build a generator from `seed`, or from fresh entropy when `None`
    ///
    /// **Returns** the generator and the seed actually used, so the run can be reproduced
    fn seeded(seed: Option<u64>) -> (Self, u64);

    /// Draw from the half-open interval `[low, high)`
    ///
    /// When `low >= high` the interval is empty and `low` is returned. Both bounds are
    /// expected to be finite, their difference may overflow.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

impl<R: Rng + SeedableRng> RandomSource for R {
    fn seeded(seed: Option<u64>) -> (Self, u64) {
        let seed = seed.unwrap_or_else(rand::random);
        (R::seed_from_u64(seed), seed)
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high || low.is_nan() || high.is_nan() {
            low
        } else if (high - low).is_finite() {
            Uniform::new(low, high).sample(self)
        } else {
            // Interpolate so the span itself is never formed
            let t: f64 = self.gen();
            low * (1.0 - t) + high * t
        }
    }
}
