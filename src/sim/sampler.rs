//! Random draws used by the Monte Carlo engine.

use rand::rngs::StdRng;
use rand_distr::{Binomial, Distribution};

/// Draws the number of successes in `n` independent Bernoulli(`p`) trials.
///
/// Probabilities at or below zero always give 0 and at or above one give `n`.
/// Cost does not grow with `n`, so device counts in the millions are fine.
pub fn binomial(rng: &mut StdRng, n: u32, p: f32) -> u32 {
    if n == 0 || p.is_nan() || p <= 0.0 {
        return 0;
    }
    if p >= 1.0 {
        return n;
    }
    // The draw never exceeds `n`, so it fits back into a u32.
    Binomial::new(u64::from(n), f64::from(p)).map_or(0, |d| d.sample(rng) as u32)
}
