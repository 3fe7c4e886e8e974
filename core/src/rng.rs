//! Deterministic random number generation for synthesized chart data.
//!
//! RULE: Nothing in the core may call a platform RNG.
//! All randomness flows through SeriesRng instances derived from the
//! master seed in DashboardConfig.
//!
//! Each series gets its own stream, seeded from
//! (master_seed XOR hash(stream_key)). This means:
//!   - The same investment always renders the same chart for a given seed.
//!   - Adding an investment never changes another investment's chart.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A deterministic RNG for a single series.
pub struct SeriesRng {
    inner: Pcg64Mcg,
}

impl SeriesRng {
    pub fn new(master_seed: u64, stream_key: &str) -> Self {
        let derived_seed =
            master_seed ^ stable_hash(stream_key).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self { inner: Pcg64Mcg::seed_from_u64(derived_seed) }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a float uniformly in [-half_width, +half_width).
    pub fn symmetric(&mut self, half_width: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * half_width
    }
}

/// Hands out per-series RNGs from one master seed.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_series(&self, stream_key: &str) -> SeriesRng {
        SeriesRng::new(self.master_seed, stream_key)
    }
}

/// FNV-1a. Stable across builds and platforms, unlike std's hasher.
fn stable_hash(s: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME:  u64 = 0x0000_0100_0000_01b3;
    s.bytes().fold(OFFSET, |h, b| (h ^ b as u64).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_same_stream() {
        let bank = RngBank::new(42);
        let mut a = bank.for_series("inv-1");
        let mut b = bank.for_series("inv-1");
        for _ in 0..16 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn symmetric_stays_in_band() {
        let mut rng = RngBank::new(7).for_series("band");
        for _ in 0..1_000 {
            let x = rng.symmetric(0.05);
            assert!((-0.05..0.05).contains(&x), "{x} outside ±0.05");
        }
    }

    #[test]
    fn different_keys_diverge() {
        let bank = RngBank::new(42);
        let a: Vec<u64> = {
            let mut r = bank.for_series("inv-1");
            (0..4).map(|_| r.next_f64().to_bits()).collect()
        };
        let b: Vec<u64> = {
            let mut r = bank.for_series("inv-2");
            (0..4).map(|_| r.next_f64().to_bits()).collect()
        };
        assert_ne!(a, b);
    }
}
