//! Injectable random sources.
//!
//! Every synthesizer draws uniform samples through [`RandomSource`] instead
//! of a process-wide generator. Production code wraps a `rand` generator
//! (entropy-seeded or seeded from a [`SeedHierarchy`]); tests pass a
//! [`FixedSource`] so every noise term collapses to a known value.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// OS-entropy seeded generator. Output differs on every call.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible generator for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always returns the same value.
///
/// `FixedSource(0.5)` zeroes every symmetric noise term `(U - 0.5) * k`,
/// leaving only the deterministic trend components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSource(pub f64);

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Deterministic per-symbol seed derivation.
///
/// The master seed is expanded into per-symbol sub-seeds with BLAKE3, so the
/// seed a symbol receives does not depend on the order in which symbols are
/// processed. This is what lets the catalog-wide batch build run in parallel
/// and still be reproducible.
#[derive(Debug, Clone)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive the sub-seed for one symbol.
    pub fn sub_seed(&self, symbol: &str) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(symbol.as_bytes());
        let hash = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    /// Seeded source for one symbol.
    pub fn source_for(&self, symbol: &str) -> RngSource<StdRng> {
        RngSource::seeded(self.sub_seed(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_source_repeats() {
        let mut src = FixedSource(0.25);
        assert_eq!(src.next_unit(), 0.25);
        assert_eq!(src.next_unit(), 0.25);
    }

    #[test]
    fn rng_source_stays_in_unit_interval() {
        let mut src = RngSource::seeded(7);
        for _ in 0..1_000 {
            let u = src.next_unit();
            assert!((0.0..1.0).contains(&u), "draw out of range: {u}");
        }
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for _ in 0..16 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    #[test]
    fn sub_seeds_are_deterministic() {
        let hierarchy = SeedHierarchy::new(42);
        assert_eq!(hierarchy.sub_seed("AAPL"), hierarchy.sub_seed("AAPL"));
    }

    #[test]
    fn different_symbols_different_seeds() {
        let hierarchy = SeedHierarchy::new(42);
        assert_ne!(hierarchy.sub_seed("AAPL"), hierarchy.sub_seed("MSFT"));
    }

    #[test]
    fn derivation_order_independent() {
        let hierarchy = SeedHierarchy::new(42);

        let aapl_first = hierarchy.sub_seed("AAPL");
        let msft_second = hierarchy.sub_seed("MSFT");

        let msft_first = hierarchy.sub_seed("MSFT");
        let aapl_second = hierarchy.sub_seed("AAPL");

        assert_eq!(aapl_first, aapl_second);
        assert_eq!(msft_first, msft_second);
    }

    #[test]
    fn different_master_seeds_different_output() {
        let h1 = SeedHierarchy::new(42);
        let h2 = SeedHierarchy::new(43);
        assert_ne!(h1.sub_seed("AAPL"), h2.sub_seed("AAPL"));
    }
}
