//! Reel symbols and the weighted generator that draws them.
//!
//! Every draw picks a uniform number in `1..=334` and maps it through a fixed
//! partition so that higher-valued symbols are rarer. Randomness comes from the
//! operating system when possible; if the entropy source fails the generator
//! degrades to a seeded PRNG for the rest of the session.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::warn;

/// Number of distinct symbol faces.
pub const SYMBOL_KINDS: u8 = 8;

/// Upper bound of the uniform draw fed into the weight table.
pub const DRAW_RANGE: u16 = 334;

/// Inclusive upper bound of each draw bucket and the symbol it yields.
///
/// Buckets widen as the symbol id falls, so symbol 8 (5 slots) is the rarest
/// and symbol 1 (81 slots) the most common.
const WEIGHT_TABLE: [(u16, u8); SYMBOL_KINDS as usize] = [
    (5, 8),
    (15, 7),
    (30, 6),
    (50, 5),
    (120, 4),
    (180, 3),
    (253, 2),
    (334, 1),
];

/// A reel face, identified by `1..=8`. Higher ids pay more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(u8);

impl Symbol {
    /// The rarest, highest-paying face. Also what a fresh machine shows.
    pub const HIGHEST: Symbol = Symbol(SYMBOL_KINDS);

    /// Returns `None` for ids outside `1..=8`.
    pub fn new(id: u8) -> Option<Self> {
        (1..=SYMBOL_KINDS).contains(&id).then_some(Self(id))
    }

    pub fn id(self) -> u8 {
        self.0
    }

    /// Payout multiplier applied to the bet when a line of this symbol hits.
    pub fn multiplier(self) -> u32 {
        u32::from(self.0)
    }

    /// All faces, lowest id first.
    pub fn all() -> impl Iterator<Item = Symbol> {
        (1..=SYMBOL_KINDS).map(Symbol)
    }

    /// Number of draw slots (out of 334) that produce this symbol.
    pub fn weight(self) -> u16 {
        let mut lower = 0;
        for (upper, id) in WEIGHT_TABLE {
            if id == self.0 {
                return upper - lower;
            }
            lower = upper;
        }
        0
    }
}

/// Map a uniform draw in `1..=334` to its symbol.
pub fn symbol_for_draw(draw: u16) -> Symbol {
    WEIGHT_TABLE
        .iter()
        .find(|(upper, _)| draw <= *upper)
        .map(|&(_, id)| Symbol(id))
        .unwrap_or(Symbol(1))
}

/// The OS entropy source could not produce bytes.
#[derive(Debug, Error)]
#[error("entropy source unavailable: {0}")]
pub struct RandomSourceUnavailable(#[from] rand::Error);

/// Random source backed by OS entropy with a PRNG fallback.
///
/// The first failed read from the OS switches permanently to a `StdRng`
/// seeded from the clock.
#[derive(Debug, Default)]
pub struct EntropyRng {
    fallback: Option<StdRng>,
}

impl EntropyRng {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the OS source has failed and the PRNG is in use.
    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }

    fn degrade(&mut self, err: RandomSourceUnavailable) -> &mut StdRng {
        warn!(error = %err, "falling back to pseudo-random generator");
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED_F417);
        self.fallback.insert(StdRng::seed_from_u64(seed))
    }
}

impl RngCore for EntropyRng {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Some(rng) = self.fallback.as_mut() {
            rng.fill_bytes(dest);
            return;
        }
        if let Err(err) = OsRng.try_fill_bytes(dest) {
            self.degrade(err.into()).fill_bytes(dest);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Weighted symbol generator.
#[derive(Debug)]
pub struct SymbolSource<R = EntropyRng> {
    rng: R,
}

impl SymbolSource<EntropyRng> {
    pub fn from_entropy() -> Self {
        Self::new(EntropyRng::new())
    }
}

impl<R: RngCore> SymbolSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw one symbol.
    pub fn draw(&mut self) -> Symbol {
        symbol_for_draw(self.rng.gen_range(1..=DRAW_RANGE))
    }

    /// Uniform integer from `range`, used for reel timing.
    pub fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.gen_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_symbol_bounds() {
        assert!(Symbol::new(0).is_none());
        assert!(Symbol::new(9).is_none());
        assert_eq!(Symbol::new(1).map(Symbol::id), Some(1));
        assert_eq!(Symbol::HIGHEST.id(), 8);
        assert_eq!(Symbol::all().count(), 8);
    }

    #[test]
    fn test_partition_edges() {
        let expected = [
            (1, 8),
            (5, 8),
            (6, 7),
            (15, 7),
            (16, 6),
            (30, 6),
            (31, 5),
            (50, 5),
            (51, 4),
            (120, 4),
            (121, 3),
            (180, 3),
            (181, 2),
            (253, 2),
            (254, 1),
            (334, 1),
        ];
        for (draw, id) in expected {
            assert_eq!(symbol_for_draw(draw).id(), id, "draw {}", draw);
        }
    }

    #[test]
    fn test_weights_cover_draw_range() {
        let total: u16 = Symbol::all().map(Symbol::weight).sum();
        assert_eq!(total, DRAW_RANGE);
        assert_eq!(Symbol::new(1).unwrap().weight(), 81);
        assert_eq!(Symbol::HIGHEST.weight(), 5);
    }

    #[test]
    fn test_rarity_increases_with_value() {
        let weights: Vec<u16> = Symbol::all().map(Symbol::weight).collect();
        // Symbols 1..=4 are not strictly ordered (70 slots for 4 vs 60 for 3),
        // but the top four faces must each be rarer than the one below.
        for pair in weights[3..].windows(2) {
            assert!(pair[0] > pair[1]);
        }
        assert!(weights[0] > weights[7] * 16);
    }

    #[test]
    fn test_seeded_source_only_yields_valid_symbols() {
        let mut source = SymbolSource::new(ChaCha8Rng::seed_from_u64(7));
        for _ in 0..500 {
            let s = source.draw();
            assert!((1..=8).contains(&s.id()));
        }
    }

    #[test]
    fn test_roll_respects_bounds() {
        let mut source = SymbolSource::new(ChaCha8Rng::seed_from_u64(11));
        for _ in 0..200 {
            let n = source.roll(5..=14);
            assert!((5..=14).contains(&n));
        }
    }

    #[test]
    fn test_entropy_rng_produces_symbols() {
        let mut source = SymbolSource::from_entropy();
        let s = source.draw();
        assert!(Symbol::new(s.id()).is_some());
    }

    #[test]
    fn test_degraded_rng_keeps_working() {
        let mut rng = EntropyRng::new();
        assert!(!rng.is_degraded());
        rng.degrade(RandomSourceUnavailable(rand::Error::new(
            std::io::Error::new(std::io::ErrorKind::Other, "no entropy"),
        )));
        assert!(rng.is_degraded());
        let mut source = SymbolSource::new(rng);
        for _ in 0..50 {
            assert!((1..=8).contains(&source.draw().id()));
        }
    }
}
