//! Integration test: weighted symbol draws
//!
//! Checks the draw distribution against the weight table over many seeded
//! draws, and that the grid fills every cell from it.

use bfruit::slot::{GridState, Symbol, SymbolSource};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DRAWS: usize = 200_000;

fn counts(seed: u64) -> [usize; 9] {
    let mut source = SymbolSource::new(ChaCha8Rng::seed_from_u64(seed));
    let mut counts = [0usize; 9];
    for _ in 0..DRAWS {
        counts[usize::from(source.draw().id())] += 1;
    }
    counts
}

#[test]
fn test_cherry_about_sixteen_times_seven() {
    let counts = counts(2024);
    let ratio = counts[1] as f64 / counts[8] as f64;
    assert!(
        (13.0..=19.5).contains(&ratio),
        "cherry/seven ratio was {:.2}",
        ratio
    );
}

#[test]
fn test_observed_shares_track_weights() {
    let counts = counts(99);
    assert_eq!(counts[0], 0, "no symbol 0");
    for symbol in Symbol::all() {
        let expected = f64::from(symbol.weight()) / 334.0;
        let observed = counts[usize::from(symbol.id())] as f64 / DRAWS as f64;
        assert!(
            (observed - expected).abs() < 0.01,
            "symbol {} share {:.4}, expected {:.4}",
            symbol.id(),
            observed,
            expected
        );
    }
}

#[test]
fn test_spin_draws_nine_valid_cells_and_keeps_previous() {
    let mut source = SymbolSource::new(ChaCha8Rng::seed_from_u64(5));
    let mut state = GridState::new();
    let first = state.spin(&mut source);
    assert!(first.cells().iter().all(|s| (1..=8).contains(&s.id())));
    let second = state.spin(&mut source);
    assert_eq!(*state.previous(), first);
    assert_eq!(*state.current(), second);
}
