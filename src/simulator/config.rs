//! Simulation configuration.

use crate::slot::wager::{MAX_BET, MIN_BET};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Spins on the bottomless wallet used for return-to-player figures
    pub spins: u64,

    /// Bet for every spin (1-10)
    pub bet: u32,

    /// Number of 20-credit sessions played until the game is over
    pub sessions: u32,

    /// Cap on spins per session, for wallets that never run dry
    pub max_spins_per_session: u64,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per session)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spins: 100_000,
            bet: 1,
            sessions: 1000,
            max_spins_per_session: 100_000,
            seed: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small run for tests and smoke checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            spins: 5_000,
            sessions: 50,
            max_spins_per_session: 5_000,
            seed: Some(seed),
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Bet clamped into the table's range.
    pub fn table_bet(&self) -> u32 {
        self.bet.clamp(MIN_BET, MAX_BET)
    }
}
