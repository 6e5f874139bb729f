//! Monte Carlo analysis of the slot table.
//!
//! Drives the real `SlotMachine` with a seeded RNG and silent audio to
//! measure:
//! - Return to player and hit rate at a fixed bet
//! - How often each face lands and pays
//! - How long a 20-credit wallet lasts before the game is over

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{SessionStats, SimReport};
pub use runner::run_simulation;
