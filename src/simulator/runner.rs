//! Simulation runner on top of the real `SlotMachine`.
//!
//! Statistics are tracked externally from `SpinEvent`s, so the numbers match
//! what a player at the table would see.

use super::config::SimConfig;
use super::report::{SessionStats, SimReport, SpinTally};
use crate::slot::{NoAudio, SlotInput, SlotMachine, SpinEvent, SpinPhase, SymbolSource};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

fn seeded_machine(seed: Option<u64>, stream: u64, invincible: bool) -> SlotMachine<ChaCha8Rng> {
    let rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(stream)),
        None => ChaCha8Rng::from_entropy(),
    };
    SlotMachine::with_source(SymbolSource::new(rng), invincible)
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let tally = run_payout_pass(config);
    info!(
        spins = tally.spins,
        paid = tally.total_paid,
        "payout pass finished"
    );

    let mut sessions = Vec::with_capacity(config.sessions as usize);
    for index in 0..config.sessions {
        let stats = simulate_session(config, u64::from(index) + 1);
        if config.verbosity >= 2 {
            println!(
                "Session {}/{} - {} spins, peak {}, {}",
                index + 1,
                config.sessions,
                stats.spins,
                stats.peak_credit,
                if stats.busted { "busted" } else { "capped" }
            );
        }
        sessions.push(stats);
    }

    SimReport::new(config.table_bet(), tally, sessions)
}

/// Spin a wallet that never pays stakes, recording every settle.
fn run_payout_pass(config: &SimConfig) -> SpinTally {
    let mut machine = seeded_machine(config.seed, 0, true);
    let bet = machine.set_bet(config.table_bet());
    let mut tally = SpinTally::default();

    for _ in 0..config.spins {
        if !matches!(
            machine.handle_input(SlotInput::SpinLeft, &mut NoAudio),
            SpinEvent::SpinStarted { .. }
        ) {
            break;
        }
        if let SpinEvent::Settled { wins, paid } = machine.play_out(&mut NoAudio, |_| false) {
            tally.record(bet, machine.grid().current(), &wins, paid);
        }
    }
    tally
}

/// Play one 20-credit wallet at the configured bet until it is gone.
fn simulate_session(config: &SimConfig, stream: u64) -> SessionStats {
    let mut machine = seeded_machine(config.seed, stream, false);
    machine.set_bet(config.table_bet());
    let mut peak_credit = machine.ledger().credit();

    while machine.spins() < config.max_spins_per_session {
        match machine.handle_input(SlotInput::SpinLeft, &mut NoAudio) {
            SpinEvent::SpinStarted { .. } => {
                machine.play_out(&mut NoAudio, |_| false);
                peak_credit = peak_credit.max(machine.ledger().credit());
            }
            _ => break,
        }
        if machine.phase() == SpinPhase::GameOver {
            break;
        }
    }

    let busted = machine.ledger().credit() == 0;
    debug!(stream, spins = machine.spins(), busted, "session finished");
    SessionStats {
        spins: machine.spins(),
        peak_credit,
        final_credit: machine.ledger().credit(),
        busted,
    }
}
