//! The spin state machine: bet, draw, unwind, score, pay.
//!
//! One `SlotMachine` owns the wallet, the grid and any in-flight reel
//! animation. The front-end feeds it input events and calls `tick` once per
//! frame; while the reels unwind, only `Cancel` is honoured, and it aborts the
//! spin with the wallet and grid restored to their pre-spin values.

use super::grid::{Grid, GridState, REELS, ROWS};
use super::paylines::{evaluate, WinRecord};
use super::reels::ReelUnwind;
use super::services::{Audio, Renderer};
use super::symbol::{EntropyRng, SymbolSource};
use super::wager::{BetAdjust, WagerError, WagerLedger, WagerState};
use rand::RngCore;
use tracing::{debug, info};

/// Player input, polled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotInput {
    SpinLeft,
    SpinRight,
    BetUp,
    BetDown,
    Cancel,
    Confirm,
    Help,
}

/// Externally visible machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Unwinding,
    GameOver,
}

/// What handling an input or a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinEvent {
    /// Nothing changed.
    Ignored,
    BetChanged(u32),
    SpinStarted { stake: u32 },
    /// Reels still moving.
    Rolling,
    Settled { wins: WinRecord, paid: u32 },
    Cancelled,
    GameOver,
    /// A spin was requested but the wallet could not cover it.
    Refused(WagerError),
    /// Player asked to leave the table.
    ExitRequested,
    /// Player asked to end the game and bank the credit as a score.
    EndRequested,
}

enum Phase {
    Idle,
    Unwinding {
        unwind: ReelUnwind,
        before: WagerState,
    },
    GameOver,
}

pub struct SlotMachine<R = EntropyRng> {
    source: SymbolSource<R>,
    grid: GridState,
    ledger: WagerLedger,
    wins: WinRecord,
    phase: Phase,
    spins: u64,
}

impl SlotMachine<EntropyRng> {
    pub fn new(invincible: bool) -> Self {
        Self::with_source(SymbolSource::from_entropy(), invincible)
    }
}

impl<R: RngCore> SlotMachine<R> {
    pub fn with_source(source: SymbolSource<R>, invincible: bool) -> Self {
        Self {
            source,
            grid: GridState::new(),
            ledger: WagerLedger::new(invincible),
            wins: WinRecord::default(),
            phase: Phase::Idle,
            spins: 0,
        }
    }

    /// Fresh table: starting wallet, all-highest grid, no wins shown.
    pub fn reset<A: Audio + ?Sized>(&mut self, audio: &mut A) {
        if let Phase::Unwinding { unwind, .. } = std::mem::replace(&mut self.phase, Phase::Idle) {
            unwind.cancel(audio);
        }
        self.ledger.reset();
        self.grid.reset();
        self.wins.clear();
        self.spins = 0;
        info!(credit = self.ledger.credit(), "new game");
    }

    pub fn phase(&self) -> SpinPhase {
        match self.phase {
            Phase::Idle => SpinPhase::Idle,
            Phase::Unwinding { .. } => SpinPhase::Unwinding,
            Phase::GameOver => SpinPhase::GameOver,
        }
    }

    pub fn ledger(&self) -> &WagerLedger {
        &self.ledger
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Lines paid by the last settled spin.
    pub fn wins(&self) -> &WinRecord {
        &self.wins
    }

    pub fn unwind(&self) -> Option<&ReelUnwind> {
        match &self.phase {
            Phase::Unwinding { unwind, .. } => Some(unwind),
            _ => None,
        }
    }

    /// Completed spins since the last reset.
    pub fn spins(&self) -> u64 {
        self.spins
    }

    /// Set the bet between spins.
    pub fn set_bet(&mut self, bet: u32) -> u32 {
        if matches!(self.phase, Phase::Idle) {
            self.ledger.set_bet(bet);
        }
        self.ledger.bet()
    }

    pub fn handle_input<A: Audio + ?Sized>(&mut self, input: SlotInput, audio: &mut A) -> SpinEvent {
        match self.phase {
            Phase::Idle => {
                let event = self.handle_idle_input(input, audio);
                if matches!(self.phase, Phase::Idle) {
                    self.ledger.enforce_bankrupt();
                }
                event
            }
            Phase::Unwinding { .. } => match input {
                SlotInput::Cancel => self.abort_spin(audio),
                _ => SpinEvent::Ignored,
            },
            Phase::GameOver => match input {
                SlotInput::SpinLeft
                | SlotInput::SpinRight
                | SlotInput::Cancel
                | SlotInput::Confirm => SpinEvent::ExitRequested,
                _ => SpinEvent::Ignored,
            },
        }
    }

    fn handle_idle_input<A: Audio + ?Sized>(&mut self, input: SlotInput, audio: &mut A) -> SpinEvent {
        match input {
            SlotInput::SpinLeft | SlotInput::SpinRight => self.start_spin(audio),
            SlotInput::BetUp => SpinEvent::BetChanged(self.ledger.adjust_bet(BetAdjust::Raise)),
            SlotInput::BetDown => SpinEvent::BetChanged(self.ledger.adjust_bet(BetAdjust::Lower)),
            SlotInput::Cancel => SpinEvent::ExitRequested,
            SlotInput::Confirm => SpinEvent::EndRequested,
            SlotInput::Help => SpinEvent::Ignored,
        }
    }

    fn start_spin<A: Audio + ?Sized>(&mut self, audio: &mut A) -> SpinEvent {
        if self.ledger.is_game_over() {
            info!(spins = self.spins, "game over");
            self.phase = Phase::GameOver;
            return SpinEvent::GameOver;
        }

        let before = self.ledger.snapshot();
        let stake = self.ledger.clamp_bet_to_credit();
        if let Err(err) = self.ledger.place_bet(stake) {
            debug!(%err, "spin refused");
            self.ledger.enforce_bankrupt();
            return SpinEvent::Refused(err);
        }

        self.wins.clear();
        let current = self.grid.spin(&mut self.source);
        let unwind = ReelUnwind::start(self.grid.previous(), &current, &mut self.source, audio);
        debug!(stake, credit = self.ledger.credit(), "spin started");
        self.phase = Phase::Unwinding { unwind, before };
        SpinEvent::SpinStarted { stake }
    }

    fn abort_spin<A: Audio + ?Sized>(&mut self, audio: &mut A) -> SpinEvent {
        if let Phase::Unwinding { unwind, before } = std::mem::replace(&mut self.phase, Phase::Idle) {
            unwind.cancel(audio);
            self.ledger.restore(before);
            self.grid.revert();
            debug!(credit = self.ledger.credit(), "spin cancelled");
        }
        SpinEvent::Cancelled
    }

    /// Advance one frame. Settles the spin on the tick the last reel stops.
    pub fn tick<A: Audio + ?Sized>(&mut self, audio: &mut A) -> SpinEvent {
        let Phase::Unwinding { unwind, .. } = &mut self.phase else {
            return SpinEvent::Ignored;
        };
        if !unwind.tick(audio) {
            return SpinEvent::Rolling;
        }

        self.phase = Phase::Idle;
        self.wins = evaluate(self.grid.current());
        let paid = self.ledger.apply_winnings(&self.wins, audio);
        self.ledger.enforce_bankrupt();
        self.spins += 1;
        debug!(
            paid,
            lines = self.wins.hit_count(),
            credit = self.ledger.credit(),
            "spin settled"
        );
        SpinEvent::Settled {
            wins: self.wins,
            paid,
        }
    }

    /// Drive an in-flight spin to completion without a frame clock, asking
    /// `cancel` before every tick whether to abort.
    pub fn play_out<A, F>(&mut self, audio: &mut A, mut cancel: F) -> SpinEvent
    where
        A: Audio + ?Sized,
        F: FnMut(&Self) -> bool,
    {
        let mut event = SpinEvent::Ignored;
        while matches!(self.phase, Phase::Unwinding { .. }) {
            if cancel(self) {
                return self.abort_spin(audio);
            }
            event = self.tick(audio);
        }
        event
    }

    /// Grid as the player sees it this frame.
    pub fn visible_grid(&self) -> Grid {
        match &self.phase {
            Phase::Unwinding { unwind, .. } => unwind.visible(),
            _ => *self.grid.current(),
        }
    }

    /// Draw the window and, between spins, the lines that paid.
    pub fn render<V: Renderer + ?Sized>(&self, view: &mut V) {
        let grid = self.visible_grid();
        for reel in 0..REELS {
            for row in 0..ROWS {
                view.blit(grid.cell(reel, row), reel, row);
            }
        }
        if !matches!(self.phase, Phase::Unwinding { .. }) {
            for (line, _) in self.wins.hits() {
                view.draw_payline(line);
            }
        }
    }
}
