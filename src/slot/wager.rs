//! Credit, bet and payout bookkeeping.

use super::paylines::WinRecord;
use super::services::Audio;
use super::symbol::Symbol;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Highest credit the display can hold; payouts truncate here.
pub const MAX_SCORE: u32 = 999_999;
pub const STARTING_CREDIT: u32 = 20;
pub const STARTING_BET: u32 = 1;
pub const MIN_BET: u32 = 1;
pub const MAX_BET: u32 = 10;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WagerError {
    #[error("bet of {bet} exceeds credit of {credit}")]
    InsufficientCredit { bet: u32, credit: u32 },
    #[error("no credit left to wager")]
    GameOver,
}

/// Direction of a bet adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetAdjust {
    Raise,
    Lower,
}

/// Snapshot of the player's wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerState {
    pub credit: u32,
    pub bet: u32,
    pub last_win: u32,
}

impl Default for WagerState {
    fn default() -> Self {
        Self {
            credit: STARTING_CREDIT,
            bet: STARTING_BET,
            last_win: 0,
        }
    }
}

/// Payout for one winning line: the bet times the symbol, plus the bet back.
pub fn line_payout(bet: u32, symbol: Symbol) -> u32 {
    bet.saturating_mul(symbol.multiplier()).saturating_add(bet)
}

/// Owns the wallet and applies the wager rules.
///
/// In invincible mode placing a bet never deducts credit, while payouts are
/// still credited in full.
#[derive(Debug, Clone, Default)]
pub struct WagerLedger {
    state: WagerState,
    invincible: bool,
}

impl WagerLedger {
    pub fn new(invincible: bool) -> Self {
        Self {
            state: WagerState::default(),
            invincible,
        }
    }

    pub fn with_state(state: WagerState, invincible: bool) -> Self {
        Self { state, invincible }
    }

    pub fn state(&self) -> WagerState {
        self.state
    }

    pub fn credit(&self) -> u32 {
        self.state.credit
    }

    pub fn bet(&self) -> u32 {
        self.state.bet
    }

    pub fn last_win(&self) -> u32 {
        self.state.last_win
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// Back to 20 credits, bet 1.
    pub fn reset(&mut self) {
        self.state = WagerState::default();
    }

    /// Credit and bet both exhausted.
    pub fn is_game_over(&self) -> bool {
        self.state.credit == 0 && self.state.bet == 0
    }

    /// Spin-time clamp: a bet larger than the credit shrinks to the credit.
    pub fn clamp_bet_to_credit(&mut self) -> u32 {
        self.state.bet = self.state.bet.min(self.state.credit);
        self.state.bet
    }

    /// An empty wallet cannot hold a bet.
    pub fn enforce_bankrupt(&mut self) {
        if self.state.credit == 0 {
            self.state.bet = 0;
        }
    }

    /// Reserve `amount` for the coming spin and make it the active bet.
    pub fn place_bet(&mut self, amount: u32) -> Result<u32, WagerError> {
        if self.is_game_over() || amount == 0 {
            return Err(WagerError::GameOver);
        }
        if amount > self.state.credit {
            return Err(WagerError::InsufficientCredit {
                bet: amount,
                credit: self.state.credit,
            });
        }
        if !self.invincible {
            self.state.credit -= amount;
        }
        self.state.bet = amount;
        Ok(amount)
    }

    /// Pay every winning line at the active bet. Returns the spin's total.
    pub fn apply_winnings<A: Audio + ?Sized>(&mut self, wins: &WinRecord, audio: &mut A) -> u32 {
        self.state.last_win = 0;
        let bet = self.state.bet;
        for (line, symbol) in wins.hits() {
            let payout = line_payout(bet, symbol);
            if payout == 0 {
                continue;
            }
            debug!(line = line.name(), symbol = symbol.id(), payout, "line paid");
            self.state.credit = self.state.credit.saturating_add(payout);
            self.state.last_win = self.state.last_win.saturating_add(payout);
            audio.play_win_chime();
        }
        self.state.credit = self.state.credit.min(MAX_SCORE);
        self.state.last_win
    }

    /// Step the bet by one, wrapping between 1 and 10. No-op on an empty
    /// wallet, where the bet is pinned to 0.
    pub fn adjust_bet(&mut self, adjust: BetAdjust) -> u32 {
        if self.state.credit == 0 {
            self.state.bet = 0;
            return 0;
        }
        self.state.bet = match adjust {
            BetAdjust::Raise if self.state.bet >= MAX_BET => MIN_BET,
            BetAdjust::Raise => self.state.bet + 1,
            BetAdjust::Lower if self.state.bet <= MIN_BET => MAX_BET,
            BetAdjust::Lower => self.state.bet - 1,
        };
        self.state.bet
    }

    /// Set the bet directly, clamped to `1..=10`.
    pub fn set_bet(&mut self, bet: u32) -> u32 {
        self.state.bet = bet.clamp(MIN_BET, MAX_BET);
        self.enforce_bankrupt();
        self.state.bet
    }

    pub fn snapshot(&self) -> WagerState {
        self.state
    }

    pub fn restore(&mut self, state: WagerState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::grid::Grid;
    use crate::slot::paylines::evaluate;
    use crate::slot::services::NoAudio;

    fn ledger(credit: u32, bet: u32) -> WagerLedger {
        WagerLedger::with_state(
            WagerState {
                credit,
                bet,
                last_win: 0,
            },
            false,
        )
    }

    /// A record with only the top row hitting `id`.
    fn top_row_win(id: u8) -> WinRecord {
        evaluate(&Grid::from_ids([id, 1, 2, id, 2, 1, id, 1, 2]).unwrap())
    }

    #[derive(Default)]
    struct ChimeCounter(u32);

    impl Audio for ChimeCounter {
        fn play_reel_sound(&mut self) -> Option<crate::slot::services::SoundHandle> {
            None
        }
        fn halt_sound(&mut self, _: crate::slot::services::SoundHandle) {}
        fn play_win_chime(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_defaults() {
        let l = WagerLedger::new(false);
        assert_eq!(l.credit(), 20);
        assert_eq!(l.bet(), 1);
        assert_eq!(l.last_win(), 0);
        assert!(!l.is_game_over());
    }

    #[test]
    fn test_place_bet_deducts() {
        let mut l = ledger(20, 3);
        assert_eq!(l.place_bet(3), Ok(3));
        assert_eq!(l.credit(), 17);
        assert_eq!(l.bet(), 3);
    }

    #[test]
    fn test_place_bet_insufficient_credit() {
        let mut l = ledger(2, 5);
        assert_eq!(
            l.place_bet(5),
            Err(WagerError::InsufficientCredit { bet: 5, credit: 2 })
        );
        assert_eq!(l.credit(), 2);
    }

    #[test]
    fn test_invincible_keeps_credit_but_records_bet() {
        let mut l = WagerLedger::with_state(WagerState::default(), true);
        assert_eq!(l.place_bet(1), Ok(1));
        assert_eq!(l.credit(), 20);
        assert_eq!(l.bet(), 1);
        let paid = l.apply_winnings(&top_row_win(3), &mut NoAudio);
        assert_eq!(paid, 4);
        assert_eq!(l.credit(), 24);
    }

    #[test]
    fn test_payout_bet_two_symbol_three() {
        let mut l = ledger(10, 2);
        let mut audio = ChimeCounter::default();
        let paid = l.apply_winnings(&top_row_win(3), &mut audio);
        assert_eq!(paid, 8);
        assert_eq!(l.credit(), 18);
        assert_eq!(l.last_win(), 8);
        assert_eq!(audio.0, 1);
    }

    #[test]
    fn test_every_line_pays_and_chimes() {
        let mut l = ledger(0, 1);
        let mut audio = ChimeCounter::default();
        let wins = evaluate(&Grid::from_ids([5; 9]).unwrap());
        let paid = l.apply_winnings(&wins, &mut audio);
        assert_eq!(paid, 5 * 6);
        assert_eq!(audio.0, 5);
    }

    #[test]
    fn test_last_win_resets_each_spin() {
        let mut l = ledger(10, 2);
        l.apply_winnings(&top_row_win(3), &mut NoAudio);
        l.apply_winnings(&WinRecord::default(), &mut NoAudio);
        assert_eq!(l.last_win(), 0);
        assert_eq!(l.credit(), 18);
    }

    #[test]
    fn test_credit_clamps_at_max_score() {
        let mut l = ledger(999_995, 2);
        // 2 * 4 + 2 = 10
        l.apply_winnings(&top_row_win(4), &mut NoAudio);
        assert_eq!(l.credit(), MAX_SCORE);
        assert_eq!(l.last_win(), 10);
    }

    #[test]
    fn test_bet_wraps_up_and_down() {
        let mut l = ledger(100, 10);
        assert_eq!(l.adjust_bet(BetAdjust::Raise), 1);
        assert_eq!(l.adjust_bet(BetAdjust::Lower), 10);
        assert_eq!(l.adjust_bet(BetAdjust::Lower), 9);
        assert_eq!(l.adjust_bet(BetAdjust::Raise), 10);
    }

    #[test]
    fn test_adjust_on_empty_wallet_pins_zero() {
        let mut l = ledger(0, 4);
        assert_eq!(l.adjust_bet(BetAdjust::Raise), 0);
        assert_eq!(l.adjust_bet(BetAdjust::Lower), 0);
        assert!(l.is_game_over());
    }

    #[test]
    fn test_bet_above_credit_allowed_until_spin() {
        let mut l = ledger(3, 2);
        l.adjust_bet(BetAdjust::Raise);
        l.adjust_bet(BetAdjust::Raise);
        assert_eq!(l.bet(), 4);
        assert_eq!(l.clamp_bet_to_credit(), 3);
    }

    #[test]
    fn test_game_over_blocks_place_bet() {
        let mut l = ledger(0, 0);
        assert!(l.is_game_over());
        assert_eq!(l.place_bet(0), Err(WagerError::GameOver));
        assert_eq!(l.place_bet(1), Err(WagerError::GameOver));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut l = ledger(20, 5);
        let before = l.snapshot();
        l.place_bet(5).unwrap();
        l.restore(before);
        assert_eq!(l.state(), before);
    }

    #[test]
    fn test_line_payout_formula() {
        for symbol in Symbol::all() {
            assert_eq!(line_payout(3, symbol), 3 * u32::from(symbol.id()) + 3);
        }
        assert_eq!(line_payout(0, Symbol::HIGHEST), 0);
    }
}
