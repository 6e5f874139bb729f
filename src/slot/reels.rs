//! Staggered reel unwind.
//!
//! Each reel gets a strip laid out bottom-to-top as
//! `[result × 3][filler × (n - 3)][previous × 3]`. The visible window is the
//! three entries just below the cursor; every tick the cursor drops by one
//! until only the result remains. Roll lengths grow from reel to reel, so the
//! left reel always settles first and the right reel last.

use super::grid::{Grid, REELS, ROWS};
use super::services::{Audio, SoundHandle};
use super::symbol::{Symbol, SymbolSource};
use rand::RngCore;
use tracing::debug;

/// Shortest roll length for the first reel.
pub const MIN_ROLL: u32 = 5;
/// Longest roll length for the first reel.
pub const MAX_FIRST_ROLL: u32 = 14;
/// Each later reel rolls between 1 and 5 steps longer than the one before.
pub const STAGGER_MIN: u32 = 1;
pub const STAGGER_MAX: u32 = 5;

/// Longest possible roll: the first reel's max plus two maximal staggers.
const MAX_ROLL: usize = (MAX_FIRST_ROLL + 2 * STAGGER_MAX) as usize;
/// Strip capacity: result, maximal filler, previous.
pub const MAX_STRIP: usize = ROWS + (MAX_ROLL - ROWS) + ROWS;

/// Draw the three staggered roll lengths.
pub fn roll_lengths<R: RngCore>(source: &mut SymbolSource<R>) -> [u32; REELS] {
    let first = source.roll(MIN_ROLL..=MAX_FIRST_ROLL);
    let second = source.roll(first + STAGGER_MIN..=first + STAGGER_MAX);
    let third = source.roll(second + STAGGER_MIN..=second + STAGGER_MAX);
    [first, second, third]
}

/// One reel's strip: fixed arena plus a cursor of entries not yet scrolled off.
#[derive(Debug, Clone)]
pub struct ReelStrip {
    symbols: [Symbol; MAX_STRIP],
    len: usize,
    remaining: usize,
    sound: Option<SoundHandle>,
}

impl ReelStrip {
    /// Lay out a strip for a roll of length `roll`.
    pub fn build<R: RngCore>(
        result: [Symbol; ROWS],
        previous: [Symbol; ROWS],
        roll: u32,
        source: &mut SymbolSource<R>,
    ) -> Self {
        let filler = (roll as usize).saturating_sub(ROWS).min(MAX_STRIP - 2 * ROWS);
        let mut symbols = [Symbol::HIGHEST; MAX_STRIP];
        let mut len = 0;
        for symbol in result {
            symbols[len] = symbol;
            len += 1;
        }
        for _ in 0..filler {
            symbols[len] = source.draw();
            len += 1;
        }
        for symbol in previous {
            symbols[len] = symbol;
            len += 1;
        }
        Self {
            symbols,
            len,
            remaining: len,
            sound: None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entries not yet scrolled away.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Stopped once only the result is left.
    pub fn is_stopped(&self) -> bool {
        self.remaining <= ROWS
    }

    /// The symbols currently in view, top row first.
    pub fn window(&self) -> [Symbol; ROWS] {
        let base = self.remaining - ROWS;
        [
            self.symbols[base],
            self.symbols[base + 1],
            self.symbols[base + 2],
        ]
    }

    pub fn has_sound(&self) -> bool {
        self.sound.is_some()
    }

    /// Scroll one entry. Returns true on the tick the reel stops.
    fn step(&mut self) -> bool {
        if self.is_stopped() {
            return false;
        }
        self.remaining -= 1;
        self.is_stopped()
    }

    fn silence<A: Audio + ?Sized>(&mut self, audio: &mut A) {
        if let Some(handle) = self.sound.take() {
            audio.halt_sound(handle);
        }
    }
}

/// The three reels of one spin, advanced together one tick per frame.
#[derive(Debug, Clone)]
pub struct ReelUnwind {
    reels: [ReelStrip; REELS],
    ticks: u32,
}

impl ReelUnwind {
    /// Build all three strips and start a reel sound for each.
    pub fn start<R: RngCore, A: Audio + ?Sized>(
        previous: &Grid,
        current: &Grid,
        source: &mut SymbolSource<R>,
        audio: &mut A,
    ) -> Self {
        let lengths = roll_lengths(source);
        debug!(?lengths, "reels unwinding");
        Self::with_lengths(previous, current, lengths, source, audio)
    }

    /// Like `start`, with explicit roll lengths.
    pub fn with_lengths<R: RngCore, A: Audio + ?Sized>(
        previous: &Grid,
        current: &Grid,
        lengths: [u32; REELS],
        source: &mut SymbolSource<R>,
        audio: &mut A,
    ) -> Self {
        let reels = std::array::from_fn(|reel| {
            let mut strip =
                ReelStrip::build(current.column(reel), previous.column(reel), lengths[reel], source);
            strip.sound = audio.play_reel_sound();
            strip
        });
        Self { reels, ticks: 0 }
    }

    /// Advance every moving reel by one entry, halting each reel's sound on
    /// the tick it stops. Returns true once all reels have stopped.
    pub fn tick<A: Audio + ?Sized>(&mut self, audio: &mut A) -> bool {
        if self.is_settled() {
            return true;
        }
        self.ticks += 1;
        for (index, reel) in self.reels.iter_mut().enumerate() {
            if reel.step() {
                reel.silence(audio);
                debug!(reel = index, tick = self.ticks, "reel stopped");
            }
        }
        self.is_settled()
    }

    /// Abandon the spin: every reel sound stops now.
    pub fn cancel<A: Audio + ?Sized>(mut self, audio: &mut A) {
        for reel in self.reels.iter_mut() {
            reel.silence(audio);
        }
    }

    pub fn is_settled(&self) -> bool {
        self.reels.iter().all(ReelStrip::is_stopped)
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn reel(&self, index: usize) -> &ReelStrip {
        &self.reels[index]
    }

    /// What the window shows this frame.
    pub fn visible(&self) -> Grid {
        let mut cells = [Symbol::HIGHEST; REELS * ROWS];
        for (reel, strip) in self.reels.iter().enumerate() {
            cells[reel * ROWS..reel * ROWS + ROWS].copy_from_slice(&strip.window());
        }
        Grid::from_symbols(cells)
    }
}
