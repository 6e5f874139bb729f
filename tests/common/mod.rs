//! Shared fakes for the integration tests.

#![allow(dead_code)]

use bfruit::slot::{Audio, Payline, Renderer, SlotMachine, SoundHandle, Symbol, SymbolSource};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

/// Audio that remembers which reel sounds are playing and how often it chimed.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    next: u32,
    pub playing: BTreeSet<SoundHandle>,
    pub started: u32,
    pub halted: u32,
    pub chimes: u32,
}

impl Audio for RecordingAudio {
    fn play_reel_sound(&mut self) -> Option<SoundHandle> {
        self.next += 1;
        self.started += 1;
        let handle = SoundHandle(self.next);
        self.playing.insert(handle);
        Some(handle)
    }

    fn halt_sound(&mut self, handle: SoundHandle) {
        if self.playing.remove(&handle) {
            self.halted += 1;
        }
    }

    fn play_win_chime(&mut self) {
        self.chimes += 1;
    }
}

/// Renderer that keeps the last blit per cell and every highlighted line.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub cells: Vec<(Symbol, usize, usize)>,
    pub lines: Vec<Payline>,
}

impl Renderer for RecordingRenderer {
    fn blit(&mut self, symbol: Symbol, reel: usize, row: usize) {
        self.cells.push((symbol, reel, row));
    }

    fn draw_payline(&mut self, line: Payline) {
        self.lines.push(line);
    }
}

pub fn seeded_machine(seed: u64) -> SlotMachine<ChaCha8Rng> {
    SlotMachine::with_source(SymbolSource::new(ChaCha8Rng::seed_from_u64(seed)), false)
}
