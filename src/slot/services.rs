//! Collaborator interfaces the slot engine drives: sound, drawing and the
//! high-score store. The terminal front-end supplies real implementations;
//! tests and the simulator use the silent ones here.

use super::paylines::Payline;
use super::symbol::Symbol;
use std::io;

/// Opaque handle to a playing sound, returned so it can be halted later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoundHandle(pub u32);

/// Sound output. A `None` handle means the sound is missing or muted; every
/// call with such a handle, or on a missing sound, is a silent no-op.
pub trait Audio {
    /// Start the looping reel sound for one reel.
    fn play_reel_sound(&mut self) -> Option<SoundHandle>;
    fn halt_sound(&mut self, handle: SoundHandle);
    /// Short acknowledgment for one paying line.
    fn play_win_chime(&mut self);
    /// Key click.
    fn play_click(&mut self) {}
    fn play_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Audio sink that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAudio;

impl Audio for NoAudio {
    fn play_reel_sound(&mut self) -> Option<SoundHandle> {
        None
    }

    fn halt_sound(&mut self, _handle: SoundHandle) {}

    fn play_win_chime(&mut self) {}
}

/// Drawing surface for the reel window.
pub trait Renderer {
    /// Draw `symbol` in the cell at `reel` (column) and `row`.
    fn blit(&mut self, symbol: Symbol, reel: usize, row: usize);
    /// Highlight a line that paid.
    fn draw_payline(&mut self, line: Payline);
}

/// Persisted best credit total. The value is a single plain integer.
pub trait HighScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> io::Result<()>;
}

/// High score kept in memory only.
#[derive(Debug, Clone, Copy)]
pub struct MemoryHighScore(pub u32);

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u32 {
        self.0
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        self.0 = score;
        Ok(())
    }
}
