//! The reel-spin engine.
//!
//! A weighted symbol source feeds a 3×3 grid; three reels unwind onto the new
//! grid with staggered stop times; five fixed paylines are scored and the
//! wallet is paid. `SlotMachine` ties the pieces together.

pub mod grid;
pub mod machine;
pub mod paylines;
pub mod reels;
pub mod services;
pub mod symbol;
pub mod wager;

pub use grid::{Grid, GridState, CELLS, REELS, ROWS};
pub use machine::{SlotInput, SlotMachine, SpinEvent, SpinPhase};
pub use paylines::{evaluate, Payline, WinRecord};
pub use reels::{ReelStrip, ReelUnwind};
pub use services::{Audio, HighScoreStore, MemoryHighScore, NoAudio, Renderer, SoundHandle};
pub use symbol::{EntropyRng, RandomSourceUnavailable, Symbol, SymbolSource};
pub use wager::{BetAdjust, WagerError, WagerLedger, WagerState, MAX_SCORE};
