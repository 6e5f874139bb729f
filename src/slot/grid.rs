//! The 3×3 symbol window and the current/previous grid pair.

use super::symbol::{Symbol, SymbolSource};
use rand::RngCore;
use std::ops::Index;

/// Number of reels (columns).
pub const REELS: usize = 3;
/// Visible rows per reel.
pub const ROWS: usize = 3;
/// Cells in the window.
pub const CELLS: usize = REELS * ROWS;

/// Nine symbols stored column-major: `index = reel * 3 + row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid([Symbol; CELLS]);

impl Grid {
    pub fn filled(symbol: Symbol) -> Self {
        Self([symbol; CELLS])
    }

    pub fn from_symbols(cells: [Symbol; CELLS]) -> Self {
        Self(cells)
    }

    /// Build from raw ids; `None` if any id is outside `1..=8`.
    pub fn from_ids(ids: [u8; CELLS]) -> Option<Self> {
        let mut cells = [Symbol::HIGHEST; CELLS];
        for (cell, id) in cells.iter_mut().zip(ids) {
            *cell = Symbol::new(id)?;
        }
        Some(Self(cells))
    }

    pub fn cell(&self, reel: usize, row: usize) -> Symbol {
        self.0[reel * ROWS + row]
    }

    /// The three symbols of one reel, top row first.
    pub fn column(&self, reel: usize) -> [Symbol; ROWS] {
        let base = reel * ROWS;
        [self.0[base], self.0[base + 1], self.0[base + 2]]
    }

    pub fn cells(&self) -> &[Symbol; CELLS] {
        &self.0
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::filled(Symbol::HIGHEST)
    }
}

impl Index<usize> for Grid {
    type Output = Symbol;

    fn index(&self, index: usize) -> &Symbol {
        &self.0[index]
    }
}

/// Settled grid plus the one it replaced.
///
/// `previous` seeds the top of each reel strip so the animation scrolls away
/// from what the player last saw.
#[derive(Debug, Clone, Default)]
pub struct GridState {
    current: Grid,
    previous: Grid,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn previous(&self) -> &Grid {
        &self.previous
    }

    /// Shift `current` into `previous` and draw nine fresh cells.
    pub fn spin<R: RngCore>(&mut self, source: &mut SymbolSource<R>) -> Grid {
        self.previous = self.current;
        let mut cells = [Symbol::HIGHEST; CELLS];
        for cell in cells.iter_mut() {
            *cell = source.draw();
        }
        self.current = Grid(cells);
        self.current
    }

    /// Undo the last spin's draw, leaving the pre-spin grid on display.
    pub fn revert(&mut self) {
        self.current = self.previous;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
