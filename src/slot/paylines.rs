//! Payline evaluation: five fixed three-cell lines, each paying on its own.

use super::grid::Grid;
use super::symbol::Symbol;

/// One of the five fixed lines across the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Payline {
    TopRow,
    MiddleRow,
    BottomRow,
    /// Top-left to bottom-right.
    Diagonal,
    /// Bottom-left to top-right.
    AntiDiagonal,
}

impl Payline {
    pub const ALL: [Payline; 5] = [
        Payline::TopRow,
        Payline::MiddleRow,
        Payline::BottomRow,
        Payline::Diagonal,
        Payline::AntiDiagonal,
    ];

    /// Grid indices (column-major) this line reads, left reel first.
    pub fn cells(self) -> [usize; 3] {
        match self {
            Self::TopRow => [0, 3, 6],
            Self::MiddleRow => [1, 4, 7],
            Self::BottomRow => [2, 5, 8],
            Self::Diagonal => [0, 4, 8],
            Self::AntiDiagonal => [2, 4, 6],
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::TopRow => 0,
            Self::MiddleRow => 1,
            Self::BottomRow => 2,
            Self::Diagonal => 3,
            Self::AntiDiagonal => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TopRow => "Top row",
            Self::MiddleRow => "Middle row",
            Self::BottomRow => "Bottom row",
            Self::Diagonal => "Diagonal \\",
            Self::AntiDiagonal => "Diagonal /",
        }
    }

    /// True if `index` lies on this line.
    pub fn contains(self, index: usize) -> bool {
        self.cells().contains(&index)
    }
}

/// Per-line result of one spin: the shared symbol, or `None` for no win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinRecord {
    lines: [Option<Symbol>; 5],
}

impl WinRecord {
    pub fn get(&self, line: Payline) -> Option<Symbol> {
        self.lines[line.index()]
    }

    /// Lines that hit, in payline order.
    pub fn hits(&self) -> impl Iterator<Item = (Payline, Symbol)> + '_ {
        Payline::ALL
            .iter()
            .filter_map(|&line| self.get(line).map(|symbol| (line, symbol)))
    }

    pub fn hit_count(&self) -> usize {
        self.lines.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.hit_count() == 0
    }

    /// Raw form: winning symbol id per line, 0 where the line missed.
    pub fn to_ids(&self) -> [u8; 5] {
        self.lines.map(|line| line.map_or(0, Symbol::id))
    }

    pub fn clear(&mut self) {
        self.lines = [None; 5];
    }
}

/// Score a grid. Pure; every matching line is reported.
pub fn evaluate(grid: &Grid) -> WinRecord {
    let mut record = WinRecord::default();
    for line in Payline::ALL {
        let [a, b, c] = line.cells();
        if grid[a] == grid[b] && grid[b] == grid[c] {
            record.lines[line.index()] = Some(grid[a]);
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(ids: [u8; 9]) -> Grid {
        Grid::from_ids(ids).expect("valid ids")
    }

    #[test]
    fn test_rows_hit_diagonals_miss() {
        let record = evaluate(&grid([1, 2, 3, 1, 2, 3, 1, 2, 3]));
        assert_eq!(record.to_ids(), [1, 2, 3, 0, 0]);
        assert_eq!(record.hit_count(), 3);
    }

    #[test]
    fn test_uniform_grid_hits_everything() {
        let record = evaluate(&grid([5; 9]));
        assert_eq!(record.to_ids(), [5; 5]);
        assert_eq!(record.hits().count(), 5);
    }

    #[test]
    fn test_diagonals_only() {
        // Both diagonals share the centre cell.
        let record = evaluate(&grid([7, 1, 7, 2, 7, 3, 7, 4, 7]));
        assert_eq!(record.get(Payline::Diagonal).map(Symbol::id), Some(7));
        assert_eq!(record.get(Payline::AntiDiagonal).map(Symbol::id), Some(7));
        assert_eq!(record.hit_count(), 2);
    }

    #[test]
    fn test_no_hits() {
        let record = evaluate(&grid([1, 2, 3, 2, 3, 1, 3, 1, 2]));
        assert!(record.is_empty());
        assert_eq!(record.to_ids(), [0; 5]);
    }

    #[test]
    fn test_payline_indices_round_trip() {
        for (i, line) in Payline::ALL.iter().enumerate() {
            assert_eq!(line.index(), i);
            assert_eq!(Payline::from_index(i), Some(*line));
        }
        assert_eq!(Payline::from_index(5), None);
    }

    #[test]
    fn test_clear_resets_record() {
        let mut record = evaluate(&grid([4; 9]));
        record.clear();
        assert!(record.is_empty());
    }
}
