//! Simulation report generation.

use crate::slot::symbol::{DRAW_RANGE, SYMBOL_KINDS};
use crate::slot::wager::line_payout;
use crate::slot::{Grid, Symbol, WinRecord};
use serde::Serialize;

/// Running totals from the payout pass.
#[derive(Debug, Clone, Default)]
pub struct SpinTally {
    pub spins: u64,
    pub total_staked: u64,
    pub total_paid: u64,
    pub winning_spins: u64,
    pub lines_hit: u64,
    pub max_single_win: u32,
    /// Cells showing each face, index 0 = symbol 1.
    pub landed: [u64; SYMBOL_KINDS as usize],
    /// Paying lines per face.
    pub line_hits: [u64; SYMBOL_KINDS as usize],
    /// Credits paid per face.
    pub paid_by_symbol: [u64; SYMBOL_KINDS as usize],
}

impl SpinTally {
    pub fn record(&mut self, bet: u32, grid: &Grid, wins: &WinRecord, paid: u32) {
        self.spins += 1;
        self.total_staked += u64::from(bet);
        self.total_paid += u64::from(paid);
        self.max_single_win = self.max_single_win.max(paid);
        if !wins.is_empty() {
            self.winning_spins += 1;
        }
        for symbol in grid.cells() {
            self.landed[usize::from(symbol.id() - 1)] += 1;
        }
        for (_, symbol) in wins.hits() {
            let slot = usize::from(symbol.id() - 1);
            self.lines_hit += 1;
            self.line_hits[slot] += 1;
            self.paid_by_symbol[slot] += u64::from(line_payout(bet, symbol));
        }
    }
}

/// Per-face breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolStats {
    pub id: u8,
    pub landed: u64,
    /// Observed share of all cells.
    pub share: f64,
    /// Share implied by the draw weights.
    pub expected_share: f64,
    pub line_hits: u64,
    pub paid: u64,
}

/// One wallet played from 20 credits.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub spins: u64,
    pub peak_credit: u32,
    pub final_credit: u32,
    pub busted: bool,
}

/// Aggregated results from a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub bet: u32,
    pub spins: u64,
    pub total_staked: u64,
    pub total_paid: u64,
    /// Paid over staked.
    pub rtp: f64,
    /// Spins with at least one paying line, over all spins.
    pub hit_rate: f64,
    pub avg_lines_per_hit: f64,
    pub max_single_win: u32,
    pub symbols: Vec<SymbolStats>,

    pub sessions_busted: u32,
    pub avg_session_spins: f64,
    pub median_session_spins: u64,
    pub avg_peak_credit: f64,
    pub sessions: Vec<SessionStats>,
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl SimReport {
    pub fn new(bet: u32, tally: SpinTally, sessions: Vec<SessionStats>) -> Self {
        let cells: u64 = tally.landed.iter().sum();
        let symbols = Symbol::all()
            .map(|symbol| {
                let slot = usize::from(symbol.id() - 1);
                SymbolStats {
                    id: symbol.id(),
                    landed: tally.landed[slot],
                    share: ratio(tally.landed[slot], cells),
                    expected_share: f64::from(symbol.weight()) / f64::from(DRAW_RANGE),
                    line_hits: tally.line_hits[slot],
                    paid: tally.paid_by_symbol[slot],
                }
            })
            .collect();

        let count = sessions.len() as u64;
        let sessions_busted = sessions.iter().filter(|s| s.busted).count() as u32;
        let total_spins: u64 = sessions.iter().map(|s| s.spins).sum();
        let total_peak: u64 = sessions.iter().map(|s| u64::from(s.peak_credit)).sum();
        let mut lengths: Vec<u64> = sessions.iter().map(|s| s.spins).collect();
        lengths.sort_unstable();
        let median_session_spins = lengths.get(lengths.len() / 2).copied().unwrap_or(0);

        Self {
            bet,
            spins: tally.spins,
            total_staked: tally.total_staked,
            total_paid: tally.total_paid,
            rtp: ratio(tally.total_paid, tally.total_staked),
            hit_rate: ratio(tally.winning_spins, tally.spins),
            avg_lines_per_hit: ratio(tally.lines_hit, tally.winning_spins),
            max_single_win: tally.max_single_win,
            symbols,
            sessions_busted,
            avg_session_spins: ratio(total_spins, count),
            median_session_spins,
            avg_peak_credit: ratio(total_peak, count),
            sessions,
        }
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str("── PAYOUT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Spins:               {}\n", self.spins));
        report.push_str(&format!("  Bet:                 {}\n", self.bet));
        report.push_str(&format!("  Staked:              {}\n", self.total_staked));
        report.push_str(&format!("  Paid:                {}\n", self.total_paid));
        report.push_str(&format!("  Return to player:    {:.2}%\n", self.rtp * 100.0));
        report.push_str(&format!("  Hit rate:            {:.2}%\n", self.hit_rate * 100.0));
        report.push_str(&format!("  Lines per hit:       {:.2}\n", self.avg_lines_per_hit));
        report.push_str(&format!("  Biggest spin:        {}\n\n", self.max_single_win));

        report.push_str("── SYMBOLS ──────────────────────────────────────────────────────\n");
        report.push_str("  Sym   Landed    Share  Expected   Lines        Paid\n");
        for s in &self.symbols {
            report.push_str(&format!(
                "  {:>3}  {:>7}  {:>6.2}%  {:>7.2}%  {:>6}  {:>10}\n",
                s.id,
                s.landed,
                s.share * 100.0,
                s.expected_share * 100.0,
                s.line_hits,
                s.paid
            ));
        }
        report.push('\n');

        report.push_str("── SESSIONS (20 credits) ────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Played:              {} ({} busted)\n",
            self.sessions.len(),
            self.sessions_busted
        ));
        report.push_str(&format!("  Avg length:          {:.1} spins\n", self.avg_session_spins));
        report.push_str(&format!("  Median length:       {} spins\n", self.median_session_spins));
        report.push_str(&format!("  Avg peak credit:     {:.1}\n", self.avg_peak_credit));

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sevens_and_cherries() -> Grid {
        // Sevens across the top, cherries across the middle.
        Grid::from_ids([8, 1, 2, 8, 1, 3, 8, 1, 4]).unwrap()
    }

    #[test]
    fn test_tally_records_lines_and_faces() {
        let grid = sevens_and_cherries();
        let wins = crate::slot::evaluate(&grid);
        let mut tally = SpinTally::default();
        tally.record(2, &grid, &wins, 2 * 8 + 2 + 2 * 1 + 2);

        assert_eq!(tally.spins, 1);
        assert_eq!(tally.total_staked, 2);
        assert_eq!(tally.winning_spins, 1);
        assert_eq!(tally.lines_hit, 2);
        assert_eq!(tally.landed[7], 3);
        assert_eq!(tally.landed[0], 3);
        assert_eq!(tally.paid_by_symbol[7], 18);
        assert_eq!(tally.paid_by_symbol[0], 4);
    }

    #[test]
    fn test_report_ratios() {
        let grid = sevens_and_cherries();
        let wins = crate::slot::evaluate(&grid);
        let mut tally = SpinTally::default();
        tally.record(1, &grid, &wins, 11);
        let blank = Grid::from_ids([1, 2, 3, 4, 5, 6, 7, 8, 1]).unwrap();
        tally.record(1, &blank, &WinRecord::default(), 0);

        let report = SimReport::new(1, tally, Vec::new());
        assert_eq!(report.hit_rate, 0.5);
        assert_eq!(report.rtp, 5.5);
        assert_eq!(report.avg_session_spins, 0.0);
        assert_eq!(report.symbols.len(), 8);
        let shares: f64 = report.symbols.iter().map(|s| s.expected_share).sum();
        assert!((shares - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_json_has_headline_fields() {
        let report = SimReport::new(1, SpinTally::default(), Vec::new());
        let json = report.to_json();
        assert!(json.contains("\"rtp\""));
        assert!(json.contains("\"hit_rate\""));
        assert!(report.to_text().contains("SIMULATION REPORT"));
    }
}
