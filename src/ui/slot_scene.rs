//! Slot table rendering: the 3x3 reel window, paid lines, the wallet panel
//! and the help / end-of-game overlays.

use super::game_common::{
    create_game_layout, render_game_over_banner, render_info_panel_frame, render_modal,
    render_status_bar,
};
use crate::app::Overlay;
use crate::audio::TerminalAudio;
use crate::slot::{Payline, Renderer, SlotMachine, SpinPhase, Symbol, CELLS, REELS, ROWS};
use rand::RngCore;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::io::Write;

const CELL_WIDTH: u16 = 10;
const CELL_HEIGHT: u16 = 3;
const PANEL_WIDTH: u16 = 22;

/// Label and colour for each symbol face.
pub fn symbol_face(symbol: Symbol) -> (&'static str, Color) {
    match symbol.id() {
        1 => ("CHERRY", Color::Red),
        2 => ("LEMON", Color::Yellow),
        3 => ("ORANGE", Color::LightRed),
        4 => ("PLUM", Color::Magenta),
        5 => ("GRAPES", Color::LightMagenta),
        6 => ("MELON", Color::Green),
        7 => ("BELL", Color::LightYellow),
        _ => ("SEVEN", Color::LightCyan),
    }
}

/// Collects what the machine asks to draw for one frame.
#[derive(Debug, Default)]
pub struct ReelCanvas {
    cells: [[Option<Symbol>; ROWS]; REELS],
    lines: Vec<Payline>,
}

impl ReelCanvas {
    pub fn symbol_at(&self, reel: usize, row: usize) -> Option<Symbol> {
        self.cells[reel][row]
    }

    pub fn lines(&self) -> &[Payline] {
        &self.lines
    }

    /// Whether the cell sits on any highlighted line.
    pub fn is_lit(&self, reel: usize, row: usize) -> bool {
        let index = reel * ROWS + row;
        index < CELLS && self.lines.iter().any(|line| line.contains(index))
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let width = CELL_WIDTH * REELS as u16;
        let height = CELL_HEIGHT * ROWS as u16;
        if area.width < width || area.height < height {
            frame.render_widget(
                Paragraph::new("Window too small").alignment(Alignment::Center),
                area,
            );
            return;
        }
        let x0 = area.x + (area.width - width) / 2;
        let y0 = area.y + (area.height - height) / 2;

        for reel in 0..REELS {
            for row in 0..ROWS {
                let Some(symbol) = self.cells[reel][row] else {
                    continue;
                };
                let (label, color) = symbol_face(symbol);
                let border = if self.is_lit(reel, row) {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let rect = Rect::new(
                    x0 + reel as u16 * CELL_WIDTH,
                    y0 + row as u16 * CELL_HEIGHT,
                    CELL_WIDTH,
                    CELL_HEIGHT,
                );
                let cell = Paragraph::new(Span::styled(
                    label,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border));
                frame.render_widget(cell, rect);
            }
        }
    }
}

impl Renderer for ReelCanvas {
    fn blit(&mut self, symbol: Symbol, reel: usize, row: usize) {
        if reel < REELS && row < ROWS {
            self.cells[reel][row] = Some(symbol);
        }
    }

    fn draw_payline(&mut self, line: Payline) {
        if !self.lines.contains(&line) {
            self.lines.push(line);
        }
    }
}

/// Render the table.
pub fn render_slot_scene<R: RngCore, W: Write>(
    frame: &mut Frame,
    area: Rect,
    machine: &SlotMachine<R>,
    audio: &TerminalAudio<W>,
    overlay: Overlay,
) {
    let layout = create_game_layout(frame, area, " Bfruit ", Color::LightYellow, 9, PANEL_WIDTH);

    let mut canvas = ReelCanvas::default();
    machine.render(&mut canvas);
    canvas.draw(frame, layout.content);

    render_status_bar_content(frame, layout.status_bar, machine);
    render_info_panel(frame, layout.info_panel, machine, &canvas, audio);

    if machine.ledger().is_game_over() && machine.phase() != SpinPhase::Unwinding {
        render_game_over_banner(
            frame,
            layout.content,
            Color::Red,
            "Game Over",
            "out of credit",
        );
    }

    match overlay {
        Overlay::None => {}
        Overlay::Help => render_help(frame, area),
        Overlay::EndGame { old_high, new_high } => render_end_game(frame, area, old_high, new_high),
    }
}

fn render_status_bar_content<R: RngCore>(frame: &mut Frame, area: Rect, machine: &SlotMachine<R>) {
    let (text, color) = match machine.phase() {
        SpinPhase::Unwinding => ("Spinning...", Color::Yellow),
        SpinPhase::GameOver => ("Game over", Color::Red),
        SpinPhase::Idle if machine.wins().is_empty() => ("Place your bet", Color::White),
        SpinPhase::Idle => ("Winner!", Color::Green),
    };
    let controls: &[(&str, &str)] = match machine.phase() {
        SpinPhase::Unwinding => &[("[Esc]", "Abort")],
        _ => &[
            ("[←/→]", "Spin"),
            ("[↑/↓]", "Bet"),
            ("[Enter]", "End"),
            ("[Esc]", "Menu"),
        ],
    };
    render_status_bar(frame, area, text, color, controls);
}

fn render_info_panel<R: RngCore, W: Write>(
    frame: &mut Frame,
    area: Rect,
    machine: &SlotMachine<R>,
    canvas: &ReelCanvas,
    audio: &TerminalAudio<W>,
) {
    let inner = render_info_panel_frame(frame, area);
    let ledger = machine.ledger();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Bet:         ", label),
            Span::styled(format!("{:02}", ledger.bet()), value),
        ]),
        Line::from(vec![
            Span::styled("Winner Paid: ", label),
            Span::styled(format!("{:03}", ledger.last_win()), value),
        ]),
        Line::from(vec![
            Span::styled("Credit:      ", label),
            Span::styled(format!("{:06}", ledger.credit()), value),
        ]),
        Line::from(""),
    ];

    for line in canvas.lines() {
        if let Some(symbol) = machine.wins().get(*line) {
            let (name, color) = symbol_face(symbol);
            lines.push(Line::from(vec![
                Span::styled(format!("{:<11}", line.name()), label),
                Span::styled(name, Style::default().fg(color)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Sound {}  Music {}",
            on_off(audio.sound_enabled()),
            on_off(audio.music_enabled())
        ),
        label,
    )));
    if ledger.is_invincible() {
        lines.push(Line::from(Span::styled(
            "INVINCIBLE",
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::from(Span::styled(
        "F1 FOR HELP",
        Style::default().fg(Color::Yellow),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let inner = render_modal(frame, area, " Help ", 44, 14);
    let key = Style::default().fg(Color::White);
    let text = Style::default().fg(Color::DarkGray);
    let row = |k: &'static str, t: &'static str| {
        Line::from(vec![Span::styled(format!("{:<10}", k), key), Span::styled(t, text)])
    };
    let lines = vec![
        row("Left", "spin, reels stop left to right"),
        row("Right", "spin"),
        row("Up/Down", "raise or lower the bet"),
        row("Esc", "abort a spin / back to menu"),
        row("Enter", "end game and save the score"),
        row("F1", "close this help"),
        Line::from(""),
        Line::from(Span::styled(
            "Three in a line pays bet x symbol + bet.",
            text,
        )),
        Line::from(Span::styled(
            "Five lines: rows and both diagonals.",
            text,
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_end_game(frame: &mut Frame, area: Rect, old_high: u32, new_high: Option<u32>) {
    let inner = render_modal(frame, area, " Game Ended ", 40, 8);
    let mut lines = Vec::new();
    match new_high {
        Some(score) => {
            lines.push(Line::from(Span::styled(
                "NEW HIGH SCORE!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("{:06}  (was {:06})", score, old_high)));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Thanks for playing",
                Style::default().fg(Color::White),
            )));
            lines.push(Line::from(format!("High score: {:06}", old_high)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Press any key]",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Grid;

    #[test]
    fn test_canvas_records_blits_and_lines() {
        let mut canvas = ReelCanvas::default();
        let cherry = Symbol::new(1).unwrap();
        canvas.blit(cherry, 2, 1);
        canvas.blit(cherry, 7, 1);
        assert_eq!(canvas.symbol_at(2, 1), Some(cherry));
        assert_eq!(canvas.symbol_at(0, 0), None);

        canvas.draw_payline(Payline::MiddleRow);
        canvas.draw_payline(Payline::MiddleRow);
        assert_eq!(canvas.lines(), &[Payline::MiddleRow]);
        assert!(canvas.is_lit(0, 1));
        assert!(!canvas.is_lit(0, 0));
    }

    #[test]
    fn test_machine_fills_every_cell() {
        use rand::SeedableRng;
        let machine = SlotMachine::with_source(
            crate::slot::SymbolSource::new(rand_chacha::ChaCha8Rng::seed_from_u64(3)),
            false,
        );
        let mut canvas = ReelCanvas::default();
        machine.render(&mut canvas);
        let grid = Grid::default();
        for reel in 0..REELS {
            for row in 0..ROWS {
                assert_eq!(canvas.symbol_at(reel, row), Some(grid.cell(reel, row)));
            }
        }
    }

    #[test]
    fn test_every_symbol_has_a_face() {
        let names: Vec<_> = Symbol::all().map(|s| symbol_face(s).0).collect();
        assert_eq!(names.len(), 8);
        assert_eq!(names[0], "CHERRY");
        assert_eq!(names[7], "SEVEN");
    }
}
