//! Screen flow around the slot machine: menu, settings, the table itself and
//! its help / end-of-game overlays.

use crate::audio::TerminalAudio;
use crate::config::Settings;
use crate::input::{is_interrupt, is_press, menu_input, slot_input, MenuInput};
use crate::slot::{
    Audio, EntropyRng, HighScoreStore, SlotInput, SlotMachine, SpinEvent, SpinPhase,
};
use crossterm::event::KeyEvent;
use rand::RngCore;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Settings,
    Game,
    Quit,
}

/// Game-screen overlay. While one is open the table ignores spin and bet keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    /// Game ended by the player. `new_high` is set when the credit beat the
    /// previous best.
    EndGame { old_high: u32, new_high: Option<u32> },
}

pub const MENU_CHOICES: [&str; 4] = ["New Game", "Settings", "High Score", "Exit"];
pub const MENU_HIGH_SCORE: usize = 2;
pub const SETTINGS_ITEMS: usize = 3;

pub struct App<S: HighScoreStore, W: Write = std::io::Stdout, R = EntropyRng> {
    pub screen: Screen,
    pub overlay: Overlay,
    pub menu_selected: usize,
    pub settings_selected: usize,
    pub machine: SlotMachine<R>,
    pub audio: TerminalAudio<W>,
    pub high_score: u32,
    pub settings: Settings,
    scores: S,
    settings_dir: Option<PathBuf>,
}

impl<S: HighScoreStore, W: Write, R: RngCore> App<S, W, R> {
    pub fn new(
        machine: SlotMachine<R>,
        audio: TerminalAudio<W>,
        scores: S,
        settings: Settings,
        settings_dir: Option<PathBuf>,
    ) -> Self {
        let high_score = scores.load();
        info!(high_score, "loaded high score");
        Self {
            screen: Screen::Menu,
            overlay: Overlay::None,
            menu_selected: 0,
            settings_selected: 0,
            machine,
            audio,
            high_score,
            settings,
            scores,
            settings_dir,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.screen == Screen::Quit
    }

    /// Dispatch one key press to the current screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if !is_press(&key) {
            return;
        }
        if is_interrupt(&key) {
            self.quit();
            return;
        }
        match self.screen {
            Screen::Menu => self.handle_menu(menu_input(key.code)),
            Screen::Settings => self.handle_settings(menu_input(key.code)),
            Screen::Game => {
                self.audio.play_click();
                if let Some(input) = slot_input(key.code) {
                    self.handle_game(input);
                } else if matches!(self.overlay, Overlay::EndGame { .. }) {
                    self.leave_table();
                }
            }
            Screen::Quit => {}
        }
    }

    /// One frame of the clock. Only the table animates.
    pub fn tick(&mut self) -> SpinEvent {
        if self.screen != Screen::Game {
            return SpinEvent::Ignored;
        }
        self.machine.tick(&mut self.audio)
    }

    pub fn handle_menu(&mut self, input: MenuInput) {
        match input {
            MenuInput::Left => {
                self.menu_selected = self
                    .menu_selected
                    .checked_sub(1)
                    .unwrap_or(MENU_CHOICES.len() - 1);
            }
            MenuInput::Right => {
                self.menu_selected = (self.menu_selected + 1) % MENU_CHOICES.len();
            }
            MenuInput::Select => match self.menu_selected {
                0 => self.start_game(),
                1 => self.screen = Screen::Settings,
                MENU_HIGH_SCORE => {}
                _ => self.quit(),
            },
            MenuInput::Back => self.quit(),
            MenuInput::Other => {}
        }
    }

    pub fn handle_settings(&mut self, input: MenuInput) {
        match input {
            MenuInput::Left => {
                self.settings_selected = self
                    .settings_selected
                    .checked_sub(1)
                    .unwrap_or(SETTINGS_ITEMS - 1);
            }
            MenuInput::Right => {
                self.settings_selected = (self.settings_selected + 1) % SETTINGS_ITEMS;
            }
            MenuInput::Select => match self.settings_selected {
                0 => {
                    self.settings.music = !self.settings.music;
                    self.audio.set_music(self.settings.music);
                    self.persist_settings();
                }
                1 => {
                    self.settings.sound = !self.settings.sound;
                    self.audio.set_sound(self.settings.sound);
                    self.persist_settings();
                }
                _ => self.screen = Screen::Menu,
            },
            MenuInput::Back => self.screen = Screen::Menu,
            MenuInput::Other => {}
        }
    }

    pub fn handle_game(&mut self, input: SlotInput) {
        match self.overlay {
            Overlay::EndGame { .. } => {
                self.leave_table();
                return;
            }
            Overlay::Help => {
                match input {
                    SlotInput::Help => self.overlay = Overlay::None,
                    SlotInput::Confirm => self.end_game(),
                    _ => {}
                }
                return;
            }
            Overlay::None => {}
        }

        if input == SlotInput::Help && self.machine.phase() != SpinPhase::Unwinding {
            self.overlay = Overlay::Help;
            return;
        }

        match self.machine.handle_input(input, &mut self.audio) {
            SpinEvent::ExitRequested | SpinEvent::Cancelled => self.leave_table(),
            SpinEvent::EndRequested => self.end_game(),
            _ => {}
        }
    }

    fn start_game(&mut self) {
        self.machine.reset(&mut self.audio);
        self.overlay = Overlay::None;
        self.audio.play_music();
        self.screen = Screen::Game;
    }

    fn leave_table(&mut self) {
        self.audio.stop_music();
        self.overlay = Overlay::None;
        self.screen = Screen::Menu;
    }

    /// Bank the credit as a score and show the result.
    fn end_game(&mut self) {
        let credit = self.machine.ledger().credit();
        let old_high = self.high_score;
        let new_high = if credit > old_high {
            if let Err(err) = self.scores.save(credit) {
                warn!(error = %err, "could not save high score");
            }
            info!(old_high, credit, "new high score");
            self.high_score = credit;
            Some(credit)
        } else {
            None
        };
        self.overlay = Overlay::EndGame { old_high, new_high };
    }

    fn persist_settings(&self) {
        if let Some(dir) = &self.settings_dir {
            if let Err(err) = self.settings.save(dir) {
                warn!(error = %err, "could not save settings");
            }
        }
    }

    fn quit(&mut self) {
        self.machine.reset(&mut self.audio);
        self.audio.stop_music();
        self.screen = Screen::Quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{MemoryHighScore, SymbolSource, WagerState};
    use crossterm::event::{KeyCode, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    type TestApp = App<MemoryHighScore, Vec<u8>, ChaCha8Rng>;

    fn app(high: u32) -> TestApp {
        let machine =
            SlotMachine::with_source(SymbolSource::new(ChaCha8Rng::seed_from_u64(42)), false);
        App::new(
            machine,
            TerminalAudio::new(Vec::new(), true, true),
            MemoryHighScore(high),
            Settings::default(),
            None,
        )
    }

    fn press(app: &mut TestApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_starts_on_menu_with_loaded_score() {
        let app = app(55);
        assert_eq!(app.screen, Screen::Menu);
        assert_eq!(app.high_score, 55);
    }

    #[test]
    fn test_menu_wraps_and_starts_game() {
        let mut app = app(1);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.menu_selected, MENU_CHOICES.len() - 1);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.menu_selected, 0);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Game);
        assert!(app.audio.is_music_playing());
    }

    #[test]
    fn test_high_score_choice_does_nothing() {
        let mut app = app(1);
        app.menu_selected = MENU_HIGH_SCORE;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Menu);
    }

    #[test]
    fn test_escape_from_menu_quits() {
        let mut app = app(1);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_settings_toggle_audio() {
        let mut app = app(1);
        app.menu_selected = 1;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Settings);
        press(&mut app, KeyCode::Enter);
        assert!(!app.settings.music);
        assert!(!app.audio.music_enabled());
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert!(!app.settings.sound);
        assert!(!app.audio.sound_enabled());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Menu);
    }

    #[test]
    fn test_help_locks_the_table() {
        let mut app = app(1);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.machine.phase(), SpinPhase::Idle);
        assert_eq!(app.machine.ledger().credit(), 20);
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_escape_mid_spin_returns_to_menu_unpaid() {
        let mut app = app(1);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.machine.phase(), SpinPhase::Unwinding);
        app.tick();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Menu);
        assert_eq!(app.machine.ledger().state(), WagerState::default());
        assert_eq!(app.audio.active_reels(), 0);
        assert!(!app.audio.is_music_playing());
    }

    #[test]
    fn test_end_game_saves_new_high_score() {
        let mut app = app(5);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.overlay,
            Overlay::EndGame {
                old_high: 5,
                new_high: Some(20)
            }
        );
        assert_eq!(app.high_score, 20);
        assert_eq!(app.scores.load(), 20);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.screen, Screen::Menu);
    }

    #[test]
    fn test_end_game_without_record() {
        let mut app = app(500);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.overlay,
            Overlay::EndGame {
                old_high: 500,
                new_high: None
            }
        );
        assert_eq!(app.scores.load(), 500);
    }

    #[test]
    fn test_spin_plays_out_through_ticks() {
        let mut app = app(1);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.audio.clicks(), 1);
        assert_eq!(app.audio.active_reels(), 3);
        let mut frames = 0;
        while app.machine.phase() == SpinPhase::Unwinding {
            app.tick();
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(app.audio.active_reels(), 0);
        assert_eq!(app.screen, Screen::Game);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = app(1);
        press(&mut app, KeyCode::Enter);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }
}
