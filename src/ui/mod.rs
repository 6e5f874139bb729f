pub mod game_common;
pub mod menu_scene;
pub mod slot_scene;

use crate::app::{App, Screen};
use crate::slot::HighScoreStore;
use rand::RngCore;
use ratatui::Frame;
use std::io::Write;

/// Main UI drawing function: one frame of whichever screen is active.
pub fn draw_ui<S: HighScoreStore, W: Write, R: RngCore>(frame: &mut Frame, app: &App<S, W, R>) {
    let area = frame.size();
    match app.screen {
        Screen::Menu | Screen::Quit => {
            menu_scene::render_menu(frame, area, app.menu_selected, app.high_score)
        }
        Screen::Settings => {
            menu_scene::render_settings(frame, area, app.settings_selected, &app.settings)
        }
        Screen::Game => {
            slot_scene::render_slot_scene(frame, area, &app.machine, &app.audio, app.overlay)
        }
    }
}
