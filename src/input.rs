//! Key mapping from crossterm events to UI-agnostic actions.

use crate::slot::SlotInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Menu and settings navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Left,
    Right,
    Select,
    Back,
    Other,
}

/// Only presses count; repeats and releases (reported on some platforms) are
/// dropped.
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

pub fn menu_input(code: KeyCode) -> MenuInput {
    match code {
        KeyCode::Left | KeyCode::Up => MenuInput::Left,
        KeyCode::Right | KeyCode::Down => MenuInput::Right,
        KeyCode::Enter | KeyCode::Char(' ') => MenuInput::Select,
        KeyCode::Esc => MenuInput::Back,
        _ => MenuInput::Other,
    }
}

/// Game-screen keys. Anything unmapped is `None` but still clicks.
pub fn slot_input(code: KeyCode) -> Option<SlotInput> {
    match code {
        KeyCode::Left => Some(SlotInput::SpinLeft),
        KeyCode::Right => Some(SlotInput::SpinRight),
        KeyCode::Up => Some(SlotInput::BetUp),
        KeyCode::Down => Some(SlotInput::BetDown),
        KeyCode::Esc => Some(SlotInput::Cancel),
        KeyCode::Enter => Some(SlotInput::Confirm),
        KeyCode::F(1) => Some(SlotInput::Help),
        _ => None,
    }
}
