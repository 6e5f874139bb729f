//! Title menu and settings screens.

use crate::app::{MENU_CHOICES, MENU_HIGH_SCORE};
use crate::build_info::BUILD_VERSION;
use crate::config::Settings;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE_ART: [&str; 5] = [
    "█▀▀▄ █▀▀ █▀▀▄ █  █ ▀█▀ ▀█▀",
    "█▀▀▄ █▀  █▄▄▀ █  █  █   █ ",
    "█  █ █   █ ▀▄ █  █  █   █ ",
    "█▄▄▀ █   █  █ ▀▄▄▀ ▄█▄  █ ",
    "",
];

fn screen_chunks(frame: &mut Frame, area: Rect, border: Color) -> [Rect; 3] {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(TITLE_ART.len() as u16 + 1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(inner);
    [chunks[0], chunks[1], chunks[2]]
}

fn render_title(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = TITLE_ART
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    let height = lines.len() as u16;
    let y = area.y + area.height.saturating_sub(height) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, height.min(area.height)),
    );
}

fn choice_line(labels: &[String], selected: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let style = if i == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
    }
    Line::from(spans)
}

fn render_footer(frame: &mut Frame, area: Rect, hint: &str) {
    let footer = Line::from(vec![
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(
            format!("v{}", BUILD_VERSION),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), area);
}

/// Title screen with the main menu. The high score shows while its entry is
/// selected.
pub fn render_menu(frame: &mut Frame, area: Rect, selected: usize, high_score: u32) {
    let [title, menu, footer] = screen_chunks(frame, area, Color::LightYellow);
    render_title(frame, title);

    let labels: Vec<String> = MENU_CHOICES.iter().map(|s| s.to_string()).collect();
    let mut lines = vec![choice_line(&labels, selected), Line::from("")];
    if selected == MENU_HIGH_SCORE {
        lines.push(Line::from(Span::styled(
            format!("High Score: {:06}", high_score),
            Style::default().fg(Color::Cyan),
        )));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), menu);

    render_footer(frame, footer, "[←/→] Choose  [Enter] Select  [Esc] Quit");
}

/// Audio toggles.
pub fn render_settings(frame: &mut Frame, area: Rect, selected: usize, settings: &Settings) {
    let [title, menu, footer] = screen_chunks(frame, area, Color::Cyan);
    render_title(frame, title);

    let labels = settings_labels(settings);
    frame.render_widget(
        Paragraph::new(vec![choice_line(&labels, selected)]).alignment(Alignment::Center),
        menu,
    );

    render_footer(frame, footer, "[←/→] Choose  [Enter] Toggle  [Esc] Back");
}

pub fn settings_labels(settings: &Settings) -> Vec<String> {
    let flag = |on: bool| if on { "ON" } else { "OFF" };
    vec![
        format!("Music: {}", flag(settings.music)),
        format!("Sound: {}", flag(settings.sound)),
        "Back".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SETTINGS_ITEMS;

    #[test]
    fn test_settings_labels_follow_toggles() {
        let labels = settings_labels(&Settings {
            music: false,
            sound: true,
        });
        assert_eq!(labels.len(), SETTINGS_ITEMS);
        assert_eq!(labels[0], "Music: OFF");
        assert_eq!(labels[1], "Sound: ON");
    }

    #[test]
    fn test_choice_line_has_every_entry() {
        let labels: Vec<String> = MENU_CHOICES.iter().map(|s| s.to_string()).collect();
        let line = choice_line(&labels, 1);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        for choice in MENU_CHOICES {
            assert!(text.contains(choice));
        }
    }
}
