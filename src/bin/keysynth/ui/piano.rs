//! Piano banner widget - the key layout with held keys lit

use keysynth::io::{keyboard::KEY_COUNT, pitch_for_key};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BANNER: [&str; 6] = [
    "|   |   |   |   |   | |   |   |   |   | |   | |   |   |   |",
    "|   | S |   |   | F | | G |   |   | J | | K | | L |   |   |",
    "|   |___|   |   |___| |___|   |   |___| |___| |___|   |   |__",
    "|     |     |     |     |     |     |     |     |     |     |",
    "|  Z  |  X  |  C  |  V  |  B  |  N  |  M  |  ,  |  .  |  /  |",
    "|_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|",
];

/// Render the keyboard layout, highlighting keys that are down
pub fn render_piano(frame: &mut Frame, area: Rect, held: &[bool; KEY_COUNT]) {
    let lit = Style::default()
        .fg(Color::Black)
        .bg(Color::LightGreen)
        .add_modifier(Modifier::BOLD);

    let lines: Vec<Line> = BANNER
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .map(|c| match pitch_for_key(c) {
                    Some(pitch) if held[pitch] => Span::styled(c.to_string(), lit),
                    _ => Span::raw(c.to_string()),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let block = Block::default().title(" Keys ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
