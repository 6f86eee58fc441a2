//! TUI module for ivory
//!
//! Draws the status bar, the keyboard and a scope of the output.

mod keyboard;
mod status;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use ivory::{keys::KeyboardSurface, synth::Piano};

pub use status::Status;

use keyboard::render_keyboard;
use status::render_status;
use waveform::render_waveform;

/// Render one frame. Returns the terminal cell where the keyboard surface's
/// origin was drawn, for mouse hit testing.
pub fn render(
    frame: &mut Frame,
    piano: &Piano<KeyboardSurface>,
    scope: &[f32],
    status: &Status,
) -> (u16, u16) {
    let (_, keyboard_height) = piano.surface().size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                   // Status bar
            Constraint::Length(keyboard_height + 2), // Keyboard
            Constraint::Min(6),                      // Waveform
            Constraint::Length(1),                   // Help bar
        ])
        .split(frame.area());

    render_status(frame, chunks[0], piano, scope, status);
    let origin = render_keyboard(frame, chunks[1], piano);
    render_waveform(frame, chunks[2], scope);

    let help = Paragraph::new(" [A-;] Play  [W E T Y U O P] Sharps  [Mouse] Click keys  [Esc] Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);

    origin
}
