//! Status bar widget - audio state, held keys and output level

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use ivory::{audio::ContextState, keys::KeyboardSurface, synth::Piano};

/// Static facts about the session shown in the bar
pub struct Status {
    pub sample_rate: f32,
    pub channels: usize,
    pub emulated_release: bool,
}

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    piano: &Piano<KeyboardSurface>,
    scope: &[f32],
    status: &Status,
) {
    let block = Block::default()
        .title(" ivory ")
        .borders(Borders::ALL);

    let audio = piano.audio();
    let (state_str, state_color) = match audio.state() {
        ContextState::Running => ("▶ Running", Color::Green),
        ContextState::Suspended => ("⏸ Suspended", Color::Yellow),
    };

    let mut held: Vec<_> = piano.active_keys().collect();
    held.sort();
    let held: String = held
        .iter()
        .filter_map(|key| piano.registry().lookup(*key))
        .map(|key| key.note)
        .collect::<Vec<_>>()
        .join(" ");

    let stats = AudioStats::from_buffer(scope);
    let release_mode = if status.emulated_release {
        "release: emulated"
    } else {
        "release: reported"
    };

    let line = Line::from(vec![
        Span::styled(format!(" {state_str}  "), Style::default().fg(state_color)),
        Span::styled(
            format!("Held: {:<12}", if held.is_empty() { "-" } else { held.as_str() }),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Fading: {}  ", piano.pending_stops()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.1}kHz x{}  ", status.sample_rate / 1000.0, status.channels),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("t={:.1}s  ", audio.current_time()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}  ", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(release_mode, Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
