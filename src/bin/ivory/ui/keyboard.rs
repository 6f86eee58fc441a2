//! Piano keyboard widget

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use ivory::{
    keys::{surface::KeyColor, KeyboardSurface},
    synth::Piano,
};

/// Draw every element of the surface inside a bordered box.
///
/// Returns where the surface origin landed on screen.
pub fn render_keyboard(frame: &mut Frame, area: Rect, piano: &Piano<KeyboardSurface>) -> (u16, u16) {
    let block = Block::default().title(" Keyboard ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let surface = piano.surface();
    let (width, _) = surface.size();
    // center horizontally
    let origin_x = inner.x + inner.width.saturating_sub(width) / 2;
    let origin = (origin_x, inner.y);

    // elements are stored white first, so black keys paint on top
    for (id, element) in surface.elements() {
        let bounds = element.bounds();
        let rect = Rect {
            x: origin.0 + bounds.x,
            y: origin.1 + bounds.y,
            width: bounds.width,
            height: bounds.height,
        }
        .intersection(inner);
        if rect.is_empty() {
            continue;
        }

        let (fg, bg) = match (element.color(), element.is_pressed()) {
            (KeyColor::White, false) => (Color::Black, Color::White),
            (KeyColor::White, true) => (Color::Black, Color::LightYellow),
            (KeyColor::Black, false) => (Color::White, Color::Black),
            (KeyColor::Black, true) => (Color::Black, Color::Yellow),
        };
        let style = Style::default().fg(fg).bg(bg);

        let symbol = piano
            .registry()
            .key_for_element(id)
            .map(|key| key.symbol().to_string())
            .unwrap_or_default();
        let label = piano
            .registry()
            .key_for_element(id)
            .and_then(|key| piano.registry().lookup(key))
            .map_or(element.note(), |key| key.note);

        // pad the labels down to the bottom of the key
        let mut lines = vec![Line::raw(""); rect.height.saturating_sub(3) as usize];
        lines.push(Line::raw(label));
        lines.push(Line::styled(symbol, Style::default().add_modifier(Modifier::BOLD)));

        let key = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM));

        frame.render_widget(Clear, rect);
        frame.render_widget(key, rect);
    }

    origin
}
