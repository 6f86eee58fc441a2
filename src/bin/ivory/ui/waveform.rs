//! Waveform oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render the most recent output samples.
///
/// Voices peak at 0.5 each, so the axis covers a few stacked voices.
pub fn render_waveform(frame: &mut Frame, area: Rect, scope: &[f32]) {
    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL);

    // Downsample to the chart width
    let target_w = area.width.max(1) as usize;
    let step = scope.len().div_ceil(target_w).max(1);
    let data: Vec<(f64, f64)> = scope
        .iter()
        .enumerate()
        .step_by(step)
        .map(|(i, &sample)| (i as f64 / scope.len().max(1) as f64, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.5, 1.5])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
