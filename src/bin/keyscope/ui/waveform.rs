//! Output trace widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Treat the tap as silent below this amplitude.
const SILENCE_FLOOR: f32 = 1e-4;

/// Render a trace of the most recent synthesizer output. Shows a
/// placeholder until the output carries signal, like the other panels.
pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32]) {
    let block = Block::default().title(" Output ").borders(Borders::ALL);

    if samples.iter().all(|&s| s.abs() < SILENCE_FLOOR) {
        let placeholder = Paragraph::new("Silence.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    // One point per tapped sample, x in sample index
    let trace: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64, s as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&trace);

    let x_max = samples.len().saturating_sub(1).max(1) as f64;
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            // Full-scale output is ±1; the per-voice gain keeps real
            // signal well inside that.
            Axis::default()
                .bounds([-1.0, 1.0])
                .labels(["-1", "0", "+1"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
