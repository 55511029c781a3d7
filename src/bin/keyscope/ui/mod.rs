//! TUI module for keyscope
//!
//! Renders the always-on view: audio banner, connected devices, the
//! currently-held notes, and an oscilloscope of the rendered output.

mod devices;
mod notes;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use devices::render_devices;
use notes::render_notes;
use waveform::render_waveform;

/// Audio activation state shown in the banner.
pub enum AudioStatus {
    /// Waiting for the user gesture that unlocks audio.
    Inactive,
    Active,
    Failed(String),
}

/// Everything the UI needs for one frame.
pub struct View<'a> {
    /// Held-note labels in press order
    pub note_names: Vec<String>,
    /// Connected MIDI input names
    pub devices: &'a [String],
    pub audio: &'a AudioStatus,
    /// Live generator count (0 while audio is inactive)
    pub generators: usize,
    /// Recent rendered samples for the oscilloscope
    pub waveform: &'a [f32],
}

/// Render the full UI.
pub fn render(frame: &mut Frame, view: &View) {
    let area = frame.area();

    // Main layout: banner, devices + notes, oscilloscope, help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Audio banner
            Constraint::Min(6),    // Devices and held notes
            Constraint::Length(8), // Oscilloscope
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_banner(frame, chunks[0], view);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    render_devices(frame, middle[0], view.devices);
    render_notes(frame, middle[1], &view.note_names);

    render_waveform(frame, chunks[2], view.waveform);

    let help = Paragraph::new(" [Q] Quit  [Space] Enable audio")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}

/// Audio state banner at the top.
fn render_banner(frame: &mut Frame, area: ratatui::layout::Rect, view: &View) {
    let block = Block::default().title(" keyscope ").borders(Borders::ALL);

    let line = match view.audio {
        AudioStatus::Inactive => Line::from(Span::styled(
            " ♪ Audio off, press Space to enable tones",
            Style::default().fg(Color::Yellow),
        )),
        AudioStatus::Active => Line::from(vec![
            Span::styled(" ♪ Audio on (sine)  ", Style::default().fg(Color::Green)),
            Span::styled(
                format!("{} generator(s) live", view.generators),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        AudioStatus::Failed(reason) => Line::from(Span::styled(
            format!(" ♪ Audio unavailable: {reason}"),
            Style::default().fg(Color::Red),
        )),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
