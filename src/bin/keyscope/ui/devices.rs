//! Connected MIDI device list widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the connected MIDI inputs, or a placeholder when none were found.
pub fn render_devices(frame: &mut Frame, area: Rect, devices: &[String]) {
    let block = Block::default().title(" Devices ").borders(Borders::ALL);

    if devices.is_empty() {
        let placeholder = Paragraph::new("No MIDI devices found.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = devices
        .iter()
        .map(|name| ListItem::new(name.as_str()))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
