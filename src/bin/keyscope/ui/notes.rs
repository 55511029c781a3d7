//! Held-note list widget

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the currently-held notes in press order, or a placeholder when
/// nothing is held.
pub fn render_notes(frame: &mut Frame, area: Rect, note_names: &[String]) {
    let block = Block::default().title(" Held Notes ").borders(Borders::ALL);

    if note_names.is_empty() {
        let placeholder = Paragraph::new("No keys held.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = note_names
        .iter()
        .map(|name| {
            ListItem::new(name.as_str()).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
