//! Floating context menu overlay

use crate::state::MenuSession;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

/// Render an open menu at its clamped position.
///
/// The session computes where the menu goes; this only paints it. A menu
/// with no visible entries still paints its (empty) frame.
pub fn draw(frame: &mut Frame, menu: &MenuSession, area: Rect) {
    if !menu.is_open() {
        return;
    }

    let rect = menu.rect(area).intersection(area);
    if rect.is_empty() {
        return;
    }

    // Clear the area behind the menu
    frame.render_widget(Clear, rect);

    let items: Vec<ListItem> = menu
        .visible_entries()
        .enumerate()
        .map(|(index, entry)| {
            let style = if index == menu.selected_index() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(format!(" {}", entry.label))).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(list, rect);
}
