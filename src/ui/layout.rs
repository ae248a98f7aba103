//! Layout components (tab bar, status bar)

use crate::app::App;
use crate::state::{View, TAB_BAR_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split the screen into tab bar, main content, and status bar.
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TAB_BAR_HEIGHT), // Tab bar
            Constraint::Min(0),                 // Main content
            Constraint::Length(1),              // Status bar
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Draw the tab bar at the top of the screen
pub fn draw_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];
    for (index, view) in [View::Certificates, View::Files].into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  |  ", Style::default().fg(Color::DarkGray)));
        }
        let label = format!("[{}] {}", index + 1, view.title());
        let style = if app.state.current_view == view {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
    }

    let tabs = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" certkit ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(tabs, area);
}

/// Draw the status bar at the bottom of the screen
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Connection status
    let conn_status = if app.state.server_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    // Key hints depend on whether the menu is up
    let hints = if app.active_menu().is_open() {
        "↑↓:select Enter:run Esc:close"
    } else {
        "Tab:switch ↑↓:rows .:actions c:copy path r:refresh q:quit"
    };
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    // Announcer region: the most recent effect feedback
    if let Some(message) = app.announcer.current() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(message, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
