//! File browser list view

use crate::app::App;
use crate::state::{ControlId, View};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(vec!["Name", "Size", "Actions"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = app.state.files.iter().enumerate().map(|(index, file)| {
        let name = if file.is_dir {
            format!("{}/", file.name)
        } else {
            file.name.clone()
        };
        let size = if file.is_dir {
            String::new()
        } else {
            file.size.map(format_size).unwrap_or_default()
        };

        let control = ControlId {
            view: View::Files,
            row: index,
        };
        let action = if app.feedback.is_copied(control) {
            Span::styled("Copied", Style::default().fg(Color::Green))
        } else {
            Span::styled("… copy", Style::default().fg(Color::DarkGray))
        };

        let style = if index == app.state.selected_file {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default()
        };

        Row::new(vec![
            Cell::from(name),
            Cell::from(size),
            Cell::from(action),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Files ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(table, area);
}

/// Render a byte count in a compact human form
fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
