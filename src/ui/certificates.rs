//! Certificate list view

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
    let header = Row::new(vec!["Name", "Subject", "Expires", "Actions"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = app.state.certificates.iter().enumerate().map(|(index, cert)| {
        let expires = cert
            .not_after
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());

        let control = ControlId {
            view: View::Certificates,
            row: index,
        };
        let action = if app.feedback.is_copied(control) {
            Span::styled("Copied", Style::default().fg(Color::Green))
        } else {
            Span::styled("… copy", Style::default().fg(Color::DarkGray))
        };

        let style = if index == app.state.selected_certificate {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default()
        };

        Row::new(vec![
            Cell::from(cert.name.clone()),
            Cell::from(cert.subject.clone()),
            Cell::from(expires),
            Cell::from(action),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(45),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Certificates ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(table, area);
}
