//! Rides table, newest first

use super::super::state::DashboardState;
use super::super::utils::{ride_rows, status_style};
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};

pub fn render_rides_table(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .title(format!("RIDES ({})", state.rides.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if state.rides.is_empty() {
        let placeholder = if state.rides_cycle.is_some() {
            "No rides yet"
        } else {
            "Loading rides..."
        };
        f.render_widget(
            Paragraph::new(placeholder)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let rows: Vec<Row> = ride_rows(&state.rides)
        .into_iter()
        .map(|row| {
            let (icon, color) = status_style(row.status);
            Row::new(vec![
                Cell::from(row.id),
                Cell::from(Line::from(vec![
                    Span::raw(format!("{} ", icon)),
                    Span::styled(row.status.to_string(), Style::default().fg(color)),
                ])),
                Cell::from(row.passenger),
                Cell::from(row.driver),
                Cell::from(row.route),
                Cell::from(row.fare).style(Style::default().fg(Color::LightGreen)),
                Cell::from(row.payment_method),
            ])
        })
        .collect();

    let header = Row::new(vec![
        "ID",
        "Status",
        "Passenger",
        "Driver",
        "Route",
        "Fare",
        "Payment",
    ])
    .style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(2),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(block);

    f.render_widget(table, area);
}
