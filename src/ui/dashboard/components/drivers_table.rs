//! Per-driver totals table

use super::super::state::DashboardState;
use super::super::utils::driver_rows;
use crate::stats::group_by_driver;
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};

pub fn render_drivers_table(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let groups = group_by_driver(&state.rides);

    let block = Block::default()
        .title(format!("DRIVERS ({})", groups.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if groups.is_empty() {
        f.render_widget(
            Paragraph::new("No drivers yet")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let selected = state.balance_driver.as_deref();
    let rows: Vec<Row> = driver_rows(&groups)
        .into_iter()
        .map(|row| {
            let style = if selected == Some(row.driver.as_str()) {
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(row.driver),
                Cell::from(row.rides),
                Cell::from(row.total),
                Cell::from(row.average),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["Driver", "Rides", "Total", "Average"]).style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Fill(2),
            Constraint::Length(8),
            Constraint::Length(16),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(block);

    f.render_widget(table, area);
}
