//! Report view: status breakdown and top driver

use super::super::state::DashboardState;
use crate::pretty::format_brl;
use crate::stats::{dashboard_totals, group_by_driver, top_driver_by_fare};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph, Wrap};

/// Share of processed rides, 0-100.
fn processed_percent(processed: usize, total: usize) -> u16 {
    if total == 0 {
        return 0;
    }
    ((processed as f64 / total as f64) * 100.0).round() as u16
}

pub fn render_report(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let totals = dashboard_totals(&state.rides);
    let groups = group_by_driver(&state.rides);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1)])
        .split(area);

    let percent = processed_percent(totals.processed_count, totals.total_count);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title("Processed")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green)),
        )
        .gauge_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .percent(percent)
        .label(format!(
            "{}% ({} of {})",
            percent, totals.processed_count, totals.total_count
        ));
    f.render_widget(gauge, chunks[0]);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Revenue: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_brl(totals.total_fare),
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Average fare: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_brl(totals.average_fare),
                Style::default().fg(Color::LightBlue),
            ),
        ]),
        Line::from(vec![
            Span::styled("Drivers: ", Style::default().fg(Color::Gray)),
            Span::raw(groups.len().to_string()),
        ]),
    ];

    if let Some(top) = top_driver_by_fare(&groups) {
        lines.push(Line::from(vec![
            Span::styled("Top driver: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!(
                    "{} ({} rides, {})",
                    top.driver_name,
                    top.ride_count,
                    format_brl(top.total_fare)
                ),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }

    let block = Block::default()
        .title("REPORT")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processed_percent() {
        assert_eq!(processed_percent(0, 0), 0);
        assert_eq!(processed_percent(1, 2), 50);
        assert_eq!(processed_percent(2, 3), 67);
        assert_eq!(processed_percent(4, 4), 100);
    }
}
