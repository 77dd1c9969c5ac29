//! Dashboard summary cards
//!
//! Headline totals of the current listing

use super::super::state::DashboardState;
use crate::pretty::format_brl;
use crate::stats::dashboard_totals;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn card(title: &str, value: String, color: Color) -> Paragraph<'_> {
    Paragraph::new(value)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
}

pub fn render_summary(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    // Recomputed every frame from the current listing.
    let totals = dashboard_totals(&state.rides);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    f.render_widget(
        card("Rides", totals.total_count.to_string(), Color::White),
        chunks[0],
    );
    f.render_widget(
        card("Total", format_brl(totals.total_fare), Color::LightGreen),
        chunks[1],
    );
    f.render_widget(
        card("Average", format_brl(totals.average_fare), Color::LightBlue),
        chunks[2],
    );
    f.render_widget(
        card(
            "Pending / Processed",
            format!("⏳ {}  ✅ {}", totals.pending_count, totals.processed_count),
            Color::Yellow,
        ),
        chunks[3],
    );
}
