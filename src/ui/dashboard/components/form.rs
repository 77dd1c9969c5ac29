//! New-ride form and driver prompt, drawn as popups over the body

use super::super::state::{DashboardState, InputMode};
use crate::form::FormField;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

pub fn render_ride_form(f: &mut Frame, area: Rect, state: &DashboardState) {
    let InputMode::Form(focused) = state.input_mode else {
        return;
    };
    let popup = centered_rect(60.min(area.width), 13.min(area.height), area);

    let mut lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|field| {
            let is_focused = *field == focused;
            let label_style = if is_focused {
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let cursor = if is_focused { "▏" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:<14}", field.to_string()), label_style),
                Span::raw(state.form.field(*field).to_string()),
                Span::styled(cursor, Style::default().fg(Color::LightGreen)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(if state.is_submitting() {
        Line::from(Span::styled(
            "Sending...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "Payment: Pix",
            Style::default().fg(Color::DarkGray),
        ))
    });

    let block = Block::default()
        .title("NEW RIDE")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightGreen))
        .padding(Padding::uniform(1));

    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_driver_prompt(f: &mut Frame, area: Rect, state: &DashboardState) {
    if state.input_mode != InputMode::DriverSelect {
        return;
    }
    let popup = centered_rect(50.min(area.width), 5.min(area.height), area);

    let prompt = Paragraph::new(Line::from(vec![
        Span::raw(state.driver_input.clone()),
        Span::styled("▏", Style::default().fg(Color::LightBlue)),
    ]))
    .block(
        Block::default()
            .title("TRACK DRIVER BALANCE")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightBlue))
            .padding(Padding::horizontal(1)),
    );

    f.render_widget(Clear, popup);
    f.render_widget(prompt, popup);
}
