//! Dashboard info panel component
//!
//! Renders connection details and the tracked driver's balance

use crate::environment::Environment;
use crate::pretty::format_brl;

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn format_uptime(secs: u64) -> String {
    if secs >= 86400 {
        format!(
            "{}d {}h {}m",
            secs / 86400,
            (secs % 86400) / 3600,
            (secs % 3600) / 60
        )
    } else if secs >= 3600 {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn labeled<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let env_color = match state.environment {
        Environment::Local => Color::Green,
        Environment::Custom { .. } => Color::Yellow,
    };

    let mut info_lines = vec![
        labeled("API: ", state.environment.api_url(), env_color),
        labeled(
            "Uptime: ",
            format_uptime(state.start_time.elapsed().as_secs()),
            Color::LightGreen,
        ),
        labeled(
            "Refresh: ",
            format!("every {} ms", state.poll_interval_ms),
            Color::Cyan,
        ),
        labeled(
            "Updated: ",
            state
                .last_refresh
                .clone()
                .unwrap_or_else(|| "Never".to_string()),
            Color::Yellow,
        ),
        Line::from(""),
    ];

    match &state.balance_driver {
        Some(driver) => {
            info_lines.push(labeled("Driver: ", driver.clone(), Color::LightBlue));
            let (balance_text, balance_color) = match &state.balance {
                Some(balance) => (format_brl(balance.amount()), Color::LightGreen),
                None => ("Loading...".to_string(), Color::DarkGray),
            };
            info_lines.push(Line::from(vec![
                Span::styled("Balance: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    balance_text,
                    Style::default()
                        .fg(balance_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        None => info_lines.push(Line::from(Span::styled(
            "No driver tracked, press [D]",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let info_block = Block::default()
        .title("CONNECTION")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(75), "1m 15s");
        assert_eq!(format_uptime(3725), "1h 2m 5s");
        assert_eq!(format_uptime(90061), "1d 1h 1m");
    }
}
