//! Dashboard main renderer

use super::components::{
    drivers_table, footer, form, header, info_panel, logs, report, rides_table, summary, toast,
};
use super::state::{DashboardState, View};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    summary::render_summary(f, main_chunks[1], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(main_chunks[2]);

    match state.view {
        View::Rides => rides_table::render_rides_table(f, content_chunks[0], state),
        View::Drivers => drivers_table::render_drivers_table(f, content_chunks[0], state),
        View::Report => report::render_report(f, content_chunks[0], state),
    }
    info_panel::render_info_panel(f, content_chunks[1], state);
    logs::render_logs_panel(f, main_chunks[3], state);
    footer::render_footer(f, main_chunks[4], state);

    form::render_ride_form(f, f.area(), state);
    form::render_driver_prompt(f, f.area(), state);
    toast::render_toast(f, f.area(), state);
}
