//! Dashboard footer component
//!
//! Renders the key bindings of the current input mode

use super::super::state::{DashboardState, InputMode};
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn key_hints(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Browse => {
            "[Q] Quit | [Tab/1-3] View | [N] New ride | [E] Export | [R] Refresh | [D] Driver | [B] Next driver"
        }
        InputMode::Form(_) => "[Tab/Shift+Tab] Field | [Enter] Submit | [Esc] Close",
        InputMode::DriverSelect => "[Enter] Track driver | [Esc] Cancel",
    }
}

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer = Paragraph::new(key_hints(state.input_mode))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
