//! Toast notification in the top-right corner

use super::super::state::{DashboardState, ToastKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

fn toast_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Info => Color::LightBlue,
        ToastKind::Success => Color::LightGreen,
        ToastKind::Warning => Color::Yellow,
        ToastKind::Error => Color::LightRed,
    }
}

fn toast_area(area: Rect, message_len: usize) -> Rect {
    let width = ((message_len as u16).saturating_add(4))
        .clamp(20, 60)
        .min(area.width);
    let height = 3.min(area.height);
    Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + 1.min(area.height),
        width,
        height,
    )
}

pub fn render_toast(f: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(toast) = &state.toast else {
        return;
    };
    let color = toast_color(toast.kind);
    let popup = toast_area(area, toast.message.chars().count());

    let widget = Paragraph::new(toast.message.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );

    f.render_widget(Clear, popup);
    f.render_widget(widget, popup);
}
