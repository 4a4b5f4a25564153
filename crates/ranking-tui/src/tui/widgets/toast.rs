// Toast notifications, stacked in the top-right corner of the body.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::protocol::ToastKind;
use crate::tui::layout::toast_area;
use crate::tui::ActiveToast;

/// Render the newest toasts first; those that do not fit are skipped.
pub fn render(frame: &mut Frame, body: Rect, toasts: &[ActiveToast]) {
    for (index, active) in toasts.iter().rev().enumerate() {
        let Some(area) = toast_area(body, index) else {
            break;
        };
        let toast = &active.toast;
        let color = kind_color(toast.kind);

        let mut lines = vec![Line::from(Span::styled(
            toast.message.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))];
        if let Some(detail) = &toast.detail {
            lines.push(Line::from(Span::styled(
                detail.clone(),
                Style::default().fg(Color::Gray),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                format!(" {} ", toast.title()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(Style::default().bg(Color::Black)),
            area,
        );
    }
}

pub fn kind_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
