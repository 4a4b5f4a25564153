// Confirmation overlay widget.
//
// Renders a centered modal asking a yes/no question. Used for quitting and
// for deleting comparisons and products.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::layout::centered_rect;

const MIN_WIDTH: u16 = 28;
const MAX_WIDTH: u16 = 60;
const DIALOG_HEIGHT: u16 = 6;

/// Render the dialog centered on `area`.
pub fn render(frame: &mut Frame, area: Rect, title: &str, prompt: &str) {
    let dialog_area = centered_rect(dialog_width(prompt), DIALOG_HEIGHT, area);

    // Clear the area behind the dialog so it renders cleanly on top
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(format!(" {prompt}")),
        Line::from(""),
        Line::from(vec![
            Span::raw(" ("),
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("/"),
            Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(")"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(Color::Black));

    frame.render_widget(paragraph, dialog_area);
}

/// Width that fits the prompt on one line, within bounds.
fn dialog_width(prompt: &str) -> u16 {
    let wanted = prompt.chars().count() as u16 + 4;
    wanted.clamp(MIN_WIDTH, MAX_WIDTH)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
