// Add/edit product overlay.
//
// Centered modal over the comparison detail: name, description, then one
// input per attribute with a type-specific placeholder.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::comparison_form::{field_line, input_spans, label_style};
use crate::tui::form::{ProductField, ProductForm};
use crate::tui::layout::centered_rect;

const DIALOG_WIDTH: u16 = 64;

/// Rows besides the attribute inputs: borders, spacing, name, description,
/// section header and the hint line.
const FIXED_ROWS: u16 = 9;

pub fn render(frame: &mut Frame, area: Rect, form: &ProductForm) {
    let height = FIXED_ROWS + form.values.len() as u16;
    let dialog_area = centered_rect(DIALOG_WIDTH, height, area);

    frame.render_widget(Clear, dialog_area);

    let focused = form.focused_field();
    let mut lines = vec![
        Line::from(""),
        field_line("Product Name *", &form.name, "required", focused == ProductField::Name),
        field_line(
            "Description",
            &form.description,
            "optional",
            focused == ProductField::Description,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "  Attribute Values",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    if form.values.is_empty() {
        lines.push(Line::from(Span::styled(
            "  This comparison has no attributes",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, field) in form.values.iter().enumerate() {
        let is_focused = focused == ProductField::Value(i);
        let mut spans = vec![Span::styled(
            format!("  {}: ", field.attribute.label()),
            label_style(is_focused),
        )];
        spans.extend(input_spans(
            &field.value,
            field.attribute.data_type.placeholder(),
            is_focused,
        ));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  Enter {} | Esc cancel", save_label(form)),
        Style::default().fg(Color::Gray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", form.title()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

fn save_label(form: &ProductForm) -> &'static str {
    if form.is_edit() {
        "update product"
    } else {
        "add product"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
