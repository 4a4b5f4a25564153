// Create-comparison form widget.
//
// Name and description inputs followed by one line per attribute row:
// name, type selector, unit. The focused field is highlighted and shows a
// cursor.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::form::{ComparisonField, ComparisonForm};
use crate::tui::ViewState;

const CURSOR: &str = "▏";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let form = &state.comparison_form;
    let focused = form.focused_field();

    let mut lines = vec![
        Line::from(""),
        field_line(
            "Comparison Name *",
            &form.name,
            "e.g. Laptops 2025",
            focused == ComparisonField::Name,
        ),
        field_line(
            "Description",
            &form.description,
            "optional",
            focused == ComparisonField::Description,
        ),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Attributes ({})", form.attributes.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    for (i, row) in form.attributes.iter().enumerate() {
        let mut spans = vec![Span::raw(format!("  {:>2}. ", i + 1))];
        spans.extend(input_spans(
            &row.name,
            "Attribute name",
            focused == ComparisonField::AttrName(i),
        ));
        spans.push(Span::raw("   Type: "));
        spans.push(type_span(
            row.data_type.label(),
            focused == ComparisonField::AttrType(i),
        ));
        spans.push(Span::raw("   Unit: "));
        spans.extend(input_spans(
            &row.unit,
            "optional",
            focused == ComparisonField::AttrUnit(i),
        ));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        submit_hint(form, state.busy),
        Style::default().fg(Color::Gray),
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("New Comparison"),
        );
    frame.render_widget(paragraph, area);
}

/// `  Label: value` line for a top-level text input.
pub(crate) fn field_line(
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("  {label}: "),
        label_style(focused),
    )];
    spans.extend(input_spans(value, placeholder, focused));
    Line::from(spans)
}

/// A text input: its value (or a dim placeholder) plus a cursor when focused.
pub(crate) fn input_spans(value: &str, placeholder: &str, focused: bool) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(2);
    if value.is_empty() {
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        let style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(value.to_string(), style));
    }
    if focused {
        spans.push(Span::styled(CURSOR, Style::default().fg(Color::Yellow)));
    }
    spans
}

fn type_span(label: &str, focused: bool) -> Span<'static> {
    if focused {
        Span::styled(
            format!("< {label} >"),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!("  {label}  "), Style::default().fg(Color::Cyan))
    }
}

pub(crate) fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn submit_hint(form: &ComparisonForm, busy: bool) -> String {
    if busy {
        return "  Creating...".to_string();
    }
    let remove = if form.attributes.len() > 1 {
        " | Ctrl+D remove attribute"
    } else {
        ""
    };
    format!("  Enter create comparison | Ctrl+A add attribute{remove}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
