// Dashboard widget: table of all comparisons.
//
// Columns: Name, Description, Products, Attributes, Created.
// The selected row is highlighted; an empty or loading list shows a hint.

use ranking_core::model::{format_created_date, ComparisonSummary};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the comparisons table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title(state.comparisons.as_deref()));

    let comparisons = match &state.comparisons {
        None => {
            let paragraph = Paragraph::new("  Loading comparisons...").block(block);
            frame.render_widget(paragraph, area);
            return;
        }
        Some(list) if list.is_empty() => {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from("  No comparisons yet."),
                Line::from("  Press n to create your first comparison."),
            ])
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
        Some(list) => list,
    };

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Description"),
        Cell::from("Products"),
        Cell::from("Attributes"),
        Cell::from("Created"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = comparisons.iter().map(comparison_row).collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Min(20),
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Length(13),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    let mut table_state = TableState::default().with_selected(Some(state.dashboard_selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn comparison_row(comparison: &ComparisonSummary) -> Row<'static> {
    // Comparisons with fewer than two products cannot be ranked yet
    let products_style = if comparison.can_rank() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };

    Row::new(vec![
        Cell::from(comparison.name.clone()),
        Cell::from(comparison.description.clone().unwrap_or_default()),
        Cell::from(comparison.product_count.to_string()).style(products_style),
        Cell::from(comparison.attribute_count.to_string()),
        Cell::from(format_created_date(&comparison.created_at)),
    ])
}

fn title(comparisons: Option<&[ComparisonSummary]>) -> String {
    match comparisons {
        Some(list) => format!("Comparisons ({})", list.len()),
        None => "Comparisons".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
