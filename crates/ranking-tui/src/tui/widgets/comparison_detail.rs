// Comparison detail widget: summary panel above a products table.
//
// +- Laptops ---------------------------------------+
// | Work machines                                    |
// | Created Jul 1, 2025 | 3 products | 2 attributes |
// | Attributes: Price (USD) number, Brand text       |
// +- Products --------------------------------------+
// | Name        Price (USD)   Brand                  |
// +--------------------------------------------------+

use ranking_core::model::{format_created_date, Attribute, Comparison, Product};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::tui::ViewState;

/// Height of the summary panel including borders.
const SUMMARY_HEIGHT: u16 = 6;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(comparison) = &state.comparison else {
        let paragraph = Paragraph::new("  Loading comparison...")
            .block(Block::default().borders(Borders::ALL).title("Comparison"));
        frame.render_widget(paragraph, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(SUMMARY_HEIGHT), Constraint::Min(3)])
        .split(area);

    render_summary(frame, sections[0], comparison);
    render_products(frame, sections[1], comparison, state.product_selected);
}

fn render_summary(frame: &mut Frame, area: Rect, comparison: &Comparison) {
    let description = comparison
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("No description");

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {description}"),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!(
                " Created {} | {} products | {} attributes",
                format_created_date(&comparison.created_at),
                comparison.products.len(),
                comparison.attributes.len()
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled(" Attributes: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(attribute_summary(&comparison.attributes)),
        ]),
    ];

    if comparison.can_rank() {
        lines.push(Line::from(Span::styled(
            " Press s to see ranking results",
            Style::default().fg(Color::Green),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!(" {} ", comparison.name),
                Style::default().add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(paragraph, area);
}

fn render_products(frame: &mut Frame, area: Rect, comparison: &Comparison, selected: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Products ({})", comparison.products.len()));

    if comparison.products.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from("  No products yet."),
            Line::from("  Press a to add your first product."),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let mut header_cells = vec![Cell::from("Name")];
    header_cells.extend(
        comparison
            .attributes
            .iter()
            .map(|a| Cell::from(a.label())),
    );
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = comparison
        .products
        .iter()
        .map(|p| Row::new(product_cells(p, &comparison.attributes)))
        .collect();

    let mut widths = vec![Constraint::Min(18)];
    widths.extend(comparison.attributes.iter().map(|_| Constraint::Min(12)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    let mut table_state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Product name followed by its value for each attribute (`-` when unset).
pub fn product_cells(product: &Product, attributes: &[Attribute]) -> Vec<Cell<'static>> {
    let mut cells = vec![Cell::from(product.name.clone())];
    cells.extend(attributes.iter().map(|attribute| {
        match product.value_for(attribute.id) {
            Some(value) => Cell::from(value.display()),
            None => Cell::from("-").style(Style::default().fg(Color::DarkGray)),
        }
    }));
    cells
}

/// `Price (USD) number, Brand text`
pub fn attribute_summary(attributes: &[Attribute]) -> String {
    if attributes.is_empty() {
        return "none".to_string();
    }
    attributes
        .iter()
        .map(|a| format!("{} {}", a.label(), a.data_type))
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
