// Ranking results widget: sort bar above the ranked products table.
//
// The sort bar lists "Default Order" then one button per attribute. The
// active sort shows its direction arrow; the cursor button is highlighted.
// Table columns: #rank, Product, then `value unit` per attribute.

use ranking_core::model::{Attribute, RankingEntry, SortOrder, SortState};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::tui::ViewState;

const SORT_BAR_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(SORT_BAR_HEIGHT), Constraint::Min(3)])
        .split(area);

    render_sort_bar(frame, sections[0], state);

    let Some(results) = &state.ranking else {
        let paragraph = Paragraph::new("  Loading ranking results...")
            .block(Block::default().borders(Borders::ALL).title("Ranking"));
        frame.render_widget(paragraph, sections[1]);
        return;
    };

    let title = format!(
        "Ranking: {} ({})",
        results.comparison.name,
        sort_description(&state.sort)
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if results.results.is_empty() {
        let paragraph = Paragraph::new("  No products to rank.").block(block);
        frame.render_widget(paragraph, sections[1]);
        return;
    }

    let attributes = &results.comparison.attributes;

    let mut header_cells = vec![Cell::from("#"), Cell::from("Product")];
    header_cells.extend(attributes.iter().map(|a| Cell::from(a.label())));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = results
        .results
        .iter()
        .map(|entry| ranking_row(entry, attributes))
        .collect();

    let mut widths = vec![Constraint::Length(5), Constraint::Min(18)];
    widths.extend(attributes.iter().map(|_| Constraint::Min(12)));

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, sections[1]);
}

fn render_sort_bar(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(" Sort by: ", Style::default().fg(Color::Gray))];

    for (i, key) in state.sort_keys().iter().enumerate() {
        let label = sort_button_label(&state.sort, key.as_deref());
        let active = state.sort.is_active(key.as_deref());
        let mut style = if active {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        if i == state.sort_cursor {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!("[{label}]"), style));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Button text: the attribute name (or "Default Order"), with the direction
/// arrow when it is the active sort.
pub fn sort_button_label(sort: &SortState, key: Option<&str>) -> String {
    let name = key.unwrap_or("Default Order");
    if sort.is_active(key) {
        format!("{} {}", name, sort.order.arrow())
    } else {
        name.to_string()
    }
}

/// "default order", or "Price, descending".
pub fn sort_description(sort: &SortState) -> String {
    match &sort.sort_by {
        None => "default order".to_string(),
        Some(key) => {
            let direction = match sort.order {
                SortOrder::Asc => "ascending",
                SortOrder::Desc => "descending",
            };
            format!("{key}, {direction}")
        }
    }
}

fn ranking_row(entry: &RankingEntry, attributes: &[Attribute]) -> Row<'static> {
    let rank_style = if entry.rank == 1 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut cells = vec![
        Cell::from(format!("#{}", entry.rank)).style(rank_style),
        Cell::from(entry.product_name.clone()),
    ];
    cells.extend(attributes.iter().map(|attribute| {
        let value = entry.display_value(&attribute.name);
        if value.is_empty() {
            Cell::from("-").style(Style::default().fg(Color::DarkGray))
        } else {
            Cell::from(value)
        }
    }));
    Row::new(cells)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
