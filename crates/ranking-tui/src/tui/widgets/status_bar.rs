// Status bar widget: app title, current screen, backend endpoint and
// connection state.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::{ConnectionStatus, Screen};
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [connection indicator] [title] | [screen] | [api url] [busy]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (dot, dot_color) = connection_indicator(state.connection_status);

    let mut spans = vec![
        Span::styled(format!(" {} ", dot), Style::default().fg(dot_color)),
        Span::styled(
            "Product Ranking",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(screen_label(state), Style::default().fg(Color::Cyan)),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(state.api_label.clone(), Style::default().fg(Color::Gray)),
    ];

    if state.busy {
        spans.push(Span::styled(
            "  Loading...",
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the connection dot character and its color.
pub fn connection_indicator(status: ConnectionStatus) -> (&'static str, Color) {
    match status {
        ConnectionStatus::Connected => ("●", Color::Green),
        ConnectionStatus::Unreachable => ("●", Color::Red),
        ConnectionStatus::Unknown => ("○", Color::Gray),
    }
}

/// Screen name, with the comparison name once it is loaded.
pub fn screen_label(state: &ViewState) -> String {
    let comparison_name = |id: i64| {
        state
            .comparison
            .as_ref()
            .filter(|c| c.id == id)
            .map(|c| c.name.clone())
    };
    match state.screen {
        Screen::Dashboard => "Comparisons".to_string(),
        Screen::CreateComparison => "New Comparison".to_string(),
        Screen::ComparisonDetail(id) => comparison_name(id).unwrap_or_else(|| "Comparison".into()),
        Screen::RankingResults(id) => match comparison_name(id) {
            Some(name) => format!("{name}: Ranking"),
            None => "Ranking".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
