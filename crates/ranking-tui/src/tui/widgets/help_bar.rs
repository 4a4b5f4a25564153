// Help bar widget: key hints for whatever currently has input focus.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::Screen;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hint_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Hints for the topmost input target: an overlay if one is open, else
/// the screen.
pub fn hint_text(state: &ViewState) -> &'static str {
    if state.confirm_quit || state.confirm.is_some() {
        return " y:Confirm | n/Esc:Cancel";
    }
    if state.product_form.is_some() {
        return " Tab/↑↓:Field | Enter:Save | Esc:Cancel";
    }
    match state.screen {
        Screen::Dashboard => {
            " ↑↓:Select | Enter:Open | n:New | d:Delete | s:Results | r:Reload | q:Quit"
        }
        Screen::CreateComparison => {
            " Tab/↑↓:Field | ←→/Space:Type | Ctrl+A:Add attr | Ctrl+D:Remove attr | Enter:Create | Esc:Cancel"
        }
        Screen::ComparisonDetail(_) => {
            " ↑↓:Select | a:Add | e/Enter:Edit | d:Delete | s:Results | r:Reload | Esc:Back | q:Quit"
        }
        Screen::RankingResults(_) => {
            " ←→:Sort key | Enter/Space:Sort | r:Reload | Esc:Back | q:Quit"
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::form::ProductForm;

    #[test]
    fn overlays_override_screen_hints() {
        let mut state = ViewState::default();
        assert!(hint_text(&state).contains("n:New"));

        state.product_form = Some(ProductForm::new(&[]));
        assert!(hint_text(&state).contains("Enter:Save"));

        state.confirm_quit = true;
        assert!(hint_text(&state).contains("y:Confirm"));
    }

    #[test]
    fn each_screen_has_hints() {
        let mut state = ViewState::default();
        for screen in [
            Screen::CreateComparison,
            Screen::ComparisonDetail(1),
            Screen::RankingResults(1),
        ] {
            state.screen = screen;
            assert!(hint_text(&state).contains("Esc"), "{:?}", screen);
        }
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(40, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
