// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (selection, form
// editing, overlays, navigation).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::form::ProductForm;
use super::{PendingConfirm, ViewState};
use crate::protocol::{Screen, Toast, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally.
///
/// Overlays take precedence over the screen underneath: quit confirmation,
/// then delete confirmation, then the product form.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Ignore release/repeat events so each physical press counts once.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }
    if view_state.confirm.is_some() {
        return handle_confirm(key_event, view_state);
    }
    if view_state.product_form.is_some() {
        return handle_product_form(key_event, view_state);
    }

    match view_state.screen {
        Screen::Dashboard => handle_dashboard(key_event, view_state),
        Screen::CreateComparison => handle_create_form(key_event, view_state),
        Screen::ComparisonDetail(id) => handle_detail(key_event, view_state, id),
        Screen::RankingResults(id) => handle_ranking(key_event, view_state, id),
    }
}

/// A printable character typed without Ctrl/Alt.
fn typed_char(key_event: &KeyEvent) -> Option<char> {
    match key_event.code {
        KeyCode::Char(c)
            if !key_event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

fn is_ctrl(key_event: &KeyEvent, c: char) -> bool {
    key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char(c)
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

/// y/q confirm, n/Esc cancel, everything else is swallowed.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn handle_confirm(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            view_state.confirm.take().map(|c| c.command())
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm = None;
            None
        }
        _ => None,
    }
}

fn handle_product_form(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let comparison_id = match view_state.screen {
        Screen::ComparisonDetail(id) => id,
        _ => {
            view_state.product_form = None;
            return None;
        }
    };
    let form = view_state.product_form.as_mut()?;

    match key_event.code {
        KeyCode::Esc => {
            view_state.product_form = None;
            None
        }
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_prev();
            None
        }
        KeyCode::Backspace => {
            form.backspace();
            None
        }
        KeyCode::Enter => {
            if view_state.busy {
                return None;
            }
            match form.validate() {
                Ok((fields, attribute_data)) => {
                    // Block resubmission until the orchestrator's Busy(false)
                    view_state.busy = true;
                    Some(UserCommand::SaveProduct {
                        comparison_id,
                        product_id: form.product_id,
                        fields,
                        attribute_data,
                    })
                }
                Err(message) => {
                    view_state.push_toast(Toast::error(message));
                    None
                }
            }
        }
        _ => {
            if let Some(c) = typed_char(&key_event) {
                form.insert_char(c);
            }
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

fn handle_dashboard(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let count = view_state.comparisons.as_ref().map_or(0, Vec::len);

    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.dashboard_selected = view_state.dashboard_selected.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if view_state.dashboard_selected + 1 < count {
                view_state.dashboard_selected += 1;
            }
            None
        }
        KeyCode::Enter => {
            let id = view_state.selected_comparison()?.id;
            view_state.navigate(Screen::ComparisonDetail(id));
            Some(UserCommand::LoadComparison { id })
        }
        KeyCode::Char('n') => {
            view_state.navigate(Screen::CreateComparison);
            None
        }
        KeyCode::Char('d') => {
            let selected = view_state.selected_comparison()?;
            let pending = PendingConfirm::DeleteComparison {
                id: selected.id,
                name: selected.name.clone(),
            };
            view_state.confirm = Some(pending);
            None
        }
        KeyCode::Char('s') => {
            let selected = view_state.selected_comparison()?;
            if !selected.can_rank() {
                return None;
            }
            let id = selected.id;
            open_ranking(view_state, id)
        }
        KeyCode::Char('r') => Some(UserCommand::LoadComparisons),
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => None,
    }
}

fn handle_create_form(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    if is_ctrl(&key_event, 'a') {
        view_state.comparison_form.add_attribute();
        return None;
    }
    if is_ctrl(&key_event, 'd') {
        view_state.comparison_form.remove_attribute();
        return None;
    }

    let form = &mut view_state.comparison_form;
    match key_event.code {
        KeyCode::Esc => {
            view_state.navigate(Screen::Dashboard);
            Some(UserCommand::LoadComparisons)
        }
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_prev();
            None
        }
        KeyCode::Left => {
            form.cycle_type(false);
            None
        }
        KeyCode::Right => {
            form.cycle_type(true);
            None
        }
        KeyCode::Backspace => {
            form.backspace();
            None
        }
        KeyCode::Enter => {
            if view_state.busy {
                return None;
            }
            match form.validate() {
                Ok((comparison, attributes)) => {
                    view_state.busy = true;
                    Some(UserCommand::CreateComparison {
                        comparison,
                        attributes,
                    })
                }
                Err(message) => {
                    view_state.push_toast(Toast::error(message));
                    None
                }
            }
        }
        _ => {
            if let Some(c) = typed_char(&key_event) {
                form.insert_char(c);
            }
            None
        }
    }
}

fn handle_detail(key_event: KeyEvent, view_state: &mut ViewState, id: i64) -> Option<UserCommand> {
    let count = view_state.comparison.as_ref().map_or(0, |c| c.products.len());

    match key_event.code {
        KeyCode::Esc => {
            view_state.navigate(Screen::Dashboard);
            Some(UserCommand::LoadComparisons)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.product_selected = view_state.product_selected.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if view_state.product_selected + 1 < count {
                view_state.product_selected += 1;
            }
            None
        }
        KeyCode::Char('a') => {
            let form = ProductForm::new(&view_state.comparison.as_ref()?.attributes);
            view_state.product_form = Some(form);
            None
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            let attributes = &view_state.comparison.as_ref()?.attributes;
            let form = ProductForm::from_existing(view_state.selected_product()?, attributes);
            view_state.product_form = Some(form);
            None
        }
        KeyCode::Char('d') => {
            let product = view_state.selected_product()?;
            let pending = PendingConfirm::DeleteProduct {
                comparison_id: id,
                product_id: product.id,
                name: product.name.clone(),
            };
            view_state.confirm = Some(pending);
            None
        }
        KeyCode::Char('s') => {
            if !view_state.comparison.as_ref()?.can_rank() {
                return None;
            }
            open_ranking(view_state, id)
        }
        KeyCode::Char('r') => Some(UserCommand::LoadComparison { id }),
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => None,
    }
}

fn handle_ranking(key_event: KeyEvent, view_state: &mut ViewState, id: i64) -> Option<UserCommand> {
    let key_count = view_state.sort_keys().len();

    match key_event.code {
        KeyCode::Esc => {
            view_state.navigate(Screen::ComparisonDetail(id));
            Some(UserCommand::LoadComparison { id })
        }
        KeyCode::Left | KeyCode::Char('h') => {
            view_state.sort_cursor = view_state.sort_cursor.saturating_sub(1);
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if view_state.sort_cursor + 1 < key_count {
                view_state.sort_cursor += 1;
            }
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let key = view_state.sort_keys().into_iter().nth(view_state.sort_cursor)?;
            view_state.sort.select(key.as_deref());
            Some(UserCommand::LoadRanking {
                comparison_id: id,
                sort: view_state.sort.clone(),
            })
        }
        KeyCode::Char('r') => Some(UserCommand::LoadRanking {
            comparison_id: id,
            sort: view_state.sort.clone(),
        }),
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => None,
    }
}

/// Switch to the results screen with the default sort and request them.
fn open_ranking(view_state: &mut ViewState, id: i64) -> Option<UserCommand> {
    view_state.navigate(Screen::RankingResults(id));
    Some(UserCommand::LoadRanking {
        comparison_id: id,
        sort: view_state.sort.clone(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
