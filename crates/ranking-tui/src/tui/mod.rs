// TUI: view state, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding everything the screens draw. The app
// orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders on a fixed tick.

pub mod form;
pub mod input;
pub mod layout;
pub mod widgets;

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ranking_core::config::UiConfig;
use ranking_core::model::{
    Attribute, Comparison, ComparisonSummary, Product, RankingResults, SortState,
};
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::protocol::{ConnectionStatus, Screen, Toast, UiUpdate, UserCommand};

use form::{ComparisonForm, ProductForm};
use layout::build_layout;

// ---------------------------------------------------------------------------
// Pending confirmation
// ---------------------------------------------------------------------------

/// A destructive action waiting for a y/n answer.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingConfirm {
    DeleteComparison {
        id: i64,
        name: String,
    },
    DeleteProduct {
        comparison_id: i64,
        product_id: i64,
        name: String,
    },
}

impl PendingConfirm {
    pub fn title(&self) -> &'static str {
        match self {
            PendingConfirm::DeleteComparison { .. } => "Delete Comparison",
            PendingConfirm::DeleteProduct { .. } => "Delete Product",
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            PendingConfirm::DeleteComparison { name, .. } => {
                format!("Delete comparison \"{name}\" and all its products?")
            }
            PendingConfirm::DeleteProduct { name, .. } => {
                format!("Delete product \"{name}\"?")
            }
        }
    }

    /// The command to send once confirmed.
    pub fn command(&self) -> UserCommand {
        match self {
            PendingConfirm::DeleteComparison { id, .. } => UserCommand::DeleteComparison { id: *id },
            PendingConfirm::DeleteProduct {
                comparison_id,
                product_id,
                ..
            } => UserCommand::DeleteProduct {
                comparison_id: *comparison_id,
                product_id: *product_id,
            },
        }
    }
}

/// A toast on screen, with the moment it disappears.
#[derive(Debug, Clone)]
pub struct ActiveToast {
    pub toast: Toast,
    pub expires_at: Instant,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the data last received from the backend plus selections,
/// forms, and overlays.
pub struct ViewState {
    pub screen: Screen,
    /// Dashboard list; `None` until the first load completes.
    pub comparisons: Option<Vec<ComparisonSummary>>,
    /// Comparison shown on the detail screen.
    pub comparison: Option<Comparison>,
    pub ranking: Option<RankingResults>,
    /// Sort relayed to the results endpoint.
    pub sort: SortState,
    pub dashboard_selected: usize,
    pub product_selected: usize,
    /// Index into the ranking sort bar (0 is "Default Order").
    pub sort_cursor: usize,
    pub comparison_form: ComparisonForm,
    /// Add/edit product overlay.
    pub product_form: Option<ProductForm>,
    pub confirm: Option<PendingConfirm>,
    pub confirm_quit: bool,
    pub toasts: Vec<ActiveToast>,
    pub toast_duration: Duration,
    /// A request is in flight.
    pub busy: bool,
    pub connection_status: ConnectionStatus,
    /// Backend base URL, shown in the status bar.
    pub api_label: String,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            screen: Screen::Dashboard,
            comparisons: None,
            comparison: None,
            ranking: None,
            sort: SortState::default(),
            dashboard_selected: 0,
            product_selected: 0,
            sort_cursor: 0,
            comparison_form: ComparisonForm::default(),
            product_form: None,
            confirm: None,
            confirm_quit: false,
            toasts: Vec::new(),
            toast_duration: Duration::from_secs(4),
            busy: false,
            connection_status: ConnectionStatus::Unknown,
            api_label: String::new(),
        }
    }
}

impl ViewState {
    pub fn new(ui: &UiConfig, api_label: impl Into<String>) -> Self {
        ViewState {
            toast_duration: Duration::from_secs(ui.toast_secs),
            api_label: api_label.into(),
            ..ViewState::default()
        }
    }

    /// Switch screens, dropping overlays and any data that belongs to a
    /// different comparison.
    pub fn navigate(&mut self, screen: Screen) {
        debug!("Navigate {:?} -> {:?}", self.screen, screen);
        self.product_form = None;
        self.confirm = None;
        match screen {
            Screen::Dashboard => {}
            Screen::CreateComparison => {
                self.comparison_form = ComparisonForm::default();
            }
            Screen::ComparisonDetail(id) => {
                if self.comparison.as_ref().map(|c| c.id) != Some(id) {
                    self.comparison = None;
                    self.product_selected = 0;
                }
            }
            Screen::RankingResults(_) => {
                self.ranking = None;
                self.sort = SortState::default();
                self.sort_cursor = 0;
            }
        }
        self.screen = screen;
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(ActiveToast {
            toast,
            expires_at: Instant::now() + self.toast_duration,
        });
    }

    /// Drop toasts whose time is up.
    pub fn prune_toasts(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    pub fn selected_comparison(&self) -> Option<&ComparisonSummary> {
        self.comparisons
            .as_ref()
            .and_then(|list| list.get(self.dashboard_selected))
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.comparison
            .as_ref()
            .and_then(|c| c.products.get(self.product_selected))
    }

    /// Attributes shown on the ranking screen: from the results when loaded,
    /// else from the comparison.
    pub fn ranking_attributes(&self) -> &[Attribute] {
        if let Some(results) = &self.ranking {
            return &results.comparison.attributes;
        }
        match &self.comparison {
            Some(c) => &c.attributes,
            None => &[],
        }
    }

    /// Sort bar entries: `None` for default order, then each attribute name.
    pub fn sort_keys(&self) -> Vec<Option<String>> {
        std::iter::once(None)
            .chain(
                self.ranking_attributes()
                    .iter()
                    .map(|a| Some(a.name.clone())),
            )
            .collect()
    }

    fn clamp_selections(&mut self) {
        let comparisons = self.comparisons.as_ref().map_or(0, Vec::len);
        self.dashboard_selected = self.dashboard_selected.min(comparisons.saturating_sub(1));
        let products = self.comparison.as_ref().map_or(0, |c| c.products.len());
        self.product_selected = self.product_selected.min(products.saturating_sub(1));
        let keys = self.ranking_attributes().len() + 1;
        self.sort_cursor = self.sort_cursor.min(keys - 1);
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::ComparisonsLoaded(list) => {
            state.comparisons = Some(list);
        }
        UiUpdate::ComparisonRemoved(id) => {
            if let Some(list) = state.comparisons.as_mut() {
                list.retain(|c| c.id != id);
            }
        }
        UiUpdate::ComparisonLoaded(comparison) => {
            state.comparison = Some(*comparison);
        }
        UiUpdate::RankingLoaded(results) => {
            state.ranking = Some(*results);
        }
        UiUpdate::ProductSaved => {
            state.product_form = None;
        }
        UiUpdate::Navigate(screen) => {
            state.navigate(screen);
        }
        UiUpdate::Toast(toast) => {
            state.push_toast(toast);
        }
        UiUpdate::Busy(busy) => {
            state.busy = busy;
        }
        UiUpdate::ConnectionStatus(status) => {
            state.connection_status = status;
        }
    }
    state.clamp_selections();
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame: bars, the current screen, then overlays.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);

    match state.screen {
        Screen::Dashboard => widgets::dashboard::render(frame, layout.body, state),
        Screen::CreateComparison => widgets::comparison_form::render(frame, layout.body, state),
        Screen::ComparisonDetail(_) => {
            widgets::comparison_detail::render(frame, layout.body, state)
        }
        Screen::RankingResults(_) => widgets::ranking::render(frame, layout.body, state),
    }

    widgets::help_bar::render(frame, layout.help_bar, state);

    if let Some(form) = &state.product_form {
        widgets::product_form::render(frame, layout.body, form);
    }
    if let Some(confirm) = &state.confirm {
        widgets::confirm::render(frame, layout.body, confirm.title(), &confirm.prompt());
    }
    if state.confirm_quit {
        widgets::confirm::render(frame, frame.area(), "Quit?", "Really quit?");
    }

    widgets::toast::render(frame, layout.body, &state.toasts);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Requests the comparison list for the dashboard.
/// 4. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 5. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_config: UiConfig,
    api_label: String,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Restore the terminal before the default panic output.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(&ui_config, api_label);

    // 3. Initial load
    let _ = cmd_tx.send(UserCommand::LoadComparisons).await;

    let mut event_stream = EventStream::new();
    let mut render_tick = tokio::time::interval(Duration::from_millis(ui_config.tick_ms));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 4. Main loop
    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI loop");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events: the next tick redraws
                    }
                    Some(Err(e)) => {
                        break Err(anyhow::Error::new(e).context("terminal input error"));
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                view_state.prune_toasts(Instant::now());
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    // 5. Restore terminal
    ratatui::restore();

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
