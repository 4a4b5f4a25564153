// Application orchestration: turns user commands into API calls.
//
// The event loop receives `UserCommand`s from the TUI, performs the matching
// backend calls through the `RankingApi` seam, and pushes the results,
// navigation and toast notifications back to the TUI as `UiUpdate`s.
// Commands are handled one at a time, in the order they were issued.

use std::sync::Arc;

use ranking_core::error::ApiError;
use ranking_core::model::{
    AttributeValueInput, NewAttribute, NewComparison, NewProduct, Product, ProductUpdate,
    SortState,
};
use ranking_core::RankingApi;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::protocol::{ConnectionStatus, Screen, Toast, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Orchestrator state: the API handle and what we last learned about the
/// backend's reachability.
pub struct AppState {
    pub api: Arc<dyn RankingApi>,
    pub connection_status: ConnectionStatus,
}

impl AppState {
    pub fn new(api: Arc<dyn RankingApi>) -> Self {
        AppState {
            api,
            connection_status: ConnectionStatus::Unknown,
        }
    }

    /// Update the connection status from a call's outcome. Returns the new
    /// status when it changed.
    ///
    /// Any answer from the server, including an error status, counts as
    /// connected; only transport failures mark it unreachable.
    pub fn observe<T>(&mut self, result: &Result<T, ApiError>) -> Option<ConnectionStatus> {
        let status = match result {
            Err(e) if e.is_unreachable() => ConnectionStatus::Unreachable,
            _ => ConnectionStatus::Connected,
        };
        if status == self.connection_status {
            return None;
        }
        info!("Backend connection status: {:?} -> {:?}", self.connection_status, status);
        self.connection_status = status;
        Some(status)
    }

    /// `observe` and forward any change to the TUI.
    async fn track<T>(&mut self, result: &Result<T, ApiError>, ui_tx: &mpsc::Sender<UiUpdate>) {
        if let Some(status) = self.observe(result) {
            let _ = ui_tx.send(UiUpdate::ConnectionStatus(status)).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the application event loop until `Quit` arrives or the command
/// channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => {
                handle_user_command(&mut state, cmd, &ui_tx).await;
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Handle one user command, bracketing it with `Busy` updates.
pub async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let _ = ui_tx.send(UiUpdate::Busy(true)).await;

    match cmd {
        UserCommand::LoadComparisons => load_comparisons(state, ui_tx).await,
        UserCommand::DeleteComparison { id } => delete_comparison(state, id, ui_tx).await,
        UserCommand::CreateComparison {
            comparison,
            attributes,
        } => create_comparison(state, comparison, attributes, ui_tx).await,
        UserCommand::LoadComparison { id } => load_comparison(state, id, ui_tx).await,
        UserCommand::SaveProduct {
            comparison_id,
            product_id,
            fields,
            attribute_data,
        } => {
            save_product(state, comparison_id, product_id, fields, attribute_data, ui_tx).await
        }
        UserCommand::DeleteProduct {
            comparison_id,
            product_id,
        } => delete_product(state, comparison_id, product_id, ui_tx).await,
        UserCommand::LoadRanking {
            comparison_id,
            sort,
        } => load_ranking(state, comparison_id, sort, ui_tx).await,
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }

    let _ = ui_tx.send(UiUpdate::Busy(false)).await;
}

/// Log a failed operation and show an error toast carrying the cause.
async fn report_failure(ui_tx: &mpsc::Sender<UiUpdate>, message: &str, err: &ApiError) {
    warn!("{}: {}", message, err);
    let _ = ui_tx
        .send(UiUpdate::Toast(Toast::error(message).with_detail(err.to_string())))
        .await;
}

// ---------------------------------------------------------------------------
// Comparisons
// ---------------------------------------------------------------------------

async fn load_comparisons(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let result = state.api.list_comparisons().await;
    state.track(&result, ui_tx).await;

    match result {
        Ok(list) => {
            info!("Loaded {} comparisons", list.len());
            let _ = ui_tx.send(UiUpdate::ComparisonsLoaded(list)).await;
        }
        Err(e) => report_failure(ui_tx, "Failed to load comparisons", &e).await,
    }
}

async fn delete_comparison(state: &mut AppState, id: i64, ui_tx: &mpsc::Sender<UiUpdate>) {
    let result = state.api.delete_comparison(id).await;
    state.track(&result, ui_tx).await;

    match result {
        Ok(()) => {
            info!("Deleted comparison {}", id);
            let _ = ui_tx.send(UiUpdate::ComparisonRemoved(id)).await;
            let _ = ui_tx
                .send(UiUpdate::Toast(Toast::success("Comparison deleted successfully")))
                .await;
        }
        Err(e) => report_failure(ui_tx, "Failed to delete comparison", &e).await,
    }
}

/// Create the comparison, then its attributes one by one. Stops at the
/// first failure; attributes created before it are kept by the backend.
async fn create_comparison(
    state: &mut AppState,
    comparison: NewComparison,
    attributes: Vec<NewAttribute>,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let created = state.api.create_comparison(&comparison).await;
    state.track(&created, ui_tx).await;
    let created = match created {
        Ok(c) => c,
        Err(e) => {
            report_failure(ui_tx, "Failed to create comparison", &e).await;
            return;
        }
    };

    for attribute in &attributes {
        let result = state.api.create_attribute(created.id, attribute).await;
        state.track(&result, ui_tx).await;
        if let Err(e) = result {
            report_failure(ui_tx, "Failed to create comparison", &e).await;
            return;
        }
    }

    info!(
        "Created comparison {} ({}) with {} attributes",
        created.id,
        created.name,
        attributes.len()
    );
    let _ = ui_tx
        .send(UiUpdate::Toast(Toast::success("Comparison created successfully")))
        .await;
    let _ = ui_tx
        .send(UiUpdate::Navigate(Screen::ComparisonDetail(created.id)))
        .await;
    load_comparison(state, created.id, ui_tx).await;
}

/// Load one comparison. On failure, fall back to the dashboard.
async fn load_comparison(state: &mut AppState, id: i64, ui_tx: &mpsc::Sender<UiUpdate>) {
    let result = state.api.get_comparison(id).await;
    state.track(&result, ui_tx).await;

    match result {
        Ok(comparison) => {
            let _ = ui_tx
                .send(UiUpdate::ComparisonLoaded(Box::new(comparison)))
                .await;
        }
        Err(e) => {
            report_failure(ui_tx, "Failed to load comparison", &e).await;
            let _ = ui_tx.send(UiUpdate::Navigate(Screen::Dashboard)).await;
            load_comparisons(state, ui_tx).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

async fn save_product(
    state: &mut AppState,
    comparison_id: i64,
    product_id: Option<i64>,
    fields: ProductUpdate,
    attribute_data: Vec<AttributeValueInput>,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let verb = if product_id.is_some() { "update" } else { "create" };

    let result = match product_id {
        Some(product_id) => {
            update_product(state, comparison_id, product_id, fields, &attribute_data, ui_tx).await
        }
        None => {
            let body = NewProduct {
                name: fields.name,
                description: fields.description,
                attribute_data,
            };
            let result = state.api.create_product(comparison_id, &body).await;
            state.track(&result, ui_tx).await;
            result
        }
    };

    match result {
        Ok(product) => {
            info!("Product {} {}d in comparison {}", product.id, verb, comparison_id);
            let _ = ui_tx
                .send(UiUpdate::Toast(Toast::success(format!(
                    "Product {verb}d successfully"
                ))))
                .await;
            let _ = ui_tx.send(UiUpdate::ProductSaved).await;
            load_comparison(state, comparison_id, ui_tx).await;
        }
        Err(e) => report_failure(ui_tx, &format!("Failed to {verb} product"), &e).await,
    }
}

/// Update a product's fields, then replace its attribute values when any
/// were given. An empty value list leaves stored values untouched.
async fn update_product(
    state: &mut AppState,
    comparison_id: i64,
    product_id: i64,
    fields: ProductUpdate,
    attribute_data: &[AttributeValueInput],
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> Result<Product, ApiError> {
    let saved = state
        .api
        .update_product(comparison_id, product_id, &fields)
        .await;
    state.track(&saved, ui_tx).await;
    let saved = saved?;

    if attribute_data.is_empty() {
        return Ok(saved);
    }

    let result = state
        .api
        .update_product_attributes(comparison_id, saved.id, attribute_data)
        .await;
    state.track(&result, ui_tx).await;
    result
}

async fn delete_product(
    state: &mut AppState,
    comparison_id: i64,
    product_id: i64,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let result = state.api.delete_product(comparison_id, product_id).await;
    state.track(&result, ui_tx).await;

    match result {
        Ok(()) => {
            info!("Deleted product {} from comparison {}", product_id, comparison_id);
            load_comparison(state, comparison_id, ui_tx).await;
            let _ = ui_tx
                .send(UiUpdate::Toast(Toast::success("Product deleted successfully")))
                .await;
        }
        Err(e) => report_failure(ui_tx, "Failed to delete product", &e).await,
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Load ranked results. On failure, fall back to the comparison detail.
async fn load_ranking(
    state: &mut AppState,
    comparison_id: i64,
    sort: SortState,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let result = state.api.get_ranking_results(comparison_id, &sort).await;
    state.track(&result, ui_tx).await;

    match result {
        Ok(results) => {
            info!(
                "Loaded {} ranked products for comparison {} (sort_by={:?}, order={})",
                results.results.len(),
                comparison_id,
                sort.sort_by,
                sort.order.as_str()
            );
            let _ = ui_tx.send(UiUpdate::RankingLoaded(Box::new(results))).await;
        }
        Err(e) => {
            report_failure(ui_tx, "Failed to load ranking results", &e).await;
            let _ = ui_tx
                .send(UiUpdate::Navigate(Screen::ComparisonDetail(comparison_id)))
                .await;
            load_comparison(state, comparison_id, ui_tx).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
