// Integration tests for the product ranking client.
//
// These drive the app orchestrator end-to-end through its channels, against
// an in-memory backend implementing `RankingApi`, and check the exact
// `UiUpdate` stream the TUI would receive.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ranking_core::config::Config;
use ranking_core::model::*;
use ranking_core::{ApiClient, ApiError, RankingApi};
use ranking_tui::app::{self, AppState};
use ranking_tui::protocol::*;

use tokio::sync::mpsc;

// ===========================================================================
// In-memory backend
// ===========================================================================

#[derive(Default)]
struct Store {
    comparisons: Vec<Comparison>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn comparison_mut(&mut self, id: i64) -> Result<&mut Comparison, ApiError> {
        self.comparisons
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Comparison"))
    }
}

/// Backend fake: records every call by name and fails the ones listed in
/// `failing` with a 500.
#[derive(Default)]
struct FakeApi {
    store: Mutex<Store>,
    calls: Mutex<Vec<&'static str>>,
    failing: Mutex<HashSet<&'static str>>,
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("{what} not found"),
    }
}

const TIMESTAMP: &str = "2025-07-01T12:00:00Z";

impl FakeApi {
    fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, op: &'static str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(op);
        if self.failing.lock().unwrap().contains(op) {
            return Err(ApiError::Status {
                status: 500,
                message: "Internal server error".into(),
            });
        }
        Ok(())
    }

    /// Seed a comparison with Price (number, USD) and Brand (text) and the
    /// given `(name, price)` products.
    fn seed(&self, name: &str, products: &[(&str, &str)]) -> i64 {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        let price = Attribute {
            id: store.next_id(),
            name: "Price".into(),
            data_type: DataType::Number,
            unit: Some("USD".into()),
        };
        let brand = Attribute {
            id: store.next_id(),
            name: "Brand".into(),
            data_type: DataType::Text,
            unit: None,
        };
        let mut seeded = Vec::new();
        for (product_name, value) in products {
            let product_id = store.next_id();
            let value_id = store.next_id();
            seeded.push(Product {
                id: product_id,
                name: product_name.to_string(),
                description: None,
                created_at: Some(TIMESTAMP.into()),
                updated_at: Some(TIMESTAMP.into()),
                attribute_data: vec![AttributeValue {
                    id: value_id,
                    attribute: price.clone(),
                    value: value.to_string(),
                }],
            });
        }
        store.comparisons.push(Comparison {
            id,
            name: name.to_string(),
            description: None,
            created_at: TIMESTAMP.into(),
            updated_at: TIMESTAMP.into(),
            attributes: vec![price, brand],
            product_count: seeded.len() as u32,
            products: seeded,
        });
        id
    }

    fn comparison(&self, id: i64) -> Comparison {
        let store = self.store.lock().unwrap();
        store
            .comparisons
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .unwrap()
    }
}

fn attribute_values(
    store: &mut Store,
    attributes: &[Attribute],
    inputs: &[AttributeValueInput],
) -> Vec<AttributeValue> {
    inputs
        .iter()
        .filter_map(|input| {
            let attribute = attributes.iter().find(|a| a.id == input.attribute_id)?;
            Some(AttributeValue {
                id: store.next_id(),
                attribute: attribute.clone(),
                value: input.value.clone(),
            })
        })
        .collect()
}

#[async_trait]
impl RankingApi for FakeApi {
    async fn list_comparisons(&self) -> Result<Vec<ComparisonSummary>, ApiError> {
        self.enter("list_comparisons")?;
        let store = self.store.lock().unwrap();
        Ok(store
            .comparisons
            .iter()
            .map(|c| ComparisonSummary {
                id: c.id,
                name: c.name.clone(),
                description: c.description.clone(),
                created_at: c.created_at.clone(),
                updated_at: c.updated_at.clone(),
                product_count: c.products.len() as u32,
                attribute_count: c.attributes.len() as u32,
            })
            .collect())
    }

    async fn create_comparison(&self, body: &NewComparison) -> Result<Comparison, ApiError> {
        self.enter("create_comparison")?;
        let mut store = self.store.lock().unwrap();
        let comparison = Comparison {
            id: store.next_id(),
            name: body.name.clone(),
            description: body.description.clone(),
            created_at: TIMESTAMP.into(),
            updated_at: TIMESTAMP.into(),
            attributes: Vec::new(),
            products: Vec::new(),
            product_count: 0,
        };
        store.comparisons.push(comparison.clone());
        Ok(comparison)
    }

    async fn get_comparison(&self, id: i64) -> Result<Comparison, ApiError> {
        self.enter("get_comparison")?;
        let mut store = self.store.lock().unwrap();
        store.comparison_mut(id).map(|c| c.clone())
    }

    async fn update_comparison(
        &self,
        id: i64,
        body: &NewComparison,
    ) -> Result<Comparison, ApiError> {
        self.enter("update_comparison")?;
        let mut store = self.store.lock().unwrap();
        let comparison = store.comparison_mut(id)?;
        comparison.name = body.name.clone();
        comparison.description = body.description.clone();
        Ok(comparison.clone())
    }

    async fn delete_comparison(&self, id: i64) -> Result<(), ApiError> {
        self.enter("delete_comparison")?;
        let mut store = self.store.lock().unwrap();
        store.comparison_mut(id)?;
        store.comparisons.retain(|c| c.id != id);
        Ok(())
    }

    async fn list_attributes(&self, comparison_id: i64) -> Result<Vec<Attribute>, ApiError> {
        self.enter("list_attributes")?;
        let mut store = self.store.lock().unwrap();
        Ok(store.comparison_mut(comparison_id)?.attributes.clone())
    }

    async fn create_attribute(
        &self,
        comparison_id: i64,
        body: &NewAttribute,
    ) -> Result<Attribute, ApiError> {
        self.enter("create_attribute")?;
        let mut store = self.store.lock().unwrap();
        let attribute = Attribute {
            id: store.next_id(),
            name: body.name.clone(),
            data_type: body.data_type,
            unit: body.unit.clone(),
        };
        store
            .comparison_mut(comparison_id)?
            .attributes
            .push(attribute.clone());
        Ok(attribute)
    }

    async fn update_attribute(
        &self,
        comparison_id: i64,
        attribute_id: i64,
        body: &NewAttribute,
    ) -> Result<Attribute, ApiError> {
        self.enter("update_attribute")?;
        let mut store = self.store.lock().unwrap();
        let attribute = store
            .comparison_mut(comparison_id)?
            .attributes
            .iter_mut()
            .find(|a| a.id == attribute_id)
            .ok_or_else(|| not_found("Attribute"))?;
        attribute.name = body.name.clone();
        attribute.data_type = body.data_type;
        attribute.unit = body.unit.clone();
        Ok(attribute.clone())
    }

    async fn delete_attribute(
        &self,
        comparison_id: i64,
        attribute_id: i64,
    ) -> Result<(), ApiError> {
        self.enter("delete_attribute")?;
        let mut store = self.store.lock().unwrap();
        store
            .comparison_mut(comparison_id)?
            .attributes
            .retain(|a| a.id != attribute_id);
        Ok(())
    }

    async fn list_products(&self, comparison_id: i64) -> Result<Vec<Product>, ApiError> {
        self.enter("list_products")?;
        let mut store = self.store.lock().unwrap();
        Ok(store.comparison_mut(comparison_id)?.products.clone())
    }

    async fn create_product(
        &self,
        comparison_id: i64,
        body: &NewProduct,
    ) -> Result<Product, ApiError> {
        self.enter("create_product")?;
        let mut store = self.store.lock().unwrap();
        let attributes = store.comparison_mut(comparison_id)?.attributes.clone();
        let attribute_data = attribute_values(&mut store, &attributes, &body.attribute_data);
        let product = Product {
            id: store.next_id(),
            name: body.name.clone(),
            description: body.description.clone(),
            created_at: Some(TIMESTAMP.into()),
            updated_at: Some(TIMESTAMP.into()),
            attribute_data,
        };
        store
            .comparison_mut(comparison_id)?
            .products
            .push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        comparison_id: i64,
        product_id: i64,
        body: &ProductUpdate,
    ) -> Result<Product, ApiError> {
        self.enter("update_product")?;
        let mut store = self.store.lock().unwrap();
        let product = store
            .comparison_mut(comparison_id)?
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| not_found("Product"))?;
        product.name = body.name.clone();
        product.description = body.description.clone();
        Ok(product.clone())
    }

    async fn delete_product(&self, comparison_id: i64, product_id: i64) -> Result<(), ApiError> {
        self.enter("delete_product")?;
        let mut store = self.store.lock().unwrap();
        store
            .comparison_mut(comparison_id)?
            .products
            .retain(|p| p.id != product_id);
        Ok(())
    }

    async fn update_product_attributes(
        &self,
        comparison_id: i64,
        product_id: i64,
        attribute_data: &[AttributeValueInput],
    ) -> Result<Product, ApiError> {
        self.enter("update_product_attributes")?;
        let mut store = self.store.lock().unwrap();
        let attributes = store.comparison_mut(comparison_id)?.attributes.clone();
        let values = attribute_values(&mut store, &attributes, attribute_data);
        let product = store
            .comparison_mut(comparison_id)?
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| not_found("Product"))?;
        product.attribute_data = values;
        Ok(product.clone())
    }

    async fn get_ranking_results(
        &self,
        comparison_id: i64,
        sort: &SortState,
    ) -> Result<RankingResults, ApiError> {
        self.enter("get_ranking_results")?;
        let mut store = self.store.lock().unwrap();
        let comparison = store.comparison_mut(comparison_id)?.clone();

        let mut products = comparison.products.clone();
        if let Some(key) = &sort.sort_by {
            let number = |p: &Product| -> f64 {
                p.attribute_data
                    .iter()
                    .find(|v| &v.attribute.name == key)
                    .and_then(|v| v.value.parse().ok())
                    .unwrap_or(f64::MIN)
            };
            products.sort_by(|a, b| number(a).total_cmp(&number(b)));
            if sort.order == SortOrder::Desc {
                products.reverse();
            }
        }

        let results = products
            .iter()
            .enumerate()
            .map(|(i, p)| RankingEntry {
                product_id: p.id,
                product_name: p.name.clone(),
                attribute_values: p
                    .attribute_data
                    .iter()
                    .map(|v| {
                        (
                            v.attribute.name.clone(),
                            RankedValue {
                                value: v.value.clone(),
                                unit: v.attribute.unit.clone(),
                                data_type: v.attribute.data_type,
                            },
                        )
                    })
                    .collect(),
                rank: i as u32 + 1,
                score: None,
            })
            .collect();

        Ok(RankingResults {
            comparison,
            results,
            sort_by: sort.sort_by.clone(),
            sort_order: sort.order,
        })
    }
}

// ===========================================================================
// Test helpers
// ===========================================================================

/// Run the orchestrator over `commands` and collect every update it sent.
async fn run_commands(api: Arc<dyn RankingApi>, commands: Vec<UserCommand>) -> Vec<UiUpdate> {
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ui_tx, mut ui_rx) = mpsc::channel(256);
    for cmd in commands {
        cmd_tx.send(cmd).await.unwrap();
    }
    drop(cmd_tx);

    app::run(cmd_rx, ui_tx, AppState::new(api)).await.unwrap();

    let mut updates = Vec::new();
    while let Some(update) = ui_rx.recv().await {
        updates.push(update);
    }
    updates
}

fn toasts(updates: &[UiUpdate]) -> Vec<&Toast> {
    updates
        .iter()
        .filter_map(|u| match u {
            UiUpdate::Toast(t) => Some(t),
            _ => None,
        })
        .collect()
}

fn loaded_comparison(updates: &[UiUpdate]) -> Option<&Comparison> {
    updates.iter().rev().find_map(|u| match u {
        UiUpdate::ComparisonLoaded(c) => Some(c.as_ref()),
        _ => None,
    })
}

fn position(updates: &[UiUpdate], pred: impl Fn(&UiUpdate) -> bool) -> usize {
    updates
        .iter()
        .position(pred)
        .expect("expected update not found")
}

// ===========================================================================
// Comparisons
// ===========================================================================

#[tokio::test]
async fn load_comparisons_reports_list_and_connection() {
    let api = Arc::new(FakeApi::default());
    api.seed("Laptops", &[("A", "999"), ("B", "1299")]);

    let updates = run_commands(api.clone(), vec![UserCommand::LoadComparisons]).await;

    assert_eq!(updates.len(), 4, "{:?}", updates);
    assert_eq!(updates[0], UiUpdate::Busy(true));
    assert_eq!(
        updates[1],
        UiUpdate::ConnectionStatus(ConnectionStatus::Connected)
    );
    match &updates[2] {
        UiUpdate::ComparisonsLoaded(list) => {
            assert_eq!(list.len(), 1);
            assert_eq!(list[0].name, "Laptops");
            assert_eq!(list[0].product_count, 2);
            assert!(list[0].can_rank());
        }
        other => panic!("expected ComparisonsLoaded, got {:?}", other),
    }
    assert_eq!(updates[3], UiUpdate::Busy(false));
}

#[tokio::test]
async fn connection_status_is_sent_only_on_change() {
    let api = Arc::new(FakeApi::default());
    let updates = run_commands(
        api,
        vec![UserCommand::LoadComparisons, UserCommand::LoadComparisons],
    )
    .await;

    let status_updates = updates
        .iter()
        .filter(|u| matches!(u, UiUpdate::ConnectionStatus(_)))
        .count();
    assert_eq!(status_updates, 1);
}

#[tokio::test]
async fn failed_list_shows_error_toast_with_detail() {
    let api = Arc::new(FakeApi::default());
    api.fail("list_comparisons");

    let updates = run_commands(api, vec![UserCommand::LoadComparisons]).await;

    let toasts = toasts(&updates);
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].message, "Failed to load comparisons");
    assert_eq!(toasts[0].detail.as_deref(), Some("Internal server error"));
    // The server answered, so it is still reachable
    assert!(updates.contains(&UiUpdate::ConnectionStatus(ConnectionStatus::Connected)));
}

#[tokio::test]
async fn create_comparison_adds_attributes_then_opens_detail() {
    let api = Arc::new(FakeApi::default());
    let command = UserCommand::CreateComparison {
        comparison: NewComparison {
            name: "Phones".into(),
            description: None,
        },
        attributes: vec![
            NewAttribute {
                name: "Battery".into(),
                data_type: DataType::Number,
                unit: Some("mAh".into()),
            },
            NewAttribute {
                name: "OS".into(),
                data_type: DataType::Text,
                unit: None,
            },
        ],
    };

    let updates = run_commands(api.clone(), vec![command]).await;

    assert_eq!(
        api.calls(),
        vec![
            "create_comparison",
            "create_attribute",
            "create_attribute",
            "get_comparison"
        ]
    );

    let toasts = toasts(&updates);
    assert_eq!(toasts[0].message, "Comparison created successfully");
    assert_eq!(toasts[0].kind, ToastKind::Success);

    let detail = loaded_comparison(&updates).unwrap();
    assert_eq!(detail.name, "Phones");
    let names: Vec<&str> = detail.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Battery", "OS"]);

    let navigate = position(&updates, |u| {
        *u == UiUpdate::Navigate(Screen::ComparisonDetail(detail.id))
    });
    let loaded = position(&updates, |u| matches!(u, UiUpdate::ComparisonLoaded(_)));
    assert!(navigate < loaded);
    assert_eq!(updates.last(), Some(&UiUpdate::Busy(false)));
}

#[tokio::test]
async fn create_comparison_stops_at_failed_attribute() {
    let api = Arc::new(FakeApi::default());
    api.fail("create_attribute");
    let command = UserCommand::CreateComparison {
        comparison: NewComparison {
            name: "Phones".into(),
            description: None,
        },
        attributes: vec![
            NewAttribute {
                name: "Battery".into(),
                data_type: DataType::Number,
                unit: None,
            },
            NewAttribute {
                name: "OS".into(),
                data_type: DataType::Text,
                unit: None,
            },
        ],
    };

    let updates = run_commands(api.clone(), vec![command]).await;

    assert_eq!(api.calls(), vec!["create_comparison", "create_attribute"]);
    assert_eq!(toasts(&updates)[0].message, "Failed to create comparison");
    assert!(!updates.iter().any(|u| matches!(u, UiUpdate::Navigate(_))));
}

#[tokio::test]
async fn delete_comparison_removes_it_from_the_list() {
    let api = Arc::new(FakeApi::default());
    let id = api.seed("Laptops", &[]);

    let updates = run_commands(api.clone(), vec![UserCommand::DeleteComparison { id }]).await;

    assert!(updates.contains(&UiUpdate::ComparisonRemoved(id)));
    assert_eq!(toasts(&updates)[0].message, "Comparison deleted successfully");
    assert_eq!(api.calls(), vec!["delete_comparison"]);
}

#[tokio::test]
async fn delete_missing_comparison_reports_backend_message() {
    let api = Arc::new(FakeApi::default());

    let updates = run_commands(api, vec![UserCommand::DeleteComparison { id: 42 }]).await;

    assert!(!updates.iter().any(|u| matches!(u, UiUpdate::ComparisonRemoved(_))));
    let toasts = toasts(&updates);
    assert_eq!(toasts[0].message, "Failed to delete comparison");
    assert_eq!(toasts[0].detail.as_deref(), Some("Comparison not found"));
}

#[tokio::test]
async fn failed_detail_load_falls_back_to_dashboard() {
    let api = Arc::new(FakeApi::default());
    api.seed("Laptops", &[]);

    let updates = run_commands(api, vec![UserCommand::LoadComparison { id: 99 }]).await;

    assert_eq!(toasts(&updates)[0].message, "Failed to load comparison");
    let navigate = position(&updates, |u| *u == UiUpdate::Navigate(Screen::Dashboard));
    let reloaded = position(&updates, |u| matches!(u, UiUpdate::ComparisonsLoaded(_)));
    assert!(navigate < reloaded);
}

// ===========================================================================
// Products
// ===========================================================================

#[tokio::test]
async fn new_product_is_created_with_values() {
    let api = Arc::new(FakeApi::default());
    let id = api.seed("Laptops", &[]);
    let price_id = api.comparison(id).attributes[0].id;

    let command = UserCommand::SaveProduct {
        comparison_id: id,
        product_id: None,
        fields: ProductUpdate {
            name: "ThinkPad".into(),
            description: None,
        },
        attribute_data: vec![AttributeValueInput {
            attribute_id: price_id,
            value: "1299".into(),
        }],
    };
    let updates = run_commands(api.clone(), vec![command]).await;

    assert_eq!(api.calls(), vec!["create_product", "get_comparison"]);
    assert!(updates.contains(&UiUpdate::ProductSaved));
    assert_eq!(toasts(&updates)[0].message, "Product created successfully");

    let detail = loaded_comparison(&updates).unwrap();
    assert_eq!(detail.products.len(), 1);
    assert_eq!(detail.products[0].attribute_data[0].display(), "1299 USD");
}

#[tokio::test]
async fn edit_without_values_leaves_attributes_alone() {
    let api = Arc::new(FakeApi::default());
    let id = api.seed("Laptops", &[("ThinkPad", "1299")]);
    let product_id = api.comparison(id).products[0].id;

    let command = UserCommand::SaveProduct {
        comparison_id: id,
        product_id: Some(product_id),
        fields: ProductUpdate {
            name: "ThinkPad X1".into(),
            description: Some("2025 model".into()),
        },
        attribute_data: vec![],
    };
    let updates = run_commands(api.clone(), vec![command]).await;

    assert_eq!(api.calls(), vec!["update_product", "get_comparison"]);
    assert_eq!(toasts(&updates)[0].message, "Product updated successfully");

    let product = &api.comparison(id).products[0];
    assert_eq!(product.name, "ThinkPad X1");
    assert_eq!(product.attribute_data[0].value, "1299");
}

#[tokio::test]
async fn edit_with_values_replaces_attributes() {
    let api = Arc::new(FakeApi::default());
    let id = api.seed("Laptops", &[("ThinkPad", "1299")]);
    let stored = api.comparison(id);
    let product_id = stored.products[0].id;
    let brand_id = stored.attributes[1].id;

    let command = UserCommand::SaveProduct {
        comparison_id: id,
        product_id: Some(product_id),
        fields: ProductUpdate {
            name: "ThinkPad".into(),
            description: None,
        },
        attribute_data: vec![AttributeValueInput {
            attribute_id: brand_id,
            value: "Lenovo".into(),
        }],
    };
    run_commands(api.clone(), vec![command]).await;

    assert_eq!(
        api.calls(),
        vec!["update_product", "update_product_attributes", "get_comparison"]
    );
    let values = &api.comparison(id).products[0].attribute_data;
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].attribute.name, "Brand");
    assert_eq!(values[0].value, "Lenovo");
}

#[tokio::test]
async fn failed_product_save_keeps_form_open() {
    let api = Arc::new(FakeApi::default());
    let id = api.seed("Laptops", &[("ThinkPad", "1299")]);
    let product_id = api.comparison(id).products[0].id;
    api.fail("update_product");

    let command = UserCommand::SaveProduct {
        comparison_id: id,
        product_id: Some(product_id),
        fields: ProductUpdate {
            name: "Renamed".into(),
            description: None,
        },
        attribute_data: vec![],
    };
    let updates = run_commands(api.clone(), vec![command]).await;

    assert!(!updates.contains(&UiUpdate::ProductSaved));
    let toasts = toasts(&updates);
    assert_eq!(toasts[0].message, "Failed to update product");
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(api.calls(), vec!["update_product"]);
}

#[tokio::test]
async fn delete_product_reloads_before_toast() {
    let api = Arc::new(FakeApi::default());
    let id = api.seed("Laptops", &[("A", "1"), ("B", "2")]);
    let product_id = api.comparison(id).products[0].id;

    let updates = run_commands(
        api,
        vec![UserCommand::DeleteProduct {
            comparison_id: id,
            product_id,
        }],
    )
    .await;

    let loaded = position(&updates, |u| matches!(u, UiUpdate::ComparisonLoaded(_)));
    let toast = position(&updates, |u| matches!(u, UiUpdate::Toast(_)));
    assert!(loaded < toast);
    assert_eq!(loaded_comparison(&updates).unwrap().products.len(), 1);
    assert_eq!(toasts(&updates)[0].message, "Product deleted successfully");
}

// ===========================================================================
// Ranking
// ===========================================================================

#[tokio::test]
async fn ranking_follows_requested_sort() {
    let api = Arc::new(FakeApi::default());
    let id = api.seed("Laptops", &[("Mid", "999"), ("Cheap", "499"), ("Pricey", "1999")]);

    let mut sort = SortState::default();
    sort.select(Some("Price"));
    let updates = run_commands(
        api,
        vec![UserCommand::LoadRanking {
            comparison_id: id,
            sort,
        }],
    )
    .await;

    let results = updates
        .iter()
        .find_map(|u| match u {
            UiUpdate::RankingLoaded(r) => Some(r.as_ref()),
            _ => None,
        })
        .unwrap();
    let names: Vec<&str> = results
        .results
        .iter()
        .map(|e| e.product_name.as_str())
        .collect();
    assert_eq!(names, vec!["Pricey", "Mid", "Cheap"]);
    assert_eq!(results.results[0].rank, 1);
    assert_eq!(results.results[0].display_value("Price"), "1999 USD");
}

#[tokio::test]
async fn failed_ranking_returns_to_detail() {
    let api = Arc::new(FakeApi::default());
    let id = api.seed("Laptops", &[("A", "1"), ("B", "2")]);
    api.fail("get_ranking_results");

    let updates = run_commands(
        api,
        vec![UserCommand::LoadRanking {
            comparison_id: id,
            sort: SortState::default(),
        }],
    )
    .await;

    assert_eq!(toasts(&updates)[0].message, "Failed to load ranking results");
    let navigate = position(&updates, |u| {
        *u == UiUpdate::Navigate(Screen::ComparisonDetail(id))
    });
    let loaded = position(&updates, |u| matches!(u, UiUpdate::ComparisonLoaded(_)));
    assert!(navigate < loaded);
}

// ===========================================================================
// Real client against an unreachable backend
// ===========================================================================

#[tokio::test]
async fn unreachable_backend_marks_connection() {
    // Grab a free port, then close it so nothing is listening there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}/api"), Duration::from_secs(2)).unwrap();
    let updates = run_commands(Arc::new(client), vec![UserCommand::LoadComparisons]).await;

    assert_eq!(updates.len(), 4, "{:?}", updates);
    assert_eq!(updates[0], UiUpdate::Busy(true));
    assert_eq!(
        updates[1],
        UiUpdate::ConnectionStatus(ConnectionStatus::Unreachable)
    );
    assert!(matches!(updates[2], UiUpdate::Toast(_)));
    assert_eq!(updates[3], UiUpdate::Busy(false));
    let toasts = toasts(&updates);
    assert_eq!(toasts[0].message, "Failed to load comparisons");
    assert!(toasts[0].detail.as_deref().unwrap().starts_with("network error"));
}

// ===========================================================================
// Shipped configuration
// ===========================================================================

#[test]
fn default_config_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../defaults/ranking.toml");
    let content = std::fs::read_to_string(&path).expect("defaults/ranking.toml should exist");
    let config: Config = toml::from_str(&content).expect("defaults/ranking.toml should parse");
    assert!(config.api.base_url.starts_with("http://"));
    assert!(config.api.base_url.ends_with("/api"));
    assert!(config.ui.toast_secs > 0);
    assert!(config.ui.tick_ms > 0);
}
