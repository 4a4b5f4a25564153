// REST client for the ranking backend.
//
// Every call goes through one request wrapper (`ApiClient::execute`) that
// builds the URL from the configured base, sends JSON, and turns non-2xx
// answers into `ApiError::Status` with the backend's own message when it
// sent one. The typed operations on top are exposed through the
// `RankingApi` trait so the app orchestrator can run against a fake.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::model::{
    Attribute, AttributeValueInput, Comparison, ComparisonSummary, NewAttribute, NewComparison,
    NewProduct, Product, ProductUpdate, RankingResults, SortState,
};

/// JSON keys checked, in order, for a human-readable error message in a
/// failed response body.
const ERROR_MESSAGE_KEYS: &[&str] = &["message", "error", "detail"];

// ---------------------------------------------------------------------------
// RankingApi
// ---------------------------------------------------------------------------

/// Typed operations offered by the ranking backend.
#[async_trait]
pub trait RankingApi: Send + Sync {
    async fn list_comparisons(&self) -> Result<Vec<ComparisonSummary>, ApiError>;
    async fn create_comparison(&self, body: &NewComparison) -> Result<Comparison, ApiError>;
    async fn get_comparison(&self, id: i64) -> Result<Comparison, ApiError>;
    async fn update_comparison(&self, id: i64, body: &NewComparison)
        -> Result<Comparison, ApiError>;
    async fn delete_comparison(&self, id: i64) -> Result<(), ApiError>;

    async fn list_attributes(&self, comparison_id: i64) -> Result<Vec<Attribute>, ApiError>;
    async fn create_attribute(
        &self,
        comparison_id: i64,
        body: &NewAttribute,
    ) -> Result<Attribute, ApiError>;
    async fn update_attribute(
        &self,
        comparison_id: i64,
        attribute_id: i64,
        body: &NewAttribute,
    ) -> Result<Attribute, ApiError>;
    async fn delete_attribute(&self, comparison_id: i64, attribute_id: i64)
        -> Result<(), ApiError>;

    async fn list_products(&self, comparison_id: i64) -> Result<Vec<Product>, ApiError>;
    async fn create_product(
        &self,
        comparison_id: i64,
        body: &NewProduct,
    ) -> Result<Product, ApiError>;
    async fn update_product(
        &self,
        comparison_id: i64,
        product_id: i64,
        body: &ProductUpdate,
    ) -> Result<Product, ApiError>;
    async fn delete_product(&self, comparison_id: i64, product_id: i64) -> Result<(), ApiError>;
    /// Replace all attribute values of a product.
    async fn update_product_attributes(
        &self,
        comparison_id: i64,
        product_id: i64,
        attribute_data: &[AttributeValueInput],
    ) -> Result<Product, ApiError>;

    async fn get_ranking_results(
        &self,
        comparison_id: i64,
        sort: &SortState,
    ) -> Result<RankingResults, ApiError>;
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// HTTP implementation of [`RankingApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:5000/api`).
    /// A trailing slash on the base URL is ignored.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json")
    }

    /// Send a request and return the raw body of a 2xx response.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<String, ApiError> {
        debug!(%method, path, "API request");

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(%method, path, error = %e, "API request failed");
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    %method,
                    path,
                    status = status.as_u16(),
                    error = %e,
                    "failed to read API response body"
                );
                return Err(ApiError::Body {
                    path: path.to_string(),
                    status: status.as_u16(),
                    source: e,
                });
            }
        };

        if !status.is_success() {
            let message = error_message(status.as_u16(), &body);
            warn!(%method, path, status = status.as_u16(), %message, "API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self
            .execute(Method::GET, path, self.request(Method::GET, path))
            .await?;
        decode(path, &body)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(method.clone(), path).json(body);
        let body = self.execute(method, path, request).await?;
        decode(path, &body)
    }

    /// DELETE ignores the response body; backends answer 204 with nothing.
    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, self.request(Method::DELETE, path))
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl RankingApi for ApiClient {
    async fn list_comparisons(&self) -> Result<Vec<ComparisonSummary>, ApiError> {
        self.get_json("/comparisons/").await
    }

    async fn create_comparison(&self, body: &NewComparison) -> Result<Comparison, ApiError> {
        self.send_json(Method::POST, "/comparisons/", body).await
    }

    async fn get_comparison(&self, id: i64) -> Result<Comparison, ApiError> {
        self.get_json(&format!("/comparisons/{id}/")).await
    }

    async fn update_comparison(
        &self,
        id: i64,
        body: &NewComparison,
    ) -> Result<Comparison, ApiError> {
        self.send_json(Method::PUT, &format!("/comparisons/{id}/"), body)
            .await
    }

    async fn delete_comparison(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/comparisons/{id}/")).await
    }

    async fn list_attributes(&self, comparison_id: i64) -> Result<Vec<Attribute>, ApiError> {
        self.get_json(&format!("/comparisons/{comparison_id}/attributes/"))
            .await
    }

    async fn create_attribute(
        &self,
        comparison_id: i64,
        body: &NewAttribute,
    ) -> Result<Attribute, ApiError> {
        self.send_json(
            Method::POST,
            &format!("/comparisons/{comparison_id}/attributes/"),
            body,
        )
        .await
    }

    async fn update_attribute(
        &self,
        comparison_id: i64,
        attribute_id: i64,
        body: &NewAttribute,
    ) -> Result<Attribute, ApiError> {
        self.send_json(
            Method::PUT,
            &format!("/comparisons/{comparison_id}/attributes/{attribute_id}/"),
            body,
        )
        .await
    }

    async fn delete_attribute(
        &self,
        comparison_id: i64,
        attribute_id: i64,
    ) -> Result<(), ApiError> {
        self.delete(&format!(
            "/comparisons/{comparison_id}/attributes/{attribute_id}/"
        ))
        .await
    }

    async fn list_products(&self, comparison_id: i64) -> Result<Vec<Product>, ApiError> {
        self.get_json(&format!("/comparisons/{comparison_id}/products/"))
            .await
    }

    async fn create_product(
        &self,
        comparison_id: i64,
        body: &NewProduct,
    ) -> Result<Product, ApiError> {
        self.send_json(
            Method::POST,
            &format!("/comparisons/{comparison_id}/products/"),
            body,
        )
        .await
    }

    async fn update_product(
        &self,
        comparison_id: i64,
        product_id: i64,
        body: &ProductUpdate,
    ) -> Result<Product, ApiError> {
        self.send_json(
            Method::PUT,
            &format!("/comparisons/{comparison_id}/products/{product_id}/"),
            body,
        )
        .await
    }

    async fn delete_product(&self, comparison_id: i64, product_id: i64) -> Result<(), ApiError> {
        self.delete(&format!(
            "/comparisons/{comparison_id}/products/{product_id}/"
        ))
        .await
    }

    async fn update_product_attributes(
        &self,
        comparison_id: i64,
        product_id: i64,
        attribute_data: &[AttributeValueInput],
    ) -> Result<Product, ApiError> {
        let body = serde_json::json!({ "attribute_data": attribute_data });
        self.send_json(
            Method::POST,
            &format!("/comparisons/{comparison_id}/products/{product_id}/attributes/"),
            &body,
        )
        .await
    }

    async fn get_ranking_results(
        &self,
        comparison_id: i64,
        sort: &SortState,
    ) -> Result<RankingResults, ApiError> {
        let path = format!("/comparisons/{comparison_id}/results/");
        let request = self
            .request(Method::GET, &path)
            .query(&sort.query_pairs());
        let body = self.execute(Method::GET, &path, request).await?;
        decode(&path, &body)
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| {
        warn!(path, error = %source, "failed to decode API response");
        ApiError::Decode {
            path: path.to_string(),
            source,
        }
    })
}

/// Pick the backend's error message out of a failed response body, falling
/// back to a generic status message.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ERROR_MESSAGE_KEYS.iter().find_map(|key| {
                v.get(*key)
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
