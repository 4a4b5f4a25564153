// Library root for the product ranking client: data model, REST client,
// configuration.

pub mod api;
pub mod config;
pub mod error;
pub mod model;

pub use api::{ApiClient, RankingApi};
pub use error::ApiError;
