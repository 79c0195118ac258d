pub mod api;
pub mod auth;
pub mod client;
pub mod models;

pub use api::KalshiEndpoint;
pub use auth::{AuthHeaders, KalshiAuth};
pub use client::KalshiClient;
pub use models::*;
