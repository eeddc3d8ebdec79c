//! Product API access
//!
//! # Module Structure
//!
//! - [`client`] - Base URL handling and product endpoint paths
//! - [`http`] - HTTP request/response plumbing over reqwest
//!
//! # Example
//!
//! ```ignore
//! use product_admin::api::ApiClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ApiClient::new("http://localhost:8000/api", None)?;
//!     let products = client.get("/products").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use http::{json_headers, ApiHttpClient, HttpRequest, HttpResponse, RequestBody};
