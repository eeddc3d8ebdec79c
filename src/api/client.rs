//! API Client
//!
//! Binds the HTTP client to a backend base URL.

use super::http::{ApiHttpClient, HttpRequest, HttpResponse};
use crate::error::TransportError;
use reqwest::multipart::Form;
use serde_json::Value;
use std::time::Duration;

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Main API client
#[derive(Clone)]
pub struct ApiClient {
    pub http: ApiHttpClient,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        Ok(Self {
            http: ApiHttpClient::new(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a base-relative path; absolute URLs pass through unchanged
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn send(
        &self,
        path: &str,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        self.http.send(&self.url(path), request).await
    }

    pub async fn get(&self, path: &str) -> Result<HttpResponse, TransportError> {
        self.http.get(&self.url(path)).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> Result<HttpResponse, TransportError> {
        self.http.post_json(&self.url(path), body).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: Form,
    ) -> Result<HttpResponse, TransportError> {
        self.http.post_multipart(&self.url(path), form).await
    }
}
