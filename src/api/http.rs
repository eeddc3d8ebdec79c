//! HTTP utilities for the product API

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::error::TransportError;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Headers sent with every JSON request
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Request payload
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// The transport sets the multipart content type and boundary itself
    Multipart(Form),
}

/// Description of a single request: method, body and headers
#[derive(Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub body: RequestBody,
    pub headers: HeaderMap,
}

impl HttpRequest {
    pub fn get(headers: HeaderMap) -> Self {
        Self {
            method: Method::GET,
            body: RequestBody::Empty,
            headers,
        }
    }

    pub fn post(body: RequestBody, headers: HeaderMap) -> Self {
        Self {
            method: Method::POST,
            body,
            headers,
        }
    }
}

/// Decoded response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// HTTP client wrapper for product API calls
#[derive(Clone)]
pub struct ApiHttpClient {
    client: Client,
}

impl ApiHttpClient {
    /// Create a new HTTP client. No timeout is applied unless one is given.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder =
            Client::builder().user_agent(concat!("product-admin/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Request)?;

        Ok(Self { client })
    }

    /// Perform one request and decode the JSON response.
    /// Every failure is returned as-is; nothing is retried.
    pub async fn send(
        &self,
        url: &str,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(TransportError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(TransportError::Request)?;

        if !status.is_success() {
            let body = sanitize_for_log(&body);
            tracing::debug!("API error: {} - {}", status, body);
            return Err(TransportError::Status { status, body });
        }

        // Handle empty response
        if body.trim().is_empty() {
            return Ok(HttpResponse {
                status,
                body: Value::Null,
            });
        }

        let body = serde_json::from_str(&body).map_err(TransportError::Decode)?;
        Ok(HttpResponse { status, body })
    }

    /// Make a GET request with JSON headers
    pub async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.send(url, HttpRequest::get(json_headers())).await
    }

    /// Make a POST request with a JSON body
    pub async fn post_json(&self, url: &str, body: Value) -> Result<HttpResponse, TransportError> {
        self.send(url, HttpRequest::post(RequestBody::Json(body), json_headers())).await
    }

    /// Make a POST request with a multipart body
    pub async fn post_multipart(
        &self,
        url: &str,
        form: Form,
    ) -> Result<HttpResponse, TransportError> {
        let mut headers = json_headers();
        headers.remove(CONTENT_TYPE);
        self.send(url, HttpRequest::post(RequestBody::Multipart(form), headers)).await
    }
}
