//! Data Provider
//!
//! Maps data-provider operations onto backend calls. Each call is a single
//! request; transport failures are logged once and re-raised as a
//! resource-scoped error with the original cause chained.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::extraction::{CreatePayload, ExtractionBody, ExtractionRequest};
use super::Resource;
use crate::api::{ApiClient, HttpResponse};
use crate::error::{ExtractionFailure, ProviderError, TransportError};
use crate::model::Product;

/// Response shape for create operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub data: Value,
}

impl Envelope {
    /// Decode the wrapped record as a product
    pub fn product(&self) -> Result<Product, serde_json::Error> {
        Product::deserialize(&self.data)
    }
}

/// Backend-facing data provider
#[derive(Clone)]
pub struct DataProvider {
    client: ApiClient,
}

impl DataProvider {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Fetch the collection. The decoded body is returned as received.
    pub async fn list(&self, resource: &str) -> Result<Value, ProviderError> {
        let resource: Resource = resource.parse()?;
        tracing::debug!("list: resource={}", resource);

        match self.client.get(resource.collection_path()).await {
            Ok(response) => Ok(response.body),
            Err(source) => {
                tracing::error!("Failed to fetch {}: {}", resource, source);
                Err(ProviderError::FetchFailed { resource, source })
            }
        }
    }

    /// Create a record from whichever source the payload carries
    pub async fn create(
        &self,
        resource: &str,
        payload: CreatePayload,
    ) -> Result<Envelope, ProviderError> {
        let resource: Resource = resource.parse()?;

        let request = match ExtractionRequest::try_from(payload) {
            Ok(request) => request,
            Err(err) => {
                tracing::error!("Failed to extract {}: {}", resource, err);
                return Err(ProviderError::ExtractionFailed {
                    resource,
                    source: err.into(),
                });
            }
        };

        self.extract(resource, request).await
    }

    /// Create a record from an already validated source
    pub async fn create_extraction(
        &self,
        resource: &str,
        request: ExtractionRequest,
    ) -> Result<Envelope, ProviderError> {
        let resource: Resource = resource.parse()?;
        self.extract(resource, request).await
    }

    /// Create several records concurrently.
    /// Results come back in input order; one failure does not stop the others.
    pub async fn create_many(
        &self,
        resource: &str,
        requests: Vec<ExtractionRequest>,
        concurrency: usize,
    ) -> Result<Vec<Result<Envelope, ProviderError>>, ProviderError> {
        let resource: Resource = resource.parse()?;
        tracing::info!(
            "create_many: resource={}, count={}, concurrency={}",
            resource,
            requests.len(),
            concurrency
        );

        let mut results: Vec<(usize, Result<Envelope, ProviderError>)> =
            stream::iter(requests.into_iter().enumerate())
                .map(|(idx, request)| async move { (idx, self.extract(resource, request).await) })
                .buffer_unordered(concurrency.max(1))
                .collect()
                .await;

        results.sort_by_key(|(idx, _)| *idx);
        Ok(results.into_iter().map(|(_, result)| result).collect())
    }

    pub async fn get_one(&self, resource: &str, _id: &str) -> Result<Envelope, ProviderError> {
        Err(not_implemented("getOne", resource))
    }

    pub async fn get_many(
        &self,
        resource: &str,
        _ids: &[String],
    ) -> Result<Envelope, ProviderError> {
        Err(not_implemented("getMany", resource))
    }

    pub async fn update(
        &self,
        resource: &str,
        _id: &str,
        _data: Value,
    ) -> Result<Envelope, ProviderError> {
        Err(not_implemented("update", resource))
    }

    pub async fn delete(&self, resource: &str, _id: &str) -> Result<Envelope, ProviderError> {
        Err(not_implemented("delete", resource))
    }

    async fn extract(
        &self,
        resource: Resource,
        request: ExtractionRequest,
    ) -> Result<Envelope, ProviderError> {
        let kind = request.kind();
        tracing::info!("create: resource={}, source={}", resource, kind);

        match self.send_extraction(request).await {
            Ok(response) => Ok(Envelope { data: response.body }),
            Err(source) => {
                tracing::error!("Failed to extract {} from {}: {}", resource, kind, source);
                Err(ProviderError::ExtractionFailed {
                    resource,
                    source: ExtractionFailure::Transport(source),
                })
            }
        }
    }

    async fn send_extraction(
        &self,
        request: ExtractionRequest,
    ) -> Result<HttpResponse, TransportError> {
        let path = request.path();
        match request.into_body() {
            ExtractionBody::Json(body) => self.client.post_json(path, body).await,
            ExtractionBody::Multipart(pdf) => {
                let form = pdf.into_form()?;
                self.client.post_multipart(path, form).await
            }
        }
    }
}

/// Unknown resources are reported before the missing operation
fn not_implemented(operation: &'static str, resource: &str) -> ProviderError {
    match resource.parse::<Resource>() {
        Ok(resource) => ProviderError::NotImplemented { operation, resource },
        Err(err) => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> DataProvider {
        // Unroutable; none of these tests reach the network
        DataProvider::new(ApiClient::new("http://127.0.0.1:9/api", None).unwrap())
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_resource() {
        let err = provider().list("orders").await.unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedResource(ref r) if r == "orders"));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_resource() {
        let err = provider()
            .create("orders", CreatePayload::url("http://x.test/p"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedResource(_)));
    }

    #[tokio::test]
    async fn test_create_without_source_fails_before_network() {
        let err = provider()
            .create("products", CreatePayload::default())
            .await
            .unwrap_err();
        assert!(err.is_unsupported_extraction_method());
        assert!(matches!(
            err,
            ProviderError::ExtractionFailed {
                resource: Resource::Products,
                source: ExtractionFailure::Method(_),
            }
        ));
        assert_eq!(err.to_string(), "Failed to extract product details");
    }

    #[tokio::test]
    async fn test_unimplemented_operations() {
        let provider = provider();

        let err = provider.get_one("products", "1").await.unwrap_err();
        assert_eq!(err.to_string(), "getOne is not implemented for resource products");

        let err = provider.get_many("products", &["1".to_string()]).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotImplemented { operation: "getMany", .. }));

        let err = provider.update("products", "1", json!({})).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotImplemented { operation: "update", .. }));

        let err = provider.delete("products", "1").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotImplemented { operation: "delete", .. }));
    }

    #[tokio::test]
    async fn test_unimplemented_operation_on_unknown_resource() {
        let err = provider().delete("orders", "1").await.unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedResource(_)));
    }

    #[tokio::test]
    async fn test_create_many_rejects_unknown_resource() {
        let err = provider()
            .create_many("orders", vec![ExtractionRequest::Text("x".into())], 2)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedResource(_)));
    }

    #[test]
    fn test_envelope_product() {
        let envelope = Envelope {
            data: json!({"id": "1", "name": "Widget"}),
        };
        let product = envelope.product().unwrap();
        assert_eq!(product.id.as_deref(), Some("1"));
        assert_eq!(product.name, "Widget");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"data": {"id": "1", "name": "Widget"}})
        );
    }
}
